/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Decompiling the brushes of a level, one at a time.

use log::debug;
use na::Vector3;
use serde::{Deserialize, Serialize};
use stockton_levels::{
    Contents, MipTexture, PlaneTable, TexInfoRef, TextureInfo, TextureRef, TextureSet,
};

use crate::bevels::add_brush_bevels;
use crate::brush::{brush_from_bounds, make_brush_windings, Brush, DecompiledBrush, InvalidBounds};
use crate::convert::brush_to_solid;
use crate::error::{DecompileError, Result};
use crate::map::MapEntity;
use crate::options::DecompilerOptions;
use crate::texture::{
    texture_axes_for_class, texture_axis_class, texture_axis_from_plane, N_AXIS_CLASSES,
};

/// Half the width of the brush added by [`Decompiler::add_origin_brush`].
pub const ORIGIN_BRUSH_HALF_SIZE: f64 = 8.0;

pub const ORIGIN_TEXTURE: &str = "ORIGIN";
pub const NULL_TEXTURE: &str = "NULL";

/// Texture given to every face of a trigger's brushes.
pub const TRIGGER_TEXTURE: &str = "tools/toolstrigger";

/// Brushes of entities with this classname can have no texture.
pub fn is_trigger(classname: &str) -> bool {
    classname.starts_with("trigger_")
}

/// See [`is_trigger`]
pub fn is_no_grenades(classname: &str) -> bool {
    classname.starts_with("func_nogrenades")
}

fn is_tool_volume(classname: &str) -> bool {
    is_trigger(classname) || is_no_grenades(classname)
}

/// Counts of what happened to brushes so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompileStats {
    /// Brushes that got through winding and bevelling, plus origin brushes.
    pub map_brushes: usize,

    /// Brushes thrown away for having no texture.
    pub clip_brushes: usize,
}

/// Why a brush isn't in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    Untextured,
    InvalidBounds(InvalidBounds),
    Liquid,
}

/// What happened to one brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushOutcome {
    /// A solid was added to the entity
    Converted,
    Discarded(DiscardReason),
}

/// Turns brushes from a compiled level into solids.
/// Owns the level's planes and textures, which grow as brushes are decompiled.
#[derive(Debug)]
pub struct Decompiler {
    planes: PlaneTable,
    textures: TextureSet,
    options: DecompilerOptions,

    origin_texture: TextureRef,

    /// One per texture axis class, so each side is projected along its own plane
    null_texinfos: Option<Vec<TexInfoRef>>,

    stats: DecompileStats,
}

impl Decompiler {
    pub fn new(planes: PlaneTable, mut textures: TextureSet, options: DecompilerOptions) -> Decompiler {
        let origin_texture = textures.add_texture(MipTexture::named(ORIGIN_TEXTURE));

        let null_texinfos = if options.apply_null_to_generated_faces {
            let null = textures.add_texture(MipTexture::named(NULL_TEXTURE));
            let infos: Vec<TexInfoRef> = (0..N_AXIS_CLASSES)
                .map(|class| {
                    let (u_axis, v_axis) = texture_axes_for_class(class);
                    textures.add_info(TextureInfo::from_axes(null, &u_axis, &v_axis))
                })
                .collect();

            Some(infos)
        } else {
            None
        };

        Decompiler {
            planes,
            textures,
            options,
            origin_texture,
            null_texinfos,
            stats: DecompileStats::default(),
        }
    }

    /// Decompile one brush of `entity`, adding a solid to it if the brush survives.
    ///
    /// Brushes with bad geometry or no texture are discarded, which isn't an error.
    /// An error is only returned if the brush refers to planes or textures that don't exist.
    pub fn decompile_brush(&mut self, mut brush: Brush, entity: &mut MapEntity) -> Result<BrushOutcome> {
        let index = self.stats.map_brushes;
        self.validate(&brush, index)?;

        // the last textured side wins
        let best_texinfo = brush.sides.iter().filter_map(|s| s.texinfo).last();

        if best_texinfo.is_none() && !is_tool_volume(&entity.classname) {
            debug!(
                "entity {}, brush {}: no textured sides, discarding",
                entity.index, index
            );
            self.stats.clip_brushes += 1;
            return Ok(BrushOutcome::Discarded(DiscardReason::Untextured));
        }

        for side in brush.sides.iter_mut().filter(|s| s.texinfo.is_none()) {
            side.texinfo = match &self.null_texinfos {
                Some(null) => {
                    let normal = &self.planes.get(side.plane).normal;
                    Some(null[texture_axis_class(normal)])
                }
                None => best_texinfo,
            };
        }

        let mut b = DecompiledBrush::new(index, brush);
        if let Err(e) = make_brush_windings(&self.planes, entity.index, &mut b) {
            return Ok(BrushOutcome::Discarded(DiscardReason::InvalidBounds(e)));
        }

        add_brush_bevels(&mut self.planes, &mut b)?;
        self.stats.map_brushes += 1;

        if !self.options.include_liquids && b.brush.contents.is_liquid() {
            debug!(
                "entity {}, brush {}: skipping {:?} brush",
                entity.index, index, b.brush.contents
            );
            return Ok(BrushOutcome::Discarded(DiscardReason::Liquid));
        }

        let mut solid = brush_to_solid(&mut self.planes, &self.textures, &b, &entity.origin)?;

        if is_tool_volume(&entity.classname) {
            for face in solid.faces.iter_mut() {
                face.texture_name = TRIGGER_TEXTURE.to_string();
            }
        }

        entity.solids.push(solid);

        Ok(BrushOutcome::Converted)
    }

    /// Add a small cube with the origin texture around the entity's origin.
    pub fn add_origin_brush(&mut self, entity: &mut MapEntity) -> Result<()> {
        let half = Vector3::repeat(ORIGIN_BRUSH_HALF_SIZE);
        let mins = entity.origin - half;
        let maxs = entity.origin + half;

        let mut brush = brush_from_bounds(&mut self.planes, &mins, &maxs)?;
        brush.contents = Contents::Origin;

        for side in brush.sides.iter_mut() {
            let normal = self.planes.get(side.plane).normal;
            let (u_axis, v_axis) = texture_axis_from_plane(&normal);

            let info = TextureInfo::from_axes(self.origin_texture, &u_axis, &v_axis);
            side.texinfo = Some(self.textures.add_info(info));
        }

        let b = DecompiledBrush::new(self.stats.map_brushes, brush);
        let solid = brush_to_solid(&mut self.planes, &self.textures, &b, &Vector3::zeros())?;

        debug!(
            "entity {}: added origin brush at {:?}",
            entity.index, entity.origin
        );

        entity.solids.push(solid);
        self.stats.map_brushes += 1;

        Ok(())
    }

    /// Check every reference the brush makes.
    fn validate(&self, brush: &Brush, index: usize) -> Result<()> {
        for side in brush.sides.iter() {
            if self.planes.try_get(side.plane).is_none() {
                return Err(DecompileError::InvalidPlane(side.plane, index));
            }

            if let Some(texinfo) = side.texinfo {
                let info = self
                    .textures
                    .get_info(texinfo)
                    .ok_or(DecompileError::InvalidTexInfo(texinfo, index))?;

                if let Some(miptex) = info.miptex {
                    if self.textures.get_texture(miptex).is_none() {
                        return Err(DecompileError::InvalidMipTexture(miptex, texinfo));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn stats(&self) -> DecompileStats {
        self.stats
    }

    pub fn planes(&self) -> &PlaneTable {
        &self.planes
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    pub fn options(&self) -> &DecompilerOptions {
        &self.options
    }

    /// Get back the planes and textures, including any added while decompiling.
    pub fn into_parts(self) -> (PlaneTable, TextureSet) {
        (self.planes, self.textures)
    }
}

#[test]
fn classname_predicates() {
    assert!(is_trigger("trigger_once"));
    assert!(is_trigger("trigger_multiple"));
    assert!(!is_trigger("func_wall"));
    assert!(!is_trigger("env_trigger_"));

    assert!(is_no_grenades("func_nogrenades"));
    assert!(is_no_grenades("func_nogrenades_test"));
    assert!(!is_no_grenades("func_door"));
}
