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

//! Turning brushes into editable solids

use na::{Vector3, Vector4};
use stockton_levels::{PlaneTable, TextureSet};

use crate::brush::{BrushSide, DecompiledBrush};
use crate::error::{DecompileError, Result};
use crate::map::{Face, Solid};
use crate::texture::{calculate_texture_properties, or_default_projection};
use crate::winding::Winding;

/// Texture given to sides with no texture of their own.
pub const CLIP_TEXTURE: &str = "CLIP";

/// Vertex components closer than this to zero become zero.
pub const SNAP_TO_ZERO: f64 = 0.2;

/// Vertex components closer than this to a whole number become that number.
pub const SNAP_TO_INTEGER: f64 = 0.3;

/// Convert every non-bevel side of a brush into a face.
///
/// `origin` is the owning entity's origin. If it isn't zero, faces are moved by it and
/// the planes they lie on are added to `planes`.
pub fn brush_to_solid(
    planes: &mut PlaneTable,
    textures: &TextureSet,
    b: &DecompiledBrush,
    origin: &Vector3<f64>,
) -> Result<Solid> {
    let mut faces = Vec::with_capacity(b.brush.sides.len());

    for side in b.brush.sides.iter().filter(|s| !s.is_bevel()) {
        let (s, t, texture_name) = side_texture(textures, b.index, side)?;
        let s = or_default_projection(s);
        let t = or_default_projection(t);

        let original = *planes
            .try_get(side.plane)
            .ok_or(DecompileError::InvalidPlane(side.plane, b.index))?;

        let plane_ref = if *origin != Vector3::zeros() {
            let dist = original.dist + original.normal.dot(origin);
            planes.find_or_add(original.normal, dist)?
        } else {
            side.plane
        };

        // always use the first plane of the pair, and flip the points if needed
        let plane = planes.get(plane_ref & !1);
        let props = calculate_texture_properties(&s, &t, origin, &plane.normal);

        let w = Winding::base_for_plane(&plane.normal, plane.dist);
        let points = w.points();
        let p1 = (plane_ref & 1) as usize;

        faces.push(Face {
            texture_name,
            u_axis: props.u_axis,
            v_axis: props.v_axis,
            x_shift: props.x_shift,
            y_shift: props.y_shift,
            x_scale: props.x_scale,
            y_scale: props.y_scale,
            rotation: props.rotation,
            vertices: [
                snap_point(&points[p1]),
                snap_point(&points[1 - p1]),
                snap_point(&points[2]),
            ],
        });
    }

    Ok(Solid {
        contents: b.brush.contents,
        faces,
    })
}

/// (s, t, texture name) for a side.
fn side_texture(
    textures: &TextureSet,
    brush_idx: usize,
    side: &BrushSide,
) -> Result<(Vector4<f64>, Vector4<f64>, String)> {
    let texinfo = match side.texinfo {
        Some(x) => x,
        None => return Ok((Vector4::zeros(), Vector4::zeros(), CLIP_TEXTURE.to_string())),
    };

    let info = textures
        .get_info(texinfo)
        .ok_or(DecompileError::InvalidTexInfo(texinfo, brush_idx))?;

    let name = match info.miptex {
        Some(miptex) => textures
            .get_texture(miptex)
            .ok_or(DecompileError::InvalidMipTexture(miptex, texinfo))?
            .name
            .clone(),
        None => CLIP_TEXTURE.to_string(),
    };

    Ok((info.s, info.t, name))
}

fn snap_coord(v: f64) -> f64 {
    if v.abs() < SNAP_TO_ZERO {
        0.0
    } else if (v.trunc() - v).abs() < SNAP_TO_INTEGER {
        v.trunc()
    } else {
        v
    }
}

fn snap_point(point: &Vector3<f64>) -> Vector3<f32> {
    point.map(|v| snap_coord(v) as f32)
}
