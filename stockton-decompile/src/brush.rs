// Copyright (C) 2019 Oscar Shrimpton
//
// This file is part of stockton-bsp.
//
// stockton-bsp is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// stockton-bsp is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with stockton-bsp.  If not, see <http://www.gnu.org/licenses/>.

//! Brushes, and building the polygons for their sides

use log::info;
use na::Vector3;
use stockton_levels::{Contents, PlaneRef, PlaneTable, TexInfoRef};

use crate::winding::{Winding, BOGUS_RANGE};

/// Epsilon used when clipping side windings against each other.
pub const CLIP_EPSILON: f64 = 0.0;

bitflags!(
    pub struct SideFlags: u8 {
        /// The side has a winding
        const VISIBLE = 0x1;

        /// Added to help collision, never written out
        const BEVEL = 0x2;
    }
);

/// Bounding surface for brush.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSide {
    pub plane: PlaneRef,

    /// `None` if the side has no texture
    pub texinfo: Option<TexInfoRef>,

    pub contents: Contents,
    pub flags: SideFlags,

    /// Polygon of this side, if any of it is left after clipping against the other sides.
    pub winding: Option<Winding>,
}

impl BrushSide {
    pub fn new(plane: PlaneRef, texinfo: Option<TexInfoRef>, contents: Contents) -> BrushSide {
        BrushSide {
            plane,
            texinfo,
            contents,
            flags: SideFlags::empty(),
            winding: None,
        }
    }

    pub fn is_bevel(&self) -> bool {
        self.flags.contains(SideFlags::BEVEL)
    }
}

/// One convex volume, defined by its sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub sides: Vec<BrushSide>,
    pub contents: Contents,
}

/// A brush that's being decompiled, and its bounds.
/// `mins` and `maxs` are only meaningful after [`make_brush_windings`] succeeds.
#[derive(Debug, Clone)]
pub struct DecompiledBrush {
    pub index: usize,
    pub brush: Brush,
    pub mins: Vector3<f64>,
    pub maxs: Vector3<f64>,
}

impl DecompiledBrush {
    pub fn new(index: usize, brush: Brush) -> DecompiledBrush {
        let mut decompiled = DecompiledBrush {
            index,
            brush,
            mins: Vector3::zeros(),
            maxs: Vector3::zeros(),
        };
        decompiled.clear_bounds();
        decompiled
    }

    fn clear_bounds(&mut self) {
        self.mins = Vector3::repeat(f64::INFINITY);
        self.maxs = Vector3::repeat(f64::NEG_INFINITY);
    }
}

/// Why a brush's bounds were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidBounds {
    OutOfRange,
    NoVisibleSides,
}

/// Create windings for every side of the brush, and work out its bounds.
///
/// Each side starts as the base winding of its plane, then is clipped by the opposite of
/// every other non-bevel side's plane.
pub fn make_brush_windings(
    planes: &PlaneTable,
    entity_idx: usize,
    ob: &mut DecompiledBrush,
) -> Result<(), InvalidBounds> {
    ob.clear_bounds();

    let n_sides = ob.brush.sides.len();
    for i in 0..n_sides {
        let plane = planes.get(ob.brush.sides[i].plane);
        let mut w = Some(Winding::base_for_plane(&plane.normal, plane.dist));

        for (j, other) in ob.brush.sides.iter().enumerate() {
            if i == j || other.is_bevel() {
                continue;
            }

            let clip = planes.get(other.plane ^ 1);
            w = match w {
                Some(w) => w.clip_in_place(&clip.normal, clip.dist, CLIP_EPSILON),
                None => break,
            };
        }

        let side = &mut ob.brush.sides[i];
        if let Some(w) = &w {
            side.flags.insert(SideFlags::VISIBLE);
            w.add_to_bounds(&mut ob.mins, &mut ob.maxs);
        }
        side.winding = w;
    }

    for axis in 0..3 {
        let (min, max) = (ob.mins[axis], ob.maxs[axis]);

        if min < -BOGUS_RANGE || max > BOGUS_RANGE {
            info!("entity {}, brush {}: bounds out of range", entity_idx, ob.index);
            return Err(InvalidBounds::OutOfRange);
        }

        if min > BOGUS_RANGE || max < -BOGUS_RANGE {
            info!("entity {}, brush {}: no visible sides on brush", entity_idx, ob.index);
            return Err(InvalidBounds::NoVisibleSides);
        }
    }

    Ok(())
}

/// An axial box brush. Sides are +X, +Y, +Z then -X, -Y, -Z and have no texture.
pub fn brush_from_bounds(
    planes: &mut PlaneTable,
    mins: &Vector3<f64>,
    maxs: &Vector3<f64>,
) -> stockton_levels::Result<Brush> {
    let mut sides = Vec::with_capacity(6);

    for axis in 0..3 {
        let mut normal: Vector3<f64> = Vector3::zeros();
        normal[axis] = 1.0;
        let plane = planes.find_or_add(normal, maxs[axis])?;
        sides.push(BrushSide::new(plane, None, Contents::Solid));
    }

    for axis in 0..3 {
        let mut normal: Vector3<f64> = Vector3::zeros();
        normal[axis] = -1.0;
        let plane = planes.find_or_add(normal, -mins[axis])?;
        sides.push(BrushSide::new(plane, None, Contents::Solid));
    }

    Ok(Brush {
        sides,
        contents: Contents::Solid,
    })
}
