// Copyright (C) Oscar Shrimpton 2019

// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
// more details.

// You should have received a copy of the GNU General Public License along
// with this program.  If not, see <http://www.gnu.org/licenses/>.
#![allow(dead_code, unused_macros)]

use nalgebra::Vector3;
use stockton_decompile::{brush_from_bounds, Brush, Decompiler, DecompilerOptions, Solid};
use stockton_levels::{MipTexture, PlaneTable, TexInfoRef, TextureInfo, TextureSet};

pub const BRICK: TexInfoRef = 0;
pub const WATER: TexInfoRef = 1;

macro_rules! entity(
    { $classname:expr } => {
        stockton_decompile::MapEntity::new(0, $classname)
    };
    { $classname:expr, $x:expr, $y:expr, $z:expr } => {
        stockton_decompile::MapEntity::new(0, $classname)
            .with_origin(nalgebra::Vector3::new($x, $y, $z))
    };
);

pub fn level_textures() -> TextureSet {
    TextureSet::new(
        vec![
            TextureInfo::from_axes(0, &Vector3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, -1.0, 0.0)),
            TextureInfo::from_axes(1, &Vector3::new(0.0, 1.0, 0.0), &Vector3::new(0.0, 0.0, -1.0)),
        ],
        vec![MipTexture::named("BRICK"), MipTexture::named("!WATER")],
    )
}

pub fn decompiler(planes: PlaneTable, options: DecompilerOptions) -> Decompiler {
    Decompiler::new(planes, level_textures(), options)
}

/// A cube brush with every side given `texinfo`.
pub fn cube(planes: &mut PlaneTable, half: f64, texinfo: Option<TexInfoRef>) -> Brush {
    let mut brush = brush_from_bounds(planes, &Vector3::repeat(-half), &Vector3::repeat(half)).unwrap();
    for side in brush.sides.iter_mut() {
        side.texinfo = texinfo;
    }

    brush
}

/// (normal, dist) of every face, sorted so solids can be compared regardless of face order.
pub fn face_planes(solid: &Solid) -> Vec<(Vector3<f64>, f64)> {
    let mut planes: Vec<_> = solid.faces.iter().map(|f| f.plane()).collect();
    planes.sort_by(|a, b| {
        a.0.iter()
            .chain(std::iter::once(&a.1))
            .partial_cmp(b.0.iter().chain(std::iter::once(&b.1)))
            .unwrap()
    });
    planes
}

pub fn assert_integer_vertices(solid: &Solid) {
    for face in solid.faces.iter() {
        for vertex in face.vertices.iter() {
            for v in vertex.iter() {
                assert_eq!(v.fract(), 0.0, "vertex {:?} isn't snapped", vertex);
            }
        }
    }
}
