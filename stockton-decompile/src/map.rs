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

//! Editable map output: entities made of solids made of faces.

use na::Vector3;
use serde::{Deserialize, Serialize};
use stockton_levels::{Contents, Entity};

/// One side of a solid. The three vertices define its plane, in the order editors expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub texture_name: String,
    pub u_axis: Vector3<f64>,
    pub v_axis: Vector3<f64>,
    pub x_shift: f64,
    pub y_shift: f64,
    pub x_scale: f64,
    pub y_scale: f64,
    pub rotation: f64,
    pub vertices: [Vector3<f32>; 3],
}

impl Face {
    /// The (normal, distance) of the plane the vertices lie on. The normal points out of the solid.
    pub fn plane(&self) -> (Vector3<f64>, f64) {
        let [p0, p1, p2] = self.vertices;
        let (p0, p1, p2) = (
            Vector3::new(p0.x as f64, p0.y as f64, p0.z as f64),
            Vector3::new(p1.x as f64, p1.y as f64, p1.z as f64),
            Vector3::new(p2.x as f64, p2.y as f64, p2.z as f64),
        );

        let normal = (p0 - p1).cross(&(p2 - p1)).normalize();
        (normal, p0.dot(&normal))
    }
}

/// A convex brush in an editable map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub contents: Contents,
    pub faces: Vec<Face>,
}

/// An entity being decompiled, and the solids built for it so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntity {
    /// Index of the entity in the compiled level
    pub index: usize,

    pub classname: String,

    /// Brushes of this entity are stored relative to this
    pub origin: Vector3<f64>,

    pub solids: Vec<Solid>,
}

impl MapEntity {
    pub fn new(index: usize, classname: &str) -> MapEntity {
        MapEntity {
            index,
            classname: classname.to_owned(),
            origin: Vector3::zeros(),
            solids: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: Vector3<f64>) -> MapEntity {
        self.origin = origin;
        self
    }

    /// Start decompiling an entity from a compiled level.
    pub fn from_level_entity(index: usize, entity: &Entity) -> MapEntity {
        MapEntity::new(index, entity.classname())
            .with_origin(entity.origin().unwrap_or_else(Vector3::zeros))
    }

    pub fn has_origin(&self) -> bool {
        self.origin != Vector3::zeros()
    }
}
