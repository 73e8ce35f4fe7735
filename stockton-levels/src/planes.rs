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

//! Planes and the deduplicating plane table.
//!
//! Planes are always stored in pairs: the plane at `idx ^ 1` is the exact
//! opposite of the plane at `idx`. For axial planes the positive facing one
//! is always at the even index.

use na::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{LevelError, Result};

/// Two normals closer than this on every axis are the same normal.
pub const NORMAL_EPSILON: f64 = 0.00001;

/// Two distances closer than this are the same distance.
pub const DIST_EPSILON: f64 = 0.01;

/// Width of the distance buckets used to look up planes.
const PLANE_HASH_WIDTH: f64 = 8.0;

/// Index into a [`PlaneTable`].
pub type PlaneRef = u32;

/// Which axis a plane faces along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneType {
    /// Normal is exactly +/- X
    X,
    Y,
    Z,
    /// X is the largest component of the normal
    AnyX,
    AnyY,
    AnyZ,
}

impl PlaneType {
    pub fn for_normal(normal: &Vector3<f64>) -> PlaneType {
        if normal.x == 1.0 || normal.x == -1.0 {
            return PlaneType::X;
        }
        if normal.y == 1.0 || normal.y == -1.0 {
            return PlaneType::Y;
        }
        if normal.z == 1.0 || normal.z == -1.0 {
            return PlaneType::Z;
        }

        let ax = normal.x.abs();
        let ay = normal.y.abs();
        let az = normal.z.abs();

        if ax >= ay && ax >= az {
            PlaneType::AnyX
        } else if ay >= ax && ay >= az {
            PlaneType::AnyY
        } else {
            PlaneType::AnyZ
        }
    }

    pub fn is_axial(self) -> bool {
        matches!(self, PlaneType::X | PlaneType::Y | PlaneType::Z)
    }
}

/// A half-space boundary, referenced by brush sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal
    pub normal: Vector3<f64>,

    /// Distance from origin to plane along normal
    pub dist: f64,

    pub kind: PlaneType,
}

impl Plane {
    /// The same plane facing the other way.
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            dist: -self.dist,
            kind: self.kind,
        }
    }

    /// Signed distance from the plane to `point`, positive in front.
    pub fn distance_to(&self, point: &Vector3<f64>) -> f64 {
        self.normal.dot(point) - self.dist
    }

    /// True if this plane is the same as the given one within tolerance.
    pub fn equals(&self, normal: &Vector3<f64>, dist: f64) -> bool {
        (self.normal.x - normal.x).abs() < NORMAL_EPSILON
            && (self.normal.y - normal.y).abs() < NORMAL_EPSILON
            && (self.normal.z - normal.z).abs() < NORMAL_EPSILON
            && (self.dist - dist).abs() < DIST_EPSILON
    }
}

/// Snap a nearly axial vector to be exactly axial.
pub fn snap_vector(normal: &mut Vector3<f64>) {
    for i in 0..3 {
        if (normal[i] - 1.0).abs() < NORMAL_EPSILON {
            *normal = Vector3::zeros();
            normal[i] = 1.0;
            break;
        }
        if (normal[i] + 1.0).abs() < NORMAL_EPSILON {
            *normal = Vector3::zeros();
            normal[i] = -1.0;
            break;
        }
    }
}

/// Snap a plane's normal to an axis and its distance to an integer where they're close enough.
fn snap_plane(normal: &mut Vector3<f64>, dist: &mut f64) {
    snap_vector(normal);

    if (*dist - dist.round()).abs() < DIST_EPSILON {
        *dist = dist.round();
    }
}

fn hash_for_dist(dist: f64) -> i64 {
    (dist.abs() / PLANE_HASH_WIDTH) as i64
}

/// Every plane used while decompiling one level.
/// Planes are only ever added, so references stay valid for the lifetime of the table.
#[derive(Debug, Clone, Default)]
pub struct PlaneTable {
    planes: Vec<Plane>,
    hash: HashMap<i64, Vec<PlaneRef>>,
}

impl PlaneTable {
    pub fn new() -> PlaneTable {
        PlaneTable::default()
    }

    /// Build a table from the plane list of a compiled level.
    /// Returns the table and the reference each input plane was given.
    pub fn from_planes<I>(planes: I) -> Result<(PlaneTable, Vec<PlaneRef>)>
    where
        I: IntoIterator<Item = (Vector3<f64>, f64)>,
    {
        let mut table = PlaneTable::new();
        let refs = planes
            .into_iter()
            .map(|(normal, dist)| table.find_or_add(normal, dist))
            .collect::<Result<Vec<_>>>()?;

        Ok((table, refs))
    }

    /// Get the reference of the plane with the given normal and distance, adding it if needed.
    pub fn find_or_add(&mut self, mut normal: Vector3<f64>, mut dist: f64) -> Result<PlaneRef> {
        if !dist.is_finite() {
            return Err(LevelError::BadDistance(dist));
        }

        let length = normal.norm();
        if length.is_nan() || length < 0.5 {
            return Err(LevelError::BadNormal(length));
        }

        snap_plane(&mut normal, &mut dist);

        let hash = hash_for_dist(dist);
        for bucket in hash.saturating_sub(1)..=hash.saturating_add(1) {
            if let Some(refs) = self.hash.get(&bucket) {
                for &idx in refs {
                    if self.planes[idx as usize].equals(&normal, dist) {
                        return Ok(idx);
                    }
                }
            }
        }

        self.add_pair(normal, dist)
    }

    fn add_pair(&mut self, normal: Vector3<f64>, dist: f64) -> Result<PlaneRef> {
        let kind = PlaneType::for_normal(&normal);
        let plane = Plane { normal, dist, kind };
        let idx = self.planes.len() as PlaneRef;

        // Axial planes facing positive go first
        let flip = kind.is_axial() && (normal.x < 0.0 || normal.y < 0.0 || normal.z < 0.0);
        if flip {
            self.planes.push(plane.flipped());
            self.planes.push(plane);
        } else {
            self.planes.push(plane);
            self.planes.push(plane.flipped());
        }

        self.hash.entry(hash_for_dist(dist)).or_default().extend(&[idx, idx + 1]);

        Ok(if flip { idx + 1 } else { idx })
    }

    pub fn get(&self, idx: PlaneRef) -> &Plane {
        &self.planes[idx as usize]
    }

    pub fn try_get(&self, idx: PlaneRef) -> Option<&Plane> {
        self.planes.get(idx as usize)
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plane> {
        self.planes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_paired(table: &PlaneTable) {
        for idx in 0..table.len() as PlaneRef {
            let plane = table.get(idx);
            let opposite = table.get(idx ^ 1);
            assert_eq!(opposite.normal, -plane.normal);
            assert_eq!(opposite.dist, -plane.dist);
        }
    }

    #[test]
    fn planes_are_paired() {
        let mut table = PlaneTable::new();
        table.find_or_add(Vector3::new(0.0, 0.0, 1.0), 16.0).unwrap();
        table.find_or_add(Vector3::new(0.0, -1.0, 0.0), 8.0).unwrap();
        table
            .find_or_add(Vector3::new(0.6, 0.8, 0.0), -3.5)
            .unwrap();

        assert_eq!(table.len(), 6);
        assert_paired(&table);
    }

    #[test]
    fn finds_existing_planes() {
        let mut table = PlaneTable::new();
        let normal = Vector3::new(0.6, 0.0, 0.8);
        let a = table.find_or_add(normal, 12.0).unwrap();
        let b = table.find_or_add(normal, 12.004).unwrap();
        let opposite = table.find_or_add(-normal, -12.0).unwrap();

        assert_eq!(a, b);
        assert_eq!(opposite, a ^ 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn axial_positive_first() {
        let mut table = PlaneTable::new();
        let idx = table.find_or_add(Vector3::new(-1.0, 0.0, 0.0), 8.0).unwrap();

        assert_eq!(idx, 1);
        assert_eq!(table.get(0).normal, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(table.get(0).dist, -8.0);
        assert_eq!(table.get(0).kind, PlaneType::X);
    }

    #[test]
    fn snaps_nearly_axial() {
        let mut table = PlaneTable::new();
        let idx = table
            .find_or_add(Vector3::new(0.000001, 0.999999, 0.0), 31.996)
            .unwrap();

        let plane = table.get(idx);
        assert_eq!(plane.normal, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.dist, 32.0);
        assert_eq!(plane.kind, PlaneType::Y);
    }

    #[test]
    fn rejects_zero_normal() {
        let mut table = PlaneTable::new();
        assert!(matches!(
            table.find_or_add(Vector3::zeros(), 1.0),
            Err(LevelError::BadNormal(_))
        ));
        assert!(matches!(
            table.find_or_add(Vector3::new(f64::NAN, 0.0, 1.0), 1.0),
            Err(LevelError::BadNormal(_))
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn huge_distances() {
        let mut table = PlaneTable::new();
        let normal = Vector3::new(1.0, 0.0, 0.0);

        let a = table.find_or_add(normal, 1.0e20).unwrap();
        let b = table.find_or_add(normal, 1.0e20).unwrap();
        let far = table.find_or_add(normal, f64::MAX).unwrap();
        assert_eq!(a, b);
        assert_eq!(table.find_or_add(-normal, -f64::MAX).unwrap(), far ^ 1);
        assert_paired(&table);

        assert!(matches!(
            table.find_or_add(normal, f64::INFINITY),
            Err(LevelError::BadDistance(_))
        ));
        assert!(matches!(
            table.find_or_add(normal, f64::NAN),
            Err(LevelError::BadDistance(_))
        ));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn seeds_from_plane_list() {
        let (table, refs) = PlaneTable::from_planes(vec![
            (Vector3::new(1.0, 0.0, 0.0), 64.0),
            (Vector3::new(0.0, 0.0, -1.0), 0.0),
            (Vector3::new(1.0, 0.0, 0.0), 64.0),
        ])
        .unwrap();

        assert_eq!(refs, vec![0, 3, 0]);
        assert_eq!(table.len(), 4);
        assert_paired(&table);
    }

    #[test]
    fn plane_type_for_normal() {
        assert_eq!(
            PlaneType::for_normal(&Vector3::new(0.0, 0.0, -1.0)),
            PlaneType::Z
        );
        assert_eq!(
            PlaneType::for_normal(&Vector3::new(0.6, 0.8, 0.0)),
            PlaneType::AnyY
        );
        assert!(!PlaneType::AnyX.is_axial());
    }
}
