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

//! Convex polygons lying on a plane

use na::Vector3;
use smallvec::SmallVec;

/// Nothing in a level should be further than this from the origin.
pub const BOGUS_RANGE: f64 = 65536.0;

/// Half the width of a base winding. Larger than [`BOGUS_RANGE`] so unbounded sides show up as out of range.
pub const BASE_WINDING_RANGE: f64 = BOGUS_RANGE * 2.0;

type Points = SmallVec<[Vector3<f64>; 8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointSide {
    Front,
    Back,
    On,
}

/// A convex polygon. Points are in order around the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Winding {
    points: Points,
}

impl Winding {
    pub fn from_points<I: IntoIterator<Item = Vector3<f64>>>(points: I) -> Winding {
        Winding {
            points: points.into_iter().collect(),
        }
    }

    /// A huge square on the given plane, big enough to cover anything in the level.
    pub fn base_for_plane(normal: &Vector3<f64>, dist: f64) -> Winding {
        // find the major axis
        let mut max = -1.0;
        let mut axis = 2;
        for i in 0..3 {
            let v = normal[i].abs();
            if v > max {
                axis = i;
                max = v;
            }
        }

        let mut up: Vector3<f64> = Vector3::zeros();
        if axis == 2 {
            up.x = 1.0;
        } else {
            up.z = 1.0;
        }

        let v = up.dot(normal);
        up -= normal * v;
        up.normalize_mut();

        let org = normal * dist;
        let right = up.cross(normal) * BASE_WINDING_RANGE;
        let up = up * BASE_WINDING_RANGE;

        Winding::from_points(vec![
            org - right + up,
            org + right + up,
            org + right - up,
            org - right - up,
        ])
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Normal of the plane the winding lies on, following the point order.
    /// Zero if the points don't span an area.
    pub fn normal(&self) -> Vector3<f64> {
        let first = match self.points.first() {
            Some(p) => *p,
            None => return Vector3::zeros(),
        };

        // sum over every edge, so collinear runs of points don't matter
        let mut area: Vector3<f64> = Vector3::zeros();
        for (i, p) in self.points.iter().enumerate() {
            let next = self.points[(i + 1) % self.points.len()];
            area += (next - first).cross(&(p - first));
        }

        area.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    /// Grow the given bounds to contain every point.
    pub fn add_to_bounds(&self, mins: &mut Vector3<f64>, maxs: &mut Vector3<f64>) {
        for point in &self.points {
            *mins = mins.inf(point);
            *maxs = maxs.sup(point);
        }
    }

    /// Cut away everything behind the given plane, keeping what's in front of or on it.
    ///
    /// Returns `None` if nothing is left. A winding lying on the plane itself is kept if it
    /// faces the same way as the plane and removed if it faces the other way.
    pub fn clip_in_place(self, normal: &Vector3<f64>, dist: f64, epsilon: f64) -> Option<Winding> {
        let n = self.points.len();

        let mut dists: SmallVec<[f64; 16]> = SmallVec::with_capacity(n);
        let mut sides: SmallVec<[PointSide; 16]> = SmallVec::with_capacity(n);
        let mut n_front = 0;
        let mut n_back = 0;

        for point in &self.points {
            let d = normal.dot(point) - dist;
            let side = if d > epsilon {
                n_front += 1;
                PointSide::Front
            } else if d < -epsilon {
                n_back += 1;
                PointSide::Back
            } else {
                PointSide::On
            };

            dists.push(d);
            sides.push(side);
        }

        if n_front == 0 && n_back == 0 {
            // Coplanar
            return if n >= 3 && self.normal().dot(normal) > 0.0 {
                Some(self)
            } else {
                None
            };
        }

        if n_front == 0 {
            return None;
        }

        if n_back == 0 {
            return Some(self);
        }

        let mut points = Points::with_capacity(n + 4);
        for i in 0..n {
            let p1 = self.points[i];

            match sides[i] {
                PointSide::On => {
                    points.push(p1);
                    continue;
                }
                PointSide::Front => points.push(p1),
                PointSide::Back => {}
            }

            let next = (i + 1) % n;
            if sides[next] == PointSide::On || sides[next] == sides[i] {
                continue;
            }

            // generate a split point
            let p2 = self.points[next];
            let t = dists[i] / (dists[i] - dists[next]);

            let mut mid: Vector3<f64> = Vector3::zeros();
            for j in 0..3 {
                // avoid round off error when possible
                mid[j] = if normal[j] == 1.0 {
                    dist
                } else if normal[j] == -1.0 {
                    -dist
                } else {
                    p1[j] + t * (p2[j] - p1[j])
                };
            }

            points.push(mid);
        }

        if points.len() < 3 {
            return None;
        }

        Some(Winding { points })
    }
}
