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

//! Bevel planes, which let a brush be expanded against axial bounding boxes.
//!
//! Bevels never change the shape of the brush and are never written out.

use log::trace;
use na::Vector3;
use stockton_levels::planes::snap_vector;
use stockton_levels::{Plane, PlaneRef, PlaneTable, PlaneType, Result};

use crate::brush::{Brush, BrushSide, DecompiledBrush, SideFlags};

/// Edges shorter than this are too unstable to bevel.
pub const MIN_EDGE_LENGTH: f64 = 0.5;

/// Edge and axis must be at least this far from parallel to make a bevel.
pub const MIN_BEVEL_NORMAL: f64 = 0.5;

/// How far in front of a bevel a point can be before the bevel is rejected.
pub const BEVEL_EPSILON: f64 = 0.1;

/// The six axial directions, in the order their sides end up in.
const AXIAL_DIRS: [f64; 2] = [-1.0, 1.0];

/// Add any planes needed to allow the brush to be expanded against axial bounding boxes.
///
/// Afterwards, sides 0..6 are the axial planes -X, +X, -Y, +Y, -Z, +Z.
pub fn add_brush_bevels(planes: &mut PlaneTable, b: &mut DecompiledBrush) -> Result<()> {
    add_axial_bevels(planes, b)?;

    // pure axial
    if b.brush.sides.len() == 6 {
        return Ok(());
    }

    let added = add_edge_bevels(planes, &mut b.brush)?;
    trace!("brush {}: added {} edge bevels", b.index, added);

    Ok(())
}

fn bevel_side(plane: PlaneRef, first: &BrushSide) -> BrushSide {
    BrushSide {
        plane,
        texinfo: first.texinfo,
        contents: first.contents,
        flags: SideFlags::BEVEL,
        winding: None,
    }
}

fn add_axial_bevels(planes: &mut PlaneTable, b: &mut DecompiledBrush) -> Result<()> {
    let mut order = 0;

    for axis in 0..3 {
        for &dir in AXIAL_DIRS.iter() {
            // see if the plane is already present
            let existing = b
                .brush
                .sides
                .iter()
                .position(|s| planes.get(s.plane).normal[axis] == dir);

            let i = match existing {
                Some(i) => i,
                None => {
                    let mut normal: Vector3<f64> = Vector3::zeros();
                    normal[axis] = dir;

                    let dist = if dir > 0.0 { b.maxs[axis] } else { -b.mins[axis] };
                    let side = bevel_side(planes.find_or_add(normal, dist)?, &b.brush.sides[0]);

                    b.brush.sides.push(side);
                    b.brush.sides.len() - 1
                }
            };

            // if the plane is not in its canonical order, swap it
            if i != order {
                b.brush.sides.swap(i, order);
            }

            order += 1;
        }
    }

    Ok(())
}

/// Test the edges of the non-axial sides, adding a bevel for each slanted axial plane
/// through an edge that the whole brush is behind.
/// Returns how many were added.
fn add_edge_bevels(planes: &mut PlaneTable, brush: &mut Brush) -> Result<usize> {
    let mut added = 0;

    let mut i = 6;
    while i < brush.sides.len() {
        let pending = match &brush.sides[i].winding {
            Some(w) => edge_bevels_for(planes, &brush.sides, w.points()),
            None => Vec::new(),
        };

        for plane in pending {
            let plane = planes.find_or_add(plane.normal, plane.dist)?;
            let side = bevel_side(plane, &brush.sides[0]);
            brush.sides.push(side);
            added += 1;
        }

        i += 1;
    }

    Ok(added)
}

/// Bevel planes for the edges of one winding, not yet added to the brush.
fn edge_bevels_for(planes: &PlaneTable, sides: &[BrushSide], points: &[Vector3<f64>]) -> Vec<Plane> {
    let mut pending: Vec<Plane> = Vec::new();

    for j in 0..points.len() {
        let k = (j + 1) % points.len();

        let mut vec = points[j] - points[k];
        if vec.norm() < MIN_EDGE_LENGTH {
            continue;
        }

        vec.normalize_mut();
        snap_vector(&mut vec);

        // only test non-axial edges
        if (0..3).any(|vi| vec[vi] == -1.0 || vec[vi] == 1.0) {
            continue;
        }

        // try the six possible slanted axials from this edge
        for axis in 0..3 {
            for &dir in AXIAL_DIRS.iter() {
                let mut vec2: Vector3<f64> = Vector3::zeros();
                vec2[axis] = dir;

                let mut normal = vec.cross(&vec2);
                if normal.norm() < MIN_BEVEL_NORMAL {
                    continue;
                }
                normal.normalize_mut();

                let dist = points[j].dot(&normal);

                if pending.iter().any(|p| p.equals(&normal, dist))
                    || !is_outer_plane(planes, sides, &normal, dist)
                {
                    continue;
                }

                pending.push(Plane {
                    normal,
                    dist,
                    kind: PlaneType::for_normal(&normal),
                });
            }
        }
    }

    pending
}

/// True if the plane isn't used by any side yet, and every point on every side is behind it.
fn is_outer_plane(planes: &PlaneTable, sides: &[BrushSide], normal: &Vector3<f64>, dist: f64) -> bool {
    sides.iter().all(|s| {
        if planes.get(s.plane).equals(normal, dist) {
            return false;
        }

        match &s.winding {
            Some(w) => w
                .points()
                .iter()
                .all(|p| p.dot(normal) - dist <= BEVEL_EPSILON),
            None => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{brush_from_bounds, make_brush_windings};
    use approx::assert_relative_eq;
    use stockton_levels::Contents;

    fn axial_normals() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 0.0, 1.0),
        ]
    }

    fn add_side(planes: &mut PlaneTable, brush: &mut Brush, normal: Vector3<f64>, dist: f64) {
        let plane = planes.find_or_add(normal.normalize(), dist).unwrap();
        brush.sides.push(BrushSide::new(plane, Some(0), Contents::Solid));
    }

    fn prepare(planes: &mut PlaneTable, brush: Brush) -> DecompiledBrush {
        let mut b = DecompiledBrush::new(0, brush);
        make_brush_windings(planes, 0, &mut b).unwrap();
        add_brush_bevels(planes, &mut b).unwrap();
        b
    }

    #[test]
    fn box_gets_canonical_order() {
        let mut planes = PlaneTable::new();
        let brush = brush_from_bounds(&mut planes, &Vector3::repeat(-8.0), &Vector3::repeat(8.0)).unwrap();
        let b = prepare(&mut planes, brush);

        assert_eq!(b.brush.sides.len(), 6);
        for (side, normal) in b.brush.sides.iter().zip(axial_normals()) {
            assert_eq!(planes.get(side.plane).normal, normal);
            assert!(!side.is_bevel());
        }
    }

    #[test]
    fn missing_axials_are_added() {
        let mut planes = PlaneTable::new();
        let mut brush = Brush {
            sides: Vec::new(),
            contents: Contents::Solid,
        };

        // A square prism turned 45 degrees, so only the top and bottom are axial
        add_side(&mut planes, &mut brush, Vector3::new(0.0, 0.0, 1.0), 8.0);
        add_side(&mut planes, &mut brush, Vector3::new(0.0, 0.0, -1.0), 8.0);
        add_side(&mut planes, &mut brush, Vector3::new(1.0, 1.0, 0.0), 8.0);
        add_side(&mut planes, &mut brush, Vector3::new(-1.0, 1.0, 0.0), 8.0);
        add_side(&mut planes, &mut brush, Vector3::new(-1.0, -1.0, 0.0), 8.0);
        add_side(&mut planes, &mut brush, Vector3::new(1.0, -1.0, 0.0), 8.0);

        let b = prepare(&mut planes, brush);

        assert_eq!(b.brush.sides.len(), 10);
        for (side, normal) in b.brush.sides.iter().zip(axial_normals()) {
            assert_eq!(planes.get(side.plane).normal, normal);
        }

        let reach = 8.0 * 2.0_f64.sqrt();
        let px = &b.brush.sides[1];
        assert!(px.is_bevel());
        assert_eq!(px.texinfo, Some(0));
        assert_relative_eq!(planes.get(px.plane).dist, reach, epsilon = 1e-6);
        assert_relative_eq!(planes.get(b.brush.sides[2].plane).dist, reach, epsilon = 1e-6);

        // Top and bottom were real sides
        assert!(!b.brush.sides[4].is_bevel());
        assert!(!b.brush.sides[5].is_bevel());
    }

    #[test]
    fn slanted_ridge_gets_edge_bevels() {
        let mut planes = PlaneTable::new();
        let mut brush = brush_from_bounds(&mut planes, &Vector3::repeat(-16.0), &Vector3::repeat(16.0)).unwrap();

        // Two faces meeting along (1, 1, -1) through the origin
        add_side(&mut planes, &mut brush, Vector3::new(-1.0, 2.0, 1.0), 0.0);
        add_side(&mut planes, &mut brush, Vector3::new(2.0, -1.0, 1.0), 0.0);

        let b = prepare(&mut planes, brush);
        assert!(b.brush.sides.len() > 8);

        let has_plane = |normal: Vector3<f64>| {
            b.brush
                .sides
                .iter()
                .any(|s| s.is_bevel() && planes.get(s.plane).equals(&normal, 0.0))
        };
        assert!(has_plane(Vector3::new(0.0, 1.0, 1.0).normalize()));
        assert!(has_plane(Vector3::new(1.0, 0.0, 1.0).normalize()));

        // Every bevel still has the whole brush behind it
        for bevel in b.brush.sides[8..].iter() {
            assert!(bevel.is_bevel());
            assert!(bevel.winding.is_none());

            let plane = planes.get(bevel.plane);
            for side in b.brush.sides.iter() {
                if let Some(w) = &side.winding {
                    for p in w.points() {
                        assert!(plane.distance_to(p) <= BEVEL_EPSILON);
                    }
                }
            }
        }
    }
}
