//! Working out editor texture axes from compiled texture projections

use na::{Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Projection vectors shorter than this are replaced by [`default_projection`].
pub const MIN_AXIS_LENGTH: f64 = 0.01;

/// (normal, u axis, v axis) for floor, ceiling, west, east, south and north facing planes.
const BASE_AXES: [[[f64; 3]; 3]; N_AXIS_CLASSES] = [
    [[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
    [[0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, -1.0, 0.0]],
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
    [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]],
    [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
    [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
];

/// Texture settings for one face, as an editor wants them.
/// The texture co-ordinate of a point `p` is `dot(p, u_axis) / x_scale + x_shift`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureProperties {
    pub u_axis: Vector3<f64>,
    pub v_axis: Vector3<f64>,
    pub x_shift: f64,
    pub y_shift: f64,
    pub x_scale: f64,
    pub y_scale: f64,

    /// Degrees
    pub rotation: f64,
}

/// The projection used in place of a degenerate one.
pub fn default_projection() -> Vector4<f64> {
    Vector4::new(1.0, 0.0, 0.0, 0.0)
}

/// Replace `proj` with the default if its direction is too short to divide by.
pub fn or_default_projection(proj: Vector4<f64>) -> Vector4<f64> {
    if proj.xyz().norm() < MIN_AXIS_LENGTH {
        default_projection()
    } else {
        proj
    }
}

/// How many sets of base axes there are. See [`texture_axis_class`].
pub const N_AXIS_CLASSES: usize = 6;

/// Which of the base axes best fit a plane with the given normal.
pub fn texture_axis_class(normal: &Vector3<f64>) -> usize {
    let mut best = 0.0;
    let mut best_axis = 0;

    for (i, axes) in BASE_AXES.iter().enumerate() {
        let dot = normal.dot(&Vector3::from(axes[0]));
        if dot > best {
            best = dot;
            best_axis = i;
        }
    }

    best_axis
}

/// The (u, v) axes of the given class. Panics if `class >= N_AXIS_CLASSES`.
pub fn texture_axes_for_class(class: usize) -> (Vector3<f64>, Vector3<f64>) {
    let axes = &BASE_AXES[class];
    (Vector3::from(axes[1]), Vector3::from(axes[2]))
}

/// The default texture axes for a plane with the given normal.
pub fn texture_axis_from_plane(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    texture_axes_for_class(texture_axis_class(normal))
}

/// Work out the texture axes, scale, shift and rotation for a face.
///
/// `s` and `t` are in the entity's local space, `origin` moves them to world space.
/// Callers should pass projections through [`or_default_projection`] first.
pub fn calculate_texture_properties(
    s: &Vector4<f64>,
    t: &Vector4<f64>,
    origin: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> TextureProperties {
    let (u_axis, x_scale, x_shift) = split_projection(s, origin);
    let (v_axis, y_scale, y_shift) = split_projection(t, origin);

    let (default_u, default_v) = texture_axis_from_plane(normal);
    let rotation = u_axis
        .dot(&default_v)
        .atan2(u_axis.dot(&default_u))
        .to_degrees();

    TextureProperties {
        u_axis,
        v_axis,
        x_shift,
        y_shift,
        x_scale,
        y_scale,
        rotation,
    }
}

/// Split a projection into (unit axis, scale, shift)
fn split_projection(proj: &Vector4<f64>, origin: &Vector3<f64>) -> (Vector3<f64>, f64, f64) {
    let dir = proj.xyz();
    let length = dir.norm();

    (dir / length, 1.0 / length, proj.w - origin.dot(&dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn axes_for_floor_and_walls() {
        let (u, v) = texture_axis_from_plane(&Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(u, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(v, Vector3::new(0.0, -1.0, 0.0));

        let (u, v) = texture_axis_from_plane(&Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(u, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(v, Vector3::new(0.0, 0.0, -1.0));

        // Mostly facing north
        let (u, _) = texture_axis_from_plane(&Vector3::new(0.3, -0.9, 0.1).normalize());
        assert_eq!(u, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(texture_axis_class(&Vector3::new(0.3, -0.9, 0.1).normalize()), 5);
    }

    #[test]
    fn scaled_projection() {
        let s = Vector4::new(0.5, 0.0, 0.0, 16.0);
        let t = Vector4::new(0.0, -2.0, 0.0, -4.0);
        let props = calculate_texture_properties(&s, &t, &Vector3::zeros(), &Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(props.u_axis, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(props.v_axis, Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(props.x_scale, 2.0);
        assert_relative_eq!(props.y_scale, 0.5);
        assert_relative_eq!(props.x_shift, 16.0);
        assert_relative_eq!(props.y_shift, -4.0);
        assert_relative_eq!(props.rotation, 0.0);
    }

    #[test]
    fn origin_moves_shift() {
        let s = Vector4::new(1.0, 0.0, 0.0, 0.0);
        let t = Vector4::new(0.0, 0.0, -1.0, 0.0);
        let origin = Vector3::new(32.0, 0.0, 8.0);
        let props = calculate_texture_properties(&s, &t, &origin, &Vector3::new(0.0, 1.0, 0.0));

        // A point at the origin in world space is at zero in the entity's space
        assert_relative_eq!(origin.dot(&props.u_axis) / props.x_scale + props.x_shift, 0.0);
        assert_relative_eq!(origin.dot(&props.v_axis) / props.y_scale + props.y_shift, 0.0);
    }

    #[test]
    fn rotated_projection() {
        let s = Vector4::new(0.0, -1.0, 0.0, 0.0);
        let t = Vector4::new(-1.0, 0.0, 0.0, 0.0);
        let props = calculate_texture_properties(&s, &t, &Vector3::zeros(), &Vector3::new(0.0, 0.0, 1.0));

        assert_relative_eq!(props.rotation, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_projection_falls_back() {
        assert_eq!(
            or_default_projection(Vector4::new(0.001, 0.0, 0.0, 5.0)),
            default_projection()
        );

        let fine = Vector4::new(0.0, 1.0, 0.0, 5.0);
        assert_eq!(or_default_projection(fine), fine);
    }
}
