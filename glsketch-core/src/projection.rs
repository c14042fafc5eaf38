/// Projection and view matrix builders
use nalgebra::{Point3, Vector3};

use crate::matrix::{self, Mat4};

/// Default camera up direction
pub const DEFAULT_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Perspective projection matrix.
///
/// `f = 1 / tan(fov)`; view-space depths in `[near, far]` land in clip-space
/// `[-1, 1]` after the divide by `w = -z`. `near` must be positive: at zero
/// every depth collapses onto the near plane, and `near == far` yields
/// non-finite entries.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / fov.tan();
    let nf = 1.0 / (near - far);

    #[rustfmt::skip]
    let m = Mat4::from_column_slice(&[
        f / aspect, 0.0, 0.0,                      0.0,
        0.0,        f,   0.0,                      0.0,
        0.0,        0.0, (far + near) * nf,        -1.0,
        0.0,        0.0, 2.0 * near * far * nf,    0.0,
    ]);
    m
}

/// Orthographic projection of the box `[left, right] x [bottom, top] x [near, far]`
/// onto the clip cube `[-1, 1]^3`.
///
/// Equal opposite bounds divide by zero and yield non-finite entries.
pub fn orthogonal(top: f32, bottom: f32, left: f32, right: f32, near: f32, far: f32) -> Mat4 {
    let rw = 1.0 / (right - left);
    let rh = 1.0 / (top - bottom);
    let rd = 1.0 / (far - near);

    #[rustfmt::skip]
    let m = Mat4::from_column_slice(&[
        2.0 * rw,             0.0,                  0.0,                 0.0,
        0.0,                  2.0 * rh,             0.0,                 0.0,
        0.0,                  0.0,                  -2.0 * rd,           0.0,
        -(right + left) * rw, -(top + bottom) * rh, -(far + near) * rd,  1.0,
    ]);
    m
}

/// Compose onto `matrix` a view that puts the camera at `eye` looking at `target`.
///
/// The result is `matrix × view`. `eye == target`, or `up` parallel to the
/// viewing direction, yields non-finite entries.
pub fn look_at(matrix: &Mat4, eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Mat4 {
    matrix::multiply(matrix, &Mat4::look_at_rh(eye, target, up))
}

/// Perspective parameters with the sketchpad's defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    pub fn matrix(&self) -> Mat4 {
        perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov: 1.5,
            aspect: 1.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

/// Orthographic box bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    /// Bounds with the default depth range `[0, 100]`
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            near: 0.0,
            far: 100.0,
        }
    }

    /// A square box of half-size `extent` centred on the view axis
    pub fn square(extent: f32) -> Self {
        Self::new(extent, -extent, -extent, extent)
    }

    pub fn with_depth(self, near: f32, far: f32) -> Self {
        Self { near, far, ..self }
    }

    pub fn matrix(&self) -> Mat4 {
        orthogonal(self.top, self.bottom, self.left, self.right, self.near, self.far)
    }
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective(Perspective),
    Orthogonal(OrthoBounds),
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        match self {
            Projection::Perspective(p) => p.matrix(),
            Projection::Orthogonal(o) => o.matrix(),
        }
    }

    /// Refit to a new viewport aspect ratio (width over height).
    ///
    /// Orthogonal boxes keep their vertical extent and centre and widen or
    /// narrow horizontally.
    pub fn with_aspect(self, aspect: f32) -> Self {
        match self {
            Projection::Perspective(p) => Projection::Perspective(Perspective { aspect, ..p }),
            Projection::Orthogonal(o) => {
                let center = (o.left + o.right) / 2.0;
                let half_width = (o.top - o.bottom) / 2.0 * aspect;
                Projection::Orthogonal(OrthoBounds {
                    left: center - half_width,
                    right: center + half_width,
                    ..o
                })
            }
        }
    }
}

/// Camera placed with a look-at view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub projection: Projection,
}

impl Camera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, projection: Projection) -> Self {
        Self {
            eye,
            target,
            up: DEFAULT_UP,
            projection,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(&matrix::identity(), &self.eye, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Projection composed with the view, ready to receive a model matrix
    pub fn view_projection(&self) -> Mat4 {
        look_at(&self.projection_matrix(), &self.eye, &self.target, &self.up)
    }
}

/// Project a point through `mvp` and perform the perspective divide.
///
/// Returns normalized device coordinates, or `None` for points at or behind
/// the eye (`w <= 0`).
pub fn project_to_ndc(mvp: &Mat4, point: &Point3<f32>) -> Option<Point3<f32>> {
    let clip = matrix::transform_point(mvp, point);

    // Prevent division by near-zero w values
    if clip.w < 1e-6 {
        return None;
    }

    Some(Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_perspective_near_plane_maps_to_minus_one() {
        let m = perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
        let ndc = project_to_ndc(&m, &Point3::new(0.0, 0.0, -1.0)).unwrap();
        assert!((ndc.z + 1.0).abs() < 1e-5);

        let far = project_to_ndc(&m, &Point3::new(0.0, 0.0, -100.0)).unwrap();
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_perspective_layout() {
        let flat = matrix::to_array(&Perspective::default().matrix());
        let f = 1.0 / 1.5f32.tan();
        assert!((flat[0] - f).abs() < 1e-6);
        assert!((flat[5] - f).abs() < 1e-6);
        assert_eq!(flat[11], -1.0);
        assert_eq!(flat[15], 0.0);
    }

    #[test]
    fn test_perspective_empty_depth_range_is_not_finite() {
        let m = perspective(1.0, 1.0, 0.0, 0.0);
        assert!(m.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_orthogonal_corner() {
        let m = OrthoBounds::square(5.0).with_depth(1.0, 100.0).matrix();
        let clip = matrix::transform_point(&m, &Point3::new(5.0, 5.0, -1.0));
        assert!((clip.x - 1.0).abs() < 1e-6);
        assert!((clip.y - 1.0).abs() < 1e-6);
        assert!((clip.z + 1.0).abs() < 1e-5);
        assert_eq!(clip.w, 1.0);
    }

    #[test]
    fn test_orthogonal_default_depth() {
        let bounds = OrthoBounds::new(1.0, -1.0, -2.0, 2.0);
        assert_eq!((bounds.near, bounds.far), (0.0, 100.0));
        let m = bounds.matrix();
        let clip = matrix::transform_point(&m, &Point3::new(-2.0, -1.0, -100.0));
        assert!((clip.x + 1.0).abs() < 1e-6);
        assert!((clip.y + 1.0).abs() < 1e-6);
        assert!((clip.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Point3::new(3.0, 2.0, 5.0);
        let target = Point3::new(0.0, 0.0, 0.0);
        let view = look_at(&matrix::identity(), &eye, &target, &DEFAULT_UP);

        let at_eye = matrix::transform_point(&view, &eye);
        assert!(at_eye.xyz().norm() < 1e-5);

        // The target ends up straight ahead on -Z
        let at_target = matrix::transform_point(&view, &target);
        let distance = (target - eye).norm();
        assert!(at_target.x.abs() < 1e-5);
        assert!(at_target.y.abs() < 1e-5);
        assert!((at_target.z + distance).abs() < 1e-4);
    }

    #[test]
    fn test_look_at_composes_on_the_right() {
        let eye = Point3::new(0.0, 0.0, 4.0);
        let base = perspective(0.5, 1.0, 1.0, 10.0);
        let view = look_at(&matrix::identity(), &eye, &Point3::origin(), &DEFAULT_UP);
        let composed = look_at(&base, &eye, &Point3::origin(), &DEFAULT_UP);
        assert!((composed - base * view).norm() < 1e-5);
    }

    #[test]
    fn test_with_aspect() {
        let wide = Projection::Orthogonal(OrthoBounds::square(5.0)).with_aspect(2.0);
        match wide {
            Projection::Orthogonal(o) => {
                assert_eq!((o.left, o.right), (-10.0, 10.0));
                assert_eq!((o.bottom, o.top), (-5.0, 5.0));
            }
            other => panic!("unexpected projection {:?}", other),
        }

        let persp = Projection::Perspective(Perspective::default()).with_aspect(1.5);
        assert_eq!(
            persp,
            Projection::Perspective(Perspective {
                aspect: 1.5,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_camera() {
        let camera = Camera::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            Projection::Perspective(Perspective::default()),
        );
        let vp = camera.view_projection();
        assert!((vp - camera.projection_matrix() * camera.view_matrix()).norm() < 1e-5);

        let center = project_to_ndc(&vp, &Point3::origin()).unwrap();
        assert!(center.x.abs() < 1e-6 && center.y.abs() < 1e-6);

        // Behind the eye
        assert!(project_to_ndc(&vp, &Point3::new(0.0, 0.0, 10.0)).is_none());
    }
}
