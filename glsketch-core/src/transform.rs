/// Incremental translate / rotate / scale composition
use std::fmt;

use nalgebra::{Vector3, Vector4};

use crate::matrix::Mat4;

/// Offsets, rotations and scale factors applied by [`transform`].
///
/// Rotations are in radians. An absent rotation skips that multiply entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOptions {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rx: Option<f32>,
    pub ry: Option<f32>,
    pub rz: Option<f32>,
    pub sx: f32,
    pub sy: f32,
    pub sz: f32,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rx: None,
            ry: None,
            rz: None,
            sx: 1.0,
            sy: 1.0,
            sz: 1.0,
        }
    }

    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, ..Self::new() }
    }

    pub fn rotate(rx: f32, ry: f32, rz: f32) -> Self {
        Self {
            rx: Some(rx),
            ry: Some(ry),
            rz: Some(rz),
            ..Self::new()
        }
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self { sx, sy, sz, ..Self::new() }
    }

    /// True when applying these options leaves any matrix unchanged
    pub fn is_identity(&self) -> bool {
        self.x == 0.0
            && self.y == 0.0
            && self.z == 0.0
            && [self.rx, self.ry, self.rz]
                .iter()
                .all(|r| r.map_or(true, |angle| angle == 0.0))
            && self.sx == 1.0
            && self.sy == 1.0
            && self.sz == 1.0
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the fields that differ from their defaults, in the `key=value`
/// syntax accepted by `str::parse`.
impl fmt::Display for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("x", Some(self.x).filter(|v| *v != 0.0)),
            ("y", Some(self.y).filter(|v| *v != 0.0)),
            ("z", Some(self.z).filter(|v| *v != 0.0)),
            ("rx", self.rx),
            ("ry", self.ry),
            ("rz", self.rz),
            ("sx", Some(self.sx).filter(|v| *v != 1.0)),
            ("sy", Some(self.sy).filter(|v| *v != 1.0)),
            ("sz", Some(self.sz).filter(|v| *v != 1.0)),
        ];

        let mut first = true;
        for (key, value) in fields {
            if let Some(value) = value {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}={}", key, value)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Compose translation, X/Y/Z rotation and scale onto `matrix`.
///
/// The translation moves along the matrix's own axes (it is added into
/// column 3 as `x·col0 + y·col1 + z·col2`), each rotation right-multiplies
/// the working matrix, and scaling multiplies columns 0, 1 and 2. Feeding the
/// result back in every frame accumulates continuous motion.
pub fn transform(matrix: &Mat4, options: &TransformOptions) -> Mat4 {
    let mut out = *matrix;

    if options.x != 0.0 || options.y != 0.0 || options.z != 0.0 {
        let offset = out * Vector4::new(options.x, options.y, options.z, 0.0);
        let moved = out.column(3) + offset;
        out.set_column(3, &moved);
    }

    let axes = [
        (options.rx, Vector3::x()),
        (options.ry, Vector3::y()),
        (options.rz, Vector3::z()),
    ];
    for (angle, axis) in axes {
        // A zero angle is the identity
        if let Some(angle) = angle.filter(|a| *a != 0.0) {
            out *= Mat4::new_rotation(axis * angle);
        }
    }

    for (index, factor) in [options.sx, options.sy, options.sz].into_iter().enumerate() {
        if factor != 1.0 {
            let mut column = out.column_mut(index);
            column *= factor;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{identity, multiply};
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_translate_origin() {
        let m = transform(&identity(), &TransformOptions::translate(1.0, 2.0, 3.0));
        let p = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_translation_is_local() {
        let turned = transform(
            &identity(),
            &TransformOptions {
                ry: Some(FRAC_PI_2),
                ..Default::default()
            },
        );
        let moved = transform(&turned, &TransformOptions::translate(1.0, 0.0, 0.0));
        let p = moved * Vector4::new(0.0, 0.0, 0.0, 1.0);

        // Local +X after a quarter turn about Y is world -Z
        assert!((p - Vector4::new(0.0, 0.0, -1.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_full_turn_is_identity() {
        for options in [
            TransformOptions { rx: Some(2.0 * PI), ..Default::default() },
            TransformOptions { ry: Some(2.0 * PI), ..Default::default() },
            TransformOptions { rz: Some(2.0 * PI), ..Default::default() },
        ] {
            let m = transform(&identity(), &options);
            assert!((m - identity()).norm() < 1e-5);
        }
    }

    #[test]
    fn test_rotation_is_right_handed() {
        let m = transform(
            &identity(),
            &TransformOptions { rz: Some(FRAC_PI_2), ..Default::default() },
        );
        let p = m * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p - Vector4::new(0.0, 1.0, 0.0, 1.0)).norm() < 1e-6);

        let m = transform(
            &identity(),
            &TransformOptions { rx: Some(FRAC_PI_2), ..Default::default() },
        );
        let p = m * Vector4::new(0.0, 1.0, 0.0, 1.0);
        assert!((p - Vector4::new(0.0, 0.0, 1.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_order_translate_rotate_scale() {
        let options = TransformOptions {
            x: 1.0,
            rx: Some(0.3),
            ry: Some(-0.7),
            rz: Some(1.1),
            sx: 2.0,
            sz: 0.5,
            ..Default::default()
        };
        let expected = Mat4::new_translation(&Vector3::new(1.0, 0.0, 0.0))
            * Mat4::new_rotation(Vector3::new(0.3, 0.0, 0.0))
            * Mat4::new_rotation(Vector3::new(0.0, -0.7, 0.0))
            * Mat4::new_rotation(Vector3::new(0.0, 0.0, 1.1))
            * Mat4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 0.5));
        assert!((transform(&identity(), &options) - expected).norm() < 1e-5);
    }

    #[test]
    fn test_composes_onto_existing_matrix() {
        let base = Mat4::new_perspective(1.0, 0.5, 1.0, 10.0);
        let options = TransformOptions { z: -5.0, rx: Some(0.7), ry: Some(-0.8), ..Default::default() };
        let local = transform(&identity(), &options);
        assert!((transform(&base, &options) - multiply(&base, &local)).norm() < 1e-4);
    }

    #[test]
    fn test_accumulation_is_deterministic() {
        let delta = TransformOptions::rotate(0.01, 0.02, 0.01);
        let mut a = identity();
        let mut b = identity();
        for _ in 0..100 {
            a = transform(&a, &delta);
            b = transform(&b, &delta);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_rotation_and_unit_scale_are_noops() {
        let m = Mat4::new_rotation(Vector3::new(0.1, 0.2, 0.3));
        let options = TransformOptions { rx: Some(0.0), ..Default::default() };
        assert!(options.is_identity());
        assert_eq!(transform(&m, &options), m);
        assert!(!TransformOptions::scale(1.0, 2.0, 1.0).is_identity());
    }

    #[test]
    fn test_display() {
        let options = TransformOptions { x: 1.0, ry: Some(0.5), sz: 2.0, ..Default::default() };
        assert_eq!(options.to_string(), "x=1 ry=0.5 sz=2");
        assert_eq!(TransformOptions::new().to_string(), "");
    }
}
