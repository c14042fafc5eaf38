/// 4x4 matrix algebra on column-major storage
use nalgebra::{Matrix4, Point3, Vector4};

/// A 4x4 `f32` matrix stored column-major (element `col * 4 + row`).
///
/// This is the layout GL-style uniform uploads expect, with the translation
/// in elements 12, 13 and 14.
pub type Mat4 = Matrix4<f32>;

/// The identity matrix
pub fn identity() -> Mat4 {
    Mat4::identity()
}

/// Standard matrix product `a × b`: `c[i + 4j] = Σk a[i + 4k] · b[k + 4j]`
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    a * b
}

pub fn transpose(m: &Mat4) -> Mat4 {
    m.transpose()
}

/// Inverse of `m`, or `None` when it is singular
pub fn inverse(m: &Mat4) -> Option<Mat4> {
    m.try_inverse()
}

/// Matrix for transforming normals of a model: `transpose(inverse(model))`
pub fn normal_matrix(model: &Mat4) -> Option<Mat4> {
    inverse(model).map(|inv| inv.transpose())
}

/// Flatten to the 16 floats in upload order
pub fn to_array(m: &Mat4) -> [f32; 16] {
    let mut out = [0.0; 16];
    out.copy_from_slice(m.as_slice());
    out
}

/// Build a matrix from 16 column-major floats.
///
/// Returns `None` when the slice does not hold exactly 16 values.
pub fn from_slice(values: &[f32]) -> Option<Mat4> {
    if values.len() != 16 {
        return None;
    }
    Some(Mat4::from_column_slice(values))
}

/// Apply `m` to a point with `w = 1`, without the perspective divide
pub fn transform_point(m: &Mat4, point: &Point3<f32>) -> Vector4<f32> {
    m * point.to_homogeneous()
}
