/// Shape generators shared by the demos
use std::f32::consts::PI;

use crate::error::MeshError;
use crate::geometry::Mesh;

/// Sphere precision used when none is given
pub const DEFAULT_SPHERE_PRECISION: u16 = 25;

/// Largest sphere precision whose `(precision + 1)²` vertices fit `u16` indices
pub const MAX_SPHERE_PRECISION: u16 = 255;

/// Apex height of the pyramid, for equilateral sides on a unit base
pub const PYRAMID_HEIGHT: f32 = 0.866;

// Cube corners
//
//    v6----- v5
//   /|      /|
//  v1------v0|
//  | |     | |
//  | |v7---|-|v4
//  |/      |/
//  v2------v3

/// A 2x2x2 cube centred on the origin.
///
/// Every face has its own four vertices so it can carry a flat normal:
/// 24 vertices, 36 indices, counter-clockwise seen from outside.
pub fn cube() -> Mesh {
    #[rustfmt::skip]
    let positions = vec![
         1.0, 1.0, 1.0,  -1.0, 1.0, 1.0,  -1.0,-1.0, 1.0,   1.0,-1.0, 1.0, // front
         1.0, 1.0, 1.0,   1.0,-1.0, 1.0,   1.0,-1.0,-1.0,   1.0, 1.0,-1.0, // right
         1.0, 1.0, 1.0,   1.0, 1.0,-1.0,  -1.0, 1.0,-1.0,  -1.0, 1.0, 1.0, // up
        -1.0, 1.0, 1.0,  -1.0, 1.0,-1.0,  -1.0,-1.0,-1.0,  -1.0,-1.0, 1.0, // left
        -1.0,-1.0,-1.0,   1.0,-1.0,-1.0,   1.0,-1.0, 1.0,  -1.0,-1.0, 1.0, // down
         1.0,-1.0,-1.0,  -1.0,-1.0,-1.0,  -1.0, 1.0,-1.0,   1.0, 1.0,-1.0, // back
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, -1.0],
    ];
    let normals = face_normals
        .iter()
        .flat_map(|normal| normal.repeat(4))
        .collect();

    let indices = (0..6u16)
        .flat_map(|face| {
            let first = face * 4;
            [first, first + 1, first + 2, first, first + 2, first + 3]
        })
        .collect();

    Mesh::new(positions, normals, indices)
}

/// A unit UV-sphere with `precision` latitude and longitude subdivisions.
///
/// Vertex `(i, j)` sits at longitude `2π·i/precision` and colatitude
/// `π·j/precision`, giving `(precision + 1)²` vertices and `6·precision²`
/// indices. Normals equal positions. The seam and pole vertices are not
/// shared, so the pole rows produce zero-area triangles.
///
/// Indices are `u16`, so `precision` must lie in `1..=`[`MAX_SPHERE_PRECISION`];
/// anything else is a [`MeshError::PrecisionOutOfRange`].
pub fn sphere(precision: u16) -> Result<Mesh, MeshError> {
    if !(1..=MAX_SPHERE_PRECISION).contains(&precision) {
        return Err(MeshError::PrecisionOutOfRange {
            precision,
            max: MAX_SPHERE_PRECISION,
        });
    }

    let p = usize::from(precision);
    let mut positions = Vec::with_capacity((p + 1) * (p + 1) * 3);
    let mut indices = Vec::with_capacity(6 * p * p);

    for j in 0..=precision {
        let aj = f32::from(j) * PI / f32::from(precision);
        let (sj, cj) = aj.sin_cos();

        for i in 0..=precision {
            let ai = f32::from(i) * 2.0 * PI / f32::from(precision);
            let (si, ci) = ai.sin_cos();

            positions.extend_from_slice(&[si * sj, cj, ci * sj]);
        }
    }

    let row = precision + 1;
    for j in 0..precision {
        for i in 0..precision {
            let p1 = j * row + i;
            let p2 = p1 + row;

            indices.extend_from_slice(&[p1, p2, p1 + 1, p1 + 1, p2, p2 + 1]);
        }
    }

    let normals = positions.clone();
    Ok(Mesh::new(positions, normals, indices))
}

/// A square pyramid on a 1x1 base with its apex at [`PYRAMID_HEIGHT`].
///
/// Four side triangles and two base triangles, 18 vertices in all. Each side
/// carries its flat face normal, leaning up and out (`y = +0.5` against the
/// `h` outward component), so side lighting agrees with the winding. The base
/// keeps an up-facing normal.
pub fn pyramid() -> Mesh {
    let h = PYRAMID_HEIGHT;

    #[rustfmt::skip]
    let positions = vec![
        -0.5, 0.0,  0.5,    0.5, 0.0,  0.5,   0.0, h, 0.0,  // front
         0.5, 0.0,  0.5,    0.5, 0.0, -0.5,   0.0, h, 0.0,  // right
         0.5, 0.0, -0.5,   -0.5, 0.0, -0.5,   0.0, h, 0.0,  // back
        -0.5, 0.0, -0.5,   -0.5, 0.0,  0.5,   0.0, h, 0.0,  // left
        -0.5, 0.0,  0.5,   -0.5, 0.0, -0.5,   0.5, 0.0, 0.5, // base
        -0.5, 0.0, -0.5,    0.5, 0.0, -0.5,   0.5, 0.0, 0.5,
    ];

    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.5, h],
        [h, 0.5, 0.0],
        [0.0, 0.5, -h],
        [-h, 0.5, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];
    let normals = face_normals
        .iter()
        .flat_map(|normal| normal.repeat(3))
        .collect();

    let indices = (0..18).collect();

    Mesh::new(positions, normals, indices)
}

/// The 8-corner cube with one color per corner and `u8` indices.
///
/// Corners are shared between faces, so it carries colors instead of normals.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredCube {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u8>,
}

pub fn colored_cube() -> ColoredCube {
    #[rustfmt::skip]
    let positions = vec![
         1.0,  1.0,  1.0, // v0
        -1.0,  1.0,  1.0, // v1
        -1.0, -1.0,  1.0, // v2
         1.0, -1.0,  1.0, // v3
         1.0, -1.0, -1.0, // v4
         1.0,  1.0, -1.0, // v5
        -1.0,  1.0, -1.0, // v6
        -1.0, -1.0, -1.0, // v7
    ];

    #[rustfmt::skip]
    let colors = vec![
        1.0, 1.0, 1.0, // white
        1.0, 0.0, 1.0, // magenta
        1.0, 0.0, 0.0, // red
        1.0, 1.0, 0.0, // yellow
        0.0, 1.0, 0.0, // green
        0.0, 1.0, 1.0, // cyan
        0.0, 0.0, 1.0, // blue
        0.0, 0.0, 0.0, // black
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,   0, 2, 3, // front
        0, 3, 4,   0, 4, 5, // right
        0, 5, 6,   0, 6, 1, // up
        1, 6, 7,   1, 7, 2, // left
        7, 4, 3,   7, 3, 2, // down
        4, 7, 6,   4, 6, 5, // back
    ];

    ColoredCube {
        positions,
        colors,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    /// Every face normal from the winding should point away from the centre
    fn assert_outward_winding(mesh: &Mesh, center: Point3<f32>) {
        for triangle in mesh.triangles() {
            let [a, b, c] = &triangle.vertices;
            let normal = (b.position - a.position).cross(&(c.position - a.position));
            // Pole slivers
            if normal.norm() < 1e-4 {
                continue;
            }
            let centroid = triangle
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords)
                / 3.0;
            assert!(normal.dot(&(centroid - center.coords)) > 0.0);
        }
    }

    #[test]
    fn test_cube_counts() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| i < 24));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cube_corners_and_normals() {
        let mesh = cube();
        assert!(mesh.positions.iter().all(|v| v.abs() == 1.0));
        for triangle in mesh.triangles() {
            let face = triangle.calculate_normal();
            for vertex in &triangle.vertices {
                assert!((vertex.normal - face).norm() < 1e-6);
            }
        }
        assert_outward_winding(&mesh, Point3::origin());
    }

    #[test]
    fn test_sphere_counts() {
        let mesh = sphere(10).unwrap();
        assert_eq!(mesh.vertex_count(), 121);
        assert_eq!(mesh.indices.len(), 600);
        assert!(mesh.indices.iter().all(|&i| i < 121));
        assert!(mesh.validate().is_ok());

        let mesh = sphere(DEFAULT_SPHERE_PRECISION).unwrap();
        assert_eq!(mesh.vertex_count(), 26 * 26);
        assert_eq!(mesh.indices.len(), 6 * 25 * 25);
    }

    #[test]
    fn test_sphere_is_unit() {
        for precision in [3, 10, 25] {
            let mesh = sphere(precision).unwrap();
            for i in 0..mesh.vertex_count() {
                assert!((mesh.position(i).coords.norm() - 1.0).abs() < 1e-5);
            }
            assert_eq!(mesh.normals, mesh.positions);
        }
    }

    #[test]
    fn test_sphere_layout() {
        let mesh = sphere(4).unwrap();
        // j = 0 is the north pole
        assert!((mesh.position(0) - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
        // i = 1, j = 2: a quarter turn around the equator
        assert!((mesh.position(2 * 5 + 1) - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
        assert!((mesh.position(24) - Point3::new(0.0, -1.0, 0.0)).norm() < 1e-5);
        assert_eq!(&mesh.indices[..6], &[0, 5, 1, 1, 5, 6]);
    }

    #[test]
    fn test_sphere_winding() {
        assert_outward_winding(&sphere(12).unwrap(), Point3::origin());
    }

    #[test]
    fn test_sphere_precision_bounds() {
        let mesh = sphere(MAX_SPHERE_PRECISION).unwrap();
        assert_eq!(mesh.vertex_count(), 256 * 256);
        assert_eq!(mesh.indices.iter().copied().max(), Some(u16::MAX));
        assert!(mesh.validate().is_ok());

        assert_eq!(
            sphere(256),
            Err(MeshError::PrecisionOutOfRange {
                precision: 256,
                max: MAX_SPHERE_PRECISION
            })
        );
        assert!(sphere(u16::MAX).is_err());
        assert!(sphere(0).is_err());
    }

    #[test]
    fn test_pyramid() {
        let mesh = pyramid();
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.triangle_count(), 6);
        assert!(mesh.validate().is_ok());

        let apex = mesh.position(2);
        assert_eq!(apex, Point3::new(0.0, PYRAMID_HEIGHT, 0.0));
        assert_eq!(mesh.normal(12), Vector3::new(0.0, 1.0, 0.0));

        assert_outward_winding(&mesh, Point3::new(0.0, 0.2, 0.0));

        for (index, triangle) in mesh.triangles().take(4).enumerate() {
            let face = triangle.calculate_normal();
            let normal = mesh.normal(index * 3);
            assert!((normal.norm() - 1.0).abs() < 1e-3);
            assert!(normal.normalize().dot(&face) > 0.999);
            // Sides lean up, away from the base plane
            assert!((normal.y - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_colored_cube() {
        let cube = colored_cube();
        assert_eq!(cube.positions.len(), 24);
        assert_eq!(cube.colors.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|&i| i < 8));
    }
}
