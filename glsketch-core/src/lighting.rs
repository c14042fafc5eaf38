/// Ambient + diffuse lighting for directional, point and spot lights
use nalgebra::{Point3, Vector3};

use crate::geometry::Mesh;
use crate::matrix::{self, Mat4};

/// Linear RGB in `[0, 1]`
pub type Color = Vector3<f32>;

/// Distance up to which point and spot lights shine at full strength
pub const ATTENUATION_RANGE: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Parallel rays; `direction` points towards the light
    Directional { direction: Vector3<f32> },
    Point { position: Point3<f32> },
    /// A point light restricted to a cone of half-angle `cutoff` radians
    /// around `direction`
    Spot {
        position: Point3<f32>,
        direction: Vector3<f32>,
        cutoff: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub light: Light,
    pub color: Color,
    pub ambient: Color,
}

impl Lighting {
    pub fn new(light: Light) -> Self {
        Self {
            light,
            color: Color::new(1.0, 1.0, 1.0),
            ambient: Color::new(0.2, 0.2, 0.2),
        }
    }

    pub fn with_ambient(self, ambient: Color) -> Self {
        Self { ambient, ..self }
    }

    /// Lit color of a surface point.
    ///
    /// `ambient·base + attenuation·cone·color·base·max(L·n, 0)`, where `L`
    /// is the unit direction from the point towards the light.
    pub fn shade(&self, position: &Point3<f32>, normal: &Vector3<f32>, base: &Color) -> Color {
        let normal = normal
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        let ambient = self.ambient.component_mul(base);

        let (to_light, strength) = match self.light {
            Light::Directional { direction } => (
                direction
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::zeros),
                1.0,
            ),
            Light::Point { position: light } => point_contribution(&light, position),
            Light::Spot {
                position: light,
                direction,
                cutoff,
            } => {
                let (to_light, attenuation) = point_contribution(&light, position);
                let axis = direction
                    .try_normalize(f32::EPSILON)
                    .unwrap_or_else(Vector3::zeros);
                let inside = (-to_light).dot(&axis) >= cutoff.cos();
                (to_light, if inside { attenuation } else { 0.0 })
            }
        };

        let n_dot_l = to_light.dot(&normal).max(0.0);
        ambient + self.color.component_mul(base) * (n_dot_l * strength)
    }

    /// Per-vertex lit colors of a mesh in its own coordinate space
    pub fn shade_mesh(&self, mesh: &Mesh, base: &Color) -> Vec<Color> {
        (0..mesh.vertex_count())
            .map(|i| self.shade(&mesh.position(i), &mesh.normal(i), base))
            .collect()
    }

    /// Per-vertex lit colors of a mesh placed in the world by `model`.
    ///
    /// Normals go through the normal matrix; a singular model leaves them
    /// untransformed.
    pub fn shade_mesh_world(&self, mesh: &Mesh, model: &Mat4, base: &Color) -> Vec<Color> {
        let normals = matrix::normal_matrix(model).unwrap_or_else(matrix::identity);

        (0..mesh.vertex_count())
            .map(|i| {
                let position = model.transform_point(&mesh.position(i));
                let normal = normals.transform_vector(&mesh.normal(i));
                self.shade(&position, &normal, base)
            })
            .collect()
    }
}

/// Direction towards the light and `clamp(range / distance, 0, 1)` attenuation
fn point_contribution(light: &Point3<f32>, position: &Point3<f32>) -> (Vector3<f32>, f32) {
    let offset = light - position;
    let distance = offset.norm();
    if distance < f32::EPSILON {
        return (Vector3::zeros(), 1.0);
    }

    let attenuation = (ATTENUATION_RANGE / distance).clamp(0.0, 1.0);
    (offset / distance, attenuation)
}
