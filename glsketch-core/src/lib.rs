/// glsketch core library - matrix math and shape generation
///
/// Stateless building blocks shared by the rendering demos: column-major
/// 4x4 matrices, incremental transforms, projections, indexed meshes,
/// shape generators, simple lighting and sampled textures.

pub mod error;
pub mod geometry;
pub mod lighting;
pub mod matrix;
pub mod projection;
pub mod shapes;
pub mod syntax;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use error::{MeshError, OptionsError};
pub use geometry::{Mesh, Triangle, Vertex};
pub use lighting::{Color, Light, Lighting};
pub use matrix::Mat4;
pub use projection::{Camera, OrthoBounds, Perspective, Projection};
pub use shapes::ColoredCube;
pub use texture::Texture;
pub use transform::{transform, TransformOptions};
