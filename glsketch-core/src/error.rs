/// Errors for mesh validation and transform-options parsing
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Position and normal buffers disagree in length or are not `xyz` triples
    MismatchedBuffers { positions: usize, normals: usize },
    /// The index count is not a multiple of three
    IncompleteTriangle(usize),
    IndexOutOfRange { index: usize, vertex_count: usize },
    /// Sphere subdivisions outside `1..=max`
    PrecisionOutOfRange { precision: u16, max: u16 },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::MismatchedBuffers { positions, normals } => write!(
                f,
                "mismatched vertex buffers: {} position floats, {} normal floats",
                positions, normals
            ),
            MeshError::IncompleteTriangle(count) => {
                write!(f, "{} indices do not form whole triangles", count)
            }
            MeshError::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "index {} out of range for {} vertices",
                index, vertex_count
            ),
            MeshError::PrecisionOutOfRange { precision, max } => write!(
                f,
                "sphere precision must be between 1 and {}, got {}",
                max, precision
            ),
        }
    }
}

impl Error for MeshError {}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    UnknownKey(String),
    /// Text that is not a `key=value` pair
    Malformed(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::UnknownKey(key) => write!(
                f,
                "unknown transform option '{}' (expected x, y, z, rx, ry, rz, sx, sy or sz)",
                key
            ),
            OptionsError::Malformed(rest) => {
                write!(f, "expected key=value transform options at '{}'", rest)
            }
        }
    }
}

impl Error for OptionsError {}
