/// glsketch Web - WASM bindings for the matrix and shape helpers
///
/// Matrices cross the boundary as column-major `Float32Array`s of 16 values,
/// ready for `uniformMatrix4fv`. Meshes expose their position, normal and
/// `Uint16Array` index buffers for upload.
use glsketch_core::{matrix, projection, shapes, Mat4, Mesh, TransformOptions};
use nalgebra::{Point3, Vector3};
use wasm_bindgen::prelude::*;

fn matrix_arg(values: &[f32]) -> Result<Mat4, String> {
    matrix::from_slice(values)
        .ok_or_else(|| format!("expected a 4x4 matrix of 16 values, got {}", values.len()))
}

fn vector_arg(name: &str, values: &[f32]) -> Result<Vector3<f32>, String> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("{} must have 3 components, got {}", name, values.len())),
    }
}

fn flat(m: &Mat4) -> Vec<f32> {
    matrix::to_array(m).to_vec()
}

fn to_js(err: String) -> JsValue {
    JsValue::from_str(&err)
}

fn inverse_of(values: &[f32]) -> Result<Option<Vec<f32>>, String> {
    Ok(matrix::inverse(&matrix_arg(values)?).map(|m| flat(&m)))
}

fn transform_with(values: &[f32], options: &TransformOptions) -> Result<Vec<f32>, String> {
    Ok(flat(&glsketch_core::transform(&matrix_arg(values)?, options)))
}

fn look_at_with(
    values: &[f32],
    eye: &[f32],
    target: &[f32],
    up: Option<&[f32]>,
) -> Result<Vec<f32>, String> {
    let m = matrix_arg(values)?;
    let eye = Point3::from(vector_arg("eye", eye)?);
    let target = Point3::from(vector_arg("target", target)?);
    let up = match up {
        Some(up) => vector_arg("up", up)?,
        None => projection::DEFAULT_UP,
    };
    Ok(flat(&projection::look_at(&m, &eye, &target, &up)))
}

#[wasm_bindgen]
pub fn identity() -> Vec<f32> {
    flat(&matrix::identity())
}

/// `a × b`; applied to a vector, `b` acts first
#[wasm_bindgen]
pub fn multiply(a: &[f32], b: &[f32]) -> Result<Vec<f32>, JsValue> {
    let a = matrix_arg(a).map_err(to_js)?;
    let b = matrix_arg(b).map_err(to_js)?;
    Ok(flat(&matrix::multiply(&a, &b)))
}

#[wasm_bindgen]
pub fn transpose(m: &[f32]) -> Result<Vec<f32>, JsValue> {
    Ok(flat(&matrix::transpose(&matrix_arg(m).map_err(to_js)?)))
}

/// Inverse of `m`, or `undefined` when it is singular
#[wasm_bindgen]
pub fn inverse(m: &[f32]) -> Result<Option<Vec<f32>>, JsValue> {
    inverse_of(m).map_err(to_js)
}

/// Compose a translation, rotations and a scale onto `m`.
///
/// Omitted offsets default to 0, omitted scales to 1, and omitted rotations
/// are skipped.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn transform(
    m: &[f32],
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
    rx: Option<f32>,
    ry: Option<f32>,
    rz: Option<f32>,
    sx: Option<f32>,
    sy: Option<f32>,
    sz: Option<f32>,
) -> Result<Vec<f32>, JsValue> {
    let options = TransformOptions {
        x: x.unwrap_or(0.0),
        y: y.unwrap_or(0.0),
        z: z.unwrap_or(0.0),
        rx,
        ry,
        rz,
        sx: sx.unwrap_or(1.0),
        sy: sy.unwrap_or(1.0),
        sz: sz.unwrap_or(1.0),
    };
    transform_with(m, &options).map_err(to_js)
}

/// [`transform`] with the options written as text, e.g. `"z=-5 rx=0.7"`
#[wasm_bindgen(js_name = transformStr)]
pub fn transform_str(m: &[f32], options: &str) -> Result<Vec<f32>, JsValue> {
    let options: TransformOptions = options.parse().map_err(|e| to_js(format!("{}", e)))?;
    transform_with(m, &options).map_err(to_js)
}

#[wasm_bindgen]
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Vec<f32> {
    flat(&projection::perspective(fov, aspect, near, far))
}

#[wasm_bindgen]
pub fn orthogonal(top: f32, bottom: f32, left: f32, right: f32, near: f32, far: f32) -> Vec<f32> {
    flat(&projection::orthogonal(top, bottom, left, right, near, far))
}

/// Compose a look-at view onto `m`; `up` defaults to +Y
#[wasm_bindgen(js_name = lookAt)]
pub fn look_at(
    m: &[f32],
    eye: &[f32],
    target: &[f32],
    up: Option<Vec<f32>>,
) -> Result<Vec<f32>, JsValue> {
    look_at_with(m, eye, target, up.as_deref()).map_err(to_js)
}

/// Vertex and index buffers of a generated shape
#[wasm_bindgen]
pub struct MeshBuffers {
    mesh: Mesh,
}

#[wasm_bindgen]
impl MeshBuffers {
    pub fn cube() -> MeshBuffers {
        Self::from(shapes::cube())
    }

    /// UV sphere; `precision` defaults to 25 subdivisions and must lie in `1..=255`
    pub fn sphere(precision: Option<u16>) -> Result<MeshBuffers, JsValue> {
        sphere_mesh(precision).map(Self::from).map_err(to_js)
    }

    pub fn pyramid() -> MeshBuffers {
        Self::from(shapes::pyramid())
    }

    pub fn positions(&self) -> Vec<f32> {
        self.mesh.positions.clone()
    }

    pub fn normals(&self) -> Vec<f32> {
        self.mesh.normals.clone()
    }

    pub fn indices(&self) -> Vec<u16> {
        self.mesh.indices.clone()
    }

    /// Number of indices to draw
    pub fn count(&self) -> usize {
        self.mesh.indices.len()
    }
}

impl From<Mesh> for MeshBuffers {
    fn from(mesh: Mesh) -> Self {
        Self { mesh }
    }
}

fn sphere_mesh(precision: Option<u16>) -> Result<Mesh, String> {
    shapes::sphere(precision.unwrap_or(shapes::DEFAULT_SPHERE_PRECISION)).map_err(|e| e.to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| to_js(e.to_string()))?;

    log::info!("glsketch bindings ready");
    Ok(())
}
