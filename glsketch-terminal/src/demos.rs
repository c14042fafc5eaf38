/// The demo scenes shown by the terminal gallery
use std::f32::consts::{PI, TAU};

use glsketch_core::{
    matrix, shapes, transform, Camera, Color, ColoredCube, Light, Lighting, Mat4, Mesh,
    MeshError, OrthoBounds, Perspective, Projection, Texture, TransformOptions,
};
use nalgebra::{Point3, Vector3};

use crate::gallery::{Demo, DrawCall, Indices, Surface};

const RED: Color = Color::new(1.0, 0.0, 0.0);
const TRIANGLE: [f32; 9] = [0.0, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0];
const TRIANGLE_INDICES: [u16; 3] = [0, 1, 2];

fn deg2rad(angle: f32) -> f32 {
    PI * angle / 180.0
}

/// 30 degree perspective used by the lit demos
fn lit_perspective(aspect: f32) -> Projection {
    Projection::Perspective(Perspective {
        fov: deg2rad(30.0),
        aspect,
        near: 1.0,
        far: 100.0,
    })
}

/// Flat 2D view of the `[-1, 1]` square, widened to the viewport
fn flat_projection(aspect: f32) -> Projection {
    Projection::Orthogonal(OrthoBounds::square(1.0).with_depth(-1.0, 1.0)).with_aspect(aspect)
}

/// Every demo, in gallery order
pub fn all(aspect: f32) -> Result<Vec<Box<dyn Demo>>, MeshError> {
    Ok(vec![
        Box::new(ColorDemo::new(aspect)),
        Box::new(TransformDemo::new(aspect)),
        Box::new(TexturingDemo::new(aspect)),
        Box::new(ColoredCubeDemo::new(aspect)),
        Box::new(DirectionalLightDemo::new(aspect)?),
        Box::new(PointLightDemo::new(aspect)),
        Box::new(SpotLightDemo::new(aspect)?),
        Box::new(PyramidDemo::new(aspect)),
    ])
}

/// A triangle whose corner colors drift around the hue circle
pub struct ColorDemo {
    projection: Projection,
    phase: f32,
}

impl ColorDemo {
    pub fn new(aspect: f32) -> Self {
        Self {
            projection: flat_projection(aspect),
            phase: 0.0,
        }
    }

    fn corner_color(&self, corner: usize) -> Color {
        let offset = self.phase + corner as f32 * TAU / 3.0;
        Color::new(
            0.5 + 0.5 * offset.sin(),
            0.5 + 0.5 * (offset + TAU / 3.0).sin(),
            0.5 + 0.5 * (offset + 2.0 * TAU / 3.0).sin(),
        )
    }
}

impl Demo for ColorDemo {
    fn title(&self) -> &'static str {
        "Color"
    }

    fn description(&self) -> &'static str {
        "Corner colors shifting over time."
    }

    fn resize(&mut self, aspect: f32) {
        self.projection = self.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.phase = (self.phase + 0.03) % TAU;
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &TRIANGLE,
            indices: Indices::U16(&TRIANGLE_INDICES),
            surface: Surface::Colors((0..3).map(|corner| self.corner_color(corner)).collect()),
            mvp: self.projection.matrix(),
        }]
    }
}

/// A red triangle swinging, turning and pulsing
pub struct TransformDemo {
    projection: Projection,
    time: f32,
}

impl TransformDemo {
    pub fn new(aspect: f32) -> Self {
        Self {
            projection: flat_projection(aspect),
            time: 0.0,
        }
    }

    fn model(&self) -> Mat4 {
        let t = self.time;
        let pulse = 1.0 + 0.4 * (2.0 * t).sin();
        transform(
            &matrix::identity(),
            &TransformOptions {
                x: 0.5 * t.sin(),
                y: 0.2 * (1.3 * t).cos(),
                rz: Some(t),
                sx: pulse,
                sy: pulse,
                ..Default::default()
            },
        )
    }
}

impl Demo for TransformDemo {
    fn title(&self) -> &'static str {
        "Transform"
    }

    fn description(&self) -> &'static str {
        "Triangle position, rotation and scale over time."
    }

    fn resize(&mut self, aspect: f32) {
        self.projection = self.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.time += 0.03;
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &TRIANGLE,
            indices: Indices::U16(&TRIANGLE_INDICES),
            surface: Surface::Colors(vec![RED; 3]),
            mvp: matrix::multiply(&self.projection.matrix(), &self.model()),
        }]
    }
}

/// A quad showing a procedural sky, its corners and texture coordinates
/// drifting as the frames go by
pub struct TexturingDemo {
    projection: Projection,
    positions: [f32; 12],
    uvs: [f32; 8],
    texture: Texture,
    angle: f32,
}

impl TexturingDemo {
    /// Corners in triangle-strip order: top left, bottom left, top right,
    /// bottom right
    #[rustfmt::skip]
    const POSITIONS: [f32; 12] = [
        -0.5,  0.5, 0.0,
        -0.5, -0.5, 0.0,
         0.5,  0.5, 0.0,
         0.5, -0.5, 0.0,
    ];
    const UVS: [f32; 8] = [0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0];
    const INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

    pub fn new(aspect: f32) -> Self {
        Self {
            projection: flat_projection(aspect),
            positions: Self::POSITIONS,
            uvs: Self::UVS,
            texture: sky_texture(32, 16),
            angle: 0.0,
        }
    }
}

/// Blue gradient from a pale horizon up to a deep zenith, with soft clouds
fn sky_texture(width: usize, height: usize) -> Texture {
    let horizon = Color::new(0.75, 0.85, 1.0);
    let zenith = Color::new(0.1, 0.3, 0.8);
    Texture::from_fn(width, height, |column, row| {
        let t = row as f32 / (height.max(2) - 1) as f32;
        let (x, y) = (column as f32, row as f32);
        let cloud = ((x * 0.7).sin() * (y * 1.3 + x * 0.2).sin()).max(0.0);
        horizon.lerp(&zenith, t).lerp(&Color::new(1.0, 1.0, 1.0), cloud * 0.8)
    })
}

impl Demo for TexturingDemo {
    fn title(&self) -> &'static str {
        "Texturing"
    }

    fn description(&self) -> &'static str {
        "Quad sampling a sky texture by UV."
    }

    fn resize(&mut self, aspect: f32) {
        self.projection = self.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.angle += 0.01;
        let (sin, cos) = self.angle.sin_cos();
        // Top-left x and bottom-left y wobble, as do the right-hand u and v
        self.positions[0] += cos * 0.01;
        self.positions[4] += cos * 0.01;
        self.uvs[4] += sin * 0.01;
        self.uvs[7] += sin * 0.01;
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &self.positions,
            indices: Indices::U16(&Self::INDICES),
            surface: Surface::Textured {
                uvs: &self.uvs,
                texture: &self.texture,
            },
            mvp: self.projection.matrix(),
        }]
    }
}

/// The 8-corner cube with one color per corner, seen through an
/// orthogonal camera that keeps turning
pub struct ColoredCubeDemo {
    cube: ColoredCube,
    colors: Vec<Color>,
    projection: Projection,
    camera: Mat4,
}

impl ColoredCubeDemo {
    pub fn new(aspect: f32) -> Self {
        let cube = shapes::colored_cube();
        let colors = cube
            .colors
            .chunks_exact(3)
            .map(Color::from_column_slice)
            .collect();

        Self {
            cube,
            colors,
            projection: Projection::Orthogonal(OrthoBounds::square(3.0).with_depth(1.0, 100.0))
                .with_aspect(aspect),
            camera: transform(&matrix::identity(), &TransformOptions::translate(0.0, 0.0, -5.0)),
        }
    }
}

impl Demo for ColoredCubeDemo {
    fn title(&self) -> &'static str {
        "Colored Cube"
    }

    fn description(&self) -> &'static str {
        "Cube with one color per corner."
    }

    fn resize(&mut self, aspect: f32) {
        self.projection = self.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.camera = transform(&self.camera, &TransformOptions::rotate(0.01, 0.02, 0.01));
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &self.cube.positions,
            indices: Indices::U8(&self.cube.indices),
            surface: Surface::Colors(self.colors.clone()),
            mvp: matrix::multiply(&self.projection.matrix(), &self.camera),
        }]
    }
}

/// A red sphere under a directional light circling around the X axis
pub struct DirectionalLightDemo {
    sphere: Mesh,
    projection: Projection,
    camera: Mat4,
    angle: f32,
}

impl DirectionalLightDemo {
    pub fn new(aspect: f32) -> Result<Self, MeshError> {
        Self::with_precision(aspect, shapes::DEFAULT_SPHERE_PRECISION)
    }

    pub fn with_precision(aspect: f32, precision: u16) -> Result<Self, MeshError> {
        Ok(Self {
            sphere: shapes::sphere(precision)?,
            projection: lit_perspective(aspect),
            camera: transform(
                &matrix::identity(),
                &TransformOptions {
                    z: -5.0,
                    rx: Some(0.7),
                    ry: Some(-0.8),
                    ..Default::default()
                },
            ),
            angle: 0.0,
        })
    }

    fn lighting(&self) -> Lighting {
        Lighting::new(Light::Directional {
            direction: Vector3::new(0.7, self.angle.cos(), self.angle.sin()),
        })
    }
}

impl Demo for DirectionalLightDemo {
    fn title(&self) -> &'static str {
        "Directional light"
    }

    fn description(&self) -> &'static str {
        "Parallel light rays with ambient light."
    }

    fn resize(&mut self, aspect: f32) {
        self.projection = self.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.angle += 0.02;
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &self.sphere.positions,
            indices: Indices::U16(&self.sphere.indices),
            surface: Surface::Colors(self.lighting().shade_mesh(&self.sphere, &RED)),
            mvp: matrix::multiply(&self.projection.matrix(), &self.camera),
        }]
    }
}

/// A red cube lit by a point light orbiting beside it
pub struct PointLightDemo {
    cube: Mesh,
    projection: Projection,
    camera: Mat4,
    angle: f32,
}

impl PointLightDemo {
    pub fn new(aspect: f32) -> Self {
        Self {
            cube: shapes::cube(),
            projection: lit_perspective(aspect),
            camera: transform(
                &matrix::identity(),
                &TransformOptions {
                    z: -3.5,
                    rx: Some(0.5),
                    ry: Some(-0.5),
                    ..Default::default()
                },
            ),
            angle: 0.0,
        }
    }

    fn lighting(&self) -> Lighting {
        Lighting::new(Light::Point {
            position: Point3::new(1.4, 1.1 + self.angle.cos(), 1.5 + self.angle.sin()),
        })
        .with_ambient(Color::new(0.1, 0.1, 0.1))
    }
}

impl Demo for PointLightDemo {
    fn title(&self) -> &'static str {
        "Point light"
    }

    fn description(&self) -> &'static str {
        "Moving point light."
    }

    fn resize(&mut self, aspect: f32) {
        self.projection = self.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.angle += 0.02;
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &self.cube.positions,
            indices: Indices::U16(&self.cube.indices),
            surface: Surface::Colors(self.lighting().shade_mesh(&self.cube, &RED)),
            mvp: matrix::multiply(&self.projection.matrix(), &self.camera),
        }]
    }
}

/// A fine sphere swept by a spot light, seen through a look-at camera
pub struct SpotLightDemo {
    sphere: Mesh,
    camera: Camera,
    angle: f32,
}

impl SpotLightDemo {
    pub fn new(aspect: f32) -> Result<Self, MeshError> {
        Ok(Self {
            sphere: shapes::sphere(40)?,
            camera: Camera::new(Point3::new(0.0, 1.5, 5.0), Point3::origin(), lit_perspective(aspect)),
            angle: 0.0,
        })
    }

    fn lighting(&self) -> Lighting {
        let position = Point3::new(2.0 * self.angle.sin(), 2.0, 2.0);
        Lighting::new(Light::Spot {
            position,
            direction: Point3::origin() - position,
            cutoff: 0.35,
        })
        .with_ambient(Color::new(0.1, 0.1, 0.1))
    }
}

impl Demo for SpotLightDemo {
    fn title(&self) -> &'static str {
        "Spot light"
    }

    fn description(&self) -> &'static str {
        "Moving spot light."
    }

    fn resize(&mut self, aspect: f32) {
        self.camera.projection = self.camera.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.angle += 0.02;
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &self.sphere.positions,
            indices: Indices::U16(&self.sphere.indices),
            surface: Surface::Colors(
                self.lighting()
                    .shade_mesh(&self.sphere, &Color::new(1.0, 1.0, 1.0)),
            ),
            mvp: self.camera.view_projection(),
        }]
    }
}

/// A turning pyramid lit in world space
pub struct PyramidDemo {
    pyramid: Mesh,
    camera: Camera,
    model: Mat4,
    lighting: Lighting,
}

impl PyramidDemo {
    pub fn new(aspect: f32) -> Self {
        Self {
            pyramid: shapes::pyramid(),
            camera: Camera::new(
                Point3::new(0.0, 1.2, 3.0),
                Point3::new(0.0, 0.4, 0.0),
                lit_perspective(aspect),
            ),
            model: matrix::identity(),
            lighting: Lighting::new(Light::Directional {
                direction: Vector3::new(0.5, 1.0, 0.8),
            }),
        }
    }
}

impl Demo for PyramidDemo {
    fn title(&self) -> &'static str {
        "Pyramid"
    }

    fn description(&self) -> &'static str {
        "Square pyramid turning under a fixed light."
    }

    fn resize(&mut self, aspect: f32) {
        self.camera.projection = self.camera.projection.with_aspect(aspect);
    }

    fn update(&mut self) {
        self.model = transform(
            &self.model,
            &TransformOptions {
                ry: Some(0.02),
                ..Default::default()
            },
        );
    }

    fn draw_calls(&self) -> Vec<DrawCall<'_>> {
        vec![DrawCall {
            positions: &self.pyramid.positions,
            indices: Indices::U16(&self.pyramid.indices),
            surface: Surface::Colors(self.lighting.shade_mesh_world(
                &self.pyramid,
                &self.model,
                &Color::new(1.0, 0.8, 0.2),
            )),
            mvp: matrix::multiply(&self.camera.view_projection(), &self.model),
        }]
    }
}
