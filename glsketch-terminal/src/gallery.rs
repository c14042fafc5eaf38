/// Demo trait and the gallery that cycles through demos
use anyhow::ensure;
use glsketch_core::{matrix, transform, Color, Mat4, Texture, TransformOptions};

use crate::renderer::AsciiRenderer;

/// Index buffer of a draw call, in either upload width
#[derive(Debug, Clone, Copy)]
pub enum Indices<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
}

impl Indices<'_> {
    pub fn len(&self) -> usize {
        match self {
            Indices::U8(indices) => indices.len(),
            Indices::U16(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> Indices<'a> {
    fn widened(self) -> Box<dyn Iterator<Item = usize> + 'a> {
        match self {
            Indices::U8(indices) => Box::new(indices.iter().map(|&i| usize::from(i))),
            Indices::U16(indices) => Box::new(indices.iter().map(|&i| usize::from(i))),
        }
    }
}

/// How a draw call fills its triangles
#[derive(Debug, Clone)]
pub enum Surface<'a> {
    /// One color per vertex
    Colors(Vec<Color>),
    /// `uv` pairs per vertex, sampled from the texture
    Textured { uvs: &'a [f32], texture: &'a Texture },
}

/// One indexed draw: vertex positions, how to fill the faces and the full
/// model-view-projection matrix
#[derive(Debug, Clone)]
pub struct DrawCall<'a> {
    pub positions: &'a [f32],
    pub indices: Indices<'a>,
    pub surface: Surface<'a>,
    pub mvp: Mat4,
}

impl DrawCall<'_> {
    /// Number of vertices the surface provides for
    pub fn surface_vertices(&self) -> usize {
        match &self.surface {
            Surface::Colors(colors) => colors.len(),
            Surface::Textured { uvs, .. } => uvs.len() / 2,
        }
    }

    pub fn render(&self, renderer: &mut AsciiRenderer, model: &Mat4) {
        let mvp = matrix::multiply(&self.mvp, model);
        match &self.surface {
            Surface::Colors(colors) => {
                renderer.draw_indexed(self.positions, self.indices.widened(), colors, &mvp)
            }
            Surface::Textured { uvs, texture } => {
                renderer.draw_textured(self.positions, self.indices.widened(), uvs, texture, &mvp)
            }
        }
    }
}

/// A self-contained animated scene
pub trait Demo {
    fn title(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Adapt the projection to a viewport of the given width over height
    fn resize(&mut self, aspect: f32);

    /// Advance the animation by one frame
    fn update(&mut self);

    fn draw_calls(&self) -> Vec<DrawCall<'_>>;
}

/// Demos shown one at a time, cycling in both directions.
///
/// An optional spin is accumulated into an extra model matrix every frame
/// and applied to whatever the current demo draws.
pub struct Gallery {
    demos: Vec<Box<dyn Demo>>,
    current: usize,
    spin: TransformOptions,
    spin_matrix: Mat4,
}

impl Gallery {
    pub fn new(demos: Vec<Box<dyn Demo>>) -> anyhow::Result<Self> {
        ensure!(!demos.is_empty(), "a gallery needs at least one demo");
        Ok(Self {
            demos,
            current: 0,
            spin: TransformOptions::new(),
            spin_matrix: matrix::identity(),
        })
    }

    pub fn with_spin(self, spin: TransformOptions) -> Self {
        Self { spin, ..self }
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &dyn Demo {
        self.demos[self.current].as_ref()
    }

    pub fn select(&mut self, index: usize) -> anyhow::Result<()> {
        ensure!(
            index < self.demos.len(),
            "no demo {} (the gallery has {})",
            index,
            self.demos.len()
        );
        self.show(index);
        Ok(())
    }

    pub fn next(&mut self) {
        self.show((self.current + 1) % self.demos.len());
    }

    pub fn previous(&mut self) {
        self.show((self.current + self.demos.len() - 1) % self.demos.len());
    }

    fn show(&mut self, index: usize) {
        self.current = index;
        self.spin_matrix = matrix::identity();
        log::info!("showing demo {}: {}", index, self.current().title());
    }

    pub fn resize(&mut self, aspect: f32) {
        log::debug!("viewport aspect {:.3}", aspect);
        for demo in &mut self.demos {
            demo.resize(aspect);
        }
    }

    pub fn update(&mut self) {
        self.demos[self.current].update();
        if !self.spin.is_identity() {
            self.spin_matrix = transform(&self.spin_matrix, &self.spin);
        }
    }

    pub fn render(&self, renderer: &mut AsciiRenderer) {
        for call in self.current().draw_calls() {
            call.render(renderer, &self.spin_matrix);
        }
    }
}
