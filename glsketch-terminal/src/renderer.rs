/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use glsketch_core::{projection, Color, Mat4, Texture};
use nalgebra::{Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A vertex after projection: screen position, NDC depth and the attribute
/// interpolated across the face (a color, or `uv` in the first two lanes)
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    attribute: Vector3<f32>,
}

/// ASCII renderer that rasterizes indexed triangles into terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cull_back_faces: bool,
    depth_buffer: Vec<f32>,
    color_buffer: Vec<Option<Color>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            cull_back_faces: true,
            depth_buffer: vec![f32::INFINITY; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width over height of the character grid, taking cells as twice as
    /// tall as they are wide
    pub fn aspect(&self) -> f32 {
        self.width as f32 / (self.height.max(1) as f32 * 2.0)
    }

    pub fn set_cull_back_faces(&mut self, cull: bool) {
        self.cull_back_faces = cull;
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self {
            cull_back_faces: self.cull_back_faces,
            ..Self::new(width, height)
        };
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.color_buffer.fill(None);
    }

    /// Color stored at a cell, if anything was drawn there
    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.color_buffer[y * self.width + x]
    }

    /// Rasterize triangles given by `indices` into `positions` (`xyz`
    /// triples), with one color per vertex, through the `mvp` matrix.
    pub fn draw_indexed<I>(&mut self, positions: &[f32], indices: I, colors: &[Color], mvp: &Mat4)
    where
        I: IntoIterator<Item = usize>,
    {
        self.draw_faces(positions, indices, mvp, None, |index| colors[index]);
    }

    /// Rasterize triangles whose cells sample `texture` at the texture
    /// coordinates in `uvs` (`uv` pairs, one per vertex).
    ///
    /// Coordinates are interpolated linearly in screen space.
    pub fn draw_textured<I>(
        &mut self,
        positions: &[f32],
        indices: I,
        uvs: &[f32],
        texture: &Texture,
        mvp: &Mat4,
    ) where
        I: IntoIterator<Item = usize>,
    {
        self.draw_faces(positions, indices, mvp, Some(texture), |index| {
            Vector3::new(uvs[index * 2], uvs[index * 2 + 1], 0.0)
        });
    }

    fn draw_faces<I, F>(
        &mut self,
        positions: &[f32],
        indices: I,
        mvp: &Mat4,
        texture: Option<&Texture>,
        attribute: F,
    ) where
        I: IntoIterator<Item = usize>,
        F: Fn(usize) -> Vector3<f32>,
    {
        let mut face = [0usize; 3];
        for (n, index) in indices.into_iter().enumerate() {
            face[n % 3] = index;
            if n % 3 == 2 {
                self.draw_triangle(positions, &face, mvp, texture, &attribute);
            }
        }
    }

    fn draw_triangle<F>(
        &mut self,
        positions: &[f32],
        face: &[usize; 3],
        mvp: &Mat4,
        texture: Option<&Texture>,
        attribute: &F,
    ) where
        F: Fn(usize) -> Vector3<f32>,
    {
        let mut screen = [None; 3];
        for (slot, &index) in screen.iter_mut().zip(face) {
            let point = Point3::from_slice(&positions[index * 3..index * 3 + 3]);
            *slot = projection::project_to_ndc(mvp, &point).map(|ndc| ScreenVertex {
                x: (ndc.x + 1.0) * 0.5 * self.width as f32,
                y: (1.0 - ndc.y) * 0.5 * self.height as f32,
                depth: ndc.z,
                attribute: attribute(index),
            });
        }

        // Any vertex behind the eye drops the triangle
        let [Some(v0), Some(v1), Some(v2)] = screen else {
            return;
        };

        // Counter-clockwise in NDC is clockwise on the y-down screen
        if self.cull_back_faces && signed_area(&v0, &v1, &v2) >= 0.0 {
            return;
        }

        self.rasterize_triangle(&v0, &v1, &v2, texture);
    }

    fn rasterize_triangle(
        &mut self,
        v0: &ScreenVertex,
        v1: &ScreenVertex,
        v2: &ScreenVertex,
        texture: Option<&Texture>,
    ) {
        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }

                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    let value = v0.attribute * w0 + v1.attribute * w1 + v2.attribute * w2;
                    self.color_buffer[idx] = Some(match texture {
                        Some(texture) => texture.sample(value.x, value.y),
                        None => value,
                    });
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (row, cells) in self.color_buffer.chunks(self.width.max(1)).enumerate() {
            if row > 0 {
                writer.queue(Print("\r\n"))?;
            }
            for cell in cells {
                match cell {
                    Some(color) => {
                        writer.queue(SetForegroundColor(to_terminal_color(color)))?;
                        writer.queue(Print(ramp_char(color)))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a ramp character from the brightest channel, so saturated colors
/// still get dense characters
fn ramp_char(color: &Color) -> char {
    let brightness = color.max();
    let index = (brightness.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    // Keep drawn cells visible
    LUMINOSITY_RAMP[index.max(1)]
}

fn to_terminal_color(color: &Color) -> TermColor {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    TermColor::Rgb {
        r: channel(color.x),
        g: channel(color.y),
        b: channel(color.z),
    }
}

/// Twice the signed screen-space area; negative for triangles that were
/// counter-clockwise before the y flip
fn signed_area(v0: &ScreenVertex, v1: &ScreenVertex, v2: &ScreenVertex) -> f32 {
    (v1.x - v0.x) * (v2.y - v0.y) - (v2.x - v0.x) * (v1.y - v0.y)
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glsketch_core::matrix;

    const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    fn filled(renderer: &AsciiRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.color_at(x, y).is_some())
            .count()
    }

    #[test]
    fn test_counter_clockwise_triangle_is_drawn() {
        let mut renderer = AsciiRenderer::new(20, 10);
        let positions = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, -1.0, 1.0, 0.0];
        renderer.draw_indexed(&positions, [0, 1, 2], &[WHITE; 3], &matrix::identity());

        // Lower-left half of the screen
        assert!(renderer.color_at(1, 8).is_some());
        assert!(renderer.color_at(18, 1).is_none());
        let count = filled(&renderer);
        assert!(count > 80 && count < 120);
    }

    #[test]
    fn test_clockwise_triangle_is_culled() {
        let mut renderer = AsciiRenderer::new(20, 10);
        let positions = [-1.0, -1.0, 0.0, -1.0, 1.0, 0.0, 1.0, -1.0, 0.0];
        renderer.draw_indexed(&positions, [0, 1, 2], &[WHITE; 3], &matrix::identity());
        assert_eq!(filled(&renderer), 0);

        renderer.set_cull_back_faces(false);
        renderer.draw_indexed(&positions, [0, 1, 2], &[WHITE; 3], &matrix::identity());
        assert!(filled(&renderer) > 0);
    }

    #[test]
    fn test_depth_test_keeps_nearer_triangle() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);
        let near = [-1.0, -1.0, -0.5, 3.0, -1.0, -0.5, -1.0, 3.0, -0.5];
        let far = [-1.0, -1.0, 0.5, 3.0, -1.0, 0.5, -1.0, 3.0, 0.5];

        renderer.draw_indexed(&near, [0, 1, 2], &[red; 3], &matrix::identity());
        renderer.draw_indexed(&far, [0, 1, 2], &[blue; 3], &matrix::identity());
        assert_eq!(renderer.color_at(5, 5), Some(red));

        renderer.clear();
        assert_eq!(renderer.color_at(5, 5), None);
    }

    #[test]
    fn test_behind_camera_is_dropped() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let mvp = glsketch_core::projection::perspective(1.0, 1.0, 0.1, 10.0);
        let positions = [-1.0, -1.0, 2.0, 1.0, -1.0, 2.0, 0.0, 1.0, 2.0];
        renderer.draw_indexed(&positions, [0, 1, 2], &[WHITE; 3], &mvp);
        assert_eq!(filled(&renderer), 0);
    }

    #[test]
    fn test_colors_interpolate() {
        let mut renderer = AsciiRenderer::new(40, 40);
        let positions = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0];
        let colors = [
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.0, 1.0, 0.0),
            Color::new(0.0, 0.0, 1.0),
        ];
        renderer.draw_indexed(&positions, [0, 1, 2], &colors, &matrix::identity());
        let center = renderer.color_at(20, 26).unwrap();
        assert!(center.x > 0.1 && center.y > 0.1 && center.z > 0.1);
    }

    #[test]
    fn test_textured_quad_samples_by_uv() {
        let mut renderer = AsciiRenderer::new(20, 20);
        let black = Color::zeros();
        // Left half black, right half white
        let texture = Texture::from_fn(2, 1, |column, _| if column == 0 { black } else { WHITE });
        let positions = [-1.0, 1.0, 0.0, -1.0, -1.0, 0.0, 1.0, 1.0, 0.0, 1.0, -1.0, 0.0];
        let uvs = [0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0];

        renderer.draw_textured(&positions, [0, 1, 2, 2, 1, 3], &uvs, &texture, &matrix::identity());
        // Cells on the shared diagonal may fall to either side
        assert!(filled(&renderer) > 380);
        assert_eq!(renderer.color_at(2, 10), Some(black));
        assert_eq!(renderer.color_at(17, 10), Some(WHITE));
    }

    #[test]
    fn test_draw_output() {
        let mut renderer = AsciiRenderer::new(4, 2);
        let positions = [-1.0, -1.0, 0.0, 3.0, -1.0, 0.0, -1.0, 3.0, 0.0];
        renderer.draw_indexed(&positions, [0, 1, 2], &[WHITE; 3], &matrix::identity());

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('@').count(), 8);
    }

    #[test]
    fn test_ramp_char() {
        assert_eq!(ramp_char(&Color::zeros()), '.');
        assert_eq!(ramp_char(&WHITE), '@');
    }
}
