/// RGB textures sampled by texture coordinates
use crate::lighting::Color;

/// A grid of texels addressed by `(u, v)` in `[0, 1]`.
///
/// Row 0 is the bottom of the image, so `v = 0` samples the bottom edge.
/// Coordinates outside `[0, 1]` repeat, and sampling picks the nearest texel.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Color>,
}

impl Texture {
    /// Build a texture from a texel function of `(column, row)`.
    ///
    /// Zero dimensions are raised to one texel.
    pub fn from_fn<F>(width: usize, height: usize, texel: F) -> Self
    where
        F: Fn(usize, usize) -> Color,
    {
        let width = width.max(1);
        let height = height.max(1);
        let texels = (0..height)
            .flat_map(|row| (0..width).map(move |column| (column, row)))
            .map(|(column, row)| texel(column, row))
            .collect();

        Self {
            width,
            height,
            texels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn texel(&self, column: usize, row: usize) -> Color {
        self.texels[row * self.width + column]
    }

    pub fn sample(&self, u: f32, v: f32) -> Color {
        let column = wrap(u, self.width);
        let row = wrap(v, self.height);
        self.texel(column, row)
    }
}

/// Texel index of a repeating coordinate; NaN lands on texel 0
fn wrap(coord: f32, size: usize) -> usize {
    let scaled = coord.rem_euclid(1.0) * size as f32;
    (scaled as usize).min(size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    #[test]
    fn test_from_fn_rows_start_at_bottom() {
        let texture = Texture::from_fn(2, 2, |column, row| {
            Color::new(column as f32, row as f32, 0.0)
        });
        assert_eq!(texture.sample(0.1, 0.1), Color::new(0.0, 0.0, 0.0));
        assert_eq!(texture.sample(0.9, 0.1), Color::new(1.0, 0.0, 0.0));
        assert_eq!(texture.sample(0.1, 0.9), Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sample_repeats() {
        let texture = Texture::from_fn(2, 2, |column, row| {
            if (column + row) % 2 == 0 {
                BLACK
            } else {
                WHITE
            }
        });
        assert_eq!(texture.sample(0.25, 0.25), BLACK);
        assert_eq!(texture.sample(0.75, 0.25), WHITE);
        assert_eq!(texture.sample(1.25, 0.25), BLACK);
        assert_eq!(texture.sample(-0.25, 0.25), WHITE);
        // The upper edge wraps back onto row 0
        assert_eq!(texture.sample(0.25, 1.0), BLACK);
    }

    #[test]
    fn test_degenerate_inputs() {
        let texture = Texture::from_fn(0, 0, |_, _| WHITE);
        assert_eq!((texture.width(), texture.height()), (1, 1));
        assert_eq!(texture.sample(f32::NAN, 0.5), WHITE);
    }
}
