//! Procedural textures for material albedo.

use crate::Color;
use std::sync::Arc;
use umbra_math::Vec3;

/// A texture evaluated at a surface point.
#[derive(Debug, Clone)]
pub enum Texture {
    /// Constant color everywhere.
    Solid(Color),
    /// 3D checker pattern alternating between two sub-textures.
    Checker {
        inv_scale: f32,
        even: Arc<Texture>,
        odd: Arc<Texture>,
    },
}

impl Texture {
    /// Create a solid color texture.
    pub fn solid(color: Color) -> Self {
        Texture::Solid(color)
    }

    /// Create a checker texture with cells of edge length `scale`.
    pub fn checker(scale: f32, even: Texture, odd: Texture) -> Self {
        Texture::Checker {
            inv_scale: 1.0 / scale,
            even: Arc::new(even),
            odd: Arc::new(odd),
        }
    }

    /// Checker texture between two solid colors.
    pub fn checker_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::checker(scale, Texture::Solid(even), Texture::Solid(odd))
    }

    /// Evaluate the texture at surface coordinates `(u, v)` and point `p`.
    pub fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checker {
                inv_scale,
                even,
                odd,
            } => {
                let cell = (*inv_scale * p).floor();
                let parity = (cell.x as i64 + cell.y as i64 + cell.z as i64).rem_euclid(2);
                if parity == 0 {
                    even.value(u, v, p)
                } else {
                    odd.value(u, v, p)
                }
            }
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::Solid(color)
    }
}
