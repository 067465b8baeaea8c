//! Glow billboard types
//!
//! Glow sprites are camera-facing quads drawn additively over the translucent
//! pass. The light core only decides where and how large; orientation is left
//! to the sprite renderer.

use crate::foundation::math::{Mat4, Vec3};

/// Blend mode for sprite rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blending (fully opaque)
    Opaque,

    /// Standard alpha blending
    #[default]
    AlphaBlend,

    /// Additive blending (for glowing effects)
    Additive,
}

/// One glow billboard
#[derive(Debug, Clone, PartialEq)]
pub struct GlowSprite {
    /// Model-to-world transform
    pub transform: Mat4,
    /// Primitive color (RGBA)
    pub color: [u8; 4],
}

impl GlowSprite {
    /// Sprite centered on `position`, uniformly scaled
    pub fn new(position: Vec3, scale: f32, color: [u8; 4]) -> Self {
        Self {
            transform: calculate_glow_matrix(position, scale),
            color,
        }
    }
}

/// Translate to `position`, then scale uniformly
pub fn calculate_glow_matrix(position: Vec3, scale: f32) -> Mat4 {
    Mat4::new_translation(&position) * Mat4::new_scaling(scale)
}

/// Sink for billboard sprites
pub trait SpriteRenderer {
    /// Set up render state for the sprites that follow
    fn begin_batch(&mut self, blend: BlendMode);

    /// Draw one sprite
    fn draw_sprite(&mut self, sprite: &GlowSprite);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_glow_matrix_scales_about_center() {
        let matrix = calculate_glow_matrix(Vec3::new(10.0, 20.0, 30.0), 0.5);

        let center = matrix * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(center, Vec4::new(10.0, 20.0, 30.0, 1.0));

        let corner = matrix * Vec4::new(2.0, -2.0, 0.0, 1.0);
        assert_relative_eq!(corner, Vec4::new(11.0, 19.0, 30.0, 1.0));
    }
}
