//! Identity-color generation for launched particles
//!
//! The physics treats a particle's color as an opaque tag; everything here
//! exists for the rendering collaborator. Color generation is a capability
//! (`ColorSource`) with interchangeable variants: uniformly random hues fed
//! by the rendering RNG, or a deterministic fixed-step hue roll.

use crate::utils::rng::RenderingRng;
use rand::Rng;

/// HSB color with alpha. Hue in degrees `[0, 360)`; saturation, brightness,
/// and alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Color {
    pub fn hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        Self::hsba(hue, saturation, brightness, 1.0)
    }

    pub fn hsba(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            alpha,
        }
    }

    /// Alpha-scaled copy, for fading trail segments.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Convert to normalized RGBA for renderers that want component colors.
    pub fn to_rgba(self) -> (f32, f32, f32, f32) {
        let hue = self.hue.rem_euclid(360.0) / 60.0;
        let chroma = self.brightness * self.saturation;
        let x = chroma * (1.0 - ((hue % 2.0) - 1.0).abs());
        let m = self.brightness - chroma;

        let (r, g, b) = match hue as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        (r + m, g + m, b + m, self.alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::hsb(0.0, 0.0, 1.0)
    }
}

/// A stream of identity colors for newly launched particles.
pub trait ColorSource: Send {
    fn next_color(&mut self) -> Color;
}

/// Uniformly random hue with the observed launch-path saturation and
/// brightness/alpha tuning.
pub struct RandomColorSource {
    rng: RenderingRng,
}

impl RandomColorSource {
    pub fn new(rng: RenderingRng) -> Self {
        Self { rng }
    }
}

impl ColorSource for RandomColorSource {
    fn next_color(&mut self) -> Color {
        let hue = self.rng.random_range(0.0..360.0);
        Color::hsba(hue, 1.0, 0.95, 0.95)
    }
}

/// Deterministic hue roll: each launch advances the hue by a fixed offset.
pub struct RollColorSource {
    hue: f32,
    offset: f32,
}

impl RollColorSource {
    pub fn new(offset: f32) -> Self {
        Self { hue: 0.0, offset }
    }
}

impl ColorSource for RollColorSource {
    fn next_color(&mut self) -> Color {
        let color = Color::hsb(self.hue, 1.0, 1.0);
        self.hue = (self.hue + self.offset).rem_euclid(360.0);
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba_primaries() {
        let (r, g, b, a) = Color::hsb(0.0, 1.0, 1.0).to_rgba();
        assert_eq!((r, g, b, a), (1.0, 0.0, 0.0, 1.0));

        let (r, g, b, _) = Color::hsb(120.0, 1.0, 1.0).to_rgba();
        assert_eq!((r, g, b), (0.0, 1.0, 0.0));

        let (r, g, b, _) = Color::hsb(240.0, 1.0, 1.0).to_rgba();
        assert_eq!((r, g, b), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_to_rgba_desaturated_is_gray() {
        let (r, g, b, _) = Color::hsb(200.0, 0.0, 0.5).to_rgba();
        assert_eq!(r, 0.5);
        assert_eq!(g, 0.5);
        assert_eq!(b, 0.5);
    }

    #[test]
    fn test_hue_wraps_in_conversion() {
        assert_eq!(Color::hsb(360.0, 1.0, 1.0).to_rgba(), Color::hsb(0.0, 1.0, 1.0).to_rgba());
        assert_eq!(Color::hsb(-120.0, 1.0, 1.0).to_rgba(), Color::hsb(240.0, 1.0, 1.0).to_rgba());
    }

    #[test]
    fn test_roll_source_steps_deterministically() {
        let mut source = RollColorSource::new(17.0);

        assert_eq!(source.next_color().hue, 0.0);
        assert_eq!(source.next_color().hue, 17.0);
        assert_eq!(source.next_color().hue, 34.0);
    }

    #[test]
    fn test_roll_source_wraps_past_full_circle() {
        let mut source = RollColorSource::new(100.0);
        let hues: Vec<f32> = (0..5).map(|_| source.next_color().hue).collect();

        assert_eq!(hues, vec![0.0, 100.0, 200.0, 300.0, 40.0]);
    }

    #[test]
    fn test_random_source_is_seed_deterministic() {
        let mut a = RandomColorSource::new(RenderingRng::from_seed(7));
        let mut b = RandomColorSource::new(RenderingRng::from_seed(7));

        for _ in 0..10 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn test_random_source_matches_observed_tuning() {
        let mut source = RandomColorSource::new(RenderingRng::from_seed(3));
        for _ in 0..100 {
            let color = source.next_color();
            assert!((0.0..360.0).contains(&color.hue));
            assert_eq!(color.saturation, 1.0);
            assert_eq!(color.brightness, 0.95);
            assert_eq!(color.alpha, 0.95);
        }
    }

    #[test]
    fn test_with_alpha_preserves_hue() {
        let color = Color::hsb(42.0, 1.0, 1.0).with_alpha(0.25);
        assert_eq!(color.hue, 42.0);
        assert_eq!(color.alpha, 0.25);
    }
}
