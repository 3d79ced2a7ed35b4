//! RGBA colors with channel values in `0..=255`, plus interpolation helpers.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::opaque(255.0, 255.0, 255.0);

    /// Builds a color without clamping. Only use with known in-range values.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 255.0 }
    }

    /// Builds a color, clamping every channel into `0..=255`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 255.0)
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn hex(value: u32) -> Self {
        Self::opaque(
            ((value >> 16) & 0xff) as f32,
            ((value >> 8) & 0xff) as f32,
            (value & 0xff) as f32,
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: clamp_channel(a),
            ..self
        }
    }

    /// Per-channel interpolation, alpha included. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Terminal color, with alpha premultiplied against a black background.
    pub fn to_terminal(self) -> Color {
        let k = self.a / 255.0;
        Color::Rgb(
            (self.r * k).round() as u8,
            (self.g * k).round() as u8,
            (self.b * k).round() as u8,
        )
    }
}

fn clamp_channel(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 255.0) }
}

/// Piecewise-linear ramp over ordered `(position, color)` stops.
///
/// A value sitting exactly on a stop resolves to the segment below it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<(f32, Rgba)>,
}

impl ColorRamp {
    pub fn new(stops: Vec<(f32, Rgba)>) -> Self {
        Self { stops }
    }

    pub fn sample(&self, amt: f32) -> Rgba {
        let Some(&(_, first)) = self.stops.first() else {
            return Rgba::BLACK;
        };
        for pair in self.stops.windows(2) {
            let (lo, from) = pair[0];
            let (hi, to) = pair[1];
            if amt <= hi {
                let span = hi - lo;
                let t = if span > 0.0 { (amt - lo) / span } else { 1.0 };
                return from.lerp(to, t);
            }
        }
        self.stops.last().map_or(first, |&(_, c)| c)
    }
}
