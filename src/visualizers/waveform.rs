use super::Visualization;
use crate::color::Rgba;
use crate::frame::SpectralFrame;
use crate::geometry::{Path, Point, map_range};
use crate::surface::{Stroke, Surface};
use crate::viewport::ViewportLayout;

pub const DEFAULT_SMOOTHNESS: usize = 8;

/// Triangular-weighted moving average with truncated, renormalized edge windows.
pub fn smooth_wave(wave: &[f32], half_width: usize) -> Vec<f32> {
    let len = wave.len();
    let hw = half_width as isize;
    (0..len)
        .map(|i| {
            let mut sum = 0.0;
            let mut weight_sum = 0.0;
            for j in -hw..=hw {
                let idx = i as isize + j;
                if idx < 0 || idx >= len as isize {
                    continue;
                }
                let weight = (hw + 1 - j.abs()) as f32;
                sum += wave[idx as usize] * weight;
                weight_sum += weight;
            }
            sum / weight_sum
        })
        .collect()
}

/// Bezier path through every other sample, spanning the whole viewport.
///
/// `None` for an empty wave.
pub fn wave_path(wave: &[f32], layout: &ViewportLayout) -> Option<Path> {
    let len = wave.len();
    let (width, height) = (layout.width(), layout.height());
    let at = |i: usize| {
        Point::new(
            map_range(i as f32, 0.0, len as f32, 0.0, width),
            map_range(wave[i], -1.0, 1.0, 0.0, height),
        )
    };

    let first = wave.first()?;
    let mut path = Path::new(Point::new(0.0, map_range(*first, -1.0, 1.0, 0.0, height)));
    let mut i = 1;
    while i + 2 < len {
        let current = at(i);
        let next = at(i + 1);
        let after = at(i + 2);
        let c1 = Point::new((current.x + next.x) / 2.0, current.y);
        let c2 = Point::new((next.x + after.x) / 2.0, next.y);
        path.cubic_to(c1, c2, after);
        i += 2;
    }
    path.line_to(at(len - 1));
    Some(path)
}

/// The smoothed waveform as a single continuous curve.
pub struct WaveCurve {
    smoothness: usize,
}

impl WaveCurve {
    pub fn new(smoothness: usize) -> Self {
        Self { smoothness }
    }
}

impl Default for WaveCurve {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHNESS)
    }
}

impl Visualization for WaveCurve {
    fn name(&self) -> &str {
        "wavepattern"
    }

    fn render(&mut self, frame: &SpectralFrame, layout: &ViewportLayout, surface: &mut dyn Surface) {
        let wave = smooth_wave(&frame.waveform, self.smoothness);
        if let Some(path) = wave_path(&wave, layout) {
            surface.stroke_path(&path, Stroke::solid(Rgba::opaque(255.0, 0.0, 0.0), 2.0));
        }
    }
}
