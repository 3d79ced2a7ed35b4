use std::f32::consts::PI;

use super::{Resizable, Visualization};
use crate::color::Rgba;
use crate::frame::SpectralFrame;
use crate::geometry::{Point, lerp, polar};
use crate::surface::Surface;
use crate::viewport::{RadialFrame, ViewportLayout};

/// Tunes one octave to exactly one turn of the spiral.
pub const CALIBRATION: f32 = 9.065;
pub const TOTAL_CELLS: usize = 2048;

const CELL_WIDTH: f32 = 1.0;
const CELL_DEPTH: f32 = 1.0;
const MIN_SLICES: f32 = 4.0;
const MAX_OUTER_SLICE: f32 = 0.5;

const COLD: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
const WARM: Rgba = Rgba::opaque(255.0, 0.0, 64.0);

fn octave_scale() -> f32 {
    CALIBRATION / (2.0 * PI)
}

/// Logarithmic position of a frequency bin: octaves are equally spaced.
pub fn note(freq: f32) -> f32 {
    freq.log2() * octave_scale()
}

/// Smooth black-to-crimson gradient mixed with a cubic "hot" highlight.
pub fn spectrogram_color(val: f32) -> Rgba {
    let base = COLD.lerp(WARM, val);

    let mut heat = val * (val * 0.8 + 0.2);
    heat = 2.0 * heat - 0.8;
    let cube = (1.0 - heat).powi(3);
    let red = (heat * 3.0).max(0.0);
    let green = if heat < 0.0 { 0.0 } else { heat * heat * 3.0 - 0.5 };
    let blue = (cube * 3.0 - 2.0) * (10.0 * heat);
    let hot = Rgba::rgb(255.0 * red, 255.0 * green, 255.0 * blue);

    base.lerp(hot, 0.6)
}

/// Spectrum wrapped onto a logarithmic spiral, one annular wedge per bin.
pub struct RadialSpectrogram {
    frame: RadialFrame,
    cells: usize,
}

impl RadialSpectrogram {
    pub fn new(layout: &ViewportLayout) -> Self {
        Self {
            frame: layout.radial,
            cells: TOTAL_CELLS,
        }
    }

    /// Number of leading bins drawn for a spectrum of `len` bins.
    pub fn amount(&self, len: usize) -> usize {
        self.cells * len / TOTAL_CELLS
    }

    fn wedge(&self, bin: usize, level: u32, ring_unit: f32) -> Vec<Point> {
        let scale = octave_scale();
        let center = self.frame.center;
        let lo = bin as f32 + 0.5 - 0.5 * CELL_WIDTH;
        let hi = bin as f32 + 0.5 + 0.5 * CELL_WIDTH;

        let a0 = 2.0 * PI * note(lo);
        let a1 = 2.0 * PI * note(hi);
        let inner0 = ring_unit * lo.log2() * scale;
        let inner1 = ring_unit * hi.log2() * scale;
        let outer0 = inner0 + ring_unit * CELL_DEPTH;
        let outer1 = inner1 + ring_unit * CELL_DEPTH;

        let inner_step = 2f32.powi(level as i32 - 2) / MIN_SLICES;
        let outer_step = (inner_step * 0.5).min(MAX_OUTER_SLICE);

        let mut pts = vec![polar(center, outer0, a0)];
        let mut s = outer_step;
        while s < 1.0 {
            pts.push(polar(center, lerp(outer0, outer1, s), lerp(a0, a1, s)));
            s += outer_step;
        }
        pts.push(polar(center, outer1, a1));
        pts.push(polar(center, inner1, a1));
        let mut s = inner_step;
        while s < 1.0 {
            pts.push(polar(center, lerp(inner1, inner0, s), lerp(a1, a0, s)));
            s += inner_step;
        }
        pts.push(polar(center, inner0, a0));
        pts
    }
}

impl Visualization for RadialSpectrogram {
    fn name(&self) -> &str {
        "spectrogram"
    }

    fn render(&mut self, frame: &SpectralFrame, _layout: &ViewportLayout, surface: &mut dyn Surface) {
        let spectrum = &frame.spectrum;
        let Some(&dc) = spectrum.first() else {
            return;
        };
        let amount = self.amount(spectrum.len());
        let rmax = note(spectrum.len() as f32) + 1.0;
        let ring_unit = self.frame.unit / rmax;

        let hub = 2.0 * octave_scale() * ring_unit * CELL_DEPTH;
        surface.fill_ellipse(self.frame.center, hub, hub, spectrogram_color(dc / 255.0));

        // Bins are walked one octave at a time; higher octaves get coarser edges.
        let mut level = 0u32;
        while (1usize << level) < amount {
            let first = 1usize << level;
            let end = (first << 1).min(amount);
            for bin in first..end {
                let color = spectrogram_color(spectrum[bin] / 255.0);
                surface.fill_polygon(&self.wedge(bin, level, ring_unit), color);
            }
            level += 1;
        }
    }

    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for RadialSpectrogram {
    fn on_viewport_change(&mut self, layout: &ViewportLayout) {
        self.frame = layout.radial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_octave_is_one_calibrated_turn() {
        let turn = 2.0 * PI * (note(64.0) - note(32.0));
        assert!((turn - CALIBRATION).abs() < 1e-4);
    }

    #[test]
    fn zero_magnitude_is_black() {
        assert_eq!(spectrogram_color(0.0), Rgba::opaque(0.0, 0.0, 0.0));
    }

    #[test]
    fn full_magnitude_is_hot() {
        let c = spectrogram_color(1.0);
        assert!(c.r > 200.0);
        assert!(c.b >= 0.0 && c.g >= 0.0);
    }

    #[test]
    fn coarse_levels_clamp_outer_slices() {
        let layout = ViewportLayout::new(crate::viewport::Viewport::new(200.0, 200.0));
        let radial = RadialSpectrogram::new(&layout);
        // level 0: 16 inner steps and 32 outer steps plus the four corners
        assert_eq!(radial.wedge(1, 0, 5.0).len(), 31 + 15 + 4);
        // level 10: inner step exceeds one, outer step clamps to a half
        assert_eq!(radial.wedge(1024, 10, 5.0).len(), 1 + 4);
    }
}
