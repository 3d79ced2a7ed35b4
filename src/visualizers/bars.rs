use std::sync::LazyLock;

use super::Visualization;
use crate::color::{ColorRamp, Rgba};
use crate::frame::SpectralFrame;
use crate::geometry::{Rect, map_range};
use crate::surface::Surface;
use crate::viewport::ViewportLayout;

const BAR_OVERLAP: f32 = 5.0;
const CORNER_RADIUS: f32 = 70.0;

static BAR_RAMP: LazyLock<ColorRamp> = LazyLock::new(|| {
    ColorRamp::new(vec![
        (0.2, Rgba::opaque(238.0, 175.0, 97.0)),
        (0.4, Rgba::opaque(251.0, 144.0, 98.0)),
        (0.6, Rgba::opaque(238.0, 93.0, 108.0)),
        (0.8, Rgba::opaque(206.0, 73.0, 147.0)),
        (1.0, Rgba::opaque(106.0, 13.0, 131.0)),
    ])
});

/// Fill color for a normalized magnitude.
pub fn bar_color(amt: f32) -> Rgba {
    BAR_RAMP.sample(amt)
}

/// One horizontal bar per spectrum bin, stacked top to bottom.
pub struct SpectrumBars;

impl Visualization for SpectrumBars {
    fn name(&self) -> &str {
        "spectrum"
    }

    fn render(&mut self, frame: &SpectralFrame, layout: &ViewportLayout, surface: &mut dyn Surface) {
        let bins = frame.spectrum.len();
        let (width, height) = (layout.width(), layout.height());
        let bar_height = height / bins as f32 + BAR_OVERLAP;

        for (i, &magnitude) in frame.spectrum.iter().enumerate() {
            let color = bar_color(magnitude / 255.0);
            let y = map_range(i as f32, 0.0, bins as f32, 0.0, height);
            let w = map_range(magnitude, 0.0, 255.0, 0.0, width);
            surface.fill_rect(Rect::new(0.0, y, w, bar_height), CORNER_RADIUS, color);
        }
    }
}
