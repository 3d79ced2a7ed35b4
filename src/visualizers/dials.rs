use std::f32::consts::PI;

use super::{Resizable, Visualization};
use crate::color::Rgba;
use crate::frame::{FrequencyBand, SpectralFrame};
use crate::geometry::{Point, Rect, map_range};
use crate::surface::{Stroke, Surface};
use crate::viewport::{DialGrid, ViewportLayout};

pub const MIN_ANGLE: f32 = PI + PI / 10.0;
pub const MAX_ANGLE: f32 = 2.0 * PI - PI / 10.0;
pub const TICK_COUNT: usize = 9;

const TICK_LENGTH: f32 = 5.0;
const HUB_DIAMETER: f32 = 20.0;

/// Bands in grid order: left-to-right, then top-to-bottom.
pub const BANDS: [FrequencyBand; 4] = [
    FrequencyBand::Bass,
    FrequencyBand::LowMid,
    FrequencyBand::HighMid,
    FrequencyBand::Treble,
];

const PANEL: Rgba = Rgba::hex(0xf5c9d0);
const INK: Rgba = Rgba::hex(0x333333);

pub fn needle_angle(energy: f32) -> f32 {
    map_range(energy.clamp(0.0, 255.0), 0.0, 255.0, MIN_ANGLE, MAX_ANGLE)
}

pub fn tick_angles() -> [f32; TICK_COUNT] {
    std::array::from_fn(|i| MIN_ANGLE + i as f32 * PI / 10.0)
}

/// Four analogue-style meters, one per frequency band, in a 2x2 grid.
pub struct DialCluster {
    grid: DialGrid,
}

impl DialCluster {
    pub fn new(layout: &ViewportLayout) -> Self {
        Self { grid: layout.dials }
    }

    pub fn grid(&self) -> DialGrid {
        self.grid
    }

    fn ticks(&self, surface: &mut dyn Surface, hub: Point, label: &str) {
        let ink = Stroke::solid(INK, 1.0);
        surface.stroke_arc(hub, HUB_DIAMETER, HUB_DIAMETER, (PI, 2.0 * PI), ink);
        surface.text(
            Point::new(hub.x, hub.y - self.grid.cell_height / 2.0),
            label,
            INK,
        );

        let outer = self.grid.dial_radius;
        let inner = (outer - TICK_LENGTH).max(0.0);
        for angle in tick_angles() {
            let (sin, cos) = angle.sin_cos();
            surface.stroke_line(
                Point::new(hub.x + outer * cos, hub.y + outer * sin),
                Point::new(hub.x + inner * cos, hub.y + inner * sin),
                ink,
            );
        }
    }

    fn needle(&self, surface: &mut dyn Surface, hub: Point, energy: f32) {
        let (sin, cos) = needle_angle(energy).sin_cos();
        let r = self.grid.dial_radius;
        surface.stroke_line(
            hub,
            Point::new(hub.x + r * cos, hub.y + r * sin),
            Stroke::solid(INK, 1.0),
        );
    }
}

impl Visualization for DialCluster {
    fn name(&self) -> &str {
        "needles"
    }

    fn render(&mut self, frame: &SpectralFrame, _layout: &ViewportLayout, surface: &mut dyn Surface) {
        let g = self.grid;
        let (w, h) = (g.cell_width - g.pad, g.cell_height - g.pad);
        let mut bands = BANDS.iter();

        for row in 0..DialGrid::DOWN {
            for col in 0..DialGrid::ACROSS {
                let Some(&band) = bands.next() else {
                    return;
                };
                let x = g.pad + col as f32 * g.cell_width;
                let y = g.pad + row as f32 * g.cell_height;
                surface.fill_rect(Rect::new(x, y, w.max(0.0), h.max(0.0)), 0.0, PANEL);

                let hub = Point::new(x + w / 2.0, y + h);
                self.ticks(surface, hub, band.label());
                self.needle(surface, hub, frame.energy(band));
            }
        }
    }

    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for DialCluster {
    fn on_viewport_change(&mut self, layout: &ViewportLayout) {
        self.grid = layout.dials;
    }
}
