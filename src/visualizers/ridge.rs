use super::{Resizable, Visualization};
use crate::color::Rgba;
use crate::frame::SpectralFrame;
use crate::geometry::{Point, map_range};
use crate::surface::{LinearGradient, Stroke, Surface};
use crate::viewport::{PlotBounds, ViewportLayout};

/// Render ticks between two sampled waves.
pub const WAVE_INTERVAL: u64 = 30;
/// Raw waveform samples skipped between two points of a wave.
pub const SAMPLE_STRIDE: usize = 15;
pub const SCROLL_SPEED: f32 = 0.7;

const OUTER_SCALE: f32 = 1.0;
const INNER_SCALE: f32 = 10.0;

const BOTTOM_COLOR: Rgba = Rgba::opaque(255.0, 0.0, 0.0);
const TOP_COLOR: Rgba = Rgba::opaque(0.0, 0.0, 255.0);

pub type Wave = Vec<Point>;

/// Snapshot of `waveform` in plot coordinates, resting on the plot bottom.
///
/// The outer quarters are drawn at a small amplitude scale and the inner half
/// at a large one.
pub fn sample_wave(waveform: &[f32], bounds: &PlotBounds) -> Wave {
    let len = waveform.len() as f32;
    waveform
        .iter()
        .enumerate()
        .step_by(SAMPLE_STRIDE)
        .map(|(i, &sample)| {
            let pos = i as f32;
            let x = map_range(pos, 0.0, len, bounds.left, bounds.right());
            let scale = if pos < len * 0.25 || pos > len * 0.75 {
                OUTER_SCALE
            } else {
                INNER_SCALE
            };
            let y = map_range(sample, -1.0, 1.0, -scale, scale);
            Point::new(x, bounds.bottom + y)
        })
        .collect()
}

/// Moves a point from one plot into another: x proportionally, y keeping its
/// offset from the bottom edge.
pub fn remap_point(p: Point, from: &PlotBounds, to: &PlotBounds) -> Point {
    Point::new(
        map_range(p.x, from.left, from.right(), to.left, to.right()),
        to.bottom - (from.bottom - p.y),
    )
}

/// Waveform snapshots stacked into a scrolling ridge line plot.
pub struct RidgePlot {
    bounds: PlotBounds,
    waves: Vec<Wave>,
    ticks: u64,
}

impl RidgePlot {
    pub fn new(layout: &ViewportLayout) -> Self {
        Self {
            bounds: layout.ridge,
            waves: Vec::new(),
            ticks: 0,
        }
    }

    /// Buffered waves, oldest first.
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn bounds(&self) -> PlotBounds {
        self.bounds
    }

    fn stroke(&self) -> Stroke {
        Stroke::gradient(
            LinearGradient {
                start: Point::new(self.bounds.left, self.bounds.bottom),
                end: Point::new(self.bounds.left, self.bounds.top),
                from: BOTTOM_COLOR,
                to: TOP_COLOR,
            },
            2.0,
        )
    }
}

impl Visualization for RidgePlot {
    fn name(&self) -> &str {
        "ridgeplot"
    }

    fn render(&mut self, frame: &SpectralFrame, _layout: &ViewportLayout, surface: &mut dyn Surface) {
        self.ticks += 1;
        if self.ticks % WAVE_INTERVAL == 0 {
            let wave = sample_wave(&frame.waveform, &self.bounds);
            if !wave.is_empty() {
                self.waves.push(wave);
            }
        }

        let stroke = self.stroke();
        for wave in &mut self.waves {
            for point in wave.iter_mut() {
                point.y -= SCROLL_SPEED;
            }
            surface.stroke_curve(wave, stroke);
        }

        // Expired waves get this one last draw, then go.
        let top = self.bounds.top;
        self.waves.retain(|wave| wave[0].y >= top);
    }

    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for RidgePlot {
    fn on_viewport_change(&mut self, layout: &ViewportLayout) {
        let from = self.bounds;
        let to = layout.ridge;
        for point in self.waves.iter_mut().flatten() {
            *point = remap_point(*point, &from, &to);
        }
        self.bounds = to;
    }
}
