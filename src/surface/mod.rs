//! Drawing primitives the visualizations paint through.
//!
//! Visualizations never touch the terminal directly: they draw onto a
//! [`Surface`], which is either a [`Scene`] recorded for rasterization or a
//! test double.

use crate::color::Rgba;
use crate::geometry::{self, Path, Point, Rect};

pub mod scene;
pub mod terminal;

pub use scene::{DrawCommand, Scene};

/// Linear gradient between two anchor points. Colors are clamped past the ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub from: Rgba,
    pub to: Rgba,
}

impl LinearGradient {
    pub fn at(&self, p: Point) -> Rgba {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return self.from;
        }
        let t = ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len2;
        self.from.lerp(self.to, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

impl Paint {
    pub fn at(&self, p: Point) -> Rgba {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => g.at(p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub weight: f32,
}

impl Stroke {
    pub fn solid(color: Rgba, weight: f32) -> Self {
        Self {
            paint: Paint::Solid(color),
            weight,
        }
    }

    pub fn gradient(gradient: LinearGradient, weight: f32) -> Self {
        Self {
            paint: Paint::Linear(gradient),
            weight,
        }
    }
}

pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Rgba);

    /// Axis-aligned ellipse; `width`/`height` are diameters.
    fn fill_ellipse(&mut self, center: Point, width: f32, height: f32, color: Rgba);

    /// Elliptical arc from `start` to `stop` radians, clockwise on screen.
    fn stroke_arc(
        &mut self,
        center: Point,
        width: f32,
        height: f32,
        angles: (f32, f32),
        stroke: Stroke,
    );

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke);

    fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke);

    fn fill_polygon(&mut self, points: &[Point], color: Rgba);

    fn text(&mut self, at: Point, text: &str, color: Rgba);

    /// Smooth curve through every point.
    fn stroke_curve(&mut self, points: &[Point], stroke: Stroke) {
        let flat = geometry::curve_through(points, geometry::CURVE_STEPS);
        self.stroke_polyline(&flat, stroke);
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        let flat = path.flatten(geometry::CURVE_STEPS);
        self.stroke_polyline(&flat, stroke);
    }
}
