//! Canvas dimensions and every size-dependent geometry constant derived from them.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Negative or NaN dimensions collapse to zero.
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_nan() { 0.0 } else { v.max(0.0) };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// 2x2 dial grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGrid {
    pub pad: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub dial_radius: f32,
}

impl DialGrid {
    pub const ACROSS: usize = 2;
    pub const DOWN: usize = 2;

    fn from_viewport(vp: Viewport) -> Self {
        let pad = vp.width / 20.0;
        let cell_width = ((vp.width - pad) / Self::ACROSS as f32).max(0.0);
        let cell_height = ((vp.height - pad) / Self::DOWN as f32).max(0.0);
        Self {
            pad,
            cell_width,
            cell_height,
            dial_radius: ((cell_width - pad) / 2.0 - 5.0).max(0.0),
        }
    }
}

/// Ridge plot area: waves are born on `bottom` and expire above `top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    pub left: f32,
    pub width: f32,
    pub bottom: f32,
    pub top: f32,
}

impl PlotBounds {
    fn from_viewport(vp: Viewport) -> Self {
        let top = vp.height / 5.0;
        Self {
            left: vp.width / 5.0,
            width: vp.width / 5.0 * 3.0,
            bottom: vp.height - top,
            top,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

/// Radial plot: centre and the radius budget shared by all rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialFrame {
    pub center: Point,
    pub unit: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportLayout {
    pub viewport: Viewport,
    pub dials: DialGrid,
    pub ridge: PlotBounds,
    pub radial: RadialFrame,
}

impl ViewportLayout {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            dials: DialGrid::from_viewport(viewport),
            ridge: PlotBounds::from_viewport(viewport),
            radial: RadialFrame {
                center: viewport.center(),
                unit: viewport.height / 4.0,
            },
        }
    }

    pub fn width(&self) -> f32 {
        self.viewport.width
    }

    pub fn height(&self) -> f32 {
        self.viewport.height
    }
}
