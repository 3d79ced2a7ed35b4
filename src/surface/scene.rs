use super::{Stroke, Surface};
use crate::color::Rgba;
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        corner_radius: f32,
        color: Rgba,
    },
    FillEllipse {
        center: Point,
        width: f32,
        height: f32,
        color: Rgba,
    },
    StrokeArc {
        center: Point,
        width: f32,
        height: f32,
        start: f32,
        stop: f32,
        stroke: Stroke,
    },
    StrokeLine {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    StrokePolyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Rgba,
    },
    Text {
        at: Point,
        text: String,
        color: Rgba,
    },
}

/// Draw commands recorded in paint order.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every fill color in paint order, strokes excluded.
    pub fn fill_colors(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillRect { color, .. }
            | DrawCommand::FillEllipse { color, .. }
            | DrawCommand::FillPolygon { color, .. } => Some(*color),
            _ => None,
        })
    }
}

impl Surface for Scene {
    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            corner_radius,
            color,
        });
    }

    fn fill_ellipse(&mut self, center: Point, width: f32, height: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            width,
            height,
            color,
        });
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        width: f32,
        height: f32,
        (start, stop): (f32, f32),
        stroke: Stroke,
    ) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            width,
            height,
            start,
            stop,
            stroke,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands
            .push(DrawCommand::StrokeLine { from, to, stroke });
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke) {
        if points.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn text(&mut self, at: Point, text: &str, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color,
        });
    }
}
