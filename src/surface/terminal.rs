//! Rasterizes a recorded [`Scene`] onto a ratatui canvas.
//!
//! The canvas must be configured with `x_bounds([0, width])` and
//! `y_bounds([0, height])` in viewport units. Canvas y grows upward, so every
//! point is flipped on the way in.

use ratatui::{
    style::{Color, Style},
    text::Span,
    widgets::canvas::{Context, Line, Painter, Shape},
};

use super::{DrawCommand, Scene, Stroke};
use crate::geometry::{Point, Rect};
use crate::viewport::Viewport;

/// Extra parallel passes drawn on either side of a thick stroke.
const MAX_STROKE_SPREAD: i32 = 3;

pub fn paint_scene(ctx: &mut Context, scene: &Scene, viewport: Viewport) {
    ctx.draw(&SceneLayer { scene, viewport });
    for cmd in scene.commands() {
        if let DrawCommand::Text { at, text, color } = cmd {
            let y = (viewport.height - at.y) as f64;
            ctx.print(
                at.x as f64,
                y,
                Span::styled(text.clone(), Style::default().fg(color.to_terminal())),
            );
        }
    }
}

pub struct SceneLayer<'s> {
    pub scene: &'s Scene,
    pub viewport: Viewport,
}

impl Shape for SceneLayer<'_> {
    fn draw(&self, painter: &mut Painter) {
        if self.viewport.is_empty() {
            return;
        }
        let mut raster = Raster {
            painter,
            width: self.viewport.width,
            height: self.viewport.height,
        };
        for cmd in self.scene.commands() {
            raster.command(cmd);
        }
    }
}

struct Raster<'p, 'a, 'b> {
    painter: &'p mut Painter<'a, 'b>,
    width: f32,
    height: f32,
}

impl Raster<'_, '_, '_> {
    fn command(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::FillRect {
                rect,
                corner_radius,
                color,
            } => self.fill_rect(*rect, *corner_radius, color.to_terminal()),
            DrawCommand::FillEllipse {
                center,
                width,
                height,
                color,
            } => self.fill_ellipse(*center, *width / 2.0, *height / 2.0, color.to_terminal()),
            DrawCommand::StrokeArc {
                center,
                width,
                height,
                start,
                stop,
                stroke,
            } => {
                let (rx, ry) = (*width / 2.0, *height / 2.0);
                let steps = ((stop - start).abs() * rx.max(ry)).ceil().clamp(4.0, 256.0) as usize;
                let points: Vec<Point> = (0..=steps)
                    .map(|k| {
                        let t = start + (stop - start) * k as f32 / steps as f32;
                        Point::new(center.x + rx * t.cos(), center.y + ry * t.sin())
                    })
                    .collect();
                self.polyline(&points, stroke);
            }
            DrawCommand::StrokeLine { from, to, stroke } => {
                let color = stroke.paint.at(from.lerp(*to, 0.5)).to_terminal();
                self.line(*from, *to, stroke.weight, color);
            }
            DrawCommand::StrokePolyline { points, stroke } => self.polyline(points, stroke),
            DrawCommand::FillPolygon { points, color } => {
                self.fill_polygon(points, color.to_terminal())
            }
            DrawCommand::Text { .. } => {}
        }
    }

    fn plot(&mut self, x: f32, y: f32, color: Color) {
        if let Some((cx, cy)) = self.painter.get_point(x as f64, (self.height - y) as f64) {
            self.painter.paint(cx, cy, color);
        }
    }

    fn span(&mut self, y: f32, x0: f32, x1: f32, color: Color) {
        let x0 = x0.max(0.0);
        let x1 = x1.min(self.width);
        let mut x = x0;
        while x <= x1 {
            self.plot(x, y, color);
            x += 1.0;
        }
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: f32, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let r = corner_radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let bottom = rect.y + rect.height;
        let mut painted = false;
        for yc in rows(self.height, rect.y, bottom) {
            if yc < rect.y || yc > bottom {
                continue;
            }
            let d = if yc < rect.y + r {
                rect.y + r - yc
            } else if yc > bottom - r {
                yc - (bottom - r)
            } else {
                0.0
            };
            let inset = if d > 0.0 { r - (r * r - d * d).max(0.0).sqrt() } else { 0.0 };
            self.span(yc, rect.x + inset, rect.x + rect.width - inset, color);
            painted = true;
        }
        if !painted {
            self.span(rect.y, rect.x, rect.x + rect.width, color);
        }
    }

    fn fill_ellipse(&mut self, center: Point, rx: f32, ry: f32, color: Color) {
        if rx < 0.5 || ry < 0.5 {
            self.plot(center.x, center.y, color);
            return;
        }
        for yc in rows(self.height, center.y - ry, center.y + ry) {
            let dy = (yc - center.y) / ry;
            if dy.abs() > 1.0 {
                continue;
            }
            let half = rx * (1.0 - dy * dy).sqrt();
            self.span(yc, center.x - half, center.x + half, color);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let (mut top, mut bottom) = (f32::INFINITY, f32::NEG_INFINITY);
        for p in points {
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }
        let mut crossings = Vec::new();
        let mut painted = false;
        for yc in rows(self.height, top, bottom) {
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= yc && yc < b.y) || (b.y <= yc && yc < a.y) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                self.span(yc, pair[0], pair[1], color);
                painted = true;
            }
        }
        if !painted {
            if let Some(p) = points.first() {
                self.plot(p.x, p.y, color);
            }
        }
    }

    fn polyline(&mut self, points: &[Point], stroke: &Stroke) {
        if let [only] = points {
            self.plot(only.x, only.y, stroke.paint.at(*only).to_terminal());
            return;
        }
        for pair in points.windows(2) {
            let color = stroke.paint.at(pair[0].lerp(pair[1], 0.5)).to_terminal();
            self.line(pair[0], pair[1], stroke.weight, color);
        }
    }

    /// One canvas [`Line`] per offset along the normal; the canvas clips each pass.
    fn line(&mut self, from: Point, to: Point, weight: f32, color: Color) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            self.plot(from.x, from.y, color);
            return;
        }
        let spread = (((weight - 1.0) / 2.0).floor() as i32).clamp(0, MAX_STROKE_SPREAD);
        let (nx, ny) = (-dy / len, dx / len);
        for offset in -spread..=spread {
            let (ox, oy) = (nx * offset as f32, ny * offset as f32);
            let pass = Line {
                x1: (from.x + ox) as f64,
                y1: (self.height - (from.y + oy)) as f64,
                x2: (to.x + ox) as f64,
                y2: (self.height - (to.y + oy)) as f64,
                color,
            };
            pass.draw(self.painter);
        }
    }
}

/// Row centres covering `[top, bottom]`, clipped to `[0, limit]`.
fn rows(limit: f32, top: f32, bottom: f32) -> impl Iterator<Item = f32> {
    let first = top.max(0.0).floor() as i64;
    let last = bottom.min(limit).ceil() as i64;
    (first..last).map(|row| row as f32 + 0.5)
}
