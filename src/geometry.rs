//! Screen-space points, range mapping and curve flattening.
//!
//! Coordinates are screen oriented: x grows to the right, y grows downward.

/// Segments used when flattening one curve span into line segments.
pub const CURVE_STEPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear re-mapping of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Not clamped. A collapsed input range maps everything onto `out_min`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Polar projection used by the radial plot: angle 0 points down the y axis.
pub fn polar(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y + radius * angle.cos(),
    )
}

/// Catmull-Rom curve passing through every point, flattened to a polyline.
///
/// The end points are duplicated as their own control points so the curve
/// starts on the first point and ends on the last one.
pub fn curve_through(points: &[Point], steps: usize) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let steps = steps.max(1);
    let last = points.len() - 1;
    let mut out = Vec::with_capacity(last * steps + 1);
    out.push(points[0]);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];
        for s in 1..=steps {
            let t = s as f32 / steps as f32;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    out
}

fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let blend = |a: f32, b: f32, c: f32, d: f32| {
        0.5 * (2.0 * b
            + (c - a) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (3.0 * b - a - 3.0 * c + d) * t3)
    };
    Point::new(
        blend(p0.x, p1.x, p2.x, p3.x),
        blend(p0.y, p1.y, p2.y, p3.y),
    )
}

pub fn cubic_bezier(p0: Point, c1: Point, c2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p3.x,
        a * p0.y + b * c1.y + c * c2.y + d * p3.y,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Line(Point),
    Cubic { c1: Point, c2: Point, to: Point },
}

/// An open path of straight and cubic segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    start: Point,
    segments: Vec<Segment>,
}

impl Path {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.segments.push(Segment::Line(to));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) -> &mut Self {
        self.segments.push(Segment::Cubic { c1, c2, to });
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        match self.segments.last() {
            Some(Segment::Line(to)) | Some(Segment::Cubic { to, .. }) => *to,
            None => self.start,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn flatten(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let mut out = vec![self.start];
        let mut cursor = self.start;
        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => {
                    out.push(to);
                    cursor = to;
                }
                Segment::Cubic { c1, c2, to } => {
                    for s in 1..=steps {
                        out.push(cubic_bezier(cursor, c1, c2, to, s as f32 / steps as f32));
                    }
                    cursor = to;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn map_range_matches_linear_interpolation() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
        assert_eq!(map_range(-1.0, -1.0, 1.0, -10.0, 10.0), -10.0);
        assert_eq!(map_range(3.0, 2.0, 2.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn curve_passes_through_every_input_point() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, -3.0),
            Point::new(30.0, 2.0),
        ];
        let flat = curve_through(&pts, 4);
        assert_eq!(flat.len(), 3 * 4 + 1);
        for (k, p) in pts.iter().enumerate() {
            assert!(close(flat[k * 4], *p), "point {k} not on curve");
        }
    }

    #[test]
    fn bezier_path_is_continuous_between_segments() {
        let mut path = Path::new(Point::new(0.0, 0.0));
        path.cubic_to(Point::new(1.0, 2.0), Point::new(2.0, 2.0), Point::new(3.0, 0.0))
            .cubic_to(Point::new(4.0, -2.0), Point::new(5.0, -2.0), Point::new(6.0, 0.0))
            .line_to(Point::new(7.0, 1.0));
        let flat = path.flatten(6);
        assert_eq!(flat.first(), Some(&Point::new(0.0, 0.0)));
        assert!(close(flat[6], Point::new(3.0, 0.0)));
        assert_eq!(flat.last(), Some(&Point::new(7.0, 1.0)));
        assert_eq!(path.end(), Point::new(7.0, 1.0));
    }

    #[test]
    fn polar_zero_angle_points_down() {
        let p = polar(Point::new(10.0, 10.0), 5.0, 0.0);
        assert!(close(p, Point::new(10.0, 15.0)));
    }
}
