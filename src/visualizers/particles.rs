use std::f32::consts::PI;

use rand::random_range;

use super::{Resizable, Visualization};
use crate::color::Rgba;
use crate::frame::SpectralFrame;
use crate::geometry::{Point, map_range};
use crate::surface::{Stroke, Surface};
use crate::viewport::{Viewport, ViewportLayout};

pub const STAR_COUNT: usize = 100;
pub const PLANET_COUNT: usize = 5;
pub const PLANET_MIN_SIZE: f32 = 10.0;
pub const PLANET_MAX_SIZE: f32 = 50.0;

const RING_LIGHT: Rgba = Rgba::opaque(232.0, 160.0, 176.0);
const PLANET_BODY: Rgba = Rgba::opaque(107.0, 10.0, 32.0);
const RING_MIX: f32 = 0.6;

/// Uniform in `[lo, hi)`, or `lo` when the range is empty.
fn random_in(lo: f32, hi: f32) -> f32 {
    if hi > lo { random_range(lo..hi) } else { lo }
}

fn random_orbit() -> f32 {
    random_in(50.0, 200.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub base_size: f32,
    pub size: f32,
    pub sensitivity: f32,
}

impl Star {
    fn scattered(vp: Viewport) -> Self {
        let base_size = random_in(1.0, 3.0);
        Self {
            x: random_in(0.0, vp.width),
            y: random_in(0.0, vp.height),
            base_size,
            size: base_size,
            sensitivity: random_in(0.5, 1.5),
        }
    }

    pub fn update(&mut self, level: f32) {
        self.size = self.base_size + level * self.sensitivity * 5.0;
    }

    fn show(&self, surface: &mut dyn Surface) {
        let glow = Rgba::WHITE.with_alpha(self.size * 50.0);
        surface.fill_ellipse(Point::new(self.x, self.y), self.size, self.size, glow);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub angle: f32,
    pub distance: f32,
    pub size: f32,
    pub orbit_speed: f32,
    pub ring_count: usize,
}

impl Planet {
    fn spawn() -> Self {
        Self {
            angle: random_in(0.0, 2.0 * PI),
            distance: random_orbit(),
            size: random_in(10.0, 30.0),
            orbit_speed: random_in(0.01, 0.05),
            ring_count: random_range(1..4),
        }
    }

    /// Orbit advances at a fixed pace; size follows the level alone.
    pub fn update(&mut self, level: f32) {
        self.angle += self.orbit_speed;
        self.size = map_range(level, 0.0, 1.0, PLANET_MIN_SIZE, PLANET_MAX_SIZE);
    }

    pub fn position(&self, center: Point) -> Point {
        Point::new(
            center.x + self.distance * self.angle.cos(),
            center.y + self.distance * self.angle.sin(),
        )
    }

    fn rings(&self, surface: &mut dyn Surface, at: Point, angles: (f32, f32)) {
        let color = RING_LIGHT.lerp(PLANET_BODY, RING_MIX);
        for i in 0..self.ring_count {
            let diameter = self.size + 20.0 * (i + 1) as f32;
            let thickness = 5.0 + i as f32;
            surface.stroke_arc(
                at,
                diameter,
                diameter / 2.0,
                angles,
                Stroke::solid(color, thickness),
            );
        }
    }

    fn show(&self, surface: &mut dyn Surface, center: Point) {
        let at = self.position(center);
        self.rings(surface, at, (0.0, PI));
        surface.fill_ellipse(at, self.size * 1.5, self.size * 2.0, PLANET_BODY);
        self.rings(surface, at, (PI, 2.0 * PI));
    }
}

/// Twinkling star field with ringed planets orbiting the centre.
pub struct Galaxy {
    viewport: Viewport,
    stars: Vec<Star>,
    planets: Vec<Planet>,
}

impl Galaxy {
    pub fn new(layout: &ViewportLayout) -> Self {
        let viewport = layout.viewport;
        Self {
            viewport,
            stars: (0..STAR_COUNT).map(|_| Star::scattered(viewport)).collect(),
            planets: (0..PLANET_COUNT).map(|_| Planet::spawn()).collect(),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }
}

impl Visualization for Galaxy {
    fn name(&self) -> &str {
        "galaxy"
    }

    fn render(&mut self, frame: &SpectralFrame, _layout: &ViewportLayout, surface: &mut dyn Surface) {
        let level = frame.amplitude_level;
        for star in &mut self.stars {
            star.update(level);
            star.show(surface);
        }

        let center = self.viewport.center();
        for planet in &mut self.planets {
            planet.update(level);
            planet.show(surface, center);
        }
    }

    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }
}

impl Resizable for Galaxy {
    fn on_viewport_change(&mut self, layout: &ViewportLayout) {
        self.viewport = layout.viewport;
        for star in &mut self.stars {
            star.x = random_in(0.0, self.viewport.width);
            star.y = random_in(0.0, self.viewport.height);
        }
        for planet in &mut self.planets {
            planet.distance = random_orbit();
        }
    }
}
