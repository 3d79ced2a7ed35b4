use audiovis::color::Rgba;
use audiovis::geometry::{Point, Rect};
use audiovis::surface::terminal::paint_scene;
use audiovis::surface::{Scene, Stroke, Surface};
use audiovis::viewport::Viewport;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::Canvas;

/// 10x5 cells of Braille is a 20x20 dot viewport.
const COLS: u16 = 10;
const ROWS: u16 = 5;
const SIDE: f32 = 20.0;

const RED: Rgba = Rgba::opaque(255.0, 0.0, 0.0);

/// Paint a scene the way the app does and hand back the cell buffer.
fn rasterize(scene: &Scene) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(COLS, ROWS)).expect("test terminal");
    let viewport = Viewport::new(SIDE, SIDE);
    terminal
        .draw(|f| {
            let canvas = Canvas::default()
                .marker(Marker::Braille)
                .x_bounds([0.0, SIDE as f64])
                .y_bounds([0.0, SIDE as f64])
                .paint(|ctx| paint_scene(ctx, scene, viewport));
            f.render_widget(canvas, f.area());
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn lit(buf: &Buffer, x: u16, y: u16) -> bool {
    !matches!(buf[(x, y)].symbol(), " " | "\u{2800}")
}

fn lit_rows(buf: &Buffer) -> Vec<u16> {
    (0..ROWS)
        .filter(|&y| (0..COLS).any(|x| lit(buf, x, y)))
        .collect()
}

fn scene_with(draw: impl FnOnce(&mut Scene)) -> Scene {
    let mut scene = Scene::new();
    draw(&mut scene);
    scene
}

#[test]
fn origin_is_the_top_left_cell() {
    let buf = rasterize(&scene_with(|s| {
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), 0.0, RED)
    }));
    assert!(lit(&buf, 0, 0));
    assert!(lit(&buf, 1, 0));
    assert!(!lit(&buf, 5, 0));
    assert_eq!(lit_rows(&buf), [0]);
}

#[test]
fn text_is_flipped_with_the_shapes() {
    let buf = rasterize(&scene_with(|s| s.text(Point::new(0.0, 0.0), "hi", RED)));
    assert_eq!(buf[(0, 0)].symbol(), "h");
    assert_eq!(buf[(1, 0)].symbol(), "i");
}

#[test]
fn shapes_are_clipped_to_the_viewport() {
    let huge = rasterize(&scene_with(|s| {
        s.fill_rect(Rect::new(-50.0, -50.0, 1000.0, 1000.0), 0.0, RED)
    }));
    for y in 0..ROWS {
        for x in 0..COLS {
            assert!(lit(&huge, x, y), "cell ({x}, {y}) should be lit");
        }
    }

    let outside = rasterize(&scene_with(|s| {
        s.fill_rect(Rect::new(100.0, 100.0, 10.0, 10.0), 0.0, RED);
        s.fill_rect(Rect::new(-40.0, -40.0, 10.0, 10.0), 0.0, RED);
        s.stroke_line(Point::new(-10.0, -10.0), Point::new(-1.0, -30.0), Stroke::solid(RED, 7.0));
    }));
    assert!(lit_rows(&outside).is_empty());
}

#[test]
fn rounded_corners_are_inset() {
    let square = rasterize(&scene_with(|s| {
        s.fill_rect(Rect::new(0.0, 0.0, SIDE, SIDE), 0.0, RED)
    }));
    assert!(lit(&square, 0, 0));

    let round = rasterize(&scene_with(|s| {
        s.fill_rect(Rect::new(0.0, 0.0, SIDE, SIDE), 10.0, RED)
    }));
    assert!(!lit(&round, 0, 0));
    assert!(!lit(&round, COLS - 1, 0));
    assert!(!lit(&round, 0, ROWS - 1));
    assert!(lit(&round, 5, 2));
}

#[test]
fn polygon_fills_its_interior_only() {
    let buf = rasterize(&scene_with(|s| {
        s.fill_polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(SIDE, 0.0),
                Point::new(0.0, SIDE),
            ],
            RED,
        )
    }));
    assert!(lit(&buf, 0, 0));
    assert!(lit(&buf, 1, 3));
    assert!(!lit(&buf, 9, 4));
}

#[test]
fn thick_strokes_spread_across_the_normal() {
    let (from, to) = (Point::new(0.0, 10.0), Point::new(SIDE, 10.0));

    let thin = rasterize(&scene_with(|s| s.stroke_line(from, to, Stroke::solid(RED, 1.0))));
    assert_eq!(lit_rows(&thin), [2]);

    let thick = rasterize(&scene_with(|s| s.stroke_line(from, to, Stroke::solid(RED, 7.0))));
    assert_eq!(lit_rows(&thick), [1, 2, 3]);
}

#[test]
fn translucent_fills_are_premultiplied() {
    let half = Rgba::new(255.0, 0.0, 0.0, 127.5);
    let buf = rasterize(&scene_with(|s| {
        s.fill_rect(Rect::new(0.0, 0.0, SIDE, SIDE), 0.0, half)
    }));
    assert_eq!(buf[(3, 2)].fg, half.to_terminal());
}
