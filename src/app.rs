use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Margin, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{Block, Borders, canvas::Canvas},
};

use crate::audio::{AudioTransport, SpectralAnalyzer};
use crate::color::Rgba;
use crate::config::Config;
use crate::overlay::{Action, Controls};
use crate::surface::{Scene, terminal::paint_scene};
use crate::viewport::{Viewport, ViewportLayout};
use crate::visualizers::VisualizationRegistry;

/// Braille dots per terminal cell.
const DOTS_ACROSS: u16 = 2;
const DOTS_DOWN: u16 = 4;

/// Raw mode, alternate screen and mouse capture for the lifetime of the guard.
struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    fn new() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        // Drop undoes raw mode even if a later step fails.
        let guard = Self { _private: () };
        let mut out = io::stdout();
        out.execute(EnterAlternateScreen).context("enter alternate screen")?;
        out.execute(EnableMouseCapture).context("enable mouse capture")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let mut out = io::stdout();
        let _ = out.execute(DisableMouseCapture);
        let _ = out.execute(LeaveAlternateScreen);
    }
}

/// Cells the canvas occupies: everything, or everything inside the frame border.
fn canvas_area(full: Rect, fullscreen: bool) -> Rect {
    if fullscreen { full } else { full.inner(Margin::new(1, 1)) }
}

fn canvas_viewport(area: Rect) -> Viewport {
    Viewport::new(
        f32::from(area.width) * f32::from(DOTS_ACROSS),
        f32::from(area.height) * f32::from(DOTS_DOWN),
    )
}

/// Fixed frame cadence that input traffic cannot speed up.
#[derive(Debug, Clone, Copy)]
struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    /// The first frame is due immediately.
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now,
        }
    }

    fn due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Schedules the next frame. A loop that fell a whole interval behind
    /// restarts from `now` instead of rendering a burst to catch up.
    fn advance(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }

    /// How long input may be awaited before the next frame.
    fn timeout(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

struct Session {
    transport: AudioTransport,
    analyzer: SpectralAnalyzer,
    registry: VisualizationRegistry,
    controls: Controls,
    layout: ViewportLayout,
    scene: Scene,
}

impl Session {
    /// Returns `true` when the app should exit.
    fn dispatch(&mut self, action: Action) -> bool {
        self.controls.apply(action);
        match action {
            Action::Quit => return true,
            Action::Select(slot) => self.registry.select_index(slot),
            Action::Next => self.registry.select_next(),
            Action::TogglePlayback => match self.transport.toggle() {
                Ok(()) if !self.transport.is_playing() => self.analyzer.reset(),
                Ok(()) => {}
                Err(err) => log::error!("playback toggle failed: {err}"),
            },
            Action::ToggleMenu | Action::ToggleFullscreen | Action::None => {}
        }
        false
    }

    /// Re-measures the canvas and forwards a resize when it changed.
    fn sync_viewport(&mut self, canvas: Rect) {
        let measured = canvas_viewport(canvas);
        if measured != self.layout.viewport {
            log::debug!("viewport {}x{}", measured.width, measured.height);
            self.layout = ViewportLayout::new(measured);
            self.registry.notify_viewport_change(&self.layout);
        }
    }

    fn action_for(&mut self, event: Event, canvas: Rect) -> Action {
        match event {
            Event::Key(k) if k.kind == KeyEventKind::Press => {
                self.controls.handle_key(k.code, k.modifiers)
            }
            Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.controls.handle_click(m.column, m.row, canvas)
            }
            // Motion, drags, releases and resizes carry no action.
            _ => Action::None,
        }
    }

    fn title(&self) -> String {
        match (self.registry.active_index(), self.registry.active_visualization()) {
            (Some(idx), Some(visual)) => format!(" {}: {} ", idx + 1, visual.name()),
            _ => String::new(),
        }
    }

    fn draw(&self, f: &mut Frame) {
        let full = f.area();
        let canvas_rect = canvas_area(full, self.controls.fullscreen);
        let viewport = self.layout.viewport;
        let scene = &self.scene;

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Black)
            .x_bounds([0.0, viewport.width as f64])
            .y_bounds([0.0, viewport.height as f64])
            .paint(move |ctx| paint_scene(ctx, scene, viewport));
        if !self.controls.fullscreen {
            canvas = canvas.block(
                Block::default()
                    .title(self.title())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Rgba::hex(0xf5c9d0).to_terminal())),
            );
        }
        f.render_widget(canvas, full);

        let names: Vec<&str> = self.registry.names().collect();
        self.controls
            .draw(f, canvas_rect, self.transport.is_playing(), &names);
    }
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let mut transport = AudioTransport::open(cfg.source, cfg.device.as_deref(), cfg.fft_size * 2)
        .with_context(|| format!("open audio (source={:?})", cfg.source))?;
    let analyzer = SpectralAnalyzer::new(cfg.fft_size, transport.sample_rate(), cfg.smoothing)?;
    if cfg.paused {
        transport.pause()?;
    } else {
        transport.play()?;
    }

    let _term = TerminalGuard::new()?;
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("create terminal")?;

    let controls = Controls::default();
    let size = terminal.size().context("get terminal size")?;
    let full = Rect::new(0, 0, size.width, size.height);
    let layout = ViewportLayout::new(canvas_viewport(canvas_area(full, controls.fullscreen)));
    let mut registry = VisualizationRegistry::with_defaults(&layout, cfg.wave_smoothness);
    if let Some(name) = cfg.visual.as_deref() {
        registry.select_by_name(name);
    }

    let mut session = Session {
        transport,
        analyzer,
        registry,
        controls,
        layout,
        scene: Scene::new(),
    };
    let mut clock = FrameClock::new(cfg.frame_interval(), Instant::now());
    log::info!("running at {} fps, fft size {}", cfg.fps, cfg.fft_size);

    loop {
        let size = terminal.size().context("get terminal size")?;
        let full = Rect::new(0, 0, size.width, size.height);
        let canvas_rect = canvas_area(full, session.controls.fullscreen);

        let now = Instant::now();
        if clock.due(now) {
            clock.advance(now);
            session.sync_viewport(canvas_rect);

            let samples = session.transport.tap().latest(session.analyzer.fft_size());
            let frame = session.analyzer.analyze(&samples);
            session.scene.clear();
            session
                .registry
                .render_active(&frame, &session.layout, &mut session.scene);

            terminal.draw(|f| session.draw(f))?;
        }

        if !event::poll(clock.timeout(Instant::now()))? {
            continue;
        }
        // Drain everything already queued so a burst of input costs one wakeup.
        loop {
            let action = session.action_for(event::read()?, canvas_rect);
            if session.dispatch(action) {
                return Ok(());
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }
}
