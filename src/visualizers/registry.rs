use super::{
    Visualization, bars::SpectrumBars, dials::DialCluster, particles::Galaxy,
    radial::RadialSpectrogram, ridge::RidgePlot, waveform::WaveCurve,
};
use crate::frame::SpectralFrame;
use crate::surface::Surface;
use crate::viewport::ViewportLayout;

/// Ordered set of visualizations plus the active selection.
///
/// Registration order is menu order and numeric-key order.
#[derive(Default)]
pub struct VisualizationRegistry {
    visuals: Vec<Box<dyn Visualization>>,
    active: Option<usize>,
}

impl VisualizationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six built-in visualizations, spectrum bars first.
    pub fn with_defaults(layout: &ViewportLayout, wave_smoothness: usize) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SpectrumBars));
        registry.register(Box::new(WaveCurve::new(wave_smoothness)));
        registry.register(Box::new(DialCluster::new(layout)));
        registry.register(Box::new(RidgePlot::new(layout)));
        registry.register(Box::new(RadialSpectrogram::new(layout)));
        registry.register(Box::new(Galaxy::new(layout)));
        registry
    }

    pub fn register(&mut self, visual: Box<dyn Visualization>) {
        self.visuals.push(visual);
        if self.active.is_none() {
            self.active = Some(self.visuals.len() - 1);
        }
    }

    /// Unknown names leave the selection untouched.
    pub fn select_by_name(&mut self, name: &str) {
        if let Some(idx) = self.visuals.iter().position(|v| v.name() == name) {
            if self.active != Some(idx) {
                log::info!("visualization -> {name}");
            }
            self.active = Some(idx);
        }
    }

    /// Selects by 0-based display order; out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize) {
        let Some(name) = self.visuals.get(index).map(|v| v.name().to_owned()) else {
            log::debug!("no visualization at slot {}", index + 1);
            return;
        };
        self.select_by_name(&name);
    }

    pub fn select_next(&mut self) {
        if let Some(idx) = self.active {
            self.select_index((idx + 1) % self.visuals.len());
        }
    }

    pub fn active_visualization(&self) -> Option<&dyn Visualization> {
        self.active.map(|idx| self.visuals[idx].as_ref())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.visuals.iter().map(|v| v.name())
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn render_active(
        &mut self,
        frame: &SpectralFrame,
        layout: &ViewportLayout,
        surface: &mut dyn Surface,
    ) {
        if let Some(idx) = self.active {
            self.visuals[idx].render(frame, layout, surface);
        }
    }

    /// Forwards a resize to every visualization that has a resize hook.
    pub fn notify_viewport_change(&mut self, layout: &ViewportLayout) {
        for visual in &mut self.visuals {
            if let Some(hook) = visual.resizable() {
                hook.on_viewport_change(layout);
            }
        }
    }
}
