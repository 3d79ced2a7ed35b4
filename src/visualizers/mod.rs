use crate::frame::SpectralFrame;
use crate::surface::Surface;
use crate::viewport::ViewportLayout;

pub mod bars;
pub mod dials;
pub mod particles;
pub mod radial;
pub mod registry;
pub mod ridge;
pub mod waveform;

pub use registry::VisualizationRegistry;

pub trait Visualization {
    /// Identifier used for selection and in the menu.
    fn name(&self) -> &str;

    fn render(&mut self, frame: &SpectralFrame, layout: &ViewportLayout, surface: &mut dyn Surface);

    /// Visualizations that cache size-dependent geometry return their resize hook.
    fn resizable(&mut self) -> Option<&mut dyn Resizable> {
        None
    }
}

pub trait Resizable {
    fn on_viewport_change(&mut self, layout: &ViewportLayout);
}
