pub mod app;
pub mod audio;
pub mod color;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod overlay;
pub mod surface;
pub mod viewport;
pub mod visualizers;
