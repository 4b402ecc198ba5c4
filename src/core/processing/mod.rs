pub mod padding;
pub mod pipeline;
pub mod resize;

pub use pipeline::{Canvas, fit_to_box};
