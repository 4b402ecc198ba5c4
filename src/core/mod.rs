//! Core processing building blocks: canvas profiles, fit-to-box resizing,
//! padding onto the canvas, and the per-image pipeline. These are internal
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
