//! Canvas 2D rendering module
//!
//! Reads a [`crate::sim::Snapshot`] each tick and paints it; never mutates
//! simulation state.

pub mod canvas;

pub use canvas::CanvasRenderer;
