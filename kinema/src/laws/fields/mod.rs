//! Circuits, fields, light and waves.

pub mod electromagnetism;
pub mod optics;
pub mod waves;
