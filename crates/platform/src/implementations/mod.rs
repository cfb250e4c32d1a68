//! Probe backends

pub mod host;
pub mod memory;
