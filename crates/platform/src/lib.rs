#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Filesystem probing for modlink.
//!
//! Resolution only ever asks whether a directory or file is present. This
//! crate provides:
//! - The `FileSystemProbe` trait those questions go through
//! - A host implementation backed by `std::fs`
//! - An in-memory implementation for tests and dry runs
//! - The `PathProber` that joins segments onto a root and records outcomes

pub mod filesystem;
pub mod implementations;
pub mod probe;

pub use filesystem::FileSystemProbe;
pub use implementations::host::HostFileSystem;
pub use implementations::memory::MemoryFileSystem;
pub use probe::{EntryKind, PathProber, ProbeResult};
