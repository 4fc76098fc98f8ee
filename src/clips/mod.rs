//! Replacement clip assets and their cached durations

pub mod registry;

pub use registry::{ClipAsset, ClipLengthCache, ClipRecord, ClipRegistry};
