//! Core building blocks: lookup tables, projection parameters and the
//! in-memory processing primitives consumed by the high-level `api` module.
pub mod lookup;
pub mod params;
pub mod processing;
