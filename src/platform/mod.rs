//! Platform abstraction layer
//!
//! Hosts translate their native key events into `Key` values; this layer
//! turns them into simulation input.

pub mod input;

pub use input::{Key, map_key};
