//! Read-only image statistics.

pub mod histogram;


pub use histogram::channel_histogram;
