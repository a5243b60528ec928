//! Plain WGS84 geometry shared by the fetching, parsing, and export crates.

mod gps;

pub use crate::gps::{GPSBounds, LonLat};
