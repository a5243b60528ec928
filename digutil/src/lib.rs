//! Odds and ends shared by every crate in the workspace: logging setup, a phase timer, number
//! formatting.

#[macro_use]
extern crate log;

pub mod logger;
mod time;

pub use crate::time::{prettyprint_usize, Timer};
