//! Talking to the outside world: one blocking HTTP download and writing finished files to disk.

#[macro_use]
extern crate log;

mod download;
mod write;

pub use crate::download::{check_status, download_bytes, http_client, DownloadError};
pub use crate::write::write_atomically;
