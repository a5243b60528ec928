use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use digutil::prettyprint_usize;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// The server answered, but not with 200 OK.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("requesting {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// The HTTP status, if the server got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DownloadError::Status { status, .. } => Some(*status),
            DownloadError::Http { source, .. } => source.status().map(|s| s.as_u16()),
        }
    }
}

/// A blocking client that never follows redirects, so a 3xx surfaces as a status error instead of
/// silently fetching something else. No timeout is configured.
pub fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder().redirect(Policy::none()).build()
}

/// Only exactly 200 counts as success.
pub fn check_status(url: &Url, status: StatusCode) -> Result<(), DownloadError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(DownloadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

/// Issues one GET and returns the body untouched, along with the status it came back with.
pub fn download_bytes(client: &Client, url: &Url) -> Result<(u16, Vec<u8>), DownloadError> {
    let http_err = |source: reqwest::Error| DownloadError::Http {
        url: url.to_string(),
        source,
    };

    debug!("GET {}", url);
    let resp = client.get(url.clone()).send().map_err(http_err)?;
    let status = resp.status();
    check_status(url, status)?;
    let bytes = resp.bytes().map_err(http_err)?;
    info!("Downloaded {} bytes", prettyprint_usize(bytes.len()));
    Ok((status.as_u16(), bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/wfs").unwrap()
    }

    #[test]
    fn only_ok_is_success() {
        assert!(check_status(&url(), StatusCode::OK).is_ok());
        for status in [
            StatusCode::CREATED,
            StatusCode::NO_CONTENT,
            StatusCode::MOVED_PERMANENTLY,
            StatusCode::FOUND,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = check_status(&url(), status).unwrap_err();
            assert_eq!(err.status(), Some(status.as_u16()));
        }
    }

    #[test]
    fn status_error_message() {
        let err = check_status(&url(), StatusCode::NOT_FOUND).unwrap_err();
        assert_eq!(err.to_string(), "https://example.com/wfs returned status 404");
    }
}
