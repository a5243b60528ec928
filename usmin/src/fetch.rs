use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;

use geom::GPSBounds;

pub const DEFAULT_WFS_URL: &str = "https://mrdata.usgs.gov/services/wfs/usmin";

/// The body of a successful GetFeature call. Consumed once by the parser.
#[derive(Clone, Debug)]
pub struct RawFeatureResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Somewhere mine points for a region can come from.
pub trait FeatureSource {
    fn fetch(&self, bbox: &GPSBounds) -> Result<RawFeatureResponse>;
}

/// Fetches features from a WFS 1.1.0 endpoint. One request per call; nothing is cached.
pub struct WfsClient {
    base_url: String,
    client: Client,
}

impl WfsClient {
    pub fn new<I: Into<String>>(base_url: I) -> Result<WfsClient> {
        Ok(WfsClient {
            base_url: base_url.into(),
            client: digio::http_client().context("building HTTP client")?,
        })
    }

    pub fn request_url(&self, bbox: &GPSBounds) -> Result<Url> {
        let bbox = wfs_bbox_param(bbox);
        let params = [
            ("service", "WFS"),
            ("version", "1.1.0"),
            ("request", "GetFeature"),
            ("typename", "points"),
            ("srsName", "EPSG:4326"),
            ("bbox", bbox.as_str()),
        ];
        Url::parse_with_params(&self.base_url, &params)
            .with_context(|| format!("bad WFS endpoint {}", self.base_url))
    }
}

impl FeatureSource for WfsClient {
    fn fetch(&self, bbox: &GPSBounds) -> Result<RawFeatureResponse> {
        let url = self.request_url(bbox)?;
        info!("Requesting mine points within {}", bbox);
        let (status, body) = digio::download_bytes(&self.client, &url)?;
        Ok(RawFeatureResponse { status, body })
    }
}

/// WFS 1.1.0 with EPSG:4326 wants latitude first, so this is (south, west, north, east), not the
/// (west, south, east, north) that the bounds are usually written in. Whole degrees keep their
/// trailing `.0`.
pub fn wfs_bbox_param(bbox: &GPSBounds) -> String {
    format!(
        "{:?},{:?},{:?},{:?},EPSG:4326",
        bbox.south(),
        bbox.west(),
        bbox.north(),
        bbox.east()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norcal() -> GPSBounds {
        GPSBounds::from_wsen(-124.5, 40.0, -122.3, 41.5)
    }

    #[test]
    fn bbox_is_lat_first() {
        assert_eq!(wfs_bbox_param(&norcal()), "40.0,-124.5,41.5,-122.3,EPSG:4326");
    }

    #[test]
    fn query_params() {
        let client = WfsClient::new(DEFAULT_WFS_URL).unwrap();
        let url = client.request_url(&norcal()).unwrap();
        assert_eq!(url.host_str(), Some("mrdata.usgs.gov"));
        assert_eq!(url.path(), "/services/wfs/usmin");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("service".to_string(), "WFS".to_string()),
                ("version".to_string(), "1.1.0".to_string()),
                ("request".to_string(), "GetFeature".to_string()),
                ("typename".to_string(), "points".to_string()),
                ("srsName".to_string(), "EPSG:4326".to_string()),
                (
                    "bbox".to_string(),
                    "40.0,-124.5,41.5,-122.3,EPSG:4326".to_string()
                ),
            ]
        );
    }

    #[test]
    fn bad_endpoint() {
        let client = WfsClient::new("not a url").unwrap();
        assert!(client.request_url(&norcal()).is_err());
    }
}
