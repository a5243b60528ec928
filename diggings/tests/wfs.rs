//! Drives the real HTTP client against a local mock WFS.

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use diggings::{Config, Outcome};
use usmin::WfsClient;

const BODY: &str = r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs" xmlns:gml="http://www.opengis.net/gml" xmlns:usmin="http://mrdata.usgs.gov/usmin">
    <gml:featureMember><usmin:points>
        <usmin:name>Black Diamond</usmin:name><usmin:type>Coal</usmin:type><usmin:state>CA</usmin:state>
        <usmin:geometry><gml:Point><gml:pos>40.0 -123.5</gml:pos></gml:Point></usmin:geometry>
    </usmin:points></gml:featureMember>
</wfs:FeatureCollection>"#;

async fn mock_wfs(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/wfs/usmin"))
        .and(query_param("service", "WFS"))
        .and(query_param("version", "1.1.0"))
        .and(query_param("request", "GetFeature"))
        .and(query_param("typename", "points"))
        .and(query_param("srsName", "EPSG:4326"))
        .and(query_param("bbox", "40.0,-124.5,41.5,-122.3,EPSG:4326"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

/// The blocking client has to be built and dropped off of the async runtime's threads.
async fn run_against(server: &MockServer, dir: std::path::PathBuf) -> anyhow::Result<Outcome> {
    let url = format!("{}/services/wfs/usmin", server.uri());
    tokio::task::spawn_blocking(move || {
        let mut config = Config::for_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        config.url = url;
        config.output_dir = dir;
        let client = WfsClient::new(config.url.clone())?;
        diggings::run(&config, &client)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_parse_write() {
    let server = mock_wfs(ResponseTemplate::new(200).set_body_string(BODY)).await;
    let dir = tempfile::tempdir().unwrap();

    let outcome = run_against(&server, dir.path().to_path_buf()).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Written {
            kml: dir.path().join("norcal_mines_20240615.kml"),
            geojson: None,
            count: 1,
            skipped: 0,
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn error_statuses() {
    for status in [404, 500, 302] {
        let mut response = ResponseTemplate::new(status).set_body_string(BODY);
        if status == 302 {
            response = response.insert_header("Location", "https://example.com/elsewhere");
        }
        let server = mock_wfs(response).await;
        let dir = tempfile::tempdir().unwrap();

        let err = run_against(&server, dir.path().to_path_buf())
            .await
            .unwrap_err();
        let download = err.downcast_ref::<digio::DownloadError>().unwrap();
        assert_eq!(download.status(), Some(status));
        assert_eq!(fs_err::read_dir(dir.path()).unwrap().count(), 0);
    }
}
