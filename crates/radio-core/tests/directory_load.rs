mod common;

use common::{fixture, local_config, serve_once, CannedResponse};
use radio_core::directory::DirectoryClient;
use radio_core::error::DirectoryError;
use radio_core::station::{retain_playable, RawStation};

#[test]
fn fixture_decodes_and_drops_unplayable() {
    let raw: Vec<RawStation> =
        serde_json::from_str(&fixture("bycountry_india.json")).expect("fixture decodes");
    assert_eq!(raw.len(), 5);

    let stations = retain_playable(raw);
    let names: Vec<&str> = stations.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Radio City Hindi", "Carnatic Classical", "Ishq Fm", "radio city hindi"]
    );

    let ishq = &stations[2];
    assert_eq!(ishq.tags, "");
    assert_eq!(ishq.favicon, None);
    assert_eq!(ishq.bitrate, 0);

    let city = &stations[0];
    assert_eq!(city.id, "96062a7b-0601-11e8-ae97-52543be04c81");
    assert_eq!(city.url, "http://stream.example.invalid/radiocity");
    assert_eq!(city.codec, "MP3");
    assert_eq!(city.bitrate, 128);
}

#[tokio::test]
async fn load_hits_bycountry_endpoint_with_user_agent() {
    let (addr, request) = serve_once(CannedResponse::json(fixture("bycountry_india.json"))).await;
    let client = DirectoryClient::new(&local_config(addr)).unwrap();

    let directory = client.load().await.expect("load succeeds");
    assert_eq!(directory.raw_count, 5);
    assert_eq!(directory.stations.len(), 4);
    assert!(directory.stations.iter().all(|s| !s.url.is_empty()));

    let head = request.await.unwrap();
    assert!(
        head.starts_with("GET /json/stations/bycountry/india?limit=1200 HTTP/1.1"),
        "unexpected request line: {}",
        head.lines().next().unwrap_or("")
    );
    assert!(head.to_lowercase().contains("user-agent: radiogrid/"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (addr, _request) =
        serve_once(CannedResponse::status("HTTP/1.1 503 Service Unavailable")).await;
    let client = DirectoryClient::new(&local_config(addr)).unwrap();

    match client.load().await {
        Err(DirectoryError::Status(code)) => assert_eq!(code.as_u16(), 503),
        other => panic!("expected status error, got {:?}", other.map(|d| d.stations.len())),
    }
}

#[tokio::test]
async fn undecodable_body_is_an_error() {
    let (addr, _request) = serve_once(CannedResponse::json("{\"not\": \"a list\"}")).await;
    let client = DirectoryClient::new(&local_config(addr)).unwrap();

    assert!(matches!(client.load().await, Err(DirectoryError::Decode(_))));
}

#[tokio::test]
async fn unreachable_directory_is_an_http_error() {
    // Bind then drop to get a port nothing is listening on.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = DirectoryClient::new(&local_config(addr)).unwrap();

    assert!(matches!(client.load().await, Err(DirectoryError::Http(_))));
}
