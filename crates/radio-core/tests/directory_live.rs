use radio_core::config::DirectoryConfig;
use radio_core::directory::{trending_subset, DirectoryClient};
use radio_core::filter::{extract_categories, CATEGORY_LIMIT};

#[tokio::test]
#[ignore = "hits the public radio-browser API; run explicitly with --ignored --nocapture"]
async fn live_directory_smoke() {
    let cfg = DirectoryConfig {
        country: std::env::var("DIRECTORY_COUNTRY").unwrap_or_else(|_| "india".to_string()),
        limit: std::env::var("DIRECTORY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200),
        ..DirectoryConfig::default()
    };
    let client = DirectoryClient::new(&cfg).expect("client");
    println!("GET {}", client.endpoint());

    let directory = client.load().await.expect("live directory load");
    println!(
        "{} records, {} playable, fetched {}",
        directory.raw_count,
        directory.stations.len(),
        directory.fetched_at.format("%H:%M:%S")
    );
    assert!(directory.stations.len() <= directory.raw_count);
    assert!(directory.stations.iter().all(|s| !s.url.is_empty()));

    let categories = extract_categories(&directory.stations, CATEGORY_LIMIT);
    println!("categories: {:?}", categories);
    assert!(categories.len() <= CATEGORY_LIMIT);

    let trending = trending_subset(
        &directory.stations,
        &radio_core::config::Config::default().trending.names,
    );
    for s in &trending {
        println!("trending: {} <{}>", s.name, s.url);
    }
}
