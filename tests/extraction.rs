//! End-to-end extraction against a saved aggregator page.

use std::sync::Arc;

use tracker::fetcher::{Fetcher, HttpFetcher};
use tracker::models::{Config, EventRecord, Placeholders, StatusCategory, TrackingQuery};
use tracker::services::{SnapshotAssembler, TrackingService};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = include_str!("fixtures/aggregator_page.html");

fn event(date: &str, description: &str, location: &str) -> EventRecord {
    EventRecord {
        date: date.to_string(),
        description: description.to_string(),
        location: location.to_string(),
    }
}

#[test]
fn test_saved_page_snapshot() {
    let placeholders = Placeholders::default();
    let query = TrackingQuery::parse("lp123456789fr").unwrap();

    let snapshot = SnapshotAssembler::new(&placeholders).snapshot_from_html(&query, PAGE);

    assert_eq!(snapshot.tracking_number, "LP123456789FR");
    assert_eq!(snapshot.status, "En cours de livraison");
    assert_eq!(snapshot.status_category(), StatusCategory::InTransit);
    assert_eq!(snapshot.location, "Centre de tri, Lyon");
    assert_eq!(snapshot.carrier, "Colissimo");
    assert_eq!(snapshot.estimated_delivery, "12/03/2026");
    assert_eq!(
        snapshot.events,
        vec![
            event("10/03/2026 07:45", "Colis en cours de livraison", "Lyon"),
            event("09/03/2026 22:10", "Arrivé sur le site de distribution", "Lyon"),
            event("08/03/2026 18:02", "Pris en charge par Colissimo", "Paris"),
        ]
    );
    assert!(snapshot.error.is_none());
    assert!(snapshot.last_update.ends_with('Z'));
}

#[test]
fn test_timeline_layout_without_table() {
    let page = r#"<html><body>
        <div class="shipment">
            <p class="state">Votre colis a été <strong>livré</strong></p>
            <img src="/c/dhl.svg" alt="DHL Express logo">
        </div>
        <div class="timeline">
            <div><span>11/03</span><span>Livré</span></div>
            <div><span>10/03</span><span>En cours de livraison</span></div>
        </div>
    </body></html>"#;
    let placeholders = Placeholders::default();
    let query = TrackingQuery::parse("JD0146").unwrap();

    let snapshot = SnapshotAssembler::new(&placeholders).snapshot_from_html(&query, page);

    assert_eq!(snapshot.status, "livré");
    assert_eq!(snapshot.status_category(), StatusCategory::Delivered);
    assert_eq!(snapshot.carrier, "DHL Express logo");
    assert_eq!(snapshot.location, "Localisation inconnue");
    assert_eq!(snapshot.estimated_delivery, "Non disponible");
    assert_eq!(snapshot.events.len(), 2);
    assert_eq!(snapshot.events[0], event("11/03", "Livré", ""));
}

#[tokio::test]
async fn test_lookup_through_http_fetcher() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fr/tracking/LP123456789FR"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(PAGE),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.source.url_template = format!("{}/fr/tracking/{{tracking_number}}", server.uri());
    config.validate().unwrap();

    let fetcher: Arc<dyn Fetcher> =
        Arc::new(HttpFetcher::new(&config.fetcher, config.source.clone()).unwrap());
    let service = TrackingService::new(fetcher, config.locale.clone(), 1);

    let snapshot = service.track("  lp123456789fr ").await.unwrap();

    assert_eq!(snapshot.tracking_number, "LP123456789FR");
    assert_eq!(snapshot.carrier, "Colissimo");
    assert_eq!(snapshot.events.len(), 3);
}
