use crate::store::{FloodStore, NewCommunityReport, NewFloodAlert, NewSafeZone, NewSmsSubscriber};
use tempfile::TempDir;

// File-backed SQLite: every pooled connection must see the same database.
async fn test_store() -> (TempDir, FloodStore) {
    floodwatch_common::id::init(1, 1);
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());
    let store = FloodStore::new(&url)
        .await
        .expect("test store should initialize");
    (dir, store)
}

#[tokio::test]
async fn flood_alerts_list_newest_first_and_respect_limit() {
    let (_dir, store) = test_store().await;

    for i in 0..5 {
        store
            .insert_flood_alert(&NewFloodAlert {
                region: Some("Oshana".to_string()),
                alert_level: Some("Watch".to_string()),
                rainfall_mm: Some(10.0 * i as f64),
                message: Some(format!("alert {i}")),
                priority: Some("Normal".to_string()),
            })
            .await
            .unwrap();
        // Distinct created_at values so the ordering is deterministic
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let rows = store.list_flood_alerts(3).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].message.as_deref(), Some("alert 4"));
    assert!(rows[0].created_at >= rows[1].created_at);
    assert!(rows[1].created_at >= rows[2].created_at);
}

#[tokio::test]
async fn flood_alerts_tolerate_sparse_rows() {
    let (_dir, store) = test_store().await;
    store
        .insert_flood_alert(&NewFloodAlert::default())
        .await
        .unwrap();

    let rows = store.list_flood_alerts(50).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].region.is_none());
    assert!(rows[0].rainfall_mm.is_none());
}

#[tokio::test]
async fn safe_zones_round_trip_location_json() {
    let (_dir, store) = test_store().await;
    store
        .insert_safe_zone(&NewSafeZone {
            name: Some("Oshakati Primary School".to_string()),
            capacity: Some(250),
            location: Some(r#"{"type":"Point","coordinates":[15.69,-17.78]}"#.to_string()),
        })
        .await
        .unwrap();

    let rows = store.list_safe_zones(100).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].capacity, Some(250));
    assert!(rows[0].location.as_deref().unwrap().contains("Point"));
}

#[tokio::test]
async fn only_approved_reports_are_listed() {
    let (_dir, store) = test_store().await;
    store
        .insert_community_report(&NewCommunityReport {
            photo_url: "https://cdn.example.com/a.jpg".to_string(),
            description: Some("Water over the oshana crossing".to_string()),
            latitude: -17.78,
            longitude: 15.7,
            approved: true,
        })
        .await
        .unwrap();
    store
        .insert_community_report(&NewCommunityReport {
            photo_url: "https://cdn.example.com/b.jpg".to_string(),
            description: None,
            latitude: -17.8,
            longitude: 15.6,
            approved: false,
        })
        .await
        .unwrap();

    let rows = store.list_approved_reports(50).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].photo_url, "https://cdn.example.com/a.jpg");
}

#[tokio::test]
async fn subscriber_phones_filter_by_region() {
    let (_dir, store) = test_store().await;
    store
        .insert_sms_subscriber(&NewSmsSubscriber {
            phone_number: "+264811234567".to_string(),
            region: Some("Oshana".to_string()),
        })
        .await
        .unwrap();
    store
        .insert_sms_subscriber(&NewSmsSubscriber {
            phone_number: "+264817654321".to_string(),
            region: Some("Ohangwena".to_string()),
        })
        .await
        .unwrap();

    let all = store.list_subscriber_phones(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let oshana = store.list_subscriber_phones(Some("Oshana")).await.unwrap();
    assert_eq!(oshana, vec!["+264811234567".to_string()]);
}
