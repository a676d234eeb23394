//! Comprehensive tests for domain_geo

use domain_geo::cascade::{CascadeState, CityCascade, GeoScope};
use domain_geo::ports::GeoPort;
use domain_geo::MockGeoPort;

// ============================================================================
// Cascade + Port Integration
// ============================================================================

#[tokio::test]
async fn test_cascade_driven_by_port() {
    let port = MockGeoPort::new();
    let mut cascade = CityCascade::new(GeoScope::Store);

    let key = cascade.begin("Antioquia");
    let cities = port.cities(&key).await.unwrap();
    assert!(cascade.resolve(&key, cities));

    assert_eq!(cascade.current_department(), Some("Antioquia"));
    assert!(cascade.cities().contains(&"Medellín".to_string()));
}

#[tokio::test]
async fn test_out_of_order_responses_keep_latest_selection() {
    let port = MockGeoPort::new();
    let mut cascade = CityCascade::new(GeoScope::Personal);

    // Two selections in quick succession; both fetches go out
    let first = cascade.begin("Antioquia");
    let first_cities = port.cities(&first).await.unwrap();

    let second = cascade.begin("Cundinamarca");
    let second_cities = port.cities(&second).await.unwrap();

    // The second selection's response lands first, then the stale one
    assert!(cascade.resolve(&second, second_cities));
    assert!(!cascade.resolve(&first, first_cities));

    assert_eq!(cascade.current_department(), Some("Cundinamarca"));
    assert!(cascade.cities().contains(&"Bogotá".to_string()));
    assert!(!cascade.cities().contains(&"Medellín".to_string()));
}

#[tokio::test]
async fn test_fetch_failure_leaves_cascade_usable() {
    let port = MockGeoPort::new();
    let mut cascade = CityCascade::new(GeoScope::Company);

    port.fail_next().await;
    let key = cascade.begin("Antioquia");
    let err = port.cities(&key).await.unwrap_err();
    assert!(err.is_transient());
    assert!(cascade.fail(&key));
    assert_eq!(cascade.state(), &CascadeState::Idle);

    // Re-selecting the department retries and succeeds
    let key = cascade.begin("Antioquia");
    let cities = port.cities(&key).await.unwrap();
    assert!(cascade.resolve(&key, cities));
    assert!(!cascade.cities().is_empty());
}

#[tokio::test]
async fn test_three_scopes_do_not_share_state() {
    let port = MockGeoPort::new();
    let mut cascades: Vec<CityCascade> = GeoScope::ALL.iter().map(|s| CityCascade::new(*s)).collect();

    let key = cascades[0].begin("Antioquia");
    let cities = port.cities(&key).await.unwrap();
    cascades[0].resolve(&key, cities);

    assert!(!cascades[0].cities().is_empty());
    assert!(cascades[1].cities().is_empty());
    assert!(cascades[2].cities().is_empty());
    assert_eq!(cascades[1].state(), &CascadeState::Idle);
}

#[tokio::test]
async fn test_departments_fetched_as_full_list() {
    let port = MockGeoPort::new();
    let departments = port.departments().await.unwrap();
    assert_eq!(departments.len(), 3);
}
