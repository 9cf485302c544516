//! Offline unit tests for atelier-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use atelier_core::{AppConfig, Environment};
use atelier_db::{EnquiryRow, PoolConfig, ProductRow};
use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        enquiry_webhook_url: None,
        enquiry_webhook_timeout_secs: 10,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`ProductRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn product_row_has_expected_fields() {
    let row = ProductRow {
        id: Uuid::new_v4(),
        name: "Ridge Sofa".to_string(),
        description: Some("Three-seater in solid oak.".to_string()),
        price: dec!(1299.00),
        category: "Sofas".to_string(),
        stock: 4,
        images: vec!["https://cdn.example/ridge-1.jpg".to_string()],
        is_special: true,
        special_price: Some(dec!(999.00)),
        is_featured: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(row.name, "Ridge Sofa");
    assert_eq!(row.category, "Sofas");
    assert_eq!(row.stock, 4);
    assert_eq!(row.images.len(), 1);
    assert!(row.is_special);
    assert_eq!(row.special_price, Some(dec!(999.00)));
    assert!(!row.is_featured);
}

/// Compile-time smoke test: confirm that [`EnquiryRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn enquiry_row_has_expected_fields() {
    let row = EnquiryRow {
        id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        product_name: "Ridge Sofa".to_string(),
        customer_name: "Jo".to_string(),
        customer_email: "jo@x.com".to_string(),
        customer_phone: None,
        message: "Interested in a custom length.".to_string(),
        fabric: Some("Linen".to_string()),
        color: None,
        status: "pending".to_string(),
        created_at: Utc::now(),
    };

    assert_eq!(row.status, "pending");
    assert_eq!(row.fabric.as_deref(), Some("Linen"));
    assert!(row.color.is_none());
    assert!(row.customer_phone.is_none());
}
