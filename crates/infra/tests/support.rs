//! Shared helpers for infra integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stock export with one part spread over two locations (4 + 6).
pub const WIDGET_SNAPSHOT: &str = r#"{
    "parts": [
        {"id": 1, "name": "WIDGET-001"},
        {"id": 2, "name": "UNKNOWN-SKU"}
    ],
    "stock_units": [
        {"id": 10, "part_id": 1, "quantity": 4, "location": "WH-1"},
        {"id": 11, "part_id": 1, "quantity": 6, "location": "WH-2"},
        {"id": 20, "part_id": 2, "quantity": 3}
    ]
}"#;

/// Write `contents` to a temp file with the given extension and return its path.
pub fn write_config(contents: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

/// Mount a Magento stock item for `sku` answering GET and accepting PUT.
pub async fn mount_stock_item(server: &MockServer, sku: &str, item_id: u64, qty: f64) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/V1/stockItems/{sku}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"item_id": item_id, "qty": qty, "is_in_stock": qty > 0.0})),
        )
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/rest/V1/products/{sku}/stockItems/{item_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(item_id)))
        .mount(server)
        .await;
}

/// Number of PUT requests the server has seen.
pub async fn put_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.method.as_str() == "PUT")
        .count()
}
