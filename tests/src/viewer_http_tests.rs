//! End-to-end tests: viewer HTTP service → JSON-RPC → mock contract.

use agrichain_types::{
    EMPTY_PRODUCT_ID, NO_DETAILS, PRODUCT_NOT_FOUND, PROVIDER_NOT_INSTALLED,
};
use anyhow::Result;
use serde_json::Value;

use crate::utils::{
    closed_port_url, sample_catalogue, start_mock_node, start_viewer, viewer_config, CHAIN_ID,
};

async fn get_text(url: &str) -> Result<(reqwest::StatusCode, String)> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    Ok((status, response.text().await?))
}

#[tokio::test]
async fn test_track_page_renders_product() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let (status, html) = get_text(&format!("{viewer}/track?product_id=P3001")).await?;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(html.contains("<p class=\"product-name\">Apple Juice</p>"));
    assert!(html.contains("<p class=\"batch-id\">B123</p>"));
    assert_eq!(html.matches("class=\"entry\"").count(), 2);
    assert!(html.contains("<span class=\"label\">Stage</span><span class=\"value\">Harvest</span>"));
    assert!(html.contains("<span class=\"label\">Location</span><span class=\"value\">Farm A</span>"));

    assert_eq!(node.state.eth_call_count(), 1);
    assert_eq!(node.state.last_product_id().as_deref(), Some("P3001"));
    Ok(())
}

#[tokio::test]
async fn test_identifier_is_trimmed_before_call() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let (_, html) = get_text(&format!("{viewer}/track?product_id=%20%20P3002%20")).await?;
    assert!(html.contains("Whole Milk"));
    assert_eq!(node.state.last_product_id().as_deref(), Some("P3002"));
    assert_eq!(node.state.eth_call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_sample_link_runs_lookup() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let (_, html) = get_text(&format!("{viewer}/track")).await?;
    assert!(html.contains("<a href=\"/track?sample=P3002\">P3002</a>"));

    let (_, html) = get_text(&format!("{viewer}/track?sample=P3002")).await?;
    assert!(html.contains("value=\"P3002\""));
    assert!(html.contains("Whole Milk"));
    assert_eq!(node.state.last_product_id().as_deref(), Some("P3002"));
    Ok(())
}

#[tokio::test]
async fn test_placeholders_for_empty_fields() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let (_, html) = get_text(&format!("{viewer}/track?product_id=P3003")).await?;
    assert!(html.contains(NO_DETAILS));

    let (_, html) = get_text(&format!("{viewer}/track?product_id=P3004")).await?;
    assert!(html.contains("<p class=\"product-name\">N/A</p>"));
    assert!(html.contains("<span class=\"label\">Organic</span><span class=\"value\"></span>"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_product_shows_generic_error() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let (status, html) = get_text(&format!("{viewer}/track?product_id=P9999")).await?;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert!(html.contains(PRODUCT_NOT_FOUND));
    assert!(!html.contains("reverted"));
    assert!(!html.contains("<h2>Product Details</h2>"));
    // The form stays usable after a failure.
    assert!(html.contains("<button type=\"submit\">Get Product Details</button>"));
    Ok(())
}

#[tokio::test]
async fn test_empty_identifier_never_reaches_node() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let (_, html) = get_text(&format!("{viewer}/track?product_id=%20")).await?;
    assert!(html.contains(EMPTY_PRODUCT_ID));
    assert_eq!(node.state.eth_call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_api_returns_parsed_details() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let response = reqwest::get(format!("{viewer}/api/products/P3001")).await?;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["product"]["batch_id"], "B123");
    let details = body["product"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[1]["fields"][1]["label"], "Location");
    assert_eq!(details[1]["fields"][1]["value"], "Plant B");

    let response = reqwest::get(format!("{viewer}/api/products/P0000")).await?;
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], PRODUCT_NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_without_provider() -> Result<()> {
    let viewer = start_viewer(viewer_config(None)).await?;

    let (_, html) = get_text(&format!("{viewer}/track")).await?;
    assert!(html.contains(PROVIDER_NOT_INSTALLED));

    let response = reqwest::get(format!("{viewer}/ready")).await?;
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let health: Value = reqwest::get(format!("{viewer}/health")).await?.json().await?;
    assert_eq!(health["status"], "unavailable");
    assert_eq!(health["contract_bound"], false);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_node_is_generic_failure() -> Result<()> {
    let viewer = start_viewer(viewer_config(Some(closed_port_url().await?))).await?;

    let (_, html) = get_text(&format!("{viewer}/track?product_id=P3001")).await?;
    assert!(html.contains(PRODUCT_NOT_FOUND));

    let health: Value = reqwest::get(format!("{viewer}/health")).await?.json().await?;
    assert_eq!(health["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn test_health_and_metrics() -> Result<()> {
    let node = start_mock_node(&sample_catalogue()).await?;
    let viewer = start_viewer(viewer_config(Some(node.url.clone()))).await?;

    let health: Value = reqwest::get(format!("{viewer}/health")).await?.json().await?;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["chain_id"], CHAIN_ID);

    let metrics = reqwest::get(format!("{viewer}/metrics")).await?.text().await?;
    assert!(metrics.contains("agrichain_contract_bound 1"));
    assert!(metrics.contains("# TYPE agrichain_lookups_total counter"));
    Ok(())
}
