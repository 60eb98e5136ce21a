use crate::runner::context::test_context::TestContext;
use color_eyre::Result;
use reqwest::StatusCode;

pub async fn test_health_endpoint(context: &TestContext) -> Result<()> {
    // ACT
    let response = context.http_client.get(context.url("/health")).send().await?;
    let status = response.status();
    let body = response.text().await?;

    // ASSERT
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    Ok(())
}

pub async fn test_openapi_document(context: &TestContext) -> Result<()> {
    let response = context
        .http_client
        .get(context.url("/openapi.json"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let document: serde_json::Value = response.json().await?;
    let paths = &document["paths"];
    assert!(paths.get("/match/{event_id}").is_some());
    assert!(paths.get("/events").is_some());
    Ok(())
}
