use axum::Router;
use axum::extract::Multipart;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use color_eyre::Result;
use tokio::net::TcpListener;

/// Echoes the uploaded `file` field back as the response body.
///
/// Test photos are the provider's JSON response itself, so a test decides which faces a
/// photo contains. Anything that is not valid JSON makes the API see a broken provider.
async fn represent(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        return match field.bytes().await {
            Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
            Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        };
    }
    (StatusCode::BAD_REQUEST, "missing file").into_response()
}

pub async fn serve_face_provider(listener: TcpListener) -> Result<()> {
    let app = Router::new().route("/represent", post(represent));
    axum::serve(listener, app).await?;
    Ok(())
}
