use crate::runner::context::test_context::TestContext;
use crate::test_constants::DIMENSION;
use chrono::{Duration, Utc};
use color_eyre::Result;
use common_services::api::auth::interfaces::AuthClaims;
use common_services::api::event::interfaces::{EventRequest, EventResponse};
use common_services::api::image::interfaces::ImageResponse;
use common_services::database::{
    BoundingBox, EmbeddingStore, EmbeddingSummary, Event, EventStore, Image, ImageStore,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use pgvector::Vector;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde_json::json;
use uuid::Uuid;

/// A bearer token for `user_id`, signed with the API's secret.
pub fn token_for(context: &TestContext, user_id: Uuid) -> Result<String> {
    let claims = AuthClaims {
        sub: user_id,
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(context.settings.secrets.jwt.as_bytes()),
    )?)
}

/// A face vector at cosine distance `distance` from [`query_vector`].
///
/// `axis` picks the direction the vector leans towards, so two vectors with the same distance
/// can still differ.
pub fn face_vector(distance: f32, axis: usize) -> Vec<f32> {
    let similarity = 1.0 - distance;
    let mut vector = vec![0.0; DIMENSION];
    vector[0] = similarity;
    vector[axis] = (1.0 - similarity * similarity).max(0.0).sqrt();
    vector
}

pub fn query_vector() -> Vec<f32> {
    face_vector(0.0, 1)
}

/// A photo file name no other test uses.
pub fn unique_name(stem: &str) -> String {
    format!("{stem}_{}.jpg", Uuid::new_v4().simple())
}

pub fn bbox(offset: f32) -> BoundingBox {
    BoundingBox {
        x: offset,
        y: offset / 2.0,
        w: 64.0,
        h: 80.0,
    }
}

/// A test photo: the face provider response listing `faces`.
pub fn photo(faces: &[Vec<f32>]) -> Vec<u8> {
    let faces: Vec<_> = faces
        .iter()
        .enumerate()
        .map(|(i, vector)| {
            let area = bbox(100.0 * i as f32);
            json!({
                "facial_area": {"x": area.x, "y": area.y, "w": area.w, "h": area.h},
                "embedding": vector,
            })
        })
        .collect();
    json!({ "faces": faces }).to_string().into_bytes()
}

pub async fn post_photo(
    context: &TestContext,
    path: &str,
    token: Option<&str>,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Response> {
    let form = Form::new().part(
        "file",
        Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str("image/jpeg")?,
    );
    let mut request = context.http_client.post(context.url(path)).multipart(form);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    Ok(request.send().await?)
}

pub async fn create_event(context: &TestContext, token: &str, title: &str) -> Result<EventResponse> {
    let response = context
        .http_client
        .post(context.url("/events"))
        .bearer_auth(token)
        .json(&EventRequest {
            title: Some(title.to_owned()),
            ..EventRequest::default()
        })
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(response.json().await?)
}

pub async fn upload_photo(
    context: &TestContext,
    token: &str,
    event_id: i64,
    file_name: &str,
    faces: &[Vec<f32>],
) -> Result<ImageResponse> {
    let response = post_photo(
        context,
        &format!("/images/{event_id}"),
        Some(token),
        file_name,
        photo(faces),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(response.json().await?)
}

/// Creates an event directly in the database.
pub async fn seed_event(context: &TestContext, owner_id: Uuid) -> Result<Event> {
    Ok(EventStore::create(&context.pool, owner_id, Some("Seeded"), None, Utc::now()).await?)
}

/// Creates an image with one embedding per vector directly in the database.
pub async fn seed_image(
    context: &TestContext,
    event_id: i64,
    vectors: &[Vec<f32>],
) -> Result<(Image, Vec<EmbeddingSummary>)> {
    let path = format!("seed_{}.jpg", Uuid::new_v4().simple());
    let mut conn = context.pool.acquire().await?;
    let (image, _) = ImageStore::get_or_create(&mut *conn, &path, event_id).await?;
    let mut embeddings = Vec::new();
    for (i, vector) in vectors.iter().enumerate() {
        let vector = Vector::from(vector.clone());
        embeddings
            .push(EmbeddingStore::create(&mut *conn, image.id, bbox(10.0 * i as f32), &vector).await?);
    }
    Ok((image, embeddings))
}
