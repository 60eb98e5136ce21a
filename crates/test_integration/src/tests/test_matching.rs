use crate::runner::context::test_context::TestContext;
use crate::test_constants::{ARCFACE_COSINE_THRESHOLD, DISTANCE_EPSILON};
use crate::test_helpers::{
    create_event, face_vector, photo, post_photo, query_vector, token_for, unique_name,
    upload_photo,
};
use color_eyre::Result;
use common_services::api::matching::interfaces::MatchResult;
use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

pub async fn test_match_photo(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = token_for(context, Uuid::new_v4())?;
    let event = create_event(context, &token, "Reunion").await?;
    let close = upload_photo(
        context,
        &token,
        event.id,
        &unique_name("close"),
        &[face_vector(0.1, 2), face_vector(0.95, 3)],
    )
    .await?;
    let near = upload_photo(context, &token, event.id, &unique_name("near"), &[face_vector(0.2, 4)])
        .await?;
    upload_photo(context, &token, event.id, &unique_name("far"), &[face_vector(0.9, 5)]).await?;

    // Same person in another event must not show up
    let other_event = create_event(context, &token, "Elsewhere").await?;
    upload_photo(
        context,
        &token,
        other_event.id,
        &unique_name("elsewhere"),
        &[face_vector(0.05, 6)],
    )
    .await?;

    // ACT: matching needs no token
    let response = post_photo(
        context,
        &format!("/match/{}", event.id),
        None,
        &unique_name("selfie"),
        photo(&[query_vector(), face_vector(0.9, 7)]),
    )
    .await?;

    // ASSERT
    assert_eq!(response.status(), StatusCode::OK);
    let matches: Vec<MatchResult> = response.json().await?;
    assert_eq!(matches.len(), 2);

    assert_eq!(matches[0].image_id, close.id);
    assert_eq!(matches[0].embedding_id, close.embeddings[0].id);
    assert!((matches[0].distance - 0.1).abs() < DISTANCE_EPSILON);
    assert_eq!(matches[0].bbox, close.embeddings[0].bbox);
    assert_eq!(matches[0].other_embeddings, vec![close.embeddings[1].clone()]);

    assert_eq!(matches[1].image_id, near.id);
    assert!((matches[1].distance - 0.2).abs() < DISTANCE_EPSILON);
    assert!(matches[1].other_embeddings.is_empty());

    assert!(
        matches
            .iter()
            .all(|m| (m.threshold - ARCFACE_COSINE_THRESHOLD).abs() < f64::EPSILON)
    );
    Ok(())
}

pub async fn test_match_photo_rejections(context: &TestContext) -> Result<()> {
    let token = token_for(context, Uuid::new_v4())?;
    let event = create_event(context, &token, "Quiet").await?;

    // No face in the query photo
    let response = post_photo(
        context,
        &format!("/match/{}", event.id),
        None,
        &unique_name("empty"),
        photo(&[]),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "No face found in query image");

    // Unknown event
    let response = post_photo(
        context,
        "/match/999999999",
        None,
        &unique_name("lost"),
        photo(&[query_vector()]),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // An event without photos has no matches
    let response = post_photo(
        context,
        &format!("/match/{}", event.id),
        None,
        &unique_name("alone"),
        photo(&[query_vector()]),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let matches: Vec<MatchResult> = response.json().await?;
    assert!(matches.is_empty());
    Ok(())
}

pub async fn test_match_embedding(context: &TestContext) -> Result<()> {
    // ARRANGE
    let token = token_for(context, Uuid::new_v4())?;
    let event = create_event(context, &token, "Graduation").await?;
    let source = upload_photo(context, &token, event.id, &unique_name("source"), &[query_vector()])
        .await?;
    let similar =
        upload_photo(context, &token, event.id, &unique_name("similar"), &[face_vector(0.3, 2)])
            .await?;
    let embedding_id = source.embeddings[0].id;

    // ACT
    let response = context
        .http_client
        .get(context.url(&format!("/match/{}/{embedding_id}", event.id)))
        .bearer_auth(&token)
        .send()
        .await?;

    // ASSERT: the stored face finds itself first
    assert_eq!(response.status(), StatusCode::OK);
    let matches: Vec<MatchResult> = response.json().await?;
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].embedding_id, embedding_id);
    assert!(matches[0].distance.abs() < DISTANCE_EPSILON);
    assert_eq!(matches[1].image_id, similar.id);
    assert!((matches[1].distance - 0.3).abs() < DISTANCE_EPSILON);

    // Requires a token
    let response = context
        .http_client
        .get(context.url(&format!("/match/{}/{embedding_id}", event.id)))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown embedding
    let response = context
        .http_client
        .get(context.url(&format!("/match/{}/999999999", event.id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
