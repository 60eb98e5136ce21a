use crate::database::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// --- Request Payloads ---

/// Body of event create and update requests. On update, title and description are replaced
/// as given, and the date is kept when omitted.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Defaults to now when creating an event.
    pub date: Option<DateTime<Utc>>,
}

// --- URL/Path Parameters ---

#[derive(Deserialize, IntoParams, Debug, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListEventsParams {
    /// Page size, 100 by default and at most 500.
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// --- Response Payloads ---

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    /// Whether the caller owns this event.
    pub is_owner: bool,
}

impl EventResponse {
    #[must_use]
    pub fn new(event: Event, viewer_id: Uuid) -> Self {
        Self {
            is_owner: event.owner_id == viewer_id,
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
        }
    }
}
