use serde::Deserialize;
use utoipa::IntoParams;

pub use crate::database::MatchResult;

#[derive(Deserialize, IntoParams, Debug, Clone, Copy)]
#[into_params(parameter_in = Path)]
pub struct EmbeddingMatchPath {
    pub event_id: i64,
    pub embedding_id: i64,
}
