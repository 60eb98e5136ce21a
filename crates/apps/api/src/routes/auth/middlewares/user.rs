use crate::auth::middlewares::common::{bearer_token, request_settings, verify_claims};
use app_state::AppSettings;
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::AuthUser;

/// Requires a valid bearer token and makes the caller available as `Extension<AuthUser>`.
#[derive(Clone, Debug)]
pub struct ApiUser(pub AuthUser);

impl<S> FromRequestParts<S> for ApiUser
where
    S: Send + Sync,
    State<AppSettings>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?.to_owned();
        let settings = request_settings(parts, state).await?;
        let claims = verify_claims(&token, &settings.secrets.jwt)?;
        let user = AuthUser::from(claims);
        parts.extensions.insert(user);
        Ok(Self(user))
    }
}
