use app_state::AppSettings;
use axum::extract::{FromRequestParts, State};
use color_eyre::eyre::eyre;
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::AuthClaims;
use http::request::Parts;
use http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Settings of the running API, needed for the token secret.
pub async fn request_settings<S>(parts: &mut Parts, state: &S) -> Result<AppSettings, AuthError>
where
    S: Send + Sync,
    State<AppSettings>: FromRequestParts<S>,
{
    State::<AppSettings>::from_request_parts(parts, state)
        .await
        .map(|State(settings)| settings)
        .map_err(|_| AuthError::Internal(eyre!("API settings are not available to the router.")))
}

/// The token of an `Authorization: Bearer <token>` header. The scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidToken)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok(token)
}

/// Verifies an HS256 token signed with `secret`. `sub` and `exp` are required.
pub fn verify_claims(token: &str, secret: &str) -> Result<AuthClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<AuthClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    const SECRET: &str = "middleware-secret";

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(header::AUTHORIZATION, value);
        }
        headers
    }

    fn token(sub: Uuid, expires_in: Duration) -> String {
        let claims = AuthClaims {
            sub,
            exp: (Utc::now() + expires_in).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token encodes")
    }

    #[test]
    fn test_bearer_token() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken)));
        assert!(matches!(bearer_token(&headers("Bearer abc")), Ok("abc")));
        assert!(matches!(bearer_token(&headers("bearer abc")), Ok("abc")));
        assert!(matches!(bearer_token(&headers("Basic abc")), Err(AuthError::InvalidToken)));
        assert!(matches!(bearer_token(&headers("Bearer ")), Err(AuthError::InvalidToken)));
        assert!(matches!(bearer_token(&headers("abc")), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_claims() {
        let user_id = Uuid::new_v4();

        let claims = verify_claims(&token(user_id, Duration::hours(1)), SECRET);
        assert!(matches!(claims, Ok(AuthClaims { sub, .. }) if sub == user_id));

        let expired = verify_claims(&token(user_id, Duration::hours(-1)), SECRET);
        assert!(matches!(expired, Err(AuthError::InvalidToken)));

        let wrong_secret = verify_claims(&token(user_id, Duration::hours(1)), "other-secret");
        assert!(matches!(wrong_secret, Err(AuthError::InvalidToken)));
    }
}
