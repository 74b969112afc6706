use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Header carrying the caller's self-reported user id.
pub const USER_ID_HEADER: &str = "user-id";

/// Raw `user-id` header value, if the client sent one. Whether it names a
/// logged-in user is decided by the service layer.
pub struct CallerId(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).trim().to_string());
        Ok(CallerId(id))
    }
}
