use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::WebError;

/// Bearer API-key check for mutating routes. An empty key set lets every
/// request through.
pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    if api_keys.is_empty() {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match token {
        Some(token) if api_keys.is_valid(token) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key attempt");
            Err(WebError::Unauthorized)
        }
        None => {
            tracing::warn!("Missing bearer token on protected route");
            Err(WebError::Unauthorized)
        }
    }
}

#[derive(Clone, Default)]
pub struct ApiKeys {
    keys: Arc<HashSet<String>>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            keys: Arc::new(keys),
        }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}
