//! Caller identity resolution.
//!
//! The caller presents an opaque session token in the `token` cookie, or in
//! a `?token=` query parameter for WebSocket clients that cannot set cookies.
//! The token is looked up in the session store; the username is never taken
//! from the request itself. Callers without a known token are given a fresh
//! anonymous session, which is handed back to them with `Set-Cookie` so later
//! requests keep it.

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRequestParts, Query},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    response::{IntoResponseParts, ResponseParts},
};
use serde::Deserialize;

use crate::{
    domain::{SessionToken, Username},
    usecase::Session,
};

use super::{error::ApiError, state::AppState};

/// Name of the cookie (and query parameter) carrying the caller's token
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Resolved identity of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: Username,
    pub token: SessionToken,
    /// True when the session was created for this request
    pub issued: bool,
}

impl From<Session> for Identity {
    fn from(session: Session) -> Self {
        Self {
            username: session.username,
            token: session.token,
            issued: session.issued,
        }
    }
}

fn token_from_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
}

fn token_from_request(parts: &Parts) -> Option<String> {
    token_from_cookie(&parts.headers).or_else(|| {
        Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.token)
    })
}

impl FromRequestParts<Arc<AppState>> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_request(parts);
        let session = state.authenticate_usecase.resolve(token.as_deref()).await?;
        if session.issued {
            tracing::debug!("Issued anonymous session for '{}'", session.username);
        }
        Ok(session.into())
    }
}

impl IntoResponseParts for Identity {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.issued {
            let cookie = format!(
                "{TOKEN_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict",
                self.token.as_str()
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                res.headers_mut().append(SET_COOKIE, value);
            }
        }
        Ok(res)
    }
}
