// auth.rs - bearer token checks guarding the resource routes

use super::error::ApiError;
use actix_web::{
    dev::Payload,
    http::header::{HeaderMap, AUTHORIZATION},
    web::Data,
    FromRequest, HttpRequest,
};
use futures::future::{ready, Ready};
use store::TokenService;
use tracing::{debug, warn};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthDenied {
    #[error("Missing access token")]
    MissingToken,
    #[error("Invalid access token")]
    InvalidToken,
}

/// Proof that the request carried an access token known to the service's
/// [`TokenService`]. Taking it as the first handler argument rejects the request
/// before its body is looked at.
#[derive(Debug)]
pub struct Authorized;

impl FromRequest for Authorized {
    type Error = ApiError;
    type Future = Ready<Result<Authorized, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let res = match req.app_data::<Data<TokenService>>() {
            Some(tokens) => {
                debug!("Checking authorization...");
                authorize_headers(req.headers(), tokens)
                    .map(|_| Authorized)
                    .map_err(ApiError::from)
            }
            None => Err(ApiError::Internal("Token service not configured")),
        };

        ready(res)
    }
}

// Strips a case-insensitive "Bearer" scheme followed by whitespace. Anything else is
// returned untouched and checked as the token itself.
pub fn bearer_token(header: &str) -> &str {
    if let Some(scheme) = header.get(..6) {
        if scheme.eq_ignore_ascii_case("bearer") {
            let rest = &header[6..];
            let token = rest.trim_start();
            if token.len() < rest.len() {
                return token;
            }
        }
    }
    header
}

pub fn authorize(header: &str, tokens: &TokenService) -> Result<(), AuthDenied> {
    let token = bearer_token(header);
    if token.is_empty() {
        warn!("Request without access token");
        return Err(AuthDenied::MissingToken);
    }

    if !tokens.is_access_token_valid(token) {
        warn!("Request with unknown access token");
        return Err(AuthDenied::InvalidToken);
    }

    debug!("Access token accepted");
    Ok(())
}

fn authorize_headers(headers: &HeaderMap, tokens: &TokenService) -> Result<(), AuthDenied> {
    match headers.get(AUTHORIZATION) {
        None => authorize("", tokens),
        Some(value) => match value.to_str() {
            Ok(header) => authorize(header, tokens),
            Err(_) => {
                warn!("Authorization header is not valid text");
                Err(AuthDenied::InvalidToken)
            }
        },
    }
}
