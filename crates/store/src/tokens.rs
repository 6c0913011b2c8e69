// store/tokens.rs - issuance, refresh and validation of bearer token pairs

pub mod model;

use model::{TokenPair, TokenSettings};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("client_id and client_secret required")]
    InvalidCredentials,
    #[error("Invalid refresh_token")]
    UnknownRefreshToken,
}

/// Token pairs issued by one service, keyed by refresh token.
///
/// Credentials are only checked for presence. Pairs live for the lifetime of the
/// service and are never evicted; `expires_at` is reported to clients but never
/// enforced by [`TokenService::is_access_token_valid`].
#[derive(Debug, Default)]
pub struct TokenService {
    settings: TokenSettings,
    pairs: Mutex<HashMap<String, TokenPair>>,
}

impl TokenService {
    pub fn new(settings: TokenSettings) -> Self {
        TokenService {
            settings,
            pairs: Mutex::new(HashMap::new()),
        }
    }

    // Issues a pair using the service's configured ttl
    pub fn issue(&self, client_id: &str, client_secret: &str) -> Result<TokenPair, TokenError> {
        self.issue_with_ttl(client_id, client_secret, self.settings.ttl_seconds)
    }

    pub fn issue_with_ttl(
        &self,
        client_id: &str,
        client_secret: &str,
        ttl_seconds: u64,
    ) -> Result<TokenPair, TokenError> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(TokenError::InvalidCredentials);
        }

        let pair = TokenPair {
            access_token: new_token(&self.settings.access_prefix),
            refresh_token: new_token(&self.settings.refresh_prefix),
            expires_at: expires_at(ttl_seconds),
            ttl_seconds,
        };

        debug!("Storing token pair for client {}", client_id);
        self.lock().insert(pair.refresh_token.clone(), pair.clone());

        Ok(pair)
    }

    /// Replaces the access token of the pair owning `refresh_token`.
    ///
    /// The refresh token itself is kept, so the returned pair carries the same value the
    /// caller presented. The ttl chosen at issuance is reused for the new expiry.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let mut pairs = self.lock();
        let pair = pairs
            .get_mut(refresh_token)
            .ok_or(TokenError::UnknownRefreshToken)?;

        pair.access_token = new_token(&self.settings.access_prefix);
        pair.expires_at = expires_at(pair.ttl_seconds);

        Ok(pair.clone())
    }

    pub fn is_access_token_valid(&self, access_token: &str) -> bool {
        self.lock()
            .values()
            .any(|pair| pair.access_token == access_token)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // No operation leaves a pair half-written, so a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, HashMap<String, TokenPair>> {
        self.pairs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn new_token(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4())
}

fn expires_at(ttl_seconds: u64) -> i64 {
    let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
    chrono::Utc::now().timestamp().saturating_add(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenSettings::default())
    }

    #[test]
    fn issue_rejects_missing_credentials() {
        let tokens = service();
        assert_eq!(tokens.issue("", "secret"), Err(TokenError::InvalidCredentials));
        assert_eq!(tokens.issue("demo-a", ""), Err(TokenError::InvalidCredentials));
        assert!(tokens.is_empty());
    }

    #[test]
    fn issue_returns_distinct_prefixed_tokens() {
        let tokens = service();
        let first = tokens.issue("demo-a", "x").unwrap();
        let second = tokens.issue("demo-a", "x").unwrap();

        assert!(first.access_token.starts_with("access-"));
        assert!(first.refresh_token.starts_with("refresh-"));
        assert_ne!(first.access_token, second.access_token);
        assert_ne!(first.refresh_token, second.refresh_token);
        assert_eq!(first.ttl_seconds, 300);
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn expiry_is_ttl_ahead_of_issuance() {
        let tokens = service();
        let before = chrono::Utc::now().timestamp();
        let pair = tokens.issue_with_ttl("demo-a", "x", 60).unwrap();
        let after = chrono::Utc::now().timestamp();

        assert!(pair.expires_at >= before + 60);
        assert!(pair.expires_at <= after + 60);
    }

    #[test]
    fn refresh_rotates_access_token_only() {
        let tokens = service();
        let issued = tokens.issue_with_ttl("demo-a", "x", 42).unwrap();
        let refreshed = tokens.refresh(&issued.refresh_token).unwrap();

        assert_eq!(refreshed.refresh_token, issued.refresh_token);
        assert_ne!(refreshed.access_token, issued.access_token);
        assert_eq!(refreshed.ttl_seconds, 42);
        assert!(!tokens.is_access_token_valid(&issued.access_token));
        assert!(tokens.is_access_token_valid(&refreshed.access_token));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn refresh_moves_expiry_forward() {
        let tokens = service();
        let issued = tokens.issue_with_ttl("demo-a", "x", 60).unwrap();
        // pretend the pair was issued long ago
        tokens
            .lock()
            .get_mut(&issued.refresh_token)
            .unwrap()
            .expires_at = 0;

        let before = chrono::Utc::now().timestamp();
        let refreshed = tokens.refresh(&issued.refresh_token).unwrap();
        let after = chrono::Utc::now().timestamp();

        assert!(refreshed.expires_at >= before + 60);
        assert!(refreshed.expires_at <= after + 60);
        assert_eq!(
            tokens.lock()[&issued.refresh_token].expires_at,
            refreshed.expires_at
        );
    }

    #[test]
    fn refresh_rejects_unknown_token() {
        let tokens = service();
        tokens.issue("demo-a", "x").unwrap();

        assert_eq!(
            tokens.refresh("refresh-unknown"),
            Err(TokenError::UnknownRefreshToken)
        );
        assert_eq!(tokens.refresh(""), Err(TokenError::UnknownRefreshToken));
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let tokens = service();
        let pair = tokens.issue("demo-a", "x").unwrap();

        assert!(!tokens.is_access_token_valid(&pair.refresh_token));
        assert!(tokens.refresh(&pair.access_token).is_err());
    }

    #[test]
    fn custom_prefixes_are_applied() {
        let tokens = TokenService::new(TokenSettings {
            ttl_seconds: 10,
            access_prefix: "at_".to_string(),
            refresh_prefix: "rt_".to_string(),
        });
        let pair = tokens.issue("demo-b", "y").unwrap();

        assert!(pair.access_token.starts_with("at_"));
        assert!(pair.refresh_token.starts_with("rt_"));
        assert_eq!(pair.ttl_seconds, 10);
    }
}
