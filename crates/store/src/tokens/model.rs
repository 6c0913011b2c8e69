// tokens/model.rs - token pair record and issuance settings

pub const DEFAULT_TTL_SECONDS: u64 = 300;
pub const DEFAULT_ACCESS_PREFIX: &str = "access-";
pub const DEFAULT_REFRESH_PREFIX: &str = "refresh-";

/// A bearer token pair as held by a token service.
///
/// The refresh token is fixed at issuance and keys the pair. The access token and
/// `expires_at` are replaced on every refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64, // UTC timestamp, informational only
    pub ttl_seconds: u64,
}

// Settings applied to every pair a service issues
#[derive(Clone, Debug)]
pub struct TokenSettings {
    pub ttl_seconds: u64,
    pub access_prefix: String,
    pub refresh_prefix: String,
}

impl Default for TokenSettings {
    fn default() -> Self {
        TokenSettings {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            access_prefix: DEFAULT_ACCESS_PREFIX.to_string(),
            refresh_prefix: DEFAULT_REFRESH_PREFIX.to_string(),
        }
    }
}
