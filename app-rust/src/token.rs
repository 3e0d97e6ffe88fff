use crate::{storage::KeyValueStore, AppResult};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::warn;

/// Store key of the persisted access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Lifetime of a freshly issued token, in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// The persisted token together with its cookie attributes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub value: String,
    pub expires_at: DateTime<Utc>,
    /// Only ever sent over secure transport.
    pub secure: bool,
    pub same_site: SameSite,
}

impl TokenRecord {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRecord")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("secure", &self.secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

/// Holds the bearer token used to authenticate backend calls. It is the only
/// authentication state that survives a reload.
///
/// A missing or expired token is the normal anonymous state, not an error.
pub struct TokenCarrier {
    store: Arc<dyn KeyValueStore>,
}

impl TokenCarrier {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Store `value` with the standard seven day lifetime.
    pub fn set(&self, value: &str) -> AppResult<()> {
        self.set_with_ttl(value, TimeDelta::days(TOKEN_TTL_DAYS))
    }

    pub fn set_with_ttl(&self, value: &str, ttl: TimeDelta) -> AppResult<()> {
        let record = TokenRecord {
            value: value.to_string(),
            expires_at: Utc::now() + ttl,
            secure: true,
            same_site: SameSite::Strict,
        };
        self.store
            .set(ACCESS_TOKEN_KEY, &serde_json::to_string(&record)?)
    }

    /// The current token, read at call time.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.record().map(|record| record.value)
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    /// The live record, if any. Expired and unreadable records read as absent.
    #[must_use]
    pub fn record(&self) -> Option<TokenRecord> {
        let raw = match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read the access token");
                return None;
            }
        };

        match serde_json::from_str::<TokenRecord>(&raw) {
            Ok(record) if record.is_expired(Utc::now()) => None,
            Ok(record) => Some(record),
            Err(error) => {
                warn!(%error, "ignoring unreadable access token record");
                None
            }
        }
    }

    /// Forget the token, ending the persisted session.
    pub fn clear(&self) -> AppResult<()> {
        self.store.remove(ACCESS_TOKEN_KEY)
    }
}
