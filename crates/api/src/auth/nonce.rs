//! Action-scoped request nonces.
//!
//! Short HMAC-SHA256 tokens tied to an action name and a coarse time
//! window. A token is accepted for the window it was minted in and the
//! one after it, giving an effective lifetime between half and the full
//! configured lifetime. The editor embeds a token in picker requests;
//! possession stands in for the host's edit-capability check.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Number of hex characters exposed in a token.
const TOKEN_LENGTH: usize = 16;

/// Default token lifetime: 24 hours.
const DEFAULT_LIFETIME_SECS: i64 = 86_400;

/// Configuration for nonce minting and verification.
#[derive(Debug, Clone)]
pub struct NonceConfig {
    /// HMAC-SHA256 secret used to sign tokens.
    pub secret: String,
    /// Full token lifetime in seconds; windows are half of this.
    pub lifetime_secs: i64,
}

impl NonceConfig {
    /// Load nonce configuration from environment variables.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `NONCE_SECRET`       | **yes**  | --      |
    /// | `NONCE_LIFETIME_SECS`| no       | `86400` |
    ///
    /// # Panics
    ///
    /// Panics if `NONCE_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("NONCE_SECRET").expect("NONCE_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "NONCE_SECRET must not be empty");

        let lifetime_secs: i64 = std::env::var("NONCE_LIFETIME_SECS")
            .unwrap_or_else(|_| DEFAULT_LIFETIME_SECS.to_string())
            .parse()
            .expect("NONCE_LIFETIME_SECS must be a valid i64");

        Self {
            secret,
            lifetime_secs,
        }
    }
}

/// Mint a token for the given action, valid in the current window.
pub fn create_nonce(action: &str, config: &NonceConfig) -> String {
    token_for(current_tick(config), action, config)
}

/// Check a token against the given action.
///
/// Accepts tokens from the current and the previous window, so a token
/// minted just before a window boundary stays usable.
pub fn verify_nonce(token: &str, action: &str, config: &NonceConfig) -> bool {
    let tick = current_tick(config);
    token == token_for(tick, action, config) || token == token_for(tick - 1, action, config)
}

/// Current half-lifetime window index.
fn current_tick(config: &NonceConfig) -> i64 {
    chrono::Utc::now().timestamp() / (config.lifetime_secs / 2).max(1)
}

fn token_for(tick: i64, action: &str, config: &NonceConfig) -> String {
    let mut mac =
        HmacSha256::new_from_slice(config.secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{tick}|{action}").as_bytes());
    let digest = hex::encode(mac.finalize().into_bytes());
    digest[..TOKEN_LENGTH].to_string()
}

// ---------------------------------------------------------------------------
// hex encoding helper (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes
            .as_ref()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}
