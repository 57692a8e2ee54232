//! Client identity tokens
//!
//! The service scopes uploads and downloads by a caller-chosen `userId`.
//! Identities are short random strings; collisions are possible and accepted.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const IDENTITY_PREFIX: &str = "user_";
const IDENTITY_LEN: usize = 9;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque token identifying a logical caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of client identities, called once per facade instance
pub trait IdentityProvider: Send + Sync {
    fn generate(&self) -> ClientIdentity;
}

/// Generates `user_` followed by nine random base-36 characters
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentity;

impl IdentityProvider for RandomIdentity {
    fn generate(&self) -> ClientIdentity {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..IDENTITY_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        ClientIdentity(format!("{IDENTITY_PREFIX}{suffix}"))
    }
}

/// Always hands out the same identity
#[derive(Debug, Clone)]
pub struct FixedIdentity(ClientIdentity);

impl FixedIdentity {
    pub fn new(token: impl Into<String>) -> Self {
        Self(ClientIdentity::new(token))
    }
}

impl IdentityProvider for FixedIdentity {
    fn generate(&self) -> ClientIdentity {
        self.0.clone()
    }
}
