//! Initiator authorization.
//!
//! Only the survey initiator may read the aggregate tally. The check is
//! behind [`CredentialVerifier`] so the results route does not care which
//! scheme is configured.

use std::fmt;
use uuid::Uuid;

/// Decides whether a presented credential belongs to the initiator.
pub trait CredentialVerifier: Send + Sync {
    /// `None` means the caller presented nothing at all.
    fn verify(&self, presented: Option<&str>) -> bool;

    /// Short scheme name for startup logs.
    fn scheme(&self) -> &'static str;
}

/// Plain shared bearer secret, compared in constant time.
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(candidate) if !candidate.is_empty() && !self.secret.is_empty() => {
                constant_time_eq(candidate.as_bytes(), self.secret.as_bytes())
            }
            _ => false,
        }
    }

    fn scheme(&self) -> &'static str {
        "shared-secret"
    }
}

/// Holds only a bcrypt hash of the initiator secret.
pub struct BcryptSecretVerifier {
    hash: String,
}

impl BcryptSecretVerifier {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }
}

impl CredentialVerifier for BcryptSecretVerifier {
    fn verify(&self, presented: Option<&str>) -> bool {
        match presented {
            Some(candidate) if !candidate.is_empty() => {
                bcrypt::verify(candidate, &self.hash).unwrap_or(false)
            }
            _ => false,
        }
    }

    fn scheme(&self) -> &'static str {
        "bcrypt"
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// The initiator secret for this process: configured, or generated once at
/// startup and kept for the process lifetime.
#[derive(Clone)]
pub struct InitiatorSecret {
    value: String,
    generated: bool,
}

impl InitiatorSecret {
    /// Blank configured values count as unset.
    pub fn resolve(configured: Option<&str>) -> Self {
        match configured.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => Self {
                value: value.to_string(),
                generated: false,
            },
            None => Self {
                value: Uuid::new_v4().simple().to_string(),
                generated: true,
            },
        }
    }

    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn was_generated(&self) -> bool {
        self.generated
    }

    pub fn into_verifier(self) -> SharedSecretVerifier {
        SharedSecretVerifier::new(self.value)
    }
}

impl fmt::Debug for InitiatorSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitiatorSecret")
            .field("value", &"<redacted>")
            .field("generated", &self.generated)
            .finish()
    }
}
