//! Admin Password Value Objects
//!
//! Domain wrappers around `platform::password`.
//! [`RawPassword`] is what the client typed; [`PasswordDigest`] is what the
//! credential store keeps.

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

use crate::error::AuthResult;

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash (PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(HashedPassword);

impl PasswordDigest {
    /// Hash a raw password (Argon2id, CPU-bound; call off the async workers)
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        Ok(Self(raw.inner().hash(pepper)?))
    }

    /// Wrap the value stored in the database.
    ///
    /// No parsing happens here; a corrupt value just fails every verify.
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(value))
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&"[HASH]").finish()
    }
}

/// Hash on the blocking pool
pub async fn hash_blocking(raw: RawPassword, pepper: Option<Vec<u8>>) -> AuthResult<PasswordDigest> {
    tokio::task::spawn_blocking(move || PasswordDigest::from_raw(&raw, pepper.as_deref())).await?
}

/// Verify on the blocking pool
pub async fn verify_blocking(
    digest: PasswordDigest,
    raw: RawPassword,
    pepper: Option<Vec<u8>>,
) -> AuthResult<bool> {
    let verified =
        tokio::task::spawn_blocking(move || digest.verify(&raw, pepper.as_deref())).await?;
    Ok(verified)
}
