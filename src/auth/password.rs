use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::errors::ServiceError;

/// How credentials are hashed before they are stored.
///
/// `Sha256` is an unsalted digest of the UTF-8 plaintext. It only exists so
/// stores written by older deployments keep working and should not be chosen
/// for new ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PasswordScheme {
    #[default]
    Argon2,
    Sha256,
}

impl PasswordScheme {
    pub fn hash(&self, plaintext: &str) -> Result<String, ServiceError> {
        match self {
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(plaintext.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| ServiceError::HashError(e.to_string()))
            }
            PasswordScheme::Sha256 => Ok(sha256_hex(plaintext)),
        }
    }

    /// Checks `plaintext` against a stored hash.
    ///
    /// The stored value decides the algorithm, so rows written under either
    /// scheme keep verifying after the configured scheme changes.
    pub fn verify(plaintext: &str, stored: &str) -> Result<bool, ServiceError> {
        if stored.starts_with('$') {
            let parsed =
                PasswordHash::new(stored).map_err(|e| ServiceError::HashError(e.to_string()))?;
            Ok(Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok())
        } else {
            Ok(sha256_hex(plaintext) == stored)
        }
    }
}

fn sha256_hex(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}
