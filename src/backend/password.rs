//! Password hashing for local identities (PBKDF2-HMAC-SHA256).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::utils::error::{AppError, AppResult};

const PBKDF2_ITERATIONS: u32 = 10_000;
const SALT_SIZE: usize = 16;
const HASH_SIZE: usize = 32;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password with a fresh salt. Returns base64 `(hash, salt)`.
pub fn hash_password(password: &str) -> (String, String) {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let hash = derive(password, &salt);
    (BASE64.encode(hash), BASE64.encode(salt))
}

/// Check a password against a stored hash and salt
pub fn verify_password(password: &str, hash: &str, salt: &str) -> AppResult<bool> {
    let salt = BASE64
        .decode(salt)
        .map_err(|e| AppError::internal(format!("Corrupt password salt: {}", e)))?;
    let expected = BASE64
        .decode(hash)
        .map_err(|e| AppError::internal(format!("Corrupt password hash: {}", e)))?;
    let actual = derive(password, &salt);

    // Compare without early exit
    if expected.len() != actual.len() {
        return Ok(false);
    }
    let diff = expected
        .iter()
        .zip(actual.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b));
    Ok(diff == 0)
}

fn derive(password: &str, salt: &[u8]) -> [u8; HASH_SIZE] {
    let mut out = [0u8; HASH_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut out);
    out
}
