use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::UserError;

/// Hash verified when the username does not exist, so login takes the same
/// time whether the account is real or not.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("placeholder-password").expect("hashing a static password cannot fail")
});

pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| UserError::PasswordHash(err.to_string()))
}

pub fn verify_password(password: &str, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Burn a verification against a throwaway hash. Always returns false.
pub fn verify_dummy(password: &str) -> bool {
    verify_password(password, &DUMMY_HASH) && false
}
