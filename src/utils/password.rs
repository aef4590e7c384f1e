use crate::errors::SispresError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Hash password dengan Argon2id
pub fn hash_password(password: &str) -> Result<String, SispresError> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SispresError::validation(format!("Gagal melakukan hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verifikasi password terhadap hash tersimpan
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("rahasia-123").expect("hash harus berhasil");
        assert!(verify_password("rahasia-123", &hash));
        assert!(!verify_password("salah", &hash));
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(!verify_password("apapun", "bukan-hash-argon2"));
    }
}
