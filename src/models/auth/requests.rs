use serde::Deserialize;

use crate::models::users::entities::UserRole;

// Registrasi akun baru
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: UserRole,
    /// Metadata wali kelas; diabaikan bila role operator
    pub sekolah: Option<String>,
    pub jurusan: Option<String>,
}

// Login (email + password)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}
