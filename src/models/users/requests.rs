use serde::Deserialize;

use super::entities::UserRole;

// Data pembuatan user di lapisan storage (password sudah berupa hash)
#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: UserRole,
    // profil wali kelas, dibuat satu transaksi dengan user
    pub sekolah: Option<String>,
    pub jurusan: Option<String>,
}

// Update user oleh operator
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub sekolah: Option<String>,
    pub jurusan: Option<String>,
}

// Update profil oleh pemilik akun
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub sekolah: Option<String>,
    pub jurusan: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
