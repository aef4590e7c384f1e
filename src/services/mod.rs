pub mod auth;
pub mod dashboard;
pub mod penilaian;
pub mod siswa;
pub mod users;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use penilaian::PenilaianService;
pub use siswa::SiswaService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// Principal terautentikasi; 401 bila middleware tidak memasangnya
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Silakan login terlebih dahulu",
        ))
    })
}

/// walikelas_id milik principal; 404 bila user tidak punya profil wali kelas
pub(crate) fn require_walikelas_id(user: &User) -> Result<i64, HttpResponse> {
    user.walikelas.as_ref().map(|w| w.id).ok_or_else(|| {
        HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Data wali kelas tidak ditemukan untuk user ini",
        ))
    })
}

/// Scope data untuk endpoint list/agregasi: operator tanpa batasan;
/// walikelas selalu dipaksa ke miliknya sendiri, apa pun filter kirimannya
pub(crate) fn scoped_walikelas_id(user: &User) -> Result<Option<i64>, HttpResponse> {
    match user.role {
        UserRole::Operator => Ok(None),
        UserRole::WaliKelas => require_walikelas_id(user).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::WalikelasProfile;

    fn user_dengan_role(role: UserRole, walikelas: Option<WalikelasProfile>) -> User {
        User {
            id: 1,
            name: "Guru".to_string(),
            email: "guru@sekolah.sch.id".to_string(),
            password_hash: String::new(),
            phone: None,
            role,
            walikelas,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn profil(id: i64) -> WalikelasProfile {
        WalikelasProfile {
            id,
            user_id: 1,
            sekolah: None,
            jurusan: None,
        }
    }

    #[test]
    fn test_operator_tanpa_scope() {
        let user = user_dengan_role(UserRole::Operator, None);
        assert_eq!(scoped_walikelas_id(&user).unwrap(), None);
    }

    #[test]
    fn test_walikelas_selalu_discope_ke_miliknya() {
        let user = user_dengan_role(UserRole::WaliKelas, Some(profil(7)));
        assert_eq!(scoped_walikelas_id(&user).unwrap(), Some(7));
    }

    #[test]
    fn test_walikelas_tanpa_profil_ditolak() {
        let user = user_dengan_role(UserRole::WaliKelas, None);
        assert!(scoped_walikelas_id(&user).is_err());
        assert!(require_walikelas_id(&user).is_err());
    }
}
