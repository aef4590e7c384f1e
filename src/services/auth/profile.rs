use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{UpdateProfileRequest, UpdateUserRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_name, validate_phone};

pub async fn get_profile(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // principal sudah dimuat lengkap oleh middleware
    match RequireJWT::extract_user(request) {
        Some(user) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Profil berhasil diambil")))
        }
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Silakan login terlebih dahulu",
        ))),
    }
}

pub async fn update_profile(
    service: &AuthService,
    update: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Silakan login terlebih dahulu",
        )));
    };

    if let Some(ref name) = update.name {
        if let Err(msg) = validate_name(name) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }
    if let Some(ref phone) = update.phone {
        if let Err(msg) = validate_phone(phone) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }

    // kolom sekolah/jurusan hanya relevan untuk wali kelas
    let (sekolah, jurusan) = if user.role == UserRole::WaliKelas {
        (update.sekolah, update.jurusan)
    } else {
        (None, None)
    };

    let data = UpdateUserRequest {
        name: update.name,
        email: None,
        phone: update.phone,
        role: None,
        sekolah,
        jurusan,
    };

    match storage.update_user(user.id, data).await {
        Ok(Some(updated)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Profil berhasil diupdate")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "User tidak ditemukan",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat update profil",
                e.to_string(),
            )),
        ),
    }
}
