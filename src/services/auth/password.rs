use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::users::requests::ChangePasswordRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password;

pub async fn change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Silakan login terlebih dahulu",
        )));
    };

    if let Err(msg) = validate_password(&change_request.new_password) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    if !verify_password(&change_request.current_password, &user.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Password saat ini salah",
        )));
    }

    let new_password = change_request.new_password.clone();
    let password_hash = match tokio::task::spawn_blocking(move || hash_password(&new_password))
        .await
    {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Gagal memproses password",
                    e.to_string(),
                )),
            );
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Gagal memproses password",
                    e.to_string(),
                )),
            );
        }
    };

    match storage.update_password(user.id, &password_hash).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Password berhasil diganti",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "User tidak ditemukan",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat mengganti password",
                e.to_string(),
            )),
        ),
    }
}
