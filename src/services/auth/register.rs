use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::users::requests::CreateUserData;
use crate::models::{ApiResponse, ErrorCode, auth::RegisterRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password, validate_phone};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_name(&register_request.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }
    if let Some(ref phone) = register_request.phone {
        if let Err(msg) = validate_phone(phone) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
    }

    // cek email sudah terpakai
    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Email sudah terdaftar",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat registrasi user",
                    e.to_string(),
                )),
            );
        }
    }

    // hash argon2 cukup berat, jangan blokir worker
    let password = register_request.password.clone();
    let password_hash = match tokio::task::spawn_blocking(move || hash_password(&password)).await {
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

    // user + profil wali kelas dibuat satu transaksi di lapisan storage
    let data = CreateUserData {
        name: register_request.name,
        email: register_request.email,
        password_hash,
        phone: register_request.phone,
        role: register_request.role,
        sekolah: register_request.sekolah,
        jurusan: register_request.jurusan,
    };

    match storage.create_user(data).await {
        Ok(user) => {
            tracing::info!("User {} terdaftar (role: {})", user.email, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::created(user, "Registrasi berhasil")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat registrasi user",
                e.to_string(),
            )),
        ),
    }
}
