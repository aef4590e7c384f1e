use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::responses::UserListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_users(service: &UserService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users().await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserListResponse { users },
            "Daftar user berhasil diambil",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Gagal mengambil daftar user",
                e.to_string(),
            )),
        ),
    }
}
