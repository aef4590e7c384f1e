use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PenilaianService;
use crate::models::{ApiResponse, ErrorCode};

// Hard delete tanpa jejak audit
pub async fn delete_penilaian(
    service: &PenilaianService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_penilaian(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Penilaian berhasil dihapus",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Penilaian tidak ditemukan",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Gagal menghapus penilaian",
                e.to_string(),
            )),
        ),
    }
}
