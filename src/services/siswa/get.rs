use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SiswaService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_siswa(
    service: &SiswaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_siswa_detail(id).await {
        Ok(Some(detail)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Data siswa berhasil diambil")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Siswa tidak ditemukan",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat mengambil data siswa",
                e.to_string(),
            )),
        ),
    }
}
