use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SiswaService;
use crate::models::{ApiResponse, ErrorCode};

// Hard delete; record penilaian ikut terhapus lewat cascade FK
pub async fn delete_siswa(
    service: &SiswaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_siswa(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Siswa berhasil dihapus"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Siswa tidak ditemukan",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat menghapus siswa",
                e.to_string(),
            )),
        ),
    }
}
