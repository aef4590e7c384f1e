use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SiswaService;
use crate::models::siswa::requests::UpdateSiswaRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_name;

pub async fn update_siswa(
    service: &SiswaService,
    id: i64,
    data: UpdateSiswaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_name(&data.name) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }
    if data.kelas.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Kelas tidak boleh kosong",
        )));
    }
    if !(2000..=2100).contains(&data.tahun) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Tahun harus dalam rentang 2000-2100",
        )));
    }

    match storage.update_siswa(id, data).await {
        Ok(Some(_)) => match storage.get_siswa_detail(id).await {
            Ok(Some(detail)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(detail, "Siswa berhasil diupdate"))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Siswa tidak ditemukan",
            ))),
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat membaca siswa",
                    e.to_string(),
                )),
            ),
        },
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Siswa tidak ditemukan",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat mengupdate siswa",
                e.to_string(),
            )),
        ),
    }
}
