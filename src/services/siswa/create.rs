use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SiswaService;
use crate::models::siswa::requests::{CreateSiswaData, CreateSiswaRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, require_walikelas_id};
use crate::utils::validate::validate_name;

pub async fn create_siswa(
    service: &SiswaService,
    data: CreateSiswaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    // siswa selalu dimiliki wali kelas yang membuatnya
    let walikelas_id = match require_walikelas_id(&user) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

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

    // cek duplikat dengan kunci lengkap (name, kelas, tahun, semester, walikelas)
    match storage
        .find_siswa_by_full_key(&data.name, &data.kelas, data.tahun, data.semester, walikelas_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Siswa dengan data yang sama sudah ada",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat membuat siswa",
                    e.to_string(),
                )),
            );
        }
    }

    let created = match storage
        .create_siswa(CreateSiswaData {
            name: data.name,
            kelas: data.kelas,
            tahun: data.tahun,
            semester: data.semester,
            walikelas_id,
        })
        .await
    {
        Ok(siswa) => siswa,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat membuat siswa",
                    e.to_string(),
                )),
            );
        }
    };

    match storage.get_siswa_detail(created.id).await {
        Ok(Some(detail)) => {
            Ok(HttpResponse::Created().json(ApiResponse::created(detail, "Siswa berhasil dibuat")))
        }
        Ok(None) => Ok(HttpResponse::Created()
            .json(ApiResponse::created(created, "Siswa berhasil dibuat"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat membaca siswa",
                e.to_string(),
            )),
        ),
    }
}
