use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::PenilaianService;
use crate::models::penilaian::requests::{CreatePenilaianData, CreatePenilaianRequest};
use crate::models::penilaian::responses::PenilaianResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::grading;
use crate::utils::validate::{validate_kehadiran, validate_nilai};

pub async fn create_penilaian(
    service: &PenilaianService,
    data: CreatePenilaianRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if !(2000..=2100).contains(&data.tahun) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Tahun harus dalam rentang 2000-2100",
        )));
    }

    // rentang nilai per mapel, dengan nama kolom di pesan error
    let nilai_fields = [
        ("matematika", data.matematika),
        ("ipa", data.ipa),
        ("ips", data.ips),
        ("b_indonesia", data.b_indonesia),
        ("b_inggris", data.b_inggris),
    ];
    for (field, value) in nilai_fields {
        if !validate_nilai(value) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Nilai {field} harus antara 0-100"),
            )));
        }
    }

    if let Some(kehadiran) = data.kehadiran {
        if !validate_kehadiran(kehadiran) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Kehadiran harus antara 0-365 hari",
            )));
        }
    }

    // siswa harus ada
    let siswa = match storage.get_siswa_by_id(data.siswa_id).await {
        Ok(Some(siswa)) => siswa,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Siswa tidak ditemukan",
            )));
        }
        Err(e) => {
            return Ok(internal_error("Terjadi kesalahan saat menyimpan penilaian", e));
        }
    };

    // satu record per (siswa, semester, tahun)
    match storage
        .find_penilaian_by_periode(data.siswa_id, data.semester, data.tahun)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Penilaian untuk siswa ini pada semester dan tahun tersebut sudah ada",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(internal_error("Terjadi kesalahan saat menyimpan penilaian", e));
        }
    }

    let nilai = [
        data.matematika,
        data.ipa,
        data.ips,
        data.b_indonesia,
        data.b_inggris,
    ];
    let (_, kategori) = grading::hitung_rata_rata(&nilai);

    // prediksi opsional; kegagalan tidak menggagalkan pembuatan record
    let prediksi = service
        .prediksi_client()
        .predict(&nilai, data.semester)
        .await;

    let created = match storage
        .create_penilaian(CreatePenilaianData {
            siswa_id: data.siswa_id,
            semester: data.semester,
            tahun: data.tahun,
            matematika: data.matematika,
            ipa: data.ipa,
            ips: data.ips,
            b_indonesia: data.b_indonesia,
            b_inggris: data.b_inggris,
            kehadiran: data.kehadiran,
            prestasi: Some(data.prestasi.unwrap_or_else(|| kategori.to_string())),
            prediksi,
            created_by: user.id,
        })
        .await
    {
        Ok(penilaian) => penilaian,
        Err(e) => {
            return Ok(internal_error("Terjadi kesalahan saat menyimpan penilaian", e));
        }
    };

    // blok walikelas untuk respons
    let walikelas = match storage
        .walikelas_ringkas_by_ids(vec![siswa.walikelas_id])
        .await
    {
        Ok(mut map) => map.remove(&siswa.walikelas_id),
        Err(e) => {
            error!("Gagal memuat walikelas untuk respons: {}", e);
            None
        }
    };

    let response = PenilaianResponse::from_penilaian(&created, Some(&siswa), walikelas);

    Ok(HttpResponse::Created().json(ApiResponse::created(
        response,
        "Penilaian berhasil disimpan",
    )))
}

fn internal_error(message: &str, e: crate::errors::SispresError) -> HttpResponse {
    error!("{}: {}", message, e);
    HttpResponse::InternalServerError().json(ApiResponse::error_detail(
        ErrorCode::InternalServerError,
        message,
        e.to_string(),
    ))
}
