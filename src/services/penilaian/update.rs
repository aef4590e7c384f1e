use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::PenilaianService;
use crate::models::penilaian::requests::{UpdatePenilaianData, UpdatePenilaianRequest};
use crate::models::penilaian::responses::PenilaianResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::grading;
use crate::utils::validate::{validate_kehadiran, validate_nilai};

pub async fn update_penilaian(
    service: &PenilaianService,
    id: i64,
    data: UpdatePenilaianRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_penilaian_by_id(id).await {
        Ok(Some(penilaian)) => penilaian,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Penilaian tidak ditemukan",
            )));
        }
        Err(e) => {
            return Ok(internal_error("Gagal mengupdate penilaian", e));
        }
    };

    let nilai_fields = [
        ("matematika", data.matematika),
        ("ipa", data.ipa),
        ("ips", data.ips),
        ("b_indonesia", data.b_indonesia),
        ("b_inggris", data.b_inggris),
    ];
    for (field, value) in nilai_fields {
        if let Some(value) = value {
            if !validate_nilai(value) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("Nilai {field} harus antara 0-100"),
                )));
            }
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

    let ada_perubahan_nilai = data.matematika.is_some()
        || data.ipa.is_some()
        || data.ips.is_some()
        || data.b_indonesia.is_some()
        || data.b_inggris.is_some();

    let mut update = UpdatePenilaianData {
        matematika: data.matematika,
        ipa: data.ipa,
        ips: data.ips,
        b_indonesia: data.b_indonesia,
        b_inggris: data.b_inggris,
        kehadiran: data.kehadiran,
        prestasi: data.prestasi.clone(),
        prediksi: None,
    };

    if ada_perubahan_nilai {
        // nilai final = kiriman request digabung nilai lama
        let nilai_final = [
            data.matematika.unwrap_or(existing.matematika),
            data.ipa.unwrap_or(existing.ipa),
            data.ips.unwrap_or(existing.ips),
            data.b_indonesia.unwrap_or(existing.b_indonesia),
            data.b_inggris.unwrap_or(existing.b_inggris),
        ];

        // label prestasi tersimpan ikut dihitung ulang, kecuali dioverride
        if data.prestasi.is_none() {
            let (_, kategori) = grading::hitung_rata_rata(&nilai_final);
            update.prestasi = Some(kategori.to_string());
        }

        // nilai berubah: prediksi diminta ulang; hasil gagal menulis null
        let prediksi = service
            .prediksi_client()
            .predict(&nilai_final, existing.semester)
            .await;
        update.prediksi = Some(prediksi);
    }

    let updated = match storage.update_penilaian(id, update).await {
        Ok(Some(penilaian)) => penilaian,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Penilaian tidak ditemukan",
            )));
        }
        Err(e) => {
            return Ok(internal_error("Gagal mengupdate penilaian", e));
        }
    };

    let siswa = match storage.get_siswa_by_id(updated.siswa_id).await {
        Ok(siswa) => siswa,
        Err(e) => {
            error!("Gagal memuat siswa untuk penilaian {}: {}", id, e);
            None
        }
    };

    let response = PenilaianResponse::from_penilaian(&updated, siswa.as_ref(), None);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Penilaian berhasil diupdate",
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
