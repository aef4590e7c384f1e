use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PenilaianService;
use crate::models::penilaian::responses::{
    PenilaianResponse, PerkembanganItem, RiwayatSiswaResponse, RiwayatSummary,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::grading;

/// Riwayat penilaian satu siswa beserta ringkasan perkembangannya
pub async fn get_penilaian_by_siswa(
    service: &PenilaianService,
    siswa_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let siswa_detail = match storage.get_siswa_detail(siswa_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Siswa tidak ditemukan",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Gagal mengambil data penilaian siswa",
                    e.to_string(),
                )),
            );
        }
    };

    let penilaian_list = match storage.list_penilaian_by_siswa(siswa_id).await {
        Ok(list) => list,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Gagal mengambil data penilaian siswa",
                    e.to_string(),
                )),
            );
        }
    };

    if penilaian_list.is_empty() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Belum ada data penilaian untuk siswa ini",
        )));
    }

    let formatted: Vec<PenilaianResponse> = penilaian_list
        .iter()
        .map(|p| PenilaianResponse::from_penilaian(p, Some(&siswa_detail.siswa), None))
        .collect();

    // ringkasan perkembangan antar periode
    let perkembangan: Vec<PerkembanganItem> = formatted
        .iter()
        .map(|item| PerkembanganItem {
            periode: item.periode.label.clone(),
            rata_rata_aktual: item.data_aktual.nilai.rata_rata,
            rata_rata_prediksi: item
                .data_prediksi
                .as_ref()
                .and_then(|p| p.nilai.as_ref())
                .map(|n| n.rata_rata),
            kategori_aktual: item.data_aktual.kategori.prestasi,
            kategori_prediksi: item
                .data_prediksi
                .as_ref()
                .filter(|p| p.is_valid())
                .map(|p| p.kategori_prestasi.clone()),
            tren: item
                .perbandingan
                .as_ref()
                .map(|p| p.tren.clone())
                .unwrap_or_else(|| "Tidak tersedia".to_string()),
        })
        .collect();

    let total_rata: f64 = formatted
        .iter()
        .map(|item| item.data_aktual.nilai.rata_rata)
        .sum();
    let rata_rata_keseluruhan = grading::round2(total_rata / formatted.len() as f64);

    let response = RiwayatSiswaResponse {
        siswa: siswa_detail,
        summary: RiwayatSummary {
            total_semester: formatted.len(),
            rata_rata_keseluruhan,
            perkembangan,
        },
        penilaian: formatted,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Data penilaian siswa berhasil diambil",
    )))
}
