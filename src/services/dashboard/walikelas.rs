//! Statistik untuk satu wali kelas

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::common::periode::{Semester, parse_tahun};
use crate::models::dashboard::responses::{
    DashboardQuery, PrestasiCount, WalikelasStatisticsResponse, WalikelasSummary,
};
use crate::models::penilaian::requests::PenilaianFilter;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::grading::{self, Kategori};

const MAX_AGGREGATE_ROWS: u64 = 50_000;

pub async fn get_walikelas_statistics(
    service: &DashboardService,
    walikelas_id: i64,
    query: DashboardQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // wali kelas hanya boleh melihat statistik miliknya sendiri
    if user.role == UserRole::WaliKelas {
        let milik_sendiri = user
            .walikelas
            .as_ref()
            .map(|w| w.id == walikelas_id)
            .unwrap_or(false);
        if !milik_sendiri {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Tidak boleh melihat statistik wali kelas lain",
            )));
        }
    }

    match storage.get_walikelas_by_id(walikelas_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Data wali kelas tidak ditemukan",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat mengambil data statistik wali kelas",
                    e.to_string(),
                )),
            );
        }
    }

    let tahun = query.tahun.as_deref().and_then(parse_tahun);
    let semester = match query.semester.as_deref() {
        Some(raw) => match raw.parse::<Semester>() {
            Ok(semester) => Some(semester),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
            }
        },
        None => None,
    };

    let baris = match storage
        .list_penilaian_filtered(
            PenilaianFilter {
                tahun,
                semester,
                walikelas_id: Some(walikelas_id),
                ..Default::default()
            },
            MAX_AGGREGATE_ROWS,
        )
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat mengambil data statistik wali kelas",
                    e.to_string(),
                )),
            );
        }
    };

    let total_siswa = storage
        .count_siswa(tahun, semester, Some(walikelas_id))
        .await
        .unwrap_or(0);
    let total_kelas = storage
        .distinct_kelas(tahun, semester, Some(walikelas_id))
        .await
        .map(|kelas| kelas.len())
        .unwrap_or(0);

    let mut total_nilai = 0.0;
    let mut total_kehadiran = 0.0;
    let mut count_kehadiran = 0usize;
    let mut distribusi: HashMap<Kategori, i64> = HashMap::new();

    for item in &baris {
        let (rata, kategori) = grading::hitung_rata_rata(&item.penilaian.nilai());
        total_nilai += rata;
        *distribusi.entry(kategori).or_insert(0) += 1;
        if let Some(pct) = item.penilaian.persentase_kehadiran() {
            total_kehadiran += pct;
            count_kehadiran += 1;
        }
    }

    let avg_nilai = if baris.is_empty() {
        0.0
    } else {
        grading::round2(total_nilai / baris.len() as f64)
    };
    let avg_kehadiran = if count_kehadiran == 0 {
        0.0
    } else {
        grading::round2(total_kehadiran / count_kehadiran as f64)
    };

    let prestasi_distribution: Vec<PrestasiCount> = Kategori::ALL
        .iter()
        .map(|kategori| PrestasiCount {
            prestasi: kategori.to_string(),
            count: distribusi.get(kategori).copied().unwrap_or(0),
        })
        .collect();

    let response = WalikelasStatisticsResponse {
        summary: WalikelasSummary {
            total_siswa,
            avg_nilai,
            avg_kehadiran,
            total_kelas,
        },
        prestasi_distribution,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Statistik wali kelas berhasil diambil",
    )))
}
