//! Agregasi statistik dashboard.
//!
//! Rollup dihitung di lapisan service dari baris penilaian yang sudah
//! discope; rata-rata dan kategori selalu hasil hitung ulang, bukan kolom
//! tersimpan.

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::common::periode::{Semester, parse_tahun};
use crate::models::dashboard::responses::{
    AvgPerKelas, DashboardCharts, DashboardQuery, DashboardStatisticsResponse, DashboardSummary,
    PrestasiCount, PrestasiPerSemester, TrendPerTahun,
};
use crate::models::penilaian::entities::PenilaianWithSiswa;
use crate::models::penilaian::requests::PenilaianFilter;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, scoped_walikelas_id};
use crate::utils::grading::{self, Kategori};

// Batas pengambilan baris untuk agregasi
const MAX_AGGREGATE_ROWS: u64 = 50_000;

pub async fn get_statistics(
    service: &DashboardService,
    query: DashboardQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let walikelas_scope = match scoped_walikelas_id(&user) {
        Ok(scope) => scope,
        Err(response) => return Ok(response),
    };

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

    // satu kali ambil (hanya scope); filter tahun/semester diterapkan
    // in-memory supaya trend per tahun tetap melihat seluruh riwayat
    let semua_baris = match storage
        .list_penilaian_filtered(
            PenilaianFilter {
                walikelas_id: walikelas_scope,
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
                    "Terjadi kesalahan saat mengambil data statistik",
                    e.to_string(),
                )),
            );
        }
    };

    let terfilter: Vec<&PenilaianWithSiswa> = semua_baris
        .iter()
        .filter(|item| tahun.is_none_or(|t| item.penilaian.tahun == t))
        .filter(|item| semester.is_none_or(|s| item.penilaian.semester == s))
        .collect();

    let total_walikelas = storage.count_walikelas().await.unwrap_or(0);
    let total_siswa = storage
        .count_siswa(tahun, semester, walikelas_scope)
        .await
        .unwrap_or(0);
    let total_kelas = storage
        .distinct_kelas(tahun, semester, walikelas_scope)
        .await
        .map(|kelas| kelas.len())
        .unwrap_or(0);

    // rata-rata nilai dan kehadiran
    let mut total_nilai = 0.0;
    let mut total_kehadiran = 0.0;
    let mut count_kehadiran = 0usize;
    for item in &terfilter {
        let (rata, _) = grading::hitung_rata_rata(&item.penilaian.nilai());
        total_nilai += rata;
        if let Some(pct) = item.penilaian.persentase_kehadiran() {
            total_kehadiran += pct;
            count_kehadiran += 1;
        }
    }
    let avg_nilai = if terfilter.is_empty() {
        0.0
    } else {
        grading::round2(total_nilai / terfilter.len() as f64)
    };
    let avg_kehadiran = if count_kehadiran == 0 {
        0.0
    } else {
        grading::round2(total_kehadiran / count_kehadiran as f64)
    };

    // distribusi prestasi; kelima kategori selalu muncul
    let mut distribusi: HashMap<Kategori, i64> = HashMap::new();
    for item in &terfilter {
        let (_, kategori) = grading::hitung_rata_rata(&item.penilaian.nilai());
        *distribusi.entry(kategori).or_insert(0) += 1;
    }
    let prestasi_distribution: Vec<PrestasiCount> = Kategori::ALL
        .iter()
        .map(|kategori| PrestasiCount {
            prestasi: kategori.to_string(),
            count: distribusi.get(kategori).copied().unwrap_or(0),
        })
        .collect();

    // chart: prestasi per semester
    let mut per_semester: HashMap<String, HashMap<Kategori, i64>> = HashMap::new();
    for item in &terfilter {
        let (_, kategori) = grading::hitung_rata_rata(&item.penilaian.nilai());
        *per_semester
            .entry(item.penilaian.semester.to_string())
            .or_default()
            .entry(kategori)
            .or_insert(0) += 1;
    }
    let mut prestasi_per_semester: Vec<PrestasiPerSemester> = per_semester
        .into_iter()
        .map(|(semester, counts)| PrestasiPerSemester {
            semester,
            data: counts
                .into_iter()
                .map(|(kategori, count)| PrestasiCount {
                    prestasi: kategori.to_string(),
                    count,
                })
                .collect(),
        })
        .collect();
    prestasi_per_semester.sort_by(|a, b| a.semester.cmp(&b.semester));

    // chart: rata-rata per kelas
    let mut per_kelas: HashMap<String, (f64, f64, usize, i64)> = HashMap::new();
    for item in &terfilter {
        let Some(ref siswa) = item.siswa else { continue };
        let (rata, _) = grading::hitung_rata_rata(&item.penilaian.nilai());
        let entry = per_kelas.entry(siswa.kelas.clone()).or_insert((0.0, 0.0, 0, 0));
        entry.0 += rata;
        if let Some(pct) = item.penilaian.persentase_kehadiran() {
            entry.1 += pct;
            entry.2 += 1;
        }
        entry.3 += 1;
    }
    let mut avg_per_kelas: Vec<AvgPerKelas> = per_kelas
        .into_iter()
        .map(|(kelas, (nilai, kehadiran, n_kehadiran, n))| AvgPerKelas {
            kelas,
            avg_nilai: grading::round2(nilai / n as f64),
            avg_kehadiran: if n_kehadiran == 0 {
                0.0
            } else {
                grading::round2(kehadiran / n_kehadiran as f64)
            },
            total_siswa: n,
        })
        .collect();
    avg_per_kelas.sort_by(|a, b| a.kelas.cmp(&b.kelas));

    // chart: trend per tahun, dari seluruh riwayat dalam scope
    let mut per_tahun: HashMap<i32, (f64, f64, usize, i64)> = HashMap::new();
    for item in &semua_baris {
        let (rata, _) = grading::hitung_rata_rata(&item.penilaian.nilai());
        let entry = per_tahun.entry(item.penilaian.tahun).or_insert((0.0, 0.0, 0, 0));
        entry.0 += rata;
        if let Some(pct) = item.penilaian.persentase_kehadiran() {
            entry.1 += pct;
            entry.2 += 1;
        }
        entry.3 += 1;
    }
    let mut trend_per_tahun: Vec<TrendPerTahun> = per_tahun
        .into_iter()
        .map(|(tahun, (nilai, kehadiran, n_kehadiran, n))| TrendPerTahun {
            tahun,
            avg_nilai: grading::round2(nilai / n as f64),
            avg_kehadiran: if n_kehadiran == 0 {
                0.0
            } else {
                grading::round2(kehadiran / n_kehadiran as f64)
            },
            total_siswa: n,
        })
        .collect();
    trend_per_tahun.sort_by_key(|t| t.tahun);

    let response = DashboardStatisticsResponse {
        summary: DashboardSummary {
            total_walikelas,
            total_siswa,
            avg_nilai,
            avg_kehadiran,
            total_kelas,
        },
        prestasi_distribution,
        charts: DashboardCharts {
            prestasi_per_semester,
            avg_per_kelas,
            trend_per_tahun,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Statistik dashboard berhasil diambil",
    )))
}
