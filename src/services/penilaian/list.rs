use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::PenilaianService;
use crate::models::common::pagination::{PaginationInfo, parse_pagination};
use crate::models::common::periode::{Semester, parse_tahun};
use crate::models::penilaian::entities::PenilaianWithSiswa;
use crate::models::penilaian::requests::{PenilaianFilter, PenilaianListQuery};
use crate::models::penilaian::responses::{
    DistribusiItem, DistribusiPrestasi, KehadiranStatistik, PenilaianListFilters,
    PenilaianListResponse, PenilaianResponse, PenilaianStatistics, RataRataStatistik,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, scoped_walikelas_id};
use crate::utils::grading;

pub async fn list_penilaian(
    service: &PenilaianService,
    query: PenilaianListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    // scope wali kelas disuntikkan apa pun filter yang dikirim klien
    let walikelas_scope = match scoped_walikelas_id(&user) {
        Ok(scope) => scope,
        Err(response) => return Ok(response),
    };

    if let Some(ref search) = query.search {
        if search.len() < 2 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Kata kunci pencarian minimal 2 karakter",
            )));
        }
    }

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

    let (page, limit) = parse_pagination(query.page, query.limit);

    let filter = PenilaianFilter {
        siswa_id: query.siswa_id,
        kelas: query.kelas.clone(),
        semester,
        tahun: query.tahun.as_deref().and_then(parse_tahun),
        search: query.search.clone(),
        walikelas_id: walikelas_scope,
    };

    let (items, total) = match storage
        .list_penilaian_with_pagination(filter, page, limit)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            error!("Gagal query daftar penilaian: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Gagal mengambil data penilaian",
                    e.to_string(),
                )),
            );
        }
    };

    // blok walikelas untuk tiap siswa pada halaman ini
    let walikelas_ids: Vec<i64> = items
        .iter()
        .filter_map(|item| item.siswa.as_ref().map(|s| s.walikelas_id))
        .collect();
    let walikelas_map = match storage.walikelas_ringkas_by_ids(walikelas_ids).await {
        Ok(map) => map,
        Err(e) => {
            error!("Gagal memuat blok walikelas: {}", e);
            HashMap::new()
        }
    };

    let formatted: Vec<PenilaianResponse> = items
        .iter()
        .map(|item| {
            let walikelas = item
                .siswa
                .as_ref()
                .and_then(|s| walikelas_map.get(&s.walikelas_id).cloned());
            PenilaianResponse::from_penilaian(&item.penilaian, item.siswa.as_ref(), walikelas)
        })
        .collect();

    let statistics = hitung_statistik(&items, &formatted, total);

    let response = PenilaianListResponse {
        pagination: PaginationInfo::new(page, limit, total),
        statistics,
        filters: PenilaianListFilters {
            siswa_id: query
                .siswa_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "Semua".to_string()),
            kelas: query.kelas.unwrap_or_else(|| "Semua".to_string()),
            semester: query.semester.unwrap_or_else(|| "Semua".to_string()),
            tahun: query.tahun.unwrap_or_else(|| "Semua".to_string()),
            search: query.search.unwrap_or_default(),
        },
        penilaian: formatted,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Data penilaian berhasil diambil",
    )))
}

// Statistik dihitung dari halaman yang dikembalikan; total dari count query
fn hitung_statistik(
    items: &[PenilaianWithSiswa],
    formatted: &[PenilaianResponse],
    total: i64,
) -> PenilaianStatistics {
    let mut total_rata_aktual = 0.0;
    let mut total_rata_prediksi = 0.0;
    let mut total_kehadiran = 0.0;
    let mut count_kehadiran = 0i64;
    let mut count_prediksi = 0i64;
    let mut distribusi_aktual: HashMap<String, i64> = HashMap::new();
    let mut distribusi_prediksi: HashMap<String, i64> = HashMap::new();

    for (item, response) in items.iter().zip(formatted.iter()) {
        let (rata, kategori) = grading::hitung_rata_rata(&item.penilaian.nilai());
        total_rata_aktual += rata;
        *distribusi_aktual.entry(kategori.to_string()).or_insert(0) += 1;

        if let Some(persentase) = item.penilaian.persentase_kehadiran() {
            total_kehadiran += persentase;
            count_kehadiran += 1;
        }

        if let Some(ref prediksi) = response.data_prediksi {
            if let Some(ref nilai) = prediksi.nilai {
                total_rata_prediksi += nilai.rata_rata;
                count_prediksi += 1;
                *distribusi_prediksi
                    .entry(prediksi.kategori_prestasi.clone())
                    .or_insert(0) += 1;
            }
        }
    }

    let jumlah = items.len() as i64;
    let avg_aktual = if jumlah > 0 {
        total_rata_aktual / jumlah as f64
    } else {
        0.0
    };
    let avg_prediksi = if count_prediksi > 0 {
        total_rata_prediksi / count_prediksi as f64
    } else {
        0.0
    };
    let avg_kehadiran = if count_kehadiran > 0 {
        total_kehadiran / count_kehadiran as f64
    } else {
        0.0
    };

    let format_distribusi = |peta: &HashMap<String, i64>, pembagi: i64| -> Vec<DistribusiItem> {
        peta.iter()
            .map(|(kategori, count)| DistribusiItem {
                kategori: kategori.clone(),
                count: *count,
                persentase: if pembagi > 0 {
                    (*count as f64 / pembagi as f64 * 100.0).round() as i64
                } else {
                    0
                },
            })
            .collect()
    };

    PenilaianStatistics {
        total_penilaian: total,
        total_dengan_prediksi: count_prediksi,
        rata_rata: RataRataStatistik {
            aktual: grading::round2(avg_aktual),
            prediksi: grading::round2(avg_prediksi),
            selisih: grading::round2(avg_prediksi - avg_aktual),
        },
        kehadiran: KehadiranStatistik {
            rata_rata: grading::round2(avg_kehadiran),
        },
        distribusi_prestasi: DistribusiPrestasi {
            aktual: format_distribusi(&distribusi_aktual, jumlah),
            prediksi: format_distribusi(&distribusi_prediksi, count_prediksi),
        },
    }
}
