use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::PenilaianService;
use crate::models::penilaian::responses::PenilaianResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_penilaian(
    service: &PenilaianService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let penilaian = match storage.get_penilaian_by_id(id).await {
        Ok(Some(penilaian)) => penilaian,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Penilaian tidak ditemukan",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Gagal mengambil data penilaian",
                    e.to_string(),
                )),
            );
        }
    };

    let siswa = match storage.get_siswa_by_id(penilaian.siswa_id).await {
        Ok(siswa) => siswa,
        Err(e) => {
            error!("Gagal memuat siswa untuk penilaian {}: {}", id, e);
            None
        }
    };

    let walikelas = match siswa {
        Some(ref s) => match storage.walikelas_ringkas_by_ids(vec![s.walikelas_id]).await {
            Ok(mut map) => map.remove(&s.walikelas_id),
            Err(e) => {
                error!("Gagal memuat walikelas untuk penilaian {}: {}", id, e);
                None
            }
        },
        None => None,
    };

    let response = PenilaianResponse::from_penilaian(&penilaian, siswa.as_ref(), walikelas);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Data penilaian berhasil diambil",
    )))
}
