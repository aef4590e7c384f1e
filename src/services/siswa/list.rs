use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SiswaService;
use crate::models::common::pagination::{PaginationInfo, parse_pagination};
use crate::models::common::periode::{Semester, parse_tahun};
use crate::models::siswa::requests::{SiswaFilter, SiswaListQuery};
use crate::models::siswa::responses::{SiswaListFilters, SiswaListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, scoped_walikelas_id};

pub async fn list_siswa(
    service: &SiswaService,
    query: SiswaListQuery,
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

    let filter = SiswaFilter {
        kelas: query.kelas.clone(),
        tahun: query.tahun.as_deref().and_then(parse_tahun),
        semester,
        search: query.search.clone(),
        walikelas_id: walikelas_scope,
        page,
        limit,
    };

    let (siswa, total) = match storage.list_siswa_with_pagination(filter).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat mengambil data siswa",
                    e.to_string(),
                )),
            );
        }
    };

    let pagination = PaginationInfo::new(page, limit, total);
    if pagination.total_pages > 0 && page > pagination.total_pages {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!(
                "Halaman {page} melebihi total halaman ({})",
                pagination.total_pages
            ),
        )));
    }

    let response = SiswaListResponse {
        pagination,
        filters: SiswaListFilters {
            kelas: query.kelas.unwrap_or_else(|| "Semua".to_string()),
            tahun: query.tahun.unwrap_or_else(|| "Semua".to_string()),
            semester: query.semester.unwrap_or_else(|| "Semua".to_string()),
            search: query.search.unwrap_or_default(),
        },
        siswa,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Data siswa berhasil diambil",
    )))
}
