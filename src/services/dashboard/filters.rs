use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::{ApiResponse, ErrorCode};

/// Nilai distinct tahun/semester/kelas untuk dropdown filter
pub async fn get_filters(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_filter_values().await {
        Ok(filters) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            filters,
            "Data filter berhasil diambil",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat mengambil data filter",
                e.to_string(),
            )),
        ),
    }
}
