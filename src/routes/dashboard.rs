use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::dashboard::responses::DashboardQuery;
use crate::services::DashboardService;
use crate::utils::SafeWalikelasIdI64;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn statistics(
    req: HttpRequest,
    query: web::Query<DashboardQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.statistics(query.into_inner(), &req).await
}

pub async fn walikelas_statistics(
    req: HttpRequest,
    walikelas_id: SafeWalikelasIdI64,
    query: web::Query<DashboardQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE
        .walikelas_statistics(walikelas_id.0, query.into_inner(), &req)
        .await
}

pub async fn filters(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.filters(&req).await
}

pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .route("/statistics", web::get().to(statistics))
            .route(
                "/walikelas/{walikelas_id}",
                web::get().to(walikelas_statistics),
            )
            .route("/filters", web::get().to(filters)),
    );
}
