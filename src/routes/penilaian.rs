use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::penilaian::requests::{
    CreatePenilaianRequest, PenilaianExportQuery, PenilaianListQuery, UpdatePenilaianRequest,
};
use crate::services::PenilaianService;
use crate::utils::{SafeIDI64, SafeSiswaIdI64};

static PENILAIAN_SERVICE: Lazy<PenilaianService> = Lazy::new(PenilaianService::new_lazy);

pub async fn create_penilaian(
    req: HttpRequest,
    body: web::Json<CreatePenilaianRequest>,
) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE
        .create_penilaian(body.into_inner(), &req)
        .await
}

pub async fn list_penilaian(
    req: HttpRequest,
    query: web::Query<PenilaianListQuery>,
) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE
        .list_penilaian(query.into_inner(), &req)
        .await
}

pub async fn get_penilaian(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE.get_penilaian(id.0, &req).await
}

pub async fn get_penilaian_by_siswa(
    req: HttpRequest,
    siswa_id: SafeSiswaIdI64,
) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE
        .get_penilaian_by_siswa(siswa_id.0, &req)
        .await
}

pub async fn update_penilaian(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdatePenilaianRequest>,
) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE
        .update_penilaian(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_penilaian(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE.delete_penilaian(id.0, &req).await
}

pub async fn import_nilai(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE.import_nilai(payload, &req).await
}

pub async fn import_template(req: HttpRequest) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE.import_template(&req).await
}

pub async fn export_penilaian(
    req: HttpRequest,
    query: web::Query<PenilaianExportQuery>,
) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE
        .export_penilaian(query.into_inner(), &req)
        .await
}

pub async fn export_penilaian_simple(
    req: HttpRequest,
    query: web::Query<PenilaianExportQuery>,
) -> ActixResult<HttpResponse> {
    PENILAIAN_SERVICE
        .export_penilaian_simple(query.into_inner(), &req)
        .await
}

pub fn configure_penilaian_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/penilaian")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_penilaian))
            .route("/list", web::get().to(list_penilaian))
            .route("/import", web::post().to(import_nilai))
            .route("/import/template", web::get().to(import_template))
            .route("/export", web::get().to(export_penilaian))
            .route("/export/simple", web::get().to(export_penilaian_simple))
            .route("/siswa/{siswa_id}", web::get().to(get_penilaian_by_siswa))
            .route("/{id}", web::get().to(get_penilaian))
            .route("/{id}", web::put().to(update_penilaian))
            .route("/{id}", web::delete().to(delete_penilaian)),
    );
}
