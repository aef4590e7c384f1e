use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::siswa::requests::{CreateSiswaRequest, SiswaListQuery, UpdateSiswaRequest};
use crate::services::SiswaService;
use crate::utils::SafeIDI64;

static SISWA_SERVICE: Lazy<SiswaService> = Lazy::new(SiswaService::new_lazy);

pub async fn create_siswa(
    req: HttpRequest,
    body: web::Json<CreateSiswaRequest>,
) -> ActixResult<HttpResponse> {
    SISWA_SERVICE.create_siswa(body.into_inner(), &req).await
}

pub async fn list_siswa(
    req: HttpRequest,
    query: web::Query<SiswaListQuery>,
) -> ActixResult<HttpResponse> {
    SISWA_SERVICE.list_siswa(query.into_inner(), &req).await
}

pub async fn get_siswa(req: HttpRequest, siswa_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SISWA_SERVICE.get_siswa(siswa_id.0, &req).await
}

pub async fn update_siswa(
    req: HttpRequest,
    siswa_id: SafeIDI64,
    body: web::Json<UpdateSiswaRequest>,
) -> ActixResult<HttpResponse> {
    SISWA_SERVICE
        .update_siswa(siswa_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_siswa(req: HttpRequest, siswa_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SISWA_SERVICE.delete_siswa(siswa_id.0, &req).await
}

pub async fn import_siswa(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    SISWA_SERVICE.import_siswa(payload, &req).await
}

pub async fn import_template(req: HttpRequest) -> ActixResult<HttpResponse> {
    SISWA_SERVICE.import_template(&req).await
}

pub fn configure_siswa_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/siswa")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_siswa))
            .route("/list", web::get().to(list_siswa))
            .route("/import", web::post().to(import_siswa))
            .route("/import/template", web::get().to(import_template))
            .route("/{id}", web::get().to(get_siswa))
            .route("/{id}", web::put().to(update_siswa))
            .route("/{id}", web::delete().to(delete_siswa)),
    );
}
