//! Handler error deserialisasi parameter request (JSON body dan query string)

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    let response = HttpResponse::BadRequest().json(ApiResponse::error_detail(
        ErrorCode::BadRequest,
        "Body JSON tidak valid",
        detail.clone(),
    ));
    InternalError::from_response(detail, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    let response = HttpResponse::BadRequest().json(ApiResponse::error_detail(
        ErrorCode::BadRequest,
        "Parameter query tidak valid",
        detail.clone(),
    ));
    InternalError::from_response(detail, response).into()
}
