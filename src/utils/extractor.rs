//! Extractor parameter path yang aman.
//!
//! ID di path wajib berupa bilangan bulat positif; format lain ditolak
//! dengan 400 sebelum handler dijalankan.

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn invalid_id_response(param: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Format {param} tidak valid, harus bilangan bulat positif"),
    ));
    InternalError::from_response(format!("invalid path param: {param}"), response).into()
}

macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(invalid_id_response($param)),
                })
            }
        }
    };
}

define_safe_id_extractor!(SafeIDI64, "id");
define_safe_id_extractor!(SafeSiswaIdI64, "siswa_id");
define_safe_id_extractor!(SafeWalikelasIdI64, "walikelas_id");
