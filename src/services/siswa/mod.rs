pub mod create;
pub mod delete;
pub mod get;
pub mod import;
pub mod list;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::siswa::requests::{CreateSiswaRequest, SiswaListQuery, UpdateSiswaRequest};
use crate::storage::Storage;

pub struct SiswaService {
    storage: Option<Arc<dyn Storage>>,
}

impl SiswaService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_siswa(
        &self,
        data: CreateSiswaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_siswa(self, data, request).await
    }

    pub async fn list_siswa(
        &self,
        query: SiswaListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_siswa(self, query, request).await
    }

    pub async fn get_siswa(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_siswa(self, id, request).await
    }

    pub async fn update_siswa(
        &self,
        id: i64,
        data: UpdateSiswaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_siswa(self, id, data, request).await
    }

    pub async fn delete_siswa(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_siswa(self, id, request).await
    }

    pub async fn import_siswa(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_siswa(self, payload, request).await
    }

    pub async fn import_template(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        import::import_template(self, request).await
    }
}
