pub mod by_siswa;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod template;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::models::penilaian::requests::{
    CreatePenilaianRequest, PenilaianExportQuery, PenilaianListQuery, UpdatePenilaianRequest,
};
use crate::prediksi::PrediksiClient;
use crate::storage::Storage;

// Satu klien prediksi untuk seluruh proses
static PREDIKSI_CLIENT: Lazy<PrediksiClient> = Lazy::new(PrediksiClient::new);

pub struct PenilaianService {
    storage: Option<Arc<dyn Storage>>,
}

impl PenilaianService {
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

    pub(crate) fn prediksi_client(&self) -> &'static PrediksiClient {
        &PREDIKSI_CLIENT
    }

    pub async fn create_penilaian(
        &self,
        data: CreatePenilaianRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_penilaian(self, data, request).await
    }

    pub async fn list_penilaian(
        &self,
        query: PenilaianListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_penilaian(self, query, request).await
    }

    pub async fn get_penilaian(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_penilaian(self, id, request).await
    }

    pub async fn get_penilaian_by_siswa(
        &self,
        siswa_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        by_siswa::get_penilaian_by_siswa(self, siswa_id, request).await
    }

    pub async fn update_penilaian(
        &self,
        id: i64,
        data: UpdatePenilaianRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_penilaian(self, id, data, request).await
    }

    pub async fn delete_penilaian(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_penilaian(self, id, request).await
    }

    pub async fn import_nilai(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_nilai(self, payload, request).await
    }

    pub async fn import_template(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        template::import_template(self, request).await
    }

    pub async fn export_penilaian(
        &self,
        query: PenilaianExportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_penilaian(self, query, request).await
    }

    pub async fn export_penilaian_simple(
        &self,
        query: PenilaianExportQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_penilaian_simple(self, query, request).await
    }
}
