pub mod filters;
pub mod statistics;
pub mod walikelas;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::dashboard::responses::DashboardQuery;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    pub async fn statistics(
        &self,
        query: DashboardQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        statistics::get_statistics(self, query, request).await
    }

    pub async fn walikelas_statistics(
        &self,
        walikelas_id: i64,
        query: DashboardQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        walikelas::get_walikelas_statistics(self, walikelas_id, query, request).await
    }

    pub async fn filters(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        filters::get_filters(self, request).await
    }
}
