//! Klien HTTP ke layanan prediksi nilai semester berikutnya

use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::common::periode::Semester;
use crate::models::penilaian::entities::NilaiMapel;

/// Klien layanan prediksi. Murah untuk di-clone; `reqwest::Client`
/// di dalamnya berbasis `Arc`.
#[derive(Clone)]
pub struct PrediksiClient {
    client: Client,
    url: String,
    enabled: bool,
}

impl PrediksiClient {
    pub fn new() -> Self {
        let config = AppConfig::get();
        Self::with_settings(
            &config.prediksi.url,
            Duration::from_secs(config.prediksi.timeout),
            config.prediksi.enabled,
        )
    }

    pub fn with_settings(url: &str, timeout: Duration, enabled: bool) -> Self {
        // Timeout terbatas supaya satu panggilan lambat tidak menahan
        // satu batch import
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: url.to_string(),
            enabled,
        }
    }

    /// Minta prediksi untuk satu set nilai. Kegagalan apa pun (jaringan,
    /// timeout, status non-2xx, body bukan JSON) menghasilkan `None`;
    /// pemanggil wajib bisa lanjut tanpa prediksi.
    pub async fn predict(
        &self,
        nilai: &NilaiMapel,
        semester: Semester,
    ) -> Option<serde_json::Value> {
        if !self.enabled || self.url.is_empty() {
            return None;
        }

        let payload = json!({
            "Matematika": nilai[0],
            "IPA": nilai[1],
            "IPS": nilai[2],
            "B.Indonesia": nilai[3],
            "B.Inggris": nilai[4],
            "Semester": semester.to_string(),
        });

        let response = match self.client.post(&self.url).json(&payload).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Panggilan API prediksi gagal: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("API prediksi membalas status {}", response.status());
            return None;
        }

        match response.json::<serde_json::Value>().await {
            Ok(body) => {
                debug!("Payload prediksi diterima");
                // bentuk respons tidak dikontrak; simpan apa adanya
                match body.get("prediksi_semester_berikutnya") {
                    Some(pred) => Some(pred.clone()),
                    None => Some(body),
                }
            }
            Err(e) => {
                warn!("Body respons prediksi bukan JSON: {}", e);
                None
            }
        }
    }
}

impl Default for PrediksiClient {
    fn default() -> Self {
        Self::new()
    }
}
