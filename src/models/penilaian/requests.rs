use serde::Deserialize;

use crate::models::common::periode::Semester;

// Pembuatan penilaian lewat endpoint tunggal
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePenilaianRequest {
    pub siswa_id: i64,
    pub semester: Semester,
    pub tahun: i32,
    pub matematika: f64,
    pub ipa: f64,
    pub ips: f64,
    pub b_indonesia: f64,
    pub b_inggris: f64,
    /// Jumlah hari hadir (0..=365)
    pub kehadiran: Option<i32>,
    /// Label prestasi manual; bila kosong dipakai kategori hasil hitung
    pub prestasi: Option<String>,
}

// Update parsial; perubahan nilai memicu permintaan prediksi ulang
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePenilaianRequest {
    pub matematika: Option<f64>,
    pub ipa: Option<f64>,
    pub ips: Option<f64>,
    pub b_indonesia: Option<f64>,
    pub b_inggris: Option<f64>,
    pub kehadiran: Option<i32>,
    pub prestasi: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenilaianListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub siswa_id: Option<i64>,
    pub kelas: Option<String>,
    pub semester: Option<String>,
    pub tahun: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenilaianExportQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub kelas: Option<String>,
    pub semester: Option<String>,
    pub tahun: Option<String>,
    pub search: Option<String>,
}

// Filter di lapisan storage (ternormalisasi + scope walikelas)
#[derive(Debug, Clone, Default)]
pub struct PenilaianFilter {
    pub siswa_id: Option<i64>,
    pub kelas: Option<String>,
    pub semester: Option<Semester>,
    pub tahun: Option<i32>,
    pub search: Option<String>,
    pub walikelas_id: Option<i64>,
}

// Data pembuatan penilaian di lapisan storage
#[derive(Debug, Clone)]
pub struct CreatePenilaianData {
    pub siswa_id: i64,
    pub semester: Semester,
    pub tahun: i32,
    pub matematika: f64,
    pub ipa: f64,
    pub ips: f64,
    pub b_indonesia: f64,
    pub b_inggris: f64,
    pub kehadiran: Option<i32>,
    pub prestasi: Option<String>,
    pub prediksi: Option<serde_json::Value>,
    pub created_by: i64,
}

// Update di lapisan storage; None berarti kolom tidak disentuh
#[derive(Debug, Clone, Default)]
pub struct UpdatePenilaianData {
    pub matematika: Option<f64>,
    pub ipa: Option<f64>,
    pub ips: Option<f64>,
    pub b_indonesia: Option<f64>,
    pub b_inggris: Option<f64>,
    pub kehadiran: Option<i32>,
    pub prestasi: Option<String>,
    /// None = kolom tidak disentuh; Some(x) menimpa kolom dengan x,
    /// termasuk Some(None) saat permintaan prediksi ulang gagal
    pub prediksi: Option<Option<serde_json::Value>>,
}
