use serde::{Deserialize, Serialize};

use crate::models::common::periode::Semester;
use crate::models::siswa::entities::Siswa;

/// Lima nilai mata pelajaran dalam urutan tetap:
/// matematika, ipa, ips, b_indonesia, b_inggris.
pub type NilaiMapel = [f64; 5];

// Entity penilaian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Penilaian {
    pub id: i64,
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
    /// Label prestasi tersimpan; respons selalu menghitung ulang kategorinya
    pub prestasi: Option<String>,
    /// Payload mentah dari layanan prediksi, bentuknya tidak dikontrak
    pub prediksi: Option<serde_json::Value>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Penilaian {
    pub fn nilai(&self) -> NilaiMapel {
        [
            self.matematika,
            self.ipa,
            self.ips,
            self.b_indonesia,
            self.b_inggris,
        ]
    }

    /// Persentase kehadiran dari jumlah hari hadir
    pub fn persentase_kehadiran(&self) -> Option<f64> {
        self.kehadiran
            .map(|hari| f64::from(hari) / 365.0 * 100.0)
    }
}

// Penilaian beserta siswanya (hasil join di lapisan storage)
#[derive(Debug, Clone)]
pub struct PenilaianWithSiswa {
    pub penilaian: Penilaian,
    pub siswa: Option<Siswa>,
}
