use serde::{Deserialize, Serialize};

use crate::models::PaginationInfo;
use crate::models::common::periode::PeriodeInfo;
use crate::models::penilaian::entities::Penilaian;
use crate::models::siswa::entities::{Siswa, SiswaRingkas, WalikelasRingkas};
use crate::prediksi::{DataPrediksi, Perbandingan, parse_prediksi};
use crate::utils::grading::{self, Kategori};

// Blok nilai aktual dengan rata-rata hasil hitung ulang
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NilaiAktual {
    pub matematika: f64,
    pub ipa: f64,
    pub ips: f64,
    pub b_indonesia: f64,
    pub b_inggris: f64,
    pub rata_rata: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KategoriBlock {
    pub prestasi: Kategori,
    pub kehadiran: Option<Kategori>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataAktual {
    pub nilai: NilaiAktual,
    /// Jumlah hari hadir
    pub kehadiran: Option<i32>,
    pub persentase_kehadiran: Option<f64>,
    pub kategori: KategoriBlock,
    pub prestasi: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Respons penilaian terformat; rata-rata dan kategori dihitung ulang pada
// setiap pembacaan, kolom tersimpan tidak dianggap otoritatif
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenilaianResponse {
    pub id: i64,
    pub siswa_id: i64,
    pub periode: PeriodeInfo,
    pub data_aktual: DataAktual,
    pub data_prediksi: Option<DataPrediksi>,
    pub perbandingan: Option<Perbandingan>,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siswa: Option<SiswaRingkas>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walikelas: Option<WalikelasRingkas>,
}

impl PenilaianResponse {
    pub fn from_penilaian(
        penilaian: &Penilaian,
        siswa: Option<&Siswa>,
        walikelas: Option<WalikelasRingkas>,
    ) -> Self {
        let nilai = penilaian.nilai();
        let (rata_rata, kategori) = grading::hitung_rata_rata(&nilai);

        let persentase = penilaian.persentase_kehadiran();
        let kategori_kehadiran = persentase.map(grading::kategori_kehadiran);

        let data_prediksi = penilaian
            .prediksi
            .as_ref()
            .map(|raw| parse_prediksi(raw, penilaian.semester, penilaian.tahun));
        let perbandingan = data_prediksi
            .as_ref()
            .and_then(|p| Perbandingan::from_prediksi(p, rata_rata));

        Self {
            id: penilaian.id,
            siswa_id: penilaian.siswa_id,
            periode: PeriodeInfo::new(penilaian.semester, penilaian.tahun),
            data_aktual: DataAktual {
                nilai: NilaiAktual {
                    matematika: nilai[0],
                    ipa: nilai[1],
                    ips: nilai[2],
                    b_indonesia: nilai[3],
                    b_inggris: nilai[4],
                    rata_rata,
                },
                kehadiran: penilaian.kehadiran,
                persentase_kehadiran: persentase.map(grading::round2),
                kategori: KategoriBlock {
                    prestasi: kategori,
                    kehadiran: kategori_kehadiran,
                },
                prestasi: penilaian
                    .prestasi
                    .clone()
                    .unwrap_or_else(|| kategori.to_string()),
            },
            data_prediksi,
            perbandingan,
            metadata: Metadata {
                created_at: penilaian.created_at,
                updated_at: penilaian.updated_at,
            },
            siswa: siswa.map(SiswaRingkas::from),
            walikelas,
        }
    }
}

// Statistik agregat pada respons list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistribusiItem {
    pub kategori: String,
    pub count: i64,
    pub persentase: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RataRataStatistik {
    pub aktual: f64,
    pub prediksi: f64,
    pub selisih: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KehadiranStatistik {
    pub rata_rata: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistribusiPrestasi {
    pub aktual: Vec<DistribusiItem>,
    pub prediksi: Vec<DistribusiItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenilaianStatistics {
    pub total_penilaian: i64,
    pub total_dengan_prediksi: i64,
    pub rata_rata: RataRataStatistik,
    pub kehadiran: KehadiranStatistik,
    pub distribusi_prestasi: DistribusiPrestasi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenilaianListFilters {
    pub siswa_id: String,
    pub kelas: String,
    pub semester: String,
    pub tahun: String,
    pub search: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenilaianListResponse {
    pub pagination: PaginationInfo,
    pub statistics: PenilaianStatistics,
    pub filters: PenilaianListFilters,
    pub penilaian: Vec<PenilaianResponse>,
}

// Riwayat penilaian satu siswa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerkembanganItem {
    pub periode: String,
    pub rata_rata_aktual: f64,
    pub rata_rata_prediksi: Option<f64>,
    pub kategori_aktual: Kategori,
    pub kategori_prediksi: Option<String>,
    pub tren: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiwayatSummary {
    pub total_semester: usize,
    pub rata_rata_keseluruhan: f64,
    pub perkembangan: Vec<PerkembanganItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiwayatSiswaResponse {
    pub siswa: crate::models::siswa::entities::SiswaDetail,
    pub summary: RiwayatSummary,
    pub penilaian: Vec<PenilaianResponse>,
}

// Hasil import nilai dari spreadsheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportNilaiDetails {
    pub siswa_dibuat: usize,
    pub siswa_digunakan: usize,
    pub penilaian_dibuat: usize,
    pub penilaian_duplikat: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportNilaiSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportNilaiResponse {
    pub summary: ImportNilaiSummary,
    pub details: ImportNilaiDetails,
    /// Prefiks daftar error; jumlah pastinya ada di summary.failed
    pub errors: Vec<String>,
}
