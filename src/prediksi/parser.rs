//! Parser payload prediksi.
//!
//! Payload tersimpan bisa datang dalam minimal tiga bentuk: bersarang di
//! bawah kunci `prediksi_semester_berikutnya`, datar dengan kunci kapital,
//! atau datar dengan kunci huruf kecil. Bentuk yang tidak dikenali di-default
//! nol per kolom; kegagalan parse total menghasilkan sentinel
//! "Error parsing" yang oleh logika tren diperlakukan sebagai tidak ada
//! prediksi.

use serde::{Deserialize, Serialize};

use crate::models::common::periode::Semester;
use crate::utils::grading::{self, Kategori};

pub const KATEGORI_ERROR_PARSING: &str = "Error parsing";

// Nilai prediksi ternormalisasi
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrediksiNilai {
    pub matematika: f64,
    pub ipa: f64,
    pub ips: f64,
    pub b_indonesia: f64,
    pub b_inggris: f64,
    pub rata_rata: f64,
}

// Hasil normalisasi payload prediksi
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPrediksi {
    pub nilai: Option<PrediksiNilai>,
    pub kategori_prestasi: String,
    pub semester_prediksi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DataPrediksi {
    /// Prediksi dianggap valid hanya bila blok nilai berhasil dinormalkan
    pub fn is_valid(&self) -> bool {
        self.nilai.is_some()
    }
}

// Blok perbandingan aktual vs prediksi
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perbandingan {
    pub selisih_rata_rata: f64,
    pub tren: String,
    pub confidence: String,
}

impl Perbandingan {
    /// Bangun blok perbandingan; sentinel parse error menghasilkan `None`
    pub fn from_prediksi(prediksi: &DataPrediksi, rata_rata_aktual: f64) -> Option<Self> {
        let nilai = prediksi.nilai.as_ref()?;
        let selisih = grading::round2(nilai.rata_rata - rata_rata_aktual);
        let tren = if nilai.rata_rata > rata_rata_aktual {
            "Meningkat"
        } else if nilai.rata_rata < rata_rata_aktual {
            "Menurun"
        } else {
            "Stabil"
        };
        Some(Self {
            selisih_rata_rata: selisih,
            tren: tren.to_string(),
            confidence: "Tinggi".to_string(),
        })
    }
}

// Satu set nilai mentah; alias menangani varian kunci kapital
#[derive(Debug, Default, Deserialize)]
struct RawNilai {
    #[serde(default, alias = "Matematika")]
    matematika: Option<f64>,
    #[serde(default, alias = "IPA")]
    ipa: Option<f64>,
    #[serde(default, alias = "IPS")]
    ips: Option<f64>,
    #[serde(default, alias = "B.Indonesia")]
    b_indonesia: Option<f64>,
    #[serde(default, alias = "B.Inggris")]
    b_inggris: Option<f64>,
}

// Bentuk-bentuk payload yang dikenal
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PrediksiPayload {
    Bersarang {
        prediksi_semester_berikutnya: RawNilai,
    },
    // datar, kapital maupun huruf kecil (lihat alias RawNilai)
    Datar(RawNilai),
}

fn label_semester_prediksi(semester: Semester, tahun: i32) -> String {
    let (semester_berikut, tahun_berikut) = semester.periode_berikutnya(tahun);
    format!("Semester {semester_berikut} {tahun_berikut}")
}

/// Normalkan payload prediksi mentah untuk satu periode penilaian.
/// `raw` boleh berupa objek langsung atau string berisi JSON.
pub fn parse_prediksi(raw: &serde_json::Value, semester: Semester, tahun: i32) -> DataPrediksi {
    // payload kadang tersimpan sebagai string JSON
    let parsed: Result<PrediksiPayload, String> = match raw {
        serde_json::Value::String(s) => serde_json::from_str(s).map_err(|e| e.to_string()),
        other => serde_json::from_value(other.clone()).map_err(|e| e.to_string()),
    };

    let nilai_raw = match parsed {
        Ok(PrediksiPayload::Bersarang {
            prediksi_semester_berikutnya,
        }) => prediksi_semester_berikutnya,
        Ok(PrediksiPayload::Datar(nilai)) => nilai,
        Err(e) => {
            return DataPrediksi {
                nilai: None,
                kategori_prestasi: KATEGORI_ERROR_PARSING.to_string(),
                semester_prediksi: "Tidak tersedia".to_string(),
                error: Some(e),
            };
        }
    };

    // kolom yang hilang di-default nol
    let nilai = [
        nilai_raw.matematika.unwrap_or(0.0),
        nilai_raw.ipa.unwrap_or(0.0),
        nilai_raw.ips.unwrap_or(0.0),
        nilai_raw.b_indonesia.unwrap_or(0.0),
        nilai_raw.b_inggris.unwrap_or(0.0),
    ];
    let (rata_rata, kategori): (f64, Kategori) = grading::hitung_rata_rata(&nilai);

    DataPrediksi {
        nilai: Some(PrediksiNilai {
            matematika: nilai[0],
            ipa: nilai[1],
            ips: nilai[2],
            b_indonesia: nilai[3],
            b_inggris: nilai[4],
            rata_rata,
        }),
        kategori_prestasi: kategori.to_string(),
        semester_prediksi: label_semester_prediksi(semester, tahun),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bentuk_bersarang() {
        let raw = json!({
            "prediksi_semester_berikutnya": {
                "Matematika": 85.0, "IPA": 90.0, "IPS": 80.0,
                "B.Indonesia": 88.0, "B.Inggris": 82.0
            }
        });
        let hasil = parse_prediksi(&raw, Semester::Ganjil, 2025);
        let nilai = hasil.nilai.expect("nilai harus terisi");
        assert_eq!(nilai.matematika, 85.0);
        assert_eq!(nilai.rata_rata, 85.0);
        assert_eq!(hasil.kategori_prestasi, "Baik");
        assert_eq!(hasil.semester_prediksi, "Semester genap 2025");
    }

    #[test]
    fn test_bentuk_datar_kapital() {
        let raw = json!({
            "Matematika": 95.0, "IPA": 95.0, "IPS": 95.0,
            "B.Indonesia": 95.0, "B.Inggris": 95.0
        });
        let hasil = parse_prediksi(&raw, Semester::Genap, 2025);
        assert_eq!(hasil.nilai.unwrap().rata_rata, 95.0);
        assert_eq!(hasil.kategori_prestasi, "Sangat Baik");
        // genap memprediksi ganjil tahun berikutnya
        assert_eq!(hasil.semester_prediksi, "Semester ganjil 2026");
    }

    #[test]
    fn test_bentuk_datar_huruf_kecil() {
        let raw = json!({
            "matematika": 70.0, "ipa": 70.0, "ips": 70.0,
            "b_indonesia": 70.0, "b_inggris": 70.0
        });
        let hasil = parse_prediksi(&raw, Semester::Ganjil, 2024);
        assert_eq!(hasil.nilai.unwrap().rata_rata, 70.0);
        assert_eq!(hasil.kategori_prestasi, "Cukup");
    }

    #[test]
    fn test_payload_string_json() {
        let raw = json!(r#"{"Matematika": 60, "IPA": 60, "IPS": 60, "B.Indonesia": 60, "B.Inggris": 60}"#);
        let hasil = parse_prediksi(&raw, Semester::Ganjil, 2025);
        assert_eq!(hasil.nilai.unwrap().rata_rata, 60.0);
    }

    #[test]
    fn test_kolom_hilang_default_nol() {
        let raw = json!({ "Matematika": 100.0 });
        let hasil = parse_prediksi(&raw, Semester::Ganjil, 2025);
        let nilai = hasil.nilai.unwrap();
        assert_eq!(nilai.ipa, 0.0);
        assert_eq!(nilai.rata_rata, 20.0);
    }

    #[test]
    fn test_sentinel_error_parsing() {
        let raw = json!("ini bukan json objek");
        let hasil = parse_prediksi(&raw, Semester::Ganjil, 2025);
        assert!(!hasil.is_valid());
        assert_eq!(hasil.kategori_prestasi, KATEGORI_ERROR_PARSING);
        assert_eq!(hasil.semester_prediksi, "Tidak tersedia");
        assert!(hasil.error.is_some());
        // sentinel tidak pernah menghasilkan blok perbandingan
        assert!(Perbandingan::from_prediksi(&hasil, 80.0).is_none());
    }

    #[test]
    fn test_perbandingan_tren() {
        let raw = json!({
            "Matematika": 90.0, "IPA": 90.0, "IPS": 90.0,
            "B.Indonesia": 90.0, "B.Inggris": 90.0
        });
        let hasil = parse_prediksi(&raw, Semester::Ganjil, 2025);

        let naik = Perbandingan::from_prediksi(&hasil, 85.0).unwrap();
        assert_eq!(naik.tren, "Meningkat");
        assert_eq!(naik.selisih_rata_rata, 5.0);

        let turun = Perbandingan::from_prediksi(&hasil, 95.0).unwrap();
        assert_eq!(turun.tren, "Menurun");

        let stabil = Perbandingan::from_prediksi(&hasil, 90.0).unwrap();
        assert_eq!(stabil.tren, "Stabil");
    }
}
