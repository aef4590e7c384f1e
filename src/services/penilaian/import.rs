//! Import nilai siswa dari spreadsheet.
//!
//! Batch hanya batal total pada prasyarat: tidak ada file, sheet kosong,
//! kolom wajib hilang, atau principal tanpa profil wali kelas. Semua
//! kegagalan lain bercakupan baris: dicatat sebagai error, menambah hitungan
//! gagal, lalu lanjut ke baris berikutnya.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PenilaianService;
use crate::config::AppConfig;
use crate::models::common::periode::{Semester, parse_tahun};
use crate::models::penilaian::requests::CreatePenilaianData;
use crate::models::penilaian::responses::{
    ImportNilaiDetails, ImportNilaiResponse, ImportNilaiSummary,
};
use crate::models::siswa::requests::CreateSiswaData;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, require_walikelas_id};
use crate::utils::grading;
use crate::utils::spreadsheet::{RowMap, parse_spreadsheet, read_file_from_multipart};
use crate::utils::validate::{validate_kehadiran, validate_nilai};

pub(crate) const REQUIRED_COLUMNS: [&str; 10] = [
    "Nama Siswa",
    "Kehadiran",
    "Nilai Matematika",
    "Nilai IPA",
    "Nilai B.Inggris",
    "Nilai IPS",
    "Nilai B.Indonesia",
    "Kelas",
    "Semester",
    "Tahun",
];

// (nama kolom di file, nama kolom di pesan error)
const NILAI_COLUMNS: [(&str, &str); 5] = [
    ("Nilai Matematika", "matematika"),
    ("Nilai IPA", "ipa"),
    ("Nilai IPS", "ips"),
    ("Nilai B.Indonesia", "b_indonesia"),
    ("Nilai B.Inggris", "b_inggris"),
];

/// Error yang ditampilkan dibatasi; failed tetap dihitung penuh
const MAX_ERROR_MESSAGES: usize = 20;

#[derive(Debug)]
struct NilaiRow {
    name: String,
    kelas: String,
    semester: Semester,
    tahun: i32,
    /// urutan: matematika, ipa, ips, b_indonesia, b_inggris
    nilai: [f64; 5],
    kehadiran: i32,
}

// Validasi satu baris. Nomor baris dilaporkan 1-based + offset header
// (baris data pertama = "Baris 2"). Error pertama menghentikan baris ini.
fn validate_row(row: &RowMap, row_num: usize) -> Result<NilaiRow, String> {
    let ambil = |kolom: &str| row.get(kolom).map(String::as_str).unwrap_or("").trim();

    // 1. kelengkapan data identitas
    let name = ambil("Nama Siswa");
    let kelas = ambil("Kelas");
    let semester_raw = ambil("Semester");
    let tahun_raw = ambil("Tahun");

    if name.is_empty() || kelas.is_empty() || semester_raw.is_empty() || tahun_raw.is_empty() {
        return Err(format!(
            "Baris {row_num}: Data siswa tidak lengkap (Nama, Kelas, Semester, Tahun wajib diisi)"
        ));
    }

    // 2. tahun: angka atau string angka, rentang 2000-2100
    let Some(tahun) = parse_tahun(tahun_raw) else {
        return Err(format!("Baris {row_num}: Tahun harus berupa angka"));
    };

    // 3. semester case-insensitive
    let semester = semester_raw
        .parse::<Semester>()
        .map_err(|_| format!("Baris {row_num}: Semester harus 'ganjil' atau 'genap'"))?;

    // 4. lima nilai mapel, masing-masing float 0-100
    let mut nilai = [0.0f64; 5];
    for (i, (kolom, field)) in NILAI_COLUMNS.iter().enumerate() {
        let raw = ambil(kolom);
        if raw.is_empty() {
            return Err(format!("Baris {row_num}: Nilai {field} tidak boleh kosong"));
        }
        let parsed: f64 = raw
            .parse()
            .map_err(|_| format!("Baris {row_num}: Nilai {field} harus antara 0-100"))?;
        if !validate_nilai(parsed) {
            return Err(format!("Baris {row_num}: Nilai {field} harus antara 0-100"));
        }
        nilai[i] = parsed;
    }

    // 5. kehadiran: jumlah hari hadir
    let kehadiran_raw = ambil("Kehadiran");
    let kehadiran = kehadiran_raw
        .parse::<f64>()
        .ok()
        .map(|v| v as i32)
        .filter(|v| validate_kehadiran(*v))
        .ok_or_else(|| format!("Baris {row_num}: Kehadiran harus antara 0-365 hari"))?;

    Ok(NilaiRow {
        name: name.to_string(),
        kelas: kelas.to_string(),
        semester,
        tahun,
        nilai,
        kehadiran,
    })
}

pub async fn import_nilai(
    service: &PenilaianService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    // konteks wali kelas dari principal; tanpa profil, batch batal
    let walikelas_id = match require_walikelas_id(&user) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("File Excel harus diupload: {e}"),
            )));
        }
    };

    if file_bytes.len() > config.import.max_file_size {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Ukuran file melebihi batas maksimum",
        )));
    }

    let sheet = match parse_spreadsheet(&file_bytes, &file_name) {
        Ok(sheet) => sheet,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_detail(
                ErrorCode::BadRequest,
                "File Excel tidak bisa dibaca",
                e.to_string(),
            )));
        }
    };

    if sheet.rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "File Excel kosong atau format tidak sesuai",
        )));
    }

    // prasyarat kolom: batal sebelum ada efek samping, sebut semua yang hilang
    let missing = sheet.missing_columns(&REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!(
                "Kolom yang diperlukan tidak ditemukan: {}",
                missing.join(", ")
            ),
        )));
    }

    if sheet.rows.len() > config.import.max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!(
                "Jumlah baris melebihi batas {} per import",
                config.import.max_rows
            ),
        )));
    }

    let total = sheet.rows.len();
    let mut success = 0usize;
    let mut failed = 0usize;
    let mut errors: Vec<String> = Vec::new();
    let mut details = ImportNilaiDetails::default();

    // baris diproses berurutan; tidak ada paralelisme di dalam satu batch
    // supaya cek duplikat tidak balapan dengan dirinya sendiri
    for (i, row) in sheet.rows.iter().enumerate() {
        let row_num = i + 2;

        match process_row(service, &storage, row, row_num, walikelas_id, user.id, &mut details)
            .await
        {
            Ok(()) => {
                success += 1;
                details.penilaian_dibuat += 1;
            }
            Err(msg) => {
                errors.push(msg);
                failed += 1;
            }
        }
    }

    errors.truncate(MAX_ERROR_MESSAGES);

    let response = ImportNilaiResponse {
        summary: ImportNilaiSummary {
            total,
            success,
            failed,
        },
        details,
        errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        format!("Import nilai selesai. Berhasil: {success}, Gagal: {failed}"),
    )))
}

// Proses satu baris; Err membawa pesan error-nya. Error storage apa pun
// berhenti di baris ini saja, batch jalan terus.
async fn process_row(
    service: &PenilaianService,
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    row: &RowMap,
    row_num: usize,
    walikelas_id: i64,
    created_by: i64,
    details: &mut ImportNilaiDetails,
) -> Result<(), String> {
    let parsed = validate_row(row, row_num)?;

    // 6. find-or-create siswa dengan kunci identitas (name, kelas, walikelas)
    let siswa = match storage
        .find_siswa_by_identity(&parsed.name, &parsed.kelas, walikelas_id)
        .await
        .map_err(|e| format!("Baris {row_num}: {e}"))?
    {
        Some(siswa) => {
            details.siswa_digunakan += 1;
            siswa
        }
        None => {
            let baru = storage
                .create_siswa(CreateSiswaData {
                    name: parsed.name.clone(),
                    kelas: parsed.kelas.clone(),
                    tahun: parsed.tahun,
                    semester: parsed.semester,
                    walikelas_id,
                })
                .await
                .map_err(|e| format!("Baris {row_num}: {e}"))?;
            details.siswa_dibuat += 1;
            baru
        }
    };

    // cek duplikat penilaian untuk periode yang sama
    if storage
        .find_penilaian_by_periode(siswa.id, parsed.semester, parsed.tahun)
        .await
        .map_err(|e| format!("Baris {row_num}: {e}"))?
        .is_some()
    {
        details.penilaian_duplikat += 1;
        return Err(format!(
            "Baris {row_num}: Penilaian untuk {} ({} {}) sudah ada",
            parsed.name, parsed.semester, parsed.tahun
        ));
    }

    // 7. hitung rata-rata dan kategori
    let (_, kategori) = grading::hitung_rata_rata(&parsed.nilai);

    // 8. prediksi; kegagalan tidak pernah menggagalkan baris
    let prediksi = service
        .prediksi_client()
        .predict(&parsed.nilai, parsed.semester)
        .await;

    // 9. simpan record
    storage
        .create_penilaian(CreatePenilaianData {
            siswa_id: siswa.id,
            semester: parsed.semester,
            tahun: parsed.tahun,
            matematika: parsed.nilai[0],
            ipa: parsed.nilai[1],
            ips: parsed.nilai[2],
            b_indonesia: parsed.nilai[3],
            b_inggris: parsed.nilai[4],
            kehadiran: Some(parsed.kehadiran),
            prestasi: Some(kategori.to_string()),
            prediksi,
            created_by,
        })
        .await
        .map_err(|e| format!("Baris {row_num}: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row_lengkap() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Nama Siswa", "Vania Melati"),
            ("Kehadiran", "108"),
            ("Nilai Matematika", "85"),
            ("Nilai IPA", "91"),
            ("Nilai B.Inggris", "83"),
            ("Nilai IPS", "90"),
            ("Nilai B.Indonesia", "95"),
            ("Kelas", "2"),
            ("Semester", "Ganjil"),
            ("Tahun", "2025"),
        ]
    }

    fn build(pairs: Vec<(&str, &str)>) -> RowMap {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    fn ubah(mut pairs: Vec<(&'static str, &'static str)>, kolom: &str, nilai: &'static str) -> RowMap {
        for pair in pairs.iter_mut() {
            if pair.0 == kolom {
                pair.1 = nilai;
            }
        }
        build(pairs)
    }

    #[test]
    fn test_baris_valid() {
        let parsed = validate_row(&build(row_lengkap()), 2).expect("baris valid");
        assert_eq!(parsed.name, "Vania Melati");
        assert_eq!(parsed.nilai, [85.0, 91.0, 90.0, 95.0, 83.0]);
        assert_eq!(parsed.kehadiran, 108);
        assert_eq!(parsed.semester, Semester::Ganjil);
        assert_eq!(parsed.tahun, 2025);
    }

    #[test]
    fn test_nilai_di_luar_rentang_menyebut_kolom() {
        let err = validate_row(&ubah(row_lengkap(), "Nilai IPA", "101"), 4).unwrap_err();
        assert_eq!(err, "Baris 4: Nilai ipa harus antara 0-100");
    }

    #[test]
    fn test_nilai_bukan_angka() {
        let err = validate_row(&ubah(row_lengkap(), "Nilai Matematika", "x"), 2).unwrap_err();
        assert!(err.contains("matematika"));
    }

    #[test]
    fn test_nilai_kosong() {
        let err = validate_row(&ubah(row_lengkap(), "Nilai IPS", ""), 3).unwrap_err();
        assert_eq!(err, "Baris 3: Nilai ips tidak boleh kosong");
    }

    #[test]
    fn test_tahun_dinormalisasi() {
        let parsed = validate_row(&ubah(row_lengkap(), "Tahun", " 2024 "), 2).expect("valid");
        assert_eq!(parsed.tahun, 2024);

        let err = validate_row(&ubah(row_lengkap(), "Tahun", "1999"), 2).unwrap_err();
        assert!(err.contains("Tahun"));
    }

    #[test]
    fn test_semester_case_insensitive() {
        let parsed = validate_row(&ubah(row_lengkap(), "Semester", "GENAP"), 2).expect("valid");
        assert_eq!(parsed.semester, Semester::Genap);

        let err = validate_row(&ubah(row_lengkap(), "Semester", "gasal"), 2).unwrap_err();
        assert!(err.contains("ganjil"));
    }

    #[test]
    fn test_kehadiran_di_luar_rentang() {
        let err = validate_row(&ubah(row_lengkap(), "Kehadiran", "366"), 2).unwrap_err();
        assert_eq!(err, "Baris 2: Kehadiran harus antara 0-365 hari");
    }

    #[test]
    fn test_identitas_tidak_lengkap() {
        let err = validate_row(&ubah(row_lengkap(), "Nama Siswa", ""), 7).unwrap_err();
        assert!(err.starts_with("Baris 7:"));
        assert!(err.contains("tidak lengkap"));
    }
}
