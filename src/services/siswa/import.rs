//! Import siswa dari spreadsheet (tanpa nilai)

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::Workbook;
use tracing::error;

use super::SiswaService;
use crate::config::AppConfig;
use crate::models::common::periode::{Semester, parse_tahun};
use crate::models::siswa::requests::CreateSiswaData;
use crate::models::siswa::responses::ImportSiswaResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, require_walikelas_id};
use crate::utils::spreadsheet::{RowMap, parse_spreadsheet, read_file_from_multipart};

const REQUIRED_COLUMNS: [&str; 4] = ["Nama Siswa", "Kelas", "Semester", "Tahun"];

/// Error yang ditampilkan di respons dibatasi; failed tetap dihitung penuh
const MAX_ERROR_MESSAGES: usize = 10;

#[derive(Debug)]
struct SiswaRow {
    name: String,
    kelas: String,
    semester: Semester,
    tahun: i32,
}

// Validasi satu baris; nomor baris dilaporkan 1-based + offset header
fn validate_row(row: &RowMap, row_num: usize) -> Result<SiswaRow, String> {
    let ambil = |kolom: &str| row.get(kolom).map(String::as_str).unwrap_or("").trim();

    let name = ambil("Nama Siswa");
    let kelas = ambil("Kelas");
    let semester_raw = ambil("Semester");
    let tahun_raw = ambil("Tahun");

    if name.is_empty() || kelas.is_empty() || semester_raw.is_empty() || tahun_raw.is_empty() {
        return Err(format!(
            "Baris {row_num}: Data siswa tidak lengkap (Nama, Kelas, Semester, Tahun wajib diisi)"
        ));
    }

    let Some(tahun) = parse_tahun(tahun_raw) else {
        return Err(format!(
            "Baris {row_num}: Tahun harus berupa angka 2000-2100"
        ));
    };

    let semester = semester_raw
        .parse::<Semester>()
        .map_err(|_| format!("Baris {row_num}: Semester harus 'ganjil' atau 'genap'"))?;

    Ok(SiswaRow {
        name: name.to_string(),
        kelas: kelas.to_string(),
        semester,
        tahun,
    })
}

pub async fn import_siswa(
    service: &SiswaService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
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

    // precondition kolom: batal total sebelum ada efek samping
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

    // baris diproses berurutan; satu baris gagal tidak membatalkan batch
    for (i, row) in sheet.rows.iter().enumerate() {
        let row_num = i + 2;

        let parsed = match validate_row(row, row_num) {
            Ok(parsed) => parsed,
            Err(msg) => {
                errors.push(msg);
                failed += 1;
                continue;
            }
        };

        // duplikat dengan kunci lengkap
        match storage
            .find_siswa_by_full_key(
                &parsed.name,
                &parsed.kelas,
                parsed.tahun,
                parsed.semester,
                walikelas_id,
            )
            .await
        {
            Ok(Some(_)) => {
                errors.push(format!("Baris {row_num}: Data siswa sudah ada"));
                failed += 1;
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Gagal cek duplikat baris {}: {}", row_num, e);
                errors.push(format!("Baris {row_num}: {e}"));
                failed += 1;
                continue;
            }
        }

        match storage
            .create_siswa(CreateSiswaData {
                name: parsed.name,
                kelas: parsed.kelas,
                tahun: parsed.tahun,
                semester: parsed.semester,
                walikelas_id,
            })
            .await
        {
            Ok(_) => success += 1,
            Err(e) => {
                error!("Gagal membuat siswa baris {}: {}", row_num, e);
                errors.push(format!("Baris {row_num}: {e}"));
                failed += 1;
            }
        }
    }

    errors.truncate(MAX_ERROR_MESSAGES);

    let response = ImportSiswaResponse {
        total,
        success,
        failed,
        errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        format!("Import selesai. Berhasil: {success}, Gagal: {failed}"),
    )))
}

/// Template import siswa (xlsx berisi satu baris contoh)
pub async fn import_template(
    _service: &SiswaService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    if let Err(e) = sheet.set_name("Template Siswa") {
        return Ok(template_error(e.to_string()));
    }

    let contoh: [(&str, &str); 2] = [
        ("Vania Melati", "2"),
        ("Bima Saputra", "2"),
    ];

    let hasil = (|| -> Result<(), rust_xlsxwriter::XlsxError> {
        for (col, header) in REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header)?;
        }
        for (i, (nama, kelas)) in contoh.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, *nama)?;
            sheet.write_string(row, 1, *kelas)?;
            sheet.write_string(row, 2, "Ganjil")?;
            sheet.write_number(row, 3, 2025.0)?;
        }
        sheet.set_column_width(0, 25)?;
        Ok(())
    })();
    if let Err(e) = hasil {
        return Ok(template_error(e.to_string()));
    }

    match workbook.save_to_buffer() {
        Ok(buffer) => Ok(HttpResponse::Ok()
            .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"template-import-siswa.xlsx\"",
            ))
            .body(buffer)),
        Err(e) => Ok(template_error(e.to_string())),
    }
}

fn template_error(cause: String) -> HttpResponse {
    error!("Gagal membuat template: {}", cause);
    HttpResponse::InternalServerError().json(ApiResponse::error_detail(
        ErrorCode::InternalServerError,
        "Terjadi kesalahan saat generate template",
        cause,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> RowMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_baris_valid() {
        let parsed = validate_row(
            &row(&[
                ("Nama Siswa", "Budi"),
                ("Kelas", "2"),
                ("Semester", "Ganjil"),
                ("Tahun", "2025"),
            ]),
            2,
        )
        .expect("baris valid");
        assert_eq!(parsed.name, "Budi");
        assert_eq!(parsed.semester, Semester::Ganjil);
        assert_eq!(parsed.tahun, 2025);
    }

    #[test]
    fn test_baris_tidak_lengkap() {
        let err = validate_row(
            &row(&[
                ("Nama Siswa", ""),
                ("Kelas", "2"),
                ("Semester", "ganjil"),
                ("Tahun", "2025"),
            ]),
            3,
        )
        .unwrap_err();
        assert!(err.starts_with("Baris 3:"));
        assert!(err.contains("tidak lengkap"));
    }

    #[test]
    fn test_tahun_tidak_valid() {
        let err = validate_row(
            &row(&[
                ("Nama Siswa", "Budi"),
                ("Kelas", "2"),
                ("Semester", "ganjil"),
                ("Tahun", "abc"),
            ]),
            5,
        )
        .unwrap_err();
        assert!(err.contains("Tahun"));
    }

    #[test]
    fn test_semester_tidak_valid() {
        let err = validate_row(
            &row(&[
                ("Nama Siswa", "Budi"),
                ("Kelas", "2"),
                ("Semester", "pendek"),
                ("Tahun", "2025"),
            ]),
            4,
        )
        .unwrap_err();
        assert!(err.contains("ganjil"));
    }
}
