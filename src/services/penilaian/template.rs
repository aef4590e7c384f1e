//! Template XLSX untuk import nilai

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Workbook, XlsxError};
use tracing::error;

use super::PenilaianService;
use super::import::REQUIRED_COLUMNS;
use crate::models::{ApiResponse, ErrorCode};

// Baris petunjuk + dua baris contoh, mengikuti urutan kolom wajib
const PETUNJUK: [&str; 10] = [
    "Contoh: Vania Melati",
    "Contoh: 108 (jumlah hari hadir, 0-365)",
    "Contoh: 85 (angka, 0-100)",
    "Contoh: 91 (angka, 0-100)",
    "Contoh: 83 (angka, 0-100)",
    "Contoh: 90 (angka, 0-100)",
    "Contoh: 95 (angka, 0-100)",
    "Contoh: 2",
    "Contoh: Ganjil",
    "Contoh: 2025",
];

const CONTOH: [[&str; 10]; 2] = [
    ["Vania Melati", "108", "85", "91", "83", "90", "95", "2", "Ganjil", "2025"],
    ["Bima Saputra", "103", "90", "85", "88", "90", "92", "2", "Ganjil", "2025"],
];

fn build_template() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Template Nilai Siswa")?;

    for (col, header) in REQUIRED_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (col, petunjuk) in PETUNJUK.iter().enumerate() {
        sheet.write_string(1, col as u16, *petunjuk)?;
    }
    for (i, baris) in CONTOH.iter().enumerate() {
        let row = (i + 2) as u32;
        for (col, sel) in baris.iter().enumerate() {
            // angka ditulis sebagai angka supaya langsung valid saat diimport
            match sel.parse::<f64>() {
                Ok(angka) => sheet.write_number(row, col as u16, angka)?,
                Err(_) => sheet.write_string(row, col as u16, *sel)?,
            };
        }
    }

    for col in 0..REQUIRED_COLUMNS.len() {
        sheet.set_column_width(col as u16, 28)?;
    }

    workbook.save_to_buffer()
}

pub async fn import_template(
    _service: &PenilaianService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match build_template() {
        Ok(buffer) => Ok(HttpResponse::Ok()
            .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"template-import-nilai-siswa.xlsx\"",
            ))
            .body(buffer)),
        Err(e) => {
            error!("Gagal membuat template: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                    ErrorCode::InternalServerError,
                    "Terjadi kesalahan saat generate template",
                    e.to_string(),
                )),
            )
        }
    }
}
