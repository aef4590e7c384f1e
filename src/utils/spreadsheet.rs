//! Pembacaan file spreadsheet hasil upload.
//!
//! Baris dikembalikan sebagai peta nama-kolom -> isi-sel (string); header
//! baris pertama menentukan kolom yang tersedia. Mendukung .xlsx (calamine)
//! dengan fallback CSV.

use actix_multipart::Multipart;
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use std::collections::HashMap;
use std::io::Cursor;

use crate::errors::{Result, SispresError};

/// Satu baris data: nama kolom -> isi sel (sudah di-trim)
pub type RowMap = HashMap<String, String>;

/// Hasil parse satu sheet
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<RowMap>,
}

impl SheetData {
    /// Kolom wajib yang tidak ada di header; kosong berarti lengkap
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect()
    }
}

/// Baca field `file` dari payload multipart
pub async fn read_file_from_multipart(
    payload: &mut Multipart,
) -> std::result::Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Gagal membaca field: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.xlsx")
                    .to_string();
            }

            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("Gagal membaca data: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("Field file tidak ditemukan atau kosong".to_string());
    }

    Ok((file_bytes, file_name))
}

/// Parse isi file menjadi baris-baris peta kolom -> sel
pub fn parse_spreadsheet(data: &[u8], file_name: &str) -> Result<SheetData> {
    if file_name.ends_with(".csv") {
        parse_csv(data)
    } else {
        parse_xlsx(data)
    }
}

fn parse_xlsx(data: &[u8]) -> Result<SheetData> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| SispresError::spreadsheet_parse(format!("Gagal membuka XLSX: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| SispresError::spreadsheet_parse("Workbook tidak punya sheet"))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| SispresError::spreadsheet_parse(format!("Gagal membaca sheet: {e}")))?;

    let mut rows_iter = range.rows();

    let Some(header_row) = rows_iter.next() else {
        return Ok(SheetData {
            headers: Vec::new(),
            rows: Vec::new(),
        });
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let rows = rows_iter
        .map(|row| {
            let mut map = RowMap::with_capacity(headers.len());
            for (i, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = row
                    .get(i)
                    .map(|c| c.to_string().trim().to_string())
                    .unwrap_or_default();
                map.insert(header.clone(), value);
            }
            map
        })
        .collect();

    Ok(SheetData { headers, rows })
}

fn parse_csv(data: &[u8]) -> Result<SheetData> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| SispresError::spreadsheet_parse(format!("Gagal membaca header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            SispresError::spreadsheet_parse(format!("Baris {} gagal diparse: {e}", row_idx + 2))
        })?;

        let mut map = RowMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = record.get(i).unwrap_or("").trim().to_string();
            map.insert(header.clone(), value);
        }
        rows.push(map);
    }

    Ok(SheetData { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_sheet(content: &str) -> SheetData {
        parse_csv(content.as_bytes()).expect("csv harus terparse")
    }

    #[test]
    fn test_parse_csv_rows() {
        let sheet = csv_sheet("Nama Siswa,Kelas\nBudi,2\nSiti,3\n");
        assert_eq!(sheet.headers, vec!["Nama Siswa", "Kelas"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0]["Nama Siswa"], "Budi");
        assert_eq!(sheet.rows[1]["Kelas"], "3");
    }

    #[test]
    fn test_missing_columns() {
        let sheet = csv_sheet("Nama Siswa,Kelas\nBudi,2\n");
        let missing = sheet.missing_columns(&["Nama Siswa", "Kelas", "Semester", "Tahun"]);
        assert_eq!(missing, vec!["Semester".to_string(), "Tahun".to_string()]);
        assert!(sheet.missing_columns(&["Nama Siswa"]).is_empty());
    }

    #[test]
    fn test_sel_kosong_tetap_ada_kuncinya() {
        let sheet = csv_sheet("Nama Siswa,Kelas\nBudi,\n");
        assert_eq!(sheet.rows[0]["Kelas"], "");
    }
}
