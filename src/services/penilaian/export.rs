//! Export data penilaian ke XLSX

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::error;

use super::PenilaianService;
use crate::models::common::periode::{Semester, parse_tahun};
use crate::models::penilaian::entities::PenilaianWithSiswa;
use crate::models::penilaian::requests::{PenilaianExportQuery, PenilaianFilter};
use crate::models::siswa::entities::WalikelasRingkas;
use crate::models::{ApiResponse, ErrorCode};
use crate::prediksi::parse_prediksi;
use crate::services::{current_user, scoped_walikelas_id};
use crate::utils::grading;

// Batas atas baris yang diexport sekali jalan
const MAX_EXPORT_ROWS: u64 = 5000;

struct ExportContext {
    items: Vec<PenilaianWithSiswa>,
    walikelas_map: HashMap<i64, WalikelasRingkas>,
    filters: PenilaianExportQuery,
}

async fn collect_export_data(
    service: &PenilaianService,
    query: PenilaianExportQuery,
    request: &HttpRequest,
) -> Result<ExportContext, HttpResponse> {
    let storage = service.get_storage(request);

    let user = current_user(request)?;
    let walikelas_scope = scoped_walikelas_id(&user)?;

    let semester = match query.semester.as_deref() {
        Some(raw) => match raw.parse::<Semester>() {
            Ok(semester) => Some(semester),
            Err(msg) => {
                return Err(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
            }
        },
        None => None,
    };

    let filter = PenilaianFilter {
        siswa_id: None,
        kelas: query.kelas.clone(),
        semester,
        tahun: query.tahun.as_deref().and_then(parse_tahun),
        search: query.search.clone().filter(|s| s.len() >= 2),
        walikelas_id: walikelas_scope,
    };

    let limit = query
        .limit
        .map(|l| (l.max(1) as u64).min(MAX_EXPORT_ROWS))
        .unwrap_or(MAX_EXPORT_ROWS);

    let items = storage
        .list_penilaian_filtered(filter, limit)
        .await
        .map_err(|e| {
            error!("Gagal query data export: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_detail(
                ErrorCode::InternalServerError,
                "Terjadi kesalahan saat export data penilaian",
                e.to_string(),
            ))
        })?;

    let walikelas_ids: Vec<i64> = items
        .iter()
        .filter_map(|item| item.siswa.as_ref().map(|s| s.walikelas_id))
        .collect();
    let walikelas_map = storage
        .walikelas_ringkas_by_ids(walikelas_ids)
        .await
        .unwrap_or_default();

    Ok(ExportContext {
        items,
        walikelas_map,
        filters: query,
    })
}

fn export_filename(prefix: &str, filters: &PenilaianExportQuery) -> String {
    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
    let mut filename = format!("{prefix}-{timestamp}");
    if let Some(ref kelas) = filters.kelas {
        filename.push_str(&format!("-kelas-{kelas}"));
    }
    if let Some(ref semester) = filters.semester {
        filename.push_str(&format!("-semester-{semester}"));
    }
    if let Some(ref tahun) = filters.tahun {
        filename.push_str(&format!("-tahun-{tahun}"));
    }
    filename.push_str(".xlsx");
    filename
}

fn xlsx_response(buffer: Vec<u8>, filename: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(buffer)
}

fn xlsx_error(e: impl std::fmt::Display) -> HttpResponse {
    error!("Gagal membuat XLSX: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_detail(
        ErrorCode::InternalServerError,
        "Terjadi kesalahan saat export data penilaian",
        e.to_string(),
    ))
}

/// Export lengkap: data aktual + kolom prediksi + sheet ringkasan
pub async fn export_penilaian(
    service: &PenilaianService,
    query: PenilaianExportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match collect_export_data(service, query, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };

    let hasil = build_full_workbook(&ctx);
    match hasil {
        Ok(buffer) => Ok(xlsx_response(
            buffer,
            export_filename("data-penilaian", &ctx.filters),
        )),
        Err(e) => Ok(xlsx_error(e)),
    }
}

fn build_full_workbook(ctx: &ExportContext) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name("Data Penilaian")?;
    write_data_sheet(sheet, &header_format, ctx)?;

    let summary = workbook.add_worksheet().set_name("Summary")?;
    write_summary_sheet(summary, &header_format, ctx)?;

    workbook.save_to_buffer()
}

fn write_data_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    ctx: &ExportContext,
) -> Result<(), XlsxError> {
    let headers = [
        "Nama Siswa",
        "Kelas",
        "Wali Kelas",
        "Tahun Ajaran",
        "Semester",
        "Kehadiran (Hari)",
        "Persentase Kehadiran (%)",
        "Kategori Kehadiran",
        "Nilai Matematika",
        "Nilai IPA",
        "Nilai IPS",
        "Nilai Bahasa Indonesia",
        "Nilai Bahasa Inggris",
        "Rata-rata Nilai",
        "Kategori Prestasi",
        "Prestasi",
        "Prediksi Matematika",
        "Prediksi IPA",
        "Prediksi IPS",
        "Prediksi Bahasa Indonesia",
        "Prediksi Bahasa Inggris",
        "Rata-rata Prediksi",
        "Tanggal Input",
        "Diupdate Pada",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, header_format)?;
    }

    for (i, item) in ctx.items.iter().enumerate() {
        let row = (i + 1) as u32;
        let p = &item.penilaian;

        let (rata_rata, kategori) = grading::hitung_rata_rata(&p.nilai());
        let persentase = p.persentase_kehadiran();
        let kategori_kehadiran = persentase.map(grading::kategori_kehadiran);

        let nama_siswa = item.siswa.as_ref().map(|s| s.name.as_str()).unwrap_or("-");
        let kelas = item.siswa.as_ref().map(|s| s.kelas.as_str()).unwrap_or("-");
        let nama_walikelas = item
            .siswa
            .as_ref()
            .and_then(|s| ctx.walikelas_map.get(&s.walikelas_id))
            .and_then(|w| w.user.as_ref())
            .map(|u| u.name.as_str())
            .unwrap_or("-");

        sheet.write_string(row, 0, nama_siswa).ok();
        sheet.write_string(row, 1, kelas).ok();
        sheet.write_string(row, 2, nama_walikelas).ok();
        sheet.write_number(row, 3, f64::from(p.tahun)).ok();
        sheet.write_string(row, 4, p.semester.to_string()).ok();

        match p.kehadiran {
            Some(hari) => {
                sheet.write_number(row, 5, f64::from(hari)).ok();
            }
            None => {
                sheet.write_string(row, 5, "-").ok();
            }
        }
        match persentase {
            Some(pct) => {
                sheet.write_number(row, 6, grading::round2(pct)).ok();
            }
            None => {
                sheet.write_string(row, 6, "-").ok();
            }
        }
        sheet
            .write_string(
                row,
                7,
                kategori_kehadiran.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string()),
            )
            .ok();

        sheet.write_number(row, 8, p.matematika).ok();
        sheet.write_number(row, 9, p.ipa).ok();
        sheet.write_number(row, 10, p.ips).ok();
        sheet.write_number(row, 11, p.b_indonesia).ok();
        sheet.write_number(row, 12, p.b_inggris).ok();
        sheet.write_number(row, 13, rata_rata).ok();
        sheet.write_string(row, 14, kategori.to_string()).ok();
        sheet
            .write_string(
                row,
                15,
                p.prestasi.clone().unwrap_or_else(|| kategori.to_string()),
            )
            .ok();

        // kolom prediksi; payload tak valid ditulis "-"
        let prediksi = p
            .prediksi
            .as_ref()
            .map(|raw| parse_prediksi(raw, p.semester, p.tahun))
            .filter(|d| d.is_valid());
        match prediksi.as_ref().and_then(|d| d.nilai.as_ref()) {
            Some(nilai) => {
                sheet.write_number(row, 16, nilai.matematika).ok();
                sheet.write_number(row, 17, nilai.ipa).ok();
                sheet.write_number(row, 18, nilai.ips).ok();
                sheet.write_number(row, 19, nilai.b_indonesia).ok();
                sheet.write_number(row, 20, nilai.b_inggris).ok();
                sheet.write_number(row, 21, nilai.rata_rata).ok();
            }
            None => {
                for col in 16..=21u16 {
                    sheet.write_string(row, col, "-").ok();
                }
            }
        }

        sheet
            .write_string(row, 22, p.created_at.format("%d/%m/%Y").to_string())
            .ok();
        sheet
            .write_string(row, 23, p.updated_at.format("%d/%m/%Y").to_string())
            .ok();
    }

    sheet.set_column_width(0, 25).ok();
    sheet.set_column_width(2, 25).ok();
    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    ctx: &ExportContext,
) -> Result<(), XlsxError> {
    sheet.write_string_with_format(0, 0, "Keterangan", header_format)?;
    sheet.write_string_with_format(0, 1, "Nilai", header_format)?;

    let semua = "Semua".to_string();
    let rows: [(&str, String); 5] = [
        ("Total Data", ctx.items.len().to_string()),
        (
            "Tanggal Export",
            Utc::now().format("%d/%m/%Y").to_string(),
        ),
        ("Filter Kelas", ctx.filters.kelas.clone().unwrap_or_else(|| semua.clone())),
        (
            "Filter Semester",
            ctx.filters.semester.clone().unwrap_or_else(|| semua.clone()),
        ),
        ("Filter Tahun", ctx.filters.tahun.clone().unwrap_or(semua)),
    ];

    for (i, (keterangan, nilai)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *keterangan).ok();
        sheet.write_string(row, 1, nilai).ok();
    }

    sheet.set_column_width(0, 20).ok();
    sheet.set_column_width(1, 30).ok();
    Ok(())
}

/// Export ringkas: satu sheet tanpa kolom prediksi
pub async fn export_penilaian_simple(
    service: &PenilaianService,
    query: PenilaianExportQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match collect_export_data(service, query, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };

    let hasil = build_simple_workbook(&ctx);
    match hasil {
        Ok(buffer) => Ok(xlsx_response(
            buffer,
            export_filename("data-nilai-sederhana", &ctx.filters),
        )),
        Err(e) => Ok(xlsx_error(e)),
    }
}

fn build_simple_workbook(ctx: &ExportContext) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name("Data Nilai")?;

    let headers = [
        "Nama Siswa",
        "Kelas",
        "Tahun",
        "Semester",
        "Kehadiran",
        "Matematika",
        "IPA",
        "IPS",
        "Bahasa Indonesia",
        "Bahasa Inggris",
        "Rata-rata",
        "Kategori",
        "Prestasi",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, item) in ctx.items.iter().enumerate() {
        let row = (i + 1) as u32;
        let p = &item.penilaian;
        let (rata_rata, kategori) = grading::hitung_rata_rata(&p.nilai());

        sheet
            .write_string(row, 0, item.siswa.as_ref().map(|s| s.name.as_str()).unwrap_or("-"))
            .ok();
        sheet
            .write_string(row, 1, item.siswa.as_ref().map(|s| s.kelas.as_str()).unwrap_or("-"))
            .ok();
        sheet.write_number(row, 2, f64::from(p.tahun)).ok();
        sheet.write_string(row, 3, p.semester.to_string()).ok();
        sheet
            .write_number(row, 4, f64::from(p.kehadiran.unwrap_or(0)))
            .ok();
        sheet.write_number(row, 5, p.matematika).ok();
        sheet.write_number(row, 6, p.ipa).ok();
        sheet.write_number(row, 7, p.ips).ok();
        sheet.write_number(row, 8, p.b_indonesia).ok();
        sheet.write_number(row, 9, p.b_inggris).ok();
        sheet.write_number(row, 10, rata_rata).ok();
        sheet.write_string(row, 11, kategori.to_string()).ok();
        sheet
            .write_string(
                row,
                12,
                p.prestasi.clone().unwrap_or_else(|| kategori.to_string()),
            )
            .ok();
    }

    sheet.set_column_width(0, 25).ok();
    workbook.save_to_buffer()
}
