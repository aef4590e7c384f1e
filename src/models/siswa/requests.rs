use serde::Deserialize;

use crate::models::common::periode::Semester;

// Pembuatan siswa lewat endpoint tunggal
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSiswaRequest {
    pub name: String,
    pub kelas: String,
    pub tahun: i32,
    pub semester: Semester,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSiswaRequest {
    pub name: String,
    pub kelas: String,
    pub tahun: i32,
    pub semester: Semester,
}

// Query list siswa; tahun diterima sebagai string agar toleran format
#[derive(Debug, Clone, Deserialize)]
pub struct SiswaListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub kelas: Option<String>,
    pub tahun: Option<String>,
    pub semester: Option<String>,
    pub search: Option<String>,
}

// Filter list di lapisan storage (sudah ternormalisasi + scope walikelas)
#[derive(Debug, Clone, Default)]
pub struct SiswaFilter {
    pub kelas: Option<String>,
    pub tahun: Option<i32>,
    pub semester: Option<Semester>,
    pub search: Option<String>,
    pub walikelas_id: Option<i64>,
    pub page: i64,
    pub limit: i64,
}

// Data pembuatan siswa di lapisan storage
#[derive(Debug, Clone)]
pub struct CreateSiswaData {
    pub name: String,
    pub kelas: String,
    pub tahun: i32,
    pub semester: Semester,
    pub walikelas_id: i64,
}
