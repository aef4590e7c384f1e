use serde::{Deserialize, Serialize};

use super::entities::SiswaDetail;
use crate::models::PaginationInfo;

// Blok filter yang dipakai, dikembalikan apa adanya ke klien
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiswaListFilters {
    pub kelas: String,
    pub tahun: String,
    pub semester: String,
    pub search: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiswaListResponse {
    pub pagination: PaginationInfo,
    pub filters: SiswaListFilters,
    pub siswa: Vec<SiswaDetail>,
}

// Hasil import siswa (versi ringkas, tanpa rincian penilaian)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSiswaResponse {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}
