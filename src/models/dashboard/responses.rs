use serde::{Deserialize, Serialize};

// Ringkasan angka-angka utama dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_walikelas: u64,
    pub total_siswa: u64,
    pub avg_nilai: f64,
    pub avg_kehadiran: f64,
    pub total_kelas: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrestasiCount {
    pub prestasi: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrestasiPerSemester {
    pub semester: String,
    pub data: Vec<PrestasiCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvgPerKelas {
    pub kelas: String,
    pub avg_nilai: f64,
    pub avg_kehadiran: f64,
    pub total_siswa: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPerTahun {
    pub tahun: i32,
    pub avg_nilai: f64,
    pub avg_kehadiran: f64,
    pub total_siswa: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub prestasi_per_semester: Vec<PrestasiPerSemester>,
    pub avg_per_kelas: Vec<AvgPerKelas>,
    pub trend_per_tahun: Vec<TrendPerTahun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStatisticsResponse {
    pub summary: DashboardSummary,
    /// Selalu memuat kelima kategori, termasuk yang berjumlah nol
    pub prestasi_distribution: Vec<PrestasiCount>,
    pub charts: DashboardCharts,
}

// Statistik untuk satu wali kelas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalikelasSummary {
    pub total_siswa: u64,
    pub avg_nilai: f64,
    pub avg_kehadiran: f64,
    pub total_kelas: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalikelasStatisticsResponse {
    pub summary: WalikelasSummary,
    pub prestasi_distribution: Vec<PrestasiCount>,
}

// Nilai-nilai distinct untuk pilihan filter di frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardFiltersResponse {
    pub years: Vec<i32>,
    pub semesters: Vec<String>,
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardQuery {
    pub tahun: Option<String>,
    pub semester: Option<String>,
}
