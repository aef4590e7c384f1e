pub mod auth;
pub mod common;
pub mod dashboard;
pub mod penilaian;
pub mod siswa;
pub mod users;

pub use common::pagination::PaginationInfo;
pub use common::response::{ApiResponse, ErrorCode};

/// Waktu mulai aplikasi, disimpan di app data
#[derive(Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
