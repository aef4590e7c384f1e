use serde::{Deserialize, Serialize};

use crate::models::common::periode::Semester;
use crate::models::users::entities::UserRingkas;

// Entity siswa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Siswa {
    pub id: i64,
    pub name: String,
    pub kelas: String,
    pub tahun: i32,
    pub semester: Semester,
    #[serde(skip_serializing)]
    pub walikelas_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// Blok wali kelas yang ditempelkan pada respons siswa/penilaian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalikelasRingkas {
    pub id: i64,
    pub sekolah: Option<String>,
    pub jurusan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRingkas>,
}

// Siswa beserta wali kelasnya
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiswaDetail {
    #[serde(flatten)]
    pub siswa: Siswa,
    pub walikelas: Option<WalikelasRingkas>,
}

// Ringkasan siswa pada respons penilaian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiswaRingkas {
    pub id: i64,
    pub name: String,
    pub kelas: String,
}

impl From<&Siswa> for SiswaRingkas {
    fn from(siswa: &Siswa) -> Self {
        Self {
            id: siswa.id,
            name: siswa.name.clone(),
            kelas: siswa.kelas.clone(),
        }
    }
}
