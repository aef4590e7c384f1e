use super::SeaOrmStorage;
use crate::entity::prelude::Siswa as SiswaEntity;
use crate::entity::siswa;
use crate::errors::{Result, SispresError};
use crate::models::dashboard::responses::DashboardFiltersResponse;
use sea_orm::{EntityTrait, QuerySelect};

impl SeaOrmStorage {
    /// Nilai distinct tahun/semester/kelas untuk pilihan filter dashboard
    pub async fn list_filter_values_impl(&self) -> Result<DashboardFiltersResponse> {
        let mut years: Vec<i32> = SiswaEntity::find()
            .select_only()
            .column(siswa::Column::Tahun)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query tahun: {e}")))?;
        years.sort_unstable_by(|a, b| b.cmp(a)); // terbaru lebih dulu

        let mut semesters: Vec<String> = SiswaEntity::find()
            .select_only()
            .column(siswa::Column::Semester)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query semester: {e}")))?;
        semesters.sort();

        let mut classes: Vec<String> = SiswaEntity::find()
            .select_only()
            .column(siswa::Column::Kelas)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query kelas: {e}")))?;
        classes.sort();

        Ok(DashboardFiltersResponse {
            years,
            semesters,
            classes,
        })
    }
}
