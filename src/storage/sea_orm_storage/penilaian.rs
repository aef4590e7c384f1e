use super::SeaOrmStorage;
use crate::entity::prelude::{Penilaian as PenilaianEntity, Siswa as SiswaEntity};
use crate::entity::{penilaian, siswa};
use crate::errors::{Result, SispresError};
use crate::models::common::periode::Semester;
use crate::models::penilaian::{
    entities::{Penilaian, PenilaianWithSiswa},
    requests::{CreatePenilaianData, PenilaianFilter, UpdatePenilaianData},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_penilaian_impl(&self, data: CreatePenilaianData) -> Result<Penilaian> {
        let now = chrono::Utc::now().timestamp();

        let prediksi_raw = match data.prediksi {
            Some(ref value) => Some(serde_json::to_string(value).map_err(|e| {
                SispresError::serialization(format!("Gagal serialisasi prediksi: {e}"))
            })?),
            None => None,
        };

        let model = penilaian::ActiveModel {
            siswa_id: Set(data.siswa_id),
            semester: Set(data.semester.to_string()),
            tahun: Set(data.tahun),
            matematika: Set(data.matematika),
            ipa: Set(data.ipa),
            ips: Set(data.ips),
            b_indonesia: Set(data.b_indonesia),
            b_inggris: Set(data.b_inggris),
            kehadiran: Set(data.kehadiran),
            prestasi: Set(data.prestasi),
            prediksi: Set(prediksi_raw),
            created_by: Set(data.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SispresError::database_operation(format!("Gagal membuat penilaian: {e}"))
        })?;

        Ok(result.into_penilaian())
    }

    pub async fn get_penilaian_by_id_impl(&self, id: i64) -> Result<Option<Penilaian>> {
        let result = PenilaianEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query penilaian: {e}")))?;

        Ok(result.map(|m| m.into_penilaian()))
    }

    pub async fn find_penilaian_by_periode_impl(
        &self,
        siswa_id: i64,
        semester: Semester,
        tahun: i32,
    ) -> Result<Option<Penilaian>> {
        let result = PenilaianEntity::find()
            .filter(penilaian::Column::SiswaId.eq(siswa_id))
            .filter(penilaian::Column::Semester.eq(semester.to_string()))
            .filter(penilaian::Column::Tahun.eq(tahun))
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query penilaian: {e}")))?;

        Ok(result.map(|m| m.into_penilaian()))
    }

    fn apply_penilaian_filter(
        mut select: sea_orm::Select<PenilaianEntity>,
        filter: &PenilaianFilter,
    ) -> sea_orm::SelectTwo<PenilaianEntity, SiswaEntity> {
        if let Some(siswa_id) = filter.siswa_id {
            select = select.filter(penilaian::Column::SiswaId.eq(siswa_id));
        }
        if let Some(semester) = filter.semester {
            select = select.filter(penilaian::Column::Semester.eq(semester.to_string()));
        }
        if let Some(tahun) = filter.tahun {
            select = select.filter(penilaian::Column::Tahun.eq(tahun));
        }

        // filter atribut siswa butuh join
        let mut joined = select.find_also_related(SiswaEntity);
        if let Some(ref kelas) = filter.kelas {
            joined = joined.filter(siswa::Column::Kelas.eq(kelas.clone()));
        }
        if let Some(ref search) = filter.search {
            let escaped = escape_like_pattern(search.trim());
            joined = joined.filter(siswa::Column::Name.contains(&escaped));
        }
        // scope wali kelas; query dari principal walikelas selalu membawa ini
        if let Some(walikelas_id) = filter.walikelas_id {
            joined = joined.filter(siswa::Column::WalikelasId.eq(walikelas_id));
        }

        joined
    }

    pub async fn list_penilaian_with_pagination_impl(
        &self,
        filter: PenilaianFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<PenilaianWithSiswa>, i64)> {
        let joined = Self::apply_penilaian_filter(PenilaianEntity::find(), &filter)
            .order_by(penilaian::Column::Tahun, Order::Desc)
            .order_by(penilaian::Column::Semester, Order::Desc)
            .order_by(penilaian::Column::CreatedAt, Order::Desc);

        let paginator = joined.paginate(&self.db, limit.max(1) as u64);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal hitung penilaian: {e}")))?;

        let rows = paginator
            .fetch_page((page.max(1) - 1) as u64)
            .await
            .map_err(|e| {
                SispresError::database_operation(format!("Gagal query daftar penilaian: {e}"))
            })?;

        let items = rows
            .into_iter()
            .map(|(p, s)| PenilaianWithSiswa {
                penilaian: p.into_penilaian(),
                siswa: s.map(|m| m.into_siswa()),
            })
            .collect();

        Ok((items, total as i64))
    }

    pub async fn list_penilaian_filtered_impl(
        &self,
        filter: PenilaianFilter,
        max_rows: u64,
    ) -> Result<Vec<PenilaianWithSiswa>> {
        let rows = Self::apply_penilaian_filter(PenilaianEntity::find(), &filter)
            .order_by(penilaian::Column::Tahun, Order::Desc)
            .order_by(penilaian::Column::Semester, Order::Desc)
            .order_by(siswa::Column::Kelas, Order::Asc)
            .order_by(siswa::Column::Name, Order::Asc)
            .limit(max_rows)
            .all(&self.db)
            .await
            .map_err(|e| {
                SispresError::database_operation(format!("Gagal query daftar penilaian: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .map(|(p, s)| PenilaianWithSiswa {
                penilaian: p.into_penilaian(),
                siswa: s.map(|m| m.into_siswa()),
            })
            .collect())
    }

    pub async fn list_penilaian_by_siswa_impl(&self, siswa_id: i64) -> Result<Vec<Penilaian>> {
        let rows = PenilaianEntity::find()
            .filter(penilaian::Column::SiswaId.eq(siswa_id))
            .order_by(penilaian::Column::Tahun, Order::Asc)
            .order_by(penilaian::Column::Semester, Order::Asc)
            .all(&self.db)
            .await
            .map_err(|e| {
                SispresError::database_operation(format!("Gagal query penilaian siswa: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_penilaian()).collect())
    }

    pub async fn update_penilaian_impl(
        &self,
        id: i64,
        update: UpdatePenilaianData,
    ) -> Result<Option<Penilaian>> {
        let existing = self.get_penilaian_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = penilaian::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(matematika) = update.matematika {
            model.matematika = Set(matematika);
        }
        if let Some(ipa) = update.ipa {
            model.ipa = Set(ipa);
        }
        if let Some(ips) = update.ips {
            model.ips = Set(ips);
        }
        if let Some(b_indonesia) = update.b_indonesia {
            model.b_indonesia = Set(b_indonesia);
        }
        if let Some(b_inggris) = update.b_inggris {
            model.b_inggris = Set(b_inggris);
        }
        if let Some(kehadiran) = update.kehadiran {
            model.kehadiran = Set(Some(kehadiran));
        }
        if let Some(prestasi) = update.prestasi {
            model.prestasi = Set(Some(prestasi));
        }
        if let Some(prediksi) = update.prediksi {
            let raw = match prediksi {
                Some(ref value) => Some(serde_json::to_string(value).map_err(|e| {
                    SispresError::serialization(format!("Gagal serialisasi prediksi: {e}"))
                })?),
                None => None,
            };
            model.prediksi = Set(raw);
        }

        model.update(&self.db).await.map_err(|e| {
            SispresError::database_operation(format!("Gagal update penilaian: {e}"))
        })?;

        self.get_penilaian_by_id_impl(id).await
    }

    pub async fn delete_penilaian_impl(&self, id: i64) -> Result<bool> {
        let result = PenilaianEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SispresError::database_operation(format!("Gagal menghapus penilaian: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
