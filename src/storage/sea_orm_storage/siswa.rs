use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::{Siswa as SiswaEntity, Walikelas};
use crate::entity::{siswa, walikelas};
use crate::errors::{Result, SispresError};
use crate::models::common::periode::Semester;
use crate::models::siswa::{
    entities::{Siswa, SiswaDetail, WalikelasRingkas},
    requests::{CreateSiswaData, SiswaFilter, UpdateSiswaRequest},
};
use crate::models::users::entities::UserRingkas;
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_siswa_impl(&self, data: CreateSiswaData) -> Result<Siswa> {
        let now = chrono::Utc::now().timestamp();

        let model = siswa::ActiveModel {
            name: Set(data.name),
            kelas: Set(data.kelas),
            tahun: Set(data.tahun),
            semester: Set(data.semester.to_string()),
            walikelas_id: Set(data.walikelas_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal membuat siswa: {e}")))?;

        Ok(result.into_siswa())
    }

    pub async fn get_siswa_by_id_impl(&self, id: i64) -> Result<Option<Siswa>> {
        let result = SiswaEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query siswa: {e}")))?;

        Ok(result.map(|m| m.into_siswa()))
    }

    pub async fn get_siswa_detail_impl(&self, id: i64) -> Result<Option<SiswaDetail>> {
        let Some(model) = SiswaEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query siswa: {e}")))?
        else {
            return Ok(None);
        };

        let siswa = model.into_siswa();
        let walikelas_map = self.walikelas_ringkas_map(&[siswa.walikelas_id]).await?;
        let walikelas = walikelas_map.get(&siswa.walikelas_id).cloned();

        Ok(Some(SiswaDetail { siswa, walikelas }))
    }

    pub async fn find_siswa_by_identity_impl(
        &self,
        name: &str,
        kelas: &str,
        walikelas_id: i64,
    ) -> Result<Option<Siswa>> {
        let result = SiswaEntity::find()
            .filter(siswa::Column::Name.eq(name))
            .filter(siswa::Column::Kelas.eq(kelas))
            .filter(siswa::Column::WalikelasId.eq(walikelas_id))
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query siswa: {e}")))?;

        Ok(result.map(|m| m.into_siswa()))
    }

    pub async fn find_siswa_by_full_key_impl(
        &self,
        name: &str,
        kelas: &str,
        tahun: i32,
        semester: Semester,
        walikelas_id: i64,
    ) -> Result<Option<Siswa>> {
        let result = SiswaEntity::find()
            .filter(siswa::Column::Name.eq(name))
            .filter(siswa::Column::Kelas.eq(kelas))
            .filter(siswa::Column::Tahun.eq(tahun))
            .filter(siswa::Column::Semester.eq(semester.to_string()))
            .filter(siswa::Column::WalikelasId.eq(walikelas_id))
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query siswa: {e}")))?;

        Ok(result.map(|m| m.into_siswa()))
    }

    pub async fn list_siswa_with_pagination_impl(
        &self,
        filter: SiswaFilter,
    ) -> Result<(Vec<SiswaDetail>, i64)> {
        let mut select = SiswaEntity::find();

        // scope wali kelas disuntikkan di lapisan service
        if let Some(walikelas_id) = filter.walikelas_id {
            select = select.filter(siswa::Column::WalikelasId.eq(walikelas_id));
        }
        if let Some(ref kelas) = filter.kelas {
            select = select.filter(siswa::Column::Kelas.eq(kelas.clone()));
        }
        if let Some(tahun) = filter.tahun {
            select = select.filter(siswa::Column::Tahun.eq(tahun));
        }
        if let Some(semester) = filter.semester {
            select = select.filter(siswa::Column::Semester.eq(semester.to_string()));
        }
        if let Some(ref search) = filter.search {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(siswa::Column::Name.contains(&escaped));
        }

        select = select
            .order_by_desc(siswa::Column::Tahun)
            .order_by_asc(siswa::Column::Semester)
            .order_by_asc(siswa::Column::Kelas)
            .order_by_asc(siswa::Column::Name);

        let paginator = select.paginate(&self.db, filter.limit.max(1) as u64);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal hitung siswa: {e}")))?;

        let page_index = (filter.page.max(1) - 1) as u64;
        let models = paginator
            .fetch_page(page_index)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query daftar siswa: {e}")))?;

        let siswa_list: Vec<Siswa> = models.into_iter().map(|m| m.into_siswa()).collect();

        let walikelas_ids: Vec<i64> = siswa_list.iter().map(|s| s.walikelas_id).collect();
        let walikelas_map = self.walikelas_ringkas_map(&walikelas_ids).await?;

        let details = siswa_list
            .into_iter()
            .map(|siswa| {
                let walikelas = walikelas_map.get(&siswa.walikelas_id).cloned();
                SiswaDetail { siswa, walikelas }
            })
            .collect();

        Ok((details, total as i64))
    }

    pub async fn update_siswa_impl(
        &self,
        id: i64,
        update: UpdateSiswaRequest,
    ) -> Result<Option<Siswa>> {
        let existing = self.get_siswa_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = siswa::ActiveModel {
            id: Set(id),
            name: Set(update.name),
            kelas: Set(update.kelas),
            tahun: Set(update.tahun),
            semester: Set(update.semester.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal update siswa: {e}")))?;

        self.get_siswa_by_id_impl(id).await
    }

    pub async fn delete_siswa_impl(&self, id: i64) -> Result<bool> {
        let result = SiswaEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal menghapus siswa: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_siswa_impl(
        &self,
        tahun: Option<i32>,
        semester: Option<Semester>,
        walikelas_id: Option<i64>,
    ) -> Result<u64> {
        let mut select = SiswaEntity::find();
        if let Some(tahun) = tahun {
            select = select.filter(siswa::Column::Tahun.eq(tahun));
        }
        if let Some(semester) = semester {
            select = select.filter(siswa::Column::Semester.eq(semester.to_string()));
        }
        if let Some(walikelas_id) = walikelas_id {
            select = select.filter(siswa::Column::WalikelasId.eq(walikelas_id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal hitung siswa: {e}")))?;

        Ok(count)
    }

    /// Peta walikelas_id -> blok WalikelasRingkas (dengan akun usernya)
    pub(crate) async fn walikelas_ringkas_map(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, WalikelasRingkas>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut unique_ids: Vec<i64> = ids.to_vec();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let rows = Walikelas::find()
            .filter(walikelas::Column::Id.is_in(unique_ids))
            .find_also_related(crate::entity::prelude::Users)
            .all(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query walikelas: {e}")))?;

        let mut map = HashMap::with_capacity(rows.len());
        for (profile, user) in rows {
            map.insert(
                profile.id,
                WalikelasRingkas {
                    id: profile.id,
                    sekolah: profile.sekolah,
                    jurusan: profile.jurusan,
                    user: user.map(|u| UserRingkas {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    }),
                },
            );
        }
        Ok(map)
    }

    /// Daftar kelas distinct (untuk statistik jumlah kelas)
    pub(crate) async fn distinct_kelas_impl(
        &self,
        tahun: Option<i32>,
        semester: Option<Semester>,
        walikelas_id: Option<i64>,
    ) -> Result<Vec<String>> {
        let mut select = SiswaEntity::find()
            .select_only()
            .column(siswa::Column::Kelas)
            .distinct();

        if let Some(tahun) = tahun {
            select = select.filter(siswa::Column::Tahun.eq(tahun));
        }
        if let Some(semester) = semester {
            select = select.filter(siswa::Column::Semester.eq(semester.to_string()));
        }
        if let Some(walikelas_id) = walikelas_id {
            select = select.filter(siswa::Column::WalikelasId.eq(walikelas_id));
        }

        let rows: Vec<String> = select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query kelas: {e}")))?;

        Ok(rows)
    }
}
