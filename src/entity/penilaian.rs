//! Entity penilaian (satu record nilai per siswa per periode)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "penilaian")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub siswa_id: i64,
    pub semester: String,
    pub tahun: i32,
    pub matematika: f64,
    pub ipa: f64,
    pub ips: f64,
    pub b_indonesia: f64,
    pub b_inggris: f64,
    pub kehadiran: Option<i32>,
    pub prestasi: Option<String>,
    /// Payload mentah dari layanan prediksi, disimpan sebagai JSON string
    #[sea_orm(column_type = "Text", nullable)]
    pub prediksi: Option<String>,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::siswa::Entity",
        from = "Column::SiswaId",
        to = "super::siswa::Column::Id"
    )]
    Siswa,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::siswa::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Siswa.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_penilaian(self) -> crate::models::penilaian::entities::Penilaian {
        use crate::models::common::periode::Semester;
        use chrono::{DateTime, Utc};

        crate::models::penilaian::entities::Penilaian {
            id: self.id,
            siswa_id: self.siswa_id,
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::Ganjil),
            tahun: self.tahun,
            matematika: self.matematika,
            ipa: self.ipa,
            ips: self.ips,
            b_indonesia: self.b_indonesia,
            b_inggris: self.b_inggris,
            kehadiran: self.kehadiran,
            prestasi: self.prestasi,
            // payload yang tidak bisa diparse diperlakukan sebagai tidak ada
            prediksi: self
                .prediksi
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
