//! Entity siswa

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "siswa")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub kelas: String,
    pub tahun: i32,
    pub semester: String,
    pub walikelas_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::walikelas::Entity",
        from = "Column::WalikelasId",
        to = "super::walikelas::Column::Id"
    )]
    Walikelas,
    #[sea_orm(has_many = "super::penilaian::Entity")]
    Penilaian,
}

impl Related<super::walikelas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Walikelas.def()
    }
}

impl Related<super::penilaian::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Penilaian.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_siswa(self) -> crate::models::siswa::entities::Siswa {
        use crate::models::common::periode::Semester;
        use chrono::{DateTime, Utc};

        crate::models::siswa::entities::Siswa {
            id: self.id,
            name: self.name,
            kelas: self.kelas,
            tahun: self.tahun,
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::Ganjil),
            walikelas_id: self.walikelas_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
