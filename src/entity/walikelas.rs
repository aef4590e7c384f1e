//! Entity profil wali kelas

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "walikelas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub sekolah: Option<String>,
    pub jurusan: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::siswa::Entity")]
    Siswa,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::siswa::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Siswa.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_profile(self) -> crate::models::users::entities::WalikelasProfile {
        crate::models::users::entities::WalikelasProfile {
            id: self.id,
            user_id: self.user_id,
            sekolah: self.sekolah,
            jurusan: self.jurusan,
        }
    }
}
