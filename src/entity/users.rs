//! Entity akun pengguna

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::walikelas::Entity")]
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

// Konversi model database ke model bisnis
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole};
        use chrono::{DateTime, Utc};

        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::WaliKelas),
            walikelas: None,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
