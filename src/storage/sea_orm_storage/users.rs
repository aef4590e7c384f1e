use super::SeaOrmStorage;
use crate::entity::prelude::{Users, Walikelas};
use crate::entity::{users, walikelas};
use crate::errors::{Result, SispresError};
use crate::models::users::{
    entities::{User, UserRole, WalikelasProfile},
    requests::{CreateUserData, UpdateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// Buat user; profil walikelas dibuat dalam satu transaksi bila rolenya
    /// walikelas (konsistensi pasangan user + profil)
    pub async fn create_user_impl(&self, data: CreateUserData) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let is_walikelas = data.role == UserRole::WaliKelas;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        let model = users::ActiveModel {
            name: Set(data.name),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            phone: Set(data.phone),
            role: Set(data.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal membuat user: {e}")))?;

        let mut profile = None;
        if is_walikelas {
            let walikelas_model = walikelas::ActiveModel {
                user_id: Set(inserted.id),
                sekolah: Set(data.sekolah),
                jurusan: Set(data.jurusan),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            let inserted_profile = walikelas_model.insert(&txn).await.map_err(|e| {
                SispresError::database_operation(format!("Gagal membuat profil wali kelas: {e}"))
            })?;
            profile = Some(inserted_profile.into_profile());
        }

        txn.commit()
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal commit transaksi: {e}")))?;

        let mut user = inserted.into_user();
        user.walikelas = profile;
        Ok(user)
    }

    /// Tempelkan profil walikelas ke model user
    async fn attach_walikelas(&self, mut user: User) -> Result<User> {
        if user.role == UserRole::WaliKelas {
            user.walikelas = self.get_walikelas_by_user_id_impl(user.id).await?;
        }
        Ok(user)
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query user: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.attach_walikelas(model.into_user()).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query user: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.attach_walikelas(model.into_user()).await?)),
            None => Ok(None),
        }
    }

    pub async fn list_users_impl(&self) -> Result<Vec<User>> {
        let models = Users::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query daftar user: {e}")))?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            result.push(self.attach_walikelas(model.into_user()).await?);
        }
        Ok(result)
    }

    /// Update user; pergantian role walikelas <-> operator mengelola baris
    /// profil dalam transaksi yang sama
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        let Some(existing) = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query user: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let old_role = existing.role.clone();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal memulai transaksi: {e}")))?;

        let mut model = users::ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(ref role) = update.role {
            model.role = Set(role.to_string());
        }

        model
            .update(&txn)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal update user: {e}")))?;

        // kelola baris walikelas mengikuti role
        let new_role = update
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| old_role.clone());

        let existing_profile = Walikelas::find()
            .filter(walikelas::Column::UserId.eq(id))
            .one(&txn)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query profil: {e}")))?;

        if new_role == UserRole::WALIKELAS {
            match existing_profile {
                Some(profile) => {
                    if update.sekolah.is_some() || update.jurusan.is_some() {
                        let mut profile_model: walikelas::ActiveModel = profile.into();
                        if let Some(sekolah) = update.sekolah {
                            profile_model.sekolah = Set(Some(sekolah));
                        }
                        if let Some(jurusan) = update.jurusan {
                            profile_model.jurusan = Set(Some(jurusan));
                        }
                        profile_model.updated_at = Set(now);
                        profile_model.update(&txn).await.map_err(|e| {
                            SispresError::database_operation(format!("Gagal update profil: {e}"))
                        })?;
                    }
                }
                None => {
                    let profile_model = walikelas::ActiveModel {
                        user_id: Set(id),
                        sekolah: Set(update.sekolah),
                        jurusan: Set(update.jurusan),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    profile_model.insert(&txn).await.map_err(|e| {
                        SispresError::database_operation(format!("Gagal membuat profil: {e}"))
                    })?;
                }
            }
        } else if let Some(profile) = existing_profile {
            // role menjadi operator: baris walikelas dilepas
            Walikelas::delete_by_id(profile.id)
                .exec(&txn)
                .await
                .map_err(|e| {
                    SispresError::database_operation(format!("Gagal menghapus profil: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal commit transaksi: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal menghapus user: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                users::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(users::Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal update password: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_walikelas_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<WalikelasProfile>> {
        let result = Walikelas::find()
            .filter(walikelas::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query walikelas: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    pub async fn get_walikelas_by_id_impl(&self, id: i64) -> Result<Option<WalikelasProfile>> {
        let result = Walikelas::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal query walikelas: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal hitung user: {e}")))?;

        Ok(count)
    }

    pub async fn count_walikelas_impl(&self) -> Result<u64> {
        let count = Users::find()
            .filter(users::Column::Role.eq(UserRole::WALIKELAS))
            .count(&self.db)
            .await
            .map_err(|e| SispresError::database_operation(format!("Gagal hitung wali kelas: {e}")))?;

        Ok(count)
    }
}
