//! Implementasi storage SeaORM
//!
//! Lapisan penyimpanan terpadu; mendukung SQLite, PostgreSQL, dan MySQL.

mod dashboard;
mod penilaian;
mod siswa;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SispresError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Storage berbasis SeaORM
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // jalankan migrasi saat startup
        Migrator::up(&db, None)
            .await
            .map_err(|e| SispresError::database_operation(format!("Migrasi database gagal: {e}")))?;

        info!("Storage SeaORM siap, database: {}", db_url);

        Ok(Self { db })
    }

    /// Koneksi khusus SQLite (WAL + pragma)
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SispresError::database_config(format!("URL SQLite tidak valid: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SispresError::database_connection(format!("Koneksi SQLite gagal: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Koneksi generik (PostgreSQL, MySQL)
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SispresError::database_connection(format!("Tidak bisa konek database: {e}")))
    }

    /// Infer tipe database dari URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SispresError::database_config(format!(
                "Tipe database tidak dikenali dari URL: {url}. Didukung: sqlite://, postgres://, mysql://, atau path file .db/.sqlite"
            )))
        }
    }
}

// Implementasi trait Storage
use crate::models::{
    common::periode::Semester,
    dashboard::responses::DashboardFiltersResponse,
    penilaian::{
        entities::{Penilaian, PenilaianWithSiswa},
        requests::{CreatePenilaianData, PenilaianFilter, UpdatePenilaianData},
    },
    siswa::{
        entities::{Siswa, SiswaDetail, WalikelasRingkas},
        requests::{CreateSiswaData, SiswaFilter, UpdateSiswaRequest},
    },
    users::{
        entities::{User, WalikelasProfile},
        requests::{CreateUserData, UpdateUserRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Modul users
    async fn create_user(&self, data: CreateUserData) -> Result<User> {
        self.create_user_impl(data).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_password_impl(id, password_hash).await
    }

    async fn get_walikelas_by_id(&self, id: i64) -> Result<Option<WalikelasProfile>> {
        self.get_walikelas_by_id_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_walikelas(&self) -> Result<u64> {
        self.count_walikelas_impl().await
    }

    // Modul siswa
    async fn create_siswa(&self, data: CreateSiswaData) -> Result<Siswa> {
        self.create_siswa_impl(data).await
    }

    async fn get_siswa_by_id(&self, id: i64) -> Result<Option<Siswa>> {
        self.get_siswa_by_id_impl(id).await
    }

    async fn get_siswa_detail(&self, id: i64) -> Result<Option<SiswaDetail>> {
        self.get_siswa_detail_impl(id).await
    }

    async fn find_siswa_by_identity(
        &self,
        name: &str,
        kelas: &str,
        walikelas_id: i64,
    ) -> Result<Option<Siswa>> {
        self.find_siswa_by_identity_impl(name, kelas, walikelas_id)
            .await
    }

    async fn find_siswa_by_full_key(
        &self,
        name: &str,
        kelas: &str,
        tahun: i32,
        semester: Semester,
        walikelas_id: i64,
    ) -> Result<Option<Siswa>> {
        self.find_siswa_by_full_key_impl(name, kelas, tahun, semester, walikelas_id)
            .await
    }

    async fn list_siswa_with_pagination(
        &self,
        filter: SiswaFilter,
    ) -> Result<(Vec<SiswaDetail>, i64)> {
        self.list_siswa_with_pagination_impl(filter).await
    }

    async fn update_siswa(&self, id: i64, update: UpdateSiswaRequest) -> Result<Option<Siswa>> {
        self.update_siswa_impl(id, update).await
    }

    async fn delete_siswa(&self, id: i64) -> Result<bool> {
        self.delete_siswa_impl(id).await
    }

    async fn count_siswa(
        &self,
        tahun: Option<i32>,
        semester: Option<Semester>,
        walikelas_id: Option<i64>,
    ) -> Result<u64> {
        self.count_siswa_impl(tahun, semester, walikelas_id).await
    }

    async fn walikelas_ringkas_by_ids(
        &self,
        ids: Vec<i64>,
    ) -> Result<HashMap<i64, WalikelasRingkas>> {
        self.walikelas_ringkas_map(&ids).await
    }

    // Modul penilaian
    async fn create_penilaian(&self, data: CreatePenilaianData) -> Result<Penilaian> {
        self.create_penilaian_impl(data).await
    }

    async fn get_penilaian_by_id(&self, id: i64) -> Result<Option<Penilaian>> {
        self.get_penilaian_by_id_impl(id).await
    }

    async fn find_penilaian_by_periode(
        &self,
        siswa_id: i64,
        semester: Semester,
        tahun: i32,
    ) -> Result<Option<Penilaian>> {
        self.find_penilaian_by_periode_impl(siswa_id, semester, tahun)
            .await
    }

    async fn list_penilaian_with_pagination(
        &self,
        filter: PenilaianFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<PenilaianWithSiswa>, i64)> {
        self.list_penilaian_with_pagination_impl(filter, page, limit)
            .await
    }

    async fn list_penilaian_filtered(
        &self,
        filter: PenilaianFilter,
        max_rows: u64,
    ) -> Result<Vec<PenilaianWithSiswa>> {
        self.list_penilaian_filtered_impl(filter, max_rows).await
    }

    async fn list_penilaian_by_siswa(&self, siswa_id: i64) -> Result<Vec<Penilaian>> {
        self.list_penilaian_by_siswa_impl(siswa_id).await
    }

    async fn update_penilaian(
        &self,
        id: i64,
        update: UpdatePenilaianData,
    ) -> Result<Option<Penilaian>> {
        self.update_penilaian_impl(id, update).await
    }

    async fn delete_penilaian(&self, id: i64) -> Result<bool> {
        self.delete_penilaian_impl(id).await
    }

    // Modul dashboard
    async fn list_filter_values(&self) -> Result<DashboardFiltersResponse> {
        self.list_filter_values_impl().await
    }

    async fn distinct_kelas(
        &self,
        tahun: Option<i32>,
        semester: Option<Semester>,
        walikelas_id: Option<i64>,
    ) -> Result<Vec<String>> {
        self.distinct_kelas_impl(tahun, semester, walikelas_id).await
    }
}
