use std::collections::HashMap;
use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Akun pengguna dan profil wali kelas
    // Buat user; bila role walikelas, profil dibuat dalam transaksi yang sama
    async fn create_user(&self, data: CreateUserData) -> Result<User>;
    // Ambil user (termasuk profil walikelas bila ada)
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list_users(&self) -> Result<Vec<User>>;
    // Update user; pergantian role mengelola baris walikelas secara transaksional
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    async fn get_walikelas_by_id(&self, id: i64) -> Result<Option<WalikelasProfile>>;
    async fn count_users(&self) -> Result<u64>;
    async fn count_walikelas(&self) -> Result<u64>;

    /// Siswa
    async fn create_siswa(&self, data: CreateSiswaData) -> Result<Siswa>;
    async fn get_siswa_by_id(&self, id: i64) -> Result<Option<Siswa>>;
    // Siswa beserta wali kelas dan akun user-nya
    async fn get_siswa_detail(&self, id: i64) -> Result<Option<SiswaDetail>>;
    // Kunci identitas pada alur import: (name, kelas, walikelas)
    async fn find_siswa_by_identity(
        &self,
        name: &str,
        kelas: &str,
        walikelas_id: i64,
    ) -> Result<Option<Siswa>>;
    // Kunci lengkap pada alur create eksplisit: + (tahun, semester)
    async fn find_siswa_by_full_key(
        &self,
        name: &str,
        kelas: &str,
        tahun: i32,
        semester: Semester,
        walikelas_id: i64,
    ) -> Result<Option<Siswa>>;
    // List terfilter + total baris untuk pagination
    async fn list_siswa_with_pagination(&self, filter: SiswaFilter)
    -> Result<(Vec<SiswaDetail>, i64)>;
    async fn update_siswa(&self, id: i64, update: UpdateSiswaRequest) -> Result<Option<Siswa>>;
    async fn delete_siswa(&self, id: i64) -> Result<bool>;
    async fn count_siswa(
        &self,
        tahun: Option<i32>,
        semester: Option<Semester>,
        walikelas_id: Option<i64>,
    ) -> Result<u64>;
    // Blok walikelas (beserta akun usernya) per id, untuk dirangkai di respons
    async fn walikelas_ringkas_by_ids(
        &self,
        ids: Vec<i64>,
    ) -> Result<HashMap<i64, WalikelasRingkas>>;

    /// Penilaian
    async fn create_penilaian(&self, data: CreatePenilaianData) -> Result<Penilaian>;
    async fn get_penilaian_by_id(&self, id: i64) -> Result<Option<Penilaian>>;
    // Cek duplikat untuk satu periode (siswa, semester, tahun)
    async fn find_penilaian_by_periode(
        &self,
        siswa_id: i64,
        semester: Semester,
        tahun: i32,
    ) -> Result<Option<Penilaian>>;
    async fn list_penilaian_with_pagination(
        &self,
        filter: PenilaianFilter,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<PenilaianWithSiswa>, i64)>;
    // Tanpa pagination, untuk export dan dashboard; dibatasi max_rows
    async fn list_penilaian_filtered(
        &self,
        filter: PenilaianFilter,
        max_rows: u64,
    ) -> Result<Vec<PenilaianWithSiswa>>;
    async fn list_penilaian_by_siswa(&self, siswa_id: i64) -> Result<Vec<Penilaian>>;
    async fn update_penilaian(
        &self,
        id: i64,
        update: UpdatePenilaianData,
    ) -> Result<Option<Penilaian>>;
    async fn delete_penilaian(&self, id: i64) -> Result<bool>;

    /// Dashboard
    // Nilai distinct tahun/semester/kelas untuk pilihan filter
    async fn list_filter_values(&self) -> Result<DashboardFiltersResponse>;
    // Daftar kelas distinct dalam scope/filter tertentu
    async fn distinct_kelas(
        &self,
        tahun: Option<i32>,
        semester: Option<Semester>,
        walikelas_id: Option<i64>,
    ) -> Result<Vec<String>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
