//! Sispres - backend sistem penilaian siswa
//!
//! Backend penilaian sekolah berbasis Actix Web: CRUD siswa, nilai per
//! semester, akun wali kelas, import/export Excel, statistik dashboard, dan
//! prediksi nilai semester berikutnya lewat layanan eksternal.
//!
//! # Arsitektur
//! - `config`: manajemen konfigurasi
//! - `entity`: entity database SeaORM
//! - `errors`: penanganan error terpadu
//! - `middlewares`: middleware autentikasi dan otorisasi
//! - `models`: definisi model data
//! - `prediksi`: klien + parser layanan prediksi eksternal
//! - `routes`: lapisan routing API
//! - `runtime`: siklus hidup proses
//! - `services`: lapisan logika bisnis
//! - `storage`: lapisan penyimpanan (SeaORM)
//! - `utils`: fungsi-fungsi pembantu

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod prediksi;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
