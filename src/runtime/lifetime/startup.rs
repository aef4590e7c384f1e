use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserData;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// Password acak untuk akun operator awal
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Seed akun operator default bila database belum punya user sama sekali
async fn seed_operator(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database sudah punya {} user, lewati seed operator", count);
            return;
        }
        Ok(_) => {
            info!("Belum ada user di database, membuat akun operator default...");
        }
        Err(e) => {
            warn!("Gagal menghitung user: {}, lewati seed operator", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD TIDAK DISET - MEMAKAI PASSWORD ACAK");
        warn!("  Password operator: {}", pwd);
        warn!("  Simpan password ini atau set env var ADMIN_PASSWORD");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Gagal hash password operator: {}, lewati seed", e);
            return;
        }
    };

    let operator = CreateUserData {
        name: "Operator".to_string(),
        email: "operator@localhost".to_string(),
        password_hash,
        phone: None,
        role: UserRole::Operator,
        sekolah: None,
        jurusan: None,
    };

    match storage.create_user(operator).await {
        Ok(user) => {
            info!(
                "Akun operator default dibuat (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Gagal membuat akun operator: {}", e);
        }
    }
}

/// Siapkan konteks startup server: storage + migrasi + seed
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage siap, migrasi database selesai");

    seed_operator(&storage).await;

    StartupContext { storage }
}
