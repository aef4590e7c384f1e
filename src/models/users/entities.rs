use serde::{Deserialize, Serialize};

// Peran pengguna
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    WaliKelas, // wali kelas, cakupan data dibatasi miliknya sendiri
    Operator,  // administrator, tanpa batasan cakupan
}

impl UserRole {
    pub const WALIKELAS: &'static str = "walikelas";
    pub const OPERATOR: &'static str = "operator";

    pub fn operator_roles() -> &'static [&'static UserRole] {
        &[&Self::Operator]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::WaliKelas, &Self::Operator]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::WALIKELAS => Ok(UserRole::WaliKelas),
            UserRole::OPERATOR => Ok(UserRole::Operator),
            _ => Err(serde::de::Error::custom(format!(
                "Role tidak valid: '{s}'. Role yang didukung: walikelas, operator"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::WaliKelas => write!(f, "{}", UserRole::WALIKELAS),
            UserRole::Operator => write!(f, "{}", UserRole::OPERATOR),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walikelas" => Ok(UserRole::WaliKelas),
            "operator" => Ok(UserRole::Operator),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// Profil wali kelas (relasi 1:1 dengan users)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalikelasProfile {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub sekolah: Option<String>,
    pub jurusan: Option<String>,
}

// Entity akun pengguna
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // jangan pernah bocor ke respons JSON
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walikelas: Option<WalikelasProfile>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // Token pair (access + refresh) lewat JwtUtils
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("Gagal membuat token pair: {e}"))
    }
}

// Ringkasan pengguna yang ditempelkan di respons siswa/penilaian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRingkas {
    pub id: i64,
    pub name: String,
    pub email: String,
}
