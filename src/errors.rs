//! Modul penanganan error terpadu
//!
//! Tipe error dibangkitkan lewat makro, lengkap dengan kode error dan nama
//! tipenya.

use std::fmt;

/// Makro pendefinisi tipe error
///
/// Menghasilkan:
/// - definisi enum
/// - method code() - kode error
/// - method error_type() - nama tipe error
/// - method message() - detail error
/// - fungsi konstruktor singkat
macro_rules! define_sispres_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SispresError {
            $($variant(String),)*
        }

        impl SispresError {
            /// Kode error
            pub fn code(&self) -> &'static str {
                match self {
                    $(SispresError::$variant(_) => $code,)*
                }
            }

            /// Nama tipe error
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SispresError::$variant(_) => $type_name,)*
                }
            }

            /// Detail error
            pub fn message(&self) -> &str {
                match self {
                    $(SispresError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SispresError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SispresError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_sispres_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    Authentication("E008", "Authentication Error"),
    Authorization("E009", "Authorization Error"),
    PredictionUpstream("E010", "Prediction Upstream Error"),
    SpreadsheetParse("E011", "Spreadsheet Parse Error"),
}

impl SispresError {
    /// Format ringkas
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SispresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SispresError {}

impl From<sea_orm::DbErr> for SispresError {
    fn from(err: sea_orm::DbErr) -> Self {
        SispresError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SispresError {
    fn from(err: std::io::Error) -> Self {
        SispresError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SispresError {
    fn from(err: serde_json::Error) -> Self {
        SispresError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for SispresError {
    fn from(err: reqwest::Error) -> Self {
        SispresError::PredictionUpstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SispresError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SispresError::database_config("test").code(), "E001");
        assert_eq!(SispresError::validation("test").code(), "E005");
        assert_eq!(SispresError::authentication("test").code(), "E008");
        assert_eq!(SispresError::prediction_upstream("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SispresError::validation("test").error_type(),
            "Validation Error"
        );
        assert_eq!(
            SispresError::spreadsheet_parse("test").error_type(),
            "Spreadsheet Parse Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = SispresError::not_found("Siswa tidak ditemukan");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Siswa tidak ditemukan"));
    }
}
