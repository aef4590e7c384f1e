use serde::{Deserialize, Serialize};

// Semester akademik: ganjil (gasal) atau genap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    Ganjil,
    Genap,
}

impl Semester {
    pub const GANJIL: &'static str = "ganjil";
    pub const GENAP: &'static str = "genap";

    /// Semester yang diprediksi berikutnya, beserta tahunnya
    pub fn periode_berikutnya(&self, tahun: i32) -> (Semester, i32) {
        match self {
            Semester::Ganjil => (Semester::Genap, tahun),
            Semester::Genap => (Semester::Ganjil, tahun + 1),
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Semester::Ganjil => write!(f, "{}", Semester::GANJIL),
            Semester::Genap => write!(f, "{}", Semester::GENAP),
        }
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    // Case-insensitive; file import sering memuat "Ganjil"/"GENAP"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            Semester::GANJIL => Ok(Semester::Ganjil),
            Semester::GENAP => Ok(Semester::Genap),
            _ => Err(format!("Semester harus 'ganjil' atau 'genap', bukan '{s}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Blok periode pada respons penilaian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodeInfo {
    pub semester: Semester,
    pub tahun: i32,
    pub label: String,
}

impl PeriodeInfo {
    pub fn new(semester: Semester, tahun: i32) -> Self {
        Self {
            semester,
            tahun,
            label: format!("Semester {semester} {tahun}"),
        }
    }
}

/// Normalisasi nilai tahun: terima angka atau string angka, buang karakter
/// non-digit ("2024/2025" menjadi 20242025 tidak valid, " 2024 " valid),
/// rentang 2000..=2100.
pub fn parse_tahun(raw: &str) -> Option<i32> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.is_empty() {
        return None;
    }
    match cleaned.parse::<i32>() {
        Ok(tahun) if (2000..=2100).contains(&tahun) => Some(tahun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_parse_case_insensitive() {
        assert_eq!("Ganjil".parse::<Semester>(), Ok(Semester::Ganjil));
        assert_eq!("GENAP".parse::<Semester>(), Ok(Semester::Genap));
        assert!("gasal".parse::<Semester>().is_err());
    }

    #[test]
    fn test_periode_berikutnya() {
        assert_eq!(
            Semester::Ganjil.periode_berikutnya(2025),
            (Semester::Genap, 2025)
        );
        assert_eq!(
            Semester::Genap.periode_berikutnya(2025),
            (Semester::Ganjil, 2026)
        );
    }

    #[test]
    fn test_parse_tahun() {
        assert_eq!(parse_tahun("2025"), Some(2025));
        assert_eq!(parse_tahun(" 2025 "), Some(2025));
        assert_eq!(parse_tahun("th 2025"), Some(2025));
        assert_eq!(parse_tahun("1999"), None);
        assert_eq!(parse_tahun("2101"), None);
        assert_eq!(parse_tahun("abc"), None);
        assert_eq!(parse_tahun(""), None);
    }
}
