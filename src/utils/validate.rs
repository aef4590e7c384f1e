use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{6,15}$").expect("Invalid phone regex"));

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Nama tidak boleh kosong");
    }
    if trimmed.len() > 255 {
        return Err("Nama maksimal 255 karakter");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Format email tidak valid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Nomor telepon harus 6-15 digit");
    }
    Ok(())
}

/// Kebijakan password: minimal 6 karakter, maksimal 128
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password minimal 6 karakter");
    }
    if password.len() > 128 {
        return Err("Password maksimal 128 karakter");
    }
    Ok(())
}

/// Rentang nilai mata pelajaran
pub fn validate_nilai(nilai: f64) -> bool {
    (0.0..=100.0).contains(&nilai)
}

/// Rentang kehadiran dalam hari per tahun ajaran
pub fn validate_kehadiran(hari: i32) -> bool {
    (0..=365).contains(&hari)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("guru@sekolah.sch.id").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("tanpa-at").is_err());
        assert!(validate_email("x@tanpa-tld").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Vania Melati").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("081234567890").is_ok());
        assert!(validate_phone("+6281234567890").is_ok());
        assert!(validate_phone("abc").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("rahasia").is_ok());
        assert!(validate_password("12345").is_err());
    }

    #[test]
    fn test_validate_nilai_dan_kehadiran() {
        assert!(validate_nilai(0.0));
        assert!(validate_nilai(100.0));
        assert!(!validate_nilai(100.5));
        assert!(!validate_nilai(-1.0));
        assert!(validate_kehadiran(0));
        assert!(validate_kehadiran(365));
        assert!(!validate_kehadiran(366));
    }
}
