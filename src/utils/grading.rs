//! Perhitungan nilai rata-rata dan kategorisasi prestasi/kehadiran.
//!
//! Fungsi murni tanpa efek samping; validasi rentang nilai dilakukan di
//! pemanggil, bukan di sini.

use serde::{Deserialize, Serialize};

// Kategori lima tingkat, dipakai untuk prestasi maupun kehadiran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kategori {
    #[serde(rename = "Sangat Baik")]
    SangatBaik,
    #[serde(rename = "Baik")]
    Baik,
    #[serde(rename = "Cukup")]
    Cukup,
    #[serde(rename = "Kurang")]
    Kurang,
    #[serde(rename = "Kurang Sekali")]
    KurangSekali,
}

impl Kategori {
    /// Semua kategori, terbaik lebih dulu; dipakai untuk distribusi lengkap
    pub const ALL: [Kategori; 5] = [
        Kategori::SangatBaik,
        Kategori::Baik,
        Kategori::Cukup,
        Kategori::Kurang,
        Kategori::KurangSekali,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Kategori::SangatBaik => "Sangat Baik",
            Kategori::Baik => "Baik",
            Kategori::Cukup => "Cukup",
            Kategori::Kurang => "Kurang",
            Kategori::KurangSekali => "Kurang Sekali",
        }
    }

    /// Peringkat numerik, lebih tinggi lebih baik
    pub fn rank(&self) -> u8 {
        match self {
            Kategori::SangatBaik => 4,
            Kategori::Baik => 3,
            Kategori::Cukup => 2,
            Kategori::Kurang => 1,
            Kategori::KurangSekali => 0,
        }
    }
}

impl std::fmt::Display for Kategori {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pembulatan dua desimal, setengah menjauhi nol
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Kategori prestasi dari nilai rata-rata (batas bawah inklusif)
pub fn kategori_prestasi(rata_rata: f64) -> Kategori {
    if rata_rata >= 90.0 {
        Kategori::SangatBaik
    } else if rata_rata >= 80.0 {
        Kategori::Baik
    } else if rata_rata >= 70.0 {
        Kategori::Cukup
    } else if rata_rata >= 60.0 {
        Kategori::Kurang
    } else {
        Kategori::KurangSekali
    }
}

/// Kategori kehadiran dari persentase hadir.
/// Tabel batasnya berbeda dari kategori prestasi dan tidak boleh disamakan.
pub fn kategori_kehadiran(persentase: f64) -> Kategori {
    if persentase >= 95.0 {
        Kategori::SangatBaik
    } else if persentase >= 85.0 {
        Kategori::Baik
    } else if persentase >= 75.0 {
        Kategori::Cukup
    } else if persentase >= 60.0 {
        Kategori::Kurang
    } else {
        Kategori::KurangSekali
    }
}

/// Rata-rata lima mapel (dua desimal) beserta kategori prestasinya
pub fn hitung_rata_rata(nilai: &[f64; 5]) -> (f64, Kategori) {
    let rata_rata = round2(nilai.iter().sum::<f64>() / 5.0);
    (rata_rata, kategori_prestasi(rata_rata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rata_rata_sempurna() {
        let (rata, kategori) = hitung_rata_rata(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        assert_eq!(rata, 100.0);
        assert_eq!(kategori, Kategori::SangatBaik);
    }

    #[test]
    fn test_rata_rata_rendah() {
        let (rata, kategori) = hitung_rata_rata(&[50.0, 50.0, 50.0, 50.0, 50.0]);
        assert_eq!(rata, 50.0);
        assert_eq!(kategori, Kategori::KurangSekali);
    }

    #[test]
    fn test_batas_bawah_inklusif() {
        let (rata, kategori) = hitung_rata_rata(&[90.0, 90.0, 90.0, 90.0, 90.0]);
        assert_eq!(rata, 90.0);
        assert_eq!(kategori, Kategori::SangatBaik);

        let (rata, kategori) = hitung_rata_rata(&[89.99, 89.99, 89.99, 89.99, 89.99]);
        assert_eq!(rata, 89.99);
        assert_eq!(kategori, Kategori::Baik);
    }

    #[test]
    fn test_pembulatan_dua_desimal() {
        // 85 + 84 + 84 + 84 + 84 = 421 / 5 = 84.2
        let (rata, _) = hitung_rata_rata(&[85.0, 84.0, 84.0, 84.0, 84.0]);
        assert_eq!(rata, 84.2);
        // 333.33 / 5 = 66.666 -> 66.67
        let (rata, _) = hitung_rata_rata(&[66.0, 66.0, 66.0, 66.33, 69.0]);
        assert_eq!(rata, 66.67);
    }

    #[test]
    fn test_kategori_kehadiran_tabel_sendiri() {
        assert_eq!(kategori_kehadiran(95.0), Kategori::SangatBaik);
        assert_eq!(kategori_kehadiran(94.9), Kategori::Baik);
        assert_eq!(kategori_kehadiran(85.0), Kategori::Baik);
        assert_eq!(kategori_kehadiran(75.0), Kategori::Cukup);
        assert_eq!(kategori_kehadiran(60.0), Kategori::Kurang);
        assert_eq!(kategori_kehadiran(59.0), Kategori::KurangSekali);
        // 94 masuk "Sangat Baik" di tabel prestasi tapi hanya "Baik"
        // di tabel kehadiran
        assert_eq!(kategori_prestasi(94.0), Kategori::SangatBaik);
        assert_eq!(kategori_kehadiran(94.0), Kategori::Baik);
    }

    #[test]
    fn test_kategori_monoton() {
        // rata-rata lebih tinggi tidak pernah menghasilkan kategori lebih rendah
        let mut sebelumnya = kategori_prestasi(0.0).rank();
        let mut nilai = 0.0;
        while nilai <= 100.0 {
            let sekarang = kategori_prestasi(nilai).rank();
            assert!(sekarang >= sebelumnya, "turun di nilai {nilai}");
            sebelumnya = sekarang;
            nilai += 0.25;
        }
    }

    #[test]
    fn test_label_kategori() {
        assert_eq!(Kategori::SangatBaik.to_string(), "Sangat Baik");
        assert_eq!(Kategori::KurangSekali.to_string(), "Kurang Sekali");
    }
}
