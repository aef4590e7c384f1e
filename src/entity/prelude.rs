pub use super::penilaian::Entity as Penilaian;
pub use super::siswa::Entity as Siswa;
pub use super::users::Entity as Users;
pub use super::walikelas::Entity as Walikelas;
