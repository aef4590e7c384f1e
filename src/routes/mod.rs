pub mod auth;

pub mod users;

pub mod siswa;

pub mod penilaian;

pub mod dashboard;

pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use penilaian::configure_penilaian_routes;
pub use siswa::configure_siswa_routes;
pub use users::configure_user_routes;
