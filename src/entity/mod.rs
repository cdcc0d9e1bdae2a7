//! SeaORM entity definitions

pub mod app_version;

pub use app_version::Platform;
