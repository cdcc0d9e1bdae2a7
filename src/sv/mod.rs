pub mod app_version;

pub use app_version::{AppVersion, NewAppVersion};
