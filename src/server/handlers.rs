use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
  entity::{Platform, app_version},
  prelude::*,
  state::AppState,
};

/// Public view of a build. The row id stays internal.
#[derive(Debug, Serialize)]
pub struct AppInfo {
  pub version: String,
  pub release_notes: String,
  pub link: String,
  pub link_32: Option<String>,
  pub forcing_update: bool,
  pub manifest: Option<String>,
  pub show_update: bool,
}

impl From<app_version::Model> for AppInfo {
  fn from(model: app_version::Model) -> Self {
    Self {
      version: model.version,
      release_notes: model.release_notes,
      link: model.link,
      link_32: model.link_32,
      forcing_update: model.forcing_update,
      manifest: model.manifest,
      show_update: model.show_update,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct LatestAppVersion {
  #[serde(flatten)]
  pub info: AppInfo,
  pub platform_type: Platform,
}

impl From<app_version::Model> for LatestAppVersion {
  fn from(model: app_version::Model) -> Self {
    let platform_type = model.platform_type;
    Self { info: model.into(), platform_type }
  }
}

pub async fn health() -> &'static str {
  "OK"
}

pub async fn app_info(
  app: Arc<AppState>,
  platform: Platform,
) -> Result<Json<AppInfo>> {
  let version = app.sv().app_version.latest_for(platform).await?;
  debug!("Serving {platform} {} (id={})", version.version, version.id);
  Ok(Json(version.into()))
}

pub async fn latest_app_version(
  State(app): State<Arc<AppState>>,
) -> Result<Json<LatestAppVersion>> {
  let version = app.sv().app_version.latest().await?;
  Ok(Json(version.into()))
}
