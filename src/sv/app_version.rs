use url::Url;

use crate::{
  entity::{Platform, app_version},
  prelude::*,
};

const VERSION_MAX_LEN: usize = 100;
const LINK_MAX_LEN: usize = 255;

/// Fields an administrator supplies when publishing a build.
#[derive(Debug, Clone)]
pub struct NewAppVersion {
  pub version: String,
  pub platform_type: Platform,
  pub release_notes: String,
  pub link: String,
  pub link_32: Option<String>,
  pub forcing_update: bool,
  pub manifest: Option<String>,
  pub show_update: bool,
}

impl NewAppVersion {
  fn validate(&self) -> Result<()> {
    let version = self.version.trim();
    if version.is_empty() {
      return Err(Error::Invalid("version must not be empty".into()));
    }
    if version.chars().count() > VERSION_MAX_LEN {
      return Err(Error::Invalid(format!(
        "version is longer than {VERSION_MAX_LEN} characters"
      )));
    }

    validate_link("link", &self.link)?;
    if let Some(link) = &self.link_32 {
      validate_link("link_32", link)?;
    }
    if let Some(manifest) = &self.manifest {
      validate_link("manifest", manifest)?;
    }

    Ok(())
  }
}

fn validate_link(field: &str, url: &str) -> Result<()> {
  if url.chars().count() > LINK_MAX_LEN {
    return Err(Error::Invalid(format!(
      "{field} is longer than {LINK_MAX_LEN} characters"
    )));
  }
  let parsed = Url::parse(url).map_err(|err| {
    Error::Invalid(format!("{field} is not a valid URL: {err}"))
  })?;
  if !matches!(parsed.scheme(), "http" | "https") {
    return Err(Error::Invalid(format!("{field} must be an http(s) URL")));
  }
  if parsed.host_str().is_none_or(str::is_empty) {
    return Err(Error::Invalid(format!("{field} must include a host")));
  }
  Ok(())
}

pub struct AppVersion<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> AppVersion<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// All builds for `platform`, most recent first. Ties on `created_at`
  /// are broken by the higher id.
  pub async fn by_platform(
    &self,
    platform: Platform,
  ) -> Result<Vec<app_version::Model>> {
    let versions = app_version::Entity::find()
      .filter(app_version::Column::PlatformType.eq(platform))
      .order_by_desc(app_version::Column::CreatedAt)
      .order_by_desc(app_version::Column::Id)
      .all(self.db)
      .await?;
    Ok(versions)
  }

  pub async fn latest_for(
    &self,
    platform: Platform,
  ) -> Result<app_version::Model> {
    self.by_platform(platform).await?.into_iter().next().ok_or(Error::NotFound)
  }

  pub async fn latest_overall(&self) -> Result<Option<app_version::Model>> {
    let version = app_version::Entity::find()
      .order_by_desc(app_version::Column::CreatedAt)
      .order_by_desc(app_version::Column::Id)
      .one(self.db)
      .await?;
    Ok(version)
  }

  pub async fn latest(&self) -> Result<app_version::Model> {
    self.latest_overall().await?.ok_or(Error::NotFound)
  }

  pub async fn all(&self) -> Result<Vec<app_version::Model>> {
    let versions = app_version::Entity::find()
      .order_by_desc(app_version::Column::CreatedAt)
      .order_by_desc(app_version::Column::Id)
      .all(self.db)
      .await?;
    Ok(versions)
  }

  pub async fn publish(
    &self,
    new: NewAppVersion,
  ) -> Result<app_version::Model> {
    new.validate()?;

    let version = app_version::ActiveModel {
      version: Set(new.version.trim().to_string()),
      platform_type: Set(new.platform_type),
      release_notes: Set(new.release_notes),
      link: Set(new.link),
      link_32: Set(new.link_32),
      forcing_update: Set(new.forcing_update),
      manifest: Set(new.manifest),
      show_update: Set(new.show_update),
      ..Default::default()
    };

    let model = version.insert(self.db).await?;
    info!(
      "Published {} {} (id={})",
      model.platform_type, model.version, model.id
    );
    Ok(model)
  }
}
