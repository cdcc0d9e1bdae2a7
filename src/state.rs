use migration::Migrator;

use crate::{config::Config, prelude::*, sv};

pub struct Services<'a> {
  pub app_version: sv::AppVersion<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn connect(config: Config) -> anyhow::Result<Self> {
    info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
      .await
      .context("Failed to connect to database")?;

    Ok(Self { db, config })
  }

  /// Applies pending migrations. Already applied ones are skipped, so this is
  /// safe to run on every deployment.
  pub async fn create_schema(&self) -> anyhow::Result<()> {
    info!("Running migrations...");
    Migrator::up(&self.db, None).await.context("Failed to apply schema")?;
    Ok(())
  }

  pub fn sv(&self) -> Services<'_> {
    Services { app_version: sv::AppVersion::new(&self.db) }
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{ConnectionTrait, DbBackend, Statement};

  use super::*;

  async fn columns(db: &DatabaseConnection) -> Vec<String> {
    db.query_all(Statement::from_string(
      DbBackend::Sqlite,
      "SELECT name FROM pragma_table_info('mobile_app_versions') ORDER BY cid",
    ))
    .await
    .unwrap()
    .into_iter()
    .map(|row| row.try_get::<String>("", "name").unwrap())
    .collect()
  }

  #[tokio::test]
  async fn test_create_schema_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
      "sqlite:{}?mode=rwc",
      dir.path().join("app_versions.db").display()
    );
    let config = Config { database_url: url.clone(), ..Config::default() };

    let state = AppState::connect(config.clone()).await.unwrap();
    state.create_schema().await.unwrap();
    let before = columns(&state.db).await;

    assert_eq!(
      before,
      vec![
        "id",
        "version",
        "platform_type",
        "release_notes",
        "link",
        "link_32",
        "forcing_update",
        "created_at",
        "manifest",
        "show_update",
      ]
    );

    state.create_schema().await.unwrap();

    // fresh connection, as a second deployment would do
    let again = AppState::connect(config).await.unwrap();
    again.create_schema().await.unwrap();

    assert_eq!(columns(&again.db).await, before);
    assert_eq!(
      Migrator::get_applied_migrations(&again.db).await.unwrap().len(),
      1
    );
  }
}
