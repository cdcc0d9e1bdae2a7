//! Schema for the mobile app version store.

pub use sea_orm_migration::prelude::*;

mod m20221005_000001_create_mobile_app_versions;

pub use m20221005_000001_create_mobile_app_versions::MobileAppVersions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![Box::new(m20221005_000001_create_mobile_app_versions::Migration)]
  }
}
