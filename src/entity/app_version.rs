//! Mobile app version entity - one row per published build

use std::fmt;

use chrono::Utc;
use clap::ValueEnum;
use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

#[derive(
  Copy,
  Clone,
  Debug,
  PartialEq,
  Eq,
  Hash,
  EnumIter,
  DeriveActiveEnum,
  Serialize,
  Deserialize,
  ValueEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
  #[sea_orm(string_value = "ANDROID")]
  Android,
  #[sea_orm(string_value = "IOS")]
  Ios,
  #[sea_orm(string_value = "PWA")]
  Pwa,
}

impl Platform {
  /// Lowercase name used in request paths and on the command line.
  pub fn slug(self) -> &'static str {
    match self {
      Self::Android => "android",
      Self::Ios => "ios",
      Self::Pwa => "pwa",
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.slug())
  }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mobile_app_versions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  #[sea_orm(column_type = "String(StringLen::N(100))")]
  pub version: String,
  pub platform_type: Platform,
  #[sea_orm(column_type = "Text")]
  pub release_notes: String,
  #[sea_orm(column_type = "String(StringLen::N(255))")]
  pub link: String,
  #[sea_orm(
    column_name = "link_32",
    column_type = "String(StringLen::N(255))",
    nullable
  )]
  pub link_32: Option<String>,
  pub forcing_update: bool,
  pub created_at: DateTime,
  #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
  pub manifest: Option<String>,
  pub show_update: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
  async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
  where
    C: ConnectionTrait,
  {
    // created_at is owned by the store, callers never supply it
    if insert && self.created_at.is_not_set() {
      self.created_at = Set(Utc::now().naive_utc());
    }
    Ok(self)
  }
}
