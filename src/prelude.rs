pub use anyhow::Context;
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
  QueryFilter, QueryOrder, Set,
};
pub use migration::MigratorTrait;
pub use tracing::{debug, error, info};

pub use crate::error::{Error, Result};
