//! Runtime configuration read from the environment

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub database_url: String,
  pub host: IpAddr,
  pub port: u16,
  pub rate_limit_per_second: u64,
  pub rate_limit_burst: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: String::from("sqlite:app_versions.db?mode=rwc"),
      host: IpAddr::from([0, 0, 0, 0]),
      port: 3000,
      rate_limit_per_second: 2,
      rate_limit_burst: 100,
    }
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Builds a config from `lookup`, falling back to defaults for unset keys.
  pub fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
  ) -> anyhow::Result<Self> {
    let defaults = Self::default();

    let database_url = lookup("DATABASE_URL")
      .filter(|url| !url.trim().is_empty())
      .unwrap_or(defaults.database_url);

    let host = match lookup("HOST") {
      Some(host) => {
        host.trim().parse().with_context(|| format!("Invalid HOST: {host}"))?
      }
      None => defaults.host,
    };

    let port = match lookup("PORT") {
      Some(port) => {
        port.trim().parse().with_context(|| format!("Invalid PORT: {port}"))?
      }
      None => defaults.port,
    };

    let rate_limit_per_second = match lookup("RATE_LIMIT_PER_SECOND") {
      Some(value) => value
        .trim()
        .parse()
        .with_context(|| format!("Invalid RATE_LIMIT_PER_SECOND: {value}"))?,
      None => defaults.rate_limit_per_second,
    };

    let rate_limit_burst = match lookup("RATE_LIMIT_BURST") {
      Some(value) => value
        .trim()
        .parse()
        .with_context(|| format!("Invalid RATE_LIMIT_BURST: {value}"))?,
      None => defaults.rate_limit_burst,
    };

    Ok(Self {
      database_url,
      host,
      port,
      rate_limit_per_second,
      rate_limit_burst,
    })
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}
