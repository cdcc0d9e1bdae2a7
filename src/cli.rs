use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::{
  config::Config,
  entity::{Platform, app_version},
  prelude::*,
  server,
  state::AppState,
  sv::{AppVersion, NewAppVersion},
};

#[derive(Parser, Debug)]
#[command(name = "app-version", about = "Mobile app release metadata service")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Serve the lookup API.
  Serve {
    /// Apply the schema before accepting requests.
    #[arg(long)]
    migrate: bool,
  },
  /// Create or upgrade the schema, then exit.
  Migrate,
  /// Record a newly released build.
  Publish(PublishArgs),
  /// Print published builds, newest first.
  List {
    #[arg(long, value_enum)]
    platform: Option<Platform>,
  },
}

#[derive(Args, Debug)]
pub struct PublishArgs {
  #[arg(long, value_enum)]
  pub platform: Platform,

  /// Version label, e.g. 1.4.2.
  #[arg(long)]
  pub version: String,

  /// Primary download or install link.
  #[arg(long)]
  pub link: String,

  /// Alternate (32-bit) download link.
  #[arg(long = "link-32")]
  pub link_32: Option<String>,

  /// Installation manifest URL.
  #[arg(long)]
  pub manifest: Option<String>,

  #[arg(long, default_value = "")]
  pub release_notes: String,

  /// Let clients keep running the old build.
  #[arg(long)]
  pub no_force: bool,

  /// Advertise the update to clients.
  #[arg(long)]
  pub show_update: bool,
}

impl From<PublishArgs> for NewAppVersion {
  fn from(args: PublishArgs) -> Self {
    Self {
      version: args.version,
      platform_type: args.platform,
      release_notes: args.release_notes,
      link: args.link,
      link_32: args.link_32,
      forcing_update: !args.no_force,
      manifest: args.manifest,
      show_update: args.show_update,
    }
  }
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
  let app = AppState::connect(config).await?;

  match cli.command {
    Command::Serve { migrate } => {
      if migrate {
        app.create_schema().await?;
      }
      server::serve(Arc::new(app)).await
    }
    Command::Migrate => {
      app.create_schema().await?;
      info!("Schema is up to date");
      Ok(())
    }
    Command::Publish(args) => {
      let model = app
        .sv()
        .app_version
        .publish(args.into())
        .await
        .context("Failed to publish app version")?;
      println!("{}", json::to_string_pretty(&model)?);
      Ok(())
    }
    Command::List { platform } => {
      for row in list(&app.sv().app_version, platform).await? {
        println!("{row}");
      }
      Ok(())
    }
  }
}

/// Tab separated listing rows, newest first.
async fn list(
  sv: &AppVersion<'_>,
  platform: Option<Platform>,
) -> Result<Vec<String>> {
  let versions = match platform {
    Some(platform) => sv.by_platform(platform).await?,
    None => sv.all().await?,
  };
  Ok(versions.iter().map(format_row).collect())
}

fn format_row(v: &app_version::Model) -> String {
  format!(
    "{}\t{}\t{}\t{}\t{}",
    v.id,
    v.platform_type,
    v.version,
    v.created_at.format("%Y-%m-%d %H:%M:%S"),
    v.link
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::app_version::tests::{at, insert_at, setup_test_db};

  #[test]
  fn test_parse_publish() {
    let cli = Cli::try_parse_from([
      "app-version",
      "publish",
      "--platform",
      "ios",
      "--version",
      "1.4.2",
      "--link",
      "https://example.com/app.ipa",
      "--manifest",
      "https://example.com/manifest.plist",
      "--no-force",
    ])
    .unwrap();

    let Command::Publish(args) = cli.command else {
      panic!("expected publish");
    };

    let new = NewAppVersion::from(args);
    assert_eq!(new.platform_type, Platform::Ios);
    assert_eq!(new.version, "1.4.2");
    assert_eq!(new.link_32, None);
    assert_eq!(
      new.manifest.as_deref(),
      Some("https://example.com/manifest.plist")
    );
    assert!(!new.forcing_update);
    assert!(!new.show_update);
    assert!(new.release_notes.is_empty());
  }

  #[test]
  fn test_parse_rejects_unknown_platform() {
    let result =
      Cli::try_parse_from(["app-version", "list", "--platform", "windows"]);
    assert!(result.is_err());
  }

  #[test]
  fn test_parse_serve() {
    let cli =
      Cli::try_parse_from(["app-version", "serve", "--migrate"]).unwrap();
    assert!(matches!(cli.command, Command::Serve { migrate: true }));
  }

  #[tokio::test]
  async fn test_list_rows() {
    let db = setup_test_db().await;
    let old = insert_at(&db, Platform::Android, "1.0.0", at(1)).await;
    let ios = insert_at(&db, Platform::Ios, "2.0.0", at(2)).await;
    let new = insert_at(&db, Platform::Android, "1.1.0", at(3)).await;
    let sv = AppVersion::new(&db);

    let cli =
      Cli::try_parse_from(["app-version", "list", "--platform", "android"])
        .unwrap();
    let Command::List { platform } = cli.command else {
      panic!("expected list");
    };

    assert_eq!(
      list(&sv, platform).await.unwrap(),
      vec![
        format!(
          "{}\tandroid\t1.1.0\t2022-10-05 03:00:00\thttps://example.com/android/1.1.0",
          new.id
        ),
        format!(
          "{}\tandroid\t1.0.0\t2022-10-05 01:00:00\thttps://example.com/android/1.0.0",
          old.id
        ),
      ]
    );

    let all = list(&sv, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all[1].starts_with(&format!("{}\tios\t2.0.0\t", ios.id)));
  }
}
