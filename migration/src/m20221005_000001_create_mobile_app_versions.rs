use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(MobileAppVersions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(MobileAppVersions::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(MobileAppVersions::Version)
              .string_len(100)
              .not_null(),
          )
          .col(
            ColumnDef::new(MobileAppVersions::PlatformType)
              .string_len(10)
              .not_null(),
          )
          .col(
            ColumnDef::new(MobileAppVersions::ReleaseNotes)
              .text()
              .not_null()
              .default(""),
          )
          .col(
            ColumnDef::new(MobileAppVersions::Link).string_len(255).not_null(),
          )
          .col(ColumnDef::new(MobileAppVersions::Link32).string_len(255).null())
          .col(
            ColumnDef::new(MobileAppVersions::ForcingUpdate)
              .boolean()
              .not_null()
              .default(true),
          )
          .col(
            ColumnDef::new(MobileAppVersions::CreatedAt).date_time().not_null(),
          )
          .col(
            ColumnDef::new(MobileAppVersions::Manifest).string_len(255).null(),
          )
          .col(
            ColumnDef::new(MobileAppVersions::ShowUpdate)
              .boolean()
              .not_null()
              .default(false),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_mobile_app_versions_platform_created")
          .table(MobileAppVersions::Table)
          .if_not_exists()
          .col(MobileAppVersions::PlatformType)
          .col(MobileAppVersions::CreatedAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(MobileAppVersions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum MobileAppVersions {
  Table,
  Id,
  Version,
  PlatformType,
  ReleaseNotes,
  Link,
  #[sea_orm(iden = "link_32")]
  Link32,
  ForcingUpdate,
  CreatedAt,
  Manifest,
  ShowUpdate,
}
