use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tabel users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Tabel walikelas (profil wali kelas, 1:1 dengan users)
        manager
            .create_table(
                Table::create()
                    .table(Walikelas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Walikelas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Walikelas::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Walikelas::Sekolah).string().null())
                    .col(ColumnDef::new(Walikelas::Jurusan).string().null())
                    .col(
                        ColumnDef::new(Walikelas::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Walikelas::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Walikelas::Table, Walikelas::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Tabel siswa
        manager
            .create_table(
                Table::create()
                    .table(Siswa::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Siswa::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Siswa::Name).string().not_null())
                    .col(ColumnDef::new(Siswa::Kelas).string().not_null())
                    .col(ColumnDef::new(Siswa::Tahun).integer().not_null())
                    .col(ColumnDef::new(Siswa::Semester).string().not_null())
                    .col(
                        ColumnDef::new(Siswa::WalikelasId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Siswa::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Siswa::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Siswa::Table, Siswa::WalikelasId)
                            .to(Walikelas::Table, Walikelas::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_siswa_identity")
                    .table(Siswa::Table)
                    .col(Siswa::Name)
                    .col(Siswa::Kelas)
                    .col(Siswa::WalikelasId)
                    .to_owned(),
            )
            .await?;

        // Tabel penilaian (satu record per siswa per periode)
        manager
            .create_table(
                Table::create()
                    .table(Penilaian::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Penilaian::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Penilaian::SiswaId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Penilaian::Semester).string().not_null())
                    .col(ColumnDef::new(Penilaian::Tahun).integer().not_null())
                    .col(ColumnDef::new(Penilaian::Matematika).double().not_null())
                    .col(ColumnDef::new(Penilaian::Ipa).double().not_null())
                    .col(ColumnDef::new(Penilaian::Ips).double().not_null())
                    .col(ColumnDef::new(Penilaian::BIndonesia).double().not_null())
                    .col(ColumnDef::new(Penilaian::BInggris).double().not_null())
                    .col(ColumnDef::new(Penilaian::Kehadiran).integer().null())
                    .col(ColumnDef::new(Penilaian::Prestasi).string().null())
                    .col(ColumnDef::new(Penilaian::Prediksi).text().null())
                    .col(
                        ColumnDef::new(Penilaian::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Penilaian::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Penilaian::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Penilaian::Table, Penilaian::SiswaId)
                            .to(Siswa::Table, Siswa::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Penilaian::Table, Penilaian::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_penilaian_periode")
                    .table(Penilaian::Table)
                    .col(Penilaian::SiswaId)
                    .col(Penilaian::Semester)
                    .col(Penilaian::Tahun)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Penilaian::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Siswa::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Walikelas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Walikelas {
    Table,
    Id,
    UserId,
    Sekolah,
    Jurusan,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Siswa {
    Table,
    Id,
    Name,
    Kelas,
    Tahun,
    Semester,
    WalikelasId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Penilaian {
    Table,
    Id,
    SiswaId,
    Semester,
    Tahun,
    Matematika,
    Ipa,
    Ips,
    BIndonesia,
    BInggris,
    Kehadiran,
    Prestasi,
    Prediksi,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
