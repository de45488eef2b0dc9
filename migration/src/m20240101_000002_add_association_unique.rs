use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_genre_film_work_unique")
                    .table(GenreFilmWork::Table)
                    .col(GenreFilmWork::FilmWorkId)
                    .col(GenreFilmWork::GenreId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_person_film_work_unique")
                    .table(PersonFilmWork::Table)
                    .col(PersonFilmWork::FilmWorkId)
                    .col(PersonFilmWork::PersonId)
                    .col(PersonFilmWork::Role)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_person_film_work_unique")
                    .table(PersonFilmWork::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop().name("idx_genre_film_work_unique").table(GenreFilmWork::Table).to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum GenreFilmWork {
    Table,
    FilmWorkId,
    GenreId,
}

#[derive(DeriveIden)]
enum PersonFilmWork {
    Table,
    FilmWorkId,
    PersonId,
    Role,
}
