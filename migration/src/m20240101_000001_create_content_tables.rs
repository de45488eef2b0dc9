use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(uuid(Genre::Id).primary_key())
                    .col(string_len(Genre::Name, 255))
                    .col(text(Genre::Description).default(""))
                    .col(big_integer(Genre::Created))
                    .col(big_integer(Genre::Modified))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create().name("idx_genre_name").table(Genre::Table).col(Genre::Name).to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(uuid(Person::Id).primary_key())
                    .col(text(Person::FullName))
                    .col(big_integer(Person::Created))
                    .col(big_integer(Person::Modified))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_person_full_name")
                    .table(Person::Table)
                    .col(Person::FullName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmWork::Table)
                    .if_not_exists()
                    .col(uuid(FilmWork::Id).primary_key())
                    .col(string_len(FilmWork::Title, 255))
                    .col(text(FilmWork::Description).default(""))
                    .col(string_null(FilmWork::CreationDate))
                    .col(
                        double_null(FilmWork::Rating)
                            .check(Expr::col(FilmWork::Rating).between(0.0, 100.0)),
                    )
                    .col(
                        string_len(FilmWork::Type, 10)
                            .check(Expr::col(FilmWork::Type).is_in(["movie", "tv_show"])),
                    )
                    .col(string_len(FilmWork::Certificate, 512).default(""))
                    .col(string_null(FilmWork::FilePath))
                    .col(big_integer(FilmWork::Created))
                    .col(big_integer(FilmWork::Modified))
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("idx_film_work_title", FilmWork::Title),
            ("idx_film_work_creation_date", FilmWork::CreationDate),
            ("idx_film_work_rating", FilmWork::Rating),
        ] {
            manager
                .create_index(Index::create().name(name).table(FilmWork::Table).col(col).to_owned())
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(GenreFilmWork::Table)
                    .if_not_exists()
                    .col(uuid(GenreFilmWork::Id).primary_key())
                    .col(uuid(GenreFilmWork::FilmWorkId))
                    .col(uuid(GenreFilmWork::GenreId))
                    .col(big_integer(GenreFilmWork::Created))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_film_work_film_work")
                            .from(GenreFilmWork::Table, GenreFilmWork::FilmWorkId)
                            .to(FilmWork::Table, FilmWork::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_film_work_genre")
                            .from(GenreFilmWork::Table, GenreFilmWork::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_genre_film_work_genre")
                    .table(GenreFilmWork::Table)
                    .col(GenreFilmWork::GenreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PersonFilmWork::Table)
                    .if_not_exists()
                    .col(uuid(PersonFilmWork::Id).primary_key())
                    .col(uuid(PersonFilmWork::PersonId))
                    .col(uuid(PersonFilmWork::FilmWorkId))
                    .col(text(PersonFilmWork::Role))
                    .col(big_integer(PersonFilmWork::Created))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_film_work_person")
                            .from(PersonFilmWork::Table, PersonFilmWork::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_film_work_film_work")
                            .from(PersonFilmWork::Table, PersonFilmWork::FilmWorkId)
                            .to(FilmWork::Table, FilmWork::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_person_film_work_person")
                    .table(PersonFilmWork::Table)
                    .col(PersonFilmWork::PersonId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PersonFilmWork::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(GenreFilmWork::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(FilmWork::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Name,
    Description,
    Created,
    Modified,
}

#[derive(DeriveIden)]
enum Person {
    Table,
    Id,
    FullName,
    Created,
    Modified,
}

#[derive(DeriveIden)]
enum FilmWork {
    Table,
    Id,
    Title,
    Description,
    CreationDate,
    Rating,
    Type,
    Certificate,
    FilePath,
    Created,
    Modified,
}

#[derive(DeriveIden)]
enum GenreFilmWork {
    Table,
    Id,
    FilmWorkId,
    GenreId,
    Created,
}

#[derive(DeriveIden)]
enum PersonFilmWork {
    Table,
    Id,
    PersonId,
    FilmWorkId,
    Role,
    Created,
}
