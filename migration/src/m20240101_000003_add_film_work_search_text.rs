use sea_orm_migration::{prelude::*, schema::*, sea_orm::Statement};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(FilmWork::Table)
                    .add_column(text(FilmWork::SearchText).default(""))
                    .to_owned(),
            )
            .await?;

        // SQLite's lower() only folds ASCII, so existing rows are folded here.
        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        let rows = db
            .query_all(Statement::from_string(backend, "SELECT id, title, description FROM film_work"))
            .await?;
        for row in rows {
            let id: Vec<u8> = row.try_get("", "id")?;
            let title: String = row.try_get("", "title")?;
            let description: String = row.try_get("", "description")?;
            db.execute(Statement::from_sql_and_values(
                backend,
                "UPDATE film_work SET search_text = ? WHERE id = ?",
                [format!("{title} {description}").to_lowercase().into(), id.into()],
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(Table::alter().table(FilmWork::Table).drop_column(FilmWork::SearchText).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FilmWork {
    Table,
    SearchText,
}
