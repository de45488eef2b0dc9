use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, Select, Set, SqlErr, TransactionTrait,
    prelude::Uuid,
    sea_query::{Expr, LikeExpr, Query},
};
use tracing::info;

use crate::{
    entities::{film_work, genre, genre_film_work, person, person_film_work},
    models::{
        FileChange, FilmworkFields, FilmworkForm, FilmworkOrderField, FilmworkQuery, GenreForm,
        Page, PersonForm,
    },
    validation::{self, FieldErrors},
};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    Invalid(FieldErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl From<FieldErrors> for CatalogError {
    fn from(errors: FieldErrors) -> Self {
        Self::Invalid(errors)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub genres: u64,
    pub persons: u64,
    pub filmworks: u64,
}

/// Association rows removed along with a parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dependents {
    pub genre_links: u64,
    pub person_links: u64,
}

#[derive(Clone, Debug)]
pub struct GenreLink {
    pub link: genre_film_work::Model,
    pub genre: genre::Model,
}

#[derive(Clone, Debug)]
pub struct PersonLink {
    pub link: person_film_work::Model,
    pub person: person::Model,
}

const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
const GENRE_ALREADY_LINKED: &str = "This genre is already linked to the film work.";
const ROLE_ALREADY_LINKED: &str = "This person already has that role in the film work.";

/// Data-layer operations behind the admin screens.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
    per_page: u64,
}

impl Catalog {
    pub fn new(db: DatabaseConnection, per_page: u64) -> Self {
        Self { db, per_page: per_page.max(1) }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn counts(&self) -> CatalogResult<Counts> {
        Ok(Counts {
            genres: genre::Entity::find().count(&self.db).await?,
            persons: person::Entity::find().count(&self.db).await?,
            filmworks: film_work::Entity::find().count(&self.db).await?,
        })
    }

    async fn paginate<E, M>(&self, select: Select<E>, page: u64) -> CatalogResult<Page<M>>
    where
        E: EntityTrait<Model = M>,
        M: FromQueryResult + Sized + Send + Sync + 'static,
    {
        let paginator = select.paginate(&self.db, self.per_page);
        let totals = paginator.num_items_and_pages().await?;
        let num_pages = totals.number_of_pages.max(1);
        let number = page.clamp(1, num_pages);
        let items = paginator.fetch_page(number - 1).await?;
        Ok(Page { items, number, num_pages, total: totals.number_of_items })
    }

    // Genres

    pub async fn list_genres(&self, page: u64) -> CatalogResult<Page<genre::Model>> {
        let select =
            genre::Entity::find().order_by_asc(genre::Column::Name).order_by_asc(genre::Column::Id);
        self.paginate(select, page).await
    }

    pub async fn all_genres(&self) -> CatalogResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Name).all(&self.db).await?)
    }

    pub async fn get_genre(&self, id: Uuid) -> CatalogResult<genre::Model> {
        genre::Entity::find_by_id(id).one(&self.db).await?.ok_or(CatalogError::NotFound("genre"))
    }

    pub async fn create_genre(&self, form: &GenreForm) -> CatalogResult<genre::Model> {
        form.validate()?;
        let model = genre::ActiveModel {
            name: Set(form.name.trim().to_string()),
            description: Set(form.description.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(id = %model.id, name = %model.name, "genre created");
        Ok(model)
    }

    pub async fn update_genre(&self, id: Uuid, form: &GenreForm) -> CatalogResult<genre::Model> {
        form.validate()?;
        let mut active: genre::ActiveModel = self.get_genre(id).await?.into();
        active.name = Set(form.name.trim().to_string());
        active.description = Set(form.description.clone());
        let model = active.update(&self.db).await?;

        info!(id = %model.id, "genre updated");
        Ok(model)
    }

    pub async fn delete_genre(&self, id: Uuid) -> CatalogResult<()> {
        let txn = self.db.begin().await?;

        let links = genre_film_work::Entity::delete_many()
            .filter(genre_film_work::Column::GenreId.eq(id))
            .exec(&txn)
            .await?;

        let res = genre::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(CatalogError::NotFound("genre"));
        }

        txn.commit().await?;
        info!(id = %id, links = links.rows_affected, "genre deleted");
        Ok(())
    }

    // Persons

    pub async fn list_persons(&self, page: u64) -> CatalogResult<Page<person::Model>> {
        let select = person::Entity::find()
            .order_by_asc(person::Column::FullName)
            .order_by_asc(person::Column::Id);
        self.paginate(select, page).await
    }

    pub async fn all_persons(&self) -> CatalogResult<Vec<person::Model>> {
        Ok(person::Entity::find().order_by_asc(person::Column::FullName).all(&self.db).await?)
    }

    pub async fn get_person(&self, id: Uuid) -> CatalogResult<person::Model> {
        person::Entity::find_by_id(id).one(&self.db).await?.ok_or(CatalogError::NotFound("person"))
    }

    pub async fn create_person(&self, form: &PersonForm) -> CatalogResult<person::Model> {
        form.validate()?;
        let model = person::ActiveModel {
            full_name: Set(form.full_name.trim().to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(id = %model.id, "person created");
        Ok(model)
    }

    pub async fn update_person(&self, id: Uuid, form: &PersonForm) -> CatalogResult<person::Model> {
        form.validate()?;
        let mut active: person::ActiveModel = self.get_person(id).await?.into();
        active.full_name = Set(form.full_name.trim().to_string());
        let model = active.update(&self.db).await?;

        info!(id = %model.id, "person updated");
        Ok(model)
    }

    pub async fn delete_person(&self, id: Uuid) -> CatalogResult<()> {
        let txn = self.db.begin().await?;

        let links = person_film_work::Entity::delete_many()
            .filter(person_film_work::Column::PersonId.eq(id))
            .exec(&txn)
            .await?;

        let res = person::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(CatalogError::NotFound("person"));
        }

        txn.commit().await?;
        info!(id = %id, links = links.rows_affected, "person deleted");
        Ok(())
    }

    // Film works

    pub async fn list_filmworks(&self, query: &FilmworkQuery) -> CatalogResult<Page<film_work::Model>> {
        let mut select = film_work::Entity::find();

        if let Some(search) = &query.search {
            for term in search.split_whitespace() {
                let mut any = Condition::any().add(
                    Expr::col((film_work::Entity, film_work::Column::SearchText))
                        .like(contains_pattern(&term.to_lowercase())),
                );
                if let Some(hex) = id_fragment(term) {
                    any = any.add(Expr::cust_with_values(
                        r#"lower(hex("film_work"."id")) LIKE ?"#,
                        [format!("%{hex}%")],
                    ));
                }
                select = select.filter(any);
            }
        }

        if let Some(film_type) = query.film_type {
            select = select.filter(film_work::Column::FilmType.eq(film_type));
        }

        if let Some(genre_id) = query.genre {
            select = select.filter(
                film_work::Column::Id.in_subquery(
                    Query::select()
                        .column(genre_film_work::Column::FilmWorkId)
                        .from(genre_film_work::Entity)
                        .and_where(Expr::col(genre_film_work::Column::GenreId).eq(genre_id))
                        .to_owned(),
                ),
            );
        }

        select = match query.order {
            Some(order) => {
                let column = match order.field {
                    FilmworkOrderField::Title => film_work::Column::Title,
                    FilmworkOrderField::Type => film_work::Column::FilmType,
                    FilmworkOrderField::CreationDate => film_work::Column::CreationDate,
                    FilmworkOrderField::Rating => film_work::Column::Rating,
                };
                if order.descending { select.order_by_desc(column) } else { select.order_by_asc(column) }
            }
            None => select.order_by_asc(film_work::Column::Title),
        };

        self.paginate(select.order_by_asc(film_work::Column::Id), query.page).await
    }

    pub async fn get_filmwork(&self, id: Uuid) -> CatalogResult<film_work::Model> {
        film_work::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound("film work"))
    }

    pub async fn create_filmwork(
        &self,
        form: &FilmworkForm,
        file: FileChange,
    ) -> CatalogResult<film_work::Model> {
        let fields = form.validate()?;
        let mut active = film_work::ActiveModel { file_path: Set(None), ..Default::default() };
        apply_fields(&mut active, fields);
        apply_file(&mut active, file);
        let model = active.insert(&self.db).await?;

        info!(id = %model.id, title = %model.title, "film work created");
        Ok(model)
    }

    pub async fn update_filmwork(
        &self,
        id: Uuid,
        form: &FilmworkForm,
        file: FileChange,
    ) -> CatalogResult<film_work::Model> {
        let fields = form.validate()?;
        let mut active: film_work::ActiveModel = self.get_filmwork(id).await?.into();
        apply_fields(&mut active, fields);
        apply_file(&mut active, file);
        let model = active.update(&self.db).await?;

        info!(id = %model.id, "film work updated");
        Ok(model)
    }

    pub async fn delete_filmwork(&self, id: Uuid) -> CatalogResult<()> {
        let txn = self.db.begin().await?;

        let genre_links = genre_film_work::Entity::delete_many()
            .filter(genre_film_work::Column::FilmWorkId.eq(id))
            .exec(&txn)
            .await?;
        let person_links = person_film_work::Entity::delete_many()
            .filter(person_film_work::Column::FilmWorkId.eq(id))
            .exec(&txn)
            .await?;

        let res = film_work::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(CatalogError::NotFound("film work"));
        }

        txn.commit().await?;
        info!(
            id = %id,
            genre_links = genre_links.rows_affected,
            person_links = person_links.rows_affected,
            "film work deleted"
        );
        Ok(())
    }

    // Associations

    pub async fn filmwork_genres(&self, film_work_id: Uuid) -> CatalogResult<Vec<GenreLink>> {
        let rows = genre_film_work::Entity::find()
            .filter(genre_film_work::Column::FilmWorkId.eq(film_work_id))
            .find_also_related(genre::Entity)
            .order_by_asc(genre::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(link, genre)| genre.map(|genre| GenreLink { link, genre })).collect())
    }

    pub async fn add_filmwork_genre(
        &self,
        film_work_id: Uuid,
        genre_id: Uuid,
    ) -> CatalogResult<genre_film_work::Model> {
        self.get_filmwork(film_work_id).await?;
        if genre::Entity::find_by_id(genre_id).one(&self.db).await?.is_none() {
            return Err(FieldErrors::single("genre", INVALID_CHOICE).into());
        }

        let existing = genre_film_work::Entity::find()
            .filter(genre_film_work::Column::FilmWorkId.eq(film_work_id))
            .filter(genre_film_work::Column::GenreId.eq(genre_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(FieldErrors::single("genre", GENRE_ALREADY_LINKED).into());
        }

        let link = genre_film_work::ActiveModel {
            film_work_id: Set(film_work_id),
            genre_id: Set(genre_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|err| link_conflict(err, "genre", GENRE_ALREADY_LINKED))?;

        info!(film_work = %film_work_id, genre = %genre_id, "genre linked");
        Ok(link)
    }

    pub async fn remove_filmwork_genre(&self, film_work_id: Uuid, link_id: Uuid) -> CatalogResult<()> {
        let res = genre_film_work::Entity::delete_many()
            .filter(genre_film_work::Column::Id.eq(link_id))
            .filter(genre_film_work::Column::FilmWorkId.eq(film_work_id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(CatalogError::NotFound("genre link"));
        }

        info!(film_work = %film_work_id, link = %link_id, "genre unlinked");
        Ok(())
    }

    pub async fn filmwork_persons(&self, film_work_id: Uuid) -> CatalogResult<Vec<PersonLink>> {
        let rows = person_film_work::Entity::find()
            .filter(person_film_work::Column::FilmWorkId.eq(film_work_id))
            .find_also_related(person::Entity)
            .order_by_asc(person_film_work::Column::Role)
            .order_by_asc(person::Column::FullName)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, person)| person.map(|person| PersonLink { link, person }))
            .collect())
    }

    pub async fn add_filmwork_person(
        &self,
        film_work_id: Uuid,
        person_id: Uuid,
        role: &str,
    ) -> CatalogResult<person_film_work::Model> {
        let role = role.trim();
        let mut errors = FieldErrors::new();
        errors.check("role", validation::required(role));
        errors.into_result()?;

        self.get_filmwork(film_work_id).await?;
        if person::Entity::find_by_id(person_id).one(&self.db).await?.is_none() {
            return Err(FieldErrors::single("person", INVALID_CHOICE).into());
        }

        let existing = person_film_work::Entity::find()
            .filter(person_film_work::Column::FilmWorkId.eq(film_work_id))
            .filter(person_film_work::Column::PersonId.eq(person_id))
            .filter(person_film_work::Column::Role.eq(role))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(FieldErrors::single("person", ROLE_ALREADY_LINKED).into());
        }

        let link = person_film_work::ActiveModel {
            person_id: Set(person_id),
            film_work_id: Set(film_work_id),
            role: Set(role.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|err| link_conflict(err, "person", ROLE_ALREADY_LINKED))?;

        info!(film_work = %film_work_id, person = %person_id, role, "person linked");
        Ok(link)
    }

    pub async fn remove_filmwork_person(&self, film_work_id: Uuid, link_id: Uuid) -> CatalogResult<()> {
        let res = person_film_work::Entity::delete_many()
            .filter(person_film_work::Column::Id.eq(link_id))
            .filter(person_film_work::Column::FilmWorkId.eq(film_work_id))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(CatalogError::NotFound("person link"));
        }

        info!(film_work = %film_work_id, link = %link_id, "person unlinked");
        Ok(())
    }

    // Delete previews

    pub async fn genre_dependents(&self, id: Uuid) -> CatalogResult<Dependents> {
        let genre_links = genre_film_work::Entity::find()
            .filter(genre_film_work::Column::GenreId.eq(id))
            .count(&self.db)
            .await?;
        Ok(Dependents { genre_links, person_links: 0 })
    }

    pub async fn person_dependents(&self, id: Uuid) -> CatalogResult<Dependents> {
        let person_links = person_film_work::Entity::find()
            .filter(person_film_work::Column::PersonId.eq(id))
            .count(&self.db)
            .await?;
        Ok(Dependents { genre_links: 0, person_links })
    }

    pub async fn filmwork_dependents(&self, id: Uuid) -> CatalogResult<Dependents> {
        let genre_links = genre_film_work::Entity::find()
            .filter(genre_film_work::Column::FilmWorkId.eq(id))
            .count(&self.db)
            .await?;
        let person_links = person_film_work::Entity::find()
            .filter(person_film_work::Column::FilmWorkId.eq(id))
            .count(&self.db)
            .await?;
        Ok(Dependents { genre_links, person_links })
    }
}

/// A concurrent insert can still trip the unique index after the
/// duplicate check; report it the same way.
fn link_conflict(err: DbErr, field: &'static str, message: &str) -> CatalogError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => FieldErrors::single(field, message).into(),
        _ => err.into(),
    }
}

/// `%term%` with LIKE wildcards in the term matched literally.
fn contains_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    LikeExpr::new(format!("%{escaped}%")).escape('\\')
}

/// Lowercase hex digits of a term that could be part of an id.
fn id_fragment(term: &str) -> Option<String> {
    let hex: String = term.chars().filter(|c| *c != '-').map(|c| c.to_ascii_lowercase()).collect();
    (!hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())).then_some(hex)
}

fn apply_fields(active: &mut film_work::ActiveModel, fields: FilmworkFields) {
    active.title = Set(fields.title);
    active.description = Set(fields.description);
    active.creation_date = Set(fields.creation_date.map(|d| d.to_string()));
    active.rating = Set(fields.rating);
    active.film_type = Set(fields.film_type);
    active.certificate = Set(fields.certificate);
}

fn apply_file(active: &mut film_work::ActiveModel, file: FileChange) {
    match file {
        FileChange::Keep => {}
        FileChange::Clear => active.file_path = Set(None),
        FileChange::Replace(path) => active.file_path = Set(Some(path)),
    }
}
