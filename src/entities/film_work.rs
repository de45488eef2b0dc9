use sea_orm::entity::prelude::*;

use crate::{
    mixins::{active, invalid},
    validation,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum FilmType {
    #[sea_orm(string_value = "movie")]
    Movie,
    #[sea_orm(string_value = "tv_show")]
    TvShow,
}

impl FilmType {
    pub const ALL: [FilmType; 2] = [FilmType::Movie, FilmType::TvShow];

    pub fn code(self) -> &'static str {
        match self {
            FilmType::Movie => "movie",
            FilmType::TvShow => "tv_show",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilmType::Movie => "Movie",
            FilmType::TvShow => "Show",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "film_work")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub creation_date: Option<String>,
    pub rating: Option<f64>,
    #[sea_orm(column_name = "type")]
    pub film_type: FilmType,
    pub certificate: String,
    /// Relative to the media root.
    pub file_path: Option<String>,
    /// Lowercased title and description, matched by the change-list search.
    #[sea_orm(column_type = "Text")]
    pub search_text: String,
    pub created: i64,
    pub modified: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::genre_film_work::Entity")]
    GenreFilmWork,
    #[sea_orm(has_many = "super::person_film_work::Entity")]
    PersonFilmWork,
}

impl Related<super::genre_film_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenreFilmWork.def()
    }
}

impl Related<super::person_film_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonFilmWork.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::genre_film_work::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::genre_film_work::Relation::FilmWork.def().rev())
    }
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        super::person_film_work::Relation::Person.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::person_film_work::Relation::FilmWork.def().rev())
    }
}

/// Unicode-folded haystack for `title` and `description`.
pub fn search_text(title: &str, description: &str) -> String {
    format!("{title} {description}").to_lowercase()
}

fn check(model: &mut ActiveModel) -> Result<(), DbErr> {
    if let (Some(title), Some(description)) = (active(&model.title), active(&model.description)) {
        model.search_text = sea_orm::ActiveValue::Set(search_text(title, description));
    }
    if let Some(title) = active(&model.title) {
        validation::required_max(title, validation::TITLE_MAX).map_err(|e| invalid("title", e))?;
    }
    if let Some(Some(rating)) = active(&model.rating) {
        validation::rating(*rating).map_err(|e| invalid("rating", e))?;
    }
    if let Some(Some(date)) = active(&model.creation_date) {
        validation::parse_date(date).map_err(|e| invalid("creation_date", e))?;
    }
    if let Some(certificate) = active(&model.certificate) {
        validation::max_chars(certificate, validation::CERTIFICATE_MAX)
            .map_err(|e| invalid("certificate", e))?;
    }
    Ok(())
}

crate::timestamped_behavior!(check, modified);
