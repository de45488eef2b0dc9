use sea_orm::prelude::Uuid;
use serde::Deserialize;

use crate::{
    entities::{film_work, film_work::FilmType, genre, person},
    validation::{self, FieldErrors},
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl GenreForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("name", validation::required_max(&self.name, validation::NAME_MAX));
        errors.into_result()
    }
}

impl From<&genre::Model> for GenreForm {
    fn from(model: &genre::Model) -> Self {
        Self { name: model.name.clone(), description: model.description.clone() }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PersonForm {
    #[serde(default)]
    pub full_name: String,
}

impl PersonForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("full_name", validation::required(&self.full_name));
        errors.into_result()
    }
}

impl From<&person::Model> for PersonForm {
    fn from(model: &person::Model) -> Self {
        Self { full_name: model.full_name.clone() }
    }
}

/// Raw film work input; every field is kept as typed so a rejected form can
/// be shown back unchanged.
#[derive(Clone, Debug, Default)]
pub struct FilmworkForm {
    pub title: String,
    pub description: String,
    pub creation_date: String,
    pub rating: String,
    pub film_type: String,
    pub certificate: String,
    pub clear_file: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilmworkFields {
    pub title: String,
    pub description: String,
    pub creation_date: Option<jiff::civil::Date>,
    pub rating: Option<f64>,
    pub film_type: FilmType,
    pub certificate: String,
}

impl FilmworkForm {
    pub fn validate(&self) -> Result<FilmworkFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validation::required_max(&self.title, validation::TITLE_MAX));
        let creation_date = errors.check("creation_date", validation::parse_date(&self.creation_date));
        let rating = errors.check("rating", validation::parse_rating(&self.rating));
        let film_type = errors.check("type", validation::parse_film_type(&self.film_type));
        errors.check(
            "certificate",
            validation::max_chars(&self.certificate, validation::CERTIFICATE_MAX),
        );

        match (creation_date, rating, film_type) {
            (Some(creation_date), Some(rating), Some(film_type)) if errors.is_empty() => {
                Ok(FilmworkFields {
                    title: self.title.trim().to_string(),
                    description: self.description.clone(),
                    creation_date,
                    rating,
                    film_type,
                    certificate: self.certificate.trim().to_string(),
                })
            }
            _ => Err(errors),
        }
    }

    /// Sets a named field from submitted form data; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value,
            "description" => self.description = value,
            "creation_date" => self.creation_date = value,
            "rating" => self.rating = value,
            "type" => self.film_type = value,
            "certificate" => self.certificate = value,
            "file_path-clear" => self.clear_file = !value.is_empty(),
            _ => {}
        }
    }
}

impl From<&film_work::Model> for FilmworkForm {
    fn from(model: &film_work::Model) -> Self {
        Self {
            title: model.title.clone(),
            description: model.description.clone(),
            creation_date: model.creation_date.clone().unwrap_or_default(),
            rating: model.rating.map(|r| r.to_string()).unwrap_or_default(),
            film_type: model.film_type.code().to_string(),
            certificate: model.certificate.clone(),
            clear_file: false,
        }
    }
}

/// What to do with a film work's media file on save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FileChange {
    #[default]
    Keep,
    Clear,
    Replace(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenreLinkForm {
    #[serde(default)]
    pub genre: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PersonLinkForm {
    #[serde(default)]
    pub person: String,
    #[serde(default)]
    pub role: String,
}

pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilmworkOrderField {
    Title,
    Type,
    CreationDate,
    Rating,
}

impl FilmworkOrderField {
    pub fn field(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Type => "type",
            Self::CreationDate => "creation_date",
            Self::Rating => "rating",
        }
    }

    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "title" => Some(Self::Title),
            "type" => Some(Self::Type),
            "creation_date" => Some(Self::CreationDate),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilmworkOrder {
    pub field: FilmworkOrderField,
    pub descending: bool,
}

impl FilmworkOrder {
    /// Parses `title` / `-title` style ordering parameters.
    pub fn parse(raw: &str) -> Option<Self> {
        let (descending, field) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        FilmworkOrderField::from_field(field).map(|field| Self { field, descending })
    }

    pub fn param(self) -> String {
        if self.descending { format!("-{}", self.field.field()) } else { self.field.field().to_string() }
    }
}

/// Query-string parameters of the film work change list.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilmworkListParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub film_type: Option<String>,
    pub genre: Option<String>,
    pub o: Option<String>,
    pub p: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilmworkQuery {
    pub search: Option<String>,
    pub film_type: Option<FilmType>,
    pub genre: Option<Uuid>,
    pub order: Option<FilmworkOrder>,
    /// 1-based.
    pub page: u64,
}

impl From<&FilmworkListParams> for FilmworkQuery {
    fn from(params: &FilmworkListParams) -> Self {
        Self {
            search: params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()).map(String::from),
            film_type: params.film_type.as_deref().and_then(FilmType::from_code),
            genre: params.genre.as_deref().and_then(parse_id),
            order: params.o.as_deref().and_then(FilmworkOrder::parse),
            page: params.p.unwrap_or(1).max(1),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageParams {
    pub p: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FilmworkForm {
        FilmworkForm {
            title: "Example".into(),
            film_type: "movie".into(),
            rating: "85".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_filmwork_form_accepts_rating_in_range() {
        let fields = filled_form().validate().unwrap();
        assert_eq!(fields.rating, Some(85.0));
        assert_eq!(fields.film_type, FilmType::Movie);
        assert_eq!(fields.creation_date, None);
    }

    #[test]
    fn test_filmwork_form_rejects_rating_over_100() {
        let form = FilmworkForm { rating: "101".into(), ..filled_form() };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("rating").len(), 1);
        assert!(errors.get("title").is_empty());
    }

    #[test]
    fn test_filmwork_form_collects_every_error() {
        let form = FilmworkForm { creation_date: "someday".into(), ..Default::default() };
        let errors = form.validate().unwrap_err();
        assert!(!errors.get("title").is_empty());
        assert!(!errors.get("type").is_empty());
        assert!(!errors.get("creation_date").is_empty());
        assert!(errors.get("rating").is_empty());
    }

    #[test]
    fn test_filmwork_form_set() {
        let mut form = FilmworkForm::default();
        form.set("type", "tv_show".into());
        form.set("file_path-clear", "on".into());
        form.set("csrf", "ignored".into());
        assert_eq!(form.film_type, "tv_show");
        assert!(form.clear_file);
    }

    #[test]
    fn test_genre_form_requires_name() {
        assert!(GenreForm { name: "Drama".into(), ..Default::default() }.validate().is_ok());
        let errors = GenreForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), [validation::REQUIRED.to_string()]);
    }

    #[test]
    fn test_order_parse() {
        assert_eq!(
            FilmworkOrder::parse("-rating"),
            Some(FilmworkOrder { field: FilmworkOrderField::Rating, descending: true })
        );
        assert_eq!(FilmworkOrder::parse("title").map(FilmworkOrder::param), Some("title".into()));
        assert_eq!(FilmworkOrder::parse("id"), None);
    }

    #[test]
    fn test_query_from_params_drops_invalid_values() {
        let params = FilmworkListParams {
            q: Some("  ".into()),
            film_type: Some("cartoon".into()),
            genre: Some("not-a-uuid".into()),
            o: Some("-creation_date".into()),
            p: Some(0),
        };
        let query = FilmworkQuery::from(&params);
        assert_eq!(query.search, None);
        assert_eq!(query.film_type, None);
        assert_eq!(query.genre, None);
        assert_eq!(query.page, 1);
        assert!(query.order.is_some_and(|o| o.descending));
    }
}
