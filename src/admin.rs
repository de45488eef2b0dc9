//! Declarative admin bindings: which models are exposed, which columns their
//! change lists show, how they can be filtered and searched, and which
//! associations are edited inline from the parent's change form.

use sea_orm::prelude::Uuid;

use crate::{
    entities::{film_work, genre, person},
    media::MediaStore,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListColumn {
    pub field: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFilter {
    Type,
    Genres,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inline {
    GenreFilmWork,
    PersonFilmWork,
}

#[derive(Clone, Copy, Debug)]
pub struct ModelAdmin {
    pub slug: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: &'static [ListColumn],
    pub list_filter: &'static [ListFilter],
    pub search_fields: &'static [&'static str],
    pub inlines: &'static [Inline],
}

impl ModelAdmin {
    pub fn list_url(&self) -> String {
        format!("/admin/{}", self.slug)
    }

    pub fn add_url(&self) -> String {
        format!("/admin/{}/add", self.slug)
    }

    pub fn change_url(&self, id: Uuid) -> String {
        format!("/admin/{}/{id}", self.slug)
    }

    pub fn delete_url(&self, id: Uuid) -> String {
        format!("/admin/{}/{id}/delete", self.slug)
    }

    pub fn has_search(&self) -> bool {
        !self.search_fields.is_empty()
    }
}

pub const GENRE_ADMIN: ModelAdmin = ModelAdmin {
    slug: "genres",
    verbose_name: "Genre",
    verbose_name_plural: "Genres",
    list_display: &[ListColumn { field: "name", label: "Genre", sortable: false }],
    list_filter: &[],
    search_fields: &[],
    inlines: &[],
};

pub const PERSON_ADMIN: ModelAdmin = ModelAdmin {
    slug: "persons",
    verbose_name: "Person",
    verbose_name_plural: "Persons",
    list_display: &[ListColumn { field: "full_name", label: "Full Name", sortable: false }],
    list_filter: &[],
    search_fields: &[],
    inlines: &[],
};

pub const FILMWORK_ADMIN: ModelAdmin = ModelAdmin {
    slug: "filmworks",
    verbose_name: "Movie",
    verbose_name_plural: "Movies",
    list_display: &[
        ListColumn { field: "title", label: "Title", sortable: true },
        ListColumn { field: "type", label: "Type", sortable: true },
        ListColumn { field: "creation_date", label: "Date", sortable: true },
        ListColumn { field: "rating", label: "Rate", sortable: true },
    ],
    list_filter: &[ListFilter::Type, ListFilter::Genres],
    search_fields: &["title", "description", "id"],
    inlines: &[Inline::GenreFilmWork, Inline::PersonFilmWork],
};

/// Registration order is the order of the admin index.
pub const REGISTRY: [&ModelAdmin; 3] = [&GENRE_ADMIN, &PERSON_ADMIN, &FILMWORK_ADMIN];

/// How a model renders in its change list.
pub trait AdminRow {
    fn id(&self) -> Uuid;

    /// Display string, used as the link text of the first column.
    fn label(&self) -> String;

    /// Cell text for a `list_display` field.
    fn cell(&self, field: &str) -> String;
}

const EMPTY: &str = "-";

impl AdminRow for genre::Model {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn cell(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            _ => EMPTY.to_string(),
        }
    }
}

impl AdminRow for person::Model {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.full_name.clone()
    }

    fn cell(&self, field: &str) -> String {
        match field {
            "full_name" => self.full_name.clone(),
            _ => EMPTY.to_string(),
        }
    }
}

impl AdminRow for film_work::Model {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> String {
        self.title.clone()
    }

    fn cell(&self, field: &str) -> String {
        match field {
            "title" => self.title.clone(),
            "type" => self.film_type.label().to_string(),
            "creation_date" => self.creation_date.clone().unwrap_or_else(|| EMPTY.to_string()),
            "rating" => self.rating.map(|r| r.to_string()).unwrap_or_else(|| EMPTY.to_string()),
            "certificate" if !self.certificate.is_empty() => self.certificate.clone(),
            "file_path" => self.file_path.as_deref().map(MediaStore::url).unwrap_or_else(|| EMPTY.to_string()),
            _ => EMPTY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::film_work::FilmType;

    #[test]
    fn test_registry_slugs_are_unique() {
        let mut slugs: Vec<_> = REGISTRY.iter().map(|m| m.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), REGISTRY.len());
    }

    #[test]
    fn test_filmwork_admin_configuration() {
        let fields: Vec<_> = FILMWORK_ADMIN.list_display.iter().map(|c| c.field).collect();
        assert_eq!(fields, ["title", "type", "creation_date", "rating"]);
        assert_eq!(FILMWORK_ADMIN.list_filter, [ListFilter::Type, ListFilter::Genres]);
        assert!(FILMWORK_ADMIN.has_search());
        assert!(!GENRE_ADMIN.has_search());
        assert_eq!(FILMWORK_ADMIN.inlines.len(), 2);
    }

    #[test]
    fn test_filmwork_cells() {
        let film = film_work::Model {
            id: Uuid::nil(),
            title: "Example".into(),
            description: String::new(),
            creation_date: None,
            rating: Some(85.0),
            film_type: FilmType::TvShow,
            certificate: String::new(),
            file_path: Some("movies/clip.mp4".into()),
            search_text: "example ".into(),
            created: 0,
            modified: 0,
        };
        assert_eq!(film.cell("type"), "Show");
        assert_eq!(film.cell("rating"), "85");
        assert_eq!(film.cell("creation_date"), EMPTY);
        assert_eq!(film.cell("certificate"), EMPTY);
        assert_eq!(film.cell("file_path"), "/media/movies/clip.mp4");
        assert_eq!(FILMWORK_ADMIN.change_url(film.id), format!("/admin/filmworks/{}", Uuid::nil()));
    }
}
