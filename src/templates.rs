use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};
use sea_orm::prelude::Uuid;

use crate::{
    admin::{
        AdminRow, FILMWORK_ADMIN, GENRE_ADMIN, Inline, ListFilter, ModelAdmin, PERSON_ADMIN, REGISTRY,
    },
    catalog::{Counts, Dependents, GenreLink, PersonLink},
    entities::{film_work::FilmType, genre, person},
    media::MediaStore,
    mixins::format_timestamp,
    models::{FilmworkForm, FilmworkQuery, GenreForm, Page, PersonForm},
    validation::FieldErrors,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str = "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";
const DANGER_CLASS: &str = "rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700";

/// Current change-list parameters, used to build filter, sort and page links
/// that keep the rest of the selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    pub q: Option<String>,
    pub film_type: Option<String>,
    pub genre: Option<String>,
    pub order: Option<String>,
    pub page: u64,
}

impl ListState {
    pub fn page(page: u64) -> Self {
        Self { page, ..Default::default() }
    }

    pub fn with(&self, change: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        change(&mut next);
        next
    }

    pub fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("q", &self.q),
            ("type", &self.film_type),
            ("genre", &self.genre),
            ("o", &self.order),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push(format!("{key}={}", urlencoding::encode(value)));
            }
        }
        if self.page > 1 {
            pairs.push(format!("p={}", self.page));
        }

        if pairs.is_empty() { String::new() } else { format!("?{}", pairs.join("&")) }
    }
}

impl From<&FilmworkQuery> for ListState {
    fn from(query: &FilmworkQuery) -> Self {
        Self {
            q: query.search.clone(),
            film_type: query.film_type.map(|t| t.code().to_string()),
            genre: query.genre.map(|g| g.to_string()),
            order: query.order.map(|o| o.param()),
            page: query.page,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FilterChoice {
    pub label: String,
    pub href: String,
    pub selected: bool,
}

#[derive(Clone, Debug)]
pub struct FilterGroup {
    pub title: &'static str,
    pub choices: Vec<FilterChoice>,
}

/// Sidebar filters for the film work change list.
pub fn filmwork_filters(state: &ListState, genres: &[genre::Model]) -> Vec<FilterGroup> {
    let base = FILMWORK_ADMIN.list_url();
    let href = |s: ListState| format!("{base}{}", s.with(|s| s.page = 1).query_string());

    FILMWORK_ADMIN
        .list_filter
        .iter()
        .map(|filter| match filter {
            ListFilter::Type => {
                let mut choices = vec![FilterChoice {
                    label: "All".to_string(),
                    href: href(state.with(|s| s.film_type = None)),
                    selected: state.film_type.is_none(),
                }];
                choices.extend(FilmType::ALL.into_iter().map(|t| FilterChoice {
                    label: t.label().to_string(),
                    href: href(state.with(|s| s.film_type = Some(t.code().to_string()))),
                    selected: state.film_type.as_deref() == Some(t.code()),
                }));
                FilterGroup { title: "By type", choices }
            }
            ListFilter::Genres => {
                let mut choices = vec![FilterChoice {
                    label: "All".to_string(),
                    href: href(state.with(|s| s.genre = None)),
                    selected: state.genre.is_none(),
                }];
                choices.extend(genres.iter().map(|g| {
                    let id = g.id.to_string();
                    FilterChoice {
                        label: g.name.clone(),
                        selected: state.genre.as_deref() == Some(id.as_str()),
                        href: href(state.with(|s| s.genre = Some(id.clone()))),
                    }
                }));
                FilterGroup { title: "By genre", choices }
            }
        })
        .collect()
}

pub fn index_page(counts: &Counts) -> String {
    page(
        "Site administration",
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Site administration" }
            div class="mt-6 bg-white shadow rounded-lg divide-y" {
                @for admin in REGISTRY {
                    div class="flex items-center justify-between px-6 py-4" {
                        a class="font-medium text-blue-600 hover:text-blue-800" href=(admin.list_url()) {
                            (admin.verbose_name_plural)
                        }
                        div class="flex items-center gap-4 text-sm" {
                            span class="text-gray-500" { (count_for(admin, counts)) }
                            a class="text-green-700 hover:text-green-900" href=(admin.add_url()) { "+ Add" }
                        }
                    }
                }
            }
        },
    )
}

fn count_for(admin: &ModelAdmin, counts: &Counts) -> u64 {
    match admin.slug {
        "genres" => counts.genres,
        "persons" => counts.persons,
        _ => counts.filmworks,
    }
}

pub fn change_list<T: AdminRow>(
    admin: &ModelAdmin,
    rows: &Page<T>,
    state: &ListState,
    filters: &[FilterGroup],
) -> String {
    let base = admin.list_url();

    page(
        admin.verbose_name_plural,
        html! {
            div class="flex items-center justify-between" {
                h1 class="text-2xl font-bold text-gray-900" { "Select " (admin.verbose_name.to_lowercase()) " to change" }
                a class=(BUTTON_CLASS) href=(admin.add_url()) { "Add " (admin.verbose_name.to_lowercase()) }
            }

            @if admin.has_search() {
                form class="mt-6 flex gap-2" method="get" action=(base) {
                    input class=(INPUT_CLASS) type="search" name="q" value=[state.q.as_deref()]
                        placeholder=(format!("Search by {}", admin.search_fields.join(", ")));
                    @if let Some(t) = &state.film_type { input type="hidden" name="type" value=(t); }
                    @if let Some(g) = &state.genre { input type="hidden" name="genre" value=(g); }
                    @if let Some(o) = &state.order { input type="hidden" name="o" value=(o); }
                    button class=(BUTTON_CLASS) type="submit" { "Search" }
                }
            }

            div class="mt-6 flex gap-6" {
                div class="flex-1 bg-white shadow rounded-lg overflow-hidden" {
                    table class="min-w-full divide-y divide-gray-200" {
                        thead class="bg-gray-50" {
                            tr {
                                @for column in admin.list_display {
                                    th class="px-4 py-3 text-left text-xs font-semibold uppercase text-gray-600" {
                                        @if column.sortable {
                                            a class="hover:text-gray-900" href=(sort_href(&base, state, column.field)) {
                                                (column.label) (sort_marker(state, column.field))
                                            }
                                        } @else {
                                            (column.label)
                                        }
                                    }
                                }
                            }
                        }
                        tbody class="divide-y divide-gray-100" {
                            @for row in &rows.items {
                                tr {
                                    @for (i, column) in admin.list_display.iter().enumerate() {
                                        td class="px-4 py-2 text-sm text-gray-800" {
                                            @if i == 0 {
                                                a class="text-blue-600 hover:text-blue-800" href=(admin.change_url(row.id())) {
                                                    (row.cell(column.field))
                                                }
                                            } @else {
                                                (row.cell(column.field))
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div class="flex items-center justify-between bg-gray-50 px-4 py-3 text-sm text-gray-600" {
                        @let noun = if rows.total == 1 { admin.verbose_name } else { admin.verbose_name_plural };
                        span { (rows.total) " " (noun.to_lowercase()) }
                        @if rows.num_pages > 1 {
                            div class="flex gap-2" {
                                @for n in 1..=rows.num_pages {
                                    @if n == rows.number {
                                        span class="font-semibold text-gray-900" { (n) }
                                    } @else {
                                        a class="text-blue-600 hover:text-blue-800" href=(format!("{base}{}", state.with(|s| s.page = n).query_string())) { (n) }
                                    }
                                }
                            }
                        }
                    }
                }

                @if !filters.is_empty() {
                    aside class="w-56 bg-white shadow rounded-lg p-4 text-sm" {
                        h2 class="font-semibold text-gray-900" { "Filter" }
                        @for group in filters {
                            h3 class="mt-4 text-xs font-semibold uppercase text-gray-500" { (group.title) }
                            ul class="mt-1 space-y-1" {
                                @for choice in &group.choices {
                                    li {
                                        @if choice.selected {
                                            span class="font-semibold text-gray-900" { (choice.label) }
                                        } @else {
                                            a class="text-blue-600 hover:text-blue-800" href=(choice.href) { (choice.label) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn sort_href(base: &str, state: &ListState, field: &str) -> String {
    let next = if state.order.as_deref() == Some(field) { format!("-{field}") } else { field.to_string() };
    format!("{base}{}", state.with(|s| s.order = Some(next)).query_string())
}

fn sort_marker(state: &ListState, field: &str) -> &'static str {
    match state.order.as_deref() {
        Some(o) if o == field => " ▲",
        Some(o) if o.strip_prefix('-') == Some(field) => " ▼",
        _ => "",
    }
}

pub fn genre_form_page(
    existing: Option<&genre::Model>,
    form: &GenreForm,
    errors: &FieldErrors,
) -> String {
    let admin = &GENRE_ADMIN;
    let action = form_action(admin, existing.map(|g| g.id));

    page(
        &form_title(admin, existing.map(|g| g.name.as_str())),
        html! {
            (form_header(admin, existing.map(|g| g.name.as_str())))
            (error_note(errors))
            form class="mt-6 bg-white shadow rounded-lg p-6 space-y-4" method="post" action=(action) {
                (text_field("name", "Title", &form.name, errors, true))
                (textarea_field("description", "Description", &form.description, errors))
                (submit_row(admin, existing.map(|g| g.id)))
            }
            @if let Some(g) = existing { (timestamps(g.created, Some(g.modified))) }
        },
    )
}

pub fn person_form_page(
    existing: Option<&person::Model>,
    form: &PersonForm,
    errors: &FieldErrors,
) -> String {
    let admin = &PERSON_ADMIN;
    let action = form_action(admin, existing.map(|p| p.id));

    page(
        &form_title(admin, existing.map(|p| p.full_name.as_str())),
        html! {
            (form_header(admin, existing.map(|p| p.full_name.as_str())))
            (error_note(errors))
            form class="mt-6 bg-white shadow rounded-lg p-6 space-y-4" method="post" action=(action) {
                (textarea_field_required("full_name", "Full Name", &form.full_name, errors))
                (submit_row(admin, existing.map(|p| p.id)))
            }
            @if let Some(p) = existing { (timestamps(p.created, Some(p.modified))) }
        },
    )
}

/// Everything the film work change form shows besides the main form.
#[derive(Clone, Debug, Default)]
pub struct FilmworkExtras {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub file_path: Option<String>,
    pub created: Option<(i64, i64)>,
    pub genres: Vec<GenreLink>,
    pub persons: Vec<PersonLink>,
    pub all_genres: Vec<genre::Model>,
    pub all_persons: Vec<person::Model>,
    pub inline_errors: FieldErrors,
}

pub fn filmwork_form_page(form: &FilmworkForm, errors: &FieldErrors, extras: &FilmworkExtras) -> String {
    let admin = &FILMWORK_ADMIN;
    let action = form_action(admin, extras.id);

    page(
        &form_title(admin, extras.title.as_deref()),
        html! {
            (form_header(admin, extras.title.as_deref()))
            (error_note(errors))
            form class="mt-6 bg-white shadow rounded-lg p-6 space-y-4" method="post" action=(action) enctype="multipart/form-data" {
                (text_field("title", "Title", &form.title, errors, true))
                (textarea_field("description", "Description", &form.description, errors))
                div {
                    label class="block text-sm font-medium text-gray-700" for="creation_date" { "Date" }
                    input class=(INPUT_CLASS) type="date" name="creation_date" id="creation_date" value=(form.creation_date);
                    (field_errors(errors, "creation_date"))
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="rating" { "Rate" }
                    input class=(INPUT_CLASS) type="number" step="any" min="0" max="100" name="rating" id="rating" value=(form.rating);
                    (field_errors(errors, "rating"))
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="type" { "Type" }
                    select class=(INPUT_CLASS) name="type" id="type" required {
                        option value="" selected[form.film_type.is_empty()] { "---------" }
                        @for t in FilmType::ALL {
                            option value=(t.code()) selected[form.film_type == t.code()] { (t.label()) }
                        }
                    }
                    (field_errors(errors, "type"))
                }
                (text_field("certificate", "Certificate", &form.certificate, errors, false))
                div {
                    label class="block text-sm font-medium text-gray-700" for="file_path" { "File" }
                    @if let Some(path) = &extras.file_path {
                        p class="mt-1 text-sm text-gray-600" {
                            "Currently: " a class="text-blue-600 hover:text-blue-800" href=(MediaStore::url(path)) { (path) }
                            label class="ml-4" {
                                input type="checkbox" name="file_path-clear" id="file_path-clear";
                                " Clear"
                            }
                        }
                    }
                    input class="mt-1 block text-sm" type="file" name="file_path" id="file_path";
                    (field_errors(errors, "file_path"))
                }
                (submit_row(admin, extras.id))
            }

            @if let Some(id) = extras.id {
                @for inline in admin.inlines {
                    @match inline {
                        Inline::GenreFilmWork => { (genre_inline(id, extras)) }
                        Inline::PersonFilmWork => { (person_inline(id, extras)) }
                    }
                }
            }
            @if let Some((created, modified)) = extras.created { (timestamps(created, Some(modified))) }
        },
    )
}

fn genre_inline(id: Uuid, extras: &FilmworkExtras) -> Markup {
    let base = format!("{}/genres", FILMWORK_ADMIN.change_url(id));
    html! {
        section class="mt-8 bg-white shadow rounded-lg p-6" id="genres" {
            h2 class="text-lg font-semibold text-gray-900" { "Genre film works" }
            table class="mt-4 min-w-full text-sm" {
                thead { tr { th class="text-left text-gray-600" { "Genre" } th class="text-left text-gray-600" { "Created" } th {} } }
                tbody {
                    @for link in &extras.genres {
                        tr {
                            td class="py-1" { (link.genre.name) }
                            td class="py-1 text-gray-500" { (format_timestamp(link.link.created)) }
                            td class="py-1 text-right" {
                                form method="post" action=(format!("{base}/{}/delete", link.link.id)) {
                                    button class="text-red-600 hover:text-red-800" type="submit" { "Remove" }
                                }
                            }
                        }
                    }
                }
            }
            form class="mt-4 flex items-end gap-2" method="post" action=(base) {
                div class="flex-1" {
                    select class=(INPUT_CLASS) name="genre" {
                        option value="" { "---------" }
                        @for g in &extras.all_genres { option value=(g.id.to_string()) { (g.name) } }
                    }
                    (field_errors(&extras.inline_errors, "genre"))
                }
                button class=(BUTTON_CLASS) type="submit" { "Add genre" }
            }
        }
    }
}

fn person_inline(id: Uuid, extras: &FilmworkExtras) -> Markup {
    let base = format!("{}/persons", FILMWORK_ADMIN.change_url(id));
    html! {
        section class="mt-8 bg-white shadow rounded-lg p-6" id="persons" {
            h2 class="text-lg font-semibold text-gray-900" { "Person film works" }
            table class="mt-4 min-w-full text-sm" {
                thead { tr { th class="text-left text-gray-600" { "Person" } th class="text-left text-gray-600" { "Role" } th {} } }
                tbody {
                    @for link in &extras.persons {
                        tr {
                            td class="py-1" { (link.person.full_name) }
                            td class="py-1" { (link.link.role) }
                            td class="py-1 text-right" {
                                form method="post" action=(format!("{base}/{}/delete", link.link.id)) {
                                    button class="text-red-600 hover:text-red-800" type="submit" { "Remove" }
                                }
                            }
                        }
                    }
                }
            }
            form class="mt-4 flex items-end gap-2" method="post" action=(base) {
                div class="flex-1" {
                    select class=(INPUT_CLASS) name="person" {
                        option value="" { "---------" }
                        @for p in &extras.all_persons { option value=(p.id.to_string()) { (p.full_name) } }
                    }
                    (field_errors(&extras.inline_errors, "person"))
                }
                div class="flex-1" {
                    input class=(INPUT_CLASS) name="role" placeholder="Role";
                    (field_errors(&extras.inline_errors, "role"))
                }
                button class=(BUTTON_CLASS) type="submit" { "Add person" }
            }
        }
    }
}

pub fn delete_page(admin: &ModelAdmin, id: Uuid, label: &str, dependents: &Dependents) -> String {
    page(
        "Are you sure?",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Are you sure?" }
                p class="mt-4 text-gray-700" {
                    "Are you sure you want to delete the " (admin.verbose_name.to_lowercase()) " \"" (label) "\"? "
                    "All of the following related items will be deleted:"
                }
                ul class="mt-4 list-disc pl-6 text-gray-700" {
                    li { (admin.verbose_name) ": " (label) }
                    @if dependents.genre_links > 0 { li { "Genre film work relationships: " (dependents.genre_links) } }
                    @if dependents.person_links > 0 { li { "Person film work relationships: " (dependents.person_links) } }
                }
                form class="mt-6 flex gap-4" method="post" action=(admin.delete_url(id)) {
                    button class=(DANGER_CLASS) type="submit" { "Yes, I'm sure" }
                    a class="rounded-md border px-4 py-2 text-gray-700 hover:bg-gray-50" href=(admin.change_url(id)) { "No, take me back" }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/admin" { "Back to administration" }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Movies administration" }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                header class="bg-slate-800 text-white" {
                    div class="max-w-6xl mx-auto flex items-center gap-6 px-6 py-3" {
                        a class="font-semibold" href="/admin" { "Movies administration" }
                        @for admin in REGISTRY {
                            a class="text-sm text-slate-300 hover:text-white" href=(admin.list_url()) { (admin.verbose_name_plural) }
                        }
                    }
                }
                main class="max-w-6xl mx-auto px-6 py-8" { (body) }
            }
        }
    }
    .into_string()
}

fn form_action(admin: &ModelAdmin, id: Option<Uuid>) -> String {
    match id {
        Some(id) => admin.change_url(id),
        None => admin.add_url(),
    }
}

fn form_title(admin: &ModelAdmin, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("Change {}: {label}", admin.verbose_name.to_lowercase()),
        None => format!("Add {}", admin.verbose_name.to_lowercase()),
    }
}

fn form_header(admin: &ModelAdmin, label: Option<&str>) -> Markup {
    html! {
        div class="text-sm text-gray-500" {
            a class="hover:text-gray-700" href="/admin" { "Home" } " › "
            a class="hover:text-gray-700" href=(admin.list_url()) { (admin.verbose_name_plural) }
        }
        h1 class="mt-2 text-2xl font-bold text-gray-900" { (form_title(admin, label)) }
    }
}

fn error_note(errors: &FieldErrors) -> Markup {
    html! {
        @if !errors.is_empty() {
            p class="mt-4 rounded-md bg-red-50 px-4 py-3 text-sm text-red-700" { "Please correct the errors below." }
        }
    }
}

fn field_errors(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @let messages = errors.get(field);
        @if !messages.is_empty() {
            ul class="errorlist mt-1 text-sm text-red-600" {
                @for message in messages { li { (message) } }
            }
        }
    }
}

fn text_field(name: &str, label: &str, value: &str, errors: &FieldErrors, required: bool) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) name=(name) id=(name) value=(value) required[required];
            (field_errors(errors, name))
        }
    }
}

fn textarea_field(name: &str, label: &str, value: &str, errors: &FieldErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            textarea class=(INPUT_CLASS) name=(name) id=(name) rows="4" { (value) }
            (field_errors(errors, name))
        }
    }
}

fn textarea_field_required(name: &str, label: &str, value: &str, errors: &FieldErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            textarea class=(INPUT_CLASS) name=(name) id=(name) rows="2" required { (value) }
            (field_errors(errors, name))
        }
    }
}

fn submit_row(admin: &ModelAdmin, id: Option<Uuid>) -> Markup {
    html! {
        div class="flex items-center justify-between pt-4" {
            @if let Some(id) = id {
                a class="text-red-600 hover:text-red-800" href=(admin.delete_url(id)) { "Delete" }
            } @else {
                span {}
            }
            button class=(BUTTON_CLASS) type="submit" { "Save" }
        }
    }
}

fn timestamps(created: i64, modified: Option<i64>) -> Markup {
    html! {
        p class="mt-4 text-xs text-gray-500" {
            "Created " (format_timestamp(created))
            @if let Some(modified) = modified { " · modified " (format_timestamp(modified)) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::REQUIRED;

    #[test]
    fn test_query_string_skips_empty_values() {
        assert_eq!(ListState::page(1).query_string(), "");
        let state = ListState {
            q: Some("star wars".into()),
            film_type: Some("movie".into()),
            genre: None,
            order: Some("-rating".into()),
            page: 2,
        };
        assert_eq!(state.query_string(), "?q=star%20wars&type=movie&o=-rating&p=2");
    }

    #[test]
    fn test_sort_href_toggles_direction() {
        let state = ListState { order: Some("title".into()), page: 3, ..Default::default() };
        assert_eq!(sort_href("/admin/filmworks", &state, "title"), "/admin/filmworks?o=-title&p=3");
        assert_eq!(sort_href("/admin/filmworks", &state, "rating"), "/admin/filmworks?o=rating&p=3");
    }

    #[test]
    fn test_filters_reset_page_and_mark_selection() {
        let state = ListState { film_type: Some("tv_show".into()), page: 4, ..Default::default() };
        let groups = filmwork_filters(&state, &[]);
        assert_eq!(groups.len(), 2);

        let types = &groups[0].choices;
        assert_eq!(types.len(), 3);
        assert!(!types[0].selected);
        assert!(types[2].selected);
        assert_eq!(types[1].href, "/admin/filmworks?type=movie");
        assert_eq!(types[0].href, "/admin/filmworks");
    }

    #[test]
    fn test_genre_form_renders_errors_and_escapes() {
        let form = GenreForm { name: "<b>".into(), description: String::new() };
        let html = genre_form_page(None, &form, &FieldErrors::single("name", REQUIRED));
        assert!(html.contains(REQUIRED));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("action=\"/admin/genres/add\""));
    }

    #[test]
    fn test_error_page_shows_status() {
        let html = error_page(StatusCode::NOT_FOUND, "genre not found");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("genre not found"));
    }
}
