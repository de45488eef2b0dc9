use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Form, Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::prelude::Uuid;

use crate::{
    AppState,
    admin::{AdminRow, FILMWORK_ADMIN, GENRE_ADMIN, PERSON_ADMIN},
    catalog::{Catalog, CatalogError},
    entities::film_work,
    error::AppResult,
    models::{
        FileChange, FilmworkForm, FilmworkListParams, FilmworkQuery, GenreForm, GenreLinkForm, PageParams,
        PersonForm, PersonLinkForm, parse_id,
    },
    templates::{self, FilmworkExtras, ListState},
    validation::{FieldErrors, REQUIRED},
};

type Shared = State<Arc<AppState>>;

/// Re-renders a rejected form.
fn unprocessable(body: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
}

fn redirect(to: String) -> Response {
    Redirect::to(&to).into_response()
}

pub async fn root() -> Redirect {
    Redirect::permanent("/admin")
}

pub async fn index(State(state): Shared) -> AppResult<Html<String>> {
    let counts = state.catalog.counts().await?;
    Ok(Html(templates::index_page(&counts)))
}

// Genres

pub async fn list_genres(State(state): Shared, Query(params): Query<PageParams>) -> AppResult<Html<String>> {
    let page = state.catalog.list_genres(params.p.unwrap_or(1)).await?;
    let list_state = ListState::page(page.number);
    Ok(Html(templates::change_list(&GENRE_ADMIN, &page, &list_state, &[])))
}

pub async fn add_genre() -> Html<String> {
    Html(templates::genre_form_page(None, &GenreForm::default(), &FieldErrors::new()))
}

pub async fn create_genre(State(state): Shared, Form(form): Form<GenreForm>) -> AppResult<Response> {
    match state.catalog.create_genre(&form).await {
        Ok(_) => Ok(redirect(GENRE_ADMIN.list_url())),
        Err(CatalogError::Invalid(errors)) => {
            Ok(unprocessable(templates::genre_form_page(None, &form, &errors)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn change_genre(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Html<String>> {
    let genre = state.catalog.get_genre(id).await?;
    Ok(Html(templates::genre_form_page(Some(&genre), &GenreForm::from(&genre), &FieldErrors::new())))
}

pub async fn update_genre(
    State(state): Shared,
    Path(id): Path<Uuid>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    match state.catalog.update_genre(id, &form).await {
        Ok(_) => Ok(redirect(GENRE_ADMIN.list_url())),
        Err(CatalogError::Invalid(errors)) => {
            let genre = state.catalog.get_genre(id).await?;
            Ok(unprocessable(templates::genre_form_page(Some(&genre), &form, &errors)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn confirm_delete_genre(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Html<String>> {
    let genre = state.catalog.get_genre(id).await?;
    let dependents = state.catalog.genre_dependents(id).await?;
    Ok(Html(templates::delete_page(&GENRE_ADMIN, id, &genre.label(), &dependents)))
}

pub async fn delete_genre(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Redirect> {
    state.catalog.delete_genre(id).await?;
    Ok(Redirect::to(&GENRE_ADMIN.list_url()))
}

// Persons

pub async fn list_persons(State(state): Shared, Query(params): Query<PageParams>) -> AppResult<Html<String>> {
    let page = state.catalog.list_persons(params.p.unwrap_or(1)).await?;
    let list_state = ListState::page(page.number);
    Ok(Html(templates::change_list(&PERSON_ADMIN, &page, &list_state, &[])))
}

pub async fn add_person() -> Html<String> {
    Html(templates::person_form_page(None, &PersonForm::default(), &FieldErrors::new()))
}

pub async fn create_person(State(state): Shared, Form(form): Form<PersonForm>) -> AppResult<Response> {
    match state.catalog.create_person(&form).await {
        Ok(_) => Ok(redirect(PERSON_ADMIN.list_url())),
        Err(CatalogError::Invalid(errors)) => {
            Ok(unprocessable(templates::person_form_page(None, &form, &errors)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn change_person(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Html<String>> {
    let person = state.catalog.get_person(id).await?;
    Ok(Html(templates::person_form_page(Some(&person), &PersonForm::from(&person), &FieldErrors::new())))
}

pub async fn update_person(
    State(state): Shared,
    Path(id): Path<Uuid>,
    Form(form): Form<PersonForm>,
) -> AppResult<Response> {
    match state.catalog.update_person(id, &form).await {
        Ok(_) => Ok(redirect(PERSON_ADMIN.list_url())),
        Err(CatalogError::Invalid(errors)) => {
            let person = state.catalog.get_person(id).await?;
            Ok(unprocessable(templates::person_form_page(Some(&person), &form, &errors)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn confirm_delete_person(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Html<String>> {
    let person = state.catalog.get_person(id).await?;
    let dependents = state.catalog.person_dependents(id).await?;
    Ok(Html(templates::delete_page(&PERSON_ADMIN, id, &person.label(), &dependents)))
}

pub async fn delete_person(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Redirect> {
    state.catalog.delete_person(id).await?;
    Ok(Redirect::to(&PERSON_ADMIN.list_url()))
}

// Film works

pub async fn list_filmworks(
    State(state): Shared,
    Query(params): Query<FilmworkListParams>,
) -> AppResult<Html<String>> {
    let query = FilmworkQuery::from(&params);
    let page = state.catalog.list_filmworks(&query).await?;
    let genres = state.catalog.all_genres().await?;

    let list_state = ListState::from(&query).with(|s| s.page = page.number);
    let filters = templates::filmwork_filters(&list_state, &genres);
    Ok(Html(templates::change_list(&FILMWORK_ADMIN, &page, &list_state, &filters)))
}

pub async fn add_filmwork() -> Html<String> {
    Html(templates::filmwork_form_page(
        &FilmworkForm::default(),
        &FieldErrors::new(),
        &FilmworkExtras::default(),
    ))
}

struct Upload {
    file_name: String,
    bytes: Bytes,
}

async fn read_filmwork_form(mut multipart: Multipart) -> AppResult<(FilmworkForm, Option<Upload>)> {
    let mut form = FilmworkForm::default();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file_path" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            if !file_name.is_empty() && !bytes.is_empty() {
                upload = Some(Upload { file_name, bytes });
            }
        } else {
            let value = field.text().await?;
            form.set(&name, value);
        }
    }

    Ok((form, upload))
}

async fn store_upload(state: &AppState, form: &FilmworkForm, upload: Option<Upload>) -> AppResult<FileChange> {
    Ok(match upload {
        Some(upload) => FileChange::Replace(state.media.save(&upload.file_name, &upload.bytes).await?),
        None if form.clear_file => FileChange::Clear,
        None => FileChange::Keep,
    })
}

/// Removes a file stored for a save that did not go through.
async fn discard_upload(state: &AppState, file: &FileChange) {
    if let FileChange::Replace(path) = file {
        if let Err(err) = state.media.remove(path).await {
            tracing::warn!(file = %path, error = %err, "failed to remove orphaned upload");
        }
    }
}

async fn filmwork_extras(catalog: &Catalog, film: &film_work::Model) -> AppResult<FilmworkExtras> {
    Ok(FilmworkExtras {
        id: Some(film.id),
        title: Some(film.title.clone()),
        file_path: film.file_path.clone(),
        created: Some((film.created, film.modified)),
        genres: catalog.filmwork_genres(film.id).await?,
        persons: catalog.filmwork_persons(film.id).await?,
        all_genres: catalog.all_genres().await?,
        all_persons: catalog.all_persons().await?,
        inline_errors: FieldErrors::new(),
    })
}

pub async fn create_filmwork(State(state): Shared, multipart: Multipart) -> AppResult<Response> {
    let (form, upload) = read_filmwork_form(multipart).await?;
    if let Err(errors) = form.validate() {
        let page = templates::filmwork_form_page(&form, &errors, &FilmworkExtras::default());
        return Ok(unprocessable(page));
    }

    let file = store_upload(&state, &form, upload).await?;
    let saved = state.catalog.create_filmwork(&form, file.clone()).await;
    if saved.is_err() {
        discard_upload(&state, &file).await;
    }
    match saved {
        Ok(film) => Ok(redirect(FILMWORK_ADMIN.change_url(film.id))),
        Err(CatalogError::Invalid(errors)) => Ok(unprocessable(templates::filmwork_form_page(
            &form,
            &errors,
            &FilmworkExtras::default(),
        ))),
        Err(err) => Err(err.into()),
    }
}

pub async fn change_filmwork(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Html<String>> {
    let film = state.catalog.get_filmwork(id).await?;
    let extras = filmwork_extras(&state.catalog, &film).await?;
    Ok(Html(templates::filmwork_form_page(&FilmworkForm::from(&film), &FieldErrors::new(), &extras)))
}

pub async fn update_filmwork(
    State(state): Shared,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Response> {
    let film = state.catalog.get_filmwork(id).await?;
    let (form, upload) = read_filmwork_form(multipart).await?;
    if let Err(errors) = form.validate() {
        let extras = filmwork_extras(&state.catalog, &film).await?;
        return Ok(unprocessable(templates::filmwork_form_page(&form, &errors, &extras)));
    }

    let file = store_upload(&state, &form, upload).await?;
    let saved = state.catalog.update_filmwork(id, &form, file.clone()).await;
    if saved.is_err() {
        discard_upload(&state, &file).await;
    }
    match saved {
        Ok(_) => Ok(redirect(FILMWORK_ADMIN.list_url())),
        Err(CatalogError::Invalid(errors)) => {
            let extras = filmwork_extras(&state.catalog, &film).await?;
            Ok(unprocessable(templates::filmwork_form_page(&form, &errors, &extras)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn confirm_delete_filmwork(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Html<String>> {
    let film = state.catalog.get_filmwork(id).await?;
    let dependents = state.catalog.filmwork_dependents(id).await?;
    Ok(Html(templates::delete_page(&FILMWORK_ADMIN, id, &film.label(), &dependents)))
}

pub async fn delete_filmwork(State(state): Shared, Path(id): Path<Uuid>) -> AppResult<Redirect> {
    state.catalog.delete_filmwork(id).await?;
    Ok(Redirect::to(&FILMWORK_ADMIN.list_url()))
}

// Inline associations

/// Shows the change form again with the inline editor's errors.
async fn inline_rejected(state: &AppState, id: Uuid, errors: FieldErrors) -> AppResult<Response> {
    let film = state.catalog.get_filmwork(id).await?;
    let mut extras = filmwork_extras(&state.catalog, &film).await?;
    extras.inline_errors = errors;
    Ok(unprocessable(templates::filmwork_form_page(&FilmworkForm::from(&film), &FieldErrors::new(), &extras)))
}

fn choice(field: &'static str, raw: &str) -> Result<Uuid, FieldErrors> {
    parse_id(raw).ok_or_else(|| FieldErrors::single(field, REQUIRED))
}

pub async fn add_genre_link(
    State(state): Shared,
    Path(id): Path<Uuid>,
    Form(form): Form<GenreLinkForm>,
) -> AppResult<Response> {
    let result = match choice("genre", &form.genre) {
        Ok(genre_id) => state.catalog.add_filmwork_genre(id, genre_id).await.map(|_| ()),
        Err(errors) => Err(errors.into()),
    };

    match result {
        Ok(()) => Ok(redirect(format!("{}#genres", FILMWORK_ADMIN.change_url(id)))),
        Err(CatalogError::Invalid(errors)) => inline_rejected(&state, id, errors).await,
        Err(err) => Err(err.into()),
    }
}

pub async fn remove_genre_link(
    State(state): Shared,
    Path((id, link_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Redirect> {
    state.catalog.remove_filmwork_genre(id, link_id).await?;
    Ok(Redirect::to(&format!("{}#genres", FILMWORK_ADMIN.change_url(id))))
}

pub async fn add_person_link(
    State(state): Shared,
    Path(id): Path<Uuid>,
    Form(form): Form<PersonLinkForm>,
) -> AppResult<Response> {
    let result = match choice("person", &form.person) {
        Ok(person_id) => state.catalog.add_filmwork_person(id, person_id, &form.role).await.map(|_| ()),
        Err(mut errors) => {
            if form.role.trim().is_empty() {
                errors.add("role", REQUIRED);
            }
            Err(errors.into())
        }
    };

    match result {
        Ok(()) => Ok(redirect(format!("{}#persons", FILMWORK_ADMIN.change_url(id)))),
        Err(CatalogError::Invalid(errors)) => inline_rejected(&state, id, errors).await,
        Err(err) => Err(err.into()),
    }
}

pub async fn remove_person_link(
    State(state): Shared,
    Path((id, link_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Redirect> {
    state.catalog.remove_filmwork_person(id, link_id).await?;
    Ok(Redirect::to(&format!("{}#persons", FILMWORK_ADMIN.change_url(id))))
}
