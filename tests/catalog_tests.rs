use movies_admin::{
    catalog::{Catalog, CatalogError},
    db,
    entities::{film_work, film_work::FilmType, genre_film_work, person_film_work},
    models::{FileChange, FilmworkForm, FilmworkOrder, FilmworkQuery, GenreForm, PersonForm},
    validation::REQUIRED,
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set, Statement,
};

async fn catalog() -> Catalog {
    let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    Catalog::new(db, 2)
}

fn film(title: &str, film_type: &str, rating: &str) -> FilmworkForm {
    FilmworkForm {
        title: title.into(),
        film_type: film_type.into(),
        rating: rating.into(),
        ..Default::default()
    }
}

fn genre(name: &str) -> GenreForm {
    GenreForm { name: name.into(), description: String::new() }
}

fn person(name: &str) -> PersonForm {
    PersonForm { full_name: name.into() }
}

#[tokio::test]
async fn test_genre_with_empty_name_is_rejected() {
    let catalog = catalog().await;

    let err = catalog.create_genre(&genre("   ")).await.unwrap_err();
    match err {
        CatalogError::Invalid(errors) => assert_eq!(errors.get("name"), [REQUIRED.to_string()]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(catalog.counts().await.unwrap().genres, 0);
}

#[tokio::test]
async fn test_filmwork_rating_bounds() {
    let catalog = catalog().await;

    let err = catalog.create_filmwork(&film("Example", "movie", "101"), FileChange::Keep).await;
    assert!(matches!(err, Err(CatalogError::Invalid(ref e)) if !e.get("rating").is_empty()));

    let created = catalog.create_filmwork(&film("Example", "movie", "85"), FileChange::Keep).await.unwrap();
    assert_eq!(created.rating, Some(85.0));
    assert_eq!(created.film_type, FilmType::Movie);
    assert_eq!(created.file_path, None);
    assert_eq!(catalog.counts().await.unwrap().filmworks, 1);
}

#[tokio::test]
async fn test_filmwork_type_must_be_a_known_choice() {
    let catalog = catalog().await;

    let err = catalog.create_filmwork(&film("Example", "cartoon", ""), FileChange::Keep).await;
    assert!(matches!(err, Err(CatalogError::Invalid(ref e)) if !e.get("type").is_empty()));

    let show = catalog.create_filmwork(&film("Example", "tv_show", ""), FileChange::Keep).await.unwrap();
    assert_eq!(show.film_type, FilmType::TvShow);
    assert_eq!(show.rating, None);
}

#[tokio::test]
async fn test_update_keeps_created_and_file_changes() {
    let catalog = catalog().await;
    let created = catalog
        .create_filmwork(&film("Before", "movie", ""), FileChange::Replace("movies/a.mp4".into()))
        .await
        .unwrap();
    assert_eq!(created.file_path.as_deref(), Some("movies/a.mp4"));

    let mut form = film("After", "movie", "50");
    form.creation_date = "2001-09-11".into();
    let updated = catalog.update_filmwork(created.id, &form, FileChange::Keep).await.unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.creation_date.as_deref(), Some("2001-09-11"));
    assert_eq!(updated.created, created.created);
    assert!(updated.modified >= created.created);
    assert_eq!(updated.file_path.as_deref(), Some("movies/a.mp4"));

    let cleared = catalog.update_filmwork(created.id, &form, FileChange::Clear).await.unwrap();
    assert_eq!(cleared.file_path, None);
}

#[tokio::test]
async fn test_missing_rows_are_not_found() {
    let catalog = catalog().await;
    let id = movies_admin::mixins::new_id();

    assert!(matches!(catalog.get_genre(id).await, Err(CatalogError::NotFound("genre"))));
    assert!(matches!(catalog.delete_person(id).await, Err(CatalogError::NotFound("person"))));
    assert!(matches!(
        catalog.update_filmwork(id, &film("x", "movie", ""), FileChange::Keep).await,
        Err(CatalogError::NotFound("film work"))
    ));
}

#[tokio::test]
async fn test_person_link_requires_role() {
    let catalog = catalog().await;
    let movie = catalog.create_filmwork(&film("Heat", "movie", ""), FileChange::Keep).await.unwrap();
    let actor = catalog.create_person(&person("Al Pacino")).await.unwrap();

    let err = catalog.add_filmwork_person(movie.id, actor.id, "  ").await.unwrap_err();
    assert!(matches!(err, CatalogError::Invalid(ref e) if e.get("role") == [REQUIRED.to_string()]));

    catalog.add_filmwork_person(movie.id, actor.id, "actor").await.unwrap();
    catalog.add_filmwork_person(movie.id, actor.id, "producer").await.unwrap();
    assert!(catalog.add_filmwork_person(movie.id, actor.id, "actor").await.is_err());

    let links = catalog.filmwork_persons(movie.id).await.unwrap();
    let roles: Vec<_> = links.iter().map(|l| l.link.role.as_str()).collect();
    assert_eq!(roles, ["actor", "producer"]);
}

#[tokio::test]
async fn test_duplicate_genre_link_is_rejected() {
    let catalog = catalog().await;
    let movie = catalog.create_filmwork(&film("Alien", "movie", ""), FileChange::Keep).await.unwrap();
    let horror = catalog.create_genre(&genre("Horror")).await.unwrap();

    catalog.add_filmwork_genre(movie.id, horror.id).await.unwrap();
    let err = catalog.add_filmwork_genre(movie.id, horror.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::Invalid(ref e) if !e.get("genre").is_empty()));

    let unknown = movies_admin::mixins::new_id();
    assert!(matches!(catalog.add_filmwork_genre(movie.id, unknown).await, Err(CatalogError::Invalid(_))));
    assert_eq!(catalog.filmwork_genres(movie.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_genre_removes_its_links() {
    let catalog = catalog().await;
    let movie = catalog.create_filmwork(&film("Alien", "movie", ""), FileChange::Keep).await.unwrap();
    let horror = catalog.create_genre(&genre("Horror")).await.unwrap();
    let scifi = catalog.create_genre(&genre("Sci-Fi")).await.unwrap();
    catalog.add_filmwork_genre(movie.id, horror.id).await.unwrap();
    catalog.add_filmwork_genre(movie.id, scifi.id).await.unwrap();

    assert_eq!(catalog.genre_dependents(horror.id).await.unwrap().genre_links, 1);
    catalog.delete_genre(horror.id).await.unwrap();

    let remaining = catalog.filmwork_genres(movie.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].genre.name, "Sci-Fi");
    assert!(catalog.get_filmwork(movie.id).await.is_ok());
}

#[tokio::test]
async fn test_deleting_filmwork_removes_all_links() {
    let catalog = catalog().await;
    let movie = catalog.create_filmwork(&film("Alien", "movie", ""), FileChange::Keep).await.unwrap();
    let other = catalog.create_filmwork(&film("Aliens", "movie", ""), FileChange::Keep).await.unwrap();
    let horror = catalog.create_genre(&genre("Horror")).await.unwrap();
    let director = catalog.create_person(&person("Ridley Scott")).await.unwrap();

    catalog.add_filmwork_genre(movie.id, horror.id).await.unwrap();
    catalog.add_filmwork_genre(other.id, horror.id).await.unwrap();
    catalog.add_filmwork_person(movie.id, director.id, "director").await.unwrap();

    let dependents = catalog.filmwork_dependents(movie.id).await.unwrap();
    assert_eq!((dependents.genre_links, dependents.person_links), (1, 1));

    catalog.delete_filmwork(movie.id).await.unwrap();

    let db = catalog.db();
    assert_eq!(genre_film_work::Entity::find().count(db).await.unwrap(), 1);
    assert_eq!(person_film_work::Entity::find().count(db).await.unwrap(), 0);
    assert!(catalog.get_genre(horror.id).await.is_ok());
    assert!(catalog.get_person(director.id).await.is_ok());
}

#[tokio::test]
async fn test_deleting_person_removes_their_links() {
    let catalog = catalog().await;
    let movie = catalog.create_filmwork(&film("Heat", "movie", ""), FileChange::Keep).await.unwrap();
    let actor = catalog.create_person(&person("Robert De Niro")).await.unwrap();
    catalog.add_filmwork_person(movie.id, actor.id, "actor").await.unwrap();

    catalog.delete_person(actor.id).await.unwrap();
    assert!(catalog.filmwork_persons(movie.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_removing_links_is_scoped_to_the_filmwork() {
    let catalog = catalog().await;
    let movie = catalog.create_filmwork(&film("Alien", "movie", ""), FileChange::Keep).await.unwrap();
    let other = catalog.create_filmwork(&film("Heat", "movie", ""), FileChange::Keep).await.unwrap();
    let horror = catalog.create_genre(&genre("Horror")).await.unwrap();
    let link = catalog.add_filmwork_genre(movie.id, horror.id).await.unwrap();

    assert!(matches!(
        catalog.remove_filmwork_genre(other.id, link.id).await,
        Err(CatalogError::NotFound(_))
    ));
    catalog.remove_filmwork_genre(movie.id, link.id).await.unwrap();
    assert!(catalog.filmwork_genres(movie.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_search_filter_order_and_pages() {
    let catalog = catalog().await;
    let alien = catalog.create_filmwork(&film("Alien", "movie", "84"), FileChange::Keep).await.unwrap();
    let mut lost_form = film("Lost", "tv_show", "83");
    lost_form.description = "Survivors of a plane crash".into();
    let lost = catalog.create_filmwork(&lost_form, FileChange::Keep).await.unwrap();
    catalog.create_filmwork(&film("Blade Runner", "movie", "90"), FileChange::Keep).await.unwrap();
    let horror = catalog.create_genre(&genre("Horror")).await.unwrap();
    catalog.add_filmwork_genre(alien.id, horror.id).await.unwrap();

    let all = catalog.list_filmworks(&FilmworkQuery { page: 1, ..Default::default() }).await.unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.num_pages, 2);
    let titles: Vec<_> = all.items.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, ["Alien", "Blade Runner"]);

    let beyond = catalog.list_filmworks(&FilmworkQuery { page: 9, ..Default::default() }).await.unwrap();
    assert_eq!(beyond.number, 2);
    assert_eq!(beyond.items[0].title, "Lost");

    let by_text = FilmworkQuery { search: Some("plane".into()), page: 1, ..Default::default() };
    assert_eq!(catalog.list_filmworks(&by_text).await.unwrap().items[0].id, lost.id);

    let by_id = FilmworkQuery { search: Some(alien.id.to_string()), page: 1, ..Default::default() };
    let found = catalog.list_filmworks(&by_id).await.unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].id, alien.id);

    let by_type = FilmworkQuery { film_type: Some(FilmType::TvShow), page: 1, ..Default::default() };
    assert_eq!(catalog.list_filmworks(&by_type).await.unwrap().total, 1);

    let by_genre = FilmworkQuery { genre: Some(horror.id), page: 1, ..Default::default() };
    let horror_films = catalog.list_filmworks(&by_genre).await.unwrap();
    assert_eq!(horror_films.total, 1);
    assert_eq!(horror_films.items[0].id, alien.id);

    let by_rating = FilmworkQuery { order: FilmworkOrder::parse("-rating"), page: 1, ..Default::default() };
    let ranked = catalog.list_filmworks(&by_rating).await.unwrap();
    assert_eq!(ranked.items[0].title, "Blade Runner");
    assert_eq!(ranked.items[1].title, "Alien");
}

fn search(text: &str) -> FilmworkQuery {
    FilmworkQuery { search: Some(text.into()), page: 1, ..Default::default() }
}

#[tokio::test]
async fn test_search_folds_unicode_case() {
    let catalog = catalog().await;
    let matrix = catalog.create_filmwork(&film("Матрица", "movie", ""), FileChange::Keep).await.unwrap();
    catalog.create_filmwork(&film("Alien", "movie", ""), FileChange::Keep).await.unwrap();
    catalog.create_filmwork(&film("Heat", "movie", ""), FileChange::Keep).await.unwrap();

    let found = catalog.list_filmworks(&search("матрица")).await.unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].id, matrix.id);
    assert_eq!(catalog.list_filmworks(&search("МАТРИЦА")).await.unwrap().total, 1);
    assert_eq!(catalog.list_filmworks(&search("alien")).await.unwrap().total, 1);

    let mut renamed = film("Терминатор", "movie", "");
    renamed.description = "Судный день".into();
    catalog.update_filmwork(matrix.id, &renamed, FileChange::Keep).await.unwrap();
    assert_eq!(catalog.list_filmworks(&search("матрица")).await.unwrap().total, 0);
    assert_eq!(catalog.list_filmworks(&search("судный")).await.unwrap().total, 1);
}

#[tokio::test]
async fn test_search_matches_id_fragments() {
    let catalog = catalog().await;
    let alien = catalog.create_filmwork(&film("Alien", "movie", ""), FileChange::Keep).await.unwrap();
    catalog.create_filmwork(&film("Heat", "movie", ""), FileChange::Keep).await.unwrap();

    let id = alien.id.to_string();
    let found = catalog.list_filmworks(&search(&id[..8])).await.unwrap();
    assert!(found.items.iter().any(|f| f.id == alien.id));

    let found = catalog.list_filmworks(&search(&id[4..13].to_uppercase())).await.unwrap();
    assert!(found.items.iter().any(|f| f.id == alien.id));
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let catalog = catalog().await;
    for title in ["Alien", "Heat", "Solaris"] {
        catalog.create_filmwork(&film(title, "movie", ""), FileChange::Keep).await.unwrap();
    }

    assert_eq!(catalog.list_filmworks(&search("_")).await.unwrap().total, 0);
    assert_eq!(catalog.list_filmworks(&search("%")).await.unwrap().total, 0);
    assert_eq!(catalog.list_filmworks(&search("\\")).await.unwrap().total, 0);

    let odd = catalog.create_filmwork(&film("100% Wolf_Pack", "movie", ""), FileChange::Keep).await.unwrap();
    assert_eq!(catalog.list_filmworks(&search("0%")).await.unwrap().items[0].id, odd.id);
    assert_eq!(catalog.list_filmworks(&search("f_p")).await.unwrap().items[0].id, odd.id);
}

#[tokio::test]
async fn test_entity_hooks_guard_direct_writes() {
    let catalog = catalog().await;

    let out_of_range = film_work::ActiveModel {
        title: Set("Direct".into()),
        description: Set(String::new()),
        creation_date: Set(None),
        rating: Set(Some(150.0)),
        film_type: Set(FilmType::Movie),
        certificate: Set(String::new()),
        file_path: Set(None),
        ..Default::default()
    };
    assert!(out_of_range.insert(catalog.db()).await.is_err());

    let blank_role = person_film_work::ActiveModel { role: Set(String::new()), ..Default::default() };
    assert!(blank_role.insert(catalog.db()).await.is_err());
    assert_eq!(catalog.counts().await.unwrap().filmworks, 0);
}

#[tokio::test]
async fn test_database_checks_rating_and_type() {
    let catalog = catalog().await;
    let db = catalog.db();

    let insert = |rating: &str, film_type: &str| {
        Statement::from_string(
            db.get_database_backend(),
            format!(
                "INSERT INTO film_work (id, title, description, rating, type, certificate, created, modified) \
                 VALUES (randomblob(16), 'Raw', '', {rating}, '{film_type}', '', 0, 0)"
            ),
        )
    };

    assert!(db.execute(insert("101", "movie")).await.is_err());
    assert!(db.execute(insert("50", "cartoon")).await.is_err());
    assert!(db.execute(insert("50", "tv_show")).await.is_ok());
}
