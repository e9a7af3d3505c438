//! HTTP-level tests: routing, path decoding, JSON shapes and error statuses.

use std::sync::Arc;

use axum_test::TestServer;
use chrono::NaiveDate;
use data_loader::{CastMember, Credits, CrewMember, DataIndex, Genre, Movie, MovieId};
use serde_json::{Value, json};
use server::responses::*;
use server::{MovieQueryService, router};

fn movie(
    id: MovieId,
    title: &str,
    date: (i32, u32, u32),
    language: &str,
    genres: &[&str],
    popularity: f64,
    votes: (u32, f64),
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        original_language: Some(language.to_string()),
        overview: None,
        tagline: None,
        status: Some("Released".to_string()),
        belongs_to_collection: None,
        genres: genres
            .iter()
            .map(|name| Genre {
                id: 0,
                name: name.to_string(),
            })
            .collect(),
        production_companies: vec![],
        production_countries: vec![],
        spoken_languages: vec![],
        budget: 0.0,
        revenue: 0.0,
        popularity,
        runtime: 100.0,
        vote_average: votes.1,
        vote_count: votes.0,
        release_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        release_year: date.0,
        return_ratio: 0.0,
    }
}

fn test_server() -> TestServer {
    let mut toy_story = movie(
        862,
        "Toy Story",
        (1995, 10, 30),
        "en",
        &["Animation", "Comedy", "Family"],
        21.946943,
        (5415, 7.7),
    );
    toy_story.budget = 30_000_000.0;
    toy_story.revenue = 373_554_033.0;
    toy_story.return_ratio = toy_story.revenue / toy_story.budget;
    toy_story.overview = Some("Led by Woody, Andy's toys live happily in his room.".to_string());

    let jumanji = movie(
        8844,
        "Jumanji",
        (1995, 12, 15),
        "en",
        &["Adventure", "Fantasy", "Family"],
        17.015539,
        (2413, 6.9),
    );
    let amelie = movie(
        194,
        "Amélie",
        (2001, 4, 25),
        "fr",
        &["Comedy", "Romance"],
        12.0,
        (1999, 7.8),
    );

    let credits = vec![Credits {
        id: 862,
        cast: vec![CastMember {
            name: "Tom Hanks".to_string(),
            character: "Woody (voice)".to_string(),
            ..CastMember::default()
        }],
        crew: vec![CrewMember {
            name: "John Lasseter".to_string(),
            job: "Director".to_string(),
            department: "Directing".to_string(),
            ..CrewMember::default()
        }],
    }];

    let index = DataIndex::from_tables(vec![toy_story, jumanji, amelie], credits);
    let service = MovieQueryService::new(Arc::new(index));
    TestServer::new(router(service)).unwrap()
}

#[tokio::test]
async fn health_reports_table_sizes() {
    let server = test_server();
    let resp = server.get("/health").await;

    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.json::<Value>(), json!({"status": "ok", "movies": 3, "credits": 1}));
}

#[tokio::test]
async fn score_titulo_uses_spanish_keys() {
    let server = test_server();
    let resp = server.get("/score_titulo/toy%20story").await;

    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["titulo"], "Toy Story");
    assert_eq!(body["año"], 1995);
    assert_eq!(body["score"], 21.946943);
}

#[tokio::test]
async fn votos_titulo_enforces_threshold() {
    let server = test_server();

    let ok = server.get("/votos_titulo/Jumanji").await;
    assert_eq!(ok.status_code(), 200);
    let body: VotesResponse = ok.json();
    assert_eq!(body.cantidad_votos, 2413);
    assert_eq!(body.promedio_votacion, 6.9);

    let too_few = server.get("/votos_titulo/Am%C3%A9lie").await;
    assert_eq!(too_few.status_code(), 422);
    let body: Value = too_few.json();
    assert_eq!(body["status"], 422);
    assert!(body["error"].as_str().unwrap().contains("suficientes valoraciones"));
}

#[tokio::test]
async fn unknown_title_is_not_found() {
    let server = test_server();

    let resp = server.get("/score_titulo/Nope").await;
    assert_eq!(resp.status_code(), 404);
    let body: Value = resp.json();
    assert_eq!(body["status"], 404);

    let resp = server.get("/recomendacion/zzz").await;
    assert_eq!(resp.status_code(), 404);
}

#[tokio::test]
async fn recomendacion_lists_substring_matches() {
    let server = test_server();
    let resp = server.get("/recomendacion/STORY").await;

    assert_eq!(resp.status_code(), 200);
    let body: RecommendationResponse = resp.json();
    assert_eq!(body.recommendations, vec!["Toy Story"]);
}

#[tokio::test]
async fn counts_by_month_and_weekday() {
    let server = test_server();

    let resp = server.get("/cantidad_filmaciones_mes/Octubre").await;
    assert_eq!(resp.json::<CountResponse>().cantidad, 1);

    let resp = server.get("/cantidad_filmaciones_dia/mi%C3%A9rcoles").await;
    assert_eq!(resp.json::<CountResponse>().cantidad, 1);

    let resp = server.get("/cantidad_filmaciones_mes/smarch").await;
    assert_eq!(resp.status_code(), 400);
    let resp = server.get("/cantidad_filmaciones_dia/funday").await;
    assert_eq!(resp.status_code(), 400);
}

#[tokio::test]
async fn actor_and_director_join_credits_to_movies() {
    let server = test_server();

    let actor: ActorResponse = server.get("/get_actor/Tom%20Hanks").await.json();
    assert_eq!(actor.cantidad_peliculas, 1);
    assert!((actor.retorno_total - 373_554_033.0 / 30_000_000.0).abs() < 1e-9);
    assert_eq!(actor.retorno_total, actor.promedio_retorno);

    let resp = server.get("/get_director/john%20lasseter").await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["peliculas"][0]["titulo"], "Toy Story");
    assert_eq!(body["peliculas"][0]["fecha_lanzamiento"], "1995-10-30");
    assert_eq!(body["peliculas"][0]["costo"], 30_000_000.0);

    let resp = server.get("/get_actor/Nobody").await;
    assert_eq!(resp.status_code(), 404);
    let resp = server.get("/get_director/Tom%20Hanks").await;
    assert_eq!(resp.status_code(), 404);
}

#[tokio::test]
async fn popular_movies_ranks_by_popularity() {
    let server = test_server();

    let body: PopularMoviesResponse = server.get("/popular_movies/2").await.json();
    assert_eq!(body.top_n, 2);
    assert_eq!(body.peliculas, vec!["Toy Story", "Jumanji"]);

    let resp = server.get("/popular_movies/many").await;
    assert_eq!(resp.status_code(), 400);
}

#[tokio::test]
async fn listings_by_language_genre_and_review() {
    let server = test_server();

    let body: MoviesByLanguageResponse = server.get("/movies_by_language/FR").await.json();
    assert_eq!(body.idioma, "FR");
    assert_eq!(body.peliculas, vec!["Amélie"]);

    let body: MoviesByGenreResponse = server.get("/movies_by_genre/family").await.json();
    assert_eq!(body.peliculas, vec!["Toy Story", "Jumanji"]);

    let body: MoviesByReviewResponse = server.get("/movies_by_review/woody").await.json();
    assert_eq!(body.peliculas, vec!["Toy Story"]);

    // empty listings are not errors
    let resp = server.get("/movies_by_genre/Western").await;
    assert_eq!(resp.status_code(), 200);
    assert!(resp.json::<MoviesByGenreResponse>().peliculas.is_empty());
}
