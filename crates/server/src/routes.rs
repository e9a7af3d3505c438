//! Axum router and handlers.
//!
//! Each handler extracts its path segment and hands it to the
//! [`MovieQueryService`]; query errors turn into JSON error responses through
//! [`QueryError`]'s `IntoResponse` implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{QueryError, QueryResult};
use crate::responses::*;
use crate::service::MovieQueryService;

/// Application state shared across handlers
pub struct AppState {
    pub service: MovieQueryService,
}

type SharedState = State<Arc<AppState>>;

/// Build the router with every query route
pub fn router(service: MovieQueryService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/recomendacion/{titulo}", get(recommend))
        .route("/cantidad_filmaciones_mes/{mes}", get(count_by_month))
        .route("/cantidad_filmaciones_dia/{dia}", get(count_by_weekday))
        .route("/score_titulo/{titulo}", get(score_by_title))
        .route("/votos_titulo/{titulo}", get(votes_by_title))
        .route("/get_actor/{nombre_actor}", get(get_actor))
        .route("/get_director/{nombre_director}", get(get_director))
        .route("/popular_movies/{top_n}", get(popular_movies))
        .route("/movies_by_language/{idioma}", get(movies_by_language))
        .route("/movies_by_review/{review}", get(movies_by_review))
        .route("/movies_by_genre/{genero}", get(movies_by_genre))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(AppState { service }))
}

/// Bind `addr` and serve until Ctrl+C
pub async fn serve(service: MovieQueryService, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// ============================================================================
// Handlers
// ============================================================================

async fn health(State(state): SharedState) -> Json<HealthResponse> {
    Json(state.service.health())
}

/// GET /recomendacion/{titulo}
async fn recommend(
    State(state): SharedState,
    Path(titulo): Path<String>,
) -> QueryResult<Json<RecommendationResponse>> {
    state.service.recommend(&titulo).map(Json)
}

/// GET /cantidad_filmaciones_mes/{mes}
async fn count_by_month(
    State(state): SharedState,
    Path(mes): Path<String>,
) -> QueryResult<Json<CountResponse>> {
    state.service.count_by_month(&mes).map(Json)
}

/// GET /cantidad_filmaciones_dia/{dia}
async fn count_by_weekday(
    State(state): SharedState,
    Path(dia): Path<String>,
) -> QueryResult<Json<CountResponse>> {
    state.service.count_by_weekday(&dia).map(Json)
}

/// GET /score_titulo/{titulo}
async fn score_by_title(
    State(state): SharedState,
    Path(titulo): Path<String>,
) -> QueryResult<Json<ScoreResponse>> {
    state.service.score_by_title(&titulo).map(Json)
}

/// GET /votos_titulo/{titulo}
async fn votes_by_title(
    State(state): SharedState,
    Path(titulo): Path<String>,
) -> QueryResult<Json<VotesResponse>> {
    state.service.votes_by_title(&titulo).map(Json)
}

/// GET /get_actor/{nombre_actor}
async fn get_actor(
    State(state): SharedState,
    Path(nombre_actor): Path<String>,
) -> QueryResult<Json<ActorResponse>> {
    state.service.actor_returns(&nombre_actor).map(Json)
}

/// GET /get_director/{nombre_director}
async fn get_director(
    State(state): SharedState,
    Path(nombre_director): Path<String>,
) -> QueryResult<Json<DirectorResponse>> {
    state.service.director_films(&nombre_director).map(Json)
}

/// GET /popular_movies/{top_n}
async fn popular_movies(
    State(state): SharedState,
    Path(top_n): Path<String>,
) -> QueryResult<Json<PopularMoviesResponse>> {
    let top_n: usize = top_n
        .trim()
        .parse()
        .map_err(|_| QueryError::InvalidTopN(top_n.clone()))?;
    Ok(Json(state.service.popular_movies(top_n)))
}

/// GET /movies_by_language/{idioma}
async fn movies_by_language(
    State(state): SharedState,
    Path(idioma): Path<String>,
) -> Json<MoviesByLanguageResponse> {
    Json(state.service.movies_by_language(&idioma))
}

/// GET /movies_by_review/{review}
async fn movies_by_review(
    State(state): SharedState,
    Path(review): Path<String>,
) -> Json<MoviesByReviewResponse> {
    Json(state.service.movies_by_review(&review))
}

/// GET /movies_by_genre/{genero}
async fn movies_by_genre(
    State(state): SharedState,
    Path(genero): Path<String>,
) -> Json<MoviesByGenreResponse> {
    Json(state.service.movies_by_genre(&genero))
}
