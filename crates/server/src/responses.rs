//! Response bodies of the query endpoints.
//!
//! Field names follow the established wire format, hence the Spanish keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<String>,
}

/// Film count for a month or weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountResponse {
    pub cantidad: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub titulo: String,
    #[serde(rename = "año")]
    pub anio: i32,
    /// The film's popularity
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotesResponse {
    pub titulo: String,
    pub cantidad_votos: u32,
    pub promedio_votacion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorResponse {
    pub actor: String,
    pub cantidad_peliculas: usize,
    pub retorno_total: f64,
    pub promedio_retorno: f64,
}

/// One film in a director's filmography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub titulo: String,
    pub fecha_lanzamiento: NaiveDate,
    pub retorno_individual: f64,
    pub costo: f64,
    pub ganancia: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorResponse {
    pub director: String,
    pub peliculas: Vec<MovieDetail>,
    pub retorno_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularMoviesResponse {
    pub top_n: usize,
    pub peliculas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesByLanguageResponse {
    pub idioma: String,
    pub peliculas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesByReviewResponse {
    pub review: String,
    pub peliculas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesByGenreResponse {
    pub genero: String,
    pub peliculas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub movies: usize,
    pub credits: usize,
}
