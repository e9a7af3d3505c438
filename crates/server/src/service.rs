//! # Movie Query Service
//!
//! Answers every read-only query over the loaded dataset:
//! - title lookups (score, votes) through the title index
//! - actor and director returns, joining credits to movies by id
//! - genre and language listings through their indices
//! - scans (recommendation, overview keywords, release month/weekday)
//!   through a [`FilterPipeline`]
//! - popularity ranking
//!
//! The service owns nothing but an `Arc<DataIndex>` and a vote threshold, so
//! it is cheap to clone into every request handler.

use std::sync::Arc;

use data_loader::{DataIndex, Movie};
use pipeline::filters::{
    MinimumVotesFilter, OverviewContainsFilter, ReleaseMonthFilter, ReleaseWeekdayFilter,
    TitleContainsFilter,
};
use pipeline::{FilterPipeline, MovieFilter, month_from_name, weekday_from_name};
use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::responses::*;

/// Votes a film needs before its vote average is reported
pub const DEFAULT_MIN_VOTES: u32 = 2000;

#[derive(Clone)]
pub struct MovieQueryService {
    data_index: Arc<DataIndex>,
    min_votes: u32,
}

impl MovieQueryService {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self {
            data_index,
            min_votes: DEFAULT_MIN_VOTES,
        }
    }

    /// Override the vote threshold used by [`Self::votes_by_title`]
    pub fn with_min_votes(mut self, min_votes: u32) -> Self {
        self.min_votes = min_votes;
        self
    }

    /// Titles containing `title`, ignoring case, in table order.
    ///
    /// An empty result is reported as "movie not found".
    pub fn recommend(&self, title: &str) -> QueryResult<RecommendationResponse> {
        let matches = FilterPipeline::new()
            .add_filter(TitleContainsFilter::new(title))
            .run(&self.data_index);
        debug!("{} titles contain {:?}", matches.len(), title);

        if matches.is_empty() {
            return Err(QueryError::MovieNotFound(title.to_string()));
        }
        Ok(RecommendationResponse {
            recommendations: titles(matches),
        })
    }

    /// Films released in a month given by its Spanish name
    pub fn count_by_month(&self, month: &str) -> QueryResult<CountResponse> {
        let number =
            month_from_name(month).ok_or_else(|| QueryError::InvalidMonth(month.to_string()))?;
        let matches = FilterPipeline::new()
            .add_filter(ReleaseMonthFilter::new(number))
            .run(&self.data_index);

        Ok(CountResponse {
            cantidad: matches.len(),
        })
    }

    /// Films released on a weekday given by its Spanish name
    pub fn count_by_weekday(&self, day: &str) -> QueryResult<CountResponse> {
        let weekday =
            weekday_from_name(day).ok_or_else(|| QueryError::InvalidWeekday(day.to_string()))?;
        let matches = FilterPipeline::new()
            .add_filter(ReleaseWeekdayFilter::new(weekday))
            .run(&self.data_index);

        Ok(CountResponse {
            cantidad: matches.len(),
        })
    }

    /// Release year and popularity of the first film titled `title`
    pub fn score_by_title(&self, title: &str) -> QueryResult<ScoreResponse> {
        let movie = self.first_by_title(title)?;
        Ok(ScoreResponse {
            titulo: movie.title.clone(),
            anio: movie.release_year,
            score: movie.popularity,
        })
    }

    /// Vote count and average of the first film titled `title`, provided it
    /// has at least the configured number of votes
    pub fn votes_by_title(&self, title: &str) -> QueryResult<VotesResponse> {
        let movie = self.first_by_title(title)?;

        let threshold = MinimumVotesFilter::new(self.min_votes);
        if !threshold.keep(movie) {
            return Err(QueryError::NotEnoughVotes {
                title: movie.title.clone(),
                votes: movie.vote_count,
                required: threshold.min_votes(),
            });
        }

        Ok(VotesResponse {
            titulo: movie.title.clone(),
            cantidad_votos: movie.vote_count,
            promedio_votacion: movie.vote_average,
        })
    }

    /// Return figures over every film the actor appears in.
    ///
    /// Each credits row counts as one film. Its return comes from the first
    /// movie row with the same id, or 0 when that film is not in the movies
    /// table.
    pub fn actor_returns(&self, name: &str) -> QueryResult<ActorResponse> {
        let credits = self.data_index.credits_for_actor(name);
        if credits.is_empty() {
            return Err(QueryError::ActorNotFound(name.to_string()));
        }

        let total: f64 = credits
            .iter()
            .map(|row| {
                self.data_index
                    .get_movie(row.id)
                    .map_or(0.0, |movie| movie.return_ratio)
            })
            .sum();
        let count = credits.len();
        debug!("{:?} appears in {} films", name, count);

        Ok(ActorResponse {
            actor: name.trim().to_string(),
            cantidad_peliculas: count,
            retorno_total: total,
            promedio_retorno: total / count as f64,
        })
    }

    /// Every directed film with its return, budget and revenue.
    ///
    /// Films missing from the movies table are left out of the list.
    pub fn director_films(&self, name: &str) -> QueryResult<DirectorResponse> {
        let credits = self.data_index.credits_for_director(name);
        if credits.is_empty() {
            return Err(QueryError::DirectorNotFound(name.to_string()));
        }

        let peliculas: Vec<MovieDetail> = credits
            .iter()
            .filter_map(|row| self.data_index.get_movie(row.id))
            .map(|movie| MovieDetail {
                titulo: movie.title.clone(),
                fecha_lanzamiento: movie.release_date,
                retorno_individual: movie.return_ratio,
                costo: movie.budget,
                ganancia: movie.revenue,
            })
            .collect();
        let retorno_total: f64 = peliculas.iter().map(|p| p.retorno_individual).sum();

        Ok(DirectorResponse {
            director: name.trim().to_string(),
            peliculas,
            retorno_total,
        })
    }

    /// The `top_n` most popular titles; ties keep table order
    pub fn popular_movies(&self, top_n: usize) -> PopularMoviesResponse {
        let mut movies: Vec<&Movie> = self.data_index.movies().iter().collect();
        movies.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        movies.truncate(top_n);

        PopularMoviesResponse {
            top_n,
            peliculas: titles(movies),
        }
    }

    pub fn movies_by_language(&self, language: &str) -> MoviesByLanguageResponse {
        MoviesByLanguageResponse {
            idioma: language.to_string(),
            peliculas: titles(self.data_index.movies_by_language(language)),
        }
    }

    /// Titles whose overview mentions `keyword`
    pub fn movies_by_review(&self, keyword: &str) -> MoviesByReviewResponse {
        let matches = FilterPipeline::new()
            .add_filter(OverviewContainsFilter::new(keyword))
            .run(&self.data_index);

        MoviesByReviewResponse {
            review: keyword.to_string(),
            peliculas: titles(matches),
        }
    }

    pub fn movies_by_genre(&self, genre: &str) -> MoviesByGenreResponse {
        MoviesByGenreResponse {
            genero: genre.to_string(),
            peliculas: titles(self.data_index.movies_by_genre(genre)),
        }
    }

    pub fn health(&self) -> HealthResponse {
        let (movies, credits) = self.data_index.counts();
        HealthResponse {
            status: "ok".to_string(),
            movies,
            credits,
        }
    }

    fn first_by_title(&self, title: &str) -> QueryResult<&Movie> {
        self.data_index
            .find_by_title(title)
            .into_iter()
            .next()
            .ok_or_else(|| QueryError::MovieNotFound(title.to_string()))
    }
}

fn titles(movies: Vec<&Movie>) -> Vec<String> {
    movies.into_iter().map(|movie| movie.title.clone()).collect()
}
