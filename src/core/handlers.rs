//! Tool handlers.
//!
//! Each handler runs one pass: validate input, warm the genre cache, call the
//! gateway once, format, and return a result envelope. Errors never escape;
//! they come back as `success: false` envelopes.

use crate::core::formatter::Formatter;
use crate::core::genres::{GenreCache, Genres};
use crate::error::{ApiError, ApiResult};
use crate::models::media::{FormattedMedia, MediaKind, TimeWindow};
use crate::models::tmdb::{MovieDetails, MovieItem, Page, TvDetails, TvItem};
use crate::services::tmdb::{fetch, Gateway, QueryParams};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_TIME_WINDOW: &str = "day";
pub const DEFAULT_SORT_BY: &str = "popularity.desc";

const SEARCH_SUGGESTION: &str = "Try different keywords or check spelling";
const TRENDING_SUGGESTION: &str = "Try a different time window or media type";
const DISCOVER_SUGGESTION: &str = "Try removing filters or choosing a different genre or year";

const MOVIE_APPEND: &str = "credits,production_companies,production_countries,spoken_languages";
const TV_APPEND: &str = "credits,content_ratings";

/// Arguments of `search_movies`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMoviesArgs {
    pub query: String,
    pub year: Option<u32>,
    pub page: Option<u32>,
}

/// Arguments of `search_tv_shows`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchTvShowsArgs {
    pub query: String,
    pub first_air_date_year: Option<u32>,
    pub page: Option<u32>,
}

/// Arguments of `get_movie_details`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetailsArgs {
    pub movie_id: u64,
}

/// Arguments of `get_tv_show_details`.
#[derive(Debug, Clone, Deserialize)]
pub struct TvDetailsArgs {
    pub tv_id: u64,
}

/// Arguments of `get_trending`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendingArgs {
    pub media_type: String,
    pub time_window: Option<String>,
}

/// Arguments of `discover_content`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverArgs {
    pub content_type: String,
    pub genre_id: Option<u64>,
    pub year: Option<u32>,
    pub sort_by: Option<String>,
}

/// Formatted page of list results.
struct MediaPage {
    results: Vec<FormattedMedia>,
    total_results: u64,
    total_pages: u64,
}

/// The six movie/TV tools, sharing one gateway and one genre cache.
pub struct ToolHandlers {
    gateway: Arc<dyn Gateway>,
    genres: Arc<GenreCache>,
    image_base_url: String,
}

impl ToolHandlers {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        genres: Arc<GenreCache>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            genres,
            image_base_url: image_base_url.into(),
        }
    }

    async fn warm_genres(&self) -> Genres {
        self.genres.ensure_warm(self.gateway.as_ref()).await
    }

    /// Search movies by title, optionally filtered by release year.
    pub async fn search_movies(&self, args: SearchMoviesArgs) -> Value {
        let genres = self.warm_genres().await;
        let year = args.year.filter(|y| *y != 0);
        let page = args.page.unwrap_or(DEFAULT_PAGE);

        let mut params = vec![
            ("query".to_string(), args.query.clone()),
            ("page".to_string(), page.to_string()),
        ];
        if let Some(year) = year {
            params.push(("year".to_string(), year.to_string()));
        }

        let result = match fetch::<Page<MovieItem>>(self.gateway.as_ref(), "/search/movie", params)
            .await
        {
            Ok(result) => result,
            Err(e) => return e.to_envelope(),
        };

        if result.items().is_empty() {
            let mut message = format!("No movies found for '{}'", args.query);
            if let Some(year) = year {
                message.push_str(&format!(" in {}", year));
            }
            return no_results(message, SEARCH_SUGGESTION, None);
        }

        let formatter = Formatter::new(&self.image_base_url, &genres);
        let results: Vec<_> = result.items().iter().map(|m| formatter.movie(m)).collect();

        json!({
            "success": true,
            "query": args.query,
            "year": year,
            "page": page,
            "total_results": result.total_results.unwrap_or(0),
            "total_pages": result.total_pages.unwrap_or(0),
            "results": results,
        })
    }

    /// Search TV shows by name, optionally filtered by first air year.
    pub async fn search_tv_shows(&self, args: SearchTvShowsArgs) -> Value {
        let genres = self.warm_genres().await;
        let year = args.first_air_date_year.filter(|y| *y != 0);
        let page = args.page.unwrap_or(DEFAULT_PAGE);

        let mut params = vec![
            ("query".to_string(), args.query.clone()),
            ("page".to_string(), page.to_string()),
        ];
        if let Some(year) = year {
            params.push(("first_air_date_year".to_string(), year.to_string()));
        }

        let result = match fetch::<Page<TvItem>>(self.gateway.as_ref(), "/search/tv", params).await {
            Ok(result) => result,
            Err(e) => return e.to_envelope(),
        };

        if result.items().is_empty() {
            let mut message = format!("No TV shows found for '{}'", args.query);
            if let Some(year) = year {
                message.push_str(&format!(" from {}", year));
            }
            return no_results(message, SEARCH_SUGGESTION, None);
        }

        let formatter = Formatter::new(&self.image_base_url, &genres);
        let results: Vec<_> = result.items().iter().map(|s| formatter.tv_show(s)).collect();

        json!({
            "success": true,
            "query": args.query,
            "first_air_date_year": year,
            "page": page,
            "total_results": result.total_results.unwrap_or(0),
            "total_pages": result.total_pages.unwrap_or(0),
            "results": results,
        })
    }

    /// Full movie record with cast, key crew and production details.
    pub async fn get_movie_details(&self, args: MovieDetailsArgs) -> Value {
        let genres = self.warm_genres().await;
        let endpoint = format!("/movie/{}", args.movie_id);
        let params = vec![("append_to_response".to_string(), MOVIE_APPEND.to_string())];

        let details = match fetch::<MovieDetails>(self.gateway.as_ref(), &endpoint, params).await {
            Ok(details) => details,
            Err(e) => return e.to_envelope(),
        };

        let formatter = Formatter::new(&self.image_base_url, &genres);
        to_value(&formatter.movie_details(args.movie_id, &details))
    }

    /// Full TV record with cast, creators, seasons and networks.
    pub async fn get_tv_show_details(&self, args: TvDetailsArgs) -> Value {
        let genres = self.warm_genres().await;
        let endpoint = format!("/tv/{}", args.tv_id);
        let params = vec![("append_to_response".to_string(), TV_APPEND.to_string())];

        let details = match fetch::<TvDetails>(self.gateway.as_ref(), &endpoint, params).await {
            Ok(details) => details,
            Err(e) => return e.to_envelope(),
        };

        let formatter = Formatter::new(&self.image_base_url, &genres);
        to_value(&formatter.tv_details(args.tv_id, &details))
    }

    /// Trending movies or TV shows for a day or week window.
    pub async fn get_trending(&self, args: TrendingArgs) -> Value {
        let Ok(kind) = args.media_type.parse::<MediaKind>() else {
            return validation_error("Invalid media_type. Must be 'movie' or 'tv'.");
        };
        let window = args.time_window.as_deref().unwrap_or(DEFAULT_TIME_WINDOW);
        let Ok(window) = window.parse::<TimeWindow>() else {
            return validation_error("Invalid time_window. Must be 'day' or 'week'.");
        };

        let genres = self.warm_genres().await;
        let endpoint = format!("/trending/{}/{}", kind, window.as_str());

        let page = match self.fetch_media_page(kind, &endpoint, Vec::new(), &genres).await {
            Ok(page) => page,
            Err(e) => return e.to_envelope(),
        };

        if page.results.is_empty() {
            return no_results(
                format!("No trending {} found for {}", kind, window.as_str()),
                TRENDING_SUGGESTION,
                None,
            );
        }

        json!({
            "success": true,
            "media_type": kind,
            "time_window": window.as_str(),
            "total_results": page.total_results,
            "results": page.results,
        })
    }

    /// Discover titles by genre, year and sort order.
    pub async fn discover_content(&self, args: DiscoverArgs) -> Value {
        let Ok(kind) = args.content_type.parse::<MediaKind>() else {
            return validation_error("Invalid content_type. Must be 'movie' or 'tv'.");
        };

        let genres = self.warm_genres().await;
        let genre_id = args.genre_id.filter(|id| *id != 0);
        let year = args.year.filter(|y| *y != 0);
        let sort_by = args
            .sort_by
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SORT_BY.to_string());

        let mut params = vec![("sort_by".to_string(), sort_by.clone())];
        if let Some(genre_id) = genre_id {
            params.push(("with_genres".to_string(), genre_id.to_string()));
        }
        if let Some(year) = year {
            let key = match kind {
                MediaKind::Movie => "year",
                MediaKind::Tv => "first_air_date_year",
            };
            params.push((key.to_string(), year.to_string()));
        }

        let filters = json!({
            "genre_id": genre_id,
            "year": year,
            "sort_by": sort_by,
        });

        let endpoint = format!("/discover/{}", kind);
        let page = match self.fetch_media_page(kind, &endpoint, params, &genres).await {
            Ok(page) => page,
            Err(e) => return e.to_envelope(),
        };

        if page.results.is_empty() {
            return no_results(
                format!("No {} found with the specified filters", kind),
                DISCOVER_SUGGESTION,
                Some(filters),
            );
        }

        json!({
            "success": true,
            "content_type": kind,
            "filters": filters,
            "total_results": page.total_results,
            "total_pages": page.total_pages,
            "results": page.results,
        })
    }

    async fn fetch_media_page(
        &self,
        kind: MediaKind,
        endpoint: &str,
        params: QueryParams,
        genres: &Genres,
    ) -> ApiResult<MediaPage> {
        let formatter = Formatter::new(&self.image_base_url, genres);
        let gateway = self.gateway.as_ref();

        let (results, total_results, total_pages) = match kind {
            MediaKind::Movie => {
                let page = fetch::<Page<MovieItem>>(gateway, endpoint, params).await?;
                let results = page
                    .items()
                    .iter()
                    .map(|m| FormattedMedia::Movie(formatter.movie(m)))
                    .collect();
                (results, page.total_results, page.total_pages)
            }
            MediaKind::Tv => {
                let page = fetch::<Page<TvItem>>(gateway, endpoint, params).await?;
                let results = page
                    .items()
                    .iter()
                    .map(|s| FormattedMedia::Tv(formatter.tv_show(s)))
                    .collect();
                (results, page.total_results, page.total_pages)
            }
        };

        Ok(MediaPage {
            results,
            total_results: total_results.unwrap_or(0),
            total_pages: total_pages.unwrap_or(0),
        })
    }
}

/// `success: false` envelope for rejected input.
pub fn validation_error(message: impl Into<String>) -> Value {
    ApiError::Validation(message.into()).to_envelope()
}

/// Successful envelope for an empty result list.
fn no_results(message: String, suggestion: &str, filters: Option<Value>) -> Value {
    let mut envelope = json!({
        "success": true,
        "message": message,
    });
    if let Some(filters) = filters {
        envelope["filters"] = filters;
    }
    envelope["suggestion"] = json!(suggestion);
    envelope["total_results"] = json!(0);
    envelope["results"] = json!([]);
    envelope
}

fn to_value<T: serde::Serialize>(view: &T) -> Value {
    serde_json::to_value(view)
        .unwrap_or_else(|e| ApiError::Unexpected(e.to_string()).to_envelope())
}
