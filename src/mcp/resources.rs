//! Static resources.
//!
//! None of these touch the network. The genre resource reports whatever the
//! cache holds at the time of the read.

use crate::core::genres::GenreCache;
use crate::core::images::{BACKDROP_SIZES, POSTER_SIZES, PROFILE_SIZES};
use crate::error::{Error, RATE_LIMIT_HINT, SETUP_URL};
use crate::mcp::protocol::{Resource, ResourceContent};
use crate::models::config::TmdbConfig;
use crate::Result;
use serde_json::{json, Value};
use std::sync::Arc;

pub const CONFIG_URI: &str = "config://movie-api";
pub const GENRES_URI: &str = "data://popular-genres";
pub const USAGE_URI: &str = "help://usage-examples";

const MIME_JSON: &str = "application/json";

const POPULAR_MOVIE_GENRE_IDS: [u64; 19] = [
    28, 12, 16, 35, 80, 99, 18, 10751, 14, 36, 27, 10402, 9648, 10749, 878, 10770, 53, 10752, 37,
];
const POPULAR_TV_GENRE_IDS: [u64; 16] = [
    10759, 16, 35, 80, 99, 18, 10751, 14, 10762, 9648, 10763, 10764, 10765, 10766, 10767, 10768,
];

/// Serves the three read-only resources.
pub struct ResourceManager {
    config: TmdbConfig,
    genres: Arc<GenreCache>,
}

impl ResourceManager {
    pub fn new(config: TmdbConfig, genres: Arc<GenreCache>) -> Self {
        Self { config, genres }
    }

    pub fn list_resources() -> Vec<Resource> {
        vec![
            Resource {
                uri: CONFIG_URI.to_string(),
                name: "Movie API Configuration".to_string(),
                description: "API configuration and setup information".to_string(),
                mime_type: MIME_JSON.to_string(),
            },
            Resource {
                uri: GENRES_URI.to_string(),
                name: "Popular Genres".to_string(),
                description: "Movie and TV show genres with IDs".to_string(),
                mime_type: MIME_JSON.to_string(),
            },
            Resource {
                uri: USAGE_URI.to_string(),
                name: "Usage Examples".to_string(),
                description: "Example requests for every tool".to_string(),
                mime_type: MIME_JSON.to_string(),
            },
        ]
    }

    /// Payload of the resource at `uri`.
    pub fn payload(&self, uri: &str) -> Result<Value> {
        match uri {
            CONFIG_URI => Ok(self.api_config()),
            GENRES_URI => Ok(self.popular_genres()),
            USAGE_URI => Ok(usage_examples()),
            _ => Err(Error::UnknownResource(uri.to_string())),
        }
    }

    /// Read a resource as pretty-printed JSON text.
    pub fn read_resource(&self, uri: &str) -> Result<ResourceContent> {
        let text = serde_json::to_string_pretty(&self.payload(uri)?)?;
        Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: MIME_JSON.to_string(),
            text,
        })
    }

    fn api_config(&self) -> Value {
        json!({
            "api_name": "TMDb (The Movie Database)",
            "api_version": "3",
            "base_url": self.config.base_url,
            "image_base_url": self.config.image_base_url,
            "documentation": "https://developers.themoviedb.org/3",
            "rate_limits": {
                "requests_per_10_seconds": 40,
                "daily_limit": 1000000
            },
            "image_sizes": {
                "poster": POSTER_SIZES,
                "backdrop": BACKDROP_SIZES,
                "profile": PROFILE_SIZES
            },
            "setup_instructions": {
                "1": format!("Visit {}", SETUP_URL),
                "2": "Create a free account if you don't have one",
                "3": "Request an API key (choose Developer option)",
                "4": "Set the TMDB_API_KEY environment variable",
                "5": "Optionally configure INCLUDE_ADULT, DEFAULT_LANGUAGE, and API_TIMEOUT"
            },
            "environment_variables": {
                "TMDB_API_KEY": "Your TMDb API key (required)",
                "INCLUDE_ADULT": "Include adult content (default: false)",
                "DEFAULT_LANGUAGE": "Default language (default: en-US)",
                "API_TIMEOUT": "Request timeout in seconds (default: 10)"
            },
            "current_config": {
                "api_key_configured": self.config.api_key_configured(),
                "include_adult": self.config.include_adult,
                "default_language": self.config.language,
                "api_timeout": self.config.timeout
            }
        })
    }

    fn popular_genres(&self) -> Value {
        let genres = self.genres.snapshot();
        json!({
            "movies": genres.movies,
            "tv": genres.tv,
            "popular_movie_genre_ids": POPULAR_MOVIE_GENRE_IDS,
            "popular_tv_genre_ids": POPULAR_TV_GENRE_IDS,
            "genre_descriptions": {
                "28": "Action - High-energy films with physical stunts and chases",
                "12": "Adventure - Journey and exploration themed movies",
                "16": "Animation - Animated films and shows",
                "35": "Comedy - Humorous content designed to entertain",
                "80": "Crime - Stories involving criminal activities",
                "18": "Drama - Character-driven stories with emotional depth",
                "14": "Fantasy - Magical and supernatural elements",
                "27": "Horror - Scary and suspenseful content",
                "878": "Science Fiction - Futuristic and technological themes",
                "53": "Thriller - Suspenseful and tension-filled stories"
            }
        })
    }
}

fn usage_examples() -> Value {
    json!({
        "search_movies": {
            "description": "Search for movies by title with optional year filtering",
            "examples": [
                {
                    "request": {"query": "The Matrix", "year": 1999},
                    "description": "Search for The Matrix from 1999"
                },
                {
                    "request": {"query": "Avengers", "page": 2},
                    "description": "Search for Avengers movies, page 2"
                }
            ]
        },
        "search_tv_shows": {
            "description": "Search for TV shows by name with optional year filtering",
            "examples": [
                {
                    "request": {"query": "Breaking Bad"},
                    "description": "Search for Breaking Bad TV show"
                },
                {
                    "request": {"query": "Game of Thrones", "first_air_date_year": 2011},
                    "description": "Search for Game of Thrones from 2011"
                }
            ]
        },
        "get_movie_details": {
            "description": "Get detailed information about a specific movie",
            "examples": [
                {
                    "request": {"movie_id": 603},
                    "description": "Get details for The Matrix (ID: 603)"
                },
                {
                    "request": {"movie_id": 550},
                    "description": "Get details for Fight Club (ID: 550)"
                }
            ]
        },
        "get_tv_show_details": {
            "description": "Get detailed information about a specific TV show",
            "examples": [
                {
                    "request": {"tv_id": 1396},
                    "description": "Get details for Breaking Bad (ID: 1396)"
                },
                {
                    "request": {"tv_id": 1399},
                    "description": "Get details for Game of Thrones (ID: 1399)"
                }
            ]
        },
        "get_trending": {
            "description": "Get trending movies or TV shows",
            "examples": [
                {
                    "request": {"media_type": "movie", "time_window": "week"},
                    "description": "Get trending movies this week"
                },
                {
                    "request": {"media_type": "tv", "time_window": "day"},
                    "description": "Get trending TV shows today"
                }
            ]
        },
        "discover_content": {
            "description": "Discover content based on filters",
            "examples": [
                {
                    "request": {"content_type": "movie", "genre_id": 28, "sort_by": "vote_average.desc"},
                    "description": "Discover top-rated action movies"
                },
                {
                    "request": {"content_type": "tv", "year": 2023, "sort_by": "popularity.desc"},
                    "description": "Discover popular TV shows from 2023"
                }
            ]
        },
        "common_sort_options": [
            "popularity.desc", "popularity.asc",
            "vote_average.desc", "vote_average.asc",
            "release_date.desc", "release_date.asc",
            "revenue.desc", "revenue.asc"
        ],
        "troubleshooting": {
            "no_results": "Try different keywords, check spelling, or broaden search criteria",
            "invalid_api_key": format!("Verify your TMDb API key at {}", SETUP_URL),
            "rate_limit": format!("Wait 10 seconds between large batches ({})", RATE_LIMIT_HINT),
            "missing_images": "Some content may not have poster or backdrop images available",
            "timeout_errors": "Increase API_TIMEOUT environment variable if requests are timing out"
        }
    })
}
