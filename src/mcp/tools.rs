//! Tool definitions and dispatch.

use crate::core::handlers::{
    validation_error, DiscoverArgs, MovieDetailsArgs, SearchMoviesArgs, SearchTvShowsArgs,
    ToolHandlers, TrendingArgs, TvDetailsArgs,
};
use crate::mcp::protocol::Tool;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub const TOOL_NAMES: [&str; 6] = [
    "search_movies",
    "search_tv_shows",
    "get_movie_details",
    "get_tv_show_details",
    "get_trending",
    "discover_content",
];

/// Definitions advertised by `tools/list`, in a stable order.
pub fn definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: "search_movies".to_string(),
            description: "Search for movies by title with optional year filtering. Returns titles, \
                          release dates, overviews, ratings and image URLs."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Movie title to search for"
                    },
                    "year": {
                        "type": "integer",
                        "description": "Release year to filter by"
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number for pagination",
                        "default": 1,
                        "minimum": 1
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "search_tv_shows".to_string(),
            description: "Search for TV shows by name with optional year filtering. Returns names, \
                          air dates, overviews, ratings and image URLs."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "TV show name to search for"
                    },
                    "first_air_date_year": {
                        "type": "integer",
                        "description": "First air date year to filter by"
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number for pagination",
                        "default": 1,
                        "minimum": 1
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "get_movie_details".to_string(),
            description: "Get detailed information about a movie including cast, crew, genres, \
                          runtime, budget and revenue."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "movie_id": {
                        "type": "integer",
                        "description": "TMDb movie ID"
                    }
                },
                "required": ["movie_id"]
            }),
        },
        Tool {
            name: "get_tv_show_details".to_string(),
            description: "Get detailed information about a TV show including cast, seasons, \
                          networks and creators."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "tv_id": {
                        "type": "integer",
                        "description": "TMDb TV show ID"
                    }
                },
                "required": ["tv_id"]
            }),
        },
        Tool {
            name: "get_trending".to_string(),
            description: "Get trending movies or TV shows for the day or the week.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "media_type": {
                        "type": "string",
                        "description": "Type of media",
                        "enum": ["movie", "tv"]
                    },
                    "time_window": {
                        "type": "string",
                        "description": "Time window",
                        "enum": ["day", "week"],
                        "default": "day"
                    }
                },
                "required": ["media_type"]
            }),
        },
        Tool {
            name: "discover_content".to_string(),
            description: "Discover movies or TV shows by genre, year and sort order.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "content_type": {
                        "type": "string",
                        "description": "Type of content",
                        "enum": ["movie", "tv"]
                    },
                    "genre_id": {
                        "type": "integer",
                        "description": "Genre ID to filter by"
                    },
                    "year": {
                        "type": "integer",
                        "description": "Release year for movies, first air date year for TV"
                    },
                    "sort_by": {
                        "type": "string",
                        "description": "Sort order",
                        "default": "popularity.desc"
                    }
                },
                "required": ["content_type"]
            }),
        },
    ]
}

/// Run a tool by name. Returns `None` for an unknown tool.
///
/// Malformed arguments produce a `success: false` envelope rather than a
/// protocol error, the same as any other handler failure.
pub async fn call_tool(handlers: &ToolHandlers, name: &str, arguments: Value) -> Option<Value> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other,
    };

    let envelope = match name {
        "search_movies" => match parse_args::<SearchMoviesArgs>(name, arguments) {
            Ok(args) => handlers.search_movies(args).await,
            Err(envelope) => envelope,
        },
        "search_tv_shows" => match parse_args::<SearchTvShowsArgs>(name, arguments) {
            Ok(args) => handlers.search_tv_shows(args).await,
            Err(envelope) => envelope,
        },
        "get_movie_details" => match parse_args::<MovieDetailsArgs>(name, arguments) {
            Ok(args) => handlers.get_movie_details(args).await,
            Err(envelope) => envelope,
        },
        "get_tv_show_details" => match parse_args::<TvDetailsArgs>(name, arguments) {
            Ok(args) => handlers.get_tv_show_details(args).await,
            Err(envelope) => envelope,
        },
        "get_trending" => match parse_args::<TrendingArgs>(name, arguments) {
            Ok(args) => handlers.get_trending(args).await,
            Err(envelope) => envelope,
        },
        "discover_content" => match parse_args::<DiscoverArgs>(name, arguments) {
            Ok(args) => handlers.discover_content(args).await,
            Err(envelope) => envelope,
        },
        _ => return None,
    };

    Some(envelope)
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, Value> {
    serde_json::from_value(arguments).map_err(|e| {
        tracing::debug!("Rejected arguments for {}: {}", tool, e);
        validation_error(format!("Invalid arguments for {}: {}", tool, e))
    })
}
