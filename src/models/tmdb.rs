//! Raw TMDb response records.
//!
//! Upstream payloads are not under our control, so every field is optional
//! and absent or `null` values decode to `None`.

use serde::{Deserialize, Serialize};

/// A page of search, trending or discover results.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Page<T> {
    pub page: Option<u32>,
    pub results: Option<Vec<T>>,
    pub total_results: Option<u64>,
    pub total_pages: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: None,
            results: None,
            total_results: None,
            total_pages: None,
        }
    }
}

impl<T> Page<T> {
    /// The result items, empty when the field was missing.
    pub fn items(&self) -> &[T] {
        self.results.as_deref().unwrap_or_default()
    }
}

/// Movie as returned by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieItem {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub adult: Option<bool>,
    pub genre_ids: Option<Vec<u64>>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// TV show as returned by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TvItem {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub origin_country: Option<Vec<String>>,
    pub genre_ids: Option<Vec<u64>>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// A complete genre entry as held by the genre cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Genre reference as sent upstream; either field may be missing or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenreRef {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Response of `/genre/{movie,tv}/list`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenreList {
    pub genres: Option<Vec<GenreRef>>,
}

impl GenreList {
    /// Entries that carry both an id and a name. Incomplete ones are dropped.
    pub fn into_genres(self) -> Vec<Genre> {
        self.genres
            .unwrap_or_default()
            .into_iter()
            .filter_map(|g| match (g.id, g.name) {
                (Some(id), Some(name)) => Some(Genre { id, name }),
                _ => None,
            })
            .collect()
    }
}

/// Movie details with appended credits.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieDetails {
    pub id: Option<u64>,
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub status: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub adult: Option<bool>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Option<Vec<GenreRef>>,
    pub production_companies: Option<Vec<Company>>,
    pub production_countries: Option<Vec<Country>>,
    pub spoken_languages: Option<Vec<SpokenLanguage>>,
    pub credits: Option<Credits>,
}

/// TV show details with appended credits.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TvDetails {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub show_type: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub episode_run_time: Option<Vec<u32>>,
    pub in_production: Option<bool>,
    pub origin_country: Option<Vec<String>>,
    pub original_language: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Option<Vec<GenreRef>>,
    pub networks: Option<Vec<Company>>,
    pub production_companies: Option<Vec<Company>>,
    pub created_by: Option<Vec<Creator>>,
    pub seasons: Option<Vec<Season>>,
    pub credits: Option<Credits>,
}

/// Production company or network.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Company {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub origin_country: Option<String>,
}

/// Production country.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Country {
    pub iso_3166_1: Option<String>,
    pub name: Option<String>,
}

/// Spoken language.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpokenLanguage {
    pub iso_639_1: Option<String>,
    pub english_name: Option<String>,
}

/// Movie/TV credits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credits {
    pub cast: Option<Vec<CastMember>>,
    pub crew: Option<Vec<CrewMember>>,
}

/// Cast member.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CastMember {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
}

/// Crew member.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrewMember {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

/// Series creator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Creator {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub profile_path: Option<String>,
}

/// Season summary on a TV detail record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Season {
    pub id: Option<u64>,
    pub season_number: Option<u32>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub episode_count: Option<u32>,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_genre_list_skips_incomplete_entries() {
        let list: GenreList = serde_json::from_value(json!({
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 99, "name": null},
                {"id": null, "name": "Orphan"}
            ]
        }))
        .unwrap();

        assert_eq!(
            list.into_genres(),
            vec![Genre {
                id: 28,
                name: "Action".to_string()
            }]
        );
    }

    #[test]
    fn test_null_fields_decode_to_none() {
        let movie: MovieItem = serde_json::from_value(json!({
            "id": 603,
            "title": null,
            "genre_ids": null,
            "vote_average": null
        }))
        .unwrap();

        assert_eq!(movie.id, Some(603));
        assert!(movie.title.is_none());
        assert!(movie.genre_ids.is_none());
        assert!(movie.vote_average.is_none());
    }

    #[test]
    fn test_null_genre_list_is_empty() {
        let list: GenreList = serde_json::from_value(json!({"genres": null})).unwrap();
        assert!(list.into_genres().is_empty());
    }
}
