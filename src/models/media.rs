//! Formatted output records.
//!
//! Field order is part of the output contract: serde emits struct fields in
//! declaration order.

use crate::core::images::ImageUrls;
use serde::Serialize;

/// Media namespace used by trending, discover and the genre cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment and wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            _ => Err(()),
        }
    }
}

/// Trending time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl std::str::FromStr for TimeWindow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            _ => Err(()),
        }
    }
}

/// Movie as shown in search, trending and discover results.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedMovie {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub adult: bool,
    pub genre_ids: Vec<u64>,
    pub genres: Vec<String>,
    pub poster_urls: ImageUrls,
    pub backdrop_urls: ImageUrls,
    pub tmdb_url: Option<String>,
}

/// TV show as shown in search, trending and discover results.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedTvShow {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub origin_country: Vec<String>,
    pub genre_ids: Vec<u64>,
    pub genres: Vec<String>,
    pub poster_urls: ImageUrls,
    pub backdrop_urls: ImageUrls,
    pub tmdb_url: Option<String>,
}

/// Either kind of list result.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FormattedMedia {
    Movie(FormattedMovie),
    Tv(FormattedTvShow),
}

/// Billed cast member.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedCast {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_urls: ImageUrls,
    pub order: Option<u32>,
}

/// Crew member in one of the key-role buckets.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedCrew {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub job: Option<String>,
    pub profile_urls: ImageUrls,
}

/// Key crew roles of a movie.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrewBuckets {
    pub directors: Vec<FormattedCrew>,
    pub writers: Vec<FormattedCrew>,
    pub producers: Vec<FormattedCrew>,
}

/// Series creator.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedCreator {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub profile_urls: ImageUrls,
}

/// Season summary.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedSeason {
    pub id: Option<u64>,
    pub season_number: Option<u32>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub episode_count: Option<u32>,
    pub air_date: Option<String>,
    pub poster_urls: ImageUrls,
}

/// Production company or network, with its country.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedCompany {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub origin_country: Option<String>,
}

/// Production company without country (TV details).
#[derive(Debug, Clone, Serialize)]
pub struct CompanyRef {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Genre as listed on a detail record.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedGenre {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Full movie record returned by `get_movie_details`.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetailsView {
    pub success: bool,
    pub id: Option<u64>,
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
    pub adult: bool,
    pub genres: Vec<FormattedGenre>,
    pub production_companies: Vec<FormattedCompany>,
    pub production_countries: Vec<Option<String>>,
    pub spoken_languages: Vec<Option<String>>,
    pub poster_urls: ImageUrls,
    pub backdrop_urls: ImageUrls,
    pub cast: Vec<FormattedCast>,
    pub crew: CrewBuckets,
    pub tmdb_url: String,
    pub imdb_id: Option<String>,
}

/// Full TV record returned by `get_tv_show_details`.
#[derive(Debug, Clone, Serialize)]
pub struct TvDetailsView {
    pub success: bool,
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
    pub episode_run_time: Vec<u32>,
    pub in_production: Option<bool>,
    pub origin_country: Vec<String>,
    pub original_language: Option<String>,
    pub genres: Vec<FormattedGenre>,
    pub networks: Vec<FormattedCompany>,
    pub production_companies: Vec<CompanyRef>,
    pub poster_urls: ImageUrls,
    pub backdrop_urls: ImageUrls,
    pub cast: Vec<FormattedCast>,
    pub creators: Vec<FormattedCreator>,
    pub seasons: Vec<FormattedSeason>,
    pub tmdb_url: String,
}
