//! Response shaping.
//!
//! Projects raw TMDb records into the output schema: image paths become URL
//! maps, genre ids gain resolved names, credits are truncated and bucketed.

use crate::core::genres::Genres;
use crate::core::images::{ImageKind, ImageUrls};
use crate::models::media::*;
use crate::models::tmdb::{
    CastMember, Company, Creator, CrewMember, GenreRef, MovieDetails, MovieItem, Season,
    TvDetails, TvItem,
};

/// Billed cast kept on movie details.
pub const MOVIE_CAST_LIMIT: usize = 10;
/// Billed cast kept on TV details.
pub const TV_CAST_LIMIT: usize = 15;

const TMDB_WEB_URL: &str = "https://www.themoviedb.org";

/// Crew bucket a job title can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrewRole {
    Director,
    Writer,
    Producer,
}

/// Keyword rules for crew bucketing, evaluated in order; first match wins.
///
/// This is a heuristic over free-text job titles. Synonyms not listed here
/// are dropped.
pub const CREW_RULES: [(&[&str], CrewRole); 3] = [
    (&["director"], CrewRole::Director),
    (&["writer", "screenplay", "story"], CrewRole::Writer),
    (&["producer"], CrewRole::Producer),
];

/// Classify a job title, case-insensitively.
pub fn classify_job(job: &str) -> Option<CrewRole> {
    let job = job.to_lowercase();
    CREW_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| job.contains(k)))
        .map(|(_, role)| *role)
}

/// Formatter bound to an image CDN base and a genre snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    image_base_url: &'a str,
    genres: &'a Genres,
}

impl<'a> Formatter<'a> {
    pub fn new(image_base_url: &'a str, genres: &'a Genres) -> Self {
        Self {
            image_base_url,
            genres,
        }
    }

    /// Expand an image path for `kind`.
    pub fn images(&self, path: Option<&str>, kind: ImageKind) -> ImageUrls {
        ImageUrls::build(self.image_base_url, path, kind)
    }

    pub fn movie(&self, movie: &MovieItem) -> FormattedMovie {
        let genre_ids = movie.genre_ids.clone().unwrap_or_default();
        FormattedMovie {
            id: movie.id,
            title: movie.title.clone(),
            original_title: movie.original_title.clone(),
            overview: movie.overview.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            popularity: movie.popularity,
            adult: movie.adult.unwrap_or(false),
            genres: self.genres.resolve_names(&genre_ids, MediaKind::Movie),
            genre_ids,
            poster_urls: self.images(movie.poster_path.as_deref(), ImageKind::Poster),
            backdrop_urls: self.images(movie.backdrop_path.as_deref(), ImageKind::Backdrop),
            tmdb_url: movie.id.map(|id| tmdb_url(MediaKind::Movie, id)),
        }
    }

    pub fn tv_show(&self, show: &TvItem) -> FormattedTvShow {
        let genre_ids = show.genre_ids.clone().unwrap_or_default();
        FormattedTvShow {
            id: show.id,
            name: show.name.clone(),
            original_name: show.original_name.clone(),
            overview: show.overview.clone(),
            first_air_date: show.first_air_date.clone(),
            vote_average: show.vote_average,
            vote_count: show.vote_count,
            popularity: show.popularity,
            origin_country: show.origin_country.clone().unwrap_or_default(),
            genres: self.genres.resolve_names(&genre_ids, MediaKind::Tv),
            genre_ids,
            poster_urls: self.images(show.poster_path.as_deref(), ImageKind::Poster),
            backdrop_urls: self.images(show.backdrop_path.as_deref(), ImageKind::Backdrop),
            tmdb_url: show.id.map(|id| tmdb_url(MediaKind::Tv, id)),
        }
    }

    pub fn cast_member(&self, actor: &CastMember) -> FormattedCast {
        FormattedCast {
            id: actor.id,
            name: actor.name.clone(),
            character: actor.character.clone(),
            profile_urls: self.images(actor.profile_path.as_deref(), ImageKind::Profile),
            order: actor.order,
        }
    }

    /// First `limit` cast members in billing order.
    pub fn cast(&self, cast: Option<&[CastMember]>, limit: usize) -> Vec<FormattedCast> {
        cast.unwrap_or_default()
            .iter()
            .take(limit)
            .map(|actor| self.cast_member(actor))
            .collect()
    }

    pub fn crew_member(&self, person: &CrewMember) -> FormattedCrew {
        FormattedCrew {
            id: person.id,
            name: person.name.clone(),
            job: person.job.clone(),
            profile_urls: self.images(person.profile_path.as_deref(), ImageKind::Profile),
        }
    }

    /// Bucket crew into directors, writers and producers. Other jobs are dropped.
    pub fn crew(&self, crew: Option<&[CrewMember]>) -> CrewBuckets {
        let mut buckets = CrewBuckets::default();
        for person in crew.unwrap_or_default() {
            let Some(role) = person.job.as_deref().and_then(classify_job) else {
                continue;
            };
            let member = self.crew_member(person);
            match role {
                CrewRole::Director => buckets.directors.push(member),
                CrewRole::Writer => buckets.writers.push(member),
                CrewRole::Producer => buckets.producers.push(member),
            }
        }
        buckets
    }

    pub fn creator(&self, creator: &Creator) -> FormattedCreator {
        FormattedCreator {
            id: creator.id,
            name: creator.name.clone(),
            profile_urls: self.images(creator.profile_path.as_deref(), ImageKind::Profile),
        }
    }

    pub fn season(&self, season: &Season) -> FormattedSeason {
        FormattedSeason {
            id: season.id,
            season_number: season.season_number,
            name: season.name.clone(),
            overview: season.overview.clone(),
            episode_count: season.episode_count,
            air_date: season.air_date.clone(),
            poster_urls: self.images(season.poster_path.as_deref(), ImageKind::Poster),
        }
    }

    pub fn movie_details(&self, movie_id: u64, details: &MovieDetails) -> MovieDetailsView {
        let credits = details.credits.as_ref();
        MovieDetailsView {
            success: true,
            id: details.id,
            title: details.title.clone(),
            original_title: details.original_title.clone(),
            tagline: details.tagline.clone(),
            overview: details.overview.clone(),
            release_date: details.release_date.clone(),
            runtime: details.runtime,
            status: details.status.clone(),
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            popularity: details.popularity,
            budget: details.budget,
            revenue: details.revenue,
            adult: details.adult.unwrap_or(false),
            genres: detail_genres(details.genres.as_deref()),
            production_companies: companies(details.production_companies.as_deref()),
            production_countries: details
                .production_countries
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            spoken_languages: details
                .spoken_languages
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|l| l.english_name.clone())
                .collect(),
            poster_urls: self.images(details.poster_path.as_deref(), ImageKind::Poster),
            backdrop_urls: self.images(details.backdrop_path.as_deref(), ImageKind::Backdrop),
            cast: self.cast(
                credits.and_then(|c| c.cast.as_deref()),
                MOVIE_CAST_LIMIT,
            ),
            crew: self.crew(credits.and_then(|c| c.crew.as_deref())),
            tmdb_url: tmdb_url(MediaKind::Movie, movie_id),
            imdb_id: details.imdb_id.clone(),
        }
    }

    pub fn tv_details(&self, tv_id: u64, details: &TvDetails) -> TvDetailsView {
        let credits = details.credits.as_ref();
        TvDetailsView {
            success: true,
            id: details.id,
            name: details.name.clone(),
            original_name: details.original_name.clone(),
            tagline: details.tagline.clone(),
            overview: details.overview.clone(),
            first_air_date: details.first_air_date.clone(),
            last_air_date: details.last_air_date.clone(),
            status: details.status.clone(),
            show_type: details.show_type.clone(),
            vote_average: details.vote_average,
            vote_count: details.vote_count,
            popularity: details.popularity,
            number_of_seasons: details.number_of_seasons,
            number_of_episodes: details.number_of_episodes,
            episode_run_time: details.episode_run_time.clone().unwrap_or_default(),
            in_production: details.in_production,
            origin_country: details.origin_country.clone().unwrap_or_default(),
            original_language: details.original_language.clone(),
            genres: detail_genres(details.genres.as_deref()),
            networks: companies(details.networks.as_deref()),
            production_companies: details
                .production_companies
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|pc| CompanyRef {
                    id: pc.id,
                    name: pc.name.clone(),
                })
                .collect(),
            poster_urls: self.images(details.poster_path.as_deref(), ImageKind::Poster),
            backdrop_urls: self.images(details.backdrop_path.as_deref(), ImageKind::Backdrop),
            cast: self.cast(credits.and_then(|c| c.cast.as_deref()), TV_CAST_LIMIT),
            creators: details
                .created_by
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|c| self.creator(c))
                .collect(),
            seasons: details
                .seasons
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|s| self.season(s))
                .collect(),
            tmdb_url: tmdb_url(MediaKind::Tv, tv_id),
        }
    }
}

/// Public TMDb page for a title.
pub fn tmdb_url(kind: MediaKind, id: u64) -> String {
    format!("{}/{}/{}", TMDB_WEB_URL, kind, id)
}

fn detail_genres(genres: Option<&[GenreRef]>) -> Vec<FormattedGenre> {
    genres
        .unwrap_or_default()
        .iter()
        .map(|g| FormattedGenre {
            id: g.id,
            name: g.name.clone(),
        })
        .collect()
}

fn companies(companies: Option<&[Company]>) -> Vec<FormattedCompany> {
    companies
        .unwrap_or_default()
        .iter()
        .map(|c| FormattedCompany {
            id: c.id,
            name: c.name.clone(),
            origin_country: c.origin_country.clone(),
        })
        .collect()
}
