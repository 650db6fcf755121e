//! Image URL expansion.
//!
//! TMDb serves every image at a fixed set of sizes per category. A record
//! carries only the path fragment; we expand it into one URL per size.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Image category, each with its own fixed size set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
}

pub const POSTER_SIZES: [&str; 7] = ["w92", "w154", "w185", "w342", "w500", "w780", "original"];
pub const BACKDROP_SIZES: [&str; 4] = ["w300", "w780", "w1280", "original"];
pub const PROFILE_SIZES: [&str; 4] = ["w45", "w185", "h632", "original"];

impl ImageKind {
    /// Size tokens available for this category, smallest first.
    pub fn sizes(&self) -> &'static [&'static str] {
        match self {
            ImageKind::Poster => &POSTER_SIZES,
            ImageKind::Backdrop => &BACKDROP_SIZES,
            ImageKind::Profile => &PROFILE_SIZES,
        }
    }
}

/// Size token to URL map, serialized as a JSON object in size order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls(Vec<(&'static str, Option<String>)>);

impl ImageUrls {
    /// Expand `path` into one URL per size of `kind`.
    ///
    /// A missing or empty path yields every size key with a `None` value.
    pub fn build(base_url: &str, path: Option<&str>, kind: ImageKind) -> Self {
        let path = path.filter(|p| !p.is_empty());
        let urls = kind
            .sizes()
            .iter()
            .map(|size| (*size, path.map(|p| format!("{}{}{}", base_url, size, p))))
            .collect();
        Self(urls)
    }

    /// URL for a size token, `None` if absent or unknown.
    pub fn get(&self, size: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(s, _)| *s == size)
            .and_then(|(_, url)| url.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sizes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(s, _)| *s)
    }

    /// Whether every size has a URL.
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|(_, url)| url.is_some())
    }
}

impl Serialize for ImageUrls {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (size, url) in &self.0 {
            map.serialize_entry(size, url)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://image.tmdb.org/t/p/";

    #[test]
    fn test_absent_path_keeps_every_size() {
        for kind in [ImageKind::Poster, ImageKind::Backdrop, ImageKind::Profile] {
            let urls = ImageUrls::build(BASE, None, kind);
            assert_eq!(urls.len(), kind.sizes().len());
            assert!(urls.sizes().eq(kind.sizes().iter().copied()));
            assert!(kind.sizes().iter().all(|s| urls.get(s).is_none()));
        }
    }

    #[test]
    fn test_present_path_expands_every_size() {
        let urls = ImageUrls::build(BASE, Some("/abc.jpg"), ImageKind::Backdrop);
        assert!(urls.is_complete());
        assert_eq!(
            urls.get("w1280"),
            Some("https://image.tmdb.org/t/p/w1280/abc.jpg")
        );
        assert_eq!(urls.get("w92"), None);
    }

    #[test]
    fn test_empty_path_is_absent() {
        let urls = ImageUrls::build(BASE, Some(""), ImageKind::Profile);
        assert_eq!(urls.len(), 4);
        assert!(!urls.is_complete());
        assert_eq!(urls.get("h632"), None);
    }

    #[test]
    fn test_serializes_in_size_order() {
        let urls = ImageUrls::build(BASE, None, ImageKind::Profile);
        let json = serde_json::to_string(&urls).unwrap();
        assert_eq!(
            json,
            r#"{"w45":null,"w185":null,"h632":null,"original":null}"#
        );
    }
}
