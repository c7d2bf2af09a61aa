//! Banner feed decoding.
//!
//! The upstream endpoint returns `{"data": [{"id_banner", "title",
//! "attachment"}, ...]}`; each entry becomes one [`Slide`].

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

const INVALID_FORMAT: &str = "Invalid data format received from API";

#[derive(Debug, Clone, Deserialize)]
struct BannerData {
    id_banner: String,
    title: String,
    attachment: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Option<Value>,
}

/// View-model record handed to the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub image: String,
    pub destination_url: Option<String>,
}

impl From<BannerData> for Slide {
    fn from(item: BannerData) -> Self {
        Self {
            id: item.id_banner,
            title: item.title,
            image: item.attachment,
            destination_url: item.url.filter(|url| !url.is_empty()),
        }
    }
}

/// What the page should show for the current feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Loading,
    Failed(String),
    Empty,
    Ready(usize),
}

impl FeedStatus {
    pub fn from_result(result: &Result<Vec<Slide>, Error>) -> Self {
        match result {
            Ok(slides) if slides.is_empty() => Self::Empty,
            Ok(slides) => Self::Ready(slides.len()),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Decode a banner feed body into slides, preserving order.
///
/// # Errors
/// [`Error::Json`] for malformed JSON and [`Error::InvalidFeed`] when `data`
/// is missing or not an array.
pub fn parse_feed(body: &str) -> Result<Vec<Slide>, Error> {
    let response: ApiResponse = serde_json::from_str(body)?;
    let Some(Value::Array(items)) = response.data else {
        return Err(Error::InvalidFeed(INVALID_FORMAT.to_owned()));
    };
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value::<BannerData>(item)
                .map(Slide::from)
                .map_err(Error::from)
        })
        .collect()
}

/// Read and decode a banner feed from disk.
pub fn load_feed(path: impl AsRef<Path>) -> Result<Vec<Slide>, Error> {
    let body = std::fs::read_to_string(path)?;
    parse_feed(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_banner_fields_to_slide() {
        let slides = parse_feed(
            r#"{"data":[{"id_banner":"7","title":"Promo","attachment":"https://cdn/7.jpg","url":""}]}"#,
        )
        .unwrap();
        assert_eq!(
            slides,
            vec![Slide {
                id: "7".into(),
                title: "Promo".into(),
                image: "https://cdn/7.jpg".into(),
                destination_url: None,
            }]
        );
    }

    #[test]
    fn status_follows_result() {
        assert_eq!(FeedStatus::from_result(&Ok(Vec::new())), FeedStatus::Empty);
        let failed = FeedStatus::from_result(&parse_feed(r#"{"data":{}}"#));
        assert_eq!(failed, FeedStatus::Failed(INVALID_FORMAT.to_owned()));
    }
}
