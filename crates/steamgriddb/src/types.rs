//! API response types for SteamGridDB.

use serde::{Deserialize, Serialize};

/// A game search result from the SteamGridDB API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub verified: bool,
}

/// Grid image metadata from the SteamGridDB API. Only the fields the
/// catalog uses are kept; the rest of the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub id: i32,
    #[serde(default)]
    pub url: String,
}

/// Filters for grid queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFilters {
    /// e.g. `"600x900"`. Empty for any size.
    #[serde(default)]
    pub dimension: String,
    /// e.g. `"image/png"`. Empty for any format.
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub static_only: bool,
    #[serde(default)]
    pub allow_nsfw: bool,
    #[serde(default)]
    pub allow_humor: bool,
}

impl ImageFilters {
    /// Filters used for catalog cover art: portrait static grids, no NSFW
    /// or humor entries.
    pub fn cover_art() -> Self {
        Self {
            dimension: "600x900".into(),
            static_only: true,
            ..Default::default()
        }
    }
}

/// Result of resolving a game name to artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkMatch {
    /// Canonical title of the matched game.
    pub display_name: String,
    /// URL of the first grid image, if the game has any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// API response wrapper (internal).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[allow(dead_code)]
    pub success: bool,
    #[serde(default)]
    #[allow(dead_code)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_defaults() {
        let json = r#"{"id":1,"name":"Minimal"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert!(!result.verified);
        assert_eq!(result.name, "Minimal");
    }

    #[test]
    fn image_data_ignores_unknown_fields() {
        let json = r#"{
            "id": 100,
            "score": 5,
            "style": "alternate",
            "width": 600,
            "height": 900,
            "mime": "image/png",
            "language": "en",
            "url": "https://example.com/grid.png",
            "upvotes": 10
        }"#;
        let img: ImageData = serde_json::from_str(json).unwrap();
        assert_eq!(img.id, 100);
        assert_eq!(img.url, "https://example.com/grid.png");
    }

    #[test]
    fn cover_art_filters() {
        let f = ImageFilters::cover_art();
        assert_eq!(f.dimension, "600x900");
        assert!(f.static_only);
        assert!(!f.allow_nsfw);
        assert!(!f.allow_humor);
    }

    #[test]
    fn artwork_match_json() {
        let m = ArtworkMatch {
            display_name: "Celeste".into(),
            image_ref: None,
        };
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            r#"{"displayName":"Celeste"}"#
        );
    }

    #[test]
    fn api_response_with_errors() {
        let json = r#"{"success":false,"errors":["Unauthorized"],"data":[]}"#;
        let resp: ApiResponse<Vec<SearchResult>> = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.errors, vec!["Unauthorized"]);
    }
}
