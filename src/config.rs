use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::player::platform;

/// Id of the optional `<script type="application/json">` block in
/// `index.html` that overrides the demo page defaults.
pub const CONFIG_ELEMENT_ID: &str = "player-config";

const DEFAULT_SRC: &str =
    "https://dockerblobklarifaibbsr.blob.core.windows.net/uploadfiles/1409899-uhd_3840_2160_25fps.mp4";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
    pub src: String,
    pub poster: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Advanced Video Player".to_string(),
            subtitle: "A video player with custom controls, keyboard shortcuts and auto-hiding overlay."
                .to_string(),
            src: DEFAULT_SRC.to_string(),
            poster: Some("placeholder.svg".to_string()),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, PlayerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the embedded config block. Absent block means defaults;
    /// a malformed one is logged and also falls back to defaults.
    pub fn load() -> Self {
        let text = platform::document()
            .ok()
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Self::default();
        };
        Self::from_json(&text).unwrap_or_else(|err| {
            warn!("{err}; using default page config");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PageConfig::from_json(r#"{ "src": "movie.webm" }"#).unwrap();
        assert_eq!(config.src, "movie.webm");
        assert_eq!(config.title, PageConfig::default().title);
        assert_eq!(config.poster.as_deref(), Some("placeholder.svg"));
    }

    #[test]
    fn poster_can_be_cleared() {
        let config = PageConfig::from_json(r#"{ "poster": null }"#).unwrap();
        assert_eq!(config.poster, None);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PageConfig::from_json("{ src: ").unwrap_err();
        assert!(matches!(err, PlayerError::Config(_)));
    }
}
