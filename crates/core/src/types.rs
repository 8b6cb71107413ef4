//! Domain types for the editor's slide model.
//!
//! These mirror the JSON snapshot the editor hands over at export time. They
//! are deliberately lenient: a malformed field deserializes to "absent" rather
//! than failing the whole deck, and the normalizer substitutes defaults.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single slide as authored in the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Opaque editor identifier (string or number). Not used by the export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Optional slide title.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Background fill, either a hex string or an object with a `color` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,

    /// Positioned content elements, in z-order.
    #[serde(default, deserialize_with = "lenient_content")]
    pub content: Vec<ContentElement>,
}

impl Slide {
    /// Create an empty slide with no background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slide title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the background to a color string.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(Background::Color(color.into()));
        self
    }

    /// Append a text element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(ContentElement::text(text));
        self
    }

    /// Append an arbitrary content element.
    pub fn with_element(mut self, element: ContentElement) -> Self {
        self.content.push(element);
        self
    }
}

/// Slide background as the editor stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Background {
    /// `"#1a2b3c"` style color string.
    Color(String),

    /// `{ "color": "#1a2b3c", ... }` style fill object.
    Fill {
        #[serde(default, deserialize_with = "lenient_string")]
        color: Option<String>,
    },

    /// Anything else. Kept so that bad input never fails deserialization.
    Other(Value),
}

impl Background {
    /// The raw color string, if the background carries one.
    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Color(color) => Some(color),
            Self::Fill { color } => color.as_deref(),
            Self::Other(_) => None,
        }
    }
}

/// A content element placed on a slide.
///
/// Only text participates in the PPTX export; the other variants exist so
/// that a full editor snapshot deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentElement {
    /// A text box.
    Text {
        #[serde(default, deserialize_with = "lenient_string")]
        text: Option<String>,
    },
    /// A vector shape.
    Shape,
    /// A raster image.
    Image,
    /// A chart.
    Chart,
    /// A table.
    Table,
    /// Any element type this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl ContentElement {
    /// Create a text element.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: Some(text.into()),
        }
    }

    /// The raw text of a text element.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => text.as_deref(),
            _ => None,
        }
    }

    /// Short name of the element type, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Shape => "shape",
            Self::Image => "image",
            Self::Chart => "chart",
            Self::Table => "table",
            Self::Unknown => "unknown",
        }
    }
}

/// Accept any JSON value, keeping it only if it is a string.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Accept any JSON value as a content list.
///
/// A missing or non-array value is an empty list, and an element that does
/// not parse becomes [`ContentElement::Unknown`].
fn lenient_content<'de, D>(deserializer: D) -> std::result::Result<Vec<ContentElement>, D::Error>
where
    D: Deserializer<'de>,
{
    let elements = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(elements)) => elements,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(other) => {
            log::debug!("Ignoring non-array slide content {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(elements
        .into_iter()
        .map(|value| {
            serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                log::debug!("Unreadable content element {} ({}), skipping", value, e);
                ContentElement::Unknown
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_editor_snapshot() {
        let json = r##"[
            {"id": "a1", "title": "Intro", "background": "#111111",
             "content": [{"type": "text", "text": "Hello", "x": 10, "y": 20}]},
            {"id": 2, "background": {"color": "#ffffff", "gradient": null},
             "content": [{"type": "image", "src": "data:..."}, {"type": "chart", "series": []}]},
            {"background": 42, "content": [{"type": "text", "text": 7}, {"type": "sticker"}]}
        ]"##;

        let slides: Vec<Slide> = serde_json::from_str(json).unwrap();
        assert_eq!(slides.len(), 3);

        assert_eq!(slides[0].title.as_deref(), Some("Intro"));
        assert_eq!(slides[0].background.as_ref().unwrap().color(), Some("#111111"));
        assert_eq!(slides[0].content[0].as_text(), Some("Hello"));

        assert_eq!(slides[1].background.as_ref().unwrap().color(), Some("#ffffff"));
        assert_eq!(slides[1].content[0], ContentElement::Image);
        assert_eq!(slides[1].content[1], ContentElement::Chart);

        assert_eq!(slides[2].background.as_ref().unwrap().color(), None);
        assert_eq!(slides[2].content[0], ContentElement::Text { text: None });
        assert_eq!(slides[2].content[1], ContentElement::Unknown);
    }

    #[test]
    fn test_element_without_type_is_unknown() {
        let slide: Slide = serde_json::from_str(
            r#"{"content": [{"text": "orphan"}, {"type": "text", "text": "kept"}]}"#,
        )
        .unwrap();
        assert_eq!(slide.content, vec![ContentElement::Unknown, ContentElement::text("kept")]);
    }

    #[test]
    fn test_element_with_non_string_type_is_unknown() {
        let slide: Slide =
            serde_json::from_str(r#"{"content": [{"type": 7}, 3, null, {"type": "shape"}]}"#).unwrap();
        assert_eq!(
            slide.content,
            vec![
                ContentElement::Unknown,
                ContentElement::Unknown,
                ContentElement::Unknown,
                ContentElement::Shape
            ]
        );
    }

    #[test]
    fn test_null_or_non_array_content_is_empty() {
        let slides: Vec<Slide> = serde_json::from_str(
            r##"[{"background": "#000000", "content": null}, {"content": "text"}, {"content": {"type": "text"}}]"##,
        )
        .unwrap();
        assert_eq!(slides.len(), 3);
        assert!(slides.iter().all(|s| s.content.is_empty()));
        assert_eq!(slides[0].background.as_ref().unwrap().color(), Some("#000000"));
    }

    #[test]
    fn test_missing_fields_default() {
        let slide: Slide = serde_json::from_str("{}").unwrap();
        assert!(slide.title.is_none());
        assert!(slide.background.is_none());
        assert!(slide.content.is_empty());
    }

    #[test]
    fn test_builder_helpers() {
        let slide = Slide::new()
            .with_title("T")
            .with_background("#abcdef")
            .with_text("one")
            .with_element(ContentElement::Table);

        assert_eq!(slide.content.len(), 2);
        assert_eq!(slide.content[0].kind(), "text");
        assert_eq!(slide.content[1].kind(), "table");
        assert_eq!(slide.background, Some(Background::Color("#abcdef".into())));
    }
}
