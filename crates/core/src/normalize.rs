//! Slide normalization for export.
//!
//! Narrows the editor's slide model to what the PPTX package represents:
//! a solid background color, an optional title, and body paragraphs.
//! Bad fields are replaced with defaults rather than rejected.

use crate::types::{Background, ContentElement, Slide};
use regex::Regex;
use std::sync::LazyLock;

/// Matches a 6-digit RGB hex color with an optional leading `#`.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").unwrap());

/// Background used when a slide has none or an invalid one.
pub const DEFAULT_BACKGROUND: &str = "FFFFFF";

/// A slide reduced to its exportable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSlide {
    /// Six uppercase hex digits, no leading `#`.
    pub background: String,

    /// Trimmed, non-empty title.
    pub title: Option<String>,

    /// Trimmed, non-empty text of every text element, in content order.
    pub paragraphs: Vec<String>,
}

impl Default for NormalizedSlide {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            title: None,
            paragraphs: Vec::new(),
        }
    }
}

/// Number of slide parts a package holds for `len` input slides.
///
/// An empty deck still gets one slide so the package stays well-formed.
pub fn slide_count(len: usize) -> usize {
    len.max(1)
}

/// Normalize a background to `RRGGBB`, falling back to white.
pub fn normalize_background(background: Option<&Background>) -> String {
    background
        .and_then(Background::color)
        .and_then(|raw| HEX_COLOR_REGEX.captures(raw.trim()))
        .map(|caps| caps[1].to_ascii_uppercase())
        .unwrap_or_else(|| {
            if let Some(bg) = background {
                log::debug!("Invalid slide background {:?}, using {}", bg, DEFAULT_BACKGROUND);
            }
            DEFAULT_BACKGROUND.to_string()
        })
}

/// Normalizer from editor slides to exportable slides.
#[derive(Debug, Clone, Default)]
pub struct SlideNormalizer;

impl SlideNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a single slide.
    pub fn normalize_slide(&self, slide: &Slide) -> NormalizedSlide {
        let skipped = slide
            .content
            .iter()
            .filter(|element| !matches!(element, ContentElement::Text { .. }))
            .count();
        let paragraphs = slide
            .content
            .iter()
            .filter_map(ContentElement::as_text)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect();

        if skipped > 0 {
            log::debug!("Skipped {} non-text element(s) not represented in PPTX", skipped);
        }

        NormalizedSlide {
            background: normalize_background(slide.background.as_ref()),
            title: slide
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            paragraphs,
        }
    }

    /// Normalize a whole deck.
    ///
    /// The result always holds `slide_count(slides.len())` slides.
    pub fn normalize(&self, slides: &[Slide]) -> Vec<NormalizedSlide> {
        if slides.is_empty() {
            log::debug!("Empty deck, padding with one default slide");
            return vec![NormalizedSlide::default()];
        }

        slides.iter().map(|s| self.normalize_slide(s)).collect()
    }
}
