//! Export configuration.

use chrono::{DateTime, Utc};

/// Default author written to document properties.
pub const DEFAULT_AUTHOR: &str = "deck";

/// Options controlling package metadata and the artifact name.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Document title for `docProps/core.xml`.
    title: Option<String>,

    /// Creator and last-modified-by for `docProps/core.xml`.
    author: String,

    /// Caller-supplied artifact filename.
    filename: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: DEFAULT_AUTHOR.to_string(),
            filename: None,
        }
    }
}

impl ExportOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title. Blank titles are ignored.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then(|| title.trim().to_string());
        self
    }

    /// Set the document author. Blank authors keep the default.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        if !author.trim().is_empty() {
            self.author = author.trim().to_string();
        }
        self
    }

    /// Set the artifact filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        self.filename = (!filename.trim().is_empty()).then(|| filename.trim().to_string());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Resolve the artifact filename for an export happening at `now`.
    ///
    /// Falls back to `presentation-YYYY-MM-DD.pptx`; a supplied name
    /// without the `.pptx` extension gets it appended.
    pub fn resolve_filename(&self, now: DateTime<Utc>) -> String {
        match &self.filename {
            Some(name) if name.to_ascii_lowercase().ends_with(".pptx") => name.clone(),
            Some(name) => format!("{}.pptx", name),
            None => default_filename(now),
        }
    }
}

/// `presentation-{YYYY-MM-DD}.pptx` for the UTC date of `now`.
pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("presentation-{}.pptx", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 1).unwrap()
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(
            ExportOptions::new().resolve_filename(at()),
            "presentation-2024-03-09.pptx"
        );
    }

    #[test]
    fn test_custom_filename() {
        let options = ExportOptions::new().with_filename("Quarterly Review");
        assert_eq!(options.resolve_filename(at()), "Quarterly Review.pptx");

        let options = ExportOptions::new().with_filename("deck.PPTX");
        assert_eq!(options.resolve_filename(at()), "deck.PPTX");

        let options = ExportOptions::new().with_filename("  ");
        assert_eq!(options.resolve_filename(at()), "presentation-2024-03-09.pptx");
    }

    #[test]
    fn test_title_and_author() {
        let options = ExportOptions::new();
        assert_eq!(options.title(), None);
        assert_eq!(options.author(), DEFAULT_AUTHOR);

        let options = ExportOptions::new().with_title(" Roadmap ").with_author("Dana");
        assert_eq!(options.title(), Some("Roadmap"));
        assert_eq!(options.author(), "Dana");

        let options = ExportOptions::new().with_author(" ");
        assert_eq!(options.author(), DEFAULT_AUTHOR);
    }
}
