//! PPTX package assembly.
//!
//! Orders the XML parts, hands them to the ZIP writer, and drives delivery
//! through an injected [`PackageSink`].

use crate::archive::{build_archive, ArchiveEntry};
use crate::sink::PackageSink;
use crate::xml;
use chrono::{DateTime, Utc};
use deck_core::{ExportOptions, NormalizedSlide, Result, Slide, SlideNormalizer};

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const ROOT_RELS_PART: &str = "_rels/.rels";
pub const APP_PART: &str = "docProps/app.xml";
pub const CORE_PART: &str = "docProps/core.xml";
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";
pub const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
pub const THEME_PART: &str = "ppt/theme/theme1.xml";

/// Parts every package carries besides the slides.
pub const FIXED_PART_COUNT: usize = 7;

/// A finished `.pptx` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    filename: String,
    bytes: Vec<u8>,
}

impl Package {
    /// MIME type of a PowerPoint presentation.
    pub const MIME_TYPE: &'static str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation";

    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Builds packages from editor slides.
#[derive(Debug, Clone, Default)]
pub struct PackageBuilder {
    options: ExportOptions,
    normalizer: SlideNormalizer,
}

impl PackageBuilder {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            normalizer: SlideNormalizer::new(),
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Archive entries for already-normalized slides, in package order.
    ///
    /// `slides` must be non-empty; [`SlideNormalizer::normalize`] guarantees it.
    pub fn entries(&self, slides: &[NormalizedSlide], timestamp: DateTime<Utc>) -> Vec<ArchiveEntry> {
        let count = slides.len();

        let mut entries = Vec::with_capacity(FIXED_PART_COUNT + count);
        entries.push(ArchiveEntry::new(CONTENT_TYPES_PART, xml::content_types_xml(count)));
        entries.push(ArchiveEntry::new(ROOT_RELS_PART, xml::root_rels_xml()));
        entries.push(ArchiveEntry::new(APP_PART, xml::app_xml(slides)));
        entries.push(ArchiveEntry::new(CORE_PART, xml::core_xml(&self.options, timestamp)));
        entries.push(ArchiveEntry::new(PRESENTATION_PART, xml::presentation_xml(count)));
        entries.push(ArchiveEntry::new(
            PRESENTATION_RELS_PART,
            xml::presentation_rels_xml(count),
        ));
        entries.push(ArchiveEntry::new(THEME_PART, xml::theme_xml()));
        entries.extend(
            slides
                .iter()
                .enumerate()
                .map(|(i, slide)| ArchiveEntry::new(xml::slide_part_name(i + 1), xml::slide_xml(slide, i))),
        );
        entries
    }

    /// Build a package stamped with the current time.
    pub fn build(&self, slides: &[Slide]) -> Result<Package> {
        self.build_at(slides, Utc::now())
    }

    /// Build a package as if exported at `now`.
    pub fn build_at(&self, slides: &[Slide], now: DateTime<Utc>) -> Result<Package> {
        let normalized = self.normalizer.normalize(slides);
        let entries = self.entries(&normalized, now);
        let bytes = build_archive(&entries)?;
        let filename = self.options.resolve_filename(now);

        log::info!(
            "Built {} ({} slides, {} parts, {} bytes)",
            filename,
            normalized.len(),
            entries.len(),
            bytes.len()
        );

        Ok(Package { filename, bytes })
    }
}

/// Builds packages and hands them to a sink.
#[derive(Debug)]
pub struct Exporter<S: PackageSink> {
    builder: PackageBuilder,
    sink: S,
}

impl<S: PackageSink> Exporter<S> {
    pub fn new(options: ExportOptions, sink: S) -> Self {
        Self {
            builder: PackageBuilder::new(options),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Export the deck, stamped with the current time.
    pub fn export(&mut self, slides: &[Slide]) -> Result<()> {
        self.export_at(slides, Utc::now())
    }

    /// Export the deck as if at `now`.
    ///
    /// The sink is checked before any XML is generated; a failure there
    /// means nothing was built.
    pub fn export_at(&mut self, slides: &[Slide], now: DateTime<Utc>) -> Result<()> {
        self.sink.ensure_ready()?;
        let package = self.builder.build_at(slides, now)?;
        self.sink.deliver(&package)?;
        log::debug!("Delivered {}", package.filename());
        Ok(())
    }
}

/// Export `slides` into `sink` with the given options.
pub fn export<S: PackageSink>(slides: &[Slide], options: ExportOptions, sink: S) -> Result<()> {
    Exporter::new(options, sink).export(slides)
}
