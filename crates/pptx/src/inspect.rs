//! Reads a produced package back and checks its cross-references.

use crate::package::{CONTENT_TYPES_PART, PRESENTATION_PART, PRESENTATION_RELS_PART};
use crate::xml::{FIRST_SLIDE_ID, REL_SLIDE, REL_THEME};
use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashSet;
use std::io::{Cursor, Read, Seek};
use zip::{CompressionMethod, ZipArchive};

/// One archive entry as seen by a ZIP reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub crc32: u32,
    pub size: u64,
    pub stored: bool,
}

/// A `p:sldId` element of the presentation part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideIdRef {
    pub id: u32,
    pub rel_id: String,
}

/// A `Relationship` element of a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// Text and background of one slide part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideSummary {
    pub part: String,
    pub background: Option<String>,
    pub paragraphs: Vec<String>,
}

/// Everything the integrity check needs from a package.
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Entries in archive order.
    pub entries: Vec<EntryInfo>,
    /// `PartName`s of every `Override` in `[Content_Types].xml`.
    pub overrides: Vec<String>,
    /// Slide list of `ppt/presentation.xml`, in order.
    pub slide_ids: Vec<SlideIdRef>,
    /// Relationships of `ppt/presentation.xml`, in document order.
    pub relationships: Vec<Relationship>,
    /// Slides in presentation order.
    pub slides: Vec<SlideSummary>,
}

impl PackageReport {
    /// Read a package from memory.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Read a package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let entries = read_entries(&mut archive)?;
        let overrides = parse_overrides(&read_part(&mut archive, CONTENT_TYPES_PART)?)?;
        let slide_ids = parse_slide_ids(&read_part(&mut archive, PRESENTATION_PART)?)?;
        let relationships = parse_relationships(&read_part(&mut archive, PRESENTATION_RELS_PART)?)?;

        let mut slides = Vec::with_capacity(slide_ids.len());
        for slide_id in &slide_ids {
            let target = relationships
                .iter()
                .find(|r| r.id == slide_id.rel_id)
                .map(|r| resolve_target(&r.target));
            // Dangling references are reported by `check_integrity`.
            if let Some(part) = target.filter(|p| entries.iter().any(|e| &e.name == p)) {
                let content = read_part(&mut archive, &part)?;
                slides.push(parse_slide(&part, &content)?);
            }
        }

        Ok(Self {
            entries,
            overrides,
            slide_ids,
            relationships,
            slides,
        })
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn has_entry(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Check the package's cross-references, returning the first violation.
    pub fn check_integrity(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::Integrity(msg));

        match self.entries.first() {
            Some(first) if first.name == CONTENT_TYPES_PART => {}
            Some(first) => return fail(format!("first entry is '{}', not {}", first.name, CONTENT_TYPES_PART)),
            None => return fail("package is empty".to_string()),
        }

        if let Some(entry) = self.entries.iter().find(|e| !e.stored) {
            return fail(format!("entry '{}' is not stored", entry.name));
        }
        if let Some(entry) = self.entries.iter().find(|e| e.name.contains('\\')) {
            return fail(format!("entry '{}' uses backslashes", entry.name));
        }

        if self.slide_ids.is_empty() {
            return fail("presentation lists no slides".to_string());
        }

        let mut seen_ids = HashSet::new();
        for (i, slide_id) in self.slide_ids.iter().enumerate() {
            let expected = format!("rId{}", i + 1);
            if slide_id.rel_id != expected {
                return fail(format!(
                    "slide {} references {}, expected {}",
                    i + 1,
                    slide_id.rel_id,
                    expected
                ));
            }
            if (slide_id.id as usize) < FIRST_SLIDE_ID || !seen_ids.insert(slide_id.id) {
                return fail(format!("slide id {} is reserved or duplicated", slide_id.id));
            }

            let rel = match self.relationships.iter().find(|r| r.id == slide_id.rel_id) {
                Some(rel) => rel,
                None => return fail(format!("{} has no relationship", slide_id.rel_id)),
            };
            if rel.rel_type != REL_SLIDE {
                return fail(format!("{} is not a slide relationship", rel.id));
            }

            let part = resolve_target(&rel.target);
            if !self.has_entry(&part) {
                return fail(format!("{} targets missing part {}", rel.id, part));
            }
            if !self.overrides.iter().any(|o| o.trim_start_matches('/') == part) {
                return fail(format!("{} has no content type override", part));
            }
        }

        let slide_rels = self
            .relationships
            .iter()
            .filter(|r| r.rel_type == REL_SLIDE)
            .count();
        if slide_rels != self.slide_ids.len() {
            return fail(format!(
                "{} slide relationships for {} slides",
                slide_rels,
                self.slide_ids.len()
            ));
        }

        let theme_id = format!("rId{}", self.slide_ids.len() + 1);
        match self.relationships.iter().find(|r| r.id == theme_id) {
            Some(rel) if rel.rel_type == REL_THEME && self.has_entry(&resolve_target(&rel.target)) => {}
            _ => return fail(format!("{} does not point at the theme", theme_id)),
        }

        if let Some(missing) = self
            .overrides
            .iter()
            .find(|o| !self.has_entry(o.trim_start_matches('/')))
        {
            return fail(format!("override for missing part {}", missing));
        }

        Ok(())
    }
}

/// List entries and read each one fully, which verifies its CRC-32.
fn read_entries<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<EntryInfo>> {
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::ZipError(format!("Failed to open entry {}: {}", i, e)))?;

        let mut sink = Vec::new();
        file.read_to_end(&mut sink)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", file.name(), e)))?;

        entries.push(EntryInfo {
            name: file.name().to_string(),
            crc32: file.crc32(),
            size: file.size(),
            stored: file.compression() == CompressionMethod::Stored,
        });
    }
    Ok(entries)
}

/// Read a part from the ZIP archive as text.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Resolve a presentation relationship target to an archive path.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Value of the attribute named exactly `key` (prefix included).
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn xml_error(part: &str, e: quick_xml::Error) -> Error {
    Error::XmlError(format!("Error parsing {}: {}", part, e))
}

fn parse_overrides(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut overrides = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"Override" => {
                if let Some(part) = attribute(e, b"PartName") {
                    overrides.push(part);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(CONTENT_TYPES_PART, e)),
            _ => {}
        }
    }
    Ok(overrides)
}

fn parse_slide_ids(xml: &str) -> Result<Vec<SlideIdRef>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"sldId" => {
                let id = attribute(e, b"id").and_then(|v| v.parse().ok());
                let rel_id = attribute(e, b"r:id");
                match (id, rel_id) {
                    (Some(id), Some(rel_id)) => ids.push(SlideIdRef { id, rel_id }),
                    _ => {
                        return Err(Error::Integrity(
                            "p:sldId without numeric id and r:id".to_string(),
                        ))
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(PRESENTATION_PART, e)),
            _ => {}
        }
    }
    Ok(ids)
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut relationships = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"Relationship" => {
                relationships.push(Relationship {
                    id: attribute(e, b"Id").unwrap_or_default(),
                    rel_type: attribute(e, b"Type").unwrap_or_default(),
                    target: attribute(e, b"Target").unwrap_or_default(),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(PRESENTATION_RELS_PART, e)),
            _ => {}
        }
    }
    Ok(relationships)
}

/// Background color and paragraph texts of a slide part.
fn parse_slide(part: &str, xml: &str) -> Result<SlideSummary> {
    let mut reader = Reader::from_str(xml);
    let mut summary = SlideSummary {
        part: part.to_string(),
        ..SlideSummary::default()
    };

    let mut in_background = false;
    let mut in_paragraph = false;
    let mut in_text = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = true,
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"t" if in_paragraph => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if in_background && local_name(e.name().as_ref()) == b"srgbClr" {
                    summary.background = attribute(e, b"val");
                }
            }
            Ok(Event::Text(ref e)) if in_text => {
                let text = e.unescape().map_err(|err| xml_error(part, err))?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = false,
                b"t" => in_text = false,
                b"p" if in_paragraph => {
                    in_paragraph = false;
                    summary.paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
    }

    Ok(summary)
}
