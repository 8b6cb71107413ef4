//! XML part generators for the PPTX package.
//!
//! Each function returns one complete OOXML part as text. All user-supplied
//! text goes through [`escape_xml`] before it is interpolated.

use chrono::{DateTime, Utc};
use deck_core::{ExportOptions, NormalizedSlide};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_XML: &str = "application/xml";
pub const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
pub const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub const CT_EXTENDED_PROPERTIES: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// First `p:sldId` value; lower ids are reserved.
pub const FIRST_SLIDE_ID: usize = 256;

/// 4:3 slide size in EMU.
pub const SLIDE_WIDTH_EMU: u64 = 9_144_000;
pub const SLIDE_HEIGHT_EMU: u64 = 6_858_000;

/// Text box inset from the slide edge (0.5in).
const TEXT_BOX_INSET_EMU: u64 = 457_200;

/// Escape the five XML predefined entities.
///
/// `&` is handled in the same single pass as the others, so already-produced
/// entities are never escaped twice. Characters XML 1.0 does not allow
/// (C0 controls other than tab, LF and CR, plus U+FFFE and U+FFFF) are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            c if !is_xml_char(c) => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Archive path of the 1-based slide `number`.
pub fn slide_part_name(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// `[Content_Types].xml`
pub fn content_types_xml(slide_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("\n<Types xmlns=\"{}\">", NS_CONTENT_TYPES));
    xml.push_str(&format!("<Default Extension=\"rels\" ContentType=\"{}\"/>", CT_RELATIONSHIPS));
    xml.push_str(&format!("<Default Extension=\"xml\" ContentType=\"{}\"/>", CT_XML));

    let fixed = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/docProps/core.xml", CT_CORE_PROPERTIES),
        ("/docProps/app.xml", CT_EXTENDED_PROPERTIES),
    ];
    for (part, content_type) in fixed {
        xml.push_str(&format!("<Override PartName=\"{}\" ContentType=\"{}\"/>", part, content_type));
    }
    for number in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/{}\" ContentType=\"{}\"/>",
            slide_part_name(number),
            CT_SLIDE
        ));
    }

    xml.push_str("</Types>");
    xml
}

/// `_rels/.rels`
pub fn root_rels_xml() -> String {
    format!(
        "{decl}\n<Relationships xmlns=\"{ns}\">\
         <Relationship Id=\"rId1\" Type=\"{doc}\" Target=\"ppt/presentation.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"{core}\" Target=\"docProps/core.xml\"/>\
         <Relationship Id=\"rId3\" Type=\"{app}\" Target=\"docProps/app.xml\"/>\
         </Relationships>",
        decl = XML_DECLARATION,
        ns = NS_PACKAGE_RELATIONSHIPS,
        doc = REL_OFFICE_DOCUMENT,
        core = REL_CORE_PROPERTIES,
        app = REL_EXTENDED_PROPERTIES,
    )
}

/// `ppt/presentation.xml`
///
/// Slide `i` (0-based) gets `id = 256 + i` and `r:id = rId{i+1}`, matching
/// [`presentation_rels_xml`].
pub fn presentation_xml(slide_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        "\n<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" saveSubsetFonts=\"1\">",
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    ));

    xml.push_str("<p:sldIdLst>");
    for i in 0..slide_count {
        xml.push_str(&format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", FIRST_SLIDE_ID + i, i + 1));
    }
    xml.push_str("</p:sldIdLst>");

    xml.push_str(&format!(
        "<p:sldSz cx=\"{}\" cy=\"{}\" type=\"screen4x3\"/><p:notesSz cx=\"{}\" cy=\"{}\"/>",
        SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU
    ));
    xml.push_str("</p:presentation>");
    xml
}

/// `ppt/_rels/presentation.xml.rels`
///
/// `rId1..rIdN` point at the slides, `rId{N+1}` at the theme.
pub fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("\n<Relationships xmlns=\"{}\">", NS_PACKAGE_RELATIONSHIPS));
    for number in 1..=slide_count {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>",
            number, REL_SLIDE, number
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"{}\" Target=\"theme/theme1.xml\"/>",
        slide_count + 1,
        REL_THEME
    ));
    xml.push_str("</Relationships>");
    xml
}

/// One `a:p` per body string.
fn paragraph_xml(text: &str) -> String {
    format!(
        "<a:p><a:r><a:rPr lang=\"en-US\" dirty=\"0\"/><a:t>{}</a:t></a:r></a:p>",
        escape_xml(text)
    )
}

/// Text shown on a slide without any body text.
pub fn fallback_text(index: usize) -> String {
    format!("Slide {}", index + 1)
}

/// `ppt/slides/slide{index+1}.xml`
///
/// A solid background and a single text box holding every body paragraph,
/// or `Slide {index+1}` when the slide has none.
pub fn slide_xml(slide: &NormalizedSlide, index: usize) -> String {
    let paragraphs = if slide.paragraphs.is_empty() {
        paragraph_xml(&fallback_text(index))
    } else {
        slide
            .paragraphs
            .iter()
            .map(|p| paragraph_xml(p))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{decl}\n<p:sld xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\">\
         <p:cSld>\
         <p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{bg}\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>\
         <p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
         <p:sp>\
         <p:nvSpPr><p:cNvPr id=\"2\" name=\"TextBox 1\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{inset}\" y=\"{inset}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\" rtlCol=\"0\"><a:normAutofit/></a:bodyPr><a:lstStyle/>\n\
         {paragraphs}\n\
         </p:txBody>\
         </p:sp>\
         </p:spTree>\
         </p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>",
        decl = XML_DECLARATION,
        a = NS_DRAWING,
        r = NS_RELATIONSHIPS,
        p = NS_PRESENTATION,
        bg = slide.background,
        inset = TEXT_BOX_INSET_EMU,
        cx = SLIDE_WIDTH_EMU - 2 * TEXT_BOX_INSET_EMU,
        cy = SLIDE_HEIGHT_EMU - 2 * TEXT_BOX_INSET_EMU,
        paragraphs = paragraphs,
    )
}

/// `docProps/core.xml`
pub fn core_xml(options: &ExportOptions, timestamp: DateTime<Utc>) -> String {
    let stamp = timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let author = escape_xml(options.author());

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "\n<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
    );
    if let Some(title) = options.title() {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    xml.push_str(&format!(
        "<dc:creator>{author}</dc:creator><cp:lastModifiedBy>{author}</cp:lastModifiedBy>\
         <cp:revision>1</cp:revision>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
         <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>",
        author = author,
        stamp = stamp,
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

/// `docProps/app.xml`
///
/// Lists one entry per slide under "Slide Titles", using the slide title or
/// its fallback text.
pub fn app_xml(slides: &[NormalizedSlide]) -> String {
    let count = slides.len();
    let paragraphs: usize = slides.iter().map(|s| s.paragraphs.len().max(1)).sum();

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        "\n<Properties \
         xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
         xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">",
    );
    xml.push_str(&format!(
        "<TotalTime>0</TotalTime><Application>deck</Application>\
         <PresentationFormat>On-screen Show (4:3)</PresentationFormat>\
         <Paragraphs>{}</Paragraphs><Slides>{}</Slides><Notes>0</Notes>\
         <HiddenSlides>0</HiddenSlides><MMClips>0</MMClips><ScaleCrop>false</ScaleCrop>",
        paragraphs, count
    ));
    xml.push_str(&format!(
        "<HeadingPairs><vt:vector size=\"2\" baseType=\"variant\">\
         <vt:variant><vt:lpstr>Slide Titles</vt:lpstr></vt:variant>\
         <vt:variant><vt:i4>{}</vt:i4></vt:variant>\
         </vt:vector></HeadingPairs>",
        count
    ));
    xml.push_str(&format!("<TitlesOfParts><vt:vector size=\"{}\" baseType=\"lpstr\">", count));
    for (index, slide) in slides.iter().enumerate() {
        let title = slide.title.clone().unwrap_or_else(|| fallback_text(index));
        xml.push_str(&format!("<vt:lpstr>{}</vt:lpstr>", escape_xml(&title)));
    }
    xml.push_str("</vt:vector></TitlesOfParts>");
    xml.push_str(
        "<LinksUpToDate>false</LinksUpToDate><SharedDoc>false</SharedDoc>\
         <HyperlinksChanged>false</HyperlinksChanged><AppVersion>16.0000</AppVersion>",
    );
    xml.push_str("</Properties>");
    xml
}

/// `ppt/theme/theme1.xml`
pub fn theme_xml() -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("\n<a:theme xmlns:a=\"{}\" name=\"Office Theme\">", NS_DRAWING));
    xml.push_str("<a:themeElements>");

    xml.push_str(
        "<a:clrScheme name=\"Office\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2>\
         <a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>",
    );

    xml.push_str(
        "<a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>",
    );

    let solid = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
    xml.push_str("<a:fmtScheme name=\"Office\"><a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        xml.push_str(&format!(
            "<a:ln w=\"{}\" cap=\"flat\" cmpd=\"sng\" algn=\"ctr\">{}<a:prstDash val=\"solid\"/><a:miter lim=\"800000\"/></a:ln>",
            width, solid
        ));
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    /// Parse to EOF, failing on any XML error.
    fn assert_well_formed(xml: &str) {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed XML at {}: {}\n{}", reader.buffer_position(), e, xml),
            }
        }
    }

    /// Unescaped contents of every `a:t` element, in document order.
    fn text_runs(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut in_text = false;
        let mut runs = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"a:t" => {
                    in_text = true;
                    runs.push(String::new());
                }
                Event::End(e) if e.name().as_ref() == b"a:t" => in_text = false,
                Event::Text(e) if in_text => {
                    if let Some(last) = runs.last_mut() {
                        last.push_str(&e.unescape().unwrap());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        runs
    }

    fn slide(paragraphs: &[&str]) -> NormalizedSlide {
        NormalizedSlide {
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
            ..NormalizedSlide::default()
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\" 'single'"), "&quot;quoted&quot; &apos;single&apos;");
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_escape_xml_drops_forbidden_characters() {
        assert_eq!(escape_xml("a\u{0B}b\u{0C}c\u{0}d\u{1F}e"), "abcde");
        assert_eq!(escape_xml("keep\ttab\nline\r"), "keep\ttab\nline\r");
        assert_eq!(escape_xml("\u{FFFE}x\u{FFFF}"), "x");
        assert_eq!(escape_xml("caf\u{e9} \u{1F600}"), "caf\u{e9} \u{1F600}");

        let xml = slide_xml(&slide(&["pasted\u{0B}title"]), 0);
        assert!(!xml.contains('\u{0B}'));
        assert_eq!(text_runs(&xml), vec!["pastedtitle"]);
    }

    #[test]
    fn test_all_parts_well_formed() {
        let slides = vec![slide(&["One"]), slide(&[])];
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let options = ExportOptions::new().with_title("A & B").with_author("<me>");

        assert_well_formed(&content_types_xml(2));
        assert_well_formed(&root_rels_xml());
        assert_well_formed(&presentation_xml(2));
        assert_well_formed(&presentation_rels_xml(2));
        assert_well_formed(&slide_xml(&slides[0], 0));
        assert_well_formed(&slide_xml(&slides[1], 1));
        assert_well_formed(&core_xml(&options, at));
        assert_well_formed(&app_xml(&slides));
        assert_well_formed(&theme_xml());
    }

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types_xml(3);
        for n in 1..=3 {
            assert!(xml.contains(&format!(
                "<Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"{}\"/>",
                n, CT_SLIDE
            )));
        }
        assert!(!xml.contains("/ppt/slides/slide4.xml"));
        assert_eq!(xml.matches("<Override ").count(), 4 + 3);
        assert!(xml.contains("Extension=\"rels\""));
        assert!(xml.contains("Extension=\"xml\""));
    }

    #[test]
    fn test_presentation_ids_align_with_rels() {
        let xml = presentation_xml(3);
        assert!(xml.contains(
            "<p:sldIdLst><p:sldId id=\"256\" r:id=\"rId1\"/><p:sldId id=\"257\" r:id=\"rId2\"/>\
             <p:sldId id=\"258\" r:id=\"rId3\"/></p:sldIdLst>"
        ));
        assert!(xml.contains("<p:sldSz cx=\"9144000\" cy=\"6858000\" type=\"screen4x3\"/>"));

        let rels = presentation_rels_xml(3);
        for n in 1..=3 {
            assert!(rels.contains(&format!(
                "Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"",
                n, REL_SLIDE, n
            )));
        }
        assert!(rels.contains(&format!(
            "Id=\"rId4\" Type=\"{}\" Target=\"theme/theme1.xml\"",
            REL_THEME
        )));
        assert_eq!(rels.matches("<Relationship ").count(), 4);
    }

    #[test]
    fn test_slide_fallback_text() {
        let xml = slide_xml(&slide(&[]), 1);
        assert_eq!(text_runs(&xml), vec!["Slide 2"]);
        assert_eq!(xml.matches("<a:p>").count(), 1);
    }

    #[test]
    fn test_slide_paragraphs_joined() {
        let xml = slide_xml(&slide(&["First", "Second"]), 0);
        assert_eq!(text_runs(&xml), vec!["First", "Second"]);
        assert!(xml.contains("</a:p>\n<a:p>"));
        assert_eq!(xml.matches("<p:sp>").count(), 1);
    }

    #[test]
    fn test_slide_text_escaping_round_trips() {
        let raw = r#"if a < b && c > "d" then 'e' &amp;"#;
        let xml = slide_xml(&slide(&[raw]), 0);
        assert_well_formed(&xml);
        assert_eq!(text_runs(&xml), vec![raw]);
    }

    #[test]
    fn test_slide_background() {
        let mut s = slide(&["x"]);
        s.background = "111111".to_string();
        assert!(slide_xml(&s, 0).contains("<a:srgbClr val=\"111111\"/>"));
    }

    #[test]
    fn test_core_xml_timestamp_and_metadata() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let xml = core_xml(&ExportOptions::new().with_title("Q&A"), at);

        assert!(xml.contains("<dc:title>Q&amp;A</dc:title>"));
        assert!(xml.contains("<dc:creator>deck</dc:creator>"));
        assert!(xml.contains(
            "<dcterms:created xsi:type=\"dcterms:W3CDTF\">2024-01-02T03:04:05Z</dcterms:created>"
        ));
        assert!(xml.contains(
            "<dcterms:modified xsi:type=\"dcterms:W3CDTF\">2024-01-02T03:04:05Z</dcterms:modified>"
        ));

        let xml = core_xml(&ExportOptions::new(), at);
        assert!(!xml.contains("dc:title"));
    }

    #[test]
    fn test_app_xml_counts_and_titles() {
        let mut titled = slide(&["a", "b"]);
        titled.title = Some("Intro".to_string());
        let xml = app_xml(&[titled, slide(&[])]);

        assert!(xml.contains("<Slides>2</Slides>"));
        assert!(xml.contains("<Paragraphs>3</Paragraphs>"));
        assert!(xml.contains("<vt:i4>2</vt:i4>"));
        assert!(xml.contains(
            "<vt:vector size=\"2\" baseType=\"lpstr\"><vt:lpstr>Intro</vt:lpstr><vt:lpstr>Slide 2</vt:lpstr></vt:vector>"
        ));
    }
}
