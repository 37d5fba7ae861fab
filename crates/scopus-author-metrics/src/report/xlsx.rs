//! Minimal single-sheet `.xlsx` writer.
//!
//! Produces the smallest OOXML package Excel and LibreOffice open without
//! repair: content types, package and workbook relationships, one worksheet
//! with inline strings, and a stylesheet holding a bold header style and one
//! solid highlight fill.

use std::io::{self, Seek, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;

/// Path of the worksheet part inside the package.
pub const SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Path of the stylesheet part inside the package.
pub const STYLES_PART: &str = "xl/styles.xml";

/// Path of the workbook part inside the package.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

// cellXfs indices in styles.xml
const STYLE_DEFAULT: u32 = 0;
const STYLE_HEADER: u32 = 1;
const STYLE_HIGHLIGHT: u32 = 2;

/// Excel rejects longer sheet names.
const MAX_SHEET_NAME: usize = 31;

/// One cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Inline string.
    Text(String),
    /// Unsigned integer.
    Number(u64),
    /// No value.
    Empty,
}

impl From<Option<&str>> for Cell {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, |s| Self::Text(s.to_string()))
    }
}

impl From<Option<u64>> for Cell {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }
}

#[derive(Debug, Clone)]
struct Row {
    cells: Vec<Cell>,
    highlighted: bool,
}

/// A worksheet with a bold header row and optionally highlighted data rows.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    header: Vec<String>,
    rows: Vec<Row>,
    highlight_rgb: String,
}

impl Worksheet {
    /// Create a sheet. `highlight_rgb` is a six-digit hex color.
    #[must_use]
    pub fn new(name: &str, header: &[&str], highlight_rgb: &str) -> Self {
        Self {
            name: sanitize_sheet_name(name),
            header: header.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
            highlight_rgb: highlight_rgb.trim_start_matches('#').to_ascii_uppercase(),
        }
    }

    /// Sheet name after sanitising.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a data row. Highlighted rows are filled across every header column.
    pub fn push_row(&mut self, cells: Vec<Cell>, highlighted: bool) {
        self.rows.push(Row { cells, highlighted });
    }

    /// Write the complete package and return the underlying writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> ZipResult<W> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(writer);

        let parts = [
            ("[Content_Types].xml", content_types_xml().into_bytes()),
            ("_rels/.rels", package_rels_xml().into_bytes()),
            (WORKBOOK_PART, self.workbook_xml()?),
            ("xl/_rels/workbook.xml.rels", workbook_rels_xml().into_bytes()),
            (STYLES_PART, self.styles_xml().into_bytes()),
            (SHEET_PART, self.sheet_xml()?),
        ];

        for (path, body) in parts {
            zip.start_file(path, options)?;
            zip.write_all(&body)?;
        }

        zip.finish()
    }

    fn workbook_xml(&self) -> io::Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        emit(&mut writer, declaration())?;
        emit(
            &mut writer,
            Event::Start(
                BytesStart::new("workbook").with_attributes([("xmlns", NS_MAIN), ("xmlns:r", NS_REL)]),
            ),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("sheets")))?;
        emit(
            &mut writer,
            Event::Empty(BytesStart::new("sheet").with_attributes([
                ("name", self.name.as_str()),
                ("sheetId", "1"),
                ("r:id", "rId1"),
            ])),
        )?;
        emit(&mut writer, Event::End(BytesEnd::new("sheets")))?;
        emit(&mut writer, Event::End(BytesEnd::new("workbook")))?;
        Ok(writer.into_inner())
    }

    fn styles_xml(&self) -> String {
        let rgb = &self.highlight_rgb;
        format!(
            concat!(
                r#"{decl}<styleSheet xmlns="{ns}">"#,
                r#"<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font>"#,
                r#"<font><b/><sz val="11"/><name val="Calibri"/></font></fonts>"#,
                r#"<fills count="3"><fill><patternFill patternType="none"/></fill>"#,
                r#"<fill><patternFill patternType="gray125"/></fill>"#,
                r#"<fill><patternFill patternType="solid"><fgColor rgb="FF{rgb}"/><bgColor rgb="FF{rgb}"/></patternFill></fill></fills>"#,
                r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
                r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
                r#"<cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
                r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>"#,
                r#"<xf numFmtId="0" fontId="0" fillId="2" borderId="0" xfId="0" applyFill="1"/></cellXfs>"#,
                r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
                r#"</styleSheet>"#
            ),
            decl = XML_DECL,
            ns = NS_MAIN,
            rgb = rgb,
        )
    }

    fn sheet_xml(&self) -> io::Result<Vec<u8>> {
        let width = self.header.len();
        let mut writer = Writer::new(Vec::new());
        emit(&mut writer, declaration())?;
        emit(
            &mut writer,
            Event::Start(BytesStart::new("worksheet").with_attributes([("xmlns", NS_MAIN)])),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("sheetData")))?;

        let header: Vec<Cell> = self.header.iter().cloned().map(Cell::Text).collect();
        write_row(&mut writer, 1, &header, width, STYLE_HEADER)?;

        for (i, row) in self.rows.iter().enumerate() {
            let style = if row.highlighted { STYLE_HIGHLIGHT } else { STYLE_DEFAULT };
            write_row(&mut writer, i + 2, &row.cells, width, style)?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("sheetData")))?;
        emit(&mut writer, Event::End(BytesEnd::new("worksheet")))?;
        Ok(writer.into_inner())
    }
}

fn declaration() -> Event<'static> {
    Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes")))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> io::Result<()> {
    writer.write_event(event).map_err(io::Error::other)
}

fn write_row(
    writer: &mut Writer<Vec<u8>>,
    row: usize,
    cells: &[Cell],
    width: usize,
    style: u32,
) -> io::Result<()> {
    let number = row.to_string();
    emit(writer, Event::Start(BytesStart::new("row").with_attributes([("r", number.as_str())])))?;
    for col in 0..width.max(cells.len()) {
        let cell = cells.get(col).unwrap_or(&Cell::Empty);
        write_cell(writer, &format!("{}{row}", column_name(col)), cell, style)?;
    }
    emit(writer, Event::End(BytesEnd::new("row")))
}

fn write_cell(
    writer: &mut Writer<Vec<u8>>,
    reference: &str,
    cell: &Cell,
    style: u32,
) -> io::Result<()> {
    let style_id = style.to_string();
    let start = BytesStart::new("c").with_attributes([("r", reference), ("s", style_id.as_str())]);

    match cell {
        Cell::Text(text) => {
            emit(writer, Event::Start(start.with_attributes([("t", "inlineStr")])))?;
            emit(writer, Event::Start(BytesStart::new("is")))?;
            emit(
                writer,
                Event::Start(BytesStart::new("t").with_attributes([("xml:space", "preserve")])),
            )?;
            emit(writer, Event::Text(BytesText::new(&strip_invalid_xml_chars(text))))?;
            emit(writer, Event::End(BytesEnd::new("t")))?;
            emit(writer, Event::End(BytesEnd::new("is")))?;
        }
        Cell::Number(n) => {
            emit(writer, Event::Start(start))?;
            emit(writer, Event::Start(BytesStart::new("v")))?;
            emit(writer, Event::Text(BytesText::new(&n.to_string())))?;
            emit(writer, Event::End(BytesEnd::new("v")))?;
        }
        // Unstyled empty cells are omitted; styled ones keep the fill.
        Cell::Empty if style == STYLE_DEFAULT => return Ok(()),
        Cell::Empty => return emit(writer, Event::Empty(start)),
    }

    emit(writer, Event::End(BytesEnd::new("c")))
}

fn content_types_xml() -> String {
    format!(
        concat!(
            r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
            r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
            r#"</Types>"#
        ),
        XML_DECL
    )
}

fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_PKG_REL}"><Relationship Id="rId1" Type="{NS_REL}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
    )
}

fn workbook_rels_xml() -> String {
    format!(
        concat!(
            r#"{decl}<Relationships xmlns="{pkg}">"#,
            r#"<Relationship Id="rId1" Type="{rel}/worksheet" Target="worksheets/sheet1.xml"/>"#,
            r#"<Relationship Id="rId2" Type="{rel}/styles" Target="styles.xml"/>"#,
            r#"</Relationships>"#
        ),
        decl = XML_DECL,
        pkg = NS_PKG_REL,
        rel = NS_REL,
    )
}

/// Spreadsheet column letters for a zero-based index (0 -> A, 26 -> AA).
#[must_use]
pub fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Replace characters Excel forbids in sheet names and cap the length.
#[must_use]
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim();

    if cleaned.is_empty() { "Sheet1".to_string() } else { cleaned.to_string() }
}

/// XML 1.0 forbids most control characters even when escaped.
fn strip_invalid_xml_chars(text: &str) -> String {
    text.chars().filter(|&c| !c.is_control() || matches!(c, '\t' | '\n' | '\r')).collect()
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    fn read_part(bytes: Vec<u8>, part: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive.by_name(part).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(9), "J");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("metrics"), "metrics");
        assert_eq!(sanitize_sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_sheet_name(""), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn test_package_contains_all_parts() {
        let mut sheet = Worksheet::new("metrics", &["a", "b"], "FFC7CE");
        sheet.push_row(vec![Cell::Text("x".into()), Cell::Number(3)], false);
        let bytes = sheet.write_to(Cursor::new(Vec::new())).unwrap().into_inner();

        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            WORKBOOK_PART,
            "xl/_rels/workbook.xml.rels",
            STYLES_PART,
            SHEET_PART,
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
    }

    #[test]
    fn test_highlighted_row_fills_every_column() {
        let mut sheet = Worksheet::new("metrics", &["a", "b", "c"], "#ffc7ce");
        sheet.push_row(vec![Cell::Text("X".into()), Cell::Empty, Cell::Empty], true);
        sheet.push_row(vec![Cell::Text("Y".into()), Cell::Empty, Cell::Number(7)], false);
        let bytes = sheet.write_to(Cursor::new(Vec::new())).unwrap().into_inner();

        let xml = read_part(bytes.clone(), SHEET_PART);
        assert!(xml.contains(r#"<c r="A2" s="2" t="inlineStr">"#));
        assert!(xml.contains(r#"<c r="B2" s="2"/>"#));
        assert!(xml.contains(r#"<c r="C2" s="2"/>"#));
        assert!(xml.contains(r#"<c r="A3" s="0" t="inlineStr">"#));
        assert!(!xml.contains(r#"r="B3""#));
        assert!(xml.contains(r#"<c r="C3" s="0"><v>7</v></c>"#));

        let styles = read_part(bytes, STYLES_PART);
        assert!(styles.contains(r#"<fgColor rgb="FFFFC7CE"/>"#));
        assert!(styles.contains(r#"patternType="solid""#));
    }

    #[test]
    fn test_new_sheet_is_sanitised_and_empty() {
        let mut sheet = Worksheet::new("2024/25", &["a"], "FFC7CE");
        assert_eq!(sheet.name(), "2024_25");
        assert!(sheet.is_empty());

        sheet.push_row(vec![Cell::Number(1)], false);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_sheet_name_is_escaped_in_workbook() {
        let sheet = Worksheet::new("R&D <team>", &["a"], "FFC7CE");
        let bytes = sheet.write_to(Cursor::new(Vec::new())).unwrap().into_inner();

        let xml = read_part(bytes, WORKBOOK_PART);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(r#"<sheet name="R&amp;D &lt;team&gt;" sheetId="1" r:id="rId1"/>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut sheet = Worksheet::new("metrics", &["a"], "FFC7CE");
        sheet.push_row(vec![Cell::Text("Smith & <Jones>\u{1}".into())], false);
        let bytes = sheet.write_to(Cursor::new(Vec::new())).unwrap().into_inner();

        let xml = read_part(bytes, SHEET_PART);
        assert!(xml.contains("Smith &amp; &lt;Jones&gt;</t>"));
    }
}
