//! Shared fixtures: in-memory XLSX workbooks built from plain cell grids.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

pub fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn number(value: f64) -> Cell {
    Cell::Number(value)
}

pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: &str, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }
}

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Serializes sheets into a minimal but valid XLSX container.
pub fn build_xlsx(sheets: &[Sheet]) -> Vec<u8> {
    let mut shared_strings: Vec<String> = Vec::new();
    let sheet_xml: Vec<String> = sheets
        .iter()
        .map(|sheet| worksheet_xml(sheet, &mut shared_strings))
        .collect();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut write = |name: &str, body: String| {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file(name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    };

    let mut overrides = String::new();
    overrides.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    overrides.push_str(r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#);
    for index in 1..=sheets.len() {
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            index
        ));
    }
    write(
        "[Content_Types].xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>{}</Types>"#,
            overrides
        ),
    );

    write(
        "_rels/.rels",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}"><Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
            PKG_REL_NS, REL_NS
        ),
    );

    let mut sheet_entries = String::new();
    let mut relationships = String::new();
    for (index, sheet) in sheets.iter().enumerate() {
        let id = index + 1;
        sheet_entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(&sheet.name),
            id,
            id
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            id, REL_NS, id
        ));
    }
    relationships.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="{}/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheets.len() + 1,
        REL_NS
    ));

    write(
        "xl/workbook.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="{}" xmlns:r="{}"><sheets>{}</sheets></workbook>"#,
            MAIN_NS, REL_NS, sheet_entries
        ),
    );
    write(
        "xl/_rels/workbook.xml.rels",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">{}</Relationships>"#,
            PKG_REL_NS, relationships
        ),
    );

    let strings: String = shared_strings
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", escape(s)))
        .collect();
    write(
        "xl/sharedStrings.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="{}" count="{}" uniqueCount="{}">{}</sst>"#,
            MAIN_NS,
            shared_strings.len(),
            shared_strings.len(),
            strings
        ),
    );

    for (index, xml) in sheet_xml.into_iter().enumerate() {
        write(&format!("xl/worksheets/sheet{}.xml", index + 1), xml);
    }

    zip.finish().unwrap().into_inner()
}

fn worksheet_xml(sheet: &Sheet, shared_strings: &mut Vec<String>) -> String {
    let mut rows = String::new();
    for (row_index, cells) in sheet.rows.iter().enumerate() {
        let row_number = row_index + 1;
        rows.push_str(&format!(r#"<row r="{}">"#, row_number));
        for (column_index, cell) in cells.iter().enumerate() {
            let reference = format!("{}{}", column_name(column_index), row_number);
            match cell {
                Cell::Text(value) => {
                    let position = match shared_strings.iter().position(|s| s == value) {
                        Some(position) => position,
                        None => {
                            shared_strings.push(value.clone());
                            shared_strings.len() - 1
                        }
                    };
                    rows.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, position));
                }
                Cell::Number(value) => {
                    rows.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value));
                }
                Cell::Blank => {}
            }
        }
        rows.push_str("</row>");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="{}" xmlns:r="{}"><sheetData>{}</sheetData></worksheet>"#,
        MAIN_NS, REL_NS, rows
    )
}

fn column_name(mut index: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
