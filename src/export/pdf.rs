use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use serde_json::Value;
use tracing::debug;

use super::text::values_to_text;
use crate::url_extractor::summary_heading;

// A4 in points, Courier 10pt
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 40;
const FONT_SIZE: i64 = 10;
const LINE_HEIGHT: i64 = 12;

/// Courier glyphs are 0.6 em wide, so this many fit between the margins
pub const COLUMNS: usize = ((PAGE_WIDTH - 2 * MARGIN) * 10 / (FONT_SIZE * 6)) as usize;
pub const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LINE_HEIGHT) as usize;

/// Hard-wraps every line of `text` at `width` characters
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width.max(1)) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

/// Splits lines into pages; always at least one page
pub fn paginate(lines: Vec<String>, per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines.chunks(per_page.max(1)).map(|page| page.to_vec()).collect()
}

/// Encodes a line for the WinAnsi Courier font, replacing what it cannot show
fn encode_line(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
        .collect()
}

fn page_content(lines: &[String]) -> Result<Vec<u8>> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(FONT_SIZE)]),
        Operation::new("TL", vec![Object::Integer(LINE_HEIGHT)]),
        Operation::new(
            "Td",
            vec![Object::Integer(MARGIN), Object::Integer(PAGE_HEIGHT - MARGIN - FONT_SIZE)],
        ),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(encode_line(line))]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    Content { operations }
        .encode()
        .context("Failed to encode PDF page content")
}

/// Lays `title` and `body` out over as many pages as needed
pub fn render_document(title: &str, body: &[String]) -> Result<Vec<u8>> {
    let mut lines = wrap_lines(title, COLUMNS);
    lines.push(String::new());
    lines.extend(body.iter().flat_map(|line| wrap_lines(line, COLUMNS)));
    let pages = paginate(lines, LINES_PER_PAGE);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for page in &pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(page)?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
        "Count" => Object::Integer(page_ids.len() as i64),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).context("Failed to write PDF document")?;
    debug!("Rendered PDF with {} pages ({} bytes)", page_ids.len(), bytes.len());
    Ok(bytes)
}

/// Values for `key` as pretty JSON under a title line
pub fn values_to_pdf(key: &str, values: &[Value]) -> Result<Vec<u8>> {
    let title = format!("Values for key: \"{}\"", key);
    let body: Vec<String> = values_to_text(values)?.lines().map(str::to_owned).collect();
    render_document(&title, &body)
}

/// One URL per line under the summary heading
pub fn urls_to_pdf(urls: &[String]) -> Result<Vec<u8>> {
    render_document(&summary_heading(urls.len()), urls)
}
