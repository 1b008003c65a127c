use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use super::document::{document_fields, ConfirmationRenderer, DocumentField, RenderError};
use super::domain::LeaveRecord;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const ROW_HEIGHT: f32 = 24.0;
const LABEL_WIDTH: f32 = 150.0;
const HEADER_SIZE: f32 = 18.0;
const NOTICE_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 16.0;
const VALUE_WRAP_CHARS: usize = 44;

/// Confirmation renderer producing a one-page A4 request form.
///
/// The layout mirrors the paper form: centered company header, a ruled title,
/// one bordered row per record field with a shaded label column, and the
/// requester/approver signature block at the bottom right.
#[derive(Debug, Clone)]
pub struct PdfConfirmationRenderer {
    company_name: String,
    internal_notice: String,
    form_title: String,
}

impl PdfConfirmationRenderer {
    pub fn new(company_name: String, internal_notice: String, form_title: String) -> Self {
        Self {
            company_name,
            internal_notice,
            form_title,
        }
    }
}

impl Default for PdfConfirmationRenderer {
    fn default() -> Self {
        Self::new(
            "บริษัท ทีไอ การบัญชีและกฎหมาย จำกัด".to_string(),
            "เอกสารใช้สำหรับภายในบริษัทเท่านั้น".to_string(),
            "ใบคำขอลาหยุดงาน".to_string(),
        )
    }
}

impl ConfirmationRenderer for PdfConfirmationRenderer {
    fn render(&self, record: &LeaveRecord) -> Result<Vec<u8>, RenderError> {
        let mut page = PageComposer::new();

        page.centered(HEADER_SIZE, &self.company_name);
        page.centered(NOTICE_SIZE, &self.internal_notice);
        page.centered(BODY_SIZE, &self.form_title);
        page.rule();
        page.space(16.0);

        for field in document_fields(record) {
            page.field_row(&field);
        }

        page.space(40.0);
        page.right_aligned(BODY_SIZE, "ลงชื่อ.......................................");
        page.right_aligned(BODY_SIZE, "(ผู้ขอลา)");
        page.space(16.0);
        page.right_aligned(BODY_SIZE, "ลงชื่อ.......................................");
        page.right_aligned(BODY_SIZE, "(ผู้อนุมัติ)");

        build_document(page.finish()).map_err(|err| RenderError::Failed(err.to_string()))
    }
}

/// Map text onto the single-byte page encoding declared by the font.
///
/// ASCII passes through, Thai code points take their TIS-620 positions, and
/// anything else degrades to a question mark.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            code @ 0x20..=0x7E => code as u8,
            code @ 0x0E01..=0x0E3A => (code - 0x0E01 + 0xA1) as u8,
            code @ 0x0E3F..=0x0E5B => (code - 0x0E3F + 0xDF) as u8,
            _ => b'?',
        })
        .collect()
}

/// `/Differences` array mapping the TIS-620 byte positions to `uniXXXX`
/// glyph names, so viewers can substitute a Thai-capable face and extracted
/// text round-trips.
fn thai_differences() -> Vec<Object> {
    let mut differences = vec![Object::Integer(0xA1)];
    for code in 0x0E01..=0x0E3Au32 {
        differences.push(Object::Name(format!("uni{code:04X}").into_bytes()));
    }
    differences.push(Object::Integer(0xDF));
    for code in 0x0E3F..=0x0E5Bu32 {
        differences.push(Object::Name(format!("uni{code:04X}").into_bytes()));
    }
    differences
}

// Helvetica averages about half an em per glyph; close enough for centering
// and right alignment on a form.
fn approximate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn wrap_value(value: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for segment in value.split('\n') {
        let mut current = String::new();
        let mut count = 0;
        for ch in segment.chars() {
            current.push(ch);
            count += 1;
            if count >= max_chars {
                lines.push(std::mem::take(&mut current));
                count = 0;
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

struct PageComposer {
    operations: Vec<Operation>,
    cursor_y: f32,
}

impl PageComposer {
    fn new() -> Self {
        Self {
            operations: Vec::new(),
            cursor_y: PAGE_HEIGHT - 60.0,
        }
    }

    fn finish(self) -> Content {
        Content {
            operations: self.operations,
        }
    }

    fn space(&mut self, height: f32) {
        self.cursor_y -= height;
    }

    fn text_at(&mut self, x: f32, y: f32, size: f32, text: &str) {
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), Object::Real(size)],
        ));
        self.operations
            .push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_text(text), StringFormat::Literal)],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    fn centered(&mut self, size: f32, text: &str) {
        let x = (PAGE_WIDTH - approximate_width(text, size)) / 2.0;
        self.cursor_y -= size + 6.0;
        self.text_at(x.max(MARGIN), self.cursor_y, size, text);
    }

    fn right_aligned(&mut self, size: f32, text: &str) {
        let x = PAGE_WIDTH - MARGIN - approximate_width(text, size);
        self.cursor_y -= size + 6.0;
        self.text_at(x.max(MARGIN), self.cursor_y, size, text);
    }

    fn rule(&mut self) {
        self.cursor_y -= 8.0;
        self.operations
            .push(Operation::new("w", vec![Object::Real(0.8)]));
        self.operations.push(Operation::new(
            "m",
            vec![Object::Real(MARGIN), Object::Real(self.cursor_y)],
        ));
        self.operations.push(Operation::new(
            "l",
            vec![
                Object::Real(PAGE_WIDTH - MARGIN),
                Object::Real(self.cursor_y),
            ],
        ));
        self.operations.push(Operation::new("S", vec![]));
    }

    fn cell_border(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.operations
            .push(Operation::new("w", vec![Object::Real(0.5)]));
        self.operations.push(Operation::new(
            "re",
            vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(width),
                Object::Real(height),
            ],
        ));
        self.operations.push(Operation::new("S", vec![]));
    }

    fn label_cell(&mut self, y: f32, height: f32, label: &str) {
        self.operations.push(Operation::new(
            "rg",
            vec![Object::Real(0.9), Object::Real(0.9), Object::Real(0.9)],
        ));
        self.operations.push(Operation::new(
            "re",
            vec![
                Object::Real(MARGIN),
                Object::Real(y),
                Object::Real(LABEL_WIDTH),
                Object::Real(height),
            ],
        ));
        self.operations.push(Operation::new("f", vec![]));
        self.operations.push(Operation::new(
            "rg",
            vec![Object::Real(0.0), Object::Real(0.0), Object::Real(0.0)],
        ));
        self.cell_border(MARGIN, y, LABEL_WIDTH, height);
        self.text_at(MARGIN + 6.0, y + 7.0, BODY_SIZE, label);
    }

    fn field_row(&mut self, field: &DocumentField) {
        let value_width = PAGE_WIDTH - 2.0 * MARGIN - LABEL_WIDTH;
        let lines = if field.multiline {
            wrap_value(&field.value, VALUE_WRAP_CHARS)
        } else {
            vec![field.value.clone()]
        };

        let height = ROW_HEIGHT + (lines.len() as f32 - 1.0) * (BODY_SIZE + 4.0);
        let y = self.cursor_y - height;

        self.label_cell(y, height, &field.label);
        self.cell_border(MARGIN + LABEL_WIDTH, y, value_width, height);

        let mut line_y = y + height - ROW_HEIGHT + 7.0;
        for line in &lines {
            self.text_at(MARGIN + LABEL_WIDTH + 6.0, line_y, BODY_SIZE, line);
            line_y -= BODY_SIZE + 4.0;
        }

        self.cursor_y = y;
    }
}

fn build_document(content: Content) -> lopdf::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let encoding_id = doc.add_object(dictionary! {
        "Type" => "Encoding",
        "BaseEncoding" => "WinAnsiEncoding",
        "Differences" => Object::Array(thai_differences()),
    });
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => encoding_id,
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
