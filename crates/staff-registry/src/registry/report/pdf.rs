//! Minimal deterministic PDF 1.4 writer.
//!
//! Provides a fluent page-content builder and a document assembler. Content
//! streams are uncompressed, object numbering is fixed, and coordinates are
//! formatted with two decimals, so identical input always produces
//! identical bytes.

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

/// Fonts available to page content: `/F1` Helvetica, `/F2` Helvetica-Bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    const fn resource(self) -> &'static str {
        match self {
            Font::Helvetica => "/F1",
            Font::HelveticaBold => "/F2",
        }
    }
}

/// Glyph widths for Helvetica, chars 0x20..=0x7E, in 1/1000 em units.
/// Out-of-range characters fall back to the digit width.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Advance width of `text` at `size` points.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..=0x7E).contains(&code) {
                u32::from(HELVETICA_WIDTHS[(code - 0x20) as usize])
            } else {
                556
            }
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Trim `text` so it fits within `max_width` at `size`, appending an
/// ellipsis when anything is cut.
pub fn fit_text(text: &str, max_width: f32, size: f32) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }

    let mut trimmed: String = text.to_string();
    while !trimmed.is_empty() {
        trimmed.pop();
        let candidate = format!("{trimmed}...");
        if text_width(&candidate, size) <= max_width {
            return candidate;
        }
    }
    String::new()
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Page content builder emitting raw PDF graphics operators.
#[derive(Debug, Default)]
pub struct PageContent {
    ops: String,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill color for subsequent rects and text.
    pub fn fill_rgb(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.ops
            .push_str(&format!("{r:.3} {g:.3} {b:.3} rg\n"));
        self
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.ops
            .push_str(&format!("{x:.2} {y:.2} {width:.2} {height:.2} re f\n"));
        self
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.ops
            .push_str(&format!("{x:.2} {y:.2} {width:.2} {height:.2} re S\n"));
        self
    }

    pub fn line_width(&mut self, width: f32) -> &mut Self {
        self.ops.push_str(&format!("{width:.2} w\n"));
        self
    }

    /// Place a line of text with its baseline at `(x, y)`.
    pub fn text(&mut self, font: Font, size: f32, x: f32, y: f32, content: &str) -> &mut Self {
        self.ops.push_str(&format!(
            "BT {} {size:.2} Tf {x:.2} {y:.2} Td ({}) Tj ET\n",
            font.resource(),
            escape_text(content)
        ));
        self
    }

    /// Center a line of text on `center_x`.
    pub fn text_centered(
        &mut self,
        font: Font,
        size: f32,
        center_x: f32,
        y: f32,
        content: &str,
    ) -> &mut Self {
        let x = center_x - text_width(content, size) / 2.0;
        self.text(font, size, x, y, content)
    }

    fn into_stream(self) -> Vec<u8> {
        self.ops.into_bytes()
    }
}

/// Document assembler. Object layout is fixed: 1 catalog, 2 page tree,
/// 3 and 4 the two fonts, then a page/content object pair per page.
#[derive(Debug, Default)]
pub struct PdfWriter {
    pages: Vec<PageContent>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, page: PageContent) -> &mut Self {
        self.pages.push(page);
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::with_capacity(4096);
        out.extend_from_slice(b"%PDF-1.4\n");

        let page_object_ids: Vec<usize> =
            (0..self.pages.len()).map(|index| 5 + index * 2).collect();
        let object_count = 4 + self.pages.len() * 2;
        let mut offsets: Vec<usize> = Vec::with_capacity(object_count);

        let mut write_object = |out: &mut Vec<u8>, offsets: &mut Vec<usize>, body: Vec<u8>| {
            offsets.push(out.len());
            out.extend_from_slice(&body);
        };

        write_object(
            &mut out,
            &mut offsets,
            b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_vec(),
        );

        let kids = page_object_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        write_object(
            &mut out,
            &mut offsets,
            format!(
                "2 0 obj\n<< /Type /Pages /Kids [{kids}] /Count {} >>\nendobj\n",
                self.pages.len()
            )
            .into_bytes(),
        );

        write_object(
            &mut out,
            &mut offsets,
            b"3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".to_vec(),
        );
        write_object(
            &mut out,
            &mut offsets,
            b"4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>\nendobj\n"
                .to_vec(),
        );

        for (index, page) in self.pages.into_iter().enumerate() {
            let page_id = 5 + index * 2;
            let content_id = page_id + 1;

            write_object(
                &mut out,
                &mut offsets,
                format!(
                    "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R \
                     /MediaBox [0 0 {A4_WIDTH:.2} {A4_HEIGHT:.2}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> \
                     /Contents {content_id} 0 R >>\nendobj\n"
                )
                .into_bytes(),
            );

            let stream = page.into_stream();
            let mut body =
                format!("{content_id} 0 obj\n<< /Length {} >>\nstream\n", stream.len())
                    .into_bytes();
            body.extend_from_slice(&stream);
            body.extend_from_slice(b"endstream\nendobj\n");
            write_object(&mut out, &mut offsets, body);
        }

        let xref_offset = out.len();
        out.extend_from_slice(
            format!("xref\n0 {}\n0000000000 65535 f \n", object_count + 1).as_bytes(),
        );
        for offset in &offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                object_count + 1
            )
            .as_bytes(),
        );

        out
    }
}
