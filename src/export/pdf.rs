// src/export/pdf.rs

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs;
use std::io;
use std::path::Path;

// A4 landscape: seven ring columns need the width.
const PAGE_W: f32 = 842.0;
const PAGE_H: f32 = 595.0;
const MARGIN: f32 = 40.0;
const ROW_H: f32 = 18.0;

const FONT_SIZE: f32 = 9.0;
const HEADER_FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 14.0;

/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_W: f32 = 0.52;

/// Hand-rolled PDF writer: Type1 Helvetica, paginated zebra table.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    next_id: i32,
    page_refs: Vec<Ref>,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // object ids are assigned by hand
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            next_id: 4,
            page_refs: Vec::new(),
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Register a page and write its content stream.
    fn push_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                .contents(content_id);
            page.resources().fonts().pair(Name(b"F1"), self.font_id);
        }

        self.pdf.stream(content_id, &content.finish());
        self.page_refs.push(page_id);
    }

    /// Multi-page table. The summary lines go under the title of page 1 only;
    /// with no rows a single page with the summary and the header is written.
    pub fn write_table(
        &mut self,
        title: &str,
        summary: &[String],
        headers: &[&str],
        rows: &[Vec<String>],
    ) {
        let widths = col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        let mut remaining = rows;
        let mut page_no = 1;

        loop {
            let mut content = Content::new();
            draw_title_and_footer(&mut content, title, page_no);

            let mut y = PAGE_H - MARGIN - 30.0;
            if page_no == 1 {
                for line in summary {
                    draw_text(&mut content, MARGIN, y, FONT_SIZE, line);
                    y -= FONT_SIZE + 4.0;
                }
                y -= 8.0;
            }

            fill_band(&mut content, y, &widths, (0.85, 0.87, 0.90));
            draw_row(&mut content, y, &widths, &header_row, HEADER_FONT_SIZE);
            y -= ROW_H;

            let fits = (((y - MARGIN) / ROW_H).floor().max(0.0)) as usize;
            let take = fits.min(remaining.len());

            for (i, row) in remaining[..take].iter().enumerate() {
                if i % 2 == 0 {
                    fill_band(&mut content, y, &widths, (0.96, 0.96, 0.96));
                }
                draw_row(&mut content, y, &widths, row, FONT_SIZE);
                y -= ROW_H;
            }

            self.push_page(content);
            remaining = &remaining[take..];
            page_no += 1;

            if remaining.is_empty() || take == 0 {
                break;
            }
        }
    }

    pub fn save(mut self, path: &Path) -> io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());

        fs::write(path, self.pdf.finish())
    }
}

fn draw_title_and_footer(content: &mut Content, title: &str, page: usize) {
    draw_text(content, MARGIN, PAGE_H - MARGIN, TITLE_FONT_SIZE, title);
    draw_text(
        content,
        PAGE_W - MARGIN - 50.0,
        MARGIN - 25.0,
        FONT_SIZE,
        &format!("Page {page}"),
    );
}

fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
    let bytes = latin1(text);
    content.begin_text();
    content.set_font(Name(b"F1"), size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(&bytes));
    content.end_text();
}

fn fill_band(content: &mut Content, y: f32, widths: &[f32], rgb: (f32, f32, f32)) {
    content.save_state();
    content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
    content.rect(MARGIN, y, widths.iter().sum(), ROW_H);
    content.fill_nonzero();
    content.restore_state();
}

fn draw_row(content: &mut Content, y: f32, widths: &[f32], row: &[String], size: f32) {
    let mut x = MARGIN;

    for (text, w) in row.iter().zip(widths) {
        let max_chars = ((w - 8.0) / (size * GLYPH_W)).max(1.0) as usize;
        draw_text(content, x + 4.0, y + 5.0, size, &clip(text, max_chars));

        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, *w, ROW_H);
        content.stroke();
        content.restore_state();

        x += w;
    }
}

/// Column widths from header and content, scaled down to the page width.
fn col_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
    let char_w = FONT_SIZE * GLYPH_W;
    let mut widths: Vec<f32> = headers
        .iter()
        .map(|h| h.chars().count() as f32 * char_w + 12.0)
        .collect();

    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = w.max(cell.chars().count() as f32 * char_w + 8.0);
        }
    }

    let total: f32 = widths.iter().sum();
    let max = PAGE_W - 2.0 * MARGIN;
    if total > max {
        let scale = max / total;
        widths.iter_mut().for_each(|w| *w *= scale);
    }
    widths
}

fn clip(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// The standard Type1 font speaks Latin-1; anything beyond becomes '?'.
fn latin1(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
