//! Paginated PDF rendering of the tailored resume body
//!
//! Walks the Markdown body and lays it out line by line on a fixed Letter
//! page with 0.75 in margins, Helvetica for body text and the bold face for
//! headings.

use crate::error::{JobTailorError, Result};
use log::info;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LineKind {
    Title,
    Section,
    Subsection,
    Body,
    Bullet,
    Gap,
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    kind: LineKind,
    text: String,
}

impl Line {
    fn new(kind: LineKind, text: String) -> Self {
        Self { kind, text }
    }

    fn gap() -> Self {
        Self::new(LineKind::Gap, String::new())
    }
}

pub struct PdfRenderer;

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a Markdown body into a paginated PDF at the given path.
    ///
    /// Never panics across this boundary; failures come back as Render
    /// errors with remediation guidance so the caller can record them.
    pub fn render_markdown(&self, markdown: &str, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                JobTailorError::Render(format!(
                    "Cannot create output directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let lines = layout_lines(markdown);

        let (doc, first_page, first_layer) =
            PdfDocument::new("Tailored Resume", Mm(215.9), Mm(279.4), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| JobTailorError::Render(format!("Failed to load builtin font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| JobTailorError::Render(format!("Failed to load builtin font: {}", e)))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        // Cursor starts one margin below the top edge; the page is Letter
        // with 0.75 in (19.05 mm) margins all around.
        let mut y = 260.35;

        for line in &lines {
            let size = match line.kind {
                LineKind::Title => 17.0,
                LineKind::Section => 13.0,
                LineKind::Subsection => 11.5,
                LineKind::Body | LineKind::Bullet | LineKind::Gap => 10.0,
            };
            let font = match line.kind {
                LineKind::Title | LineKind::Section | LineKind::Subsection => &bold,
                _ => &regular,
            };
            // 1.4 line spacing, converted from points to millimetres.
            let line_height = size * 1.4 * 0.3528;
            let max_chars = (500.0 / (size * 0.5)) as usize;

            for piece in wrap_line(&line.text, max_chars) {
                if y < 19.05 + line_height {
                    let (page, page_layer) = doc.add_page(Mm(215.9), Mm(279.4), "Layer 1");
                    layer = doc.get_page(page).get_layer(page_layer);
                    y = 260.35;
                }
                if !piece.is_empty() {
                    let x = if line.kind == LineKind::Bullet {
                        23.0
                    } else {
                        19.05
                    };
                    layer.use_text(piece, size, Mm(x), Mm(y), font);
                }
                y -= line_height;
            }
        }

        let file = File::create(path).map_err(|e| {
            JobTailorError::Render(format!(
                "Cannot write '{}': {}. Check that the output directory exists and is writable.",
                path.display(),
                e
            ))
        })?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| JobTailorError::Render(format!("Failed to save PDF: {}", e)))?;

        info!("Rendered PDF to {}", path.display());
        Ok(())
    }
}

/// Flatten the Markdown body into styled lines. Inline emphasis is dropped;
/// the heading level and list structure decide the styling.
fn layout_lines(markdown: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut kind = LineKind::Body;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading(level, ..)) => {
                kind = match level {
                    HeadingLevel::H1 => LineKind::Title,
                    HeadingLevel::H2 => LineKind::Section,
                    _ => LineKind::Subsection,
                };
                current.clear();
            }
            Event::End(Tag::Heading(..)) => {
                lines.push(Line::new(kind, current.trim().to_string()));
                lines.push(Line::gap());
                current.clear();
                kind = LineKind::Body;
            }
            Event::Start(Tag::Item) => {
                kind = LineKind::Bullet;
                current = "\u{2022} ".to_string();
            }
            Event::End(Tag::Item) => {
                lines.push(Line::new(kind, current.trim_end().to_string()));
                current.clear();
                kind = LineKind::Body;
            }
            Event::End(Tag::List(_)) => {
                lines.push(Line::gap());
            }
            Event::End(Tag::Paragraph) => {
                if kind != LineKind::Bullet {
                    lines.push(Line::new(LineKind::Body, current.trim().to_string()));
                    lines.push(Line::gap());
                    current.clear();
                }
            }
            Event::Text(text) | Event::Code(text) => {
                current.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => {
                current.push(' ');
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(Line::new(kind, current.trim().to_string()));
    }

    lines
}

/// Wrap a line on Unicode word boundaries to at most `max_chars` characters.
fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();

    for word in text.split_word_bounds() {
        if current.chars().count() + word.chars().count() > max_chars
            && !current.trim().is_empty()
        {
            wrapped.push(current.trim_end().to_string());
            current = word.trim_start().to_string();
        } else {
            current.push_str(word);
        }
    }
    if !current.trim().is_empty() {
        wrapped.push(current.trim_end().to_string());
    }

    if wrapped.is_empty() {
        vec![String::new()]
    } else {
        wrapped
    }
}
