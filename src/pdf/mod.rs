//! Paginated PDF rendering of the catalog.
//!
//! The renderer is feature-gated: binaries built without `pdf` keep every
//! other flow working and report the capability as disabled. Layout is
//! letter-size with 36pt margins; the results table repeats its header row
//! on every page and every page carries the attribution footer.

pub mod theme;

#[cfg(feature = "pdf")]
mod layout;

pub use theme::PdfTheme;

/// Source repository, linked from the footer and document metadata.
pub const REPO_LINK: &str =
    "https://github.com/IronwoodRestorations/IronwoodRestorationsPublic/tree/main/CustomDTCGenerator";

/// Video channel, linked from the footer and document metadata.
pub const YOUTUBE_LINK: &str = "https://www.youtube.com/@IronwoodRestorations";

/// Whether this binary carries the PDF renderer. Resolved once in `main`
/// and threaded into whatever calls the renderer.
pub fn render_support() -> bool {
    cfg!(feature = "pdf")
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_project_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Output filename for a project, in the working directory.
pub fn output_file_name(project: &str) -> String {
    format!("custom_dtcs_{}.pdf", sanitize_project_name(project))
}

#[cfg(feature = "pdf")]
pub use render::{render_catalog, RenderError};

#[cfg(feature = "pdf")]
mod render {
    use std::fmt;

    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream, StringFormat};

    use super::layout::{encode_winansi, text_width, wrap_text};
    use super::theme::{PdfTheme, Rgb, ThemeSpec, BLACK};
    use super::{REPO_LINK, YOUTUBE_LINK};
    use crate::catalog::{sort_for_export, DtcRecord, CATEGORIES, HEADERS};

    const PAGE_W: f32 = 612.0;
    const PAGE_H: f32 = 792.0;
    const MARGIN: f32 = 36.0;
    const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;

    const BODY_SIZE: f32 = 8.0;
    const BODY_LEADING: f32 = 10.0;
    const REF_SIZE: f32 = 9.0;
    const REF_LEADING: f32 = 11.0;
    const TITLE_SIZE: f32 = 18.0;
    const HEADING_SIZE: f32 = 12.0;
    const FOOTER_SIZE: f32 = 8.0;

    const PAD_X: f32 = 4.0;
    const PAD_Y: f32 = 3.0;
    const GRID_WIDTH: f32 = 0.5;
    // Column widths for Code, Category, Title, Description, Possible
    // Fixes, Pinpoint Test; must sum to CONTENT_W.
    const COL_WIDTHS: [f32; 6] = [52.0, 90.0, 90.0, 123.0, 123.0, 62.0];
    const TABLE_COLUMNS: [&str; 6] = [
        "Code",
        "Category",
        "Title",
        "Description",
        "Possible Fixes",
        "Pinpoint Test",
    ];
    // Keep the table clear of the two footer lines at y = 20 and 30.
    const TABLE_BOTTOM: f32 = MARGIN + 24.0;

    #[derive(Debug)]
    pub enum RenderError {
        Pdf(lopdf::Error),
    }

    impl fmt::Display for RenderError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                RenderError::Pdf(e) => write!(f, "pdf rendering failed: {e}"),
            }
        }
    }

    impl std::error::Error for RenderError {}

    impl From<lopdf::Error> for RenderError {
        fn from(e: lopdf::Error) -> Self {
            RenderError::Pdf(e)
        }
    }

    /// Accumulated content and link annotations for one page.
    struct Page {
        ops: Vec<Operation>,
        annots: Vec<Object>,
    }

    impl Page {
        fn new() -> Self {
            Page {
                ops: Vec::new(),
                annots: Vec::new(),
            }
        }
    }

    fn real(v: f32) -> Object {
        Object::Real(v)
    }

    fn set_fill(ops: &mut Vec<Operation>, c: Rgb) {
        ops.push(Operation::new("rg", vec![real(c.0), real(c.1), real(c.2)]));
    }

    fn set_stroke(ops: &mut Vec<Operation>, c: Rgb) {
        ops.push(Operation::new("RG", vec![real(c.0), real(c.1), real(c.2)]));
    }

    fn rect_fill(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32) {
        ops.push(Operation::new("re", vec![real(x), real(y), real(w), real(h)]));
        ops.push(Operation::new("f", vec![]));
    }

    fn rect_stroke(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32) {
        ops.push(Operation::new("w", vec![real(GRID_WIDTH)]));
        ops.push(Operation::new("re", vec![real(x), real(y), real(w), real(h)]));
        ops.push(Operation::new("S", vec![]));
    }

    /// One line of text with its baseline at `(x, y)`.
    fn draw_text(
        ops: &mut Vec<Operation>,
        font: &str,
        size: f32,
        x: f32,
        y: f32,
        color: Rgb,
        text: &str,
    ) {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), real(size)]));
        set_fill(ops, color);
        ops.push(Operation::new("Td", vec![real(x), real(y)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_winansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Wrapped cell lines for one record, in column order.
    fn record_cells(record: &DtcRecord) -> Vec<Vec<String>> {
        let mut cells = Vec::with_capacity(6);
        let texts = [
            record.code.as_str(),
            record.category.as_str(),
            record.title.as_str(),
            record.description.as_str(),
            "", // fixes handled below
            record.pinpoint_test.as_str(),
        ];
        for (i, text) in texts.iter().enumerate() {
            let inner = COL_WIDTHS[i] - 2.0 * PAD_X;
            if i == 4 {
                let mut lines = Vec::new();
                if record.possible_fixes.is_empty() {
                    lines.push("-".to_string());
                } else {
                    for fix in &record.possible_fixes {
                        lines.extend(wrap_text(&format!("\u{2022} {fix}"), BODY_SIZE, inner));
                    }
                }
                cells.push(lines);
            } else {
                cells.push(wrap_text(text, BODY_SIZE, inner));
            }
        }
        cells
    }

    fn row_height(cells: &[Vec<String>]) -> f32 {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        lines as f32 * BODY_LEADING + 2.0 * PAD_Y
    }

    /// Draw one table row with its top edge at `y_top`; returns the new y.
    fn draw_row(
        page: &mut Page,
        y_top: f32,
        cells: &[Vec<String>],
        bold: bool,
        fill: Option<Rgb>,
        text_color: Rgb,
        spec: &ThemeSpec,
    ) -> f32 {
        let h = row_height(cells);
        if let Some(band) = fill {
            set_fill(&mut page.ops, band);
            rect_fill(&mut page.ops, MARGIN, y_top - h, CONTENT_W, h);
        }
        set_stroke(&mut page.ops, spec.grid);
        let mut x = MARGIN;
        for (i, lines) in cells.iter().enumerate() {
            rect_stroke(&mut page.ops, x, y_top - h, COL_WIDTHS[i], h);
            let font = if bold { "F2" } else { "F1" };
            for (li, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline = y_top - PAD_Y - 0.8 * BODY_SIZE - li as f32 * BODY_LEADING;
                draw_text(
                    &mut page.ops,
                    font,
                    BODY_SIZE,
                    x + PAD_X,
                    baseline,
                    text_color,
                    line,
                );
            }
            x += COL_WIDTHS[i];
        }
        y_top - h
    }

    fn draw_table_header(page: &mut Page, y_top: f32, spec: &ThemeSpec) -> f32 {
        let cells: Vec<Vec<String>> = TABLE_COLUMNS
            .iter()
            .map(|c| vec![c.to_string()])
            .collect();
        draw_row(
            page,
            y_top,
            &cells,
            true,
            spec.header_fill,
            spec.header_text,
            spec,
        )
    }

    /// Footer: project + attribution on one line, page number and the two
    /// hyperlinks on the next, all in the theme accent color.
    fn draw_footer(page: &mut Page, page_no: usize, project: &str, spec: &ThemeSpec) {
        let accent = spec.accent;
        let y1 = 30.0;
        let y2 = 20.0;

        let mut x = MARGIN;
        draw_text(&mut page.ops, "F2", FOOTER_SIZE, x, y1, accent, project);
        x += text_width(project, FOOTER_SIZE) * 1.06;
        draw_text(
            &mut page.ops,
            "F1",
            FOOTER_SIZE,
            x,
            y1,
            accent,
            " | Created with Custom DTC Builder from Ironwood Restorations",
        );

        let youtube_display = YOUTUBE_LINK
            .replace("https://www.", "")
            .replace("https://", "")
            .replace("youtube.com/", "");
        let lead = format!("Page {page_no} | ");
        let github_seg = "Github: @IronwoodRestorations".to_string();
        let youtube_seg = format!("Youtube/TikTok: {youtube_display}");

        let mut x = MARGIN;
        draw_text(&mut page.ops, "F1", FOOTER_SIZE, x, y2, accent, &lead);
        x += text_width(&lead, FOOTER_SIZE);
        draw_text(&mut page.ops, "F1", FOOTER_SIZE, x, y2, accent, &github_seg);
        let w = text_width(&github_seg, FOOTER_SIZE);
        page.annots.push(link_annotation(x, y2, w, REPO_LINK));
        x += w;
        draw_text(&mut page.ops, "F1", FOOTER_SIZE, x, y2, accent, " | ");
        x += text_width(" | ", FOOTER_SIZE);
        draw_text(&mut page.ops, "F1", FOOTER_SIZE, x, y2, accent, &youtube_seg);
        let w = text_width(&youtube_seg, FOOTER_SIZE);
        page.annots.push(link_annotation(x, y2, w, YOUTUBE_LINK));
    }

    fn link_annotation(x: f32, baseline: f32, width: f32, url: &str) -> Object {
        Object::Dictionary(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![
                real(x),
                real(baseline - 2.0),
                real(x + width),
                real(baseline + FOOTER_SIZE),
            ],
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::string_literal(url),
            },
        })
    }

    /// Title block and the two-column header/category reference block;
    /// returns the y where the results table starts.
    fn draw_first_page_chrome(page: &mut Page, project: &str) -> f32 {
        let mut y = PAGE_H - MARGIN;

        let title = format!("Custom DTC's: {project}");
        y -= TITLE_SIZE;
        let tw = text_width(&title, TITLE_SIZE) * 1.06;
        draw_text(
            &mut page.ops,
            "F2",
            TITLE_SIZE,
            MARGIN + (CONTENT_W - tw).max(0.0) / 2.0,
            y,
            BLACK,
            &title,
        );
        y -= 12.0;

        let col_left = MARGIN;
        let col_right = MARGIN + CONTENT_W / 2.0;
        let mut left: Vec<(bool, String)> = vec![(true, "Custom DTC Headers".to_string())];
        left.extend(
            HEADERS
                .iter()
                .map(|(k, v)| (false, format!("{k} \u{2013} {v}"))),
        );
        let mut right: Vec<(bool, String)> = vec![(true, "Trouble Code Categories".to_string())];
        right.extend(
            CATEGORIES
                .iter()
                .map(|(k, v)| (false, format!("{k} \u{2013} {v}"))),
        );
        let rows = left.len().max(right.len());
        for (column_x, lines) in [(col_left, &left), (col_right, &right)] {
            for (i, (bold, line)) in lines.iter().enumerate() {
                let font = if *bold { "F2" } else { "F1" };
                let baseline = y - REF_SIZE - i as f32 * REF_LEADING;
                draw_text(
                    &mut page.ops,
                    font,
                    REF_SIZE,
                    column_x,
                    baseline,
                    BLACK,
                    line,
                );
            }
        }
        y -= rows as f32 * REF_LEADING + 6.0;
        y -= 18.0;

        y -= HEADING_SIZE;
        draw_text(
            &mut page.ops,
            "F2",
            HEADING_SIZE,
            MARGIN,
            y,
            BLACK,
            "Custom DTC's",
        );
        y - 8.0
    }

    /// Render the full catalog to PDF bytes. The caller is responsible for
    /// rejecting an empty catalog before getting here; an empty sequence
    /// still produces a valid single-page document with an empty table.
    pub fn render_catalog(
        records: &[DtcRecord],
        project: &str,
        theme: PdfTheme,
    ) -> Result<Vec<u8>, RenderError> {
        let spec = theme.spec();
        let mut sorted = records.to_vec();
        sort_for_export(&mut sorted);

        let mut pages: Vec<Page> = Vec::new();
        let mut page = Page::new();
        let mut y = draw_first_page_chrome(&mut page, project);
        y = draw_table_header(&mut page, y, &spec);

        let mut fresh = true;
        for record in &sorted {
            let cells = record_cells(record);
            if !fresh && y - row_height(&cells) < TABLE_BOTTOM {
                draw_footer(&mut page, pages.len() + 1, project, &spec);
                pages.push(std::mem::replace(&mut page, Page::new()));
                y = draw_table_header(&mut page, PAGE_H - MARGIN, &spec);
                fresh = true;
            }
            y = draw_row(&mut page, y, &cells, false, None, BLACK, &spec);
            fresh = false;
        }
        draw_footer(&mut page, pages.len() + 1, project, &spec);
        pages.push(page);

        assemble(pages, project)
    }

    fn assemble(pages: Vec<Page>, project: &str) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let font_bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_regular,
                "F2" => font_bold,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let content = Content {
                operations: page.ops,
            };
            let stream_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => stream_id,
            };
            if !page.annots.is_empty() {
                page_dict.set("Annots", Object::Array(page.annots));
            }
            kids.push(doc.add_object(page_dict).into());
        }
        let page_total = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_total,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), real(PAGE_W), real(PAGE_H)],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let author = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        let stamp = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(format!("Custom DTC's: {project}")),
            "Author" => Object::string_literal(author),
            "Creator" => Object::string_literal("Custom DTC Builder"),
            "CreationDate" => Object::string_literal(stamp.clone()),
            "ModDate" => Object::string_literal(stamp),
            "Subject" => Object::string_literal(format!("Custom DTC list for {project}")),
            "Keywords" => Object::string_literal(format!(
                "DTC, Custom, IronwoodRestorations, Repo: {REPO_LINK}, YouTube: {YOUTUBE_LINK}"
            )),
        });
        doc.trailer.set("Info", info_id);

        doc.compress();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

}
