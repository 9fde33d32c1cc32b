use crate::availability::Availability;
use crate::error::{DispoError, Result};
use crate::registry::Courier;
use chrono::NaiveDate;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const ROW_HEIGHT_MM: f32 = 8.0;
const SECTION_GAP_MM: f32 = 10.0;
const DATE_HEADING_MM: f32 = 8.0;

const TITLE_SIZE: f32 = 16.0;
const DATE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;

const PT_TO_MM: f32 = 0.352_778;
/// Largura média de um caractere Helvetica em frações do corpo.
const CHAR_WIDTH_RATIO: f32 = 0.5;

struct PdfContext {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    /// Topo da próxima linha, em mm a partir da base da página.
    y: f32,
}

impl PdfContext {
    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        begin_layer(&self.layer);
        self.y = A4_HEIGHT_MM - MARGIN_MM;
    }

    fn ensure_room(&mut self, needed_mm: f32) {
        if self.y - needed_mm < MARGIN_MM {
            self.new_page();
        }
    }
}

fn begin_layer(layer: &PdfLayerReference) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
    layer.set_outline_thickness(0.4);
    layer.set_fill_color(black());
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * CHAR_WIDTH_RATIO * PT_TO_MM
}

/// Corta o texto para caber em `width_mm` (estimativa por largura média).
fn fit_text(text: &str, width_mm: f32, size_pt: f32) -> String {
    let max_chars = (width_mm / (size_pt * CHAR_WIDTH_RATIO * PT_TO_MM)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// `nome do entregador` → `Nome Do Entregador` (cabeçalho de tabela).
fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn rect(layer: &PdfLayerReference, x: f32, top: f32, w: f32, h: f32, mode: PaintMode) {
    let polygon = Polygon {
        rings: vec![vec![
            (Point::new(Mm(x), Mm(top)), false),
            (Point::new(Mm(x + w), Mm(top)), false),
            (Point::new(Mm(x + w), Mm(top - h)), false),
            (Point::new(Mm(x), Mm(top - h)), false),
        ]],
        mode,
        winding_order: WindingOrder::NonZero,
    };
    layer.add_polygon(polygon);
}

fn vline(layer: &PdfLayerReference, x: f32, top: f32, h: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(x), Mm(top)), false),
            (Point::new(Mm(x), Mm(top - h)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn draw_date_heading(ctx: &mut PdfContext, date: NaiveDate, date_format: &str) {
    ctx.layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.55, None)));
    let text = format!("Data: {}", date.format(date_format));
    ctx.layer
        .use_text(text, DATE_SIZE, Mm(MARGIN_MM), Mm(ctx.y - DATE_HEADING_MM + 2.0), &ctx.bold);
    ctx.layer.set_fill_color(black());
    ctx.y -= DATE_HEADING_MM;
}

fn draw_header_row(ctx: &mut PdfContext, header: &[String], table_width: f32) {
    let col_width = table_width / header.len() as f32;
    let top = ctx.y;

    ctx.layer.set_fill_color(Color::Rgb(Rgb::new(0.78, 0.78, 0.78, None)));
    rect(&ctx.layer, MARGIN_MM, top, table_width, ROW_HEIGHT_MM, PaintMode::FillStroke);
    ctx.layer.set_fill_color(black());

    for (i, label) in header.iter().enumerate() {
        let x = MARGIN_MM + i as f32 * col_width;
        if i > 0 {
            vline(&ctx.layer, x, top, ROW_HEIGHT_MM);
        }
        let text = fit_text(label, col_width - 4.0, HEADER_SIZE);
        ctx.layer
            .use_text(text, HEADER_SIZE, Mm(x + 2.0), Mm(top - ROW_HEIGHT_MM + 2.5), &ctx.bold);
    }

    ctx.y -= ROW_HEIGHT_MM;
}

fn draw_row(ctx: &mut PdfContext, columns: &[String], courier: &Courier, table_width: f32) {
    let col_width = table_width / columns.len() as f32;
    let top = ctx.y;

    rect(&ctx.layer, MARGIN_MM, top, table_width, ROW_HEIGHT_MM, PaintMode::Stroke);

    for (i, label) in columns.iter().enumerate() {
        let x = MARGIN_MM + i as f32 * col_width;
        if i > 0 {
            vline(&ctx.layer, x, top, ROW_HEIGHT_MM);
        }
        let value = courier.field(label).unwrap_or_default();
        let text = fit_text(value, col_width - 4.0, BODY_SIZE);
        ctx.layer
            .use_text(text, BODY_SIZE, Mm(x + 2.0), Mm(top - ROW_HEIGHT_MM + 2.5), &ctx.font);
    }

    ctx.y -= ROW_HEIGHT_MM;
}

/// Documento A4: título geral + uma seção com tabela por data.
/// Quebra de página repete o cabeçalho da tabela.
pub fn generate_pdf(
    availability: &Availability,
    columns: &[String],
    output_path: &Path,
    date_format: &str,
    title: &str,
) -> Result<()> {
    let (doc, page, layer) = PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DispoError::PdfGeneration(format!("fonte: {:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| DispoError::PdfGeneration(format!("fonte: {:?}", e)))?;

    let mut ctx = PdfContext {
        layer: doc.get_page(page).get_layer(layer),
        doc,
        font,
        bold,
        y: A4_HEIGHT_MM - MARGIN_MM,
    };
    begin_layer(&ctx.layer);

    let title_x = ((A4_WIDTH_MM - text_width_mm(title, TITLE_SIZE)) / 2.0).max(MARGIN_MM);
    ctx.y -= 6.0;
    ctx.layer.use_text(title, TITLE_SIZE, Mm(title_x), Mm(ctx.y), &ctx.bold);
    ctx.y -= 14.0;

    let table_width = A4_WIDTH_MM - 2.0 * MARGIN_MM;
    let header: Vec<String> = columns.iter().map(|c| title_case(c)).collect();
    for (date, couriers) in availability {
        // a seção precisa caber: título da data + cabeçalho + 1 linha
        ctx.ensure_room(DATE_HEADING_MM + 2.0 * ROW_HEIGHT_MM);
        draw_date_heading(&mut ctx, *date, date_format);
        draw_header_row(&mut ctx, &header, table_width);

        for courier in couriers {
            if ctx.y - ROW_HEIGHT_MM < MARGIN_MM {
                ctx.new_page();
                draw_header_row(&mut ctx, &header, table_width);
            }
            draw_row(&mut ctx, columns, courier, table_width);
        }

        ctx.y -= SECTION_GAP_MM;
    }

    let file = File::create(output_path)?;
    ctx.doc
        .save(&mut BufWriter::new(file))
        .map_err(|e| DispoError::PdfGeneration(format!("salvar: {:?}", e)))?;

    Ok(())
}
