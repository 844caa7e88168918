use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;

use crate::model::maturity::{dimension_order, MaturityAssessment};
use crate::model::profile::MaturityProfile;
use crate::report::{benchmark_statement, company_slug, report_date, ReportError};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const LINE_STEP: f64 = 6.0;
const TABLE_ROW_HEIGHT: f64 = 8.0;
const TABLE_COLUMN_WIDTHS: [f64; 3] = [95.0, 35.0, 40.0];

pub fn pdf_name(company: &str, ts: &str) -> String {
    format!("maturity_report_{}_{}.pdf", company_slug(company), ts)
}

/// Render the maturity report: title, metadata, benchmark comparison
/// table, one interpretation sentence per dimension, recommendations.
pub fn write_maturity_pdf(
    assessment: &MaturityAssessment,
    profile: &MaturityProfile,
    recommendations: &[&str],
    out_dir: &Path,
    ts: &str,
) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(pdf_name(&assessment.company, ts));
    render(assessment, profile, recommendations, &path)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    Ok(path)
}

fn render(
    assessment: &MaturityAssessment,
    profile: &MaturityProfile,
    recommendations: &[&str],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (doc, page, layer) = PdfDocument::new(
        "Digital maturity report",
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    layer.use_text(
        "Digital maturity report",
        16.0,
        mm(MARGIN),
        mm(y),
        &font_bold,
    );
    y -= 12.0;

    for line in [
        format!("Company: {}", assessment.company),
        format!("Date: {}", report_date()),
        format!("Digital maturity index: {:.2}", assessment.index),
        format!("Digital maturity tier: {}", assessment.tier.label()),
    ] {
        layer.use_text(line, 10.0, mm(MARGIN), mm(y), &font);
        y -= LINE_STEP;
    }
    y -= LINE_STEP;

    layer.use_text(
        "Benchmark comparison",
        12.0,
        mm(MARGIN),
        mm(y),
        &font_bold,
    );
    y -= 10.0;
    y = draw_table(&layer, &font, &font_bold, assessment, profile, y);
    y -= 8.0;

    ensure_space(&doc, &mut layer, &mut y, 10.0 + LINE_STEP * 6.0);
    layer.use_text(
        "Interpretation of the results",
        12.0,
        mm(MARGIN),
        mm(y),
        &font_bold,
    );
    y -= 8.0;
    for (i, dim) in dimension_order().iter().enumerate() {
        ensure_space(&doc, &mut layer, &mut y, LINE_STEP);
        let sentence = format!(
            "{}: {}",
            dim.label(),
            benchmark_statement(assessment.dimension_scores[i], profile.benchmark(*dim))
        );
        layer.use_text(sentence, 10.0, mm(MARGIN), mm(y), &font);
        y -= LINE_STEP;
    }
    y -= LINE_STEP;

    ensure_space(&doc, &mut layer, &mut y, 10.0 + LINE_STEP * 5.0);
    layer.use_text(
        "Recommended actions",
        12.0,
        mm(MARGIN),
        mm(y),
        &font_bold,
    );
    y -= 8.0;
    for (i, rec) in recommendations.iter().enumerate() {
        ensure_space(&doc, &mut layer, &mut y, LINE_STEP);
        layer.use_text(
            format!("{}. {}", i + 1, rec),
            10.0,
            mm(MARGIN),
            mm(y),
            &font,
        );
        y -= LINE_STEP;
    }

    doc.save(&mut BufWriter::new(File::create(path)?))?;
    Ok(())
}

/// Ruled grid with a shaded header row. Returns the cursor below the
/// table.
fn draw_table(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    assessment: &MaturityAssessment,
    profile: &MaturityProfile,
    top: f64,
) -> f64 {
    let n_rows = dimension_order().len() + 1;
    let table_width: f64 = TABLE_COLUMN_WIDTHS.iter().sum();
    let bottom = top - TABLE_ROW_HEIGHT * n_rows as f64;

    layer.set_fill_color(Color::Rgb(Rgb::new(0.85, 0.85, 0.85, None)));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(mm(MARGIN), mm(top)), false),
            (Point::new(mm(MARGIN + table_width), mm(top)), false),
            (
                Point::new(mm(MARGIN + table_width), mm(top - TABLE_ROW_HEIGHT)),
                false,
            ),
            (Point::new(mm(MARGIN), mm(top - TABLE_ROW_HEIGHT)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);
    for i in 0..=n_rows {
        let y = top - TABLE_ROW_HEIGHT * i as f64;
        grid_line(layer, MARGIN, y, MARGIN + table_width, y);
    }
    let mut x = MARGIN;
    grid_line(layer, x, top, x, bottom);
    for width in TABLE_COLUMN_WIDTHS {
        x += width;
        grid_line(layer, x, top, x, bottom);
    }

    let header = ["Dimension", "Your score", "Industry benchmark"];
    write_table_row(layer, font_bold, &header, top);
    for (i, dim) in dimension_order().iter().enumerate() {
        let cells = [
            dim.label().to_string(),
            format!("{:.2}", assessment.dimension_scores[i]),
            format!("{:.1}", profile.benchmark(*dim)),
        ];
        let refs = [cells[0].as_str(), cells[1].as_str(), cells[2].as_str()];
        write_table_row(layer, font, &refs, top - TABLE_ROW_HEIGHT * (i + 1) as f64);
    }

    bottom
}

fn write_table_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    cells: &[&str; 3],
    row_top: f64,
) {
    let baseline = row_top - TABLE_ROW_HEIGHT + 2.5;
    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(TABLE_COLUMN_WIDTHS) {
        layer.use_text(*cell, 10.0, mm(x + 2.0), mm(baseline), font);
        x += width;
    }
}

fn grid_line(layer: &PdfLayerReference, x0: f64, y0: f64, x1: f64, y1: f64) {
    layer.add_line(Line {
        points: vec![
            (Point::new(mm(x0), mm(y0)), false),
            (Point::new(mm(x1), mm(y1)), false),
        ],
        is_closed: false,
    });
}

fn ensure_space(
    doc: &PdfDocumentReference,
    layer: &mut PdfLayerReference,
    y: &mut f64,
    needed: f64,
) {
    if *y - needed >= MARGIN {
        return;
    }
    let (page, new_layer) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
    *layer = doc.get_page(page).get_layer(new_layer);
    *y = PAGE_HEIGHT - MARGIN;
}

fn mm(v: f64) -> Mm {
    Mm(v as _)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::maturity::Tier;
    use crate::pipeline::recommend::recommendations_for;

    #[test]
    fn test_pdf_name_uses_slug() {
        assert_eq!(
            pdf_name("Acme d.o.o.", "20260101_000000"),
            "maturity_report_acme_d_o_o_20260101_000000.pdf"
        );
    }

    #[test]
    fn test_report_written() {
        let dir = tempfile::tempdir().unwrap();
        let assessment = MaturityAssessment {
            company: "Acme".to_string(),
            dimension_scores: [3.4, 2.6, 3.6, 4.4, 2.8],
            index: 3.42,
            tier: Tier::Intermediate,
        };
        let profile = MaturityProfile::default_v1();
        let path = write_maturity_pdf(
            &assessment,
            &profile,
            recommendations_for(assessment.tier),
            dir.path(),
            "20260101_000000",
        )
        .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }
}
