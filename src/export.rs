//! Export rendering for reports and simulation data.
//!
//! Produces download blobs in the formats the report UI offers. The exact
//! byte layout is not part of the store contract; the store only guarantees
//! that a successful export yields a non-empty blob with the right content
//! type and bumps the per-format download counter.

use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::model::report::GeneratedReport;
use crate::model::simulation::TrafficSimulation;

/// A rendered export handed to the caller's download mechanism.
#[derive(Debug, Clone)]
pub struct ExportBlob {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV rendering error: {0}")]
    Csv(String),
    #[error("Workbook rendering error: {0}")]
    Workbook(String),
    #[error("JSON rendering error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render a report as CSV: header lines, the summary key metrics, then each
/// table with its headers and rows.
pub fn report_to_csv(report: &GeneratedReport) -> Result<ExportBlob, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let err = |e: csv::Error| ExportError::Csv(e.to_string());

    writer
        .write_record(["Report", report.name.as_str()])
        .map_err(err)?;
    let generated = report.generated_at.to_rfc3339();
    writer
        .write_record(["Generated", generated.as_str()])
        .map_err(err)?;
    writer.write_record(["Summary"]).map_err(err)?;
    let mut key_metrics: Vec<_> = report.data.summary.key_metrics.iter().collect();
    key_metrics.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in key_metrics {
        writer
            .write_record([key.as_str(), value.to_string().as_str()])
            .map_err(err)?;
    }

    for table in &report.data.tables {
        writer.write_record([table.title.as_str()]).map_err(err)?;
        writer.write_record(&table.headers).map_err(err)?;
        for row in &table.rows {
            writer.write_record(row).map_err(err)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    Ok(ExportBlob {
        filename: format!("{}.csv", report.id),
        content_type: "text/csv",
        bytes,
    })
}

fn xml_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Workbook(e.to_string())
}

/// Render a report as a SpreadsheetML workbook: a summary sheet plus one
/// sheet per data table. Readable by Excel and LibreOffice.
pub fn report_to_excel(report: &GeneratedReport) -> Result<ExportBlob, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::PI(BytesPI::new(
            "mso-application progid=\"Excel.Sheet\"",
        )))
        .map_err(xml_err)?;

    let mut workbook = BytesStart::new("Workbook");
    workbook.push_attribute(("xmlns", "urn:schemas-microsoft-com:office:spreadsheet"));
    workbook.push_attribute(("xmlns:ss", "urn:schemas-microsoft-com:office:spreadsheet"));
    writer.write_event(Event::Start(workbook)).map_err(xml_err)?;

    // Summary sheet
    let mut summary_rows: Vec<Vec<String>> = vec![
        vec!["Report Name".into(), report.name.clone()],
        vec!["Generated".into(), report.generated_at.to_rfc3339()],
        vec!["Total Pages".into(), report.metadata.total_pages.to_string()],
        vec!["Data Points".into(), report.metadata.data_points.to_string()],
    ];
    let mut key_metrics: Vec<_> = report.data.summary.key_metrics.iter().collect();
    key_metrics.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in key_metrics {
        summary_rows.push(vec![key.clone(), value.to_string()]);
    }
    write_worksheet(&mut writer, "Summary", &summary_rows)?;

    // One sheet per table; Excel caps sheet names at 31 characters.
    for (index, table) in report.data.tables.iter().enumerate() {
        let mut rows: Vec<Vec<String>> = vec![table.headers.clone()];
        rows.extend(table.rows.iter().cloned());
        let name: String = table.title.chars().take(31).collect();
        let name = if name.is_empty() {
            format!("Table {}", index + 1)
        } else {
            name
        };
        write_worksheet(&mut writer, &name, &rows)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("Workbook")))
        .map_err(xml_err)?;

    Ok(ExportBlob {
        filename: format!("{}.xls", report.id),
        content_type: "application/vnd.ms-excel",
        bytes: writer.into_inner(),
    })
}

fn write_worksheet<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    rows: &[Vec<String>],
) -> Result<(), ExportError> {
    let mut worksheet = BytesStart::new("Worksheet");
    worksheet.push_attribute(("ss:Name", name));
    writer.write_event(Event::Start(worksheet)).map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("Table")))
        .map_err(xml_err)?;

    for row in rows {
        writer
            .write_event(Event::Start(BytesStart::new("Row")))
            .map_err(xml_err)?;
        for cell in row {
            let mut data = BytesStart::new("Data");
            let cell_type = if cell.parse::<f64>().is_ok() {
                "Number"
            } else {
                "String"
            };
            data.push_attribute(("ss:Type", cell_type));
            writer
                .write_event(Event::Start(BytesStart::new("Cell")))
                .map_err(xml_err)?;
            writer.write_event(Event::Start(data)).map_err(xml_err)?;
            writer
                .write_event(Event::Text(BytesText::new(cell)))
                .map_err(xml_err)?;
            writer
                .write_event(Event::End(BytesEnd::new("Data")))
                .map_err(xml_err)?;
            writer
                .write_event(Event::End(BytesEnd::new("Cell")))
                .map_err(xml_err)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("Row")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("Table")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("Worksheet")))
        .map_err(xml_err)?;
    Ok(())
}

/// Render a report as a single-page PDF document.
///
/// No PDF crate is pulled in for this: the layout mirrors the report's text
/// content (title, generation time, key metrics, tables) and a minimal
/// PDF 1.4 document is assembled directly.
pub fn report_to_pdf(report: &GeneratedReport) -> Result<ExportBlob, ExportError> {
    let mut lines = vec![
        report.name.clone(),
        format!("Generated: {}", report.generated_at.to_rfc3339()),
        String::new(),
        "Executive Summary".to_string(),
    ];
    let mut key_metrics: Vec<_> = report.data.summary.key_metrics.iter().collect();
    key_metrics.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in key_metrics {
        lines.push(format!("{}: {}", key.replace('_', " ").to_uppercase(), value));
    }
    for table in &report.data.tables {
        lines.push(String::new());
        lines.push(table.title.clone());
        lines.push(table.headers.join(" | "));
        for row in table.rows.iter().take(10) {
            lines.push(row.join(" | "));
        }
    }
    // Single page at 14pt leading; drop whatever does not fit.
    lines.truncate(48);

    let mut content = String::from("BT\n/F1 11 Tf\n50 742 Td\n14 TL\n");
    for line in &lines {
        let escaped = line
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        content.push_str(&format!("({escaped}) Tj\nT*\n"));
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut bytes: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        offsets.push(bytes.len());
        bytes.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, object).as_bytes());
    }

    let xref_offset = bytes.len();
    bytes.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    bytes.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        bytes.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    bytes.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    Ok(ExportBlob {
        filename: format!("{}.pdf", report.id),
        content_type: "application/pdf",
        bytes,
    })
}

/// Serialize a simulation (parameters and results) as pretty-printed JSON.
pub fn simulation_to_json(simulation: &TrafficSimulation) -> Result<ExportBlob, ExportError> {
    let bytes = serde_json::to_vec_pretty(simulation)?;
    Ok(ExportBlob {
        filename: format!("{}.json", simulation.id),
        content_type: "application/json",
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn sample_report() -> GeneratedReport {
        seed::generated_reports().remove(0)
    }

    #[test]
    fn csv_export_contains_summary_and_name() {
        let report = sample_report();
        let blob = report_to_csv(&report).unwrap();
        let text = String::from_utf8(blob.bytes).unwrap();

        assert!(text.starts_with("Report,"));
        assert!(text.contains(&report.name));
        assert!(text.contains("peak_congestion"));
        assert_eq!(blob.content_type, "text/csv");
    }

    #[test]
    fn excel_export_is_a_spreadsheetml_workbook() {
        let report = sample_report();
        let blob = report_to_excel(&report).unwrap();
        let text = String::from_utf8(blob.bytes).unwrap();

        assert!(text.contains("mso-application"));
        assert!(text.contains("<Workbook"));
        assert!(text.contains("ss:Name=\"Summary\""));
        assert!(text.contains(&report.metadata.data_points.to_string()));
    }

    #[test]
    fn pdf_export_is_well_formed() {
        let report = sample_report();
        let blob = report_to_pdf(&report).unwrap();
        let text = String::from_utf8_lossy(&blob.bytes);

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("startxref"));
        assert_eq!(blob.filename, format!("{}.pdf", report.id));
    }

    #[test]
    fn simulation_json_round_trips() {
        let simulation = seed::simulations().remove(0);
        let blob = simulation_to_json(&simulation).unwrap();
        let decoded: TrafficSimulation = serde_json::from_slice(&blob.bytes).unwrap();
        assert_eq!(decoded, simulation);
    }
}
