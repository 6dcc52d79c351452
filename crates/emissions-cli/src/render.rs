//! Plain-text rendering of a summary.

use emissions_core::{format_magnitude, AggregateTable, Highlight, Summary};
use std::fmt::Write;

const DEFAULT_TITLE: &str = "Emissões de gases de efeito estufa";

fn magnitude(value: f64) -> String {
    format_magnitude(value).unwrap_or_else(|_| value.to_string())
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn table(out: &mut String, heading: &str, table: &AggregateTable) {
    let _ = writeln!(out, "\n## {heading}");
    let header: Vec<&str> = table
        .key_columns()
        .iter()
        .chain(table.measure_columns())
        .map(String::as_str)
        .collect();
    let _ = writeln!(out, "{}", header.join("\t"));

    for row in table.rows() {
        let keys = row.keys.iter().map(ToString::to_string);
        let measures = row.measures.iter().map(|m| cell(*m));
        let line: Vec<String> = keys.chain(measures).collect();
        let _ = writeln!(out, "{}", line.join("\t"));
    }
}

fn highlight(out: &mut String, caption: &str, h: &Highlight) {
    let _ = writeln!(
        out,
        "{caption}: {} ({} de toneladas)",
        h.label,
        magnitude(h.value)
    );
}

/// Render every table and highlight of `summary` as text.
pub(crate) fn summary_text(title: Option<&str>, summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", title.unwrap_or(DEFAULT_TITLE));

    let Some(h) = &summary.highlights else {
        let _ = writeln!(out, "\nNo data for current filters.");
        return out;
    };

    let _ = writeln!(
        out,
        "\nTotal de emissões: {} de toneladas ({} registros)",
        magnitude(summary.total_emission),
        summary.record_count
    );
    highlight(&mut out, "Ano mais poluente", &h.max_year);
    highlight(&mut out, "Ano menos poluente", &h.min_year);
    highlight(&mut out, "Gás com mais emissões", &h.max_gas);
    highlight(&mut out, "Gás com menos emissões", &h.min_gas);
    highlight(&mut out, "Estado com mais emissões", &h.max_state);
    highlight(&mut out, "Estado com menos emissões", &h.min_state);
    highlight(&mut out, "Setor com mais emissões", &h.max_sector);

    table(&mut out, "Emissões por estado", &summary.state_totals);
    table(&mut out, "Emissões por setor", &summary.sector_totals);
    table(&mut out, "Emissões por ano", &summary.year_totals);
    table(&mut out, "Emissões por gás", &summary.gas_totals);
    table(&mut out, "Gás dominante por estado", &summary.state_top_gas);
    table(&mut out, "Setor dominante por estado", &summary.state_top_sector);
    table(&mut out, "Média de emissões por ano e gás", &summary.year_gas_pivot);

    out
}
