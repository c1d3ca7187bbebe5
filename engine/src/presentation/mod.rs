// Renders snapshots for the terminal. This is the only place that formats money and dates;
// the controller hands over plain numbers.
use crate::config::OutputFormat;
use crate::error::EngineError;
use shared::brazilian_format::{format_currency, format_decimal, format_local_date, parse_monetary_value};
use shared::models::ViewSnapshot;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub trait SnapshotRenderer {
    fn render(&self, snapshot: &ViewSnapshot) -> Result<String, EngineError>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn SnapshotRenderer + Send + Sync> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

pub struct JsonRenderer;

impl SnapshotRenderer for JsonRenderer {
    fn render(&self, snapshot: &ViewSnapshot) -> Result<String, EngineError> {
        serde_json::to_string_pretty(snapshot)
            .map_err(|e| EngineError::ProcessingError(format!("Failed to serialize snapshot: {}", e)))
    }
}

/// Plain-text dashboard with the same sections and labels as the web panel.
pub struct TextRenderer;

impl SnapshotRenderer for TextRenderer {
    fn render(&self, snapshot: &ViewSnapshot) -> Result<String, EngineError> {
        let mut out = String::new();
        write_dashboard(&mut out, snapshot)
            .map_err(|e| EngineError::ProcessingError(format!("Failed to render snapshot: {}", e)))?;
        Ok(out)
    }
}

fn write_dashboard(out: &mut String, snapshot: &ViewSnapshot) -> std::fmt::Result {
    let last_update = snapshot
        .latest_payment
        .map(format_local_date)
        .unwrap_or_else(|| "N/A".to_string());
    writeln!(out, "Última atualização: {}", last_update)?;

    let (total_title, nature_title) = match snapshot.filter.department() {
        Some(name) => (
            format!("Total Depto. ({})", name),
            format!("Gastos por Natureza ({})", name),
        ),
        None => (
            "Contas Pagas Mês".to_string(),
            "Gastos por Natureza (Geral)".to_string(),
        ),
    };
    writeln!(out, "{}: {}", total_title, format_currency(snapshot.grand_total))?;

    writeln!(
        out,
        "\nDepartamentos (top {} de {}):",
        snapshot.top_departments.len(),
        snapshot.department_count
    )?;
    for (idx, dept) in snapshot.top_departments.iter().enumerate() {
        let marker = if snapshot.filter.department() == Some(dept.name.as_str()) { '*' } else { ' ' };
        writeln!(out, " {}[{}] {:<30} {:>18}", marker, idx + 1, dept.name, format_currency(dept.total))?;
    }

    writeln!(out, "\n{}:", nature_title)?;
    if snapshot.natures.is_empty() {
        writeln!(out, "  (sem lançamentos)")?;
    }
    for nature in &snapshot.natures {
        writeln!(
            out,
            "  {:<30} {:>18} {:>6}% {}",
            nature.name,
            format_currency(nature.total),
            format_decimal(nature.percentage, 1),
            progress_bar(nature.percentage)
        )?;
    }

    writeln!(out, "\nLançamentos sem departamento:")?;
    if snapshot.issues.is_empty() {
        writeln!(out, "  Ótimo! Nenhum lançamento com problemas encontrado.")?;
    }
    for row in &snapshot.issues {
        writeln!(
            out,
            "  {:<30} {:>18}",
            row.nature().unwrap_or("Natureza não informada"),
            format_currency(parse_monetary_value(row.amount()))
        )?;
    }
    Ok(())
}

fn progress_bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{columns, DepartmentTotal, LedgerRow, NatureTotal, ViewFilter};
    use uuid::Uuid;

    fn snapshot(filter: ViewFilter) -> ViewSnapshot {
        ViewSnapshot {
            session_id: Uuid::nil(),
            filter,
            grand_total: 1250.5,
            natures: vec![
                NatureTotal { name: "ALUGUEL".into(), total: 1000.0, percentage: 79.968 },
                NatureTotal { name: "TARIFAS".into(), total: 250.5, percentage: 20.032 },
            ],
            top_departments: vec![
                DepartmentTotal { name: "FINANCEIRO".into(), total: 1250.5 },
                DepartmentTotal { name: "TI".into(), total: 300.0 },
            ],
            department_count: 2,
            issues: vec![],
            latest_payment: NaiveDate::from_ymd_opt(2024, 3, 5),
        }
    }

    #[test]
    fn test_text_unfiltered_labels() {
        let text = TextRenderer.render(&snapshot(ViewFilter::Unfiltered)).unwrap();
        assert!(text.contains("Última atualização: 05/03/2024"));
        assert!(text.contains("Contas Pagas Mês: R$ 1.250,50"));
        assert!(text.contains("Gastos por Natureza (Geral):"));
        assert!(text.contains("[1] FINANCEIRO"));
        assert!(text.contains("80,0%"));
        assert!(text.contains("Ótimo! Nenhum lançamento com problemas encontrado."));
    }

    #[test]
    fn test_text_filtered_labels() {
        let text = TextRenderer
            .render(&snapshot(ViewFilter::Department("TI".into())))
            .unwrap();
        assert!(text.contains("Total Depto. (TI): R$ 1.250,50"));
        assert!(text.contains("Gastos por Natureza (TI):"));
        assert!(text.contains("*[2] TI"));
    }

    #[test]
    fn test_text_issues_and_missing_date() {
        let mut snap = snapshot(ViewFilter::Unfiltered);
        snap.latest_payment = None;
        snap.issues = vec![
            LedgerRow::new([(columns::NATURE, "FRETE"), (columns::AMOUNT, "1.234,56")]),
            LedgerRow::new([(columns::AMOUNT, "10,00")]),
        ];
        let text = TextRenderer.render(&snap).unwrap();
        assert!(text.contains("Última atualização: N/A"));
        assert!(text.contains("FRETE"));
        assert!(text.contains("R$ 1.234,56"));
        assert!(text.contains("Natureza não informada"));
        assert!(!text.contains("Ótimo!"));
    }

    #[test]
    fn test_json_renderer() {
        let json = renderer_for(OutputFormat::Json)
            .render(&snapshot(ViewFilter::Unfiltered))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["grand_total"], 1250.5);
        assert_eq!(value["filter"], "unfiltered");
        assert_eq!(value["top_departments"][0]["name"], "FINANCEIRO");
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(100.0), "#".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }
}
