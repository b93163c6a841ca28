use anyhow::Result;
use company_financials_lib::FinancialsRow;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    #[value(alias = "md")]
    Markdown,
}

#[derive(Tabled, Serialize)]
struct FinancialsDisplayRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Revenue")]
    #[serde(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Market Cap")]
    #[serde(rename = "Market Cap")]
    market_cap: String,
    #[tabled(rename = "Industry")]
    #[serde(rename = "Industry")]
    industry: String,
    #[tabled(rename = "Sector")]
    #[serde(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Updated")]
    #[serde(rename = "Updated")]
    updated_at: String,
}

fn build_financials_rows(rows: &[FinancialsRow]) -> Vec<FinancialsDisplayRow> {
    rows.iter()
        .map(|r| FinancialsDisplayRow {
            symbol: r.symbol.clone(),
            revenue: format_amount(r.revenue),
            market_cap: format_amount(r.market_cap),
            industry: r.industry.clone().unwrap_or_else(|| "-".to_string()),
            sector: r.sector.clone().unwrap_or_else(|| "-".to_string()),
            updated_at: r.updated_at.clone(),
        })
        .collect()
}

pub fn print_financials_table(rows: &[FinancialsRow]) {
    println!("{}", Table::new(build_financials_rows(rows)));
}

pub fn print_financials_markdown(rows: &[FinancialsRow]) {
    let mut table = Table::new(build_financials_rows(rows));
    table.with(Style::markdown());
    println!("{}", table);
}

/// CSV keeps raw numbers so the output can be re-imported.
pub fn print_financials_csv(rows: &[FinancialsRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_amount(value: Option<i64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    let abs = value.unsigned_abs() as f64;
    let sign = if value < 0 { "-" } else { "" };
    if abs >= 1e12 {
        format!("{}{:.2}T", sign, abs / 1e12)
    } else if abs >= 1e9 {
        format!("{}{:.2}B", sign, abs / 1e9)
    } else if abs >= 1e6 {
        format!("{}{:.1}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}{:.1}K", sign, abs / 1e3)
    } else {
        value.to_string()
    }
}
