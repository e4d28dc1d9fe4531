//! Text bar charts for the terminal.
//!
//! Two charts mirror the simulator screens: the category distribution
//! (bars against a fixed 100% scale) and the revenue cascade (bars scaled
//! to the largest figure, labelled in thousands of euros).

use serde::Serialize;
use ticket_core::constants::{DISTRIBUTION_TOTAL, SIAE_RATE, VAT_RATE};
use ticket_core::{Distribution, RevenueBreakdown};

use crate::format::{kilo_euro, plain};

const FILLED: char = '█';
const NEGATIVE: char = '-';

#[derive(Debug, Clone, Serialize)]
pub struct ChartRow {
    pub label: String,
    pub value: f64,
    /// Bar length in cells
    pub cells: usize,
    pub negative: bool,
    /// Value label printed after the bar
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub title: String,
    pub width: usize,
    pub rows: Vec<ChartRow>,
}

impl Chart {
    pub fn render(&self) -> String {
        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');

        for row in &self.rows {
            let fill = if row.negative { NEGATIVE } else { FILLED };
            let bar: String = std::iter::repeat(fill).take(row.cells).collect();
            out.push_str(&format!(
                "{:<label_width$} │{:<width$} {}\n",
                row.label,
                bar,
                row.display,
                label_width = label_width,
                width = self.width,
            ));
        }

        out
    }
}

/// Category percentages against a 100% scale
pub fn distribution_chart(distribution: &Distribution, width: usize) -> Chart {
    let rows = distribution
        .iter()
        .map(|(category, value)| ChartRow {
            label: category.display_name().to_string(),
            value,
            cells: cells(value.clamp(0.0, DISTRIBUTION_TOTAL), DISTRIBUTION_TOTAL, width),
            negative: value < 0.0,
            display: format!("{}%", plain(value)),
        })
        .collect();

    Chart {
        title: "Distribuzione Biglietti".to_string(),
        width,
        rows,
    }
}

/// The revenue cascade, scaled to the largest absolute figure
pub fn revenue_chart(revenue: &RevenueBreakdown, municipal_pct: f64, width: usize) -> Chart {
    let entries = [
        ("Ricavo Lordo".to_string(), revenue.gross_revenue),
        (format!("IVA ({}%)", (VAT_RATE * 100.0).round()), revenue.iva),
        (format!("SIAE ({}%)", (SIAE_RATE * 100.0).round()), revenue.siae),
        ("Diritti Prevendita".to_string(), revenue.total_fees),
        ("Ricavo Netto".to_string(), revenue.net_revenue),
        (format!("Quota Comune ({}%)", municipal_pct), revenue.commune_share),
        ("Ricavo Finale".to_string(), revenue.final_net_revenue),
    ];

    let scale = entries
        .iter()
        .map(|(_, v)| v.abs())
        .fold(0.0_f64, f64::max);

    let rows = entries
        .into_iter()
        .map(|(label, value)| ChartRow {
            label,
            value,
            cells: cells(value.abs(), scale, width),
            negative: value < 0.0,
            display: kilo_euro(value),
        })
        .collect();

    Chart {
        title: "Dettaglio Ricavi".to_string(),
        width,
        rows,
    }
}

fn cells(value: f64, scale: f64, width: usize) -> usize {
    if scale <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value / scale) * width as f64).round().clamp(0.0, width as f64) as usize
}
