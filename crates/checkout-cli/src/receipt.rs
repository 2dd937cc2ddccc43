//! Plain-text receipt rendering for an [`OrderSummary`].

use std::io::{self, Write};

use checkout_core::OrderSummary;

const WIDTH: usize = 48;

/// Writes a receipt: one line per item, promotion and markdown notes, then
/// the totals.
pub fn write_receipt<W: Write>(summary: &OrderSummary, out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, "Order {}", summary.order_id)?;
    writeln!(out, "Opened {}", summary.opened_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "{}", "-".repeat(WIDTH))?;

    if summary.lines.is_empty() {
        writeln!(out, "(no items)")?;
    }

    for line in &summary.lines {
        let label = format!("{} {} @ ${:.2}", line.name, line.amount, line.price);
        writeln!(out, "{:<width$}{:>10.2}", label, line.total, width = WIDTH - 10)?;

        if line.markdown > 0.0 {
            writeln!(out, "    markdown -${:.2}", line.markdown)?;
        }
        if let Some(promotion) = &line.promotion {
            writeln!(out, "    {}", promotion)?;
        }
        if line.savings > 0.005 {
            writeln!(out, "    you saved ${:.2}", line.savings)?;
        }
    }

    writeln!(out, "{}", "-".repeat(WIDTH))?;
    total_line(out, "Items", summary.line_count as f64, 0)?;
    total_line(out, "Regular price", summary.regular_total, 2)?;
    total_line(out, "Savings", summary.savings, 2)?;
    total_line(out, "TOTAL", summary.total, 2)?;
    writeln!(out, "{}", rule)
}

fn total_line<W: Write>(out: &mut W, label: &str, value: f64, precision: usize) -> io::Result<()> {
    writeln!(
        out,
        "{:<width$}{:>10.precision$}",
        label,
        value,
        width = WIDTH - 10,
        precision = precision
    )
}
