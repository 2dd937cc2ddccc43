//! # Scan Scripts
//!
//! A scan script is what a lane would feed the order, one action per line:
//!
//! ```text
//! # morning regular
//! scan Soda
//! scan Soda
//! weigh Ground Beef 2.5
//! remove Soda 1
//! remove-weight Ground Beef 0.5
//! void Soda
//! total
//! ```
//!
//! Item names may contain spaces; the quantity or weight is always the last
//! word. Blank lines and `#` comments are skipped.
//!
//! ## Replay
//! ```text
//! ┌──────────┐  parse   ┌─────────┐  apply   ┌─────────┐
//! │   line   │ ───────► │ Command │ ───────► │  Order  │
//! └──────────┘          └─────────┘          └─────────┘
//!      │ bad syntax          │ rejected by the order
//!      ▼                     ▼
//!   "line N: ..." reported, replay continues
//! ```

use std::fmt;
use std::io::Write;

use checkout_core::{CheckoutResult, Order};
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// One scan script action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Scan { name: String },
    Weigh { name: String, weight: f64 },
    Remove { name: String, qty: u32 },
    RemoveWeight { name: String, weight: f64 },
    Void { name: String },
    Total,
}

impl Command {
    /// Parses one script line. Returns `Ok(None)` for blank lines and
    /// comments. `line_no` is 1-based and only used for error messages.
    pub fn parse(line_no: usize, line: &str) -> CliResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let error = |reason: String| CliError::Script {
            line: line_no,
            reason,
        };

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "scan" => Command::Scan {
                name: name_only(rest).map_err(error)?,
            },
            "void" => Command::Void {
                name: name_only(rest).map_err(error)?,
            },
            "weigh" => {
                let (name, weight) = name_and_value(rest).map_err(error)?;
                Command::Weigh {
                    name,
                    weight: parse_weight(weight).map_err(error)?,
                }
            }
            "remove" => {
                let (name, qty) = name_and_value(rest).map_err(error)?;
                Command::Remove {
                    name,
                    qty: qty
                        .parse()
                        .map_err(|_| error(format!("'{}' is not a whole quantity", qty)))?,
                }
            }
            "remove-weight" => {
                let (name, weight) = name_and_value(rest).map_err(error)?;
                Command::RemoveWeight {
                    name,
                    weight: parse_weight(weight).map_err(error)?,
                }
            }
            "total" if rest.is_empty() => Command::Total,
            "total" => return Err(error("'total' takes no arguments".to_string())),
            other => return Err(error(format!("unknown command '{}'", other))),
        };

        Ok(Some(command))
    }

    /// Applies the command to an order. `Total` never fails.
    pub fn apply(&self, order: &mut Order<'_>) -> CheckoutResult<()> {
        match self {
            Command::Scan { name } => order.scan_unit(name),
            Command::Weigh { name, weight } => order.scan_weight(name, *weight),
            Command::Remove { name, qty } => order.remove_units(name, *qty),
            Command::RemoveWeight { name, weight } => order.remove_weight(name, *weight),
            Command::Void { name } => order.remove_all(name),
            Command::Total => Ok(()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Scan { name } => write!(f, "scan {}", name),
            Command::Weigh { name, weight } => write!(f, "weigh {} {}", name, weight),
            Command::Remove { name, qty } => write!(f, "remove {} {}", name, qty),
            Command::RemoveWeight { name, weight } => {
                write!(f, "remove-weight {} {}", name, weight)
            }
            Command::Void { name } => write!(f, "void {}", name),
            Command::Total => write!(f, "total"),
        }
    }
}

fn name_only(rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err("missing item name".to_string());
    }
    Ok(rest.to_string())
}

fn name_and_value(rest: &str) -> Result<(String, &str), String> {
    match rest.rsplit_once(char::is_whitespace) {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value)),
        _ => Err("expected an item name followed by an amount".to_string()),
    }
}

fn parse_weight(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a weight", value))
}

// =============================================================================
// Replay
// =============================================================================

/// Outcome of replaying a script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    /// Commands the order accepted.
    pub applied: usize,
    /// One message per line that was skipped.
    pub rejected: Vec<String>,
}

impl ReplayReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Replays `script` against `order`, writing running totals and rejections
/// to `out`. Bad lines are reported and skipped; only write failures abort.
pub fn replay<W: Write>(
    order: &mut Order<'_>,
    script: &str,
    out: &mut W,
) -> CliResult<ReplayReport> {
    let mut report = ReplayReport::default();

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;

        let command = match Command::parse(line_no, line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = line_no, error = %err, "Skipping unparsable script line");
                writeln!(out, "! {}", err)?;
                report.rejected.push(err.to_string());
                continue;
            }
        };

        match command.apply(order) {
            Ok(()) => {
                debug!(
                    line = line_no,
                    command = %command,
                    total = order.total_price(),
                    "Applied script line"
                );
                report.applied += 1;
                if command == Command::Total {
                    writeln!(out, "  running total: ${:.2}", order.total_price())?;
                }
            }
            Err(err) => {
                let message = format!("Line {}: {} rejected: {}", line_no, command, err);
                warn!(line = line_no, error = %err, "Order rejected script line");
                writeln!(out, "! {}", message)?;
                report.rejected.push(message);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{BogoUnit, Catalog, Item, NForX, SaleMode};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(Item::new("Soda", SaleMode::Unit, 4.99)).unwrap();
        catalog.insert(Item::new("Cereal", SaleMode::Unit, 2.50)).unwrap();
        catalog
            .insert(Item::new("Ground Beef", SaleMode::Weight, 5.99))
            .unwrap();
        catalog
            .set_promotion("Soda", NForX::new(3, 12.0).with_limit(3))
            .unwrap();
        catalog
            .set_promotion("Cereal", BogoUnit::new(1, 1, 100.0))
            .unwrap();
        catalog
    }

    fn parse(line: &str) -> Option<Command> {
        Command::parse(1, line).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse("scan Soda"),
            Some(Command::Scan {
                name: "Soda".into()
            })
        );
        assert_eq!(
            parse("  weigh Ground Beef 2.5  "),
            Some(Command::Weigh {
                name: "Ground Beef".into(),
                weight: 2.5
            })
        );
        assert_eq!(
            parse("REMOVE Soda 2"),
            Some(Command::Remove {
                name: "Soda".into(),
                qty: 2
            })
        );
        assert_eq!(
            parse("remove-weight Ground Beef 0.75"),
            Some(Command::RemoveWeight {
                name: "Ground Beef".into(),
                weight: 0.75
            })
        );
        assert_eq!(
            parse("void Ground Beef"),
            Some(Command::Void {
                name: "Ground Beef".into()
            })
        );
        assert_eq!(parse("total"), Some(Command::Total));
        assert_eq!(parse(""), None);
        assert_eq!(parse("   # comment"), None);
    }

    #[test]
    fn test_parse_errors() {
        for line in [
            "scan",
            "weigh Ground Beef",
            "weigh Ground Beef heavy",
            "remove Soda -1",
            "remove Soda 1.5",
            "remove 3",
            "total 3",
            "scna Soda",
        ] {
            assert!(
                matches!(Command::parse(7, line), Err(CliError::Script { line: 7, .. })),
                "expected '{}' to be rejected",
                line
            );
        }
    }

    #[test]
    fn test_display_parses_back() {
        let command = Command::RemoveWeight {
            name: "Ground Beef".into(),
            weight: 0.5,
        };
        assert_eq!(parse(&command.to_string()), Some(command));
    }

    #[test]
    fn test_replay() {
        let catalog = catalog();
        let mut order = Order::new(&catalog);
        let mut out = Vec::new();

        let script = "\
# three sodas for twelve
scan Soda
scan Soda
scan Soda
total
scan Cereal
scan Cereal
weigh Ground Beef 2
remove-weight Ground Beef 1
total
";
        let report = replay(&mut order, script, &mut out).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.applied, 9);
        assert!((order.total_price() - (12.0 + 2.50 + 5.99)).abs() < 1e-9);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("running total: $12.00"));
        assert!(printed.contains("running total: $20.49"));
    }

    #[test]
    fn test_replay_reports_and_continues() {
        let catalog = catalog();
        let mut order = Order::new(&catalog);
        let mut out = Vec::new();

        let script = "\
scan Soda
scan Milk
weigh Soda 1.0
remove Cereal 1
frobnicate
scan Soda
";
        let report = replay(&mut order, script, &mut out).unwrap();

        assert_eq!(report.applied, 2);
        assert_eq!(report.rejected.len(), 4);
        assert!(report.rejected[0].starts_with("Line 2: scan Milk rejected"));
        assert!(report.rejected[3].starts_with("Line 5:"));
        assert!((order.total_price() - 4.99 * 2.0).abs() < 1e-9);

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().filter(|l| l.starts_with('!')).count(), 4);
    }
}
