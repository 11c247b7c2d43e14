//! Operator commands read from stdin.

use netpulse_common::models::{CellKey, OptimizationFlag, Region, Service};
use netpulse_engine::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle(OptimizationFlag, CellKey),
    Reset(CellKey),
    Flags(CellKey),
    Table,
    Summary,
    Trend,
    Metrics,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  hw <service> <region>      toggle hardware acceleration
  qos <service> <region>     toggle QoS optimization
  reset <service> <region>   reset nodes
  flags <service> <region>   show optimization flags
  table | summary | trend    render the latest view
  metrics | json             dump the latest tick
  help | quit
multi-word names: Quest_Store or \"Quest Store\"";

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Names are matched loosely against the catalog; unknown names are kept
/// verbatim so the engine can reject them as stale references.
pub fn parse(line: &str, catalog: &Catalog) -> Result<Option<Command>, String> {
    let words = split_words(line)?;
    let Some((verb, args)) = words.split_first() else {
        return Ok(None);
    };

    let cell = |args: &[String]| -> Result<CellKey, String> {
        match args {
            [service, region] => Ok(CellKey {
                service: catalog
                    .find_service(service)
                    .cloned()
                    .unwrap_or_else(|| Service::new(service.as_str())),
                region: catalog
                    .find_region(region)
                    .cloned()
                    .unwrap_or_else(|| Region::new(region.as_str())),
            }),
            _ => Err(format!("{verb}: expected <service> <region>")),
        }
    };

    let no_args = |cmd: Command| -> Result<Option<Command>, String> {
        if args.is_empty() {
            Ok(Some(cmd))
        } else {
            Err(format!("{verb}: takes no arguments"))
        }
    };

    match verb.to_ascii_lowercase().as_str() {
        "hw" => Ok(Some(Command::Toggle(
            OptimizationFlag::HardwareAcceleration,
            cell(args)?,
        ))),
        "qos" => Ok(Some(Command::Toggle(
            OptimizationFlag::QosOptimization,
            cell(args)?,
        ))),
        "reset" => Ok(Some(Command::Reset(cell(args)?))),
        "flags" => Ok(Some(Command::Flags(cell(args)?))),
        "table" => no_args(Command::Table),
        "summary" => no_args(Command::Summary),
        "trend" => no_args(Command::Trend),
        "metrics" => no_args(Command::Metrics),
        "json" => no_args(Command::Json),
        "help" | "?" => no_args(Command::Help),
        "quit" | "exit" => no_args(Command::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if quoted {
        return Err("unterminated quote".into());
    }
    if !current.is_empty() {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(line: &str) -> Option<Command> {
        parse(line, &Catalog::default()).unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_ok("   "), None);
    }

    #[test]
    fn toggle_resolves_catalog_names() {
        assert_eq!(
            parse_ok("hw quest_store apac"),
            Some(Command::Toggle(
                OptimizationFlag::HardwareAcceleration,
                CellKey::new("Quest Store", "APAC")
            ))
        );
        assert_eq!(
            parse_ok(r#"QOS "Quest Store" EU-West"#),
            Some(Command::Toggle(
                OptimizationFlag::QosOptimization,
                CellKey::new("Quest Store", "EU-West")
            ))
        );
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(
            parse_ok("reset Threads APAC"),
            Some(Command::Reset(CellKey::new("Threads", "APAC")))
        );
    }

    #[test]
    fn arity_and_verbs_are_checked() {
        let catalog = Catalog::default();
        assert!(parse("hw Facebook", &catalog).is_err());
        assert!(parse("table now", &catalog).is_err());
        assert!(parse("launch", &catalog).is_err());
        assert!(parse("hw \"Quest Store APAC", &catalog).is_err());
    }

    #[test]
    fn bare_commands() {
        assert_eq!(parse_ok("summary"), Some(Command::Summary));
        assert_eq!(parse_ok("exit"), Some(Command::Quit));
        assert_eq!(parse_ok("?"), Some(Command::Help));
    }
}
