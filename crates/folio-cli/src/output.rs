//! Terminal output.
//!
//! Content goes to stdout as JSON, one value per line unless pretty-printed,
//! so it can be piped into `jq`. Status lines are decorated for humans.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use folio_core::ContentItem;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// `label: value`, with the label dimmed.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

pub fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One item per line, or pretty-printed blocks with `pretty`.
pub fn items(items: &[ContentItem], pretty: bool) -> Result<()> {
    for item in items {
        if pretty {
            json_pretty(item)?;
        } else {
            json(item)?;
        }
    }
    Ok(())
}
