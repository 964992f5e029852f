/// Turning whatever is in storage into a usable link list

use crate::links::{LinkConfig, LinkEntry};
use log::{debug, warn};
use serde_json::Value;

/// Result of reconciling a raw storage read
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub config: LinkConfig,
    /// Defaults were substituted and should be written back
    pub seeded: bool,
}

impl Reconciled {
    fn seeded() -> Self {
        Reconciled {
            config: LinkConfig::defaults(),
            seeded: true,
        }
    }
}

/// Build the authoritative link list from a raw storage value.
///
/// Missing, non-list or empty values fall back to the built-in defaults.
/// A list whose links are all disabled is kept as is. Elements that can't be
/// read as links are skipped.
pub fn reconcile(raw: Option<Value>) -> Reconciled {
    let items = match raw {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => {
            debug!("No stored links, using defaults");
            return Reconciled::seeded();
        }
        Some(other) => {
            warn!("Stored links are not a list ({}), using defaults", json_kind(&other));
            return Reconciled::seeded();
        }
    };

    let links: Vec<LinkEntry> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| parse_entry(index, item))
        .collect();

    if links.is_empty() {
        debug!("Stored link list is empty, using defaults");
        return Reconciled::seeded();
    }

    Reconciled {
        config: LinkConfig::new(links),
        seeded: false,
    }
}

fn parse_entry(index: usize, item: Value) -> Option<LinkEntry> {
    if !item.is_object() {
        warn!("Skipping stored link {}: expected an object, got {}", index, json_kind(&item));
        return None;
    }

    match serde_json::from_value(item) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Skipping stored link {}: {}", index, e);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
