/// Link data structures for Nav Shortcuts
use crate::error::LinkError;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Where a link came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Shipped with the extension; can be disabled, never removed
    Predefined,
    /// Added by the user
    Custom,
}

/// A single navigation shortcut as stored in sync storage
///
/// Older versions of the extension wrote entries without `enabled` (custom
/// links) and with an `originalIndex` hint (built-in links), so every field
/// except the kind tolerates being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    #[serde(alias = "type")]
    pub kind: LinkKind,
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "enabled_by_default", deserialize_with = "lenient_enabled")]
    pub enabled: bool,
    #[serde(
        default,
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<u32>,
    #[serde(
        default,
        rename = "originalIndex",
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_index: Option<u32>,
}

fn enabled_by_default() -> bool {
    true
}

/// Positions come back from JS storage as plain numbers, sometimes `2.0`
/// rather than `2`. Any other value (strings, negatives, fractions) drops the
/// hint, never the link.
fn lenient_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64).and_then(|n| {
        if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
            Some(n as u32)
        } else {
            None
        }
    }))
}

/// Only a real `false` disables a link; `null` or junk counts as missing.
fn lenient_enabled<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_bool).unwrap_or(true))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(id) => Some(id),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

impl LinkEntry {
    pub fn predefined(id: &str, name: &str, url: &str, order: u32) -> LinkEntry {
        LinkEntry {
            kind: LinkKind::Predefined,
            id: Some(id.to_string()),
            name: name.to_string(),
            url: url.to_string(),
            enabled: true,
            order: Some(order),
            original_index: None,
        }
    }

    pub fn custom(name: &str, url: &str) -> LinkEntry {
        LinkEntry {
            kind: LinkKind::Custom,
            id: None,
            name: name.to_string(),
            url: url.to_string(),
            enabled: true,
            order: None,
            original_index: None,
        }
    }

    /// Has both a name and a URL to render
    pub fn is_renderable(&self) -> bool {
        !self.name.trim().is_empty() && !self.url.trim().is_empty()
    }

    pub fn is_removable(&self) -> bool {
        self.kind == LinkKind::Custom
    }
}

/// The links shipped with the extension, used whenever storage has nothing usable.
pub fn default_links() -> Vec<LinkEntry> {
    vec![
        LinkEntry::predefined("returns", "Returns", "/spr/returns/history", 0),
        LinkEntry::predefined(
            "support-call",
            "Support Call",
            "/gp/help/customer/express/c2c/popup.html",
            1,
        ),
    ]
}

/// The user's ordered list of links; sequence order is display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkConfig {
    pub links: Vec<LinkEntry>,
}

impl LinkConfig {
    pub fn new(links: Vec<LinkEntry>) -> Self {
        LinkConfig { links }
    }

    pub fn defaults() -> Self {
        LinkConfig::new(default_links())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LinkEntry> {
        self.links.get(index)
    }

    /// Append a new enabled custom link and return its position.
    pub fn add_custom(&mut self, name: &str, url: &str) -> Result<usize, LinkError> {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return Err(LinkError::MissingField);
        }

        self.links.push(LinkEntry::custom(name, url));
        self.renumber();
        Ok(self.links.len() - 1)
    }

    /// Remove a custom link. Built-in links are refused.
    pub fn remove(&mut self, index: usize) -> Result<LinkEntry, LinkError> {
        let entry = self.check_index(index)?;
        if !entry.is_removable() {
            return Err(LinkError::NotRemovable(entry.name.clone()));
        }

        let removed = self.links.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Flip `enabled` and return the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, LinkError> {
        let enabled = !self.check_index(index)?.enabled;
        self.set_enabled(index, enabled)?;
        Ok(enabled)
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<(), LinkError> {
        self.check_index(index)?;
        self.links[index].enabled = enabled;
        Ok(())
    }

    /// Move the link at `from` so it ends up at position `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), LinkError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let entry = self.links.remove(from);
        self.links.insert(to, entry);
        self.renumber();
        Ok(())
    }

    /// Keep each stored `order` hint equal to the entry's position.
    pub fn renumber(&mut self) {
        for (position, entry) in self.links.iter_mut().enumerate() {
            entry.order = u32::try_from(position).ok();
        }
    }

    /// Links the content script should show, in display order.
    ///
    /// Enabled entries with a blank name or URL are skipped with a warning.
    pub fn enabled_links(&self) -> impl Iterator<Item = &LinkEntry> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.enabled)
            .filter_map(|(position, entry)| {
                if entry.is_renderable() {
                    Some(entry)
                } else {
                    warn!(
                        "Skipping link at position {} ({:?}): missing name or URL",
                        position, entry.name
                    );
                    None
                }
            })
    }

    fn check_index(&self, index: usize) -> Result<&LinkEntry, LinkError> {
        self.links.get(index).ok_or(LinkError::OutOfRange {
            index,
            len: self.links.len(),
        })
    }
}

impl From<Vec<LinkEntry>> for LinkConfig {
    fn from(links: Vec<LinkEntry>) -> Self {
        LinkConfig::new(links)
    }
}
