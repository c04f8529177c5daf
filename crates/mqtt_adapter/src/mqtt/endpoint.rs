use common::domain::{DomainError, DomainResult};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Canonical category of inbound traffic, encoded in the topic's first segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    Telemetry,
    Event,
    Command,
    /// The topic named an endpoint the adapter does not know.
    Unknown,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Telemetry => "telemetry",
            EndpointKind::Event => "event",
            EndpointKind::Command => "command",
            EndpointKind::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EndpointKind::Unknown)
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointKind {
    type Err = DomainError;

    /// Parse a canonical endpoint name; aliases are resolved by [`EndpointTable`].
    fn from_str(name: &str) -> DomainResult<Self> {
        match name {
            "telemetry" => Ok(EndpointKind::Telemetry),
            "event" => Ok(EndpointKind::Event),
            "command" => Ok(EndpointKind::Command),
            other => Err(DomainError::InvalidConfig(format!(
                "Unknown endpoint kind '{}': expected telemetry, event or command",
                other
            ))),
        }
    }
}

/// Lookup table from topic endpoint names to endpoint kinds.
///
/// The default table accepts the canonical names and their one-letter short
/// forms (`t`, `e`, `c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    names: HashMap<String, EndpointKind>,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self::empty()
            .with_alias("telemetry", EndpointKind::Telemetry)
            .with_alias("t", EndpointKind::Telemetry)
            .with_alias("event", EndpointKind::Event)
            .with_alias("e", EndpointKind::Event)
            .with_alias("command", EndpointKind::Command)
            .with_alias("c", EndpointKind::Command)
    }
}

impl EndpointTable {
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    pub fn with_alias(mut self, name: impl Into<String>, kind: EndpointKind) -> Self {
        self.insert(name, kind);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: EndpointKind) {
        self.names.insert(name.into(), kind);
    }

    /// Add aliases given as comma-separated `alias=kind` pairs,
    /// e.g. `tel=telemetry,evt=event`.
    pub fn with_aliases(mut self, aliases: &str) -> DomainResult<Self> {
        for entry in aliases.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (alias, kind) = entry.split_once('=').ok_or_else(|| {
                DomainError::InvalidConfig(format!(
                    "Invalid endpoint alias '{}': expected 'alias=kind'",
                    entry
                ))
            })?;

            let alias = alias.trim();
            if alias.is_empty() || alias.contains('/') {
                return Err(DomainError::InvalidConfig(format!(
                    "Invalid endpoint alias name '{}'",
                    alias
                )));
            }

            self.insert(alias, kind.trim().parse()?);
        }

        Ok(self)
    }

    /// Resolve an endpoint name; names not in the table are `Unknown`.
    pub fn resolve(&self, name: &str) -> EndpointKind {
        self.names
            .get(name)
            .copied()
            .unwrap_or(EndpointKind::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_expands_short_names() {
        let table = EndpointTable::default();
        assert_eq!(table.resolve("t"), EndpointKind::Telemetry);
        assert_eq!(table.resolve("e"), EndpointKind::Event);
        assert_eq!(table.resolve("c"), EndpointKind::Command);
    }

    #[test]
    fn test_default_table_accepts_canonical_names() {
        let table = EndpointTable::default();
        assert_eq!(table.resolve("telemetry"), EndpointKind::Telemetry);
        assert_eq!(table.resolve("event"), EndpointKind::Event);
        assert_eq!(table.resolve("command"), EndpointKind::Command);
    }

    #[test]
    fn test_unknown_name_resolves_to_unknown() {
        let table = EndpointTable::default();
        let kind = table.resolve("x");
        assert_eq!(kind, EndpointKind::Unknown);
        assert!(!kind.is_known());
        // names are case sensitive
        assert_eq!(table.resolve("T"), EndpointKind::Unknown);
    }

    #[test]
    fn test_aliases_extend_table() {
        let table = EndpointTable::default()
            .with_aliases("tel=telemetry, evt = event")
            .unwrap();
        assert_eq!(table.resolve("tel"), EndpointKind::Telemetry);
        assert_eq!(table.resolve("evt"), EndpointKind::Event);
        assert_eq!(table.resolve("t"), EndpointKind::Telemetry);
    }

    #[test]
    fn test_invalid_aliases_are_rejected() {
        assert!(EndpointTable::default().with_aliases("tel").is_err());
        assert!(EndpointTable::default().with_aliases("tel=metrics").is_err());
        assert!(EndpointTable::default().with_aliases("=event").is_err());
        assert!(EndpointTable::default().with_aliases("a/b=event").is_err());
    }

    #[test]
    fn test_empty_alias_list_is_noop() {
        let table = EndpointTable::default().with_aliases("").unwrap();
        assert_eq!(table, EndpointTable::default());
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(EndpointKind::Telemetry.to_string(), "telemetry");
        assert_eq!(EndpointKind::Unknown.to_string(), "unknown");
    }
}
