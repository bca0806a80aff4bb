//! Rule configuration parsing (V1 object form and V2 array form).

use facerig_signals::NameIndexAllocator;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SolverError;
use crate::rule::{Item, Rule};

/// The two accepted configuration shapes. The shape itself is the version marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `{ signal: { target: weight } }`, one single-driver rule per signal.
    V1,
    /// `[ { "drivers": {…}, "targets": {…} } ]`, one rule per entry.
    V2,
}

impl ConfigFormat {
    /// Detects the shape from the first non-whitespace character: `{` is V1,
    /// anything else is V2. Returns `None` for blank text.
    pub fn detect(text: &str) -> Option<Self> {
        match text.trim_start().chars().next()? {
            '{' => Some(Self::V1),
            _ => Some(Self::V2),
        }
    }
}

/// Rules plus the id assignment for every name they mention.
///
/// Item indices in `rules` refer to ids in `signals` (drivers) and
/// `targets` (targets).
#[derive(Debug, Clone, Default)]
pub struct ParsedRules {
    /// Rules with at least one driver and one target.
    pub rules: Vec<Rule>,
    /// Input signal ids in first-seen order.
    pub signals: NameIndexAllocator,
    /// Output target ids in first-seen order.
    pub targets: NameIndexAllocator,
}

type WeightMap = IndexMap<String, f64>;

#[derive(Debug, Deserialize)]
struct RuleEntry {
    #[serde(default)]
    drivers: WeightMap,
    #[serde(default)]
    targets: WeightMap,
}

/// Parses rule configuration text in either shape.
///
/// Ids are assigned in order of first appearance, separately for signals
/// and targets. Rules without drivers or without targets are dropped, but
/// the names they mention keep their ids.
///
/// # Errors
///
/// Returns [`SolverError::MalformedConfig`] for blank text, invalid JSON, a
/// structure that matches neither shape, or an empty signal/target name.
pub fn parse_rules(text: &str) -> Result<ParsedRules, SolverError> {
    let format = ConfigFormat::detect(text).ok_or_else(|| SolverError::MalformedConfig {
        reason: "configuration is empty".to_string(),
    })?;
    let parsed = match format {
        ConfigFormat::V1 => parse_v1(text)?,
        ConfigFormat::V2 => parse_v2(text)?,
    };
    debug!(
        ?format,
        n_rules = parsed.rules.len(),
        n_signals = parsed.signals.len(),
        n_targets = parsed.targets.len(),
        "parsed rule configuration"
    );
    Ok(parsed)
}

fn malformed(err: serde_json::Error) -> SolverError {
    SolverError::MalformedConfig {
        reason: err.to_string(),
    }
}

fn parse_v1(text: &str) -> Result<ParsedRules, SolverError> {
    let raw: IndexMap<String, WeightMap> = serde_json::from_str(text).map_err(malformed)?;
    let mut out = ParsedRules::default();
    for (signal, targets) in &raw {
        let signal_id = allocate(&mut out.signals, signal)?;
        let targets = collect_items(&mut out.targets, targets)?;
        if targets.is_empty() {
            warn!(signal = %signal, "dropping rule with no targets");
            continue;
        }
        out.rules
            .push(Rule::new(vec![Item::new(signal_id, 1.0)], targets));
    }
    Ok(out)
}

fn parse_v2(text: &str) -> Result<ParsedRules, SolverError> {
    let raw: Vec<RuleEntry> = serde_json::from_str(text).map_err(malformed)?;
    let mut out = ParsedRules::default();
    for (i, entry) in raw.iter().enumerate() {
        let drivers = collect_items(&mut out.signals, &entry.drivers)?;
        let targets = collect_items(&mut out.targets, &entry.targets)?;
        if drivers.is_empty() || targets.is_empty() {
            warn!(
                entry = i,
                n_drivers = drivers.len(),
                n_targets = targets.len(),
                "dropping rule with no drivers or no targets"
            );
            continue;
        }
        out.rules.push(Rule::new(drivers, targets));
    }
    Ok(out)
}

fn collect_items(
    ids: &mut NameIndexAllocator,
    weights: &WeightMap,
) -> Result<Vec<Item>, SolverError> {
    weights
        .iter()
        .map(|(name, &weight)| Ok(Item::new(allocate(ids, name)?, weight)))
        .collect()
}

fn allocate(ids: &mut NameIndexAllocator, name: &str) -> Result<usize, SolverError> {
    if name.is_empty() {
        return Err(SolverError::MalformedConfig {
            reason: "signal and target names must not be empty".to_string(),
        });
    }
    Ok(ids.index_of(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(ConfigFormat::detect("{}"), Some(ConfigFormat::V1));
        assert_eq!(ConfigFormat::detect("  \n\t{ }"), Some(ConfigFormat::V1));
        assert_eq!(ConfigFormat::detect("[]"), Some(ConfigFormat::V2));
        assert_eq!(ConfigFormat::detect("null"), Some(ConfigFormat::V2));
        assert_eq!(ConfigFormat::detect("   "), None);
        assert_eq!(ConfigFormat::detect(""), None);
    }

    #[test]
    fn test_v1_one_rule_per_signal() {
        let parsed = parse_rules(
            r#"{
                "jawOpen": { "mouthOpen": 1.0, "jawDrop": 0.6 },
                "mouthSmile_L": { "smile_L": 1.0, "mouthOpen": 0.1 }
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.rules.len(), 2);
        assert_eq!(parsed.signals.clone().into_names(), ["jawOpen", "mouthSmile_L"]);
        assert_eq!(
            parsed.targets.clone().into_names(),
            ["mouthOpen", "jawDrop", "smile_L"]
        );

        let second = &parsed.rules[1];
        assert_eq!(second.drivers(), &[Item::new(1, 1.0)]);
        assert_eq!(second.targets(), &[Item::new(2, 1.0), Item::new(0, 0.1)]);
    }

    #[test]
    fn test_v1_drops_rules_without_targets() {
        let parsed = parse_rules(r#"{ "a": {}, "b": { "x": 1.0 } }"#).unwrap();
        assert_eq!(parsed.rules.len(), 1);
        // The dropped signal still has an id
        assert_eq!(parsed.signals.get("a"), Some(0));
        assert_eq!(parsed.rules[0].drivers(), &[Item::new(1, 1.0)]);
    }

    #[test]
    fn test_v2_multi_driver_rule() {
        let parsed = parse_rules(
            r#"[
                { "drivers": { "jawOpen": 1.0, "mouthSmile": 0.5 }, "targets": { "wideSmile": 1.0 } },
                { "drivers": { "mouthSmile": 1.0 }, "targets": { "smile": 1.0, "wideSmile": 0.2 } }
            ]"#,
        )
        .unwrap();
        assert_eq!(parsed.rules.len(), 2);
        assert_eq!(
            parsed.rules[0].drivers(),
            &[Item::new(0, 1.0), Item::new(1, 0.5)]
        );
        assert_eq!(
            parsed.rules[1].targets(),
            &[Item::new(1, 1.0), Item::new(0, 0.2)]
        );
    }

    #[test]
    fn test_v2_drops_incomplete_entries() {
        let parsed = parse_rules(
            r#"[
                { "drivers": { "a": 1.0 } },
                { "targets": { "t": 1.0 } },
                { "drivers": {}, "targets": { "u": 1.0 } },
                { "drivers": { "b": 0.5 }, "targets": { "t": 1.0 } }
            ]"#,
        )
        .unwrap();
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.signals.len(), 2);
        assert_eq!(parsed.targets.len(), 2);
    }

    #[test]
    fn test_empty_collections_parse() {
        assert!(parse_rules("{}").unwrap().rules.is_empty());
        assert!(parse_rules("[]").unwrap().rules.is_empty());
    }

    #[test]
    fn test_malformed_inputs() {
        for text in [
            "",
            "   ",
            "{",
            "[{\"drivers\": {\"a\": \"high\"}}]",
            "{\"a\": [1.0]}",
            "42",
        ] {
            assert!(
                matches!(parse_rules(text), Err(SolverError::MalformedConfig { .. })),
                "expected MalformedConfig for {text:?}"
            );
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = parse_rules(r#"{ "": { "x": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, SolverError::MalformedConfig { ref reason } if reason.contains("empty")));
    }
}
