//! Static field registries used to flag unrecognized configuration keys.
//!
//! Each chart model declares the full set of field names it accepts (model
//! name plus wire alias). When a model is built from a loose JSON mapping,
//! keys outside the registry are reported through `log::warn!` — never an
//! error, since the provider's schema gains keys over time and callers may
//! pass forward-compatible extras.

use serde_json::{Map, Value};

/// One accepted field: the model-side name and its wire alias, if any.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub name: &'static str,
    pub alias: Option<&'static str>,
}

impl FieldSpec {
    pub(crate) const fn new(name: &'static str) -> Self {
        FieldSpec { name, alias: None }
    }

    pub(crate) const fn aliased(name: &'static str, alias: &'static str) -> Self {
        FieldSpec {
            name,
            alias: Some(alias),
        }
    }

    fn matches(&self, key: &str) -> bool {
        self.name == key || self.alias == Some(key)
    }
}

/// Warn about every key in `config` that no registry entry accepts.
/// Returns the unrecognized keys so tests can observe the check without
/// capturing log output.
pub(crate) fn warn_unknown_keys(
    model: &str,
    config: &Map<String, Value>,
    fields: &[FieldSpec],
) -> Vec<String> {
    let unknown: Vec<String> = config
        .keys()
        .filter(|key| !fields.iter().any(|f| f.matches(key)))
        .cloned()
        .collect();
    for key in &unknown {
        log::warn!("{model}: unrecognized field {key:?} ignored");
    }
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("title"),
        FieldSpec::aliased("source_name", "source-name"),
    ];

    #[test]
    fn known_keys_and_aliases_pass() {
        let config = json!({"title": "T", "source-name": "S"});
        let unknown = warn_unknown_keys("TestChart", config.as_object().unwrap(), FIELDS);
        assert!(unknown.is_empty());
    }

    #[test]
    fn unknown_keys_are_reported_by_name() {
        let config = json!({"title": "T", "sorce_name": "typo"});
        let unknown = warn_unknown_keys("TestChart", config.as_object().unwrap(), FIELDS);
        assert_eq!(unknown, vec!["sorce_name".to_string()]);
    }
}
