//! Policy preference list carried by a parsed service config.
//!
//! Shape:
//! ```json
//! { "loadBalancingConfig": [ { "weighted_x": {...} }, { "round_robin": {} } ] }
//! ```
//! The deprecated `"loadBalancingPolicy": "ROUND_ROBIN"` form is honored
//! only when no `loadBalancingConfig` entries exist.

use serde_json::{Map, Value};

use autolb_core::error::{LbError, Result};
use autolb_core::lb::{Attributes, ATTR_SERVICE_CONFIG};

const KEY_LOAD_BALANCING_CONFIG: &str = "loadBalancingConfig";
const KEY_LOAD_BALANCING_POLICY: &str = "loadBalancingPolicy";

/// One `(policy name, raw config)` entry of the preference list.
#[derive(Debug, Clone, PartialEq)]
pub struct LbConfig {
    policy_name: String,
    raw_config: Value,
}

impl LbConfig {
    pub fn new(policy_name: impl Into<String>, raw_config: Value) -> Self {
        Self {
            policy_name: policy_name.into(),
            raw_config,
        }
    }

    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    pub fn raw_config(&self) -> &Value {
        &self.raw_config
    }
}

/// Extract the service config object from resolution attributes, if any.
pub fn service_config_from_attributes(attrs: &Attributes) -> Result<Option<&Map<String, Value>>> {
    match attrs.get(ATTR_SERVICE_CONFIG) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(m)) => Ok(Some(m)),
        Some(other) => Err(LbError::InvalidServiceConfig(format!(
            "service config must be an object, got {other}"
        ))),
    }
}

/// Preference-ordered policy list of a service config. Empty when the
/// config names no policy.
pub fn lb_configs(service_config: &Map<String, Value>) -> Result<Vec<LbConfig>> {
    let mut out = Vec::new();

    if let Some(raw) = service_config.get(KEY_LOAD_BALANCING_CONFIG) {
        let list = raw.as_array().ok_or_else(|| {
            LbError::InvalidServiceConfig(format!("{KEY_LOAD_BALANCING_CONFIG} must be a list, got {raw}"))
        })?;
        for entry in list {
            out.push(unwrap_lb_config(entry)?);
        }
    }

    if out.is_empty() {
        if let Some(raw) = service_config.get(KEY_LOAD_BALANCING_POLICY) {
            let policy = raw.as_str().ok_or_else(|| {
                LbError::InvalidServiceConfig(format!("{KEY_LOAD_BALANCING_POLICY} must be a string, got {raw}"))
            })?;
            out.push(LbConfig::new(policy.to_ascii_lowercase(), Value::Object(Map::new())));
        }
    }

    Ok(out)
}

/// `{ "name": {config} }` -> `LbConfig`. Exactly one key is allowed.
fn unwrap_lb_config(entry: &Value) -> Result<LbConfig> {
    let obj = entry.as_object().ok_or_else(|| {
        LbError::InvalidServiceConfig(format!("LoadBalancingConfig entry must be an object, got {entry}"))
    })?;
    let mut iter = obj.iter();
    let (name, config) = match (iter.next(), iter.next()) {
        (Some(kv), None) => kv,
        _ => {
            return Err(LbError::InvalidServiceConfig(format!(
                "There are {} fields in a LoadBalancingConfig object. Exactly one is expected. Config={entry}",
                obj.len()
            )))
        }
    };
    if !config.is_object() {
        return Err(LbError::InvalidServiceConfig(format!(
            "config of policy '{name}' must be an object, got {config}"
        )));
    }
    Ok(LbConfig::new(name.clone(), config.clone()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => Map::new(),
        }
    }

    #[test]
    fn reads_config_list_in_order() {
        let sc = obj(json!({
            "loadBalancingConfig": [
                { "weighted_x": { "a": 1 } },
                { "round_robin": {} }
            ]
        }));
        let list = lb_configs(&sc).unwrap();
        let names: Vec<&str> = list.iter().map(LbConfig::policy_name).collect();
        assert_eq!(names, vec!["weighted_x", "round_robin"]);
        assert_eq!(list[0].raw_config(), &json!({ "a": 1 }));
    }

    #[test]
    fn falls_back_to_deprecated_policy_field() {
        let sc = obj(json!({ "loadBalancingPolicy": "ROUND_ROBIN" }));
        let list = lb_configs(&sc).unwrap();
        assert_eq!(list, vec![LbConfig::new("round_robin", json!({}))]);
    }

    #[test]
    fn config_list_wins_over_deprecated_field() {
        let sc = obj(json!({
            "loadBalancingConfig": [ { "pick_first": {} } ],
            "loadBalancingPolicy": "ROUND_ROBIN"
        }));
        let list = lb_configs(&sc).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].policy_name(), "pick_first");
    }

    #[test]
    fn rejects_multi_key_entry() {
        let sc = obj(json!({
            "loadBalancingConfig": [ { "a": {}, "b": {} } ]
        }));
        let err = lb_configs(&sc).unwrap_err();
        assert!(err.to_string().contains("There are 2 fields"));
    }

    #[test]
    fn no_policy_yields_empty_list() {
        assert!(lb_configs(&Map::new()).unwrap().is_empty());
    }

    #[test]
    fn non_object_service_config_is_rejected() {
        let attrs = Attributes::new().with(ATTR_SERVICE_CONFIG, "nope");
        assert!(service_config_from_attributes(&attrs).is_err());
        assert!(service_config_from_attributes(&Attributes::new()).unwrap().is_none());
    }
}
