//! Interactions a catalog entry offers (chop, salvage, trade...).
//!
//! These are descriptive only; nothing in the tick executes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One action a player could perform on an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub action: String,
    /// Tool required, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Seconds the action takes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Interaction {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            tool: None,
            time: None,
            params: BTreeMap::new(),
        }
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_time(mut self, seconds: u32) -> Self {
        self.time = Some(seconds);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let talk = Interaction::new("talk");
        assert_eq!(serde_json::to_string(&talk).unwrap(), r#"{"action":"talk"}"#);

        let chop: Interaction =
            serde_json::from_str(r#"{"action":"chop","tool":"axe","time":4}"#).unwrap();
        assert_eq!(chop, Interaction::new("chop").with_tool("axe").with_time(4));
    }

    #[test]
    fn test_params() {
        let fill = Interaction::new("fill").with_param("item", "contaminated_water");
        assert_eq!(fill.param("item"), Some("contaminated_water"));
        assert_eq!(fill.param("fuel_type"), None);
    }
}
