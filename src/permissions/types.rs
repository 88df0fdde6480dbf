use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Definitive outcome of applying conditions to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorizeResult {
    Allow,
    Deny,
}

/// A primitive rule reference, e.g. `{ "rule": "IS_ENTITY_OWNER", "params": ["user:default/alice"] }`.
///
/// Rules are defined and evaluated by the plugin that owns the resource type;
/// this side only carries them. Every key besides `rule` (`resourceType`,
/// `params`, anything newer) is kept as received, explicit nulls included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionCondition {
    pub rule: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PermissionCondition {
    pub fn new(rule: impl Into<String>, params: Value) -> Self {
        let mut fields = Map::new();
        fields.insert("params".to_string(), params);
        Self {
            rule: rule.into(),
            fields,
        }
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.fields.get("resourceType").and_then(Value::as_str)
    }

    pub fn params(&self) -> Option<&Value> {
        self.fields.get("params")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllOfCriteria {
    #[serde(rename = "allOf")]
    pub all_of: Vec<PermissionCriteria>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyOfCriteria {
    #[serde(rename = "anyOf")]
    pub any_of: Vec<PermissionCriteria>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotCriteria {
    pub not: Box<PermissionCriteria>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Boolean combination of permission conditions.
///
/// Serialized as `{ "allOf": [...] }`, `{ "anyOf": [...] }`, `{ "not": ... }`
/// or a bare [`PermissionCondition`]. Keys next to the combinator are carried
/// along in `extra` so the tree is forwarded exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionCriteria {
    AllOf(AllOfCriteria),
    AnyOf(AnyOfCriteria),
    Not(NotCriteria),
    Condition(PermissionCondition),
}

impl PermissionCriteria {
    pub fn all_of(criteria: Vec<PermissionCriteria>) -> Self {
        Self::AllOf(AllOfCriteria {
            all_of: criteria,
            extra: Map::new(),
        })
    }

    pub fn any_of(criteria: Vec<PermissionCriteria>) -> Self {
        Self::AnyOf(AnyOfCriteria {
            any_of: criteria,
            extra: Map::new(),
        })
    }

    pub fn negate(criteria: PermissionCriteria) -> Self {
        Self::Not(NotCriteria {
            not: Box::new(criteria),
            extra: Map::new(),
        })
    }

    pub fn condition(rule: impl Into<String>, params: Value) -> Self {
        Self::Condition(PermissionCondition::new(rule, params))
    }
}

/// Conditions a policy attached to a conditional decision, addressed to the
/// plugin that owns the resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsToApply {
    pub plugin_id: String,
    pub resource_type: String,
    pub conditions: PermissionCriteria,
}

// ---------- Wire types ----------

/// Body of `POST <plugin>/permissions/apply-conditions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyConditionsRequest {
    pub resource_ref: String,
    pub resource_type: String,
    pub conditions: PermissionCriteria,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyConditionsResponse {
    pub result: AuthorizeResult,
}

/// Body accepted by the relay endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub plugin_id: String,
    pub resource_ref: String,
    pub resource_type: String,
    pub conditions: PermissionCriteria,
}

impl RelayRequest {
    pub fn into_parts(self) -> (String, ConditionsToApply) {
        (
            self.resource_ref,
            ConditionsToApply {
                plugin_id: self.plugin_id,
                resource_type: self.resource_type,
                conditions: self.conditions,
            },
        )
    }
}
