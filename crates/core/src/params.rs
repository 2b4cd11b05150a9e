//! Parameter extraction for resource handlers
//!
//! Reads node parameters for one item through the [`ExecutionHost`] port and
//! applies the common validation rules: required values must be present and
//! non-blank, optional values collapse blanks to `None`, JSON parameters
//! accept either an already structured value or JSON text.

use ledgerlink_domain::{LedgerLinkError, Result};
use serde_json::{Map, Number, Value};

use crate::api_ports::ExecutionHost;

/// Parameter view scoped to one input item.
pub struct ParameterReader<'a> {
    host: &'a dyn ExecutionHost,
    item_index: usize,
}

impl<'a> ParameterReader<'a> {
    pub fn new(host: &'a dyn ExecutionHost, item_index: usize) -> Self {
        Self { host, item_index }
    }

    fn raw(&self, name: &str) -> Option<Value> {
        self.host.parameter(name, self.item_index).filter(|value| !is_blank(value))
    }

    pub fn required_string(&self, name: &str) -> Result<String> {
        self.optional_string(name).ok_or_else(|| missing(name))
    }

    pub fn optional_string(&self, name: &str) -> Option<String> {
        match self.raw(name)? {
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            other => Some(other.to_string()),
        }
    }

    pub fn optional_number(&self, name: &str) -> Result<Option<Number>> {
        let Some(value) = self.raw(name) else {
            return Ok(None);
        };

        match value {
            Value::Number(number) => Ok(Some(number)),
            Value::String(text) => parse_number(text.trim())
                .map(Some)
                .ok_or_else(|| not_a_number(name)),
            _ => Err(not_a_number(name)),
        }
    }

    /// Optional number falling back to `default` when unset.
    pub fn number_or(&self, name: &str, default: u64) -> Result<Number> {
        Ok(self.optional_number(name)?.unwrap_or_else(|| Number::from(default)))
    }

    /// Optional number where zero means "not set".
    pub fn positive_number(&self, name: &str) -> Result<Option<Number>> {
        Ok(self.optional_number(name)?.filter(|number| number.as_f64() != Some(0.0)))
    }

    /// JSON parameter given either as structured data or as JSON text.
    pub fn json(&self, name: &str) -> Result<Option<Value>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(text)) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|err| LedgerLinkError::operation(format!("{name}: Invalid JSON: {err}"))),
            Some(value) => Ok(Some(value)),
        }
    }

    /// JSON parameter that must be an object (arrays and null are rejected).
    pub fn required_json_object(&self, name: &str) -> Result<Map<String, Value>> {
        match self.json(name)? {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(LedgerLinkError::operation(format!(
                "{name}: Invalid JSON: expected an object"
            ))),
            None => Err(missing(name)),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn missing(name: &str) -> LedgerLinkError {
    LedgerLinkError::operation(format!("The parameter \"{name}\" is required"))
}

fn not_a_number(name: &str) -> LedgerLinkError {
    LedgerLinkError::operation(format!("The parameter \"{name}\" must be a number"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    struct StaticHost(HashMap<&'static str, Value>);

    impl ExecutionHost for StaticHost {
        fn parameter(&self, name: &str, _item_index: usize) -> Option<Value> {
            self.0.get(name).cloned()
        }

        fn continue_on_fail(&self) -> bool {
            false
        }
    }

    fn host(entries: &[(&'static str, Value)]) -> StaticHost {
        StaticHost(entries.iter().cloned().collect())
    }

    #[test]
    fn required_string_rejects_missing_and_blank() {
        let host = host(&[("documentId", json!("   "))]);
        let params = ParameterReader::new(&host, 0);

        let err = params.required_string("documentId").unwrap_err();
        assert!(err.message().contains("documentId"));
        assert!(params.required_string("clientId").is_err());
    }

    #[test]
    fn numbers_are_accepted_as_numbers_or_numeric_text() {
        let host = host(&[("top", json!(10)), ("skip", json!("5")), ("bad", json!("ten"))]);
        let params = ParameterReader::new(&host, 0);

        assert_eq!(params.optional_number("top").unwrap(), Some(Number::from(10)));
        assert_eq!(params.optional_number("skip").unwrap(), Some(Number::from(5)));
        assert!(params.optional_number("bad").unwrap_err().message().contains("must be a number"));
        assert_eq!(params.number_or("count", 100).unwrap(), Number::from(100));
    }

    #[test]
    fn positive_number_treats_zero_as_unset() {
        let host = host(&[("skip", json!(0)), ("top", json!(10))]);
        let params = ParameterReader::new(&host, 0);

        assert_eq!(params.positive_number("skip").unwrap(), None);
        assert_eq!(params.positive_number("top").unwrap(), Some(Number::from(10)));
    }

    #[test]
    fn json_parameter_accepts_text_and_structured_values() {
        let host = host(&[
            ("asText", json!(r#"{"a":1}"#)),
            ("asValue", json!({ "b": 2 })),
        ]);
        let params = ParameterReader::new(&host, 0);

        assert_eq!(params.json("asText").unwrap(), Some(json!({ "a": 1 })));
        assert_eq!(params.json("asValue").unwrap(), Some(json!({ "b": 2 })));
        assert_eq!(params.json("absent").unwrap(), None);
    }

    #[test]
    fn malformed_json_names_the_parameter() {
        let host = host(&[("documentData", json!("invalid json"))]);
        let params = ParameterReader::new(&host, 0);

        let message = params.json("documentData").unwrap_err().message();
        assert!(message.contains("Invalid JSON"));
        assert!(message.contains("documentData"));
    }

    #[test]
    fn object_parameters_reject_arrays_and_null() {
        let host = host(&[("list", json!("[1,2]")), ("nothing", json!("null"))]);
        let params = ParameterReader::new(&host, 0);

        assert!(params.required_json_object("list").is_err());
        assert!(params.required_json_object("nothing").is_err());
    }
}
