//! Success/error normalization into the host's flat record stream

use ledgerlink_domain::constants::{SUCCESS_KEY, VALUE_KEY};
use ledgerlink_domain::{ErrorRecord, LedgerLinkError, OutputRecord};
use serde_json::{Map, Value};

/// Turn an API result into zero or more success records.
///
/// - absent or `null` yields nothing
/// - arrays fan out one record per element; non-object elements are wrapped
///   as `{value}`
/// - objects pass through
/// - other scalars are wrapped as `{value}`
///
/// Every record gets `success: true`; no other key is touched.
pub fn normalize(value: Option<Value>) -> Vec<OutputRecord> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(elements)) => elements.into_iter().map(into_success_record).collect(),
        Some(other) => vec![into_success_record(other)],
    }
}

fn into_success_record(value: Value) -> OutputRecord {
    let mut record = match value {
        Value::Object(map) => map,
        scalar => {
            let mut map = Map::new();
            map.insert(VALUE_KEY.to_string(), scalar);
            map
        }
    };
    record.insert(SUCCESS_KEY.to_string(), Value::Bool(true));
    record
}

/// Uniform `{message}` shape of a failure.
pub fn to_error_record(error: &LedgerLinkError) -> ErrorRecord {
    ErrorRecord { message: error.message() }
}

#[cfg(test)]
mod tests {
    use ledgerlink_domain::UNKNOWN_ERROR_MESSAGE;
    use serde_json::json;

    use super::*;

    fn as_values(records: Vec<OutputRecord>) -> Vec<Value> {
        records.into_iter().map(Value::Object).collect()
    }

    #[test]
    fn null_and_absent_produce_no_records() {
        assert!(normalize(None).is_empty());
        assert!(normalize(Some(Value::Null)).is_empty());
    }

    #[test]
    fn arrays_fan_out_one_record_per_element() {
        let input = json!([{ "id": "doc-123" }, 7, null, "x", [1]]);
        let records = as_values(normalize(Some(input)));

        assert_eq!(
            records,
            vec![
                json!({ "id": "doc-123", "success": true }),
                json!({ "value": 7, "success": true }),
                json!({ "value": null, "success": true }),
                json!({ "value": "x", "success": true }),
                json!({ "value": [1], "success": true }),
            ]
        );
    }

    #[test]
    fn empty_array_produces_no_records() {
        assert!(normalize(Some(json!([]))).is_empty());
    }

    #[test]
    fn objects_keep_their_keys_and_gain_success() {
        let records =
            as_values(normalize(Some(json!({ "id": "doc-123", "success": false, "n": 1 }))));
        assert_eq!(records, vec![json!({ "id": "doc-123", "success": true, "n": 1 })]);
    }

    #[test]
    fn scalars_are_wrapped() {
        assert_eq!(as_values(normalize(Some(json!(true)))), vec![json!({ "value": true, "success": true })]);
        assert_eq!(as_values(normalize(Some(json!("ok")))), vec![json!({ "value": "ok", "success": true })]);
    }

    #[test]
    fn error_records_carry_the_bare_message() {
        let record = to_error_record(&LedgerLinkError::Network("API Error".into()));
        assert_eq!(record.message, "API Error");
        assert_eq!(Value::Object(record.into_output()), json!({ "error": "API Error" }));

        let blank = to_error_record(&LedgerLinkError::api("", None));
        assert_eq!(blank.message, UNKNOWN_ERROR_MESSAGE);
    }
}
