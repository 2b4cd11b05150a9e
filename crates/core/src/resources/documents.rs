//! Document management domain: documents and their structure items.

use ledgerlink_domain::{Result, SendRequest};
use serde_json::Value;

use super::{deleted, segment, unsupported, ApiCall, ResourceKind};
use crate::params::ParameterReader;

const BASE: &str = "dms/v2";

pub(super) async fn document(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    let collection = format!("{BASE}/documents");

    match operation {
        "get" => {
            let id = params.required_string("documentId")?;
            let request = SendRequest::get(format!("{collection}/{}", segment(&id)));
            Ok(api.send(request).await?.into_body())
        }
        "getAll" => {
            // top/skip of zero mean "not set" here
            let request = SendRequest::get(collection)
                .query("filter", params.optional_string("filter"))
                .query("top", params.positive_number("top")?)
                .query("skip", params.positive_number("skip")?);
            Ok(api.send(request).await?.into_body())
        }
        "create" => {
            let data = params.required_json_object("documentData")?;
            let request = SendRequest::post(collection).json(Value::Object(data));
            Ok(api.send(request).await?.into_created())
        }
        "update" => {
            let id = params.required_string("documentId")?;
            let data = params.required_json_object("documentData")?;
            let request =
                SendRequest::put(format!("{collection}/{}", segment(&id))).json(Value::Object(data));
            Ok(api.send(request).await?.into_body())
        }
        "delete" => {
            let id = params.required_string("documentId")?;
            let request = SendRequest::delete(format!("{collection}/{}", segment(&id)));
            Ok(deleted(api.send(request).await?))
        }
        other => Err(unsupported(ResourceKind::Document, other)),
    }
}

pub(super) async fn structure_item(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    let document_id = params.required_string("documentId")?;
    let collection = format!("{BASE}/documents/{}/structure-items", segment(&document_id));

    match operation {
        "get" => {
            let id = params.required_string("structureItemId")?;
            let request = SendRequest::get(format!("{collection}/{}", segment(&id)));
            Ok(api.send(request).await?.into_body())
        }
        "getAll" => {
            let request = SendRequest::get(collection)
                .query("top", params.positive_number("top")?)
                .query("skip", params.positive_number("skip")?);
            Ok(api.send(request).await?.into_body())
        }
        "create" => {
            let data = params.required_json_object("structureItemData")?;
            let request = SendRequest::post(collection).json(Value::Object(data));
            Ok(api.send(request).await?.into_created())
        }
        other => Err(unsupported(ResourceKind::StructureItem, other)),
    }
}

#[cfg(test)]
mod tests {
    use ledgerlink_domain::{ApiDomain, ApiReply, HttpMethod};
    use serde_json::json;

    use super::*;
    use crate::resources::testing::{auth, reply, RecordingSender, StaticParams};

    fn call<'a>(sender: &'a RecordingSender, auth: &'a crate::auth::AuthContext) -> ApiCall<'a> {
        ApiCall { sender, auth, domain: ApiDomain::Documents }
    }

    #[tokio::test]
    async fn list_omits_zero_skip_and_keeps_filter_then_top() {
        let host = StaticParams::of([
            ("top", json!(10)),
            ("skip", json!(0)),
            ("filter", json!("number eq 12345")),
        ]);
        let sender = RecordingSender::default();
        let auth = auth();

        document("getAll", &ParameterReader::new(&host, 0), &call(&sender, &auth)).await.unwrap();

        let (_, request) = sender.calls().remove(0);
        assert_eq!(request.path, "dms/v2/documents");
        assert_eq!(
            request.query,
            vec![
                ("filter".to_string(), json!("number eq 12345")),
                ("top".to_string(), json!(10)),
                ("skip".to_string(), Value::Null),
            ]
        );
    }

    #[tokio::test]
    async fn create_without_body_reports_location() {
        let host = StaticParams::of([("documentData", json!(r#"{"description":"Invoice"}"#))]);
        let sender = RecordingSender::replying(vec![Ok(ApiReply {
            status: 201,
            body: None,
            location: Some("/documents/new-doc-123".into()),
        })]);
        let auth = auth();

        let result = document("create", &ParameterReader::new(&host, 0), &call(&sender, &auth))
            .await
            .unwrap();

        assert_eq!(result, Some(json!({ "success": true, "location": "/documents/new-doc-123" })));
        let (_, request) = sender.calls().remove(0);
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(json!({ "description": "Invoice" })));
    }

    #[tokio::test]
    async fn create_with_invalid_json_never_sends() {
        let host = StaticParams::of([("documentData", json!("invalid json"))]);
        let sender = RecordingSender::default();
        let auth = auth();

        let err = document("create", &ParameterReader::new(&host, 0), &call(&sender, &auth))
            .await
            .unwrap_err();

        assert!(err.message().contains("Invalid JSON"));
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_without_body_reports_success() {
        let host = StaticParams::of([("documentId", json!("doc-123"))]);
        let sender = RecordingSender::replying(vec![reply(204, None)]);
        let auth = auth();

        let result = document("delete", &ParameterReader::new(&host, 0), &call(&sender, &auth))
            .await
            .unwrap();

        assert_eq!(result, Some(json!({ "success": true })));
        let (_, request) = sender.calls().remove(0);
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.path, "dms/v2/documents/doc-123");
    }

    #[tokio::test]
    async fn structure_items_nest_under_their_document() {
        let host = StaticParams::of([("documentId", json!("doc-1")), ("structureItemId", json!("7"))]);
        let sender = RecordingSender::default();
        let auth = auth();

        structure_item("get", &ParameterReader::new(&host, 0), &call(&sender, &auth))
            .await
            .unwrap();

        let (_, request) = sender.calls().remove(0);
        assert_eq!(request.path, "dms/v2/documents/doc-1/structure-items/7");
    }
}
