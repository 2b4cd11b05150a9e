//! Order management domain: orders, their cost items and order types.

use ledgerlink_domain::{Result, SendRequest};
use serde_json::Value;

use super::{segment, unsupported, ApiCall, ResourceKind};
use crate::params::ParameterReader;

const BASE: &str = "order-management/v1";

const DEFAULT_TOP: u64 = 100;

pub(super) async fn order(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    let collection = format!("{BASE}/orders");

    match operation {
        "get" => {
            let id = params.required_string("orderId")?;
            let request = SendRequest::get(format!("{collection}/{}", segment(&id)));
            Ok(api.send(request).await?.into_body())
        }
        "getAll" => {
            let request = SendRequest::get(collection)
                .query("filter", params.optional_string("filter"))
                .query("top", Some(params.number_or("top", DEFAULT_TOP)?))
                .query("skip", params.optional_number("skip")?);
            Ok(api.send(request).await?.into_body())
        }
        "update" => {
            let id = params.required_string("orderId")?;
            let data = params.required_json_object("orderData")?;
            let request =
                SendRequest::put(format!("{collection}/{}", segment(&id))).json(Value::Object(data));
            Ok(api.send(request).await?.into_body())
        }
        "getCostItems" => {
            let id = params.required_string("orderId")?;
            let request = SendRequest::get(format!("{collection}/{}/cost-items", segment(&id)))
                .query("top", Some(params.number_or("top", DEFAULT_TOP)?))
                .query("skip", params.optional_number("skip")?);
            Ok(api.send(request).await?.into_body())
        }
        other => Err(unsupported(ResourceKind::Order, other)),
    }
}

pub(super) async fn order_type(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    match operation {
        "getAll" => {
            let request = SendRequest::get(format!("{BASE}/order-types"))
                .query("filter", params.optional_string("filter"));
            Ok(api.send(request).await?.into_body())
        }
        other => Err(unsupported(ResourceKind::OrderType, other)),
    }
}

#[cfg(test)]
mod tests {
    use ledgerlink_domain::ApiDomain;
    use serde_json::json;

    use super::*;
    use crate::resources::testing::{auth, RecordingSender, StaticParams};

    #[tokio::test]
    async fn cost_items_page_under_the_order() {
        let host = StaticParams::of([("orderId", json!("4711")), ("skip", json!("20"))]);
        let sender = RecordingSender::default();
        let auth = auth();
        let api = ApiCall { sender: &sender, auth: &auth, domain: ApiDomain::Orders };

        order("getCostItems", &ParameterReader::new(&host, 0), &api).await.unwrap();

        let (domain, request) = sender.calls().remove(0);
        assert_eq!(domain, ApiDomain::Orders);
        assert_eq!(request.path, "order-management/v1/orders/4711/cost-items");
        assert_eq!(
            request.query,
            vec![("top".to_string(), json!(100)), ("skip".to_string(), json!(20))]
        );
    }

    #[tokio::test]
    async fn update_requires_order_data() {
        let host = StaticParams::of([("orderId", json!("4711"))]);
        let sender = RecordingSender::default();
        let auth = auth();
        let api = ApiCall { sender: &sender, auth: &auth, domain: ApiDomain::Orders };

        let err = order("update", &ParameterReader::new(&host, 0), &api).await.unwrap_err();

        assert!(err.message().contains("orderData"));
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn order_types_only_list() {
        let host = StaticParams::of([]);
        let sender = RecordingSender::default();
        let auth = auth();
        let api = ApiCall { sender: &sender, auth: &auth, domain: ApiDomain::Orders };

        order_type("getAll", &ParameterReader::new(&host, 0), &api).await.unwrap();
        assert_eq!(sender.calls()[0].1.path, "order-management/v1/order-types");

        let err = order_type("get", &ParameterReader::new(&host, 0), &api).await.unwrap_err();
        assert!(err.is_configuration_fault());
    }
}
