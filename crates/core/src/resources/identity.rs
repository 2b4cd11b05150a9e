//! Identity domain: SCIM users and groups.

use ledgerlink_domain::{Result, SendRequest};
use serde_json::Value;

use super::{deleted, segment, unsupported, ApiCall, ResourceKind};
use crate::params::ParameterReader;

const BASE: &str = "iam/v1/scim";

/// Shared CRUD shape of the SCIM collections.
struct ScimCollection {
    kind: ResourceKind,
    path: &'static str,
    id_param: &'static str,
    data_param: &'static str,
}

const USERS: ScimCollection = ScimCollection {
    kind: ResourceKind::User,
    path: "Users",
    id_param: "userId",
    data_param: "userData",
};

const GROUPS: ScimCollection = ScimCollection {
    kind: ResourceKind::Group,
    path: "Groups",
    id_param: "groupId",
    data_param: "groupData",
};

pub(super) async fn user(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    if operation == "getMe" {
        let request = SendRequest::get(format!("{BASE}/{}/me", USERS.path));
        return Ok(api.send(request).await?.into_body());
    }
    USERS.execute(operation, params, api).await
}

pub(super) async fn group(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    GROUPS.execute(operation, params, api).await
}

impl ScimCollection {
    fn collection(&self) -> String {
        format!("{BASE}/{}", self.path)
    }

    fn member(&self, params: &ParameterReader<'_>) -> Result<String> {
        let id = params.required_string(self.id_param)?;
        Ok(format!("{}/{}", self.collection(), segment(&id)))
    }

    async fn execute(
        &self,
        operation: &str,
        params: &ParameterReader<'_>,
        api: &ApiCall<'_>,
    ) -> Result<Option<Value>> {
        match operation {
            "get" => {
                let request = SendRequest::get(self.member(params)?);
                Ok(api.send(request).await?.into_body())
            }
            "getAll" => {
                let request = SendRequest::get(self.collection())
                    .query("filter", params.optional_string("filter"))
                    .query("startIndex", params.optional_number("startIndex")?)
                    .query("count", params.optional_number("count")?)
                    .query("attributes", params.optional_string("attributes"));
                Ok(api.send(request).await?.into_body())
            }
            "create" => {
                let data = params.required_json_object(self.data_param)?;
                let request = SendRequest::post(self.collection()).json(Value::Object(data));
                Ok(api.send(request).await?.into_created())
            }
            "update" => {
                let path = self.member(params)?;
                let data = params.required_json_object(self.data_param)?;
                let request = SendRequest::put(path).json(Value::Object(data));
                Ok(api.send(request).await?.into_body())
            }
            "delete" => {
                let request = SendRequest::delete(self.member(params)?);
                Ok(deleted(api.send(request).await?))
            }
            other => Err(unsupported(self.kind, other)),
        }
    }
}
