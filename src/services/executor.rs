use crate::api::handlers::upload::UploadSubmissionRequest;
use crate::services::credentials::DelegatedCredentials;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Name of the on-chain function a submission is dispatched to.
pub const SUBMIT_HF_UPLOAD: &str = "submitHFUpload";

/// A delegated user operation ready for the execution service.
///
/// Built fresh for every request; the executor is its only consumer. `Debug`
/// redacts the signing material so the call can be logged safely.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationCall {
    pub account_address: String,
    pub private_key: String,
    pub deferred_action_digest: String,
    pub init_code: String,
    pub function_name: String,
    pub args: Vec<Value>,
}

impl UserOperationCall {
    /// Assemble the `submitHFUpload` call. Argument order matches the
    /// execution service's calling convention and must not change:
    /// `[accountAddress, trainingId, huggingFaceId, numSessions,
    /// telemetryEnabled]`.
    pub fn submit_hf_upload(
        credentials: DelegatedCredentials,
        request: &UploadSubmissionRequest,
    ) -> Self {
        let args = vec![
            Value::String(credentials.account_address.clone()),
            request.training_id.clone(),
            request.hugging_face_id.clone(),
            request.num_sessions.clone(),
            request.telemetry_enabled.clone(),
        ];

        Self {
            account_address: credentials.account_address,
            private_key: credentials.private_key,
            deferred_action_digest: credentials.deferred_action_digest,
            init_code: credentials.init_code,
            function_name: SUBMIT_HF_UPLOAD.to_string(),
            args,
        }
    }
}

impl fmt::Debug for UserOperationCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserOperationCall")
            .field("account_address", &self.account_address)
            .field("private_key", &"<redacted>")
            .field("deferred_action_digest", &"<redacted>")
            .field("init_code", &self.init_code)
            .field("function_name", &self.function_name)
            .field("args", &"<redacted>")
            .finish()
    }
}

/// Response from the execution service, relayed to the client unchanged.
///
/// The body is kept as raw bytes: the gateway makes no assumption about what
/// the execution service replies with, JSON or otherwise.
#[derive(Debug, Clone)]
pub struct ExecutorResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ExecutorResponse {
    /// Convenience constructor for JSON replies.
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: body.to_string().into_bytes(),
        }
    }
}

/// Seam to the external user-operation execution service.
#[async_trait::async_trait]
pub trait OperationExecutor: Send + Sync {
    /// Submit one call. Invoked at most once per request; never retried here.
    async fn execute(&self, call: UserOperationCall) -> Result<ExecutorResponse>;
}

/// Executor backed by an HTTP account-abstraction backend
pub struct HttpOperationExecutor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOperationExecutor {
    pub fn new(endpoint: String, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build executor HTTP client")?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait::async_trait]
impl OperationExecutor for HttpOperationExecutor {
    async fn execute(&self, call: UserOperationCall) -> Result<ExecutorResponse> {
        tracing::info!(function = %call.function_name, account = %call.account_address, "dispatching user operation");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&call)
            .send()
            .await
            .with_context(|| format!("executor request to {} failed", self.endpoint))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .context("failed to read executor response body")?
            .to_vec();

        Ok(ExecutorResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials() -> DelegatedCredentials {
        DelegatedCredentials {
            account_address: "0xabc".to_string(),
            private_key: "k".to_string(),
            init_code: "0x".to_string(),
            deferred_action_digest: "0xdeadbeef".to_string(),
        }
    }

    fn request() -> UploadSubmissionRequest {
        serde_json::from_value(json!({
            "orgId": "org_2",
            "trainingId": "t1",
            "huggingFaceId": "hf1",
            "numSessions": 3,
            "telemetryEnabled": true
        }))
        .unwrap()
    }

    #[test]
    fn test_submit_hf_upload_arg_order() {
        let call = UserOperationCall::submit_hf_upload(credentials(), &request());

        assert_eq!(call.function_name, "submitHFUpload");
        assert_eq!(
            call.args,
            vec![json!("0xabc"), json!("t1"), json!("hf1"), json!(3), json!(true)]
        );
        assert_eq!(call.account_address, "0xabc");
        assert_eq!(call.private_key, "k");
        assert_eq!(call.init_code, "0x");
        assert_eq!(call.deferred_action_digest, "0xdeadbeef");
    }

    #[test]
    fn test_call_serializes_camel_case() {
        let call = UserOperationCall::submit_hf_upload(credentials(), &request());
        let encoded = serde_json::to_value(&call).unwrap();

        assert_eq!(encoded["accountAddress"], "0xabc");
        assert_eq!(encoded["functionName"], "submitHFUpload");
        assert_eq!(encoded["deferredActionDigest"], "0xdeadbeef");
        assert_eq!(encoded["initCode"], "0x");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let call = UserOperationCall::submit_hf_upload(credentials(), &request());
        let rendered = format!("{:?}", call);

        assert!(!rendered.contains("0xdeadbeef"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("submitHFUpload"));
    }

    #[test]
    fn test_missing_fields_forwarded_as_null() {
        let sparse: UploadSubmissionRequest =
            serde_json::from_value(json!({ "orgId": "org_2" })).unwrap();
        let call = UserOperationCall::submit_hf_upload(credentials(), &sparse);

        assert_eq!(call.args[1], Value::Null);
        assert_eq!(call.args[4], Value::Null);
    }
}
