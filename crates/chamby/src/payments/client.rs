use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::payments::model::{EarningsSummary, PayoutSummary, VisitAuthorization};

#[derive(Debug, thiserror::Error)]
pub enum PaymentsError {
    #[error("payment service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("payment service error: {0}")]
    Remote(String),
    #[error("incomplete payment response: missing {0}")]
    Incomplete(&'static str),
}

#[derive(Serialize)]
struct AuthorizationRequest {
    #[serde(rename = "jobId")]
    job_id: Uuid,
}

#[derive(Deserialize)]
struct AuthorizationResponse {
    client_secret: Option<String>,
    payment_intent_id: Option<String>,
    amount: Option<i64>,
    currency: Option<String>,
    already_exists: Option<bool>,
    error: Option<String>,
}

/// Client for the remote payment functions. One attempt per call, no retry
/// or backoff; the caller decides whether to try again. Idempotency per job
/// is enforced by the remote side and signaled back via `already_exists`.
#[derive(Clone)]
pub struct FunctionsClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl FunctionsClient {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, name)
    }

    /// Create (or fetch the existing) visit-fee authorization for a job.
    pub async fn create_visit_authorization(
        &self,
        job_id: Uuid,
    ) -> Result<VisitAuthorization, PaymentsError> {
        let resp = self
            .http
            .post(self.function_url("create-visit-authorization"))
            .bearer_auth(&self.service_key)
            .json(&AuthorizationRequest { job_id })
            .send()
            .await?;

        let status = resp.status();
        let body: AuthorizationResponse = match resp.json().await {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(PaymentsError::Remote(format!(
                    "create-visit-authorization returned {status}"
                )));
            }
            // The service was reached; a body we cannot decode is a remote
            // fault, not a transport one.
            Err(e) => {
                return Err(PaymentsError::Remote(format!(
                    "create-visit-authorization returned malformed response: {e}"
                )));
            }
        };

        if let Some(msg) = body.error {
            tracing::warn!(%job_id, error = %msg, "visit authorization rejected remotely");
            return Err(PaymentsError::Remote(msg));
        }
        if !status.is_success() {
            return Err(PaymentsError::Remote(format!(
                "create-visit-authorization returned {status}"
            )));
        }

        // A success without the secret is unusable by the checkout flow;
        // never hand back a partial handle.
        let client_secret = body
            .client_secret
            .ok_or(PaymentsError::Incomplete("client_secret"))?;
        let payment_intent_id = body
            .payment_intent_id
            .ok_or(PaymentsError::Incomplete("payment_intent_id"))?;

        Ok(VisitAuthorization {
            client_secret,
            payment_intent_id,
            amount: body.amount,
            currency: body.currency,
            already_exists: body.already_exists,
        })
    }

    /// Payout aggregates for a provider; computed remotely, consumed as-is.
    pub async fn list_provider_payouts(
        &self,
        provider_id: Uuid,
    ) -> Result<PayoutSummary, PaymentsError> {
        self.call_aggregate("list-provider-payouts", provider_id)
            .await
    }

    pub async fn list_provider_earnings(
        &self,
        provider_id: Uuid,
    ) -> Result<EarningsSummary, PaymentsError> {
        self.call_aggregate("list-provider-earnings", provider_id)
            .await
    }

    async fn call_aggregate<T: serde::de::DeserializeOwned>(
        &self,
        name: &str,
        provider_id: Uuid,
    ) -> Result<T, PaymentsError> {
        let resp = self
            .http
            .post(self.function_url(name))
            .bearer_auth(&self.service_key)
            .header("x-provider-id", provider_id.to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| format!("{name} returned {status}"));
            return Err(PaymentsError::Remote(message));
        }

        resp.json::<T>().await.map_err(|e| {
            PaymentsError::Remote(format!("{name} returned malformed response: {e}"))
        })
    }
}
