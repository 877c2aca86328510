use reqwest::Url;
use serde_json::Value;

use crate::config::Api;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{ReportError, Result};

/// Top-level key of the project list response.
pub const PROJECT_ITEMS_KEY: &str = "ProjectItems";
/// Top-level key of the lottery result response.
pub const LOTTERY_RESULT_KEY: &str = "MyLotteryResult";

/// Where project and lottery JSON comes from.
///
/// Both calls return raw JSON; typed extraction happens in the record builder.
#[allow(async_fn_in_trait)]
pub trait LotterySource {
    /// Raw entries of the `ProjectItems` array.
    async fn fetch_project_list(&self, sink: &dyn DiagnosticSink) -> Result<Vec<Value>>;

    /// The `MyLotteryResult` object for one lottery.
    async fn fetch_lottery_detail(&self, lottery_id: &str, sink: &dyn DiagnosticSink)
        -> Result<Value>;
}

/// Client for the Dira "Invoker" API.
pub struct DiraClient {
    http: reqwest::Client,
    base: Url,
    api: Api,
}

impl DiraClient {
    pub fn new(api: &Api) -> Result<Self> {
        let base = Url::parse(&api.base_url).map_err(|e| ReportError::InvalidUrl {
            url: api.base_url.clone(),
            detail: e.to_string(),
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            api: api.clone(),
        })
    }

    /// Project list URL. The `param` value is itself a query string and gets
    /// percent-encoded as a whole.
    pub fn projects_url(&self) -> Url {
        let param = format!(
            "?firstApplicantIdentityNumber=&secondApplicantIdentityNumber=&ProjectStatus={}&Entitlement={}&PageNumber=1&PageSize={}&",
            self.api.project_status, self.api.entitlement, self.api.page_size
        );
        self.invoker_url("Projects", &param)
    }

    pub fn lottery_url(&self, lottery_id: &str) -> Url {
        let param = format!(
            "?lotteryNumber={}&firstApplicantIdentityNumber=&secondApplicantIdentityNumber=&LoginId=&",
            lottery_id
        );
        self.invoker_url("LotteryResult", &param)
    }

    fn invoker_url(&self, method: &str, param: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("method", method)
            .append_pair("param", param);
        url
    }

    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: Url, sink: &dyn DiagnosticSink) -> Result<Value> {
        let endpoint = url.to_string();
        let network = |source| ReportError::Network {
            endpoint: endpoint.clone(),
            source,
        };

        let response = self.http.get(url).send().await.map_err(network)?;
        sink.emit(Diagnostic::Status {
            endpoint: endpoint.clone(),
            status: response.status().as_u16(),
        });

        let body = response
            .error_for_status()
            .map_err(network)?
            .text()
            .await
            .map_err(network)?;

        decode_body(&endpoint, &body)
    }
}

impl LotterySource for DiraClient {
    async fn fetch_project_list(&self, sink: &dyn DiagnosticSink) -> Result<Vec<Value>> {
        let url = self.projects_url();
        sink.emit(Diagnostic::FetchingProjects {
            endpoint: url.to_string(),
        });
        let body = self.get_json(url, sink).await?;
        let items = project_items(body)?;
        sink.emit(Diagnostic::ProjectsListed { count: items.len() });
        Ok(items)
    }

    async fn fetch_lottery_detail(
        &self,
        lottery_id: &str,
        sink: &dyn DiagnosticSink,
    ) -> Result<Value> {
        sink.emit(Diagnostic::FetchingLottery {
            lottery_id: lottery_id.to_string(),
        });
        let body = self.get_json(self.lottery_url(lottery_id), sink).await?;
        lottery_result(body, lottery_id)
    }
}

fn decode_body(endpoint: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|source| ReportError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Pull the `ProjectItems` array out of a project list response.
pub fn project_items(body: Value) -> Result<Vec<Value>> {
    match take_key(body, PROJECT_ITEMS_KEY, "project list")? {
        Value::Array(items) => Ok(items),
        other => Err(ReportError::malformed(
            "project list",
            format!("{} is {}, expected an array", PROJECT_ITEMS_KEY, kind(&other)),
        )),
    }
}

/// Pull the `MyLotteryResult` object out of a lottery result response.
pub fn lottery_result(body: Value, lottery_id: &str) -> Result<Value> {
    let context = format!("lottery result for lottery {}", lottery_id);
    match take_key(body, LOTTERY_RESULT_KEY, &context)? {
        obj @ Value::Object(_) => Ok(obj),
        other => Err(ReportError::malformed(
            context,
            format!("{} is {}, expected an object", LOTTERY_RESULT_KEY, kind(&other)),
        )),
    }
}

fn take_key(body: Value, key: &str, context: &str) -> Result<Value> {
    match body {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| ReportError::malformed(context, format!("missing key {}", key))),
        other => Err(ReportError::malformed(
            context,
            format!("response is {}, expected an object", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
