/// PubMed E-utilities 客户端
///
/// 封装 esearch / efetch 两个接口的 HTTP 调用
use crate::clients::LiteratureApi;
use crate::config::Config;
use crate::error::ApiError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const ESEARCH: &str = "esearch.fcgi";
const EFETCH: &str = "efetch.fcgi";

/// esearch 的 JSON 响应
#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: Option<ESearchResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// PubMed 客户端
pub struct PubMedClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    tool: String,
    api_key: Option<String>,
}

impl PubMedClient {
    /// 创建新的 PubMed 客户端
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::request("client", e))?;

        Ok(Self {
            http,
            base_url: config.eutils_base_url.trim_end_matches('/').to_string(),
            email: config.contact_email.clone(),
            tool: config.tool_name.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// 每个请求都携带的参数
    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("email", self.email.clone()),
            ("tool", self.tool.clone()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    fn search_params(&self, term: &str, retmax: usize, sort: &str) -> Vec<(&'static str, String)> {
        let mut params = self.base_params();
        params.push(("term", term.to_string()));
        params.push(("retmax", retmax.to_string()));
        params.push(("sort", sort.to_string()));
        params.push(("retmode", "json".to_string()));
        params
    }

    fn fetch_params(&self, ids: &[String]) -> Vec<(&'static str, String)> {
        let mut params = self.base_params();
        params.push(("id", ids.join(",")));
        params.push(("retmode", "xml".to_string()));
        params
    }

    /// 发送 GET 请求，非 2xx 状态视为错误
    async fn get(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::request(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// 从 esearch 的 JSON 响应中取出 ID 列表
fn esearch_ids(response: ESearchResponse) -> Result<Vec<String>, ApiError> {
    if let Some(message) = response.error {
        return Err(ApiError::Remote {
            endpoint: ESEARCH.to_string(),
            message,
        });
    }

    let result = response
        .esearchresult
        .ok_or_else(|| ApiError::decode(ESEARCH, "响应缺少 esearchresult"))?;

    match result.error {
        Some(message) => Err(ApiError::Remote {
            endpoint: ESEARCH.to_string(),
            message,
        }),
        None => Ok(result.idlist),
    }
}

impl LiteratureApi for PubMedClient {
    async fn esearch(&self, term: &str, retmax: usize, sort: &str) -> Result<Vec<String>, ApiError> {
        debug!("esearch: term={} retmax={}", term, retmax);
        let response: ESearchResponse = self
            .get(ESEARCH, &self.search_params(term, retmax, sort))
            .await?
            .json()
            .await
            .map_err(|e| ApiError::decode(ESEARCH, e.to_string()))?;
        let ids = esearch_ids(response)?;
        debug!("esearch 返回 {} 个ID", ids.len());
        Ok(ids)
    }

    async fn efetch(&self, ids: &[String]) -> Result<String, ApiError> {
        debug!("efetch: {} 个ID", ids.len());
        self.get(EFETCH, &self.fetch_params(ids))
            .await?
            .text()
            .await
            .map_err(|e| ApiError::request(EFETCH, e))
    }
}
