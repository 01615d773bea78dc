pub mod pubmed_client;

pub use pubmed_client::PubMedClient;

use crate::error::ApiError;

/// 文献检索接口
///
/// 检索流程只依赖这个 trait，测试时可以替换为桩实现
#[allow(async_fn_in_trait)]
pub trait LiteratureApi {
    /// 按检索式返回有序的文献 ID 列表（最多 `retmax` 个）
    async fn esearch(&self, term: &str, retmax: usize, sort: &str) -> Result<Vec<String>, ApiError>;

    /// 批量获取文献详情，返回原始响应
    async fn efetch(&self, ids: &[String]) -> Result<String, ApiError>;
}
