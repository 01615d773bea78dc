//! 文献检索服务 - 业务能力层
//!
//! 只负责"按一个疾病名检索文献"能力，不关心遍历顺序和结果落盘

use crate::clients::LiteratureApi;
use crate::config::Config;
use tracing::{debug, error};

/// 单次检索的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// 检索成功（列表可能为空）
    Found {
        ids: Vec<String>,
        /// 结果是否来自带全文过滤的检索式
        filtered: bool,
    },
    /// 检索调用失败
    Failed { reason: String },
}

impl SearchOutcome {
    /// 失败时返回空列表
    pub fn into_ids(self) -> Vec<String> {
        match self {
            SearchOutcome::Found { ids, .. } => ids,
            SearchOutcome::Failed { .. } => Vec::new(),
        }
    }
}

/// 文献检索服务
pub struct ArticleSearch<A> {
    api: A,
    filter: String,
    sort: String,
}

impl<A: LiteratureApi> ArticleSearch<A> {
    pub fn new(api: A, config: &Config) -> Self {
        Self {
            api,
            filter: config.free_text_filter.clone(),
            sort: config.sort_order.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    /// 检索一个疾病名
    ///
    /// 先用附加全文过滤的检索式，结果为空时改用原始检索式
    pub async fn search(&self, query: &str, max_results: usize) -> SearchOutcome {
        let filtered_query = format!("{} AND {}", query, self.filter);

        let ids = match self.api.esearch(&filtered_query, max_results, &self.sort).await {
            Ok(ids) => ids,
            Err(e) => return self.failed(query, e.to_string()),
        };
        if !ids.is_empty() {
            return SearchOutcome::Found { ids, filtered: true };
        }

        debug!("全文过滤无结果，改用原始检索式: {}", query);
        match self.api.esearch(query, max_results, &self.sort).await {
            Ok(ids) => SearchOutcome::Found {
                ids,
                filtered: false,
            },
            Err(e) => self.failed(query, e.to_string()),
        }
    }

    fn failed(&self, query: &str, reason: String) -> SearchOutcome {
        error!("检索PubMed时出错 ({}): {}", query, reason);
        SearchOutcome::Failed { reason }
    }

    /// 批量获取文献详情
    ///
    /// 输入为空或调用失败时返回 `None`，否则返回原始响应
    pub async fn fetch_details(&self, ids: &[String]) -> Option<String> {
        if ids.is_empty() {
            return None;
        }
        match self.api.efetch(ids).await {
            Ok(raw) => Some(raw),
            Err(e) => {
                error!("获取PubMed文献详情时出错: {}", e);
                None
            }
        }
    }
}
