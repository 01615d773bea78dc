//! 文献检索任务 - 编排层
//!
//! 按排序后的疾病名逐个检索，汇总为文献索引并落盘。请求按顺序逐个发出。

use crate::clients::LiteratureApi;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{collect_disease_names, save_article_index, ArticleIndex, CategoryMap};
use crate::orchestrator::extract_job::load_or_build_category_map;
use crate::services::{ArticleSearch, SearchOutcome};
use crate::utils::logging::{log_progress, log_startup, print_final_stats};
use std::path::Path;
use tracing::warn;

/// 一次检索任务的结果
#[derive(Debug, Default)]
pub struct FetchReport {
    pub index: ArticleIndex,
    /// 检索调用失败的疾病名（在索引中记为空列表）
    pub failed: Vec<String>,
    /// 使用了无过滤检索式的疾病数
    pub fallback_used: usize,
}

impl FetchReport {
    /// 检索成功但没有任何结果的疾病数
    pub fn empty_results(&self) -> usize {
        self.index
            .iter()
            .filter(|(name, ids)| ids.is_empty() && !self.failed.contains(name))
            .count()
    }
}

/// 为分类表中的每个疾病名建立文献索引
///
/// 疾病名先去重，多个分类中出现的同一疾病只检索一次
pub async fn build_article_index<A: LiteratureApi>(
    search: &ArticleSearch<A>,
    categories: &CategoryMap,
    max_results: usize,
) -> FetchReport {
    let names = collect_disease_names(categories);
    let total = names.len();
    let mut report = FetchReport::default();

    for (i, name) in names.into_iter().enumerate() {
        let outcome = search.search(&name, max_results).await;
        match &outcome {
            SearchOutcome::Found { filtered: false, .. } => report.fallback_used += 1,
            SearchOutcome::Failed { .. } => report.failed.push(name.clone()),
            SearchOutcome::Found { .. } => {}
        }

        let ids = outcome.into_ids();
        log_progress(i + 1, total, &name, ids.len());
        report.index.insert(name, ids);
    }

    report
}

/// 运行检索任务：加载（或生成）分类表、检索、写出文献索引
pub async fn run_fetch<A: LiteratureApi>(config: &Config, api: A) -> AppResult<FetchReport> {
    let categories = load_or_build_category_map(config).await?;
    log_startup("PubMed文献检索", &config.diseases_file);

    let search = ArticleSearch::new(api, config);
    let report = build_article_index(&search, &categories, config.max_results).await;

    save_article_index(Path::new(&config.articles_file), &report.index).await?;

    if !report.failed.is_empty() {
        warn!("⚠️ {} 个疾病检索失败，已记录为空列表", report.failed.len());
    }
    print_final_stats(
        &[
            ("疾病数", report.index.len()),
            ("使用无过滤检索", report.fallback_used),
            ("无结果", report.empty_results()),
            ("检索失败", report.failed.len()),
        ],
        &config.articles_file,
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::DiseaseRecord;
    use std::sync::Mutex;

    /// 记录调用，返回一个以检索式命名的 ID
    #[derive(Default)]
    struct CountingApi {
        calls: Mutex<Vec<String>>,
    }

    impl LiteratureApi for CountingApi {
        async fn esearch(&self, term: &str, _retmax: usize, _sort: &str) -> Result<Vec<String>, ApiError> {
            self.calls.lock().unwrap().push(term.to_string());
            Ok(vec![term.to_string()])
        }

        async fn efetch(&self, _ids: &[String]) -> Result<String, ApiError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_shared_disease_is_searched_once() {
        let mut categories = CategoryMap::new();
        categories.insert(
            "A".to_string(),
            vec![
                DiseaseRecord::new("Shared", "1"),
                DiseaseRecord::new("Shared", "1"),
            ],
        );
        categories.insert(
            "B".to_string(),
            vec![DiseaseRecord::new("Only B", "2"), DiseaseRecord::new("Shared", "1")],
        );

        let search = ArticleSearch::new(CountingApi::default(), &Config::default());
        let report = build_article_index(&search, &categories, 10).await;

        assert_eq!(report.index.len(), 2);
        assert_eq!(report.index["Shared"], vec!["Shared AND free full text[sb]"]);
        assert_eq!(
            *search.api().calls.lock().unwrap(),
            vec![
                "Only B AND free full text[sb]".to_string(),
                "Shared AND free full text[sb]".to_string(),
            ]
        );
    }
}
