use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 单个罕见病条目（来自 Orphanet XML 的一个 Disorder）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub orpha_code: String,
}

impl DiseaseRecord {
    pub fn new(name: impl Into<String>, orpha_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orpha_code: orpha_code.into(),
        }
    }
}

/// 分类名（XML 文件名去掉扩展名）→ 该分类下的疾病列表
pub type CategoryMap = BTreeMap<String, Vec<DiseaseRecord>>;

/// 疾病名 → PubMed 文献 ID 列表
pub type ArticleIndex = BTreeMap<String, Vec<String>>;

/// 收集所有分类中出现过的疾病名，去重并排序
pub fn collect_disease_names(categories: &CategoryMap) -> Vec<String> {
    categories
        .values()
        .flatten()
        .map(|record| record.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
