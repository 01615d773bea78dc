use crate::error::StoreError;
use crate::models::disease::{ArticleIndex, CategoryMap};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// 读取并反序列化 JSON 文件
async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Read {
            path: path.display().to_string(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// 序列化并整体覆盖写入 JSON 文件
async fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string(value).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })?;

    fs::write(path, content)
        .await
        .map_err(|source| StoreError::Write {
            path: path.display().to_string(),
            source,
        })
}

/// 从 JSON 文件加载疾病分类
pub async fn load_category_map(path: &Path) -> Result<CategoryMap, StoreError> {
    let categories: CategoryMap = load_json(path).await?;
    tracing::info!(
        "已加载 {} 个分类: {}",
        categories.len(),
        path.display()
    );
    Ok(categories)
}

pub async fn save_category_map(path: &Path, categories: &CategoryMap) -> Result<(), StoreError> {
    save_json(path, categories).await
}

pub async fn save_article_index(path: &Path, index: &ArticleIndex) -> Result<(), StoreError> {
    save_json(path, index).await
}
