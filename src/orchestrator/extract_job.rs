//! 疾病提取任务 - 编排层
//!
//! 遍历 XML 目录，逐个文件调用解析能力，汇总为分类表并落盘

use crate::config::Config;
use crate::error::{AppResult, ExtractError};
use crate::models::{load_category_map, save_category_map, CategoryMap};
use crate::services::parse_orphanet_file;
use crate::utils::logging::{log_startup, print_final_stats};
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// 列出目录中的文件名（已排序）
///
/// 目录无法读取时记录错误并返回空列表
pub async fn list_source_files(folder: &Path) -> Vec<String> {
    match read_folder(folder).await {
        Ok(names) => names,
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

async fn read_folder(folder: &Path) -> Result<Vec<String>, ExtractError> {
    let list_err = |source| ExtractError::ListDir {
        path: folder.display().to_string(),
        source,
    };

    let mut entries = fs::read_dir(folder).await.map_err(list_err)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!("跳过非UTF-8文件名: {:?}", raw),
        }
    }

    names.sort();
    Ok(names)
}

/// 文件名是否以 `.{extension}` 结尾
pub fn is_source_file(file_name: &str, extension: &str) -> bool {
    file_name
        .strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'))
}

/// 分类名：文件名中第一个 `.` 之前的部分
pub fn category_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// 从目录中提取所有分类
pub async fn extract_categories(folder: &Path, extension: &str) -> CategoryMap {
    let mut categories = CategoryMap::new();

    for file_name in list_source_files(folder).await {
        if !is_source_file(&file_name, extension) {
            continue;
        }

        info!("正在解析: {}", file_name);
        let records = parse_orphanet_file(&folder.join(&file_name)).await;
        info!("✓ {} 个疾病", records.len());

        let category = category_name(&file_name).to_string();
        if categories.insert(category.clone(), records).is_some() {
            warn!("分类 {} 重复出现，使用 {} 的结果", category, file_name);
        }
    }

    categories
}

/// 运行提取任务并写出分类 JSON
pub async fn run_extraction(config: &Config) -> AppResult<CategoryMap> {
    log_startup("疾病提取", &config.xml_folder);

    let categories = extract_categories(Path::new(&config.xml_folder), &config.xml_extension).await;
    save_category_map(Path::new(&config.diseases_file), &categories).await?;

    let disease_count = categories.values().map(Vec::len).sum();
    print_final_stats(
        &[("分类数", categories.len()), ("疾病条目数", disease_count)],
        &config.diseases_file,
    );

    Ok(categories)
}

/// 分类 JSON 已存在时直接加载，否则先运行提取任务
pub async fn load_or_build_category_map(config: &Config) -> AppResult<CategoryMap> {
    let path = Path::new(&config.diseases_file);
    if path.exists() {
        Ok(load_category_map(path).await?)
    } else {
        info!("未找到 {}，先运行疾病提取", config.diseases_file);
        run_extraction(config).await
    }
}
