use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "ORPHANET_CONFIG";
/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "orphanet_pubmed.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Orphanet XML 文件存放目录
    pub xml_folder: String,
    /// 需要处理的文件扩展名（不带点）
    pub xml_extension: String,
    /// 疾病分类 JSON 输出文件
    pub diseases_file: String,
    /// 文献索引 JSON 输出文件
    pub articles_file: String,
    /// 提取阶段的错误日志
    pub extract_log_file: String,
    /// 检索阶段的错误日志
    pub fetch_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- PubMed E-utilities 配置 ---
    pub contact_email: String,
    pub tool_name: String,
    pub api_key: Option<String>,
    pub eutils_base_url: String,
    pub max_results: usize,
    pub free_text_filter: String,
    pub sort_order: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            xml_folder: "Rare_Diseases".to_string(),
            xml_extension: "xml".to_string(),
            diseases_file: "Diseases_list.json".to_string(),
            articles_file: "disease_articles.json".to_string(),
            extract_log_file: "error.log".to_string(),
            fetch_log_file: "fetch_PubMed.log".to_string(),
            verbose_logging: false,
            contact_email: "abc@gmail.com".to_string(),
            tool_name: "orphanet_pubmed".to_string(),
            api_key: None,
            eutils_base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string(),
            max_results: 50,
            free_text_filter: "free full text[sb]".to_string(),
            sort_order: "relevance".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// 读取配置文件（如果存在），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件加载配置，未出现的字段使用默认值
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_string(),
            source,
        })?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        let base = self;
        Self {
            xml_folder: std::env::var("XML_FOLDER").unwrap_or(base.xml_folder),
            xml_extension: std::env::var("XML_EXTENSION").unwrap_or(base.xml_extension),
            diseases_file: std::env::var("DISEASES_FILE").unwrap_or(base.diseases_file),
            articles_file: std::env::var("ARTICLES_FILE").unwrap_or(base.articles_file),
            extract_log_file: std::env::var("EXTRACT_LOG_FILE").unwrap_or(base.extract_log_file),
            fetch_log_file: std::env::var("FETCH_LOG_FILE").unwrap_or(base.fetch_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
            contact_email: std::env::var("PUBMED_EMAIL").unwrap_or(base.contact_email),
            tool_name: std::env::var("PUBMED_TOOL").unwrap_or(base.tool_name),
            api_key: std::env::var("NCBI_API_KEY").ok().or(base.api_key),
            eutils_base_url: std::env::var("EUTILS_BASE_URL").unwrap_or(base.eutils_base_url),
            max_results: std::env::var("PUBMED_MAX_RESULTS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.max_results),
            free_text_filter: std::env::var("PUBMED_FILTER").unwrap_or(base.free_text_filter),
            sort_order: std::env::var("PUBMED_SORT").unwrap_or(base.sort_order),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.request_timeout_secs),
        }
    }
}
