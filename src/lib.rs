//! # Orphanet PubMed
//!
//! 从 Orphanet XML 中提取罕见病名称，并在 PubMed 中检索相关文献 ID
//!
//! ## 架构设计
//!
//! 两个批处理任务通过磁盘上的 JSON 文件衔接：
//!
//! 1. `extract_diseases`：XML 目录 → `Diseases_list.json`（分类 → 疾病列表）
//! 2. `fetch_pubmed`：`Diseases_list.json` → `disease_articles.json`（疾病名 → PMID 列表）；
//!    分类文件不存在时先在进程内运行提取任务
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - `LiteratureApi` trait 与基于 reqwest 的 `PubMedClient`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 只处理单个文件或单个疾病名
//! - `disorder_parser` - 解析一个 Orphanet XML 文档
//! - `ArticleSearch` - 带全文过滤、空结果时回退的检索
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/extract_job` - 遍历目录、汇总分类、落盘
//! - `orchestrator/fetch_job` - 遍历疾病名、汇总索引、落盘
//!
//! 所有组件边界上的错误都会记录到错误日志并转换为空结果，不会中断整个任务。
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{LiteratureApi, PubMedClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ArticleIndex, CategoryMap, DiseaseRecord};
pub use orchestrator::{load_or_build_category_map, run_extraction, run_fetch, FetchReport};
pub use services::{ArticleSearch, SearchOutcome};
