//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `extract_job` - 疾病提取任务
//! - 遍历 XML 目录，过滤扩展名
//! - 每个文件委托 `services::disorder_parser` 解析
//! - 写出分类 JSON；检索任务需要时按需生成
//!
//! ### `fetch_job` - 文献检索任务
//! - 收集去重、排序后的疾病名
//! - 每个疾病委托 `services::article_search` 检索
//! - 写出文献索引 JSON 并输出统计
//!
//! ## 层次关系
//!
//! ```text
//! extract_job ──(分类 JSON)──→ fetch_job
//!     ↓                          ↓
//! services::disorder_parser   services::article_search
//!                                ↓
//!                             clients::LiteratureApi
//! ```

pub mod extract_job;
pub mod fetch_job;

pub use extract_job::{extract_categories, load_or_build_category_map, run_extraction};
pub use fetch_job::{build_article_index, run_fetch, FetchReport};
