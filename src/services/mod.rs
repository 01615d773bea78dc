pub mod article_search;
pub mod disorder_parser;

pub use article_search::{ArticleSearch, SearchOutcome};
pub use disorder_parser::{parse_disorders, parse_orphanet_file};
