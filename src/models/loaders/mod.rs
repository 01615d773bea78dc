pub mod json_store;

pub use json_store::{load_category_map, save_article_index, save_category_map};
