pub mod disease;
pub mod loaders;

pub use disease::{collect_disease_names, ArticleIndex, CategoryMap, DiseaseRecord};
pub use loaders::{load_category_map, save_article_index, save_category_map};
