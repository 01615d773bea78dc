use orphanet_pubmed::error::ApiError;
use orphanet_pubmed::logger::error_file_layer;
use orphanet_pubmed::{run_fetch, ArticleIndex, CategoryMap, Config, LiteratureApi};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;

/// 桩 API：按检索式返回预设结果，未配置的检索式返回空列表
#[derive(Clone, Default)]
struct StubApi {
    responses: HashMap<String, Vec<String>>,
    failing: Vec<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubApi {
    fn returns(mut self, term: &str, ids: &[&str]) -> Self {
        self.responses
            .insert(term.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }

    fn fails_on(mut self, term: &str) -> Self {
        self.failing.push(term.to_string());
        self
    }
}

impl LiteratureApi for StubApi {
    async fn esearch(&self, term: &str, _retmax: usize, _sort: &str) -> Result<Vec<String>, ApiError> {
        self.calls.lock().unwrap().push(term.to_string());
        if self.failing.iter().any(|t| t == term) {
            return Err(ApiError::Status {
                endpoint: "esearch.fcgi".to_string(),
                status: 503,
            });
        }
        Ok(self.responses.get(term).cloned().unwrap_or_default())
    }

    async fn efetch(&self, _ids: &[String]) -> Result<String, ApiError> {
        Ok(String::new())
    }
}

fn disorder(name: &str, code: &str) -> String {
    format!(r#"<Disorder id="{code}"><OrphaCode>{code}</OrphaCode><Name lang="en">{name}</Name></Disorder>"#)
}

fn write_xml(dir: &Path, file: &str, disorders: &[String]) {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><JDBOR><DisorderList count="{}">{}</DisorderList></JDBOR>"#,
        disorders.len(),
        disorders.concat()
    );
    std::fs::write(dir.join(file), xml).unwrap();
}

fn test_config(root: &Path) -> Config {
    let path = |name: &str| root.join(name).to_string_lossy().to_string();
    Config {
        xml_folder: path("Rare_Diseases"),
        diseases_file: path("Diseases_list.json"),
        articles_file: path("disease_articles.json"),
        extract_log_file: path("error.log"),
        fetch_log_file: path("fetch_PubMed.log"),
        ..Config::default()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_fetch_builds_missing_category_map_first() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    let xml_dir = Path::new(&config.xml_folder);
    std::fs::create_dir(xml_dir).unwrap();
    write_xml(xml_dir, "A.xml", &[disorder("Example Syndrome", "123")]);
    write_xml(
        xml_dir,
        "B.xml",
        &[disorder("Other Disease", "456"), disorder("Example Syndrome", "123")],
    );
    std::fs::write(xml_dir.join("notes.txt"), "not a category").unwrap();

    let api = StubApi::default()
        .returns("Example Syndrome AND free full text[sb]", &["111", "222"])
        .returns("Other Disease", &["333"]);
    let calls = api.calls.clone();

    let report = run_fetch(&config, api).await.unwrap();

    let categories: serde_json::Value = read_json(&config.diseases_file);
    assert_eq!(
        categories,
        serde_json::json!({
            "A": [{"name": "Example Syndrome", "orpha_code": "123"}],
            "B": [
                {"name": "Other Disease", "orpha_code": "456"},
                {"name": "Example Syndrome", "orpha_code": "123"}
            ]
        })
    );

    let index: ArticleIndex = read_json(&config.articles_file);
    assert_eq!(index.len(), 2);
    assert_eq!(index["Example Syndrome"], vec!["111", "222"]);
    assert_eq!(index["Other Disease"], vec!["333"]);
    assert_eq!(report.index, index);
    assert_eq!(report.fallback_used, 1);
    assert!(report.failed.is_empty());

    // 名称按排序顺序检索；只有无过滤结果为空的疾病才会发出第二次请求
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "Example Syndrome AND free full text[sb]".to_string(),
            "Other Disease AND free full text[sb]".to_string(),
            "Other Disease".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_existing_category_map_is_reused() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    // XML 目录不存在：如果重新提取，结果会是空的
    std::fs::write(
        &config.diseases_file,
        r#"{"Cardio":[{"name":"Brugada syndrome","orpha_code":"130"}],"Empty":[]}"#,
    )
    .unwrap();

    let api = StubApi::default().returns("Brugada syndrome AND free full text[sb]", &["42"]);
    run_fetch(&config, api).await.unwrap();

    let categories: CategoryMap = read_json(&config.diseases_file);
    assert_eq!(categories.len(), 2);

    let index: ArticleIndex = read_json(&config.articles_file);
    assert_eq!(index.len(), 1);
    assert_eq!(index["Brugada syndrome"], vec!["42"]);
}

#[tokio::test]
async fn test_remote_failure_is_logged_and_run_completes() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    std::fs::write(
        &config.diseases_file,
        r#"{"X":[{"name":"Alpha","orpha_code":"1"},{"name":"Beta","orpha_code":"2"}]}"#,
    )
    .unwrap();

    let subscriber =
        tracing_subscriber::registry().with(error_file_layer(&config.fetch_log_file).unwrap());
    let _guard = tracing::subscriber::set_default(subscriber);

    let api = StubApi::default()
        .fails_on("Alpha AND free full text[sb]")
        .returns("Beta AND free full text[sb]", &["7"]);
    let report = run_fetch(&config, api).await.unwrap();

    assert_eq!(report.failed, vec!["Alpha".to_string()]);
    assert_eq!(report.empty_results(), 0);

    let index: ArticleIndex = read_json(&config.articles_file);
    assert!(index["Alpha"].is_empty());
    assert_eq!(index["Beta"], vec!["7"]);

    let log = std::fs::read_to_string(&config.fetch_log_file).unwrap();
    assert!(log.contains("Alpha"));
    assert!(log.contains("503"));
    assert!(!log.contains("Beta"));
}

#[tokio::test]
async fn test_empty_results_are_distinct_from_failures() {
    let root = tempfile::tempdir().unwrap();
    let config = test_config(root.path());
    std::fs::write(
        &config.diseases_file,
        r#"{"X":[{"name":"Nothing Known","orpha_code":"9"}]}"#,
    )
    .unwrap();

    let report = run_fetch(&config, StubApi::default()).await.unwrap();

    assert!(report.failed.is_empty());
    assert_eq!(report.empty_results(), 1);
    assert!(report.index["Nothing Known"].is_empty());
}
