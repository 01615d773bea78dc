use thiserror::Error;

/// 应用程序错误类型
///
/// 只包含会中断整个任务的错误；提取和检索错误在组件边界被记录并转换为空结果
#[derive(Debug, Error)]
pub enum AppError {
    /// JSON 文件读写错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// XML 提取相关错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 无法列出目录
    #[error("无法读取文件夹 {path}: {source}")]
    ListDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 无法读取文件
    #[error("无法读取文件 {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 既不是 UTF-8 也没有声明 Latin-1 编码
    #[error("无法识别的文件编码: {path}")]
    Encoding { path: String },
    /// XML 语法错误
    #[error("XML解析失败 (位置 {position}): {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    /// 文档在元素闭合之前结束
    #[error("XML文档不完整: 元素 <{element}> 未闭合")]
    Truncated { element: String },
    /// 文档中没有任何元素
    #[error("XML文档没有根元素")]
    NoRoot,
    /// 根元素之前或之后出现文本或其他元素
    #[error("XML根元素之外存在内容 (位置 {position})")]
    OutsideRoot { position: u64 },
}

/// PubMed API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 非 2xx 状态码
    #[error("API返回错误状态 ({endpoint}): {status}")]
    Status { endpoint: String, status: u16 },
    /// 响应体无法解析
    #[error("API响应解析失败 ({endpoint}): {message}")]
    Decode { endpoint: String, message: String },
    /// E-utilities 在响应中报告的错误
    #[error("API返回错误信息 ({endpoint}): {message}")]
    Remote { endpoint: String, message: String },
}

/// JSON 文件读写错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化或反序列化失败
    #[error("JSON处理失败 ({path}): {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::Request {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建响应解析失败错误
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
