use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 评分请求相关错误
    #[error("评分请求错误: {0}")]
    Transport(#[from] TransportError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 评分请求错误
///
/// 网络不可达、非 2xx 状态码、响应体不是合法 JSON，都归为这一类。
/// 控制器只把它转换成一条用户提示，不会重试。
#[derive(Debug, Error)]
pub enum TransportError {
    /// 网络请求失败（连接被拒绝、DNS 失败等）
    #[error("请求 {endpoint} 失败: {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非成功状态码
    #[error("评分请求失败 (HTTP {status})")]
    BadStatus { endpoint: String, status: u16 },
    /// 响应体无法解析为评分结果数组
    #[error("无法解析 {endpoint} 的响应: {source}")]
    InvalidBody {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 构造文件 part 失败
    #[error("无法构造文件 {file_name} 的请求内容: {source}")]
    InvalidPart {
        file_name: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl TransportError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        TransportError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建状态码错误
    pub fn bad_status(endpoint: impl Into<String>, status: u16) -> Self {
        TransportError::BadStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// 创建响应体解析错误
    pub fn invalid_body(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        TransportError::InvalidBody {
            endpoint: endpoint.into(),
            source,
        }
    }
}

impl FileError {
    /// 根据 io 错误类型区分"不存在"和"读取失败"
    pub fn from_io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound { path }
        } else {
            FileError::ReadFailed { path, source }
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
