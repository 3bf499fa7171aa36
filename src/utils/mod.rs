pub mod dates;
pub mod logger;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaperError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("网络请求错误: {0}")]
    Network(#[from] reqwest::Error),

    #[error("arXiv API 返回非成功状态 {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("XML解析错误: {0}")]
    FeedParse(String),

    #[error("arXiv API 错误: {0}")]
    ArxivApi(String),

    #[error("未找到任何论文 (No papers found)")]
    NoPapers,

    #[error("{} 不存在，请先运行 `paperfeed fetch` (file not found - run the fetch job first)", path.display())]
    CacheNotFound { path: PathBuf },

    #[error("解析 {} 失败: {source}", path.display())]
    CacheParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("缓存文件内容无效: {0}")]
    CacheInvalid(String),

    #[error("读写 {} 失败: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("序列化错误: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<quick_xml::Error> for PaperError {
    fn from(err: quick_xml::Error) -> Self {
        PaperError::FeedParse(err.to_string())
    }
}

impl From<config::ConfigError> for PaperError {
    fn from(err: config::ConfigError) -> Self {
        PaperError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PaperError {
    fn from(err: toml::ser::Error) -> Self {
        PaperError::Config(err.to_string())
    }
}

impl PaperError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PaperError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PaperResult<T> = Result<T, PaperError>;
