use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::{PaperError, PaperResult};

pub const DEFAULT_CONFIG_PATH: &str = "config/settings.toml";
const ENV_PREFIX: &str = "PAPERFEED";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub crawler: CrawlerConfig,
    pub storage: StorageConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlerConfig {
    pub api_url: String,
    pub max_results: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// 结果为空时是否视为失败
    pub fail_on_empty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub cache_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    pub output_path: PathBuf,
    pub page_title: String,
    pub heading: String,
    pub subtitle: String,
    pub update_note: String,
    pub back_link: String,
}

impl AppConfig {
    pub fn load() -> PaperResult<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// 默认值 < 配置文件 < 环境变量 (PAPERFEED_CRAWLER__MAX_RESULTS=50)
    pub fn load_from(path: &Path) -> PaperResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn save(&self, path: &Path) -> PaperResult<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PaperError::io(parent, e))?;
        }
        std::fs::write(path, content).map_err(|e| PaperError::io(path, e))?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                api_url: "http://export.arxiv.org/api/query".to_string(),
                max_results: 20,
                timeout_secs: 30,
                user_agent: "paperfeed/0.1 (arXiv listing generator)".to_string(),
                fail_on_empty: true,
            },
            storage: StorageConfig {
                cache_path: PathBuf::from("papers.json"),
            },
            generator: GeneratorConfig {
                output_path: PathBuf::from("papers.html"),
                page_title: "Latest arXiv Papers - My Coding Blog".to_string(),
                heading: "📚 Latest arXiv Papers".to_string(),
                subtitle: "Curated research papers on machine learning and deep learning"
                    .to_string(),
                update_note: "🔄 Automatically updated daily at midnight".to_string(),
                back_link: "index.html".to_string(),
            },
        }
    }
}
