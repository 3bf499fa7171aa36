mod config;
mod crawler;
mod generator;
mod storage;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::{info, warn};

use config::{AppConfig, DEFAULT_CONFIG_PATH};
use crawler::ArxivClient;
use storage::CacheDocument;
use utils::{logger, PaperError, PaperResult};

#[derive(Parser)]
#[command(name = "paperfeed")]
#[command(about = "抓取 arXiv 最新论文并生成静态 HTML 列表页", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成默认配置文件
    Init,
    /// 抓取论文并写入 papers.json
    Fetch {
        /// 关键词或分类 (如 "machine learning"、cat:cs.AI)
        #[arg(value_name = "TOKEN", allow_hyphen_values = true)]
        keywords: Vec<String>,
    },
    /// 读取 papers.json 生成 papers.html
    Render,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logger::init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_command()?;
        }
        Commands::Fetch { keywords } => {
            let app_config = AppConfig::load()?;
            fetch_command(&app_config, &keywords).await?;
        }
        Commands::Render => {
            let app_config = AppConfig::load()?;
            render_command(&app_config)?;
        }
    }

    Ok(())
}

fn init_command() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        warn!("{} 已存在，未覆盖", path.display());
        return Ok(());
    }

    AppConfig::default().save(path)?;
    info!("已生成配置文件: {}", path.display());
    info!("下一步: 运行 'paperfeed fetch' 抓取论文，再运行 'paperfeed render' 生成页面");
    Ok(())
}

async fn fetch_command(app_config: &AppConfig, keywords: &[String]) -> PaperResult<CacheDocument> {
    if keywords.is_empty() {
        info!("未提供关键词，使用默认分类: 机器学习、人工智能与统计学习");
        info!("用法: paperfeed fetch keyword1 keyword2 ...");
        info!("示例: paperfeed fetch 'machine learning' 'neural networks'");
        info!("示例: paperfeed fetch cat:cs.AI cat:cs.LG");
    }

    let crawler_config = &app_config.crawler;
    let query = crawler::build_query(keywords);
    info!("查询语句: {}", query);
    info!("最多抓取 {} 篇论文...", crawler_config.max_results);

    let client = ArxivClient::new(crawler_config)?;
    let xml = client.fetch_feed(&query, crawler_config.max_results).await?;

    let feed = crawler::parse_feed(&xml)?;
    match feed.total_results {
        Some(total) => info!("找到 {} 篇论文 (共 {} 条匹配)", feed.papers.len(), total),
        None => info!("找到 {} 篇论文", feed.papers.len()),
    }

    if feed.papers.is_empty() {
        if crawler_config.fail_on_empty {
            return Err(PaperError::NoPapers);
        }
        warn!("未找到论文，仍写入空的缓存文件");
    }

    let doc = CacheDocument::new(feed.papers);
    storage::write_cache(&app_config.storage.cache_path, &doc)?;

    info!("{}", "=".repeat(60));
    info!("SUMMARY");
    info!("抓取总数: {}", doc.count);
    if let Some(first) = doc.papers.first() {
        let preview: String = first.title.chars().take(60).collect();
        info!("第一篇: {}...", preview);
        info!("最新发布: {}", first.published);
    }
    info!("{}", "=".repeat(60));

    Ok(doc)
}

fn render_command(app_config: &AppConfig) -> PaperResult<()> {
    let cache_path = &app_config.storage.cache_path;
    info!("正在读取 {} ...", cache_path.display());
    let doc = storage::read_cache(cache_path)?;

    info!("共 {} 篇论文，正在生成 HTML 页面...", doc.count);
    let html = generator::render_page(&doc, &app_config.generator);
    generator::save_page(&app_config.generator.output_path, &html)?;

    info!("✅ {} 已生成，可以直接在浏览器打开或发布", app_config.generator.output_path.display());
    Ok(())
}
