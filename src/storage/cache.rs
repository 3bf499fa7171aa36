use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::storage::models::CacheDocument;
use crate::utils::{PaperError, PaperResult};

/// 覆盖写入缓存文件，保留非 ASCII 字符，两空格缩进
pub fn write_cache(path: &Path, doc: &CacheDocument) -> PaperResult<()> {
    let mut content = serde_json::to_string_pretty(doc)?;
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PaperError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| PaperError::io(path, e))?;

    info!("已保存 {} 篇论文到 {}", doc.count, path.display());
    Ok(())
}

pub fn read_cache(path: &Path) -> PaperResult<CacheDocument> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PaperError::CacheNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(PaperError::io(path, e)),
    };

    let doc: CacheDocument =
        serde_json::from_str(&content).map_err(|source| PaperError::CacheParse {
            path: path.to_path_buf(),
            source,
        })?;

    if doc.count != doc.papers.len() {
        return Err(PaperError::CacheInvalid(format!(
            "count 为 {}，实际包含 {} 篇论文",
            doc.count,
            doc.papers.len()
        )));
    }

    Ok(doc)
}
