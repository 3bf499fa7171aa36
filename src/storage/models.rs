use serde::{Deserialize, Serialize};

use crate::utils::dates;

pub const NO_TITLE: &str = "No title";
pub const NO_ABSTRACT: &str = "No abstract";
pub const UNKNOWN_DATE: &str = "Unknown";

const ARXIV_PDF_BASE: &str = "http://arxiv.org/pdf/";
const ARXIV_ABS_BASE: &str = "http://arxiv.org/abs/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub published: String,
    pub published_raw: String,
    pub pdf_link: String,
    pub arxiv_link: String,
}

impl Paper {
    /// 由已清洗的字段构建记录，发布日期与两个链接在这里派生
    pub fn new(
        id: String,
        title: String,
        authors: Vec<String>,
        abstract_text: String,
        published_raw: String,
    ) -> Self {
        let published = dates::format_published(&published_raw);
        let pdf_link = format!("{}{}.pdf", ARXIV_PDF_BASE, id);
        let arxiv_link = format!("{}{}", ARXIV_ABS_BASE, id);

        Self {
            id,
            title,
            authors,
            abstract_text,
            published,
            published_raw,
            pdf_link,
            arxiv_link,
        }
    }
}

/// papers.json 的完整内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    pub last_updated: String,
    pub count: usize,
    pub papers: Vec<Paper>,
}

impl CacheDocument {
    pub fn new(papers: Vec<Paper>) -> Self {
        Self {
            last_updated: dates::now_iso(),
            count: papers.len(),
            papers,
        }
    }
}
