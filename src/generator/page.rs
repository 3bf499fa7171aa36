use std::path::Path;

use tracing::info;

use crate::config::GeneratorConfig;
use crate::storage::models::{CacheDocument, Paper};
use crate::utils::dates;
use crate::utils::{PaperError, PaperResult};

const STYLE: &str = include_str!("style.css");

const ABSTRACT_LIMIT: usize = 300;
const ABSTRACT_KEEP: usize = 297;
const MAX_LISTED_AUTHORS: usize = 3;

/// 超过 300 个字符时截断为 297 个字符加 "..."
pub fn truncate_abstract(text: &str) -> String {
    if text.chars().count() > ABSTRACT_LIMIT {
        let kept: String = text.chars().take(ABSTRACT_KEEP).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// 超过三位作者时显示前三位加 "et al. (N authors)"
pub fn format_authors(authors: &[String]) -> String {
    if authors.len() > MAX_LISTED_AUTHORS {
        format!(
            "{}, et al. ({} authors)",
            authors[..MAX_LISTED_AUTHORS].join(", "),
            authors.len()
        )
    } else {
        authors.join(", ")
    }
}

pub fn render_paper_card(paper: &Paper) -> String {
    let pdf_link = html_escape(&paper.pdf_link);
    let arxiv_link = html_escape(&paper.arxiv_link);

    format!(
        r#"
        <div class="paper-card">
            <div class="paper-header">
                <h3 class="paper-title">
                    <a href="{pdf_link}" target="_blank" rel="noopener noreferrer">
                        {title}
                    </a>
                </h3>
                <div class="paper-meta">
                    <span class="paper-date">📅 {published}</span>
                    <span class="paper-id">
                        <a href="{arxiv_link}" target="_blank" rel="noopener noreferrer">
                            arXiv:{id}
                        </a>
                    </span>
                </div>
            </div>
            <div class="paper-authors">
                <span class="authors-label">👥 Authors:</span> {authors}
            </div>
            <div class="paper-abstract">
                <p>{abstract_text}</p>
            </div>
            <div class="paper-links">
                <a href="{pdf_link}" class="paper-link pdf-link" target="_blank" rel="noopener noreferrer">
                    📄 PDF
                </a>
                <a href="{arxiv_link}" class="paper-link arxiv-link" target="_blank" rel="noopener noreferrer">
                    🔗 arXiv Page
                </a>
            </div>
        </div>
"#,
        pdf_link = pdf_link,
        arxiv_link = arxiv_link,
        title = html_escape(&paper.title),
        published = html_escape(&paper.published),
        id = html_escape(&paper.id),
        authors = html_escape(&format_authors(&paper.authors)),
        abstract_text = html_escape(&truncate_abstract(&paper.abstract_text)),
    )
}

pub fn render_page(doc: &CacheDocument, config: &GeneratorConfig) -> String {
    let cards = doc
        .papers
        .iter()
        .map(render_paper_card)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{page_title}</title>
    <style>
{style}
    </style>
</head>
<body>
    <div class="papers-container">
        <div class="container">
            <div class="papers-header">
                <h1>{heading}</h1>
                <p>{subtitle}</p>
            </div>

            <div class="papers-info">
                <p><strong>{count} papers</strong> • Last updated: {updated}</p>
                <p>{update_note}</p>
            </div>

            <div class="papers-grid">
{cards}
            </div>

            <div class="back-link-container">
                <a href="{back_link}" class="back-link">← Back to Home</a>
            </div>
        </div>
    </div>
</body>
</html>
"#,
        page_title = html_escape(&config.page_title),
        style = STYLE,
        heading = html_escape(&config.heading),
        subtitle = html_escape(&config.subtitle),
        count = doc.count,
        updated = html_escape(&dates::format_last_updated(&doc.last_updated)),
        update_note = html_escape(&config.update_note),
        cards = cards,
        back_link = html_escape(&config.back_link),
    )
}

pub fn save_page(path: &Path, html: &str) -> PaperResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PaperError::io(parent, e))?;
    }
    std::fs::write(path, html).map_err(|e| PaperError::io(path, e))?;

    info!("已生成页面: {}", path.display());
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("author{}", i)).collect()
    }

    fn paper(abstract_text: &str, authors: Vec<String>) -> Paper {
        Paper::new(
            "2401.00001v1".to_string(),
            "Attention <Everywhere> & More".to_string(),
            authors,
            abstract_text.to_string(),
            "2024-01-15T18:30:00Z".to_string(),
        )
    }

    #[test]
    fn authors_collapse_after_three() {
        assert_eq!(
            format_authors(&names(4)),
            "author1, author2, author3, et al. (4 authors)"
        );
        assert_eq!(format_authors(&names(3)), "author1, author2, author3");
        assert_eq!(format_authors(&names(2)), "author1, author2");
        assert_eq!(format_authors(&[]), "");
    }

    #[test]
    fn long_abstracts_are_truncated() {
        let long = "a".repeat(305);
        let truncated = truncate_abstract(&long);
        assert_eq!(truncated, format!("{}...", "a".repeat(297)));
        assert_eq!(truncated.chars().count(), 300);

        let short = "b".repeat(200);
        assert_eq!(truncate_abstract(&short), short);

        let exact = "c".repeat(300);
        assert_eq!(truncate_abstract(&exact), exact);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(301);
        let truncated = truncate_abstract(&long);
        assert_eq!(truncated.chars().count(), 300);
        assert!(truncated.ends_with("é..."));
    }

    #[test]
    fn card_links_and_escapes_fields() {
        let card = render_paper_card(&paper("Short abstract.", names(2)));

        assert!(card.contains(r#"<a href="http://arxiv.org/pdf/2401.00001v1.pdf""#));
        assert!(card.contains(r#"<a href="http://arxiv.org/abs/2401.00001v1""#));
        assert!(card.contains("arXiv:2401.00001v1"));
        assert!(card.contains("Attention &lt;Everywhere&gt; &amp; More"));
        assert!(card.contains("📅 January 15, 2024"));
        assert!(card.contains("</span> author1, author2"));
        assert!(card.contains("<p>Short abstract.</p>"));
    }

    #[test]
    fn page_has_header_cards_and_back_link() {
        let papers = vec![paper("One", names(1)), paper("Two", names(5))];
        let doc = CacheDocument {
            last_updated: "2024-01-15T18:30:45.123456".to_string(),
            count: papers.len(),
            papers,
        };
        let config = AppConfig::default().generator;

        let html = render_page(&doc, &config);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches(r#"class="paper-card""#).count(), 2);
        assert!(html.contains("<strong>2 papers</strong>"));
        assert!(html.contains("Last updated: January 15, 2024 at 06:30 PM"));
        assert!(html.contains(r#"<a href="index.html" class="back-link">"#));
        assert!(html.contains("--primary-color"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("stylesheet"));
    }

    #[test]
    fn unparsable_timestamp_is_shown_raw() {
        let doc = CacheDocument {
            last_updated: "sometime".to_string(),
            count: 0,
            papers: vec![],
        };
        let html = render_page(&doc, &AppConfig::default().generator);

        assert!(html.contains("<strong>0 papers</strong> • Last updated: sometime"));
    }

    #[test]
    fn save_page_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site").join("papers.html");

        save_page(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }
}
