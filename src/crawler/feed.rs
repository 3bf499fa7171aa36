use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::{debug, warn};

use crate::storage::models::{Paper, NO_ABSTRACT, NO_TITLE, UNKNOWN_DATE};
use crate::utils::{PaperError, PaperResult};

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";
const ARXIV_NS: &[u8] = b"http://arxiv.org/schemas/atom";
const OPENSEARCH_NS: &[u8] = b"http://a9.com/-/spec/opensearch/1.1/";

const ABS_MARKER: &str = "/abs/";
const API_ERROR_MARKER: &str = "/api/errors";

/// 一次查询解析出的结果
#[derive(Debug)]
pub struct ParsedFeed {
    /// opensearch:totalResults，服务端匹配总数
    pub total_results: Option<u64>,
    pub papers: Vec<Paper>,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

/// 正在收集文本的元素
#[derive(Debug, Clone, Copy)]
enum Capture {
    Entry(Field),
    TotalResults,
}

#[derive(Default)]
struct EntryBuilder {
    id: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    authors: Vec<String>,
    primary_category: Option<String>,
}

impl EntryBuilder {
    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Id => self.id = Some(value),
            Field::Title => self.title = Some(value),
            Field::Summary => self.summary = Some(value),
            Field::Published => self.published = Some(value),
            Field::AuthorName => self.authors.push(value),
        }
    }

    /// 缺失字段使用默认值；没有 id 的条目无法生成链接，跳过
    fn build(self) -> PaperResult<Option<Paper>> {
        let Some(entry_id) = self.id else {
            warn!("条目缺少 <id>，已跳过");
            return Ok(None);
        };

        if entry_id.contains(API_ERROR_MARKER) {
            let message = self
                .summary
                .or(self.title)
                .unwrap_or_else(|| entry_id.clone());
            return Err(PaperError::ArxivApi(message));
        }

        let id = entry_id
            .rsplit_once(ABS_MARKER)
            .map_or(entry_id.as_str(), |(_, rest)| rest)
            .to_string();
        if id.is_empty() {
            warn!("无法从 {} 中提取论文 ID，已跳过", entry_id);
            return Ok(None);
        }

        debug!(
            "解析条目 {} (主分类: {})",
            id,
            self.primary_category.as_deref().unwrap_or("-")
        );

        Ok(Some(Paper::new(
            id,
            self.title.unwrap_or_else(|| NO_TITLE.to_string()),
            self.authors,
            self.summary.unwrap_or_else(|| NO_ABSTRACT.to_string()),
            self.published.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        )))
    }
}

fn in_ns(ns: &ResolveResult, expected: &[u8]) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == expected)
}

/// 把换行、缩进等连续空白压缩成单个空格
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn term_attr(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"term")
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// 解析 arXiv Atom 响应。
///
/// XML 语法错误会中止整个解析；单个条目缺少字段时只使用默认值。
pub fn parse_feed(xml: &str) -> PaperResult<ParsedFeed> {
    // 不裁剪文本事件：CDATA 或内联元素两侧的空格由 collapse_whitespace 统一处理
    let mut reader = NsReader::from_str(xml);

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut entry: Option<EntryBuilder> = None;
    let mut in_author = false;
    let mut capture: Option<(Capture, usize)> = None;
    let mut text = String::new();

    let mut total_results = None;
    let mut papers = Vec::new();

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();
                let name = name.as_ref();
                let atom = in_ns(&ns, ATOM_NS);

                let target = match depth {
                    1 => {
                        saw_root = true;
                        None
                    }
                    2 if atom && name == b"entry" => {
                        entry = Some(EntryBuilder::default());
                        None
                    }
                    2 if in_ns(&ns, OPENSEARCH_NS) && name == b"totalResults" => {
                        Some(Capture::TotalResults)
                    }
                    3 if entry.is_some() && atom => match name {
                        b"id" => Some(Capture::Entry(Field::Id)),
                        b"title" => Some(Capture::Entry(Field::Title)),
                        b"summary" => Some(Capture::Entry(Field::Summary)),
                        b"published" => Some(Capture::Entry(Field::Published)),
                        b"author" => {
                            in_author = true;
                            None
                        }
                        _ => None,
                    },
                    3 if in_ns(&ns, ARXIV_NS) && name == b"primary_category" => {
                        if let Some(entry) = entry.as_mut() {
                            entry.primary_category = term_attr(&e);
                        }
                        None
                    }
                    4 if in_author && atom && name == b"name" => {
                        Some(Capture::Entry(Field::AuthorName))
                    }
                    _ => None,
                };

                if capture.is_none() {
                    if let Some(target) = target {
                        capture = Some((target, depth));
                        text.clear();
                    }
                }
            }
            (ns, Event::Empty(e)) => {
                let name = e.local_name();
                let name = name.as_ref();

                if depth == 1 && in_ns(&ns, ATOM_NS) && name == b"entry" {
                    warn!("空的 <entry/> 元素，已跳过");
                } else if depth == 2 && in_ns(&ns, ARXIV_NS) && name == b"primary_category" {
                    if let Some(entry) = entry.as_mut() {
                        entry.primary_category = term_attr(&e);
                    }
                }
            }
            (_, Event::Text(e)) => {
                if capture.is_some() {
                    text.push_str(&e.unescape()?);
                }
            }
            (_, Event::CData(e)) => {
                if capture.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            (ns, Event::End(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                let atom = in_ns(&ns, ATOM_NS);

                if let Some((target, at)) = capture {
                    if at == depth {
                        let value = collapse_whitespace(&text);
                        match target {
                            Capture::TotalResults => total_results = value.parse().ok(),
                            Capture::Entry(field) if !value.is_empty() => {
                                if let Some(entry) = entry.as_mut() {
                                    entry.set(field, value);
                                }
                            }
                            Capture::Entry(_) => {}
                        }
                        capture = None;
                        text.clear();
                    }
                }

                if depth == 3 && atom && name == b"author" {
                    in_author = false;
                } else if depth == 2 && atom && name == b"entry" {
                    if let Some(done) = entry.take() {
                        if let Some(paper) = done.build()? {
                            papers.push(paper);
                        }
                    }
                    in_author = false;
                }

                depth = depth.saturating_sub(1);
            }
            (_, Event::Eof) => {
                if !saw_root {
                    return Err(PaperError::FeedParse("响应中没有 XML 根元素".to_string()));
                }
                if depth != 0 {
                    return Err(PaperError::FeedParse(format!(
                        "XML 在第 {} 层元素内提前结束",
                        depth
                    )));
                }
                break;
            }
            _ => {}
        }
    }

    Ok(ParsedFeed {
        total_results,
        papers,
    })
}
