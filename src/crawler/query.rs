/// 未提供关键词时的默认查询：机器学习、人工智能与统计学习
pub const DEFAULT_QUERY: &str = "cat:cs.LG OR cat:cs.AI OR cat:stat.ML";

const CATEGORY_PREFIX: &str = "cat:";

/// 构建 arXiv search_query。
///
/// - 空输入使用 [`DEFAULT_QUERY`]
/// - 只要有一个 `cat:` 分类，全部 token 原样以 OR 连接
/// - 否则每个关键词写成 `all:"kw"`，以 AND 连接
pub fn build_query(keywords: &[String]) -> String {
    if keywords.is_empty() {
        return DEFAULT_QUERY.to_string();
    }

    if keywords.iter().any(|kw| kw.starts_with(CATEGORY_PREFIX)) {
        return keywords.join(" OR ");
    }

    keywords
        .iter()
        .map(|kw| format!("all:\"{}\"", kw))
        .collect::<Vec<_>>()
        .join(" AND ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_uses_default_categories() {
        assert_eq!(build_query(&[]), DEFAULT_QUERY);
    }

    #[test]
    fn categories_are_ored_verbatim() {
        assert_eq!(
            build_query(&tokens(&["cat:cs.AI", "cat:cs.LG"])),
            "cat:cs.AI OR cat:cs.LG"
        );
    }

    #[test]
    fn keywords_are_anded_in_order() {
        assert_eq!(
            build_query(&tokens(&["machine learning", "graphs"])),
            r#"all:"machine learning" AND all:"graphs""#
        );
        assert_eq!(build_query(&tokens(&["diffusion"])), r#"all:"diffusion""#);
    }

    #[test]
    fn one_category_token_turns_everything_into_categories() {
        assert_eq!(
            build_query(&tokens(&["transformers", "cat:cs.CL"])),
            "transformers OR cat:cs.CL"
        );
    }
}
