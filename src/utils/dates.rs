use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const PUBLISHED_FORMAT: &str = "%B %d, %Y";
const UPDATED_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// 解析 ISO-8601 风格的时间戳，保留原始时区下的墙上时间
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 论文发布日期，例如 "January 15, 2024"；解析失败时原样返回
pub fn format_published(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(PUBLISHED_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// 页面上的更新时间，例如 "January 15, 2024 at 06:30 PM"
pub fn format_last_updated(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(UPDATED_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// 本地时间，不带时区，精确到微秒
pub fn now_iso() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
