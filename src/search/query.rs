//! Search query mini-language / 搜索语法解析
//!
//! One operator per query, resolved by fixed precedence:
//!
//! | Priority | Syntax          | Meaning                          |
//! |----------|-----------------|----------------------------------|
//! | 1        | `red or blue`   | any term present                 |
//! | 2        | `red+rose`      | every term present               |
//! | 3        | `rose-white`    | first part present, rest absent  |
//! | 4        | `rose`          | term present                     |
//!
//! Operators do not compose. `a+b-c` is an AND of `a` and `b-c`; the `-`
//! is only read as NOT when neither `or` nor `+` appears.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Standalone word "or", any case / 独立的 or 单词
static OR_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bor\b").unwrap());

/// "or" with whitespace on both sides, the split point for OR queries
static OR_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+or\s+").unwrap());

/// Parsed search query / 解析后的查询
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParsedQuery {
    /// Zero terms matches everything / 简单搜索
    Simple { terms: Vec<String> },
    /// Any term / 任一匹配
    Or { terms: Vec<String> },
    /// Every term / 全部匹配
    And { terms: Vec<String> },
    /// `include` present and `exclude` absent / 排除
    Not { include: String, exclude: String },
}

impl ParsedQuery {
    /// Query with no constraint / 空查询
    pub fn match_all() -> Self {
        ParsedQuery::Simple { terms: Vec::new() }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, ParsedQuery::Simple { terms } if terms.is_empty())
    }
}

/// Parse a raw query string / 解析搜索查询字符串
pub fn parse(raw: &str) -> ParsedQuery {
    let query = raw.trim();
    if query.is_empty() {
        return ParsedQuery::match_all();
    }

    if OR_WORD.is_match(query) {
        return ParsedQuery::Or {
            terms: non_empty_parts(OR_SEPARATOR.split(query)),
        };
    }

    if query.contains('+') {
        return ParsedQuery::And {
            terms: non_empty_parts(query.split('+')),
        };
    }

    if let Some((include, exclude)) = query.split_once('-') {
        return ParsedQuery::Not {
            include: include.trim().to_string(),
            exclude: exclude.trim().to_string(),
        };
    }

    ParsedQuery::Simple {
        terms: vec![query.to_string()],
    }
}

fn non_empty_parts<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
