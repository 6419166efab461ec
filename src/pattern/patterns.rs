use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `from <entity> [as] <alias>`
/// Captures: (1) entity, (2) alias
pub static ALIAS_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfrom\s+([\w.$]+)(?:\s+as)?\s+(\w+)").unwrap()
});

/// A further `, <entity> [as] <alias>` range directly after a matched one.
/// Captures: (1) entity, (2) alias
pub static RANGE_CONTINUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*,\s*([\w.$]+)(?:\s+as)?\s+(\w+)").unwrap()
});

/// `left [outer] join [fetch] <path> [as] <alias>`
/// Captures: (1) alias
pub static LEFT_JOIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bleft\s+(?:outer\s+)?join\s+(?:fetch\s+)?[\w.$]+\s+(?:as\s+)?(\w+)").unwrap()
});

/// Text in front of the main FROM clause.
/// Captures: (1) distinct keyword, (2) projection
pub static SELECT_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*(?:select\s+(distinct\s+)?(.+?))?\s*$").unwrap()
});

pub static FROM_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfrom\b").unwrap()
});

pub static ORDER_BY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\border\s+by\s").unwrap()
});

pub static SIMPLE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w$]+(?:\.[\w$]+)*$").unwrap()
});

pub static CONSTRUCTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^new\s").unwrap()
});

/// One call spanning the whole projection. The argument text still has to be balanced.
/// Captures: (1) function name, (2) arguments
pub static SINGLE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(\w+)\s*\((.*)\)$").unwrap()
});

/// Whether `offset` lies outside string literals and parentheses.
pub fn is_top_level(query: &str, offset: usize) -> bool {
    let mut quote: Option<char> = None;
    let mut depth = 0i32;

    for ch in query[..offset].chars() {
        match quote {
            // a doubled quote closes and reopens the literal
            Some(delimiter) if ch == delimiter => quote = None,
            Some(_) => {},
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {},
            },
        }
    }

    quote.is_none() && depth == 0
}

/// Matches of `pattern` that start outside literals and subqueries.
pub fn top_level_captures<'t>(pattern: &Regex, query: &'t str) -> impl Iterator<Item = Captures<'t>> {
    pattern.captures_iter(query)
        .filter(move |captures| captures.get(0).is_some_and(|m| is_top_level(query, m.start())))
}

/// Select head of the query, up to its main FROM keyword.
pub fn select_head(query: &str) -> Option<Captures<'_>> {
    let from = FROM_KEYWORD.find_iter(query).find(|m| is_top_level(query, m.start()))?;
    SELECT_HEAD.captures(&query[..from.start()])
}

/// Start of the trailing ORDER BY of the main query.
pub fn order_by_position(query: &str) -> Option<usize> {
    ORDER_BY.find_iter(query)
        .filter(|m| is_top_level(query, m.start()))
        .last()
        .map(|m| m.start())
}
