use once_cell::sync::Lazy;

use crate::parser::{QueryParser, WordComparer};

/// Keyword table shared by every parser; built once, read-only afterwards.
pub static COMPARERS: Lazy<QueryComparers> = Lazy::new(QueryComparers::new);

/// Words that can never be an identification variable.
const RESERVED: &[&str] = &[
    "AS", "BY", "CROSS", "DELETE", "DISTINCT", "FETCH", "FROM", "FULL", "GROUP", "HAVING", "IN", "INNER",
    "JOIN", "LEFT", "LIMIT", "OFFSET", "ON", "ORDER", "OUTER", "RIGHT", "SELECT", "SET", "UNION", "UPDATE",
    "WHERE", "WITH",
];

#[derive(Debug)]
pub struct QueryComparers {
    pub select: WordComparer,
    pub distinct: WordComparer,
    pub delete: WordComparer,
    pub alias: WordComparer,
    pub from: WordComparer,
    pub r#in: WordComparer,
    pub inner_join: WordComparer,
    pub left_outer_join: WordComparer,
    pub left_join: WordComparer,
    pub right_outer_join: WordComparer,
    pub right_join: WordComparer,
    pub full_outer_join: WordComparer,
    pub full_join: WordComparer,
    pub cross_join: WordComparer,
    pub join: WordComparer,
    pub fetch: WordComparer,
    pub on: WordComparer,
    pub with: WordComparer,
    pub r#where: WordComparer,
    pub group_by: WordComparer,
    pub having: WordComparer,
    pub order_by: WordComparer,
    pub limit: WordComparer,
    pub offset: WordComparer,
    pub new: WordComparer,
}

impl Default for QueryComparers {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryComparers {
    pub fn new() -> Self {
        Self {
            select: WordComparer::new("SELECT").with_any_delimiter_postfix(),
            distinct: WordComparer::new("DISTINCT").with_any_delimiter_postfix(),
            delete: WordComparer::new("DELETE").with_whitespace_postfix(),
            alias: WordComparer::new("AS").with_whitespace_postfix().with_eof(),
            from: WordComparer::new("FROM").with_whitespace_postfix(),
            r#in: WordComparer::new("IN").with_delimiter('(').with_whitespace_postfix(),
            inner_join: WordComparer::new("INNER JOIN").with_any_delimiter_postfix(),
            left_outer_join: WordComparer::new("LEFT OUTER JOIN").with_any_delimiter_postfix(),
            left_join: WordComparer::new("LEFT JOIN").with_any_delimiter_postfix(),
            right_outer_join: WordComparer::new("RIGHT OUTER JOIN").with_any_delimiter_postfix(),
            right_join: WordComparer::new("RIGHT JOIN").with_any_delimiter_postfix(),
            full_outer_join: WordComparer::new("FULL OUTER JOIN").with_any_delimiter_postfix(),
            full_join: WordComparer::new("FULL JOIN").with_any_delimiter_postfix(),
            cross_join: WordComparer::new("CROSS JOIN").with_any_delimiter_postfix(),
            join: WordComparer::new("JOIN").with_any_delimiter_postfix(),
            fetch: WordComparer::new("FETCH").with_whitespace_postfix(),
            on: WordComparer::new("ON").with_any_delimiter_postfix(),
            with: WordComparer::new("WITH").with_any_delimiter_postfix(),
            r#where: WordComparer::new("WHERE").with_any_delimiter_postfix(),
            group_by: WordComparer::new("GROUP BY").with_whitespace_postfix(),
            having: WordComparer::new("HAVING").with_any_delimiter_postfix(),
            order_by: WordComparer::new("ORDER BY").with_whitespace_postfix(),
            limit: WordComparer::new("LIMIT").with_whitespace_postfix(),
            offset: WordComparer::new("OFFSET").with_whitespace_postfix(),
            new: WordComparer::new("NEW").with_whitespace_postfix(),
        }
    }

    pub fn is_join_start(&self, parser: &QueryParser) -> bool {
        self.join_comparers().iter().any(|comparer| comparer.compare(parser))
    }

    /// Join keywords, longest first so that `LEFT OUTER JOIN` wins over `LEFT JOIN`.
    pub fn join_comparers(&self) -> [&WordComparer; 9] {
        [
            &self.left_outer_join, &self.left_join, &self.inner_join, &self.right_outer_join, &self.right_join,
            &self.full_outer_join, &self.full_join, &self.cross_join, &self.join,
        ]
    }

    pub fn is_clause_start(&self, parser: &QueryParser) -> bool {
        self.r#where.compare(parser) || self.group_by.compare(parser) || self.having.compare(parser) ||
            self.order_by.compare(parser) || self.limit.compare(parser) || self.offset.compare(parser)
    }

    pub fn is_reserved(word: &str) -> bool {
        RESERVED.iter().any(|reserved| reserved.eq_ignore_ascii_case(word))
    }
}
