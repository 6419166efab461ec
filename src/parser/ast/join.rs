use crate::parser::{ast::{AliasParser, Span}, ParseError, QueryParser, COMPARERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub fn parse(parser: &mut QueryParser) -> Result<JoinType, ParseError> {
        if parser.consume(&COMPARERS.left_outer_join) || parser.consume(&COMPARERS.left_join) {
            return Ok(JoinType::Left);
        }

        if parser.consume(&COMPARERS.inner_join) {
            return Ok(JoinType::Inner);
        }

        if parser.consume(&COMPARERS.right_outer_join) || parser.consume(&COMPARERS.right_join) {
            return Ok(JoinType::Right);
        }

        if parser.consume(&COMPARERS.full_outer_join) || parser.consume(&COMPARERS.full_join) {
            return Ok(JoinType::Full);
        }

        if parser.consume(&COMPARERS.cross_join) {
            return Ok(JoinType::Cross);
        }

        if parser.consume(&COMPARERS.join) {
            return Ok(JoinType::Inner);
        }

        ParseError::new("Invalid Join type", parser.position, parser).err()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    /// The FETCH keyword, when the join also fetches.
    pub fetch: Option<Span>,
    /// Association path or entity name, e.g. `u.roles` or `treat(u.roles as Admin)`.
    pub path: String,
    pub alias: Option<String>,
}

impl Join {
    pub fn is_outer(&self) -> bool {
        self.join_type == JoinType::Left
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Join, ParseError> {
        let join_type = JoinType::parse(parser)?;
        parser.next_non_whitespace();

        let fetch_start = parser.position;
        let fetch = parser.consume(&COMPARERS.fetch).then(|| Span::new(fetch_start, parser.position));
        parser.next_non_whitespace();

        let pivot = parser.position;
        if !parser.scan_until(|p| p.current().is_whitespace() || p.current() == ',') {
            return ParseError::new("Invalid join path", pivot, parser).err();
        }
        let path = parser.text_from_pivot(pivot);
        if path.is_empty() {
            return ParseError::new("Invalid join path", pivot, parser).err();
        }

        let alias = AliasParser::parse(parser)?;
        parser.next_non_whitespace();

        if parser.consume(&COMPARERS.on) || parser.consume(&COMPARERS.with) {
            let pivot = parser.position;
            let closed = parser.scan_until(|p| {
                p.current() == ',' || COMPARERS.is_clause_start(p) || COMPARERS.is_join_start(p)
            });
            if !closed {
                return ParseError::new("Invalid join condition", pivot, parser).err();
            }
        }

        Ok(Join { join_type, fetch, path, alias })
    }
}
