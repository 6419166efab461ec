use crate::parser::{ast::Join, ParseError, Phase, QueryComparers, QueryParser, WordComparer, COMPARERS};

pub struct AliasParser;

impl AliasParser {
    /// Parses an optional `[AS] alias`. Reserved words are never taken as an alias.
    pub fn parse(parser: &mut QueryParser) -> Result<Option<String>, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;

        let explicit = parser.consume(&COMPARERS.alias);
        if explicit {
            parser.next_non_whitespace();
        }

        let start = parser.position;
        while !parser.eof() && (parser.current().is_alphanumeric() || parser.current() == '_' || parser.current() == '$') {
            parser.next();
        }
        let word = parser.text_from_pivot(start);

        if word.is_empty() || QueryComparers::is_reserved(&word) {
            if explicit {
                return ParseError::new("Missing alias after AS", pivot, parser).err();
            }
            parser.position = start;
            return Ok(None);
        }

        Ok(Some(word))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Range {
    Entity { name: String, alias: Option<String> },
    /// `IN (u.roles) r`
    Member { path: String, alias: Option<String> },
    /// `(select ...) t`
    Derived { query: String, alias: Option<String> },
}

impl Range {
    pub fn alias(&self) -> Option<&str> {
        match self {
            Range::Entity { alias, .. } | Range::Member { alias, .. } | Range::Derived { alias, .. } => alias.as_deref(),
        }
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Range, ParseError> {
        parser.next_non_whitespace();
        let pivot = parser.position;

        if parser.consume(&COMPARERS.r#in) {
            parser.next_non_whitespace();
            if parser.current() != '(' {
                return ParseError::new("Invalid collection member declaration", pivot, parser).err();
            }
            parser.next();

            let start = parser.position;
            if !parser.scan_until(|p| p.current() == ')') || parser.eof() {
                return ParseError::new("Invalid collection member declaration", pivot, parser).err();
            }
            let path = parser.text_from_pivot(start).trim().to_string();
            parser.next();

            return Ok(Range::Member { path, alias: AliasParser::parse(parser)? });
        }

        if parser.current() == '(' {
            parser.next();

            let start = parser.position;
            if !parser.scan_until(|p| p.current() == ')') || parser.eof() {
                return ParseError::new("Invalid derived table", pivot, parser).err();
            }
            let query = parser.text_from_pivot(start).trim().to_string();
            parser.next();

            return Ok(Range::Derived { query, alias: AliasParser::parse(parser)? });
        }

        let name = Self::entity_name(parser, pivot)?;
        if name.is_empty() || QueryComparers::is_reserved(&name) {
            return ParseError::new("Invalid entity name", pivot, parser).err();
        }

        Ok(Range::Entity { name, alias: AliasParser::parse(parser)? })
    }

    /// Dotted name whose segments may be quoted, e.g. `"public"."Users"`.
    fn entity_name(parser: &mut QueryParser, pivot: usize) -> Result<String, ParseError> {
        let start = parser.position;

        loop {
            match parser.current() {
                '"' | '`' => {
                    let quote = parser.current();
                    parser.next();
                    while !parser.eof() && parser.current() != quote {
                        parser.next();
                    }
                    if parser.eof() {
                        return ParseError::new("Unterminated quoted identifier", pivot, parser).err();
                    }
                    parser.next();
                },
                ch if WordComparer::is_identifier_char(ch) => {
                    parser.collect_identifier();
                },
                _ => break,
            }
        }

        Ok(parser.text_from_pivot(start))
    }
}

pub struct RangesParser;

impl RangesParser {
    /// Parses `FROM range [joins] {, range [joins]}`.
    pub fn parse(parser: &mut QueryParser) -> Result<(Vec<Range>, Vec<Join>), ParseError> {
        if !parser.consume(&COMPARERS.from) {
            return ParseError::new("Missing FROM clause", parser.position, parser).err();
        }
        parser.phase = Phase::Ranges;

        let mut ranges: Vec<Range> = vec![];
        let mut joins: Vec<Join> = vec![];
        loop {
            ranges.push(Range::parse(parser)?);

            parser.next_non_whitespace();
            while COMPARERS.is_join_start(parser) {
                joins.push(Join::parse(parser)?);
                parser.next_non_whitespace();
            }

            if parser.current() == ',' {
                parser.next();
                continue;
            }
            break;
        }

        Ok((ranges, joins))
    }
}
