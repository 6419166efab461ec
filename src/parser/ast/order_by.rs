use crate::parser::{ast::Span, ParseError, Phase, QueryParser, COMPARERS};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub span: Span,
}

impl OrderByClause {
    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        let start = parser.position;
        if !parser.consume(&COMPARERS.order_by) {
            return ParseError::new("Invalid order by", start, parser).err();
        }

        loop {
            parser.next_non_whitespace();
            let pivot = parser.position;
            let closed = parser.scan_until(|p| p.current() == ',' || COMPARERS.is_clause_start(p));
            if !closed {
                return ParseError::new("Invalid order by", pivot, parser).err();
            }

            if parser.text_from_pivot(pivot).trim().is_empty() {
                return ParseError::new("Invalid order by", pivot, parser).err();
            }

            if parser.current() == ',' {
                parser.next();
                continue;
            }
            break;
        }
        parser.phase = Phase::OrderBy;

        Ok(Self { span: Span::new(start, parser.position) })
    }
}
