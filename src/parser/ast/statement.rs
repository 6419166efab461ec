use indexmap::IndexSet;

use crate::{
    parser::{ast::{ItemKind, Join, OrderByClause, Range, RangesParser, SelectClause, Span}, ParseError, Phase, QueryParser, COMPARERS},
    AliasResolution, ProjectionDescriptor,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    #[default]
    Select,
    Delete,
}

/// Parse tree of one statement. Clauses keep their spans so that rewrites can reuse the
/// original text verbatim.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub select: Option<SelectClause>,
    pub from: Span,
    pub ranges: Vec<Range>,
    pub joins: Vec<Join>,
    pub order_by: Option<OrderByClause>,
    pub limit_offset: Option<Span>,
    text_v: Vec<char>,
}

impl Statement {
    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        parser.next_non_whitespace();

        let mut statement = Statement { text_v: parser.text_v.clone(), ..Default::default() };

        if COMPARERS.select.compare(parser) {
            statement.select = Some(SelectClause::parse(parser)?);
        } else if parser.consume(&COMPARERS.delete) {
            statement.kind = StatementKind::Delete;
            parser.next_non_whitespace();
        }

        let from_start = parser.position;
        let (ranges, joins) = RangesParser::parse(parser)?;
        statement.ranges = ranges;
        statement.joins = joins;

        if !parser.check_next_phase() {
            return ParseError::new("Unexpected token", parser.position, parser).err();
        }
        statement.from = Span::new(from_start, parser.position);

        while parser.phase != Phase::EOF {
            let pivot = parser.position;
            match parser.phase {
                Phase::Criteria | Phase::Grouping | Phase::Having => Self::parse_clause(parser, pivot)?,
                Phase::OrderBy => statement.order_by = Some(OrderByClause::parse(parser)?),
                Phase::LimitAndOffset => {
                    parser.jump(parser.length);
                    statement.limit_offset = Some(Span::new(pivot, parser.length));
                },
                Phase::Projection | Phase::Ranges | Phase::EOF => break,
            }

            if !parser.check_next_phase() {
                return ParseError::new("Unexpected clause", parser.position, parser).err();
            }
        }

        Ok(statement)
    }

    /// Skips over a WHERE, GROUP BY or HAVING clause, which rewrites keep as written.
    fn parse_clause(parser: &mut QueryParser, pivot: usize) -> Result<(), ParseError> {
        parser.consume(&COMPARERS.r#where);
        parser.consume(&COMPARERS.group_by);
        parser.consume(&COMPARERS.having);

        if !parser.scan_clause() {
            return ParseError::new("Unbalanced clause", pivot, parser).err();
        }

        Ok(())
    }

    pub fn text(&self) -> String {
        self.text_v.iter().collect()
    }

    pub fn slice(&self, span: Span) -> String {
        let end = span.end.min(self.text_v.len());
        let start = span.start.min(end);
        self.text_v[start..end].iter().collect()
    }

    /// Text of the span with the `skipped` spans cut out, each together with the whitespace after it.
    pub fn slice_skipping(&self, span: Span, skipped: &[Span]) -> String {
        let mut text = String::new();
        let mut position = span.start;

        for skip in skipped {
            if skip.start < position || skip.end > span.end {
                continue;
            }
            text.push_str(&self.slice(Span::new(position, skip.start)));
            position = skip.end;
            while self.text_v.get(position).is_some_and(|ch| ch.is_whitespace()) {
                position += 1;
            }
        }

        text.push_str(&self.slice(Span::new(position, span.end)));
        text
    }

    /// FETCH keywords of the joins, in order.
    pub fn fetches(&self) -> Vec<Span> {
        self.joins.iter().filter_map(|join| join.fetch).collect()
    }

    pub fn len(&self) -> usize {
        self.text_v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text_v.is_empty()
    }

    /// Where the ordering/paging tail starts; everything before it is kept by a count query.
    pub fn tail_start(&self) -> usize {
        self.order_by.as_ref().map(|order_by| order_by.span.start)
            .or(self.limit_offset.map(|span| span.start))
            .unwrap_or(self.text_v.len())
    }

    pub fn primary_alias(&self) -> Option<&str> {
        self.ranges.first().and_then(Range::alias)
    }

    pub fn alias_resolution(&self) -> AliasResolution {
        let Some(primary) = self.primary_alias() else {
            return AliasResolution::Missing;
        };

        let others = self.ranges.iter().skip(1)
            .filter(|range| matches!(range, Range::Entity { .. } | Range::Derived { .. }))
            .filter_map(|range| range.alias().map(str::to_string))
            .collect::<Vec<_>>();

        match others.is_empty() {
            true => AliasResolution::Unique(primary.to_string()),
            false => AliasResolution::Ambiguous { primary: primary.to_string(), others },
        }
    }

    pub fn outer_join_aliases(&self) -> IndexSet<String> {
        self.joins.iter()
            .filter(|join| join.is_outer())
            .filter_map(|join| join.alias.clone())
            .collect()
    }

    pub fn projection(&self) -> String {
        match &self.select {
            Some(select) => self.slice(select.projection).trim().to_string(),
            None => String::new(),
        }
    }

    pub fn projection_descriptor(&self) -> Option<ProjectionDescriptor> {
        let select = self.select.as_ref()?;

        let descriptor = match select.items.as_slice() {
            [item] => match item.kind {
                ItemKind::Path if select.distinct.is_some() => ProjectionDescriptor::DistinctSimplePath,
                ItemKind::Path => ProjectionDescriptor::SimplePath,
                ItemKind::Constructor => ProjectionDescriptor::ConstructorExpression,
                ItemKind::Count | ItemKind::Aggregate => ProjectionDescriptor::AggregateOrCount,
                ItemKind::Function | ItemKind::Wildcard | ItemKind::Complex => ProjectionDescriptor::Complex,
            },
            _ => ProjectionDescriptor::Complex,
        };

        Some(descriptor)
    }
}

impl TryFrom<&str> for Statement {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parser = QueryParser::new(value);
        Statement::parse(&mut parser)
    }
}

#[cfg(test)]
mod tests {
    use crate::{parser::ast::{Statement, StatementKind}, AliasResolution, ProjectionDescriptor};

    #[test]
    pub fn test_statement() {
        let text = r#"
SELECT DISTINCT u.name
FROM User u
LEFT JOIN u.roles r
INNER JOIN u.groups g
WHERE u.age > 16 AND (r.name = 'ADMIN' OR g.name like 'order by%')
GROUP BY u.name
HAVING count(r) > 3
ORDER BY u.name DESC
        "#;

        let statement = Statement::try_from(text).expect("Failed to parse statement");

        assert_eq!(statement.kind, StatementKind::Select);
        assert_eq!(statement.ranges.len(), 1);
        assert_eq!(statement.joins.len(), 2);
        let order_by = statement.order_by.as_ref().expect("Missing order by");
        assert_eq!(statement.slice(order_by.span).trim_end(), "ORDER BY u.name DESC");
        assert_eq!(statement.primary_alias(), Some("u"));
        assert_eq!(statement.projection(), "u.name");
        assert_eq!(statement.projection_descriptor(), Some(ProjectionDescriptor::DistinctSimplePath));
        assert!(statement.outer_join_aliases().contains("r"));
        assert!(!statement.outer_join_aliases().contains("g"));
    }

    #[test]
    pub fn test_statement_without_select() {
        let statement = Statement::try_from("from User u where u.active = true").expect("Failed to parse statement");

        assert!(statement.select.is_none());
        assert_eq!(statement.projection(), "");
        assert_eq!(statement.projection_descriptor(), None);
        assert_eq!(statement.tail_start(), statement.len());
    }

    #[test]
    pub fn test_slice_without_fetch() {
        let text = "select u from User u left join fetch u.roles r join FETCH  u.groups g where r.name = ?1";

        let statement = Statement::try_from(text).expect("Failed to parse statement");

        assert_eq!(statement.fetches().len(), 2);
        assert_eq!(
            statement.slice_skipping(statement.from, &statement.fetches()),
            "from User u left join u.roles r join u.groups g ",
        );
    }

    #[test]
    pub fn test_delete_statement() {
        let statement = Statement::try_from("delete from User u where u.id = ?1").expect("Failed to parse statement");

        assert_eq!(statement.kind, StatementKind::Delete);
        assert_eq!(statement.primary_alias(), Some("u"));
    }

    #[test]
    pub fn test_subquery_is_not_the_outer_clause() {
        let text = "select u from User u where u.id in (select o.owner from Order o order by o.date) order by u.name";

        let statement = Statement::try_from(text).expect("Failed to parse statement");

        let order_by = statement.order_by.as_ref().expect("Missing order by");
        assert_eq!(statement.slice(order_by.span), "order by u.name");
        assert_eq!(statement.primary_alias(), Some("u"));
    }

    #[test]
    pub fn test_multiple_ranges_resolve_first_alias() {
        let statement = Statement::try_from("select u from User u, Role r where r.owner = u").expect("Failed to parse statement");

        assert_eq!(statement.primary_alias(), Some("u"));
        assert_eq!(statement.alias_resolution(), AliasResolution::Ambiguous { primary: "u".into(), others: vec!["r".into()] });
    }

    #[test]
    pub fn test_limit_and_offset() {
        let text = "select * from users u order by u.name limit 10 offset 20";

        let statement = Statement::try_from(text).expect("Failed to parse statement");

        let limit = statement.limit_offset.expect("Missing limit");
        assert_eq!(statement.slice(limit), "limit 10 offset 20");
        assert_eq!(statement.projection_descriptor(), Some(ProjectionDescriptor::Complex));
    }

    #[test]
    pub fn test_clause_out_of_order() {
        let text = "select u from User u order by u.name where u.age > 3";

        match Statement::try_from(text) {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Unexpected clause"),
        }
    }

    #[test]
    pub fn test_missing_from() {
        match Statement::try_from("select u.name") {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Missing FROM clause"),
        }

        match Statement::try_from("update User u set u.name = 'a'") {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Missing FROM clause"),
        }
    }

    #[test]
    pub fn test_unbalanced_criteria() {
        match Statement::try_from("select u from User u where (u.age > 3") {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Unbalanced clause"),
        }
    }
}
