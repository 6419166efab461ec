use indexmap::IndexSet;

use crate::{
    enhancer::QueryEnhancer,
    parser::{ast::{ItemKind, Span, Statement, StatementKind}, ParseError, QueryParser},
    sorting::SortInjector,
    AliasResolution, DeclaredQuery, EnhancerConfig, EnhancerError, ProjectionDescriptor, Sort,
};

/// Grammar-based backend. The query is parsed once, with its own parser, when the enhancer is
/// built; every operation then reads the parse tree.
#[derive(Debug, Clone)]
pub struct ParsingQueryEnhancer {
    query: DeclaredQuery,
    default_alias: String,
    statement: Result<Statement, ParseError>,
}

impl ParsingQueryEnhancer {
    pub fn new(query: DeclaredQuery, config: &EnhancerConfig) -> Self {
        let mut parser = QueryParser::new(query.query_string());
        let statement = Statement::parse(&mut parser);

        if let Err(err) = &statement {
            tracing::debug!(query = query.query_string(), error = %err, "query could not be parsed");
        }

        Self { query, default_alias: config.default_alias.clone(), statement }
    }

    fn statement(&self) -> Result<&Statement, EnhancerError> {
        let query = self.query.query_string();
        EnhancerError::ensure_text(query)?;

        self.statement.as_ref().map_err(|err| EnhancerError::from_parse(query, err))
    }

    fn primary_alias(&self, statement: &Statement) -> Result<String, EnhancerError> {
        statement.primary_alias()
            .map(str::to_string)
            .ok_or_else(|| EnhancerError::malformed(self.query.query_string(), "no alias could be located for the count projection"))
    }

    fn count_selection(&self, statement: &Statement) -> Result<String, EnhancerError> {
        let Some(select) = &statement.select else {
            return Ok(format!("select count({})", self.primary_alias(statement)?));
        };

        let distinct = select.distinct.as_deref();
        let single = match select.items.as_slice() {
            [item] => Some(item),
            _ => None,
        };

        if let Some(item) = single.filter(|item| item.kind == ItemKind::Count) {
            return Ok(match distinct {
                Some(distinct) => format!("select {} {}", distinct, item.text),
                None => format!("select {}", item.text),
            });
        }

        if self.query.is_native() {
            let value = match (distinct, single) {
                (Some(distinct), Some(item)) if item.kind == ItemKind::Path => format!("{} {}", distinct, item.expression),
                _ => "*".to_string(),
            };
            return Ok(format!("select count({})", value));
        }

        let value = match (statement.projection_descriptor(), single) {
            (Some(ProjectionDescriptor::DistinctSimplePath), Some(item)) => format!("{} {}", distinct.unwrap_or_default(), item.expression),
            _ => match distinct {
                Some(distinct) => format!("{} {}", distinct, self.primary_alias(statement)?),
                None => self.primary_alias(statement)?,
            },
        };

        Ok(format!("select count({})", value))
    }

    /// Inserts text at a position, keeping one space between the insert and what follows.
    fn splice(statement: &Statement, at: usize, insert: &str) -> String {
        let head = statement.slice(Span::new(0, at));
        let tail = statement.slice(Span::new(at, statement.len()));

        match tail.trim().is_empty() {
            true => format!("{}{}", head.trim_end(), insert),
            false => format!("{}{} {}", head.trim_end(), insert, tail.trim_start()),
        }
    }
}

impl QueryEnhancer for ParsingQueryEnhancer {
    fn query(&self) -> &DeclaredQuery {
        &self.query
    }

    fn resolve_alias(&self) -> Result<AliasResolution, EnhancerError> {
        Ok(self.statement()?.alias_resolution())
    }

    fn outer_join_aliases(&self) -> Result<IndexSet<String>, EnhancerError> {
        Ok(self.statement()?.outer_join_aliases())
    }

    fn projection(&self) -> Result<String, EnhancerError> {
        Ok(self.statement()?.projection())
    }

    fn projection_descriptor(&self) -> Result<Option<ProjectionDescriptor>, EnhancerError> {
        Ok(self.statement()?.projection_descriptor())
    }

    fn create_count_query(&self) -> Result<String, EnhancerError> {
        let query = self.query.query_string();
        let statement = self.statement()?;

        if statement.kind != StatementKind::Select {
            return Err(EnhancerError::malformed(query, "count queries can only be derived from select statements"));
        }

        let select = self.count_selection(statement)?;
        // a count cannot fetch associations
        let from = statement.slice_skipping(Span::new(statement.from.start, statement.tail_start()), &statement.fetches());
        let count_query = format!("{} {}", select, from.trim());

        tracing::debug!(query, count_query = %count_query, "derived count query");
        Ok(count_query)
    }

    fn apply_sorting(&self, sort: &Sort, alias: Option<&str>) -> Result<String, EnhancerError> {
        let query = self.query.query_string();
        if sort.is_empty() {
            return Ok(query.to_string());
        }

        let statement = self.statement()?;
        let alias = match alias {
            Some(alias) => Some(alias.to_string()),
            None if self.query.is_native() => self.detect_alias()?,
            None => Some(self.detect_alias()?.unwrap_or_else(|| self.default_alias.clone())),
        };

        // result variables of the select list are referenced as they are
        let mut unqualified = statement.outer_join_aliases();
        if let Some(select) = &statement.select {
            unqualified.extend(select.items.iter().filter_map(|item| item.alias.clone()));
        }

        let orders = SortInjector::render_orders(query, sort, alias.as_deref(), &unqualified)?;
        let sorted = match (&statement.order_by, statement.limit_offset) {
            (Some(order_by), _) => Self::splice(statement, order_by.span.end, &format!(", {}", orders)),
            (None, Some(limit)) => Self::splice(statement, limit.start, &format!(" order by {}", orders)),
            (None, None) => format!("{} order by {}", query, orders),
        };

        tracing::debug!(query, alias = ?alias, sorted = %sorted, "applied sorting");
        Ok(sorted)
    }

    fn supports_native_queries(&self) -> bool {
        true
    }
}
