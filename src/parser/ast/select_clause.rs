use crate::parser::{ast::Span, ParseError, Phase, QueryComparers, QueryParser, COMPARERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Path,
    Constructor,
    Count,
    Aggregate,
    Function,
    Wildcard,
    Complex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub text: String,
    /// The item without its result variable (`u.name as n` -> `u.name`).
    pub expression: String,
    pub alias: Option<String>,
    pub kind: ItemKind,
}

impl SelectItem {
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        let (expression, alias, kind) = Self::classify(text);

        Self { text: text.to_string(), expression, alias, kind }
    }

    fn classify(text: &str) -> (String, Option<String>, ItemKind) {
        let complex = (text.to_string(), None, ItemKind::Complex);

        if text == "*" || text.ends_with(".*") {
            return (text.to_string(), None, ItemKind::Wildcard);
        }

        let mut parser = QueryParser::new(text);
        if COMPARERS.new.compare(&parser) {
            return (text.to_string(), None, ItemKind::Constructor);
        }

        let name = parser.collect_identifier();
        if name.is_empty() || name.ends_with('.') {
            return complex;
        }

        let mut kind = ItemKind::Path;
        if parser.current() == '(' {
            parser.next();
            if !parser.scan_until(|p| p.current() == ')') || parser.eof() {
                return complex;
            }
            parser.next();

            kind = match name.to_ascii_lowercase().as_str() {
                "count" => ItemKind::Count,
                "sum" | "avg" | "min" | "max" => ItemKind::Aggregate,
                _ => ItemKind::Function,
            };
        }

        let expression = parser.text_from_pivot(0);
        let rest = parser.text_from_range(parser.position, parser.length);

        match Self::result_alias(&rest) {
            Some(alias) => (expression, alias, kind),
            None => complex,
        }
    }

    /// `Some(None)` when nothing follows the expression, `Some(Some(alias))` for a result
    /// variable, `None` when the rest is anything else.
    fn result_alias(rest: &str) -> Option<Option<String>> {
        let is_word = |word: &str| word.chars().all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$');
        let words = rest.split_whitespace().collect::<Vec<_>>();

        match words.as_slice() {
            [] => Some(None),
            [keyword, alias] if keyword.eq_ignore_ascii_case("as") && is_word(alias) => Some(Some(alias.to_string())),
            [alias] if !rest.starts_with(|ch: char| !ch.is_whitespace()) && is_word(alias) && !QueryComparers::is_reserved(alias) =>
                Some(Some(alias.to_string())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    pub span: Span,
    /// The DISTINCT keyword as written, when present.
    pub distinct: Option<String>,
    pub projection: Span,
    pub items: Vec<SelectItem>,
}

impl SelectClause {
    pub fn parse(parser: &mut QueryParser) -> Result<Self, ParseError> {
        let start = parser.position;
        if !parser.consume(&COMPARERS.select) {
            return ParseError::new("Invalid select clause", start, parser).err();
        }
        parser.next_non_whitespace();

        let pivot = parser.position;
        let distinct = match parser.consume(&COMPARERS.distinct) {
            true => Some(parser.text_from_pivot(pivot)),
            false => None,
        };
        parser.next_non_whitespace();

        let projection_start = parser.position;
        let mut items: Vec<SelectItem> = vec![];
        loop {
            let pivot = parser.position;
            if !parser.scan_until(|p| p.current() == ',' || COMPARERS.from.compare(p)) {
                return ParseError::new("Unbalanced projection", pivot, parser).err();
            }

            if parser.eof() {
                return ParseError::new("Missing FROM clause", pivot, parser).err();
            }

            let text = parser.text_from_pivot(pivot);
            if text.trim().is_empty() {
                return ParseError::new("Invalid projection", pivot, parser).err();
            }
            items.push(SelectItem::from_text(&text));

            if parser.current() == ',' {
                parser.next();
                parser.next_non_whitespace();
                continue;
            }
            break;
        }

        let projection = Span::new(projection_start, parser.position);
        parser.phase = Phase::Ranges;

        Ok(Self { span: Span::new(start, parser.position), distinct, projection, items })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ast::{ItemKind, SelectClause, SelectItem}, QueryParser};

    #[test]
    pub fn test_item_path() {
        let item = SelectItem::from_text("u.address.city");

        assert_eq!(item.kind, ItemKind::Path);
        assert_eq!(item.expression, "u.address.city");
        assert_eq!(item.alias, None);
    }

    #[test]
    pub fn test_item_path_with_alias() {
        let item = SelectItem::from_text("u.name as n");

        assert_eq!(item.kind, ItemKind::Path);
        assert_eq!(item.expression, "u.name");
        assert_eq!(item.alias.unwrap(), "n");

        let item = SelectItem::from_text("u.name n");
        assert_eq!(item.kind, ItemKind::Path);
        assert_eq!(item.alias.unwrap(), "n");
    }

    #[test]
    pub fn test_item_functions() {
        assert_eq!(SelectItem::from_text("count(distinct u.id)").kind, ItemKind::Count);
        assert_eq!(SelectItem::from_text("COUNT (u)").kind, ItemKind::Complex);
        assert_eq!(SelectItem::from_text("max(u.age) as oldest").kind, ItemKind::Aggregate);
        assert_eq!(SelectItem::from_text("upper(u.name)").kind, ItemKind::Function);
        assert_eq!(SelectItem::from_text("count(u) + 1").kind, ItemKind::Complex);
    }

    #[test]
    pub fn test_item_others() {
        assert_eq!(SelectItem::from_text("new com.example.Dto(u.name, u.age)").kind, ItemKind::Constructor);
        assert_eq!(SelectItem::from_text("*").kind, ItemKind::Wildcard);
        assert_eq!(SelectItem::from_text("u.*").kind, ItemKind::Wildcard);
        assert_eq!(SelectItem::from_text("case when u.age > 1 then 1 else 0 end").kind, ItemKind::Complex);
        assert_eq!(SelectItem::from_text("newest").kind, ItemKind::Path);
    }

    #[test]
    pub fn test_select_clause() {
        let text = "SELECT DISTINCT u.name, new Dto(u.a, u.b) FROM User u";

        let mut parser = QueryParser::new(text);

        let result = SelectClause::parse(&mut parser).expect("Failed to parse select clause");

        assert_eq!(result.distinct.unwrap(), "DISTINCT");
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].kind, ItemKind::Path);
        assert_eq!(result.items[1].kind, ItemKind::Constructor);
        assert_eq!(parser.text_from_range(result.projection.start, result.projection.end), "u.name, new Dto(u.a, u.b) ");
    }

    #[test]
    pub fn test_select_clause_with_from_inside_word() {
        let text = "select x, frommage, y from t";

        let mut parser = QueryParser::new(text);

        let result = SelectClause::parse(&mut parser).expect("Failed to parse select clause");

        assert_eq!(result.items.len(), 3);
        assert_eq!(result.items[1].expression, "frommage");
    }

    #[test]
    pub fn test_select_clause_without_from() {
        let text = "select u.name, u.age";

        let mut parser = QueryParser::new(text);

        let result = SelectClause::parse(&mut parser);

        match result {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.message, "Missing FROM clause");
                assert_eq!(err.start, 15);
            },
        }
    }

    #[test]
    pub fn test_select_clause_empty_item() {
        let text = "select u.name, , u.age from User u";

        let mut parser = QueryParser::new(text);

        match SelectClause::parse(&mut parser) {
            Ok(_) => panic!(),
            Err(err) => assert_eq!(err.message, "Invalid projection"),
        }
    }
}
