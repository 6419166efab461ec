use crate::parser::QueryParser;

/// Case-insensitive keyword matcher. A space inside the word matches any run of whitespace,
/// so `ORDER BY` also matches `order\n  by`.
#[derive(Debug, Default)]
pub struct WordComparer {
    pub word: Vec<char>,
    whitespace_postfix: bool,
    full_block_delimiter_postfix: bool,
    eof: bool,
    delimiter: Option<char>,
}

impl WordComparer {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_uppercase().chars().collect(),
            ..Default::default()
        }
    }

    pub fn is_block_delimiter(ch: char) -> bool {
        ch.is_whitespace()
    }

    pub fn is_any_delimiter(ch: char) -> bool {
        ch == ',' || ch == '(' || ch == ')' || Self::is_block_delimiter(ch)
    }

    pub fn is_identifier_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '.'
    }

    /// Number of characters the keyword spans at the parser position, if it matches there.
    pub fn matched_length(&self, parser: &QueryParser) -> Option<usize> {
        if parser.position > 0 && Self::is_identifier_char(parser.text_v[parser.position - 1]) {
            return None;
        }

        let mut offset = 0;
        for expected in self.word.iter() {
            if *expected == ' ' {
                let start = offset;
                while parser.peek(offset).is_whitespace() {
                    offset += 1;
                }
                if offset == start {
                    return None;
                }
                continue;
            }

            let position = parser.position + offset;
            if position >= parser.length || parser.text_v[position].to_uppercase().next() != Some(*expected) {
                return None;
            }
            offset += 1;
        }

        if parser.position + offset >= parser.length {
            return self.eof.then_some(offset);
        }

        if self.delimiter.is_none() && !self.full_block_delimiter_postfix && !self.whitespace_postfix {
            return Some(offset);
        }

        let next = parser.text_v[parser.position + offset];

        if self.delimiter == Some(next) {
            return Some(offset);
        }

        if self.full_block_delimiter_postfix && Self::is_any_delimiter(next) {
            return Some(offset);
        }

        if self.whitespace_postfix && Self::is_block_delimiter(next) {
            return Some(offset);
        }

        None
    }

    pub fn compare(&self, parser: &QueryParser) -> bool {
        self.matched_length(parser).is_some()
    }

    pub fn with_eof(mut self) -> Self { self.eof = true; self }
    pub fn with_whitespace_postfix(mut self) -> Self { self.whitespace_postfix = true; self }
    pub fn with_any_delimiter_postfix(mut self) -> Self { self.full_block_delimiter_postfix = true; self }
    pub fn with_delimiter(mut self, delimiter: char) -> Self { self.delimiter = Some(delimiter); self }
}

#[cfg(test)]
mod tests {
    use crate::parser::{QueryParser, WordComparer};

    #[test]
    pub fn test_compare_case_insensitive() {
        let comparer = WordComparer::new("FROM").with_whitespace_postfix();

        assert!(comparer.compare(&QueryParser::new("from User u")));
        assert!(comparer.compare(&QueryParser::new("FrOm User u")));
        assert!(!comparer.compare(&QueryParser::new("frommage")));
    }

    #[test]
    pub fn test_compare_flexible_whitespace() {
        let comparer = WordComparer::new("ORDER BY").with_whitespace_postfix();

        let parser = QueryParser::new("order \n\t by u.name");

        assert_eq!(comparer.matched_length(&parser), Some(11));
        assert!(!comparer.compare(&QueryParser::new("orderby u.name")));
    }

    #[test]
    pub fn test_compare_requires_word_start() {
        let comparer = WordComparer::new("FROM").with_whitespace_postfix();

        let mut parser = QueryParser::new("u.from from");
        parser.jump(2);
        assert!(!comparer.compare(&parser));

        parser.jump(5);
        assert!(!comparer.compare(&parser));
    }

    #[test]
    pub fn test_compare_eof() {
        let desc = WordComparer::new("DESC").with_any_delimiter_postfix().with_eof();
        let from = WordComparer::new("FROM").with_whitespace_postfix();

        assert!(desc.compare(&QueryParser::new("desc")));
        assert!(desc.compare(&QueryParser::new("desc, u.age")));
        assert!(!from.compare(&QueryParser::new("from")));
    }

    #[test]
    pub fn test_compare_delimiter() {
        let comparer = WordComparer::new("IN").with_delimiter('(');

        assert!(comparer.compare(&QueryParser::new("IN(u.roles) r")));
        assert!(!comparer.compare(&QueryParser::new("IN (u.roles) r")));
    }
}
