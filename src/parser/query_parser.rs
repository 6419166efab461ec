use crate::parser::{Phase, WordComparer, COMPARERS};

#[derive(Debug, Default)]
pub struct QueryParser {
    pub position: usize,
    pub length: usize,
    pub text_v: Vec<char>,
    pub phase: Phase,
    pub parentheses_depth: usize,
}

impl QueryParser {
    pub fn new(query: &str) -> Self {
        let text_v: Vec<char> = query.chars().collect();
        Self {
            length: text_v.len(),
            text_v,
            ..Default::default()
        }
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn current(&self) -> char {
        self.peek(0)
    }

    pub fn peek(&self, ahead: usize) -> char {
        match self.text_v.get(self.position + ahead) {
            Some(ch) => *ch,
            None => '\0',
        }
    }

    pub fn next(&mut self) {
        if self.position < self.length {
            self.position += 1;
        }
    }

    pub fn next_non_whitespace(&mut self) {
        while !self.eof() && self.current().is_whitespace() {
            self.next();
        }
    }

    pub fn jump(&mut self, ahead: usize) {
        self.position = (self.position + ahead).min(self.length);
    }

    /// Moves past the keyword when it matches at the current position.
    pub fn consume(&mut self, comparer: &WordComparer) -> bool {
        match comparer.matched_length(self) {
            Some(length) => {
                self.jump(length);
                true
            },
            None => false,
        }
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.length);
        let start = start.min(end);
        self.text_v[start..end].iter().collect()
    }

    pub fn text_from_pivot(&self, pivot: usize) -> String {
        self.text_from_range(pivot, self.position)
    }

    /// Collects `[letters digits _ $ .]` from the current position.
    pub fn collect_identifier(&mut self) -> String {
        let pivot = self.position;
        while !self.eof() && WordComparer::is_identifier_char(self.current()) {
            self.next();
        }
        self.text_from_pivot(pivot)
    }

    /// Advances until `stop` holds at parentheses depth zero outside string literals, or to the end
    /// of the text. Returns false on unbalanced parentheses or an unterminated literal.
    pub fn scan_until(&mut self, stop: impl Fn(&QueryParser) -> bool) -> bool {
        let mut quote: Option<char> = None;
        self.parentheses_depth = 0;

        while !self.eof() {
            let current = self.current();

            if let Some(delimiter) = quote {
                if current == delimiter {
                    // doubled quote is an escaped quote
                    if self.peek(1) == delimiter {
                        self.next();
                    } else {
                        quote = None;
                    }
                }
                self.next();
                continue;
            }

            if self.parentheses_depth == 0 && stop(self) {
                return true;
            }

            match current {
                '\'' | '"' => quote = Some(current),
                '(' => self.parentheses_depth += 1,
                ')' => {
                    if self.parentheses_depth == 0 {
                        return false;
                    }
                    self.parentheses_depth -= 1;
                },
                _ => {},
            }
            self.next();
        }

        quote.is_none() && self.parentheses_depth == 0
    }

    /// Scans the body of the current clause, stopping at the next top-level clause keyword.
    pub fn scan_clause(&mut self) -> bool {
        self.scan_until(|parser| COMPARERS.is_clause_start(parser))
    }

    /// Moves the phase forward when a later clause starts at the next non-whitespace position.
    pub fn check_next_phase(&mut self) -> bool {
        self.next_non_whitespace();

        if self.eof() {
            self.phase = Phase::EOF;
            return true;
        }

        if self.phase < Phase::LimitAndOffset && (COMPARERS.limit.compare(self) || COMPARERS.offset.compare(self)) {
            self.phase = Phase::LimitAndOffset;
            return true;
        }

        if self.phase < Phase::OrderBy && COMPARERS.order_by.compare(self) {
            self.phase = Phase::OrderBy;
            return true;
        }

        if self.phase < Phase::Having && COMPARERS.having.compare(self) {
            self.phase = Phase::Having;
            return true;
        }

        if self.phase < Phase::Grouping && COMPARERS.group_by.compare(self) {
            self.phase = Phase::Grouping;
            return true;
        }

        if self.phase < Phase::Criteria && COMPARERS.r#where.compare(self) {
            self.phase = Phase::Criteria;
            return true;
        }

        if self.phase < Phase::Ranges && COMPARERS.from.compare(self) {
            self.phase = Phase::Ranges;
            return true;
        }

        false
    }
}
