#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub enum Phase {
    #[default]
    Projection = 0,
    Ranges = 1,
    Criteria = 2,
    Grouping = 3,
    Having = 4,
    OrderBy = 5,
    LimitAndOffset = 6,
    EOF = 7,
}
