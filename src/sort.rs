use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EnhancerError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn is_ascending(&self) -> bool {
        *self == Direction::Asc
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl FromStr for Direction {
    type Err = EnhancerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(EnhancerError::InvalidArgument(format!("Invalid sort direction '{}'", other))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub ignore_case: bool,
}

impl Order {
    pub fn new(property: &str, direction: Direction) -> Self {
        Self { property: property.to_string(), direction, ignore_case: false }
    }

    pub fn asc(property: &str) -> Self {
        Self::new(property, Direction::Asc)
    }

    pub fn desc(property: &str) -> Self {
        Self::new(property, Direction::Desc)
    }

    pub fn ignoring_case(mut self) -> Self { self.ignore_case = true; self }
}

/// Ordered sort terms; the first order has the highest priority.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn by_properties(direction: Direction, properties: &[&str]) -> Self {
        Self { orders: properties.iter().map(|property| Order::new(property, direction)).collect() }
    }

    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, Order, Sort};

    #[test]
    pub fn test_direction_from_str() {
        assert_eq!("ASC".parse::<Direction>().expect("Failed to parse direction"), Direction::Asc);
        assert_eq!(" desc ".parse::<Direction>().expect("Failed to parse direction"), Direction::Desc);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    pub fn test_sort_keeps_order() {
        let sort = Sort::by_properties(Direction::Desc, &["lastname", "firstname"])
            .and(Order::asc("age").ignoring_case());

        let properties = sort.iter().map(|order| order.property.as_str()).collect::<Vec<_>>();

        assert_eq!(properties, vec!["lastname", "firstname", "age"]);
        assert!(sort.iter().last().expect("Missing order").ignore_case);
    }

    #[test]
    pub fn test_sort_from_json() {
        let sort: Sort = serde_json::from_str(r#"[
            { "property": "name", "direction": "desc", "ignore_case": true },
            { "property": "age" }
        ]"#).expect("Failed to deserialize sort");

        assert_eq!(sort.len(), 2);
        assert_eq!(sort, Sort::by(vec![Order::desc("name").ignoring_case(), Order::asc("age")]));
    }
}
