use indexmap::IndexSet;

use crate::{pattern::{order_by_position, outer_join_aliases}, EnhancerError, Order, Sort};

pub struct SortInjector;

impl SortInjector {
    /// Appends the sort terms to the query text, extending the trailing ORDER BY clause of the
    /// main query when there is one. An empty sort returns any query unchanged.
    pub fn apply_sorting(query: &str, sort: &Sort, alias: Option<&str>) -> Result<String, EnhancerError> {
        if sort.is_empty() {
            return Ok(query.to_string());
        }
        EnhancerError::ensure_text(query)?;

        let orders = Self::render_orders(query, sort, alias, &outer_join_aliases(query))?;
        let sorted = match order_by_position(query).is_some() {
            true => format!("{}, {}", query, orders),
            false => format!("{} order by {}", query, orders),
        };

        tracing::debug!(query, alias = ?alias, sorted = %sorted, "applied sorting");
        Ok(sorted)
    }

    pub fn render_orders(query: &str, sort: &Sort, alias: Option<&str>, join_aliases: &IndexSet<String>) -> Result<String, EnhancerError> {
        let orders = sort.iter()
            .map(|order| Self::render_order(query, order, alias, join_aliases))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders.join(", "))
    }

    /// `[lower(]<reference>[)] <direction>`. Functions and references through an outer join
    /// are kept as given; everything else is qualified with the alias.
    pub fn render_order(query: &str, order: &Order, alias: Option<&str>, join_aliases: &IndexSet<String>) -> Result<String, EnhancerError> {
        let property = order.property.trim();
        Self::check_property(query, property)?;

        let is_function = property.contains('(');
        let leading = property.split('.').next().unwrap_or(property);

        let reference = match alias {
            Some(alias) if !is_function && !join_aliases.contains(leading) => format!("{}.{}", alias, property),
            _ => property.to_string(),
        };

        let reference = match order.ignore_case {
            true => format!("lower({})", reference),
            false => reference,
        };

        Ok(format!("{} {}", reference, order.direction.as_str()))
    }

    fn check_property(query: &str, property: &str) -> Result<(), EnhancerError> {
        if property.is_empty() {
            return Err(EnhancerError::unsupported(query, "sort property must not be blank"));
        }

        let unsafe_text = property.contains([';', '\'', '"', '`']) || property.contains("--") || property.contains("/*");
        if unsafe_text {
            return Err(EnhancerError::unsupported(query, format!("sort property '{}' cannot be qualified safely", property)));
        }

        Ok(())
    }
}
