use crate::{pattern, sorting::SortInjector, EnhancerError, Sort, DEFAULT_ALIAS};

pub use crate::pattern::{create_count_query_for, detect_alias, outer_join_aliases};

pub const COUNT_QUERY_STRING: &str = "select count(%s) from %s x";
pub const DELETE_ALL_QUERY_STRING: &str = "delete from %s x";

/// Substitutes the entity name into a `%s` template.
pub fn query_string(template: &str, entity_name: &str) -> Result<String, EnhancerError> {
    if entity_name.trim().is_empty() {
        return Err(EnhancerError::InvalidArgument("Entity name must not be blank".into()));
    }
    Ok(template.replacen("%s", entity_name, 1))
}

pub fn count_query_string(count_placeholder: &str, entity_name: &str) -> Result<String, EnhancerError> {
    query_string(&COUNT_QUERY_STRING.replacen("%s", count_placeholder, 1), entity_name)
}

/// `select count(<placeholder>) from <entity> x WHERE x.a = :a AND ... AND 1 = 1`
pub fn exists_query_string(entity_name: &str, count_placeholder: &str, id_attributes: &[&str]) -> Result<String, EnhancerError> {
    let mut query = count_query_string(count_placeholder, entity_name)?;
    query.push_str(" WHERE ");

    for attribute in id_attributes {
        query.push_str(&format!("x.{} = :{} AND ", attribute, attribute));
    }

    query.push_str("1 = 1");
    Ok(query)
}

/// Restricts the query to the given number of entities bound as positional parameters:
/// `... where x = ?1 or x = ?2`.
pub fn apply_entity_criteria(query: &str, entity_count: usize) -> Result<String, EnhancerError> {
    EnhancerError::ensure_text(query)?;

    if entity_count == 0 {
        return Ok(query.to_string());
    }

    let alias = pattern::detect_alias(query)
        .ok_or_else(|| EnhancerError::malformed(query, "no alias to bind entities to"))?;

    let conditions = (1..=entity_count)
        .map(|index| format!("{} = ?{}", alias, index))
        .collect::<Vec<_>>();

    Ok(format!("{} where {}", query, conditions.join(" or ")))
}

pub fn apply_sorting(query: &str, sort: &Sort, alias: &str) -> Result<String, EnhancerError> {
    SortInjector::apply_sorting(query, sort, Some(alias))
}

pub fn apply_sorting_default(query: &str, sort: &Sort) -> Result<String, EnhancerError> {
    apply_sorting(query, sort, DEFAULT_ALIAS)
}

/// Whether the query uses `:name` parameters outside string literals.
pub fn has_named_parameter(query: &str) -> bool {
    let chars = query.chars().collect::<Vec<_>>();
    let mut quote: Option<char> = None;

    for (index, ch) in chars.iter().enumerate() {
        if let Some(delimiter) = quote {
            if *ch == delimiter {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' => quote = Some(*ch),
            ':' => {
                let previous = index.checked_sub(1).map(|previous| chars[previous]);
                let next = chars.get(index + 1).copied();
                let starts_name = next.is_some_and(|next| next.is_alphabetic() || next == '_');
                if starts_name && previous != Some(':') {
                    return true;
                }
            },
            _ => {},
        }
    }

    false
}

/// Sums the rows of a count query; missing values count as zero.
pub fn sum_counts(totals: &[Option<i64>]) -> i64 {
    totals.iter().map(|total| total.unwrap_or(0)).sum()
}
