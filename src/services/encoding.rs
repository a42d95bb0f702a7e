use std::collections::BTreeSet;
use std::fmt::Display;

use crate::models::FeatureBlock;

/// Separator between the namespace prefix and the category value
pub const COLUMN_SEPARATOR: char = '|';

/// Column name of a one-hot indicator, e.g. `genre|rock`
pub fn one_hot_column(prefix: &str, category: &impl Display) -> String {
    format!("{}{}{}", prefix, COLUMN_SEPARATOR, category)
}

/// One-hot encodes a categorical column.
///
/// Produces one column per distinct value in `values`, ordered by the
/// values' natural order. A row gets `weight` in the column of its own
/// category and 0.0 everywhere else. Row order and count are preserved.
pub fn one_hot_encode<C>(values: &[C], prefix: &str, weight: f64) -> FeatureBlock
where
    C: Ord + Display,
{
    let categories: Vec<&C> = values.iter().collect::<BTreeSet<_>>().into_iter().collect();
    let columns = categories
        .iter()
        .map(|category| one_hot_column(prefix, category))
        .collect();

    let rows = values
        .iter()
        .map(|value| {
            categories
                .iter()
                .map(|category| if *category == value { weight } else { 0.0 })
                .collect()
        })
        .collect();

    FeatureBlock::new(columns, rows)
}
