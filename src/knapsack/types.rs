//! Knapsack instance data.

use std::collections::BTreeMap;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optimal objective value of [`example`].
///
/// Items 2 and 3 use 7 of 7 units on dimension 1 and 8600 of 10000 on
/// dimension 2, for a value of 19 + 23.
pub const EXAMPLE_OPTIMUM: f64 = 42.0;

/// Errors raised for inconsistent knapsack data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnapsackError {
    /// No items to choose from.
    #[error("knapsack has no items")]
    NoItems,

    /// A (dimension, item) pair has no weight entry.
    #[error("missing weight for dimension {dimension}, item {item}")]
    MissingWeight { dimension: usize, item: usize },

    /// A value, weight, or capacity is NaN or infinite.
    #[error("non-finite {what} for key {key}")]
    NonFinite { what: &'static str, key: String },
}

/// Data of a multi-constrained knapsack instance.
///
/// Items are the keys of `values`; dimensions are the keys of
/// `capacities`. Every (dimension, item) pair must have a weight.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnapsackData {
    /// Value of item `j`.
    pub values: BTreeMap<usize, f64>,
    /// Weight of item `j` on dimension `i`, keyed `(i, j)`.
    pub weights: BTreeMap<(usize, usize), f64>,
    /// Capacity of dimension `i`.
    pub capacities: BTreeMap<usize, f64>,
}

impl KnapsackData {
    /// Item keys in ascending order.
    pub fn items(&self) -> impl Iterator<Item = usize> + '_ {
        self.values.keys().copied()
    }

    /// Dimension keys in ascending order.
    pub fn dimensions(&self) -> impl Iterator<Item = usize> + '_ {
        self.capacities.keys().copied()
    }

    /// Weight of `item` on `dimension`.
    pub fn weight(&self, dimension: usize, item: usize) -> Result<f64, KnapsackError> {
        self.weights
            .get(&(dimension, item))
            .copied()
            .ok_or(KnapsackError::MissingWeight { dimension, item })
    }

    /// Checks that the data is complete and finite.
    pub fn validate(&self) -> Result<(), KnapsackError> {
        if self.values.is_empty() {
            return Err(KnapsackError::NoItems);
        }
        for (j, v) in &self.values {
            if !v.is_finite() {
                return Err(KnapsackError::NonFinite {
                    what: "value",
                    key: j.to_string(),
                });
            }
        }
        for (i, b) in &self.capacities {
            if !b.is_finite() {
                return Err(KnapsackError::NonFinite {
                    what: "capacity",
                    key: i.to_string(),
                });
            }
            for j in self.items() {
                let a = self.weight(*i, j)?;
                if !a.is_finite() {
                    return Err(KnapsackError::NonFinite {
                        what: "weight",
                        key: format!("({i},{j})"),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Textbook instance with four items and two dimensions.
pub fn example() -> KnapsackData {
    let values = BTreeMap::from([(1, 16.0), (2, 19.0), (3, 23.0), (4, 28.0)]);
    let weights = BTreeMap::from([
        ((1, 1), 2.0),
        ((1, 2), 3.0),
        ((1, 3), 4.0),
        ((1, 4), 5.0),
        ((2, 1), 3000.0),
        ((2, 2), 3500.0),
        ((2, 3), 5100.0),
        ((2, 4), 7200.0),
    ]);
    let capacities = BTreeMap::from([(1, 7.0), (2, 10000.0)]);
    KnapsackData {
        values,
        weights,
        capacities,
    }
}
