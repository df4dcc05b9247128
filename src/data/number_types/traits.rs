//! # Traits
//!
//! The algorithms are written against a single trait, such that they can be tested on small
//! integer types and run on wide ones without adaptation.
use std::fmt::{Debug, Display};
use std::iter::Sum;

use num_traits::{PrimInt, Signed};

/// Integral values used for quantities and costs.
///
/// The type needs to be signed: node potentials and reduced costs are differences of costs and can
/// be negative, even though all inputs are not.
///
/// Automatically implemented for all types satisfying the trait's bounds, such as `i32`, `i64` and
/// `i128`.
pub trait Quantity:
    PrimInt +
    Signed +
    Sum +
    // Practicalities
    Debug +
    Display +
    // Problems are shared read-only between parallel runs
    Send +
    Sync +
    'static
{
}

impl<T> Quantity for T
where
    T: PrimInt + Signed + Sum + Debug + Display + Send + Sync + 'static,
{
}

/// Sum of the values, or `None` if it overflows somewhere along the way.
pub fn checked_sum<T: Quantity>(values: impl IntoIterator<Item = T>) -> Option<T> {
    values.into_iter().try_fold(T::zero(), |total, value| total.checked_add(&value))
}
