//! # Number types
//!
//! Shipment quantities, supplies, demands and costs all live in the same integral number type.
//! The extreme points of the transportation polytope are integral when supplies and demands are,
//! so no fractional arithmetic is needed anywhere in the algorithms.
pub mod traits;

pub use traits::Quantity;
