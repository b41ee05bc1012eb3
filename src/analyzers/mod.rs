//! Summary tables computed from a cleaned (and usually filtered) batch.
//!
//! Every function here is pure and accepts an empty batch, returning an empty
//! table rather than failing so each view can render an empty state.

pub mod company;
pub mod couriers;
pub mod types;
pub mod utility;

#[cfg(test)]
pub(crate) mod test_support;
