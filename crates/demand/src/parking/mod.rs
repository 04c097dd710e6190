//! Parking demand for a building site.
//!
//! Turns the host's per-function gross floor area into required parking
//! spots and compares the total with the spots actually drawn on the site.
//!
//! ## Pipeline
//! - **Ratios**: square metres of floor area per spot, one per function.
//!   Seeded with a default the first time a site is opened, then owned by
//!   the user and persisted under a fixed key.
//! - **Demand**: `round(area / ratio)` per function. A function without a
//!   usable ratio, or whose area the host could not compute, demands 0.
//! - **Balance**: available spots minus total demand, shown as excess,
//!   missing, or an exact match.
//!
//! ## Lifecycle
//! `Uninitialized` until the first fetch starts, `Loading` while the host
//! computes metrics, then `Ready` (or `Failed` on error or timeout). Ratio
//! edits recompute in place without refetching.

pub mod balance;
pub mod demand;
pub mod ratio_store;
pub mod state;

#[cfg(test)]
mod tests_balance;
#[cfg(test)]
mod tests_demand;
#[cfg(test)]
mod tests_ratio_store;

pub use balance::*;
pub use demand::*;
pub use ratio_store::*;
pub use state::*;
