//! Multiphase isothermal-isobaric flash by global Gibbs energy minimization.
//!
//! Given a feed, pressure, temperature and an assumed number of phases, the
//! flash searches the space of all mass-balance-exact partitions of the feed
//! for the one with the lowest total Gibbs energy.
//!
//! The pieces, leaves first:
//! - [`codec`]: nested-interval encoding of a partition as a point in the unit
//!   cube. Every point decodes to a non-negative allocation whose column sums
//!   equal the feed, so mass balance is never a penalty.
//! - [`objective`]: decodes a point, sums per-phase Gibbs energies from a
//!   [`GibbsModel`](gf_eos::GibbsModel) and returns G/(RT·N). Non-finite sums
//!   become a large finite sentinel.
//! - [`flash()`]: validates inputs, runs the seeded differential evolution
//!   search from `gf-optim` under the configured budgets, and re-decodes the
//!   best point into a [`FlashSolution`].
//!
//! The phase count is the caller's assumption. When fewer phases really
//! exist, the optimum shows two phases with near-identical compositions or a
//! phase with near-zero amount; see [`FlashSolution::collapsed_pairs`] and
//! [`FlashSolution::present_phases`].

pub mod codec;
pub mod config;
pub mod error;
pub mod flash;
pub mod objective;
pub mod solution;

pub use codec::PhasePartition;
pub use config::{FlashConfig, MIN_SENTINEL};
pub use error::{FlashError, FlashResult};
pub use flash::flash;
pub use objective::{DEFAULT_SENTINEL, GibbsObjective};
pub use solution::{FlashReport, FlashSolution};
