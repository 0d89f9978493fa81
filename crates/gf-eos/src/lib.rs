//! gf-eos: equation-of-state evaluator contract for gibbsflash.
//!
//! Provides:
//! - `GibbsModel` trait: Gibbs energy of one candidate phase at (p, T, n)
//! - Feed validation (`Feed`)
//! - Reference models (`IdealMixture`, `RegularSolution`)
//! - Adapters (`FnModel` for closures, `CountingModel` for instrumentation)
//!
//! # Architecture
//!
//! The flash engine only ever sees the `GibbsModel` trait. Real equation-of-state
//! libraries (cubic, SAFT, activity models) plug in by implementing it; the
//! reference models here exist for tests, demos and sanity checks.
//!
//! # Failure contract
//!
//! A model that cannot produce a physical state for a phase (no physical volume
//! root, negative amounts, ...) returns `NaN` instead of an error. The flash
//! objective relies on detecting `NaN` to steer the search away from the
//! candidate; it never catches panics.
//!
//! # Example
//!
//! ```
//! use gf_core::units::{k, pa};
//! use gf_eos::{GibbsModel, IdealMixture};
//!
//! let model = IdealMixture::new(2);
//! let g = model.gibbs_energy(pa(101_325.0), k(300.0), &[1.0, 1.0]);
//! assert!(g < 0.0);
//! ```

pub mod adapter;
pub mod error;
pub mod feed;
pub mod ideal;
pub mod model;

// Re-exports for ergonomics
pub use adapter::{CountingModel, FnModel};
pub use error::{EosError, EosResult};
pub use feed::Feed;
pub use ideal::{IdealMixture, RegularSolution};
pub use model::{GibbsModel, validation};
