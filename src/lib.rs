//! # cytosim
//!
//! Synthesize labeled multi-channel flow-cytometry measurements for teaching,
//! software testing, and gating-algorithm development.
//!
//! Each event carries forward scatter (FSC), side scatter (SSC), two
//! fluorescence channels (FL1, FL2), and a population label. The model is
//! deliberately statistical rather than physical:
//! - each population's channels are independent univariate normals with
//!   editable parameters,
//! - a configurable fraction of each population is boosted on both
//!   fluorescence channels to emulate double-positive cells,
//! - a simultaneous linear spillover transform mixes FL1/FL2 to emulate
//!   optical crosstalk between the detectors.
//!
//! ## Quick Start
//!
//! ```
//! use cytosim::{CytometrySimulator, Channel};
//!
//! let run = CytometrySimulator::new()
//!     .total_events(10_000)
//!     .seed(42)
//!     .run()
//!     .unwrap();
//!
//! let dataset = run.dataset();
//! assert_eq!(dataset.len(), 10_000);
//! let fl1 = dataset.channel(Channel::Fl1);
//! assert!(fl1.iter().all(|v| v.is_finite()));
//! ```
//!
//! Parameters are edited through the validated registry; a rejected edit
//! never corrupts prior state:
//!
//! ```
//! use cytosim::{CytometrySimulator, ParamField};
//!
//! let mut simulator = CytometrySimulator::new();
//! simulator
//!     .registry_mut()
//!     .update("lymphocytes", ParamField::Proportion, 0.5)
//!     .unwrap();
//! assert!(simulator
//!     .registry_mut()
//!     .update("lymphocytes", ParamField::FscStd, -1.0)
//!     .is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod dataset;
mod error;
mod generator;
mod registry;
mod simulator;
mod spillover;
mod types;

// Functional modules
pub mod output;
pub mod plot;
pub mod statistics;

// Re-exports for public API
pub use config::SimulationConfig;
pub use dataset::{Dataset, Event};
pub use error::{Error, Result};
pub use generator::generate;
pub use registry::{ParamField, PopulationRegistry, PopulationSpec};
pub use simulator::{CytometrySimulator, SimulationRun};
pub use spillover::{apply_spillover, SpilloverCoefficients};
pub use types::{Channel, Matrix2, Vector2};
