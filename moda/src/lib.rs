#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names, clippy::similar_names)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

//! Periodic atomistic configurations and simulation trajectories.
//!
//! A [`Lattice`] defines a periodic cell, [`Atom`]s are placed inside it using
//! reduced coordinates, and a [`Configuration`] groups a lattice with its
//! atoms. A [`Simulation`] is a sequence of configurations separated by a
//! constant timestep, which can be read from and written to trajectory files
//! with the functions in [`io`].

pub mod types;
pub use types::{Vector3D, Matrix3};

mod errors;
pub use self::errors::Error;

mod units;
pub use self::units::{Unit, AngleUnit};

mod lattice;
pub use self::lattice::{Lattice, LatticeShape};

pub mod elements;

mod atom;
pub use self::atom::Atom;

pub mod pbc;

mod configuration;
pub use self::configuration::{Configuration, SupercellSize};

mod simulation;
pub use self::simulation::Simulation;

pub mod io;
