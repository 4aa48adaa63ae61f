//! Reading and writing simulations to files.
//!
//! Trajectories use a plain text format, with one block per frame:
//!
//! ```text
//! <ax> <ay> <az>
//! <bx> <by> <bz>
//! <cx> <cy> <cz>
//! <type 1> <type 2> ... <type N>
//! <count 1> <count 2> ... <count N>
//! <name> <a> <b> <c>
//! ...
//! ```
//!
//! where the three first lines are the lattice vectors, followed by the list
//! of atom types and the number of atoms of each type, and finally one line
//! per atom with its name and reduced coordinates. Frames follow each other
//! without separators.
//!
//! Snapshots store any of the data types of this crate as JSON, to be loaded
//! later by the same version of this crate.

pub mod trajectory;
pub use self::trajectory::{TrajectoryReader, TrajectoryWriter};
pub use self::trajectory::{read_trajectory, write_trajectory};

pub mod snapshot;
