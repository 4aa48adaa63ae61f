use log::info;

use crate::{Atom, Error, Vector3D};
use super::Configuration;

/// Replication factors along the three lattice vectors, used to build a
/// supercell with [`Configuration::supercell_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupercellSize {
    /// Number of copies along the first lattice vector
    pub a: usize,
    /// Number of copies along the second lattice vector
    pub b: usize,
    /// Number of copies along the third lattice vector
    pub c: usize,
}

impl SupercellSize {
    /// Create a new `SupercellSize` with the given replication factors
    pub fn new(a: usize, b: usize, c: usize) -> SupercellSize {
        SupercellSize { a: a, b: b, c: c }
    }

    /// Get the number of copies of the original cell in the supercell, or
    /// `None` if this overflows
    pub fn count(&self) -> Option<usize> {
        self.a.checked_mul(self.b)?.checked_mul(self.c)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.a == 0 || self.b == 0 || self.c == 0 {
            return Err(Error::InvalidArgument(format!(
                "supercell replication factors must be positive, got {}x{}x{}",
                self.a, self.b, self.c
            )));
        }

        if self.count().is_none() {
            return Err(Error::InvalidArgument(format!(
                "supercell {}x{}x{} is too large", self.a, self.b, self.c
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for SupercellSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.a, self.b, self.c)
    }
}

/// Supercell replication
impl Configuration {
    /// Build a supercell of this configuration, replicating it `na`, `nb` and
    /// `nc` times along the first, second and third lattice vector.
    ///
    /// See [`Configuration::supercell_with`] for more information.
    pub fn supercell(&self, na: usize, nb: usize, nc: usize) -> Result<Configuration, Error> {
        self.supercell_with(SupercellSize::new(na, nb, nc))
    }

    /// Build a supercell of this configuration with the given `size`.
    ///
    /// The lattice vectors of the supercell are the vectors of this
    /// configuration scaled by the replication factors. The supercell
    /// contains one copy of every atom for each offset `(i, j, k)` with `0 <=
    /// i < size.a`, `0 <= j < size.b` and `0 <= k < size.c`, ordered by offset
    /// (with `k` varying fastest) and then by atom. The new lattice is not
    /// shared with this configuration.
    #[time_graph::instrument(name = "Configuration::supercell")]
    pub fn supercell_with(&self, size: SupercellSize) -> Result<Configuration, Error> {
        size.validate()?;

        let factors = Vector3D::new(size.a as f64, size.b as f64, size.c as f64);
        let lattice = self.lattice.scaled(factors[0], factors[1], factors[2])?;

        let n_images = size.count().unwrap_or(usize::MAX);
        info!(
            "building a {} supercell with {} atoms",
            size, self.atoms.len().saturating_mul(n_images)
        );

        let mut supercell = Configuration::new(lattice);
        for i in 0..size.a {
            for j in 0..size.b {
                for k in 0..size.c {
                    let offset = Vector3D::new(i as f64, j as f64, k as f64);
                    for atom in &self.atoms {
                        let shifted = atom.position() + offset;
                        let position = Vector3D::new(
                            shifted[0] / factors[0],
                            shifted[1] / factors[1],
                            shifted[2] / factors[2],
                        );
                        supercell.add_atom(Atom::new(atom.name(), position));
                    }
                }
            }
        }

        return Ok(supercell);
    }
}
