use crate::{Error, Lattice, Vector3D};
use crate::units::Unit;
use crate::elements::atomic_mass;

/// An atom, with a name (usually the element symbol) and a position in
/// reduced coordinates.
///
/// The reduced coordinates are only meaningful together with a [`Lattice`],
/// which the atom does not store. They are not required to be inside `[0, 1)`,
/// use [`Atom::wrap`] to bring them back into the unit cell.
///
/// Two atoms are equal if they have the same name and exactly the same
/// reduced coordinates.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Atom {
    name: String,
    position: Vector3D,
}

impl Atom {
    /// Create a new atom with the given `name` and `position` in reduced
    /// coordinates
    pub fn new(name: impl Into<String>, position: Vector3D) -> Atom {
        Atom {
            name: name.into(),
            position: position,
        }
    }

    /// Get the name of this atom
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name of this atom
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the position of this atom in reduced coordinates
    pub fn position(&self) -> Vector3D {
        self.position
    }

    /// Set the position of this atom in reduced coordinates
    pub fn set_position(&mut self, position: Vector3D) {
        self.position = position;
    }

    /// Get the cartesian position of this atom in the given `lattice`
    pub fn cartesian(&self, lattice: &Lattice) -> Vector3D {
        lattice.cartesian(self.position)
    }

    /// Get the position of this atom in the given `unit`. A `lattice` is
    /// required to get the cartesian position.
    pub fn position_in(&self, unit: Unit, lattice: Option<&Lattice>) -> Result<Vector3D, Error> {
        match unit {
            Unit::Reduced => Ok(self.position),
            Unit::Cartesian => {
                let lattice = lattice.ok_or(Error::MissingLattice)?;
                Ok(self.cartesian(lattice))
            }
        }
    }

    /// Get the position of this atom wrapped inside the unit cell, *i.e.* with
    /// all reduced coordinates in `[0, 1)`. The atom itself is not modified.
    pub fn wrapped_position(&self) -> Vector3D {
        self.position.map(wrap_coordinate)
    }

    /// Wrap the position of this atom inside the unit cell
    pub fn wrap(&mut self) {
        self.position = self.wrapped_position();
    }

    /// Get the atomic mass of this atom, using the name as element symbol
    pub fn mass(&self) -> Result<f64, Error> {
        atomic_mass(&self.name)
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
            "<Atom: name={}, a={}, b={}, c={}>",
            self.name, self.position[0], self.position[1], self.position[2]
        )
    }
}

/// Map a single reduced coordinate to `[0, 1)`
fn wrap_coordinate(value: f64) -> f64 {
    let wrapped = value - f64::floor(value);
    // tiny negative values give `1.0 - epsilon`, which rounds to 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
