//! Geometry with periodic boundary conditions, using the minimum image
//! convention.
//!
//! The minimum image is found in reduced coordinates, before projecting onto
//! the lattice vectors. This is exact for orthorhombic lattices, and the usual
//! approximation for triclinic ones.
use crate::{Atom, Error, Lattice, Vector3D};
use crate::units::Unit;

/// Apply the minimum image convention to a `difference` of wrapped reduced
/// coordinates, bringing each component in `[-0.5, 0.5]`.
///
/// Components strictly larger than 0.5 are shifted by -1, and components
/// strictly smaller than -0.5 by +1. The boundary values are kept as-is: a
/// difference of exactly +0.5 or -0.5 is not modified.
pub fn minimum_image(difference: Vector3D) -> Vector3D {
    difference.map(|value| {
        if value > 0.5 {
            value - 1.0
        } else if value < -0.5 {
            value + 1.0
        } else {
            value
        }
    })
}

/// Get the displacement vector from `atom2` to `atom1` (*i.e.* `atom1 -
/// atom2`) using the minimum image convention, in the requested `unit`.
///
/// Both atoms are wrapped inside the unit cell before computing the
/// displacement, without modifying them.
pub fn displacement(atom1: &Atom, atom2: &Atom, lattice: &Lattice, unit: Unit) -> Vector3D {
    let reduced = reduced_displacement(atom1, atom2);
    match unit {
        Unit::Reduced => reduced,
        Unit::Cartesian => lattice.cartesian(reduced),
    }
}

/// Minimum image displacement between the wrapped positions of `atom1` and
/// `atom2`, in reduced coordinates
fn reduced_displacement(atom1: &Atom, atom2: &Atom) -> Vector3D {
    minimum_image(atom1.wrapped_position() - atom2.wrapped_position())
}

/// Get the distance between `atom1` and `atom2` using the minimum image
/// convention, in the requested `unit`.
///
/// In reduced units, this is the norm of the reduced displacement, which is
/// not a physical distance for non-cubic lattices.
pub fn distance(atom1: &Atom, atom2: &Atom, lattice: &Lattice, unit: Unit) -> f64 {
    displacement(atom1, atom2, lattice, unit).norm()
}

/// Same as [`displacement`], with an optional `lattice`. Reduced
/// displacements do not need a lattice, while cartesian displacements fail
/// with [`Error::MissingLattice`] if the lattice is missing.
pub fn displacement_in(atom1: &Atom, atom2: &Atom, lattice: Option<&Lattice>, unit: Unit) -> Result<Vector3D, Error> {
    match (lattice, unit) {
        (Some(lattice), unit) => Ok(displacement(atom1, atom2, lattice, unit)),
        (None, Unit::Reduced) => Ok(reduced_displacement(atom1, atom2)),
        (None, Unit::Cartesian) => Err(Error::MissingLattice),
    }
}

/// Same as [`distance`], with an optional `lattice`. See [`displacement_in`]
/// for the error conditions.
pub fn distance_in(atom1: &Atom, atom2: &Atom, lattice: Option<&Lattice>, unit: Unit) -> Result<f64, Error> {
    displacement_in(atom1, atom2, lattice, unit).map(|d| d.norm())
}
