use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use log::warn;

use crate::{Atom, Error, Lattice, Vector3D};
use crate::units::Unit;
use crate::pbc;

mod supercell;
pub use self::supercell::SupercellSize;

#[cfg(test)]
pub(crate) mod test_utils;

/// Number of atoms above which we warn about the quadratic cost of computing
/// all pairwise distances
const LARGE_SYSTEM: usize = 20_000;

/// Distance under which a pair of atoms is considered suspiciously close
const CLOSE_CONTACT: f64 = 1e-3;

/// A `Configuration` is a snapshot of a periodic system at a given time: a
/// lattice and the atoms inside it.
///
/// Atoms are stored in insertion order, and indexed by their name (type) to
/// allow iterating over the atoms of a single type without copying them.
///
/// The lattice is reference counted, and can be shared between multiple
/// configurations (for example all the frames of a constant volume
/// simulation). Modifying the lattice through [`Configuration::lattice_mut`]
/// only affects this configuration.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "ConfigurationData", into = "ConfigurationData")]
pub struct Configuration {
    lattice: Arc<Lattice>,
    atoms: Vec<Atom>,
    /// indexes in `atoms` of the atoms with a given name, in order of first
    /// appearance of the names
    types: IndexMap<String, Vec<usize>>,
}

/// Serialized representation of a `Configuration`, the types index is rebuilt
/// on deserialization.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigurationData {
    lattice: Lattice,
    atoms: Vec<Atom>,
}

impl From<ConfigurationData> for Configuration {
    fn from(data: ConfigurationData) -> Configuration {
        let mut configuration = Configuration::new(data.lattice);
        configuration.add_atoms(data.atoms);
        return configuration;
    }
}

impl From<Configuration> for ConfigurationData {
    fn from(configuration: Configuration) -> ConfigurationData {
        ConfigurationData {
            lattice: *configuration.lattice,
            atoms: configuration.atoms,
        }
    }
}

impl Configuration {
    /// Create a new empty configuration with the given lattice
    pub fn new(lattice: impl Into<Arc<Lattice>>) -> Configuration {
        Configuration {
            lattice: lattice.into(),
            atoms: Vec::new(),
            types: IndexMap::new(),
        }
    }

    /// Get the lattice of this configuration
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Get a shared reference to the lattice of this configuration, to be
    /// used with other configurations
    pub fn shared_lattice(&self) -> Arc<Lattice> {
        Arc::clone(&self.lattice)
    }

    /// Replace the lattice of this configuration. The reduced coordinates of
    /// the atoms are kept, so their cartesian positions will change.
    pub fn set_lattice(&mut self, lattice: impl Into<Arc<Lattice>>) {
        self.lattice = lattice.into();
    }

    /// Get mutable access to the lattice of this configuration.
    ///
    /// If the lattice is shared with other configurations, it is copied first
    /// and the other configurations keep using the old lattice.
    pub fn lattice_mut(&mut self) -> &mut Lattice {
        Arc::make_mut(&mut self.lattice)
    }

    /// Add an atom to this configuration
    pub fn add_atom(&mut self, atom: Atom) {
        let index = self.atoms.len();
        if let Some(indexes) = self.types.get_mut(atom.name()) {
            indexes.push(index);
        } else {
            self.types.insert(atom.name().to_owned(), vec![index]);
        }
        self.atoms.push(atom);
    }

    /// Add all the given atoms to this configuration
    pub fn add_atoms(&mut self, atoms: impl IntoIterator<Item = Atom>) {
        for atom in atoms {
            self.add_atom(atom);
        }
    }

    /// Get the total number of atoms in this configuration
    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    /// Check if this configuration contains no atoms
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Get the number of atoms with the given `name`
    pub fn count(&self, name: &str) -> usize {
        self.types.get(name).map_or(0, |indexes| indexes.len())
    }

    /// Get the distinct atom names in this configuration, in order of first
    /// appearance
    pub fn types(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.types.keys().map(|name| name.as_str())
    }

    /// Get all the atoms in this configuration
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Get the atoms with the given `name`, in insertion order
    pub fn atoms_of_type<'a>(&'a self, name: &str) -> impl ExactSizeIterator<Item = &'a Atom> + 'a {
        self.type_indexes(name).iter().map(move |&i| &self.atoms[i])
    }

    /// Get the atom at the given `index`
    pub fn atom(&self, index: usize) -> Result<&Atom, Error> {
        self.atoms.get(index).ok_or(Error::IndexOutOfRange {
            index: index,
            size: self.atoms.len(),
        })
    }

    /// Set the reduced position of the atom at the given `index`
    pub fn set_position(&mut self, index: usize, position: Vector3D) -> Result<(), Error> {
        let size = self.atoms.len();
        let atom = self.atoms.get_mut(index).ok_or(Error::IndexOutOfRange {
            index: index,
            size: size,
        })?;
        atom.set_position(position);
        Ok(())
    }

    /// Wrap all atoms inside the unit cell
    pub fn wrap(&mut self) {
        for atom in &mut self.atoms {
            atom.wrap();
        }
    }

    /// Get the total mass of the atoms in this configuration
    pub fn mass(&self) -> Result<f64, Error> {
        self.atoms.iter().map(Atom::mass).sum()
    }

    fn type_indexes(&self, name: &str) -> &[usize] {
        match self.types.get(name) {
            Some(indexes) => indexes.as_slice(),
            None => &[],
        }
    }

    /// Cartesian distance between atoms `i` and `j`, using the minimum image
    /// convention
    fn pair_distance(&self, i: usize, j: usize) -> f64 {
        pbc::distance(&self.atoms[i], &self.atoms[j], &self.lattice, Unit::Cartesian)
    }

    fn warn_if_large(&self, n_atoms: usize) {
        if n_atoms > LARGE_SYSTEM {
            warn!(
                "computing all pairwise distances between {} atoms, this will be slow",
                n_atoms
            );
        }
    }
}

/// Pairwise distances, using the minimum image convention
impl Configuration {
    /// Compute the distance between all pairs of atoms in this configuration,
    /// grouped by the names of the atoms in the pair.
    ///
    /// The group names are made from the two atom names sorted
    /// alphabetically and joined with `-`, so that a pair of carbon and
    /// oxygen atoms is always stored under `"C-O"`. Each pair is included
    /// exactly once, and atoms are not paired with themselves.
    #[time_graph::instrument(name = "Configuration::distances_by_type_pair")]
    pub fn distances_by_type_pair(&self) -> BTreeMap<String, Vec<f64>> {
        self.warn_if_large(self.atoms.len());

        let mut distances = BTreeMap::<String, Vec<f64>>::new();
        for i in 0..self.atoms.len() {
            for j in (i + 1)..self.atoms.len() {
                let key = pair_key(self.atoms[i].name(), self.atoms[j].name());
                distances.entry(key).or_default().push(self.pair_distance(i, j));
            }
        }

        warn_close_contacts(distances.values().flatten());
        return distances;
    }

    /// Compute pairwise distances between atoms, optionally restricted to
    /// atoms with the given names.
    ///
    /// - if `first` and `second` are the same (including both `None`), this
    ///   computes the distance between all pairs of atoms with this name (or
    ///   all atoms), each pair being counted once;
    /// - if `first` and `second` are two different names, this computes the
    ///   distance between every atom named `first` and every atom named
    ///   `second`;
    /// - if only one name is given, this computes the distance between every
    ///   atom with this name and all other atoms, each pair being counted once.
    #[time_graph::instrument(name = "Configuration::distances")]
    pub fn distances(&self, first: Option<&str>, second: Option<&str>) -> Vec<f64> {
        let mut distances = Vec::new();
        match (first, second) {
            (first, second) if first == second => {
                let indexes: Vec<usize> = match first {
                    Some(name) => self.type_indexes(name).to_vec(),
                    None => (0..self.atoms.len()).collect(),
                };
                self.warn_if_large(indexes.len());

                for (position, &i) in indexes.iter().enumerate() {
                    for &j in &indexes[(position + 1)..] {
                        distances.push(self.pair_distance(i, j));
                    }
                }
            }
            (Some(first), Some(second)) => {
                for &i in self.type_indexes(first) {
                    for &j in self.type_indexes(second) {
                        distances.push(self.pair_distance(i, j));
                    }
                }
            }
            (Some(name), None) | (None, Some(name)) => {
                self.warn_if_large(self.atoms.len());

                for i in 0..self.atoms.len() {
                    for j in (i + 1)..self.atoms.len() {
                        if self.atoms[i].name() == name || self.atoms[j].name() == name {
                            distances.push(self.pair_distance(i, j));
                        }
                    }
                }
            }
            (None, None) => unreachable!("handled by the first branch"),
        }

        warn_close_contacts(&distances);
        return distances;
    }
}

/// Emit a single warning if some of the `distances` are suspiciously small,
/// and return the number of such distances.
fn warn_close_contacts<'a>(distances: impl IntoIterator<Item = &'a f64>) -> usize {
    let mut count = 0;
    let mut closest = f64::INFINITY;
    for &distance in distances {
        if distance < CLOSE_CONTACT {
            count += 1;
            closest = f64::min(closest, distance);
        }
    }

    if count != 0 {
        warn!(
            "{} pairs of atoms are very close to one another (closest at {} A)",
            count, closest
        );
    }

    return count;
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Configuration: {} atoms (", self.atoms.len())?;
        for (i, (name, indexes)) in self.types.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, indexes.len())?;
        }
        write!(f, "), lattice={}>", self.lattice)
    }
}

/// Name of the group for a pair of atoms named `first` and `second`
fn pair_key(first: &str, second: &str) -> String {
    if first <= second {
        format!("{}-{}", first, second)
    } else {
        format!("{}-{}", second, first)
    }
}
