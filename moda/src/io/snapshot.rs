//! JSON snapshots of lattices, atoms, configurations and simulations.
//!
//! The snapshot format mirrors the in-memory data structures, and is not
//! guaranteed to be stable across versions of this crate.
use std::path::Path;

use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;

/// Serialize `value` to a JSON string
pub fn to_string<T: Serialize>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserialize a value from a JSON string
pub fn from_str<T: DeserializeOwned>(json: &str) -> Result<T, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Save `value` as JSON in the file at `path`, replacing any existing file
pub fn save<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), Error> {
    let path = path.as_ref();
    let json = to_string(value)?;
    std::fs::write(path, json).map_err(|e| Error::from(e).with_path(path))?;

    info!("saved snapshot to '{}'", path.display());
    Ok(())
}

/// Load a value from the JSON file at `path`.
///
/// Loading a [`Simulation`](crate::Simulation) makes consecutive frames with
/// the same lattice share it again.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, Error> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| Error::from(e).with_path(path))?;
    return from_str(&json);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Atom, Lattice, Vector3D};

    #[test]
    fn strings() {
        let lattice = Lattice::triclinic(3.0, 4.0, 5.0, 80.0, 90.0, 110.0).unwrap();
        let json = to_string(&lattice).unwrap();
        assert_eq!(from_str::<Lattice>(&json).unwrap(), lattice);

        let atom = Atom::new("Fe", Vector3D::new(0.1, -2.5, 1e-12));
        let json = to_string(&atom).unwrap();
        assert_eq!(from_str::<Atom>(&json).unwrap(), atom);
    }

    #[test]
    fn invalid() {
        let error = from_str::<Atom>("{\"name\": \"Fe\"}").unwrap_err();
        assert!(matches!(error, Error::Json(_)));

        // degenerate lattices are rejected
        let json = "[[1, 0, 0], [2, 0, 0], [0, 0, 1]]";
        assert!(from_str::<Lattice>(json).is_err());
    }

    #[test]
    fn files() {
        let path = std::env::temp_dir().join(format!("moda-snapshot-{}.json", std::process::id()));
        let atom = Atom::new("Fe", Vector3D::new(0.25, 0.5, 0.75));

        save(&path, &atom).unwrap();
        let loaded: Atom = load(&path).unwrap();
        assert_eq!(loaded, atom);
        std::fs::remove_file(&path).unwrap();

        let error = load::<Atom>(&path).unwrap_err();
        assert!(matches!(error, Error::Io { path: Some(_), .. }));
    }
}
