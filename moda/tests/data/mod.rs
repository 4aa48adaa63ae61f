#![allow(dead_code)]

use std::path::PathBuf;

use moda::{Simulation, Configuration, Lattice, Atom, Vector3D};

pub fn path(name: &str) -> String {
    format!("tests/data/{}", name)
}

pub fn read_simulation(name: &str, timestep: f64) -> Simulation {
    moda::io::read_trajectory(path(name), timestep).expect("failed to read trajectory")
}

/// Get a path in the temporary directory, unique to this process and `name`
pub fn temporary(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("moda-{}-{}", std::process::id(), name))
}

/// A small triclinic configuration with a few different atom types
pub fn triclinic_configuration() -> Configuration {
    let lattice = Lattice::triclinic(6.1, 7.3, 5.2, 75.0, 98.0, 112.0).expect("invalid lattice");
    let mut configuration = Configuration::new(lattice);
    configuration.add_atom(Atom::new("Zn", Vector3D::new(0.0, 0.0, 0.0)));
    configuration.add_atom(Atom::new("S", Vector3D::new(0.25, 0.25, 0.25)));
    configuration.add_atom(Atom::new("O", Vector3D::new(0.4, 0.1, 0.35)));
    configuration.add_atom(Atom::new("O", Vector3D::new(0.1, 0.4, 0.15)));
    configuration.add_atom(Atom::new("S", Vector3D::new(0.75, 0.8, 0.6)));
    return configuration;
}
