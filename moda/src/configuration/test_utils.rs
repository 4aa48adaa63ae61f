use crate::{Atom, Lattice, Vector3D};
use super::Configuration;

pub fn test_configuration(name: &str) -> Configuration {
    match name {
        "water" => get_water(),
        "CO2" => get_co2(),
        "NaCl" => get_nacl(),
        "triclinic" => get_triclinic(),
        _ => panic!("unknown test configuration {}", name)
    }
}

fn cubic(length: f64) -> Lattice {
    Lattice::cubic(length).expect("invalid test lattice")
}

fn get_water() -> Configuration {
    let mut configuration = Configuration::new(cubic(10.0));
    configuration.add_atom(Atom::new("O", Vector3D::new(0.5, 0.5, 0.5)));
    configuration.add_atom(Atom::new("H", Vector3D::new(0.5, 0.575545, 0.441105)));
    configuration.add_atom(Atom::new("H", Vector3D::new(0.5, 0.424455, 0.441105)));
    return configuration;
}

/// Linear CO2 molecule along the x axis, with C-O bonds of 1.16 A
fn get_co2() -> Configuration {
    let mut configuration = Configuration::new(cubic(10.0));
    configuration.add_atom(Atom::new("C", Vector3D::new(0.5, 0.5, 0.5)));
    configuration.add_atom(Atom::new("O", Vector3D::new(0.616, 0.5, 0.5)));
    configuration.add_atom(Atom::new("O", Vector3D::new(0.384, 0.5, 0.5)));
    return configuration;
}

/// Conventional rocksalt cell, with a lattice constant of 5.64 A
fn get_nacl() -> Configuration {
    let mut configuration = Configuration::new(cubic(5.64));
    let fcc = [
        Vector3D::new(0.0, 0.0, 0.0),
        Vector3D::new(0.5, 0.5, 0.0),
        Vector3D::new(0.5, 0.0, 0.5),
        Vector3D::new(0.0, 0.5, 0.5),
    ];

    for &position in &fcc {
        configuration.add_atom(Atom::new("Na", position));
    }

    let shift = Vector3D::new(0.5, 0.0, 0.0);
    for &position in &fcc {
        let mut atom = Atom::new("Cl", position + shift);
        atom.wrap();
        configuration.add_atom(atom);
    }

    return configuration;
}

fn get_triclinic() -> Configuration {
    let lattice = Lattice::triclinic(5.0, 6.0, 7.0, 80.0, 95.0, 105.0).expect("invalid test lattice");
    let mut configuration = Configuration::new(lattice);
    configuration.add_atom(Atom::new("Si", Vector3D::new(0.1, 0.2, 0.3)));
    configuration.add_atom(Atom::new("O", Vector3D::new(0.6, 0.1, 0.9)));
    configuration.add_atom(Atom::new("O", Vector3D::new(0.35, 0.75, 0.5)));
    return configuration;
}
