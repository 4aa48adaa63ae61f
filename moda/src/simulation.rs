use std::sync::Arc;

use crate::{Configuration, Error, Vector3D};

/// A `Simulation` is a trajectory: an ordered sequence of [`Configuration`]
/// (frames), separated by a constant timestep.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SimulationData", into = "SimulationData")]
pub struct Simulation {
    timestep: f64,
    frames: Vec<Configuration>,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SimulationData {
    timestep: f64,
    frames: Vec<Configuration>,
}

impl TryFrom<SimulationData> for Simulation {
    type Error = Error;

    fn try_from(data: SimulationData) -> Result<Simulation, Error> {
        let mut simulation = Simulation::new(data.timestep)?;
        simulation.frames = data.frames;
        // each frame is serialized with its own copy of the lattice
        simulation.share_lattices();
        return Ok(simulation);
    }
}

impl From<Simulation> for SimulationData {
    fn from(simulation: Simulation) -> SimulationData {
        SimulationData {
            timestep: simulation.timestep,
            frames: simulation.frames,
        }
    }
}

fn check_timestep(timestep: f64) -> Result<(), Error> {
    if !timestep.is_finite() || timestep <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "timestep must be a positive number, got {}", timestep
        )));
    }
    Ok(())
}

impl Simulation {
    /// Create a new empty simulation with the given `timestep` between
    /// frames.
    pub fn new(timestep: f64) -> Result<Simulation, Error> {
        check_timestep(timestep)?;
        Ok(Simulation {
            timestep: timestep,
            frames: Vec::new(),
        })
    }

    /// Get the timestep between two frames of this simulation
    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Set the timestep between two frames of this simulation
    pub fn set_timestep(&mut self, timestep: f64) -> Result<(), Error> {
        check_timestep(timestep)?;
        self.timestep = timestep;
        Ok(())
    }

    /// Add a new frame at the end of this simulation
    pub fn push(&mut self, configuration: Configuration) {
        self.frames.push(configuration);
    }

    /// Get the number of frames in this simulation
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if this simulation contains no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get the frame at the given `index`
    pub fn frame(&self, index: usize) -> Result<&Configuration, Error> {
        self.frames.get(index).ok_or(Error::IndexOutOfRange {
            index: index,
            size: self.frames.len(),
        })
    }

    /// Get mutable access to the frame at the given `index`
    pub fn frame_mut(&mut self, index: usize) -> Result<&mut Configuration, Error> {
        let size = self.frames.len();
        self.frames.get_mut(index).ok_or(Error::IndexOutOfRange {
            index: index,
            size: size,
        })
    }

    /// Get the time of the frame at the given `index`, the first frame being
    /// at time 0
    pub fn time(&self, index: usize) -> Result<f64, Error> {
        self.frame(index)?;
        Ok(index as f64 * self.timestep)
    }

    /// Iterate over the frames of this simulation
    pub fn iter(&self) -> std::slice::Iter<'_, Configuration> {
        self.frames.iter()
    }

    /// Get all the frames of this simulation
    pub fn frames(&self) -> &[Configuration] {
        &self.frames
    }

    /// Estimate the velocity of every atom in frame `index`, using a backward
    /// finite difference of the cartesian positions with the previous frame.
    ///
    /// The positions are used as-is, so the trajectory must not be wrapped:
    /// an atom crossing a periodic boundary would otherwise jump by a full
    /// lattice vector. Each frame uses its own lattice to compute cartesian
    /// positions.
    pub fn velocities(&self, index: usize) -> Result<Vec<Vector3D>, Error> {
        if index == 0 {
            return Err(Error::IndexOutOfRange {
                index: index,
                size: self.frames.len(),
            });
        }

        let current = self.frame(index)?;
        let previous = self.frame(index - 1)?;

        if current.size() != previous.size() {
            return Err(Error::InvalidArgument(format!(
                "frames {} and {} have different number of atoms ({} and {})",
                index - 1, index, previous.size(), current.size()
            )));
        }

        let mut velocities = Vec::with_capacity(current.size());
        for (i, (before, after)) in previous.atoms().iter().zip(current.atoms()).enumerate() {
            if before.name() != after.name() {
                return Err(Error::InvalidArgument(format!(
                    "atom {} changed name between frames {} and {} ({} and {})",
                    i, index - 1, index, before.name(), after.name()
                )));
            }

            let displacement = after.cartesian(current.lattice()) - before.cartesian(previous.lattice());
            velocities.push(displacement / self.timestep);
        }

        return Ok(velocities);
    }

    /// Make consecutive frames with the same lattice share a single
    /// reference-counted lattice.
    pub fn share_lattices(&mut self) {
        for i in 1..self.frames.len() {
            let (before, after) = self.frames.split_at_mut(i);
            let previous = &before[i - 1];
            let current = &mut after[0];

            if Arc::ptr_eq(&previous.shared_lattice(), &current.shared_lattice()) {
                continue;
            }

            if previous.lattice() == current.lattice() {
                current.set_lattice(previous.shared_lattice());
            }
        }
    }
}

impl<'a> IntoIterator for &'a Simulation {
    type Item = &'a Configuration;
    type IntoIter = std::slice::Iter<'a, Configuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl std::fmt::Display for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Simulation: {} frames, timestep={}>", self.frames.len(), self.timestep)
    }
}
