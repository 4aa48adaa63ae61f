use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::{Atom, Configuration, Error, Lattice, Simulation, Vector3D};

/// Read frames from a trajectory in text format, one [`Configuration`] at a
/// time.
///
/// Consecutive frames with exactly the same lattice share a single
/// [`Lattice`]. Reading stops at the end of the input, or after the first
/// error.
pub struct TrajectoryReader<R> {
    reader: R,
    /// number of the last line read, starting at 1
    line: usize,
    lattice: Option<Arc<Lattice>>,
    frames: usize,
    done: bool,
}

impl<R: BufRead> TrajectoryReader<R> {
    /// Create a new reader for the trajectory in `reader`
    pub fn new(reader: R) -> TrajectoryReader<R> {
        TrajectoryReader {
            reader: reader,
            line: 0,
            lattice: None,
            frames: 0,
            done: false,
        }
    }

    /// Read the next frame, returning `None` at the end of the input
    pub fn read_frame(&mut self) -> Result<Option<Configuration>, Error> {
        // blank lines between frames and at the end of the input are ignored
        let first = loop {
            match self.next_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Ok(None),
            }
        };

        let a = self.parse_vector(&first, "first lattice vector")?;
        let line = self.expect_line()?;
        let b = self.parse_vector(&line, "second lattice vector")?;
        let line = self.expect_line()?;
        let c = self.parse_vector(&line, "third lattice vector")?;
        let lattice = self.shared_lattice(a, b, c)?;

        let types_line = self.expect_line()?;
        let types = types_line.split_whitespace().collect::<Vec<_>>();
        for (i, name) in types.iter().enumerate() {
            if types[..i].contains(name) {
                return Err(self.error(format!("atom type '{}' is declared twice", name)));
            }
        }

        let counts_line = self.expect_line()?;
        let counts_line_number = self.line;
        let counts = counts_line.split_whitespace()
            .map(|count| count.parse::<usize>().map_err(|_| self.error(format!(
                "expected a non-negative integer atom count, got '{}'", count
            ))))
            .collect::<Result<Vec<_>, _>>()?;

        if counts.len() != types.len() {
            return Err(self.error(format!(
                "got {} atom counts for {} atom types", counts.len(), types.len()
            )));
        }

        let n_atoms = counts.iter().try_fold(0_usize, |total, &count| total.checked_add(count))
            .ok_or_else(|| self.error("total number of atoms is too large".into()))?;

        let mut configuration = Configuration::new(lattice);
        for _ in 0..n_atoms {
            let line = self.expect_line()?;
            let atom = self.parse_atom(&line)?;
            if !types.contains(&atom.name()) {
                return Err(self.error(format!(
                    "atom name '{}' is not one of the declared types", atom.name()
                )));
            }
            configuration.add_atom(atom);
        }

        for (name, &count) in types.iter().zip(&counts) {
            if configuration.count(name) != count {
                return Err(Error::MalformedTrajectory {
                    line: counts_line_number,
                    message: format!(
                        "expected {} atoms of type '{}', got {}",
                        count, name, configuration.count(name)
                    ),
                });
            }
        }

        self.frames += 1;
        debug!("read frame {} with {} atoms", self.frames, configuration.size());

        return Ok(Some(configuration));
    }

    /// Read the next line, without the line terminator. Returns `None` at the
    /// end of the input.
    fn next_line(&mut self) -> Result<Option<String>, Error> {
        let mut buffer = String::new();
        if self.reader.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }

        self.line += 1;
        let length = buffer.trim_end_matches(&['\n', '\r'][..]).len();
        buffer.truncate(length);
        return Ok(Some(buffer));
    }

    /// Read the next line, which must exist
    fn expect_line(&mut self) -> Result<String, Error> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(Error::MalformedTrajectory {
                line: self.line + 1,
                message: "unexpected end of file in the middle of a frame".into(),
            }),
        }
    }

    fn error(&self, message: String) -> Error {
        Error::MalformedTrajectory {
            line: self.line,
            message: message,
        }
    }

    fn parse_number(&self, value: &str, what: &str) -> Result<f64, Error> {
        let number = value.parse::<f64>().map_err(|_| self.error(format!(
            "expected a number for the {}, got '{}'", what, value
        )))?;

        if !number.is_finite() {
            return Err(self.error(format!("the {} must be finite, got '{}'", what, value)));
        }

        return Ok(number);
    }

    fn parse_vector(&self, line: &str, what: &str) -> Result<Vector3D, Error> {
        let fields = line.split_whitespace().collect::<Vec<_>>();
        if fields.len() != 3 {
            return Err(self.error(format!(
                "expected 3 values for the {}, got {}", what, fields.len()
            )));
        }

        let mut vector = Vector3D::zero();
        for (i, field) in fields.iter().enumerate() {
            vector[i] = self.parse_number(field, what)?;
        }
        return Ok(vector);
    }

    fn parse_atom(&self, line: &str) -> Result<Atom, Error> {
        let mut fields = line.split_whitespace();
        let name = fields.next().ok_or_else(|| self.error("expected an atom record, got an empty line".into()))?;

        let rest = fields.collect::<Vec<_>>();
        if rest.len() != 3 {
            return Err(self.error(format!(
                "expected an atom name and 3 coordinates, got {} values", rest.len() + 1
            )));
        }

        let mut position = Vector3D::zero();
        for (i, field) in rest.iter().enumerate() {
            position[i] = self.parse_number(field, "atom position")?;
        }

        return Ok(Atom::new(name, position));
    }

    /// Create the lattice for the current frame, re-using the lattice of the
    /// previous frame if it is the same
    fn shared_lattice(&mut self, a: Vector3D, b: Vector3D, c: Vector3D) -> Result<Arc<Lattice>, Error> {
        let lattice = Lattice::from_vectors(a, b, c).map_err(|e| self.error(e.to_string()))?;

        if let Some(previous) = &self.lattice {
            if **previous == lattice {
                return Ok(Arc::clone(previous));
            }
        }

        let lattice = Arc::new(lattice);
        self.lattice = Some(Arc::clone(&lattice));
        return Ok(lattice);
    }
}

impl<R: BufRead> Iterator for TrajectoryReader<R> {
    type Item = Result<Configuration, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_frame() {
            Ok(Some(configuration)) => Some(Ok(configuration)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

/// Write configurations to a trajectory in text format.
///
/// Types are listed in order of first appearance, atoms are written in the
/// same order as in the configuration, and numbers are written with the
/// shortest representation that reads back to the same value.
pub struct TrajectoryWriter<W: Write> {
    writer: W,
    frames: usize,
}

impl<W: Write> TrajectoryWriter<W> {
    /// Create a new writer sending its output to `writer`
    pub fn new(writer: W) -> TrajectoryWriter<W> {
        TrajectoryWriter {
            writer: writer,
            frames: 0,
        }
    }

    /// Write a single `configuration` as the next frame
    pub fn write(&mut self, configuration: &Configuration) -> Result<(), Error> {
        let lattice = configuration.lattice();
        for vector in [lattice.a_vector(), lattice.b_vector(), lattice.c_vector()] {
            writeln!(self.writer, "{} {} {}", vector[0], vector[1], vector[2])?;
        }

        let types = configuration.types().collect::<Vec<_>>();
        writeln!(self.writer, "{}", types.join(" "))?;

        let counts = types.iter()
            .map(|name| configuration.count(name).to_string())
            .collect::<Vec<_>>();
        writeln!(self.writer, "{}", counts.join(" "))?;

        for atom in configuration.atoms() {
            let position = atom.position();
            writeln!(self.writer, "{} {} {} {}", atom.name(), position[0], position[1], position[2])?;
        }

        self.frames += 1;
        debug!("wrote frame {} with {} atoms", self.frames, configuration.size());

        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }

    /// Get the underlying writer back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Read all the frames of the trajectory file at `path` into a new
/// [`Simulation`] with the given `timestep`.
pub fn read_trajectory(path: impl AsRef<Path>, timestep: f64) -> Result<Simulation, Error> {
    let path = path.as_ref();
    let mut simulation = Simulation::new(timestep)?;

    let file = File::open(path).map_err(|e| Error::from(e).with_path(path))?;
    for configuration in TrajectoryReader::new(BufReader::new(file)) {
        simulation.push(configuration.map_err(|e| e.with_path(path))?);
    }

    info!("read {} frames from '{}'", simulation.len(), path.display());
    return Ok(simulation);
}

/// Write all the frames of `simulation` to a trajectory file at `path`,
/// replacing any existing file.
pub fn write_trajectory(path: impl AsRef<Path>, simulation: &Simulation) -> Result<(), Error> {
    let path = path.as_ref();

    let file = File::create(path).map_err(|e| Error::from(e).with_path(path))?;
    let mut writer = TrajectoryWriter::new(BufWriter::new(file));
    for configuration in simulation {
        writer.write(configuration).map_err(|e| e.with_path(path))?;
    }
    writer.flush().map_err(|e| e.with_path(path))?;

    info!("wrote {} frames to '{}'", simulation.len(), path.display());
    Ok(())
}
