//! Units in which positions, displacements and angles can be expressed.
use crate::Error;

/// Coordinate system used for positions and displacements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Reduced (fractional) coordinates, as multiples of the lattice vectors
    #[default]
    Reduced,
    /// Cartesian coordinates, in the same length unit as the lattice vectors
    Cartesian,
}

/// Unit used for the lattice angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Convert an angle in radians to this unit
    pub(crate) fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_degrees(),
            AngleUnit::Radians => angle,
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = Error;

    fn from_str(unit: &str) -> Result<Unit, Error> {
        match unit {
            "reduced" => Ok(Unit::Reduced),
            "cartesian" => Ok(Unit::Cartesian),
            _ => Err(Error::InvalidArgument(format!(
                "unit must be 'reduced' or 'cartesian', got '{}'", unit
            ))),
        }
    }
}

impl std::str::FromStr for AngleUnit {
    type Err = Error;

    fn from_str(unit: &str) -> Result<AngleUnit, Error> {
        match unit {
            "degrees" => Ok(AngleUnit::Degrees),
            "radians" => Ok(AngleUnit::Radians),
            _ => Err(Error::InvalidArgument(format!(
                "angle unit must be 'degrees' or 'radians', got '{}'", unit
            ))),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Reduced => write!(f, "reduced"),
            Unit::Cartesian => write!(f, "cartesian"),
        }
    }
}

impl std::fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngleUnit::Degrees => write!(f, "degrees"),
            AngleUnit::Radians => write!(f, "radians"),
        }
    }
}
