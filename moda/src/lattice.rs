//! The `Lattice` type represents the periodic cell of a crystal, defined by
//! three basis vectors `a`, `b` and `c`.
use crate::{Error, Matrix3, Vector3D};
use crate::units::AngleUnit;

/// Tolerance on the volume spanned by the normalized lattice vectors. A lattice
/// with `|â·(b̂×ĉ)| <= VOLUME_TOLERANCE` has (nearly) linearly dependent
/// vectors.
const VOLUME_TOLERANCE: f64 = 1e-9;

/// The shape of a lattice. Orthorhombic lattices have all their angles equal
/// to 90°, which is used to get exact angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeShape {
    /// Orthorhombic lattice, with cuboid shape. The vectors are aligned with
    /// the x, y and z axes respectively.
    Orthorhombic,
    /// Triclinic lattice, with arbitrary parallelepiped shape
    Triclinic,
}

/// A `Lattice` defines the periodic cell in which atoms live.
///
/// The lattice is stored as a matrix with the `a`, `b` and `c` vectors as
/// rows. Reduced coordinates `(ra, rb, rc)` correspond to the cartesian
/// position `ra * a + rb * b + rc * c`.
///
/// Lattices are always valid: all constructors and mutators reject linearly
/// dependent or non-finite vectors with [`Error::DegenerateLattice`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Matrix3", into = "Matrix3")]
pub struct Lattice {
    /// Lattice matrix, with one lattice vector per row
    matrix: Matrix3,
    /// Transpose of the lattice matrix, cached from matrix
    transpose: Matrix3,
    /// Inverse of the transpose of the lattice matrix, cached from matrix
    inverse: Matrix3,
    /// Lattice shape
    shape: LatticeShape,
}

impl TryFrom<Matrix3> for Lattice {
    type Error = Error;

    fn try_from(matrix: Matrix3) -> Result<Lattice, Error> {
        Lattice::new(matrix)
    }
}

impl From<Lattice> for Matrix3 {
    fn from(lattice: Lattice) -> Matrix3 {
        lattice.matrix
    }
}

impl Lattice {
    /// Create a lattice from a matrix containing the `a`, `b` and `c` vectors
    /// as rows.
    pub fn new(matrix: Matrix3) -> Result<Lattice, Error> {
        check_basis(&matrix)?;

        let is_diagonal = matrix[0][1] == 0.0 && matrix[0][2] == 0.0 &&
                          matrix[1][0] == 0.0 && matrix[1][2] == 0.0 &&
                          matrix[2][0] == 0.0 && matrix[2][1] == 0.0;

        let shape = if is_diagonal {
            LatticeShape::Orthorhombic
        } else {
            LatticeShape::Triclinic
        };

        let transpose = matrix.transposed();
        // very small lattices can have a volume too small to be inverted
        if transpose.determinant() == 0.0 {
            return Err(Error::DegenerateLattice(
                "lattice volume is too small to be represented".into()
            ));
        }

        let inverse = transpose.inverse();
        if !inverse.is_finite() {
            return Err(Error::DegenerateLattice(
                "lattice volume is too small to be represented".into()
            ));
        }

        return Ok(Lattice {
            matrix: matrix,
            transpose: transpose,
            inverse: inverse,
            shape: shape,
        });
    }

    /// Create a lattice from the three vectors `a`, `b` and `c`
    pub fn from_vectors(a: Vector3D, b: Vector3D, c: Vector3D) -> Result<Lattice, Error> {
        Lattice::new(Matrix3::new([a.into(), b.into(), c.into()]))
    }

    /// Create an orthorhombic lattice, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Lattice, Error> {
        check_lengths(a, b, c)?;
        Lattice::new(Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c]
        ]))
    }

    /// Create a cubic lattice, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> Result<Lattice, Error> {
        Lattice::orthorhombic(length, length, length)
    }

    /// Create a triclinic lattice, with side lengths `a, b, c` and angles
    /// `alpha, beta, gamma` in degrees. The `a` vector is aligned with the x
    /// axis, and the `b` vector is in the xy plane.
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<Lattice, Error> {
        check_lengths(a, b, c)?;
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        // impossible combinations of angles give NaN here, which is rejected
        // by `Lattice::new`
        let c_z = f64::sqrt(c * c - c_y * c_y - c_x * c_x);

        return Lattice::new(Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z],
        ]));
    }

    /// Get the lattice shape
    pub fn shape(&self) -> LatticeShape {
        self.shape
    }

    /// Get the matrix representation of the lattice, with one vector per row
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the first vector of the lattice
    pub fn a_vector(&self) -> Vector3D {
        self.matrix[0].into()
    }

    /// Get the second vector of the lattice
    pub fn b_vector(&self) -> Vector3D {
        self.matrix[1].into()
    }

    /// Get the third vector of the lattice
    pub fn c_vector(&self) -> Vector3D {
        self.matrix[2].into()
    }

    /// Get the length of the first lattice vector
    pub fn a(&self) -> f64 {
        self.a_vector().norm()
    }

    /// Get the length of the second lattice vector
    pub fn b(&self) -> f64 {
        self.b_vector().norm()
    }

    /// Get the length of the third lattice vector
    pub fn c(&self) -> f64 {
        self.c_vector().norm()
    }

    /// Get the angle between the `b` and `c` vectors
    pub fn alpha(&self, unit: AngleUnit) -> f64 {
        self.angle(self.b_vector(), self.c_vector(), unit)
    }

    /// Get the angle between the `a` and `c` vectors
    pub fn beta(&self, unit: AngleUnit) -> f64 {
        self.angle(self.a_vector(), self.c_vector(), unit)
    }

    /// Get the angle between the `a` and `b` vectors
    pub fn gamma(&self, unit: AngleUnit) -> f64 {
        self.angle(self.a_vector(), self.b_vector(), unit)
    }

    fn angle(&self, u: Vector3D, v: Vector3D, unit: AngleUnit) -> f64 {
        match self.shape {
            LatticeShape::Orthorhombic => unit.from_radians(std::f64::consts::FRAC_PI_2),
            LatticeShape::Triclinic => unit.from_radians(angle(u, v)),
        }
    }

    /// Get the volume of the lattice, `|a·(b×c)|`. This is always strictly
    /// positive.
    pub fn volume(&self) -> f64 {
        let a = self.a_vector();
        let b = self.b_vector();
        let c = self.c_vector();
        return f64::abs(a * (b ^ c));
    }

    /// Get the cartesian representation of the `reduced` vector in this
    /// lattice, *i.e.* `reduced[0] * a + reduced[1] * b + reduced[2] * c`.
    pub fn cartesian(&self, reduced: Vector3D) -> Vector3D {
        // the reduced vector multiplies the lattice matrix on the left, which
        // is the same as multiplying the transpose on the right
        return self.transpose * reduced;
    }

    /// Get the reduced representation of the `cartesian` vector in this
    /// lattice
    pub fn fractional(&self, cartesian: Vector3D) -> Vector3D {
        return self.inverse * cartesian;
    }

    /// Get a new lattice with the vectors scaled by `na`, `nb` and `nc`
    /// respectively.
    pub fn scaled(&self, na: f64, nb: f64, nc: f64) -> Result<Lattice, Error> {
        Lattice::from_vectors(
            na * self.a_vector(),
            nb * self.b_vector(),
            nc * self.c_vector(),
        )
    }
}

/// Mutation of the lattice vectors. The new set of vectors is validated, and
/// the lattice is left unchanged if they are degenerate.
impl Lattice {
    /// Replace the first lattice vector
    pub fn set_a(&mut self, a: Vector3D) -> Result<(), Error> {
        self.set_vector(0, a)
    }

    /// Replace the second lattice vector
    pub fn set_b(&mut self, b: Vector3D) -> Result<(), Error> {
        self.set_vector(1, b)
    }

    /// Replace the third lattice vector
    pub fn set_c(&mut self, c: Vector3D) -> Result<(), Error> {
        self.set_vector(2, c)
    }

    fn set_vector(&mut self, index: usize, vector: Vector3D) -> Result<(), Error> {
        let mut matrix = self.matrix;
        matrix[index] = vector.into();
        *self = Lattice::new(matrix)?;
        Ok(())
    }
}

impl std::fmt::Display for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = &self.matrix;
        write!(f,
            "<Lattice: a=({}, {}, {}), b=({}, {}, {}), c=({}, {}, {})>",
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
        )
    }
}

fn check_lengths(a: f64, b: f64, c: f64) -> Result<(), Error> {
    if a > 0.0 && b > 0.0 && c > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "lattice lengths must be positive, got {}, {} and {}", a, b, c
        )))
    }
}

fn check_basis(matrix: &Matrix3) -> Result<(), Error> {
    if !matrix.is_finite() {
        return Err(Error::DegenerateLattice(
            "lattice vectors must only contain finite values".into()
        ));
    }

    let vectors = [
        Vector3D::from(matrix[0]),
        Vector3D::from(matrix[1]),
        Vector3D::from(matrix[2]),
    ];

    for (vector, name) in vectors.iter().zip(["a", "b", "c"]) {
        if vector.norm2() == 0.0 {
            return Err(Error::DegenerateLattice(format!(
                "the '{}' lattice vector has zero length", name
            )));
        }
    }

    let [a, b, c] = vectors.map(|vector| vector.normalized());
    let volume = f64::abs(a * (b ^ c));
    if volume <= VOLUME_TOLERANCE {
        return Err(Error::DegenerateLattice(format!(
            "lattice vectors are linearly dependent (normalized volume is {:e})", volume
        )));
    }

    return Ok(());
}

/// Get the angle in radians between the vectors `u` and `v`.
fn angle(u: Vector3D, v: Vector3D) -> f64 {
    let cos = (u * v) / (u.norm() * v.norm());
    // rounding errors can bring the cosine slightly outside of [-1, 1]
    f64::acos(cos.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_ulps_eq, assert_relative_eq};

    #[test]
    fn negative_lengths() {
        let error = Lattice::cubic(-4.0).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(_)));

        let error = Lattice::orthorhombic(3.0, 0.0, -5.0).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(_)));

        let error = Lattice::triclinic(3.0, 0.0, -5.0, 90.0, 90.0, 90.0).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(_)));

        let error = Lattice::cubic(f64::NAN).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(_)));
    }

    #[test]
    fn degenerate() {
        // zero vector
        let error = Lattice::from_vectors(
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::zero(),
            Vector3D::new(0.0, 0.0, 1.0),
        ).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));

        // colinear vectors
        let error = Lattice::from_vectors(
            Vector3D::new(1.0, 1.0, 0.0),
            Vector3D::new(2.0, 2.0, 0.0),
            Vector3D::new(0.0, 0.0, 1.0),
        ).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));

        // coplanar vectors
        let error = Lattice::from_vectors(
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(1.0, 1.0, 0.0),
        ).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));

        // non-finite values
        let error = Lattice::from_vectors(
            Vector3D::new(f64::INFINITY, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, 0.0, 1.0),
        ).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));

        // impossible angles
        let error = Lattice::triclinic(1.0, 1.0, 1.0, 10.0, 10.0, 90.0).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));
    }

    #[test]
    fn tiny_lattice() {
        // the determinant is subnormal, and its inverse overflows
        let error = Lattice::cubic(1e-105).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));

        // the determinant underflows to zero
        let error = Lattice::cubic(1e-110).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));

        let lattice = Lattice::cubic(1e-3).unwrap();
        let fractional = lattice.fractional(Vector3D::new(5e-4, 2.5e-4, 1e-3));
        assert!(fractional.is_finite());
        assert_ulps_eq!(fractional, Vector3D::new(0.5, 0.25, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn cubic() {
        let lattice = Lattice::cubic(10.0).unwrap();
        assert_eq!(lattice.shape(), LatticeShape::Orthorhombic);

        assert_eq!(lattice.a_vector(), Vector3D::new(10.0, 0.0, 0.0));
        assert_eq!(lattice.b_vector(), Vector3D::new(0.0, 10.0, 0.0));
        assert_eq!(lattice.c_vector(), Vector3D::new(0.0, 0.0, 10.0));

        assert_eq!(lattice.a(), 10.0);
        assert_eq!(lattice.b(), 10.0);
        assert_eq!(lattice.c(), 10.0);

        assert_eq!(lattice.alpha(AngleUnit::Degrees), 90.0);
        assert_eq!(lattice.beta(AngleUnit::Degrees), 90.0);
        assert_eq!(lattice.gamma(AngleUnit::Degrees), 90.0);
        assert_eq!(lattice.gamma(AngleUnit::Radians), std::f64::consts::FRAC_PI_2);

        assert_eq!(lattice.volume(), 1000.0);
    }

    #[test]
    fn orthorhombic() {
        let lattice = Lattice::orthorhombic(3.0, 4.0, 5.0).unwrap();
        assert_eq!(lattice.shape(), LatticeShape::Orthorhombic);

        assert_eq!(lattice.a(), 3.0);
        assert_eq!(lattice.b(), 4.0);
        assert_eq!(lattice.c(), 5.0);

        assert_eq!(lattice.alpha(AngleUnit::Degrees), 90.0);
        assert_eq!(lattice.beta(AngleUnit::Degrees), 90.0);
        assert_eq!(lattice.gamma(AngleUnit::Degrees), 90.0);

        assert_eq!(lattice.volume(), 3.0 * 4.0 * 5.0);
    }

    #[test]
    fn triclinic() {
        let lattice = Lattice::triclinic(3.0, 4.0, 5.0, 80.0, 90.0, 110.0).unwrap();
        assert_eq!(lattice.shape(), LatticeShape::Triclinic);

        assert_eq!(lattice.a_vector(), Vector3D::new(3.0, 0.0, 0.0));
        assert_eq!(lattice.b_vector()[2], 0.0);

        assert_relative_eq!(lattice.a(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.b(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.c(), 5.0, epsilon = 1e-12);

        assert_relative_eq!(lattice.alpha(AngleUnit::Degrees), 80.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.beta(AngleUnit::Degrees), 90.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.gamma(AngleUnit::Degrees), 110.0, epsilon = 1e-12);
        assert_relative_eq!(lattice.gamma(AngleUnit::Radians), 110.0_f64.to_radians(), epsilon = 1e-12);

        assert_relative_eq!(lattice.volume(), 55.410529, epsilon = 1e-6);
    }

    #[test]
    fn left_handed() {
        // the volume is positive even if the vectors form a left-handed basis
        let lattice = Lattice::from_vectors(
            Vector3D::new(0.0, 2.0, 0.0),
            Vector3D::new(3.0, 0.0, 0.0),
            Vector3D::new(0.0, 0.0, 4.0),
        ).unwrap();
        assert_eq!(lattice.shape(), LatticeShape::Triclinic);
        assert_eq!(lattice.volume(), 24.0);
        assert_relative_eq!(lattice.gamma(AngleUnit::Degrees), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn fractional_cartesian() {
        let lattice = Lattice::cubic(5.0).unwrap();

        assert_ulps_eq!(
            lattice.fractional(Vector3D::new(0.0, 10.0, 4.0)),
            Vector3D::new(0.0, 2.0, 0.8),
            epsilon = 1e-15
        );
        assert_eq!(
            lattice.cartesian(Vector3D::new(0.0, 2.0, 0.8)),
            Vector3D::new(0.0, 10.0, 4.0)
        );

        let lattice = Lattice::triclinic(5.0, 6.0, 3.6, 90.0, 53.0, 77.0).unwrap();
        let tests = vec![
            Vector3D::new(0.0, 10.0, 4.0),
            Vector3D::new(-5.0, 12.0, 4.9),
        ];

        for test in tests {
            let transformed = lattice.cartesian(lattice.fractional(test));
            assert_ulps_eq!(test, transformed, epsilon = 1e-14);
        }

        // the cartesian projection is a linear combination of the vectors
        let reduced = Vector3D::new(0.25, -1.5, 2.0);
        let expected = 0.25 * lattice.a_vector() - 1.5 * lattice.b_vector() + 2.0 * lattice.c_vector();
        assert_ulps_eq!(lattice.cartesian(reduced), expected, epsilon = 1e-14);
    }

    #[test]
    fn scaled() {
        let lattice = Lattice::triclinic(5.0, 6.0, 3.6, 90.0, 53.0, 77.0).unwrap();
        let scaled = lattice.scaled(2.0, 3.0, 1.0).unwrap();

        assert_eq!(scaled.a_vector(), 2.0 * lattice.a_vector());
        assert_eq!(scaled.b_vector(), 3.0 * lattice.b_vector());
        assert_eq!(scaled.c_vector(), lattice.c_vector());
        assert_relative_eq!(scaled.volume(), 6.0 * lattice.volume(), max_relative = 1e-12);

        let error = lattice.scaled(0.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));
    }

    #[test]
    fn mutation() {
        let mut lattice = Lattice::cubic(10.0).unwrap();
        lattice.set_b(Vector3D::new(5.0, 5.0, 0.0)).unwrap();
        assert_eq!(lattice.shape(), LatticeShape::Triclinic);
        assert_eq!(lattice.volume(), 500.0);
        assert_relative_eq!(lattice.gamma(AngleUnit::Degrees), 45.0, epsilon = 1e-12);

        // the cached matrices are updated as well
        assert_eq!(lattice.cartesian(Vector3D::new(0.0, 1.0, 0.0)), Vector3D::new(5.0, 5.0, 0.0));

        let error = lattice.set_c(Vector3D::new(1.0, 1.0, 0.0)).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));
        // the lattice is left untouched on error
        assert_eq!(lattice.c_vector(), Vector3D::new(0.0, 0.0, 10.0));

        lattice.set_a(Vector3D::new(8.0, 0.0, 0.0)).unwrap();
        lattice.set_b(Vector3D::new(0.0, 8.0, 0.0)).unwrap();
        lattice.set_c(Vector3D::new(0.0, 0.0, 8.0)).unwrap();
        assert_eq!(lattice, Lattice::cubic(8.0).unwrap());
    }

    #[test]
    fn display() {
        let lattice = Lattice::orthorhombic(10.0, 11.5, 12.0).unwrap();
        assert_eq!(lattice.to_string(), "<Lattice: a=(10, 0, 0), b=(0, 11.5, 0), c=(0, 0, 12)>");
    }

    #[test]
    fn json() {
        let lattice = Lattice::orthorhombic(10.0, 11.5, 12.0).unwrap();
        let json = serde_json::to_string(&lattice).unwrap();
        assert_eq!(json, "[[10.0,0.0,0.0],[0.0,11.5,0.0],[0.0,0.0,12.0]]");
        assert_eq!(serde_json::from_str::<Lattice>(&json).unwrap(), lattice);

        let degenerate = "[[1.0,0.0,0.0],[2.0,0.0,0.0],[0.0,0.0,1.0]]";
        assert!(serde_json::from_str::<Lattice>(degenerate).is_err());
    }
}
