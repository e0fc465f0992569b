//! This sub-module contains basic types for units that form the hex coordinate
//! system. See the parent module documentation for more info on the coordinate
//! system.

use crate::HexError;
use derive_more::{Add, Display, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// A trait representing any three-component value in the hex coordinate
/// system. Any struct with an x/y/z that is part of the hex coordinate system
/// should implement this trait.
pub trait HexCoordinateValue: Sized {
    /// The primitive type of each component. Must be convertible to `f64` so
    /// integer points can be interpolated.
    type Component: Into<f64>;

    /// The `x` component of the coordinate
    fn x(&self) -> Self::Component;

    /// The `y` component of the coordinate
    fn y(&self) -> Self::Component;

    /// The `z` component of the coordinate
    fn z(&self) -> Self::Component;
}

/// A point in the hex coordinate system. Unlike [HexVector], points are always
/// validated on construction: every point has to sit on the plane
/// `x + y + z = 0`.
pub trait HexCoordinate: HexCoordinateValue {
    /// Construct a new point from the given components. If the components
    /// don't fall on the plane `x + y + z = 0`, this returns a [HexError].
    fn new(
        x: Self::Component,
        y: Self::Component,
        z: Self::Component,
    ) -> anyhow::Result<Self>;
}

/// A point in the hex coordinate system that refers to a whole tile (via its
/// center point). See module-level documentation for a description of the hex
/// coordinate system.
///
/// ## Implementation
///
/// Since `x + y + z = 0` for every tile, this struct only stores `x` and `y`
/// and derives `z` as needed. The only constructor that accepts all three
/// components is [TilePoint::new], which validates them. Every operation that
/// produces a new point routes its output back through that constructor.
///
/// ## Serialization
///
/// Points are serialized as a `[x, y, z]` triple. Deserialization validates
/// the triple, so a serialized point can never smuggle in an invalid
/// coordinate.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.x()", "self.y()", "self.z()")]
#[serde(try_from = "(i32, i32, i32)", into = "(i32, i32, i32)")]
pub struct TilePoint {
    x: i32,
    y: i32,
}

impl TilePoint {
    pub const ORIGIN: Self = Self::new_xy(0, 0);

    /// Construct a new tile point with the given x and y. Since x+y+z=0 for all
    /// points, we can derive z from x & y.
    ///
    /// z is stored as `-(x + y)`, so `x + y` must fit in an i32 and can't be
    /// `i32::MIN`. Anything outside that range is a bug in the caller, and
    /// panics in debug builds. Use [HexCoordinate::new] to check untrusted
    /// components instead.
    pub const fn new_xy(x: i32, y: i32) -> Self {
        debug_assert!(
            matches!(x.checked_add(y), Some(sum) if sum != i32::MIN),
            "tile point out of range: z = -(x + y) doesn't fit in an i32"
        );
        Self { x, y }
    }

    /// Construct a new tile point with the given x and z. Since x+y+z=0 for all
    /// points, we can derive y from x & z. Same range rules as
    /// [Self::new_xy], with the roles of y and z swapped.
    pub const fn new_xz(x: i32, z: i32) -> Self {
        Self::new_xy(x, -x - z)
    }

    /// Construct a new tile point with the given y and z. Since x+y+z=0 for all
    /// points, we can derive x from y & z. Same range rules as
    /// [Self::new_xy], with the roles of x and z swapped.
    pub const fn new_yz(y: i32, z: i32) -> Self {
        Self::new_xy(-y - z, y)
    }

    /// Add two points component-wise. The output is re-validated, so this
    /// fails only if the result somehow leaves the `x + y + z = 0` plane.
    pub fn checked_add(self, other: TilePoint) -> anyhow::Result<TilePoint> {
        (UncheckedHexPoint::from(self) + UncheckedHexPoint::from(other))
            .try_into()
    }

    /// Subtract `other` from this point component-wise. Re-validated the same
    /// way as [Self::checked_add].
    pub fn checked_sub(self, other: TilePoint) -> anyhow::Result<TilePoint> {
        (UncheckedHexPoint::from(self) - UncheckedHexPoint::from(other))
            .try_into()
    }

    /// Multiply each component by `factor`.
    ///
    /// This is intended for direction vectors (see
    /// [TilePoint::direction]/[TilePoint::diagonal_direction]), e.g. to get
    /// the offset that is `n` steps in a particular direction. Scaling any
    /// other point is valid math but has no geometric meaning.
    pub fn scale(self, factor: i32) -> anyhow::Result<TilePoint> {
        (UncheckedHexPoint::from(self) * factor).try_into()
    }

    /// Move this point by a vector. The output is re-validated, because a
    /// vector can hold any combination of components.
    pub fn translate(
        self,
        vector: HexVector<i32>,
    ) -> anyhow::Result<TilePoint> {
        UncheckedHexPoint {
            x: self.x() + vector.x,
            y: self.y() + vector.y,
            z: self.z() + vector.z,
        }
        .try_into()
    }

    /// Get the vector that would translate this point onto `other`
    pub fn vector_to(self, other: TilePoint) -> HexVector<i32> {
        HexVector::new(
            other.x() - self.x(),
            other.y() - self.y(),
            other.z() - self.z(),
        )
    }

    /// Distance from the origin to this point, in tiles. This is the hex
    /// equivalent of a Euclidean norm.
    pub fn length(self) -> usize {
        Self::ORIGIN.vector_to(self).length()
    }

    /// Calculate the path distance between two tiles, meaning the number of
    /// hops it takes to get from one to the other. 0 if the points are equal,
    /// 1 if the tiles are adjacent, 2 if there is 1 tile between them, etc.
    pub fn distance_to(self, other: TilePoint) -> usize {
        self.vector_to(other).length()
    }

    /// Rotate this point 60° counter-clockwise around the origin
    pub fn rotate_left(self) -> anyhow::Result<TilePoint> {
        Self::new(-self.y(), -self.z(), -self.x())
    }

    /// Rotate this point 60° clockwise around the origin
    pub fn rotate_right(self) -> anyhow::Result<TilePoint> {
        Self::new(-self.z(), -self.x(), -self.y())
    }

    /// Linearly interpolate between this point and `other`, then round back
    /// onto the nearest tile. `t = 0.0` is this point, `t = 1.0` is `other`.
    pub fn lerp(self, other: TilePoint, t: f64) -> anyhow::Result<TilePoint> {
        FractionalPoint::from(self)
            .lerp(FractionalPoint::from(other), t)?
            .round()
    }
}

impl HexCoordinateValue for TilePoint {
    type Component = i32;

    fn x(&self) -> Self::Component {
        self.x
    }

    fn y(&self) -> Self::Component {
        self.y
    }

    fn z(&self) -> Self::Component {
        -(self.x + self.y)
    }
}

impl HexCoordinate for TilePoint {
    fn new(x: i32, y: i32, z: i32) -> anyhow::Result<Self> {
        // Widen before summing so large components can't wrap around to 0.
        // z is derived by negating x + y, and i32::MIN has no positive
        // counterpart, so it can't be stored.
        let (x, y, z) = (i64::from(x), i64::from(y), i64::from(z));
        if x + y + z != 0 || z == i64::from(i32::MIN) {
            Err(HexError::InvalidCoordinate { x, y, z }.into())
        } else {
            Ok(Self::new_xy(x as i32, y as i32))
        }
    }
}

impl TryFrom<UncheckedHexPoint<i32>> for TilePoint {
    type Error = anyhow::Error;

    fn try_from(value: UncheckedHexPoint<i32>) -> Result<Self, Self::Error> {
        Self::new(value.x, value.y, value.z)
    }
}

impl TryFrom<(i32, i32, i32)> for TilePoint {
    type Error = anyhow::Error;

    fn try_from((x, y, z): (i32, i32, i32)) -> Result<Self, Self::Error> {
        Self::new(x, y, z)
    }
}

impl From<TilePoint> for (i32, i32, i32) {
    fn from(point: TilePoint) -> Self {
        (point.x(), point.y(), point.z())
    }
}

/// Parse a point from `x,y,z` text. Whitespace around each component is
/// ignored.
impl FromStr for TilePoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HexError::InvalidPoint {
            input: s.to_owned(),
        };
        let components = s
            .split(',')
            .map(|component| component.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match components.as_slice() {
            &[x, y, z] => Self::new(x, y, z),
            _ => Err(invalid().into()),
        }
    }
}

/// A point with fractional components. These are only used as intermediate
/// values while interpolating between tiles; see [TilePoint::lerp] and
/// [crate::line]. Like [TilePoint], all three components must fall on the
/// plane `x + y + z = 0`, but float math makes that approximate, so the sum
/// only needs to be within [Self::EPSILON] of zero.
#[derive(Copy, Clone, Debug, PartialEq, Display)]
#[display(fmt = "({}, {}, {})", x, y, z)]
pub struct FractionalPoint {
    x: f64,
    y: f64,
    z: f64,
}

impl FractionalPoint {
    /// Max distance from the plane `x + y + z = 0` that is still considered to
    /// be on the plane
    pub const EPSILON: f64 = 1e-6;

    /// Linearly interpolate each component between this point and `other`.
    pub fn lerp(
        self,
        other: FractionalPoint,
        t: f64,
    ) -> anyhow::Result<FractionalPoint> {
        fn lerp_component(a: f64, b: f64, t: f64) -> f64 {
            a + (b - a) * t
        }

        Self::new(
            lerp_component(self.x, other.x, t),
            lerp_component(self.y, other.y, t),
            lerp_component(self.z, other.z, t),
        )
    }

    /// Move this point by a fractional vector
    pub fn translate(
        self,
        vector: HexVector<f64>,
    ) -> anyhow::Result<FractionalPoint> {
        UncheckedHexPoint {
            x: self.x + vector.x,
            y: self.y + vector.y,
            z: self.z + vector.z,
        }
        .try_into()
    }

    /// Round this point to the tile that contains it.
    ///
    /// Rounding each component on its own can knock the point off the plane
    /// `x + y + z = 0`, e.g. `(0.5, 0.5, -1.0)` would round to `(1, 1, -1)`.
    /// To fix that, the component that moved the most during rounding gets
    /// recalculated from the other two.
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    pub fn round(self) -> anyhow::Result<TilePoint> {
        let mut x = self.x.round();
        let mut y = self.y.round();
        let mut z = self.z.round();

        let x_diff = (x - self.x).abs();
        let y_diff = (y - self.y).abs();
        let z_diff = (z - self.z).abs();

        if x_diff > y_diff && x_diff > z_diff {
            x = -y - z;
        } else if y_diff > z_diff {
            y = -x - z;
        } else {
            z = -x - y;
        }

        TilePoint::new(x as i32, y as i32, z as i32)
    }
}

impl HexCoordinateValue for FractionalPoint {
    type Component = f64;

    fn x(&self) -> Self::Component {
        self.x
    }

    fn y(&self) -> Self::Component {
        self.y
    }

    fn z(&self) -> Self::Component {
        self.z
    }
}

impl HexCoordinate for FractionalPoint {
    fn new(x: f64, y: f64, z: f64) -> anyhow::Result<Self> {
        // NaN fails this check too, which is what we want
        if (x + y + z).abs() <= Self::EPSILON {
            Ok(Self { x, y, z })
        } else {
            Err(HexError::InvalidFractionalCoordinate { x, y, z }.into())
        }
    }
}

impl TryFrom<UncheckedHexPoint<f64>> for FractionalPoint {
    type Error = anyhow::Error;

    fn try_from(value: UncheckedHexPoint<f64>) -> Result<Self, Self::Error> {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<TilePoint> for FractionalPoint {
    fn from(other: TilePoint) -> Self {
        // Every tile center is on the plane, so no validation needed
        Self {
            x: other.x().into(),
            y: other.y().into(),
            z: other.z().into(),
        }
    }
}

/// An unvalidated point, used for intermediate values during arithmetic. An
/// instance of this struct could represent a point that isn't on the plane
/// `x + y + z = 0`, so it should never be exposed outside this module. Convert
/// it back to a validated type via `TryInto`.
#[derive(Copy, Clone, Debug, PartialEq, Display, Add, Sub, Mul)]
#[display(fmt = "({}, {}, {})", x, y, z)]
struct UncheckedHexPoint<T: Display> {
    x: T,
    y: T,
    z: T,
}

impl From<TilePoint> for UncheckedHexPoint<i32> {
    fn from(point: TilePoint) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
            z: point.z(),
        }
    }
}

/// A vector in a hex world. This is an `(x, y, z)` kind of vector, not a list
/// vector. A vector represents some positional translation within the hex
/// coordinate system.
///
/// ## Validation
///
/// Unlike points, hex vectors **cannot be validated.** This is because a vector
/// could apply a valid translation (where the output remains valid) to one
/// point but an invalid translation to another point. As such, any hex vector
/// can be created and any time a point is transformed, it should be
/// re-validated.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Add, Sub, Mul, Neg,
)]
#[display(fmt = "({}, {}, {})", x, y, z)]
pub struct HexVector<T: Copy + Display> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy + Display> HexVector<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl HexVector<i32> {
    /// Number of single-tile steps this vector covers
    pub fn length(self) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        // Two adjacent tile centers are always separated by two cube edges,
        // hence the division
        let edges = self.x.unsigned_abs()
            + self.y.unsigned_abs()
            + self.z.unsigned_abs();
        edges as usize / 2
    }
}

impl<T: Copy + Display + Into<f64>> HexCoordinateValue for HexVector<T> {
    type Component = T;

    fn x(&self) -> Self::Component {
        self.x
    }

    fn y(&self) -> Self::Component {
        self.y
    }

    fn z(&self) -> Self::Component {
        self.z
    }
}

/// The same tile position as [TilePoint], in axial coordinates: `q` is the
/// cube `x` and `r` is the cube `z`. The cube `y` is implied. Conversion in
/// both directions is lossless.
/// https://www.redblobgames.com/grids/hexagons/#coordinates-axial
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "[{}, {}]", q, r)]
pub struct AxialPoint {
    pub q: i32,
    pub r: i32,
}

impl From<TilePoint> for AxialPoint {
    fn from(point: TilePoint) -> Self {
        Self {
            q: point.x(),
            r: point.z(),
        }
    }
}

/// Follows the range rules of [TilePoint::new_xz]
impl From<AxialPoint> for TilePoint {
    fn from(point: AxialPoint) -> Self {
        Self::new_xz(point.q, point.r)
    }
}

/// A trait that denotes any data type that has a singular assigned position in
/// the hex world.
pub trait HasHexPosition: Sized {
    fn position(&self) -> TilePoint;
}
