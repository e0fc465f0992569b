use derive_more::{Display, Error};

/// Invalid input to one of the hex operations. These are always surfaced as
/// [anyhow::Error]s, so callers that care about the specific failure can
/// `downcast` back to this type.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum HexError {
    /// An integer coordinate that doesn't fall on the plane `x + y + z = 0`,
    /// or whose z component is `i32::MIN` (see [TilePoint::new_xy])
    ///
    /// [TilePoint::new_xy]: crate::TilePoint::new_xy
    #[display(
        fmt = "Invalid tile point ({}, {}, {}); must be on the plane x+y+z=0 \
               with z > i32::MIN",
        x,
        y,
        z
    )]
    InvalidCoordinate { x: i64, y: i64, z: i64 },

    /// A fractional coordinate that isn't within
    /// [FractionalPoint::EPSILON](crate::FractionalPoint::EPSILON) of the
    /// plane `x + y + z = 0`
    #[display(
        fmt = "Invalid fractional point ({}, {}, {}); must be on the plane \
            x+y+z=0",
        x,
        y,
        z
    )]
    InvalidFractionalCoordinate { x: f64, y: f64, z: f64 },

    /// A radius or step count that was below zero
    #[display(fmt = "{} must be non-negative, but was {}", name, value)]
    NegativeRange { name: &'static str, value: i32 },

    /// Text that couldn't be parsed into a point
    #[display(fmt = "Cannot parse {:?} as a point; expected `x,y,z`", input)]
    InvalidPoint { input: String },
}

impl HexError {
    /// Shorthand to reject a negative radius/step count
    pub(crate) fn check_range(
        name: &'static str,
        value: i32,
    ) -> anyhow::Result<usize> {
        if value < 0 {
            Err(Self::NegativeRange { name, value }.into())
        } else {
            Ok(value as usize)
        }
    }
}
