/// A macro to unwrap an option to its `Some` value, and bail out of the current
/// function with an [anyhow::Error] if not. Can only be used in functions that
/// return an [anyhow::Result].
#[macro_export]
macro_rules! unwrap_or_bail {
    ($opt:expr, $fmt:expr, $($arg:tt)*) => {
        match $opt {
            Some(v) => v,
            None => return Err(anyhow::anyhow!($fmt, $($arg)*)),
        }
    };
}

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took, and evaluates to the value of the
/// expression. Logs at debug level unless another level is given.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Calculate the number of tiles within `radius` steps of a tile, including
/// the tile itself. Radius 0 means 1 tile, 1 is 7 tiles, 2 is 19, etc.
pub fn area_len(radius: usize) -> usize {
    // We'll always have 3r^2+3r+1 tiles (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r tiles for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    3 * radius * radius + 3 * radius + 1
}

// Serialize a TilePointMap as a list instead of a map. This is useful because
// TilePoints generally shouldn't be used as serialized map keys, since JSON and
// other formats don't support complex keys.
pub mod serde_tile_point_map_to_vec {
    use crate::{HasHexPosition, TilePointMap};
    use serde::{
        ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer,
    };

    /// Serialize a tile point map as a list
    pub fn serialize<T, S>(
        map: &TilePointMap<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(map.len()))?;
        for value in map.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }

    /// Deserialize a list of values into a map. The deserialized type must
    /// implement [HasHexPosition] so that we can derive a
    /// [TilePoint](crate::TilePoint) for each element to use as its map key.
    pub fn deserialize<'de, T, D>(
        deserializer: D,
    ) -> Result<TilePointMap<T>, D::Error>
    where
        T: Deserialize<'de> + HasHexPosition,
        D: Deserializer<'de>,
    {
        let vec: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(vec
            .into_iter()
            .map(|element| (element.position(), element))
            .collect())
    }
}
