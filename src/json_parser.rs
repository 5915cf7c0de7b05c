/*

    Provide utilities to read geometry descriptors from JSON text.

    The parser is somewhat robust, let <a> be integer or float type,
    in JSON text <a> can be given both in quotes (string) or as is.

    e.g. both
    "ScaleU": "0.5" and "ScaleU": 0.5
    work as scale_u: Float in source code

    Vector3 fields can be given either as "<a> <a> <a>" or as [a, a, a],
    transforms as 12 row-major numbers in the same two styles.

    No file I/O happens here, callers hand in the text.

    @date: 2 Oct, 2025
    @author: bartu
*/

use std::fmt::{self};

use serde::de::{self, DeserializeOwned, SeqAccess, Visitor};
use serde::Deserializer;
use serde_json::Value;

use crate::error::GeomError;
use crate::prelude::*;

/// Parse any descriptor (Bounds3, PlanarUVMap, TextureMap, ...) from JSON text.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, GeomError> {
    let span = tracing::span!(tracing::Level::INFO, "parse_json", kind = std::any::type_name::<T>());
    let _enter = span.enter();

    debug!("Parsing {} bytes of JSON", text.len());
    let parsed: T = serde_json::from_str(text)?;
    Ok(parsed)
}

pub(crate) fn deser_float<'de, D>(deserializer: D) -> Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("Invalid float")),
        Value::String(s) => s
            .trim()
            .parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

/// Parse exactly N whitespace separated floats.
pub(crate) fn parse_float_array<const N: usize>(s: &str) -> Result<[Float; N], String> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != N {
        return Err(format!("Expected {} components, found {} in '{}'", N, parts.len(), s));
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse::<Float>()
            .map_err(|e| format!("Failed parsing '{}': {}", part, e))?;
    }
    Ok(out)
}

/// Deserialize N floats given as "a b c ..." or [a, b, c, ...].
pub(crate) fn deser_float_array<'de, D, const N: usize>(deserializer: D) -> Result<[Float; N], D::Error>
where
    D: Deserializer<'de>,
{
    struct ArrayVisitor<const N: usize>;

    impl<'de, const N: usize> Visitor<'de> for ArrayVisitor<N> {
        type Value = [Float; N];

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "{} numbers as a string or an array", N)
        }

        fn visit_str<E>(self, value: &str) -> Result<[Float; N], E>
        where
            E: de::Error,
        {
            parse_float_array::<N>(value).map_err(de::Error::custom)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<[Float; N], A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut out = [0.0; N];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = seq
                    .next_element::<Float>()?
                    .ok_or_else(|| de::Error::invalid_length(i, &self))?;
            }
            if seq.next_element::<Float>()?.is_some() {
                return Err(de::Error::custom(format!("Expected only {} elements in array", N)));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(ArrayVisitor::<N>)
}

pub(crate) fn deser_vec3<'de, D>(deserializer: D) -> Result<Vector3, D::Error>
where
    D: Deserializer<'de>,
{
    let [x, y, z] = deser_float_array::<D, 3>(deserializer)?;
    Ok(Vector3::new(x, y, z))
}

// Optional corner, missing or null means "use the default" (zero vector).
pub(crate) fn deser_opt_vec3<'de, D>(deserializer: D) -> Result<Option<Vector3>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Wrapper(Vector3);

    impl<'de> Deserialize<'de> for Wrapper {
        fn deserialize<D2>(deserializer: D2) -> Result<Self, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deser_vec3(deserializer).map(Wrapper)
        }
    }

    let opt: Option<Wrapper> = Option::deserialize(deserializer)?;
    Ok(opt.map(|w| w.0))
}
