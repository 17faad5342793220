use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};

/// Decodes `null` as the type's default, like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes an integer the service sends either as a JSON number or as a
/// numeric string. An empty string or `null` decodes as zero.
pub(crate) fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    deserializer.deserialize_any(NumberOrString(PhantomData))
}

struct NumberOrString<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for NumberOrString<T>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        let v = v.trim();
        if v.is_empty() {
            return self.visit_u64(0);
        }
        v.parse::<T>().map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        self.visit_u64(0)
    }

    fn visit_none<E: de::Error>(self) -> Result<T, E> {
        self.visit_u64(0)
    }
}
