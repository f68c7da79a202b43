//! TOML output tuned for hand editing.

use serde::Serialize;
use toml::Value;

use crate::error::ConfigError;

/// Serializes `value` as pretty TOML with floats in their shortest `f32`
/// spelling, so `0.3` stays `0.3` rather than `0.30000001192092896`.
///
/// Only for types whose float fields are all `f32`: the shortened spelling
/// parses back to the identical `f32`.
pub(crate) fn to_toml_string<T: Serialize>(value: &T) -> Result<String, ConfigError> {
    let mut tree = Value::try_from(value)?;
    shorten_floats(&mut tree);
    Ok(toml::to_string_pretty(&tree)?)
}

fn shorten_floats(value: &mut Value) {
    match value {
        Value::Float(f) => {
            if let Ok(short) = (*f as f32).to_string().parse::<f64>() {
                *f = short;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(shorten_floats),
        Value::Table(table) => table.iter_mut().for_each(|(_, v)| shorten_floats(v)),
        _ => {}
    }
}
