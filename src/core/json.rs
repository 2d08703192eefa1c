//! Minimal read interface over the parsed JSON document.
//!
//! Lookups of absent fields yield `Value::Null` (through `serde_json`'s
//! indexing), which every accessor here treats as "not present".

use serde_json::Value;

use crate::util::{Error, Result};

/// Read helpers for document values.
pub trait JsonExt {
    /// Returns true if the value exists and is not null.
    fn is_present(&self) -> bool;

    /// Iterate array elements; non-arrays iterate nothing.
    fn items(&self) -> std::slice::Iter<'_, Value>;

    /// Number of array elements, 0 for non-arrays.
    fn item_count(&self) -> usize;

    /// Coerce to `f32`, falling back to `default` when absent or not a number.
    fn f32_or(&self, default: f32) -> f32;

    /// Coerce to `&str`, falling back to `default`.
    fn str_or<'a>(&'a self, default: &'a str) -> &'a str;

    /// Coerce to `bool`, falling back to `default`.
    fn bool_or(&self, default: bool) -> bool;

    /// Interpret as a non-negative integer index.
    fn as_index(&self) -> Option<usize>;

    /// Clone the value when present, `Value::Null` otherwise.
    fn opaque(&self) -> Value;
}

impl JsonExt for Value {
    #[inline]
    fn is_present(&self) -> bool {
        !self.is_null()
    }

    fn items(&self) -> std::slice::Iter<'_, Value> {
        match self {
            Value::Array(items) => items.iter(),
            _ => <&[Value]>::default().iter(),
        }
    }

    fn item_count(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }

    fn f32_or(&self, default: f32) -> f32 {
        self.as_f64().map_or(default, |v| v as f32)
    }

    fn str_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.as_str().unwrap_or(default)
    }

    fn bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    fn as_index(&self) -> Option<usize> {
        if let Some(v) = self.as_u64() {
            return usize::try_from(v).ok();
        }
        // Exporters occasionally write indices as `2.0`.
        match self.as_f64() {
            Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 => Some(v as usize),
            _ => None,
        }
    }

    fn opaque(&self) -> Value {
        self.clone()
    }
}

/// Read a required index field.
pub fn required_index(json: &Value, context: &'static str, field: &'static str) -> Result<usize> {
    let value = &json[field];
    if !value.is_present() {
        return Err(Error::missing(context, field));
    }
    value
        .as_index()
        .ok_or_else(|| Error::mismatch(format!("index for {context}.{field}"), value.to_string()))
}

/// Read an optional index field; present but non-index values are errors.
pub fn optional_index(json: &Value, context: &'static str, field: &'static str) -> Result<Option<usize>> {
    let value = &json[field];
    if !value.is_present() {
        return Ok(None);
    }
    value
        .as_index()
        .map(Some)
        .ok_or_else(|| Error::mismatch(format!("index for {context}.{field}"), value.to_string()))
}

/// Read a required number field as `f32`.
pub fn required_f32(json: &Value, context: &'static str, field: &'static str) -> Result<f32> {
    let value = &json[field];
    if !value.is_present() {
        return Err(Error::missing(context, field));
    }
    value
        .as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| Error::mismatch(format!("number for {context}.{field}"), value.to_string()))
}

/// Fail unless every listed field is present.
pub fn require_fields(json: &Value, context: &'static str, fields: &[&'static str]) -> Result<()> {
    match fields.iter().find(|f| !json[**f].is_present()) {
        Some(field) => Err(Error::missing(context, *field)),
        None => Ok(()),
    }
}

/// Read an array of indices.
pub fn index_list(json: &Value, context: &'static str) -> Result<Vec<usize>> {
    json.items()
        .map(|v| {
            v.as_index()
                .ok_or_else(|| Error::mismatch(format!("index in {context}"), v.to_string()))
        })
        .collect()
}

/// Read an array of numbers as `f32`.
pub fn f32_list(json: &Value, context: &'static str) -> Result<Vec<f32>> {
    json.items()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| Error::mismatch(format!("number in {context}"), v.to_string()))
        })
        .collect()
}

/// Read an array of strings.
pub fn string_list(json: &Value) -> Vec<String> {
    json.items()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}

/// Read the first `N` numbers of an array, or `fallback` when absent.
pub fn float_array<const N: usize>(json: &Value, context: &'static str, fallback: [f32; N]) -> Result<[f32; N]> {
    if !json.is_present() {
        return Ok(fallback);
    }
    let count = json.item_count();
    if count < N {
        return Err(Error::invalid(format!(
            "{context} needs {N} components, found {count}"
        )));
    }
    let mut out = fallback;
    for (slot, v) in out.iter_mut().zip(json.items()) {
        *slot = v
            .as_f64()
            .ok_or_else(|| Error::mismatch(format!("number in {context}"), v.to_string()))?
            as f32;
    }
    Ok(out)
}
