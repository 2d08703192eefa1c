//! Accessor layout and the byte-to-typed-array decoder.

use serde_json::Value;
use smallvec::SmallVec;

use super::{AccessorData, Component, ComponentType};
use crate::core::JsonExt;
use crate::util::{Error, Result};

/// Per-component bound values; a MAT4 has at most 16.
pub type Bounds<T> = SmallVec<[T; 16]>;

/// Which side of a declared range to clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Floor,
    Ceil,
}

/// How an accessor's elements are laid out in its source bytes.
#[derive(Clone, Copy, Debug)]
pub struct AccessorLayout<'a> {
    /// Declared `min` array, if any.
    pub min: Option<&'a Value>,
    /// Declared `max` array, if any.
    pub max: Option<&'a Value>,
    /// Number of elements.
    pub count: usize,
    /// Components per element.
    pub coefficient: usize,
    /// Byte distance between elements, if the view declares one.
    pub stride: Option<usize>,
}

impl<'a> AccessorLayout<'a> {
    /// Layout of `count` tightly packed elements without bounds.
    pub fn packed(count: usize, coefficient: usize) -> Self {
        Self {
            min: None,
            max: None,
            count,
            coefficient,
            stride: None,
        }
    }

    /// Total number of decoded components.
    #[inline]
    pub fn container_size(&self) -> Result<usize> {
        self.count
            .checked_mul(self.coefficient)
            .ok_or_else(|| Error::invalid(format!("accessor count {} overflows", self.count)))
    }

    /// Bytes the source must hold for elements `element_width` wide.
    ///
    /// The last element of a strided layout needs no trailing padding.
    pub fn extent(&self, element_width: usize) -> Result<usize> {
        if self.count == 0 {
            return Ok(0);
        }
        let extent = match self.stride {
            Some(stride) if stride > element_width => (self.count - 1)
                .checked_mul(stride)
                .and_then(|n| n.checked_add(element_width)),
            _ => self.count.checked_mul(element_width),
        };
        extent.ok_or_else(|| Error::invalid(format!("accessor count {} overflows", self.count)))
    }
}

/// Decode `bytes` into a typed array under `layout`.
///
/// An empty source produces zeros. The output always has exactly
/// `count * coefficient` components. A non-empty source is checked against
/// the layout before anything is allocated.
pub fn decode<T: Component>(bytes: &[u8], layout: &AccessorLayout<'_>) -> Result<Vec<T>> {
    let len = layout.container_size()?;
    let element_width = T::SIZE * layout.coefficient;

    if !bytes.is_empty() && len > 0 {
        if let Some(stride) = layout.stride.filter(|&s| s < element_width) {
            return Err(Error::invalid(format!(
                "byte stride {stride} is smaller than element width {element_width}"
            )));
        }
        let needed = layout.extent(element_width)?;
        if bytes.len() < needed {
            return Err(Error::Truncated {
                context: "accessor",
                needed,
                available: bytes.len(),
            });
        }
    }

    let mut out = vec![T::default(); len];
    if !bytes.is_empty() && len > 0 {
        match layout.stride {
            Some(stride) if stride > element_width => {
                // Interleaved: take element_width bytes at every stride.
                for (element, src) in out
                    .chunks_exact_mut(layout.coefficient)
                    .zip(bytes.chunks(stride))
                {
                    T::read_into(&src[..element_width], element);
                }
            }
            _ => T::read_into(&bytes[..len * T::SIZE], &mut out),
        }
    }

    if let Some(min) = layout.min {
        clamp(&mut out, &parse_bounds(min, layout.coefficient)?, Bound::Floor)?;
    }
    if let Some(max) = layout.max {
        clamp(&mut out, &parse_bounds(max, layout.coefficient)?, Bound::Ceil)?;
    }
    Ok(out)
}

/// Decode into the [`AccessorData`] variant selected by `component_type`.
pub fn decode_data(bytes: &[u8], component_type: ComponentType, layout: &AccessorLayout<'_>) -> Result<AccessorData> {
    Ok(match component_type {
        ComponentType::Byte => i8::wrap(decode(bytes, layout)?),
        ComponentType::UnsignedByte => u8::wrap(decode(bytes, layout)?),
        ComponentType::Short => i16::wrap(decode(bytes, layout)?),
        ComponentType::UnsignedShort => u16::wrap(decode(bytes, layout)?),
        ComponentType::UnsignedInt => u32::wrap(decode(bytes, layout)?),
        ComponentType::Float => f32::wrap(decode(bytes, layout)?),
    })
}

/// Read a declared `min`/`max` array; it must have one entry per component.
pub fn parse_bounds<T: Component>(json: &Value, coefficient: usize) -> Result<Bounds<T>> {
    let count = json.item_count();
    if !json.is_array() || count != coefficient {
        return Err(Error::invalid(format!(
            "accessor bounds need {coefficient} entries, found {count}"
        )));
    }
    json.items()
        .map(|v| {
            v.as_f64()
                .map(T::from_bound)
                .ok_or_else(|| Error::mismatch("number in accessor bounds", v.to_string()))
        })
        .collect()
}

/// Clamp every element against the bound for its component slot.
///
/// `range[j]` applies to every element whose index is `j` modulo
/// `range.len()`. An empty range is a no-op.
pub fn clamp<T: Component>(out: &mut [T], range: &[T], bound: Bound) -> Result<()> {
    if range.is_empty() {
        return Ok(());
    }
    if out.len() % range.len() != 0 {
        return Err(Error::invalid(format!(
            "{} components cannot be grouped by {} bounds",
            out.len(),
            range.len()
        )));
    }
    for group in out.chunks_exact_mut(range.len()) {
        for (value, limit) in group.iter_mut().zip(range) {
            let replace = match bound {
                Bound::Floor => *value < *limit,
                Bound::Ceil => *value > *limit,
            };
            if replace {
                *value = *limit;
            }
        }
    }
    Ok(())
}
