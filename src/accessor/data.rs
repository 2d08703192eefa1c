//! Decoded accessor storage.

use super::ComponentType;

/// Decoded accessor values, one variant per component type.
///
/// Values are stored flat: a VEC3 float accessor with `count` elements holds
/// `3 * count` floats.
#[derive(Clone, Debug, PartialEq)]
pub enum AccessorData {
    UnsignedByte(Vec<u8>),
    Byte(Vec<i8>),
    Short(Vec<i16>),
    UnsignedShort(Vec<u16>),
    UnsignedInt(Vec<u32>),
    Float(Vec<f32>),
}

impl Default for AccessorData {
    fn default() -> Self {
        Self::UnsignedByte(Vec::new())
    }
}

impl AccessorData {
    /// Component type of the stored values.
    pub const fn component_type(&self) -> ComponentType {
        match self {
            Self::UnsignedByte(_) => ComponentType::UnsignedByte,
            Self::Byte(_) => ComponentType::Byte,
            Self::Short(_) => ComponentType::Short,
            Self::UnsignedShort(_) => ComponentType::UnsignedShort,
            Self::UnsignedInt(_) => ComponentType::UnsignedInt,
            Self::Float(_) => ComponentType::Float,
        }
    }

    /// Number of stored components.
    pub fn len(&self) -> usize {
        match self {
            Self::UnsignedByte(d) => d.len(),
            Self::Byte(d) => d.len(),
            Self::Short(d) => d.len(),
            Self::UnsignedShort(d) => d.len(),
            Self::UnsignedInt(d) => d.len(),
            Self::Float(d) => d.len(),
        }
    }

    /// Returns true if no components are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Float components, if this is float data.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            Self::Float(d) => Some(d),
            _ => None,
        }
    }

    /// Widen unsigned integer data to `u32`; `None` for signed or float data.
    pub fn to_u32(&self) -> Option<Vec<u32>> {
        match self {
            Self::UnsignedInt(d) => Some(d.clone()),
            Self::UnsignedShort(d) => Some(d.iter().map(|&v| u32::from(v)).collect()),
            Self::UnsignedByte(d) => Some(d.iter().map(|&v| u32::from(v)).collect()),
            Self::Byte(_) | Self::Short(_) | Self::Float(_) => None,
        }
    }

    /// Map normalized integer data to floats (`[0, 1]` unsigned, `[-1, 1]`
    /// signed). Float data is returned as is; `u32` data cannot be normalized.
    pub fn dequantize(&self) -> Option<Vec<f32>> {
        match self {
            Self::Float(d) => Some(d.clone()),
            Self::UnsignedByte(d) => Some(d.iter().map(|&v| f32::from(v) / 255.0).collect()),
            Self::UnsignedShort(d) => Some(d.iter().map(|&v| f32::from(v) / 65535.0).collect()),
            Self::Byte(d) => Some(d.iter().map(|&v| (f32::from(v) / 127.0).max(-1.0)).collect()),
            Self::Short(d) => Some(d.iter().map(|&v| (f32::from(v) / 32767.0).max(-1.0)).collect()),
            Self::UnsignedInt(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_tag() {
        assert_eq!(AccessorData::Float(vec![1.0]).component_type(), ComponentType::Float);
        assert_eq!(AccessorData::Short(vec![]).component_type(), ComponentType::Short);
        assert!(AccessorData::default().is_empty());
    }

    #[test]
    fn test_widen_unsigned() {
        assert_eq!(AccessorData::UnsignedByte(vec![1, 255]).to_u32(), Some(vec![1, 255]));
        assert_eq!(AccessorData::UnsignedShort(vec![65535]).to_u32(), Some(vec![65535]));
        assert_eq!(AccessorData::Short(vec![1]).to_u32(), None);
        assert_eq!(AccessorData::Float(vec![1.0]).to_u32(), None);
    }

    #[test]
    fn test_dequantize() {
        assert_eq!(AccessorData::UnsignedByte(vec![0, 255]).dequantize(), Some(vec![0.0, 1.0]));
        assert_eq!(AccessorData::Byte(vec![-128, 127]).dequantize(), Some(vec![-1.0, 1.0]));
        assert_eq!(AccessorData::Short(vec![0]).dequantize(), Some(vec![0.0]));
        assert_eq!(AccessorData::UnsignedInt(vec![1]).dequantize(), None);
    }
}
