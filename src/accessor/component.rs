//! Component types - the numeric kinds backing accessor elements.

use byteorder::{ByteOrder, LittleEndian};
use bytemuck::Pod;
use std::fmt;

use super::AccessorData;
use crate::util::{Error, Result};

/// Accessor component type, tagged with its glTF code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ComponentType {
    /// Signed 8-bit integer
    Byte = 5120,
    /// Unsigned 8-bit integer
    #[default]
    UnsignedByte = 5121,
    /// Signed 16-bit integer
    Short = 5122,
    /// Unsigned 16-bit integer
    UnsignedShort = 5123,
    /// Unsigned 32-bit integer
    UnsignedInt = 5125,
    /// 32-bit floating point
    Float = 5126,
}

impl ComponentType {
    /// Convert from the glTF `componentType` code.
    pub const fn from_code(code: u64) -> Option<Self> {
        match code {
            5120 => Some(Self::Byte),
            5121 => Some(Self::UnsignedByte),
            5122 => Some(Self::Short),
            5123 => Some(Self::UnsignedShort),
            5125 => Some(Self::UnsignedInt),
            5126 => Some(Self::Float),
            _ => None,
        }
    }

    /// Parse a `componentType` code, failing on unknown values.
    pub fn parse(code: u64) -> Result<Self> {
        Self::from_code(code).ok_or(Error::UnknownComponentType(code))
    }

    /// Size in bytes of a single component.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::UnsignedInt | Self::Float => 4,
        }
    }

    /// Short lowercase name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "i8",
            Self::UnsignedByte => "u8",
            Self::Short => "i16",
            Self::UnsignedShort => "u16",
            Self::UnsignedInt => "u32",
            Self::Float => "f32",
        }
    }

    /// Returns true for the three unsigned integer kinds.
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::UnsignedByte | Self::UnsignedShort | Self::UnsignedInt)
    }

    /// Returns true for `Float`.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// === Component trait for typed decoding ===

/// Rust types that can back an accessor.
pub trait Component: Pod + Default + PartialOrd + fmt::Debug {
    /// The corresponding component type.
    const TYPE: ComponentType;

    /// Size of this type in bytes.
    const SIZE: usize = std::mem::size_of::<Self>();

    /// Decode little-endian `src` into `dst`; `src.len() == dst.len() * SIZE`.
    fn read_into(src: &[u8], dst: &mut [Self]);

    /// Convert a JSON bound value, saturating for integer kinds.
    fn from_bound(value: f64) -> Self;

    /// Wrap a decoded vector in its [`AccessorData`] variant.
    fn wrap(data: Vec<Self>) -> AccessorData;
}

impl Component for u8 {
    const TYPE: ComponentType = ComponentType::UnsignedByte;

    fn read_into(src: &[u8], dst: &mut [Self]) {
        dst.copy_from_slice(src);
    }

    fn from_bound(value: f64) -> Self {
        value as u8
    }

    fn wrap(data: Vec<Self>) -> AccessorData {
        AccessorData::UnsignedByte(data)
    }
}

impl Component for i8 {
    const TYPE: ComponentType = ComponentType::Byte;

    fn read_into(src: &[u8], dst: &mut [Self]) {
        dst.copy_from_slice(bytemuck::cast_slice(src));
    }

    fn from_bound(value: f64) -> Self {
        value as i8
    }

    fn wrap(data: Vec<Self>) -> AccessorData {
        AccessorData::Byte(data)
    }
}

macro_rules! impl_wide_component {
    ($ty:ty, $kind:ident, $read:ident) => {
        impl Component for $ty {
            const TYPE: ComponentType = ComponentType::$kind;

            fn read_into(src: &[u8], dst: &mut [Self]) {
                LittleEndian::$read(src, dst);
            }

            fn from_bound(value: f64) -> Self {
                value as $ty
            }

            fn wrap(data: Vec<Self>) -> AccessorData {
                AccessorData::$kind(data)
            }
        }
    };
}

impl_wide_component!(i16, Short, read_i16_into);
impl_wide_component!(u16, UnsignedShort, read_u16_into);
impl_wide_component!(u32, UnsignedInt, read_u32_into);
impl_wide_component!(f32, Float, read_f32_into);
