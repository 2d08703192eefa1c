//! Accessors - typed, decoded views over buffer data.
//!
//! Each accessor is decoded once while the document is parsed. Its values
//! live in an [`AccessorData`] whose variant always matches the declared
//! [`ComponentType`]; the typed conversions below fail rather than
//! reinterpret data of the wrong kind.

mod component;
mod data;
mod layout;

pub use component::{Component, ComponentType};
pub use data::AccessorData;
pub use layout::{clamp, decode, decode_data, parse_bounds, AccessorLayout, Bound, Bounds};

use serde_json::Value;
use std::fmt;

use crate::buffer::{Buffer, BufferView};
use crate::core::{optional_index, require_fields, JsonExt};
use crate::util::{check_index, Error, Mat4, Result, Vec2, Vec3, Vec4};
use crate::UNNAMED;

/// Element shape of an accessor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessorType {
    #[default]
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl AccessorType {
    /// All shapes, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Scalar,
        Self::Vec2,
        Self::Vec3,
        Self::Vec4,
        Self::Mat2,
        Self::Mat3,
        Self::Mat4,
    ];

    /// Components per element.
    ///
    /// Eg: `Vec2` = 2, `Mat3` = 9.
    #[inline]
    pub const fn coefficient(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat2 => 2 * 2,
            Self::Mat3 => 3 * 3,
            Self::Mat4 => 4 * 4,
        }
    }

    /// The glTF semantic string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Mat2 => "MAT2",
            Self::Mat3 => "MAT3",
            Self::Mat4 => "MAT4",
        }
    }

    /// Parse a glTF semantic string.
    pub fn parse(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == key)
            .ok_or_else(|| Error::UnknownAccessorType(key.to_owned()))
    }
}

impl fmt::Display for AccessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded accessor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Accessor {
    pub name: String,
    pub data: AccessorData,
    pub component_type: ComponentType,
    pub ty: AccessorType,
    pub count: usize,
    pub normalized: bool,
    pub buffer_view: Option<usize>,
    pub byte_offset: usize,
    pub extensions: Value,
    pub extras: Value,
}

impl Accessor {
    /// Parse and decode an accessor.
    pub fn from_json(json: &Value, buffers: &[Buffer], views: &[BufferView]) -> Result<Self> {
        require_fields(json, "accessor", &["componentType", "count", "type"])?;
        let code = json["componentType"]
            .as_u64()
            .ok_or_else(|| Error::mismatch("accessor componentType code", json["componentType"].to_string()))?;
        let component_type = ComponentType::parse(code)?;
        let ty = AccessorType::parse(json["type"].str_or(""))?;
        let count = json["count"]
            .as_index()
            .ok_or_else(|| Error::mismatch("accessor count", json["count"].to_string()))?;
        let byte_offset = optional_index(json, "accessor", "byteOffset")?.unwrap_or(0);
        let buffer_view = optional_index(json, "accessor", "bufferView")?;

        let mut bytes: &[u8] = &[];
        let mut stride = None;
        if let Some(index) = buffer_view {
            let view = &views[check_index("BufferView", index, views.len())?];
            let range = view.slice(buffers)?;
            if !range.is_empty() {
                bytes = match range.get(byte_offset..) {
                    Some(rest) if !rest.is_empty() || count == 0 => rest,
                    _ => {
                        return Err(Error::Truncated {
                            context: "accessor byteOffset",
                            needed: byte_offset.saturating_add(1),
                            available: range.len(),
                        })
                    }
                };
            }
            stride = view.stride;
        }

        let layout = AccessorLayout {
            min: Some(&json["min"]).filter(|v| v.is_present()),
            max: Some(&json["max"]).filter(|v| v.is_present()),
            count,
            coefficient: ty.coefficient(),
            stride,
        };
        let data = decode_data(bytes, component_type, &layout)?;
        tracing::trace!(
            count,
            %ty,
            %component_type,
            strided = stride.is_some(),
            "decoded accessor"
        );

        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            data,
            component_type,
            ty,
            count,
            normalized: json["normalized"].bool_or(false),
            buffer_view,
            byte_offset,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Components per element; see [`AccessorType::coefficient`].
    #[inline]
    pub const fn type_coefficient(ty: AccessorType) -> usize {
        ty.coefficient()
    }

    /// Data as `u32`, widening the smaller unsigned kinds.
    ///
    /// Fails for signed and float component types.
    pub fn to_u32(&self) -> Result<Vec<u32>> {
        self.data
            .to_u32()
            .ok_or_else(|| Error::mismatch("unsigned integer components", self.component_type.name()))
    }

    /// Flat float components, checking the element shape is `ty`.
    fn floats(&self, ty: AccessorType) -> Result<&[f32]> {
        if self.ty.coefficient() != ty.coefficient() {
            return Err(Error::mismatch(ty.name(), self.ty.name()));
        }
        let data = self
            .data
            .as_f32()
            .ok_or_else(|| Error::mismatch("f32 components", self.component_type.name()))?;
        if data.len() % ty.coefficient() != 0 {
            return Err(Error::invalid(format!(
                "{} floats do not divide into {}",
                data.len(),
                ty.name()
            )));
        }
        Ok(data)
    }

    /// All components as floats regardless of shape.
    ///
    /// Normalized integer data is dequantized; other integer data fails.
    pub fn to_flat_f32(&self) -> Result<Vec<f32>> {
        let floats = match &self.data {
            AccessorData::Float(d) => Some(d.clone()),
            data if self.normalized => data.dequantize(),
            _ => None,
        };
        floats.ok_or_else(|| Error::mismatch("float or normalized components", self.component_type.name()))
    }

    /// Data as scalars; requires `SCALAR` float.
    pub fn to_f32(&self) -> Result<Vec<f32>> {
        Ok(self.floats(AccessorType::Scalar)?.to_vec())
    }

    /// Data as 2-vectors; requires `VEC2` float.
    pub fn to_vec2(&self) -> Result<Vec<Vec2>> {
        Ok(self
            .floats(AccessorType::Vec2)?
            .chunks_exact(2)
            .map(Vec2::from_slice)
            .collect())
    }

    /// Data as 3-vectors; requires `VEC3` float.
    pub fn to_vec3(&self) -> Result<Vec<Vec3>> {
        Ok(self
            .floats(AccessorType::Vec3)?
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .collect())
    }

    /// Data as 4-vectors; requires a float shape of width 4.
    pub fn to_vec4(&self) -> Result<Vec<Vec4>> {
        Ok(self
            .floats(AccessorType::Vec4)?
            .chunks_exact(4)
            .map(Vec4::from_slice)
            .collect())
    }

    /// Data as 4x4 matrices; requires `MAT4` float.
    ///
    /// Each group of 16 floats is read column by column.
    pub fn to_mat4(&self) -> Result<Vec<Mat4>> {
        if self.ty != AccessorType::Mat4 {
            return Err(Error::mismatch("MAT4", self.ty.name()));
        }
        Ok(self
            .floats(AccessorType::Mat4)?
            .chunks_exact(16)
            .map(Mat4::from_cols_slice)
            .collect())
    }
}

/// Decode every declared accessor.
pub fn parse_accessors(json: &Value, buffers: &[Buffer], views: &[BufferView]) -> Result<Vec<Accessor>> {
    json.items()
        .map(|a| Accessor::from_json(a, buffers, views))
        .collect()
}
