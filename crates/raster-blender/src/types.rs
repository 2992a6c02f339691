//! Core types for raster blending.

use num_traits::{Bounded, NumCast, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Numeric type of a raster band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
    Int8,
    UInt64,
    Int64,
    CInt16,
    CInt32,
    CFloat32,
    CFloat64,
    Unknown,
}

impl DataType {
    /// True if blocks of this type can be produced by the compositor.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::UInt16
                | Self::Int16
                | Self::UInt32
                | Self::Int32
                | Self::Float32
                | Self::Float64
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::UInt16 => "UInt16",
            Self::Int16 => "Int16",
            Self::UInt32 => "UInt32",
            Self::Int32 => "Int32",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int8 => "Int8",
            Self::UInt64 => "UInt64",
            Self::Int64 => "Int64",
            Self::CInt16 => "CInt16",
            Self::CInt32 => "CInt32",
            Self::CFloat32 => "CFloat32",
            Self::CFloat64 => "CFloat64",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color interpretation of a raster band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorInterpretation {
    #[default]
    Undefined,
    Gray,
    Palette,
    Red,
    Green,
    Blue,
    Alpha,
}

/// Validity information a source reports for one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Every pixel holds data; no mask needs to be read.
    AllValid,
    /// Some pixels are nodata; the per-pixel mask must be consulted.
    Partial,
}

/// Typed sample storage for one output block.
#[derive(Debug, Clone, PartialEq)]
pub enum BandData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl BandData {
    /// Convert blended samples into the native type of the band.
    ///
    /// Integer targets round half to even and saturate at the type's
    /// range; NaN becomes zero. Float targets are plain casts.
    pub fn from_f64(values: &[f64], data_type: DataType) -> Option<Self> {
        Some(match data_type {
            DataType::Byte => Self::U8(saturate(values)),
            DataType::UInt16 => Self::U16(saturate(values)),
            DataType::Int16 => Self::I16(saturate(values)),
            DataType::UInt32 => Self::U32(saturate(values)),
            DataType::Int32 => Self::I32(saturate(values)),
            DataType::Float32 => Self::F32(values.iter().map(|&v| v as f32).collect()),
            DataType::Float64 => Self::F64(values.to_vec()),
            _ => return None,
        })
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::U8(_) => DataType::Byte,
            Self::U16(_) => DataType::UInt16,
            Self::I16(_) => DataType::Int16,
            Self::U32(_) => DataType::UInt32,
            Self::I32(_) => DataType::Int32,
            Self::F32(_) => DataType::Float32,
            Self::F64(_) => DataType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at `index` widened to f64.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        match self {
            Self::U8(v) => v.get(index).map(|&x| x as f64),
            Self::U16(v) => v.get(index).map(|&x| x as f64),
            Self::I16(v) => v.get(index).map(|&x| x as f64),
            Self::U32(v) => v.get(index).map(|&x| x as f64),
            Self::I32(v) => v.get(index).map(|&x| x as f64),
            Self::F32(v) => v.get(index).map(|&x| x as f64),
            Self::F64(v) => v.get(index).copied(),
        }
    }
}

fn saturate<T>(values: &[f64]) -> Vec<T>
where
    T: NumCast + Bounded + Default + Copy,
{
    let lo = T::min_value().to_f64().unwrap_or(f64::MIN);
    let hi = T::max_value().to_f64().unwrap_or(f64::MAX);
    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                return T::default();
            }
            NumCast::from(v.round_ties_even().clamp(lo, hi)).unwrap_or_default()
        })
        .collect()
}

/// One composed output block, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBuffer {
    pub width: usize,
    pub height: usize,
    pub data: BandData,
}

impl BlockBuffer {
    /// Sample at block-local `(col, row)` widened to f64.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get_f64(row * self.width + col)
    }

    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }
}
