//! Resolved types of the target shading language.
//!
//! Every expression and identifier ends up with exactly one of these.
//! Vectors and matrices are limited to the sizes GLSL ES 1.00 provides.

use std::fmt;
use std::str::FromStr;

/// A primitive, vector or matrix type of the target language.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Type {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
    /// Only ever produced by the texture-sampling signature.
    Sampler2D,
}

impl Type {
    /// Vector type with `n` components, `n` in `2..=4`.
    pub fn vec(n: usize) -> Option<Self> {
        match n {
            2 => Some(Self::Vec2),
            3 => Some(Self::Vec3),
            4 => Some(Self::Vec4),
            _ => None,
        }
    }

    /// Square matrix type of dimension `n`, `n` in `2..=4`.
    pub fn mat(n: usize) -> Option<Self> {
        match n {
            2 => Some(Self::Mat2),
            3 => Some(Self::Mat3),
            4 => Some(Self::Mat4),
            _ => None,
        }
    }

    /// Smallest type that can be indexed with the literal `index`.
    ///
    /// Scalars cannot be indexed, so the smallest answer is `vec2`. Indices past
    /// the last vector component fall through to matrices, which are indexed
    /// linearly (`m[k]` addresses column `k / N`, row `k % N`).
    pub fn for_min_index(index: u32) -> Option<Self> {
        match index.saturating_add(1) {
            0..=2 => Some(Self::Vec2),
            n @ 3..=4 => Self::vec(n as usize),
            5..=9 => Some(Self::Mat3),
            10..=16 => Some(Self::Mat4),
            _ => None,
        }
    }

    /// Component count for scalars and vectors.
    ///
    /// `float` counts as one component; everything else has no width.
    pub fn width(self) -> Option<usize> {
        match self {
            Self::Float => Some(1),
            Self::Vec2 => Some(2),
            Self::Vec3 => Some(3),
            Self::Vec4 => Some(4),
            _ => None,
        }
    }

    /// Dimension `N` of a `matN`.
    pub fn dimension(self) -> Option<usize> {
        match self {
            Self::Mat2 => Some(2),
            Self::Mat3 => Some(3),
            Self::Mat4 => Some(4),
            _ => None,
        }
    }

    pub fn is_matrix(self) -> bool {
        self.dimension().is_some()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat2 => "mat2",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
            Self::Sampler2D => "sampler2D",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type name '{0}'")]
pub struct UnknownType(pub String);

impl FromStr for Type {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "float" => Self::Float,
            "int" => Self::Int,
            "vec2" => Self::Vec2,
            "vec3" => Self::Vec3,
            "vec4" => Self::Vec4,
            "mat2" => Self::Mat2,
            "mat3" => Self::Mat3,
            "mat4" => Self::Mat4,
            "sampler2D" => Self::Sampler2D,
            other => return Err(UnknownType(other.to_owned())),
        })
    }
}
