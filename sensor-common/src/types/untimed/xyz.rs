use nalgebra::Vector3;
#[cfg(any(feature = "serde-serialize", test))]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[cfg(any(feature = "serde-serialize", test))]
use serde_json::Value;

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use crate::traits::BasicArithmetic;

pub const N_XYZ_COORDINATES: usize = 3;

/// Three axis measurement (acceleration, magnetic field, or an azimuth/pitch/roll triple).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct XYZ(pub Vector3<f64>);

impl XYZ {
    pub fn new(data: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::new(data[0], data[1], data[2]))
    }

    pub fn inner(&self) -> [f64; N_XYZ_COORDINATES] {
        [self.0.x, self.0.y, self.0.z]
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Squared euclidean norm.
    pub fn norm_squared(&self) -> f64 {
        self.0.norm_squared()
    }
}

impl From<XYZ> for [f64; N_XYZ_COORDINATES] {
    fn from(value: XYZ) -> Self {
        value.inner()
    }
}

impl From<[f64; N_XYZ_COORDINATES]> for XYZ {
    fn from(value: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::from(value))
    }
}

impl From<XYZ> for Vec<f64> {
    fn from(value: XYZ) -> Self {
        value.inner().to_vec()
    }
}

impl TryFrom<Vec<f64>> for XYZ {
    type Error = &'static str;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        if value.len() != N_XYZ_COORDINATES {
            return Err("Can't convert to XYZ");
        }
        Ok(Self(Vector3::from_vec(value)))
    }
}

impl Add for XYZ {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for XYZ {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Div<f64> for XYZ {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl AddAssign for XYZ {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl SubAssign for XYZ {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}

impl Mul<f64> for XYZ {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl BasicArithmetic for XYZ {}

#[cfg(any(feature = "serde-serialize", test))]
impl Serialize for XYZ {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let json = serde_json::json!({
            "x": self.0.x,
            "y": self.0.y,
            "z": self.0.z
        });
        json.serialize(serializer)
    }
}

#[cfg(any(feature = "serde-serialize", test))]
impl<'de> Deserialize<'de> for XYZ {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Value = Value::deserialize(deserializer)?;

        // [x, y, z]
        if let Some(arr) = value.as_array() {
            if arr.len() == N_XYZ_COORDINATES {
                let x = arr[0].as_f64().unwrap_or_default();
                let y = arr[1].as_f64().unwrap_or_default();
                let z = arr[2].as_f64().unwrap_or_default();
                return Ok(XYZ(Vector3::new(x, y, z)));
            }
            return Err(serde::de::Error::custom("XYZ array must have 3 elements"));
        }

        // {"x": .., "y": .., "z": ..}, missing axes are zero
        if let Some(obj) = value.as_object() {
            let x = obj.get("x").and_then(Value::as_f64).unwrap_or_default();
            let y = obj.get("y").and_then(Value::as_f64).unwrap_or_default();
            let z = obj.get("z").and_then(Value::as_f64).unwrap_or_default();
            return Ok(XYZ(Vector3::new(x, y, z)));
        }

        Err(serde::de::Error::custom("Invalid format for XYZ"))
    }
}
