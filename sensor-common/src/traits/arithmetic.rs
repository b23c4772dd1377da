use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Values that can be accumulated and averaged by the filters in this crate.
pub trait BasicArithmetic:
    Sized
    + Clone
    + Default
    + Send
    + Sync
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Div<f64, Output = Self>
    + Mul<f64, Output = Self>
    + 'static
{
}

impl BasicArithmetic for f64 {}
