//! Small 2D/3D numeric vectors carried inline by [`crate::Value`].

use std::fmt;

use num_traits::{Num, NumCast, ToPrimitive};

use crate::{VarError, VarResult};

/// 2D vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2<T> {
    /// x component
    pub x: T,
    /// y component
    pub y: T,
}

/// 3D vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3<T> {
    /// x component
    pub x: T,
    /// y component
    pub y: T,
    /// z component
    pub z: T,
}

/// Float 2D vector
pub type Vec2f = Vec2<f64>;
/// Integer 2D vector
pub type Vec2i = Vec2<i64>;
/// Float 3D vector
pub type Vec3f = Vec3<f64>;
/// Integer 3D vector
pub type Vec3i = Vec3<i64>;

/// Component arithmetic. Integer components wrap on overflow like scalar
/// integers do.
pub trait Component: Num + Copy {
    /// `self + o`
    fn add_c(self, o: Self) -> Self;
    /// `self - o`
    fn sub_c(self, o: Self) -> Self;
    /// `self * o`
    fn mul_c(self, o: Self) -> Self;
    /// `self / o`, `o` is never zero
    fn div_c(self, o: Self) -> Self;
    /// `-self`
    fn neg_c(self) -> Self;
}

impl Component for i64 {
    fn add_c(self, o: Self) -> Self {
        self.wrapping_add(o)
    }

    fn sub_c(self, o: Self) -> Self {
        self.wrapping_sub(o)
    }

    fn mul_c(self, o: Self) -> Self {
        self.wrapping_mul(o)
    }

    fn div_c(self, o: Self) -> Self {
        self.wrapping_div(o)
    }

    fn neg_c(self) -> Self {
        self.wrapping_neg()
    }
}

impl Component for f64 {
    fn add_c(self, o: Self) -> Self {
        self + o
    }

    fn sub_c(self, o: Self) -> Self {
        self - o
    }

    fn mul_c(self, o: Self) -> Self {
        self * o
    }

    fn div_c(self, o: Self) -> Self {
        self / o
    }

    fn neg_c(self) -> Self {
        -self
    }
}

fn checked_div<T: Component>(a: T, b: T) -> VarResult<T> {
    if b.is_zero() {
        return Err(VarError::zero_division());
    }
    Ok(a.div_c(b))
}

fn cast<T: ToPrimitive, U: NumCast>(v: T) -> VarResult<U> {
    U::from(v).ok_or_else(|| VarError::value_error("vector component out of range."))
}

impl<T> Vec2<T> {
    /// Create a vector
    pub fn new(x: T, y: T) -> Self {
        Vec2 { x, y }
    }
}

impl<T: Component> Vec2<T> {
    /// Component-wise sum
    pub fn add(self, o: Self) -> Self {
        Vec2::new(self.x.add_c(o.x), self.y.add_c(o.y))
    }

    /// Component-wise difference
    pub fn sub(self, o: Self) -> Self {
        Vec2::new(self.x.sub_c(o.x), self.y.sub_c(o.y))
    }

    /// Component-wise product
    pub fn mul(self, o: Self) -> Self {
        Vec2::new(self.x.mul_c(o.x), self.y.mul_c(o.y))
    }

    /// Component-wise quotient
    pub fn div(self, o: Self) -> VarResult<Self> {
        Ok(Vec2::new(checked_div(self.x, o.x)?, checked_div(self.y, o.y)?))
    }

    /// Multiply every component by `s`
    pub fn scale(self, s: T) -> Self {
        Vec2::new(self.x.mul_c(s), self.y.mul_c(s))
    }

    /// Negate every component
    pub fn neg(self) -> Self {
        Vec2::new(self.x.neg_c(), self.y.neg_c())
    }

    /// Divide every component by `s`
    pub fn div_scalar(self, s: T) -> VarResult<Self> {
        Ok(Vec2::new(checked_div(self.x, s)?, checked_div(self.y, s)?))
    }

    /// Component at `index` (0 or 1)
    pub fn get(&self, index: i64) -> VarResult<T> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(VarError::index_out_of_range(index, 2)),
        }
    }

    /// Replace the component at `index`
    pub fn set(&mut self, index: i64, v: T) -> VarResult<()> {
        match index {
            0 => self.x = v,
            1 => self.y = v,
            _ => return Err(VarError::index_out_of_range(index, 2)),
        }
        Ok(())
    }

    /// Convert the component type
    pub fn cast<U: NumCast>(self) -> VarResult<Vec2<U>>
    where
        T: ToPrimitive,
    {
        Ok(Vec2::new(cast(self.x)?, cast(self.y)?))
    }

    /// Whether both components are zero
    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

impl<T> Vec3<T> {
    /// Create a vector
    pub fn new(x: T, y: T, z: T) -> Self {
        Vec3 { x, y, z }
    }
}

impl<T: Component> Vec3<T> {
    /// Component-wise sum
    pub fn add(self, o: Self) -> Self {
        Vec3::new(self.x.add_c(o.x), self.y.add_c(o.y), self.z.add_c(o.z))
    }

    /// Component-wise difference
    pub fn sub(self, o: Self) -> Self {
        Vec3::new(self.x.sub_c(o.x), self.y.sub_c(o.y), self.z.sub_c(o.z))
    }

    /// Component-wise product
    pub fn mul(self, o: Self) -> Self {
        Vec3::new(self.x.mul_c(o.x), self.y.mul_c(o.y), self.z.mul_c(o.z))
    }

    /// Component-wise quotient
    pub fn div(self, o: Self) -> VarResult<Self> {
        Ok(Vec3::new(
            checked_div(self.x, o.x)?,
            checked_div(self.y, o.y)?,
            checked_div(self.z, o.z)?,
        ))
    }

    /// Multiply every component by `s`
    pub fn scale(self, s: T) -> Self {
        Vec3::new(self.x.mul_c(s), self.y.mul_c(s), self.z.mul_c(s))
    }

    /// Negate every component
    pub fn neg(self) -> Self {
        Vec3::new(self.x.neg_c(), self.y.neg_c(), self.z.neg_c())
    }

    /// Divide every component by `s`
    pub fn div_scalar(self, s: T) -> VarResult<Self> {
        Ok(Vec3::new(
            checked_div(self.x, s)?,
            checked_div(self.y, s)?,
            checked_div(self.z, s)?,
        ))
    }

    /// Component at `index` (0, 1 or 2)
    pub fn get(&self, index: i64) -> VarResult<T> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(VarError::index_out_of_range(index, 3)),
        }
    }

    /// Replace the component at `index`
    pub fn set(&mut self, index: i64, v: T) -> VarResult<()> {
        match index {
            0 => self.x = v,
            1 => self.y = v,
            2 => self.z = v,
            _ => return Err(VarError::index_out_of_range(index, 3)),
        }
        Ok(())
    }

    /// Convert the component type
    pub fn cast<U: NumCast>(self) -> VarResult<Vec3<U>>
    where
        T: ToPrimitive,
    {
        Ok(Vec3::new(cast(self.x)?, cast(self.y)?, cast(self.z)?))
    }

    /// Whether all components are zero
    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero() && self.z.is_zero()
    }
}

impl<T: fmt::Display> fmt::Display for Vec2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: fmt::Display> fmt::Display for Vec3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
