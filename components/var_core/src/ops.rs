//! Operator dispatch over pairs of value tags.
//!
//! Numbers (bool, int, float) promote to the wider operand, bool counting as
//! 0 or 1. Integer arithmetic wraps. An object on the left delegates to its
//! own capability; an object on the right of a non-object is rejected.

use std::cmp::Ordering;

use crate::{ErrorKind, Text, Value, Vec2f, Vec3f, VarError, VarResult};

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Rem => "%",
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::Int(i) => Some(Number::Int(*i)),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

fn as_f64(n: Number) -> f64 {
    match n {
        Number::Int(i) => i as f64,
        Number::Float(f) => f,
    }
}

fn arith(op: Op, a: Number, b: Number) -> VarResult<Value> {
    if let (Number::Int(a), Number::Int(b)) = (a, b) {
        return Ok(Value::Int(match op {
            Op::Add => a.wrapping_add(b),
            Op::Sub => a.wrapping_sub(b),
            Op::Mul => a.wrapping_mul(b),
            Op::Div | Op::Rem if b == 0 => return Err(VarError::zero_division()),
            Op::Div => a.wrapping_div(b),
            Op::Rem => a.wrapping_rem(b),
        }));
    }
    let (a, b) = (as_f64(a), as_f64(b));
    Ok(Value::Float(match op {
        Op::Add => a + b,
        Op::Sub => a - b,
        Op::Mul => a * b,
        Op::Div | Op::Rem if b == 0.0 => return Err(VarError::zero_division()),
        Op::Div => a / b,
        Op::Rem => a % b,
    }))
}

fn vec2_op(op: Op, a: &Value, b: &Value) -> VarResult<Option<Value>> {
    if let (Value::Vec2i(x), Value::Vec2i(y)) = (a, b) {
        return Ok(match op {
            Op::Add => Some(Value::from(x.add(*y))),
            Op::Sub => Some(Value::from(x.sub(*y))),
            Op::Mul => Some(Value::from(x.mul(*y))),
            Op::Div => Some(Value::from(x.div(*y)?)),
            Op::Rem => None,
        });
    }
    let (x, y): (Vec2f, Vec2f) = (a.as_vec2f()?, b.as_vec2f()?);
    Ok(match op {
        Op::Add => Some(Value::from(x.add(y))),
        Op::Sub => Some(Value::from(x.sub(y))),
        Op::Mul => Some(Value::from(x.mul(y))),
        Op::Div => Some(Value::from(x.div(y)?)),
        Op::Rem => None,
    })
}

fn vec3_op(op: Op, a: &Value, b: &Value) -> VarResult<Option<Value>> {
    if let (Value::Vec3i(x), Value::Vec3i(y)) = (a, b) {
        return Ok(match op {
            Op::Add => Some(Value::from(x.add(*y))),
            Op::Sub => Some(Value::from(x.sub(*y))),
            Op::Mul => Some(Value::from(x.mul(*y))),
            Op::Div => Some(Value::from(x.div(*y)?)),
            Op::Rem => None,
        });
    }
    let (x, y): (Vec3f, Vec3f) = (a.as_vec3f()?, b.as_vec3f()?);
    Ok(match op {
        Op::Add => Some(Value::from(x.add(y))),
        Op::Sub => Some(Value::from(x.sub(y))),
        Op::Mul => Some(Value::from(x.mul(y))),
        Op::Div => Some(Value::from(x.div(y)?)),
        Op::Rem => None,
    })
}

/// Vector scaled by a number: `vec * n`, `n * vec` and `vec / n`.
fn vec_scalar_op(op: Op, v: &Value, n: Number) -> VarResult<Option<Value>> {
    let scaled = match (v, n) {
        (Value::Vec2i(v), Number::Int(s)) => match op {
            Op::Mul => Value::from(v.scale(s)),
            Op::Div => Value::from(v.div_scalar(s)?),
            _ => return Ok(None),
        },
        (Value::Vec3i(v), Number::Int(s)) => match op {
            Op::Mul => Value::from(v.scale(s)),
            Op::Div => Value::from(v.div_scalar(s)?),
            _ => return Ok(None),
        },
        (Value::Vec2f(_) | Value::Vec2i(_), s) => {
            let v: Vec2f = v.as_vec2f()?;
            match op {
                Op::Mul => Value::from(v.scale(as_f64(s))),
                Op::Div => Value::from(v.div_scalar(as_f64(s))?),
                _ => return Ok(None),
            }
        }
        (Value::Vec3f(_) | Value::Vec3i(_), s) => {
            let v: Vec3f = v.as_vec3f()?;
            match op {
                Op::Mul => Value::from(v.scale(as_f64(s))),
                Op::Div => Value::from(v.div_scalar(as_f64(s))?),
                _ => return Ok(None),
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(scaled))
}

fn is_vec2(v: &Value) -> bool {
    matches!(v, Value::Vec2f(_) | Value::Vec2i(_))
}

fn is_vec3(v: &Value) -> bool {
    matches!(v, Value::Vec3f(_) | Value::Vec3i(_))
}

fn not_supported(op: &str, lhs: &Value, rhs: &Value) -> VarError {
    VarError::operator_not_supported(op, lhs.type_name(), rhs.type_name())
}

fn binary(op: Op, lhs: &Value, rhs: &Value) -> VarResult<Value> {
    if let Value::Object(o) = lhs {
        return match op {
            Op::Add => o.add(rhs),
            Op::Sub => o.sub(rhs),
            Op::Mul => o.mul(rhs),
            Op::Div => o.div(rhs),
            Op::Rem => o.rem(rhs),
        };
    }

    if let (Some(a), Some(b)) = (number(lhs), number(rhs)) {
        return arith(op, a, b);
    }

    let result = match (op, lhs, rhs) {
        (Op::Add, Value::String(a), Value::String(b)) => {
            let mut joined = a.clone();
            joined.append(b.as_str());
            Some(Value::from(joined))
        }
        (Op::Mul, Value::String(t), Value::Int(n)) | (Op::Mul, Value::Int(n), Value::String(t)) => {
            Some(Value::from(t.repeat(*n)?))
        }
        (Op::Rem, Value::String(t), Value::Array(args)) => {
            Some(Value::from(Text::format(t.as_str(), &args.to_vec())?))
        }
        (Op::Rem, Value::String(t), arg) => {
            Some(Value::from(Text::format(t.as_str(), std::slice::from_ref(arg))?))
        }
        (Op::Add, Value::Array(a), Value::Array(b)) => Some(Value::from(a.concat(b))),
        (Op::Mul, Value::Array(a), Value::Int(n)) | (Op::Mul, Value::Int(n), Value::Array(a)) => {
            Some(Value::from(a.repeat(*n)?))
        }
        (_, a, b) if is_vec2(a) && is_vec2(b) => vec2_op(op, a, b)?,
        (_, a, b) if is_vec3(a) && is_vec3(b) => vec3_op(op, a, b)?,
        (_, v, n) if is_vec2(v) || is_vec3(v) => match number(n) {
            Some(n) => vec_scalar_op(op, v, n)?,
            None => None,
        },
        (Op::Mul, n, v) if is_vec2(v) || is_vec3(v) => match number(n) {
            Some(n) => vec_scalar_op(op, v, n)?,
            None => None,
        },
        _ => None,
    };
    result.ok_or_else(|| not_supported(op.symbol(), lhs, rhs))
}

/// `None` when a NaN is involved; every ordering test on it is false.
fn compare(op: &str, lhs: &Value, rhs: &Value) -> VarResult<Option<Ordering>> {
    match (number(lhs), number(rhs)) {
        (Some(Number::Int(a)), Some(Number::Int(b))) => return Ok(Some(a.cmp(&b))),
        (Some(a), Some(b)) => return Ok(as_f64(a).partial_cmp(&as_f64(b))),
        _ => {}
    }
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        _ => Err(not_supported(op, lhs, rhs)),
    }
}

impl Value {
    /// `self + other`
    pub fn add(&self, other: &Value) -> VarResult<Value> {
        binary(Op::Add, self, other)
    }

    /// `self - other`
    pub fn sub(&self, other: &Value) -> VarResult<Value> {
        binary(Op::Sub, self, other)
    }

    /// `self * other`
    pub fn mul(&self, other: &Value) -> VarResult<Value> {
        binary(Op::Mul, self, other)
    }

    /// `self / other`
    pub fn div(&self, other: &Value) -> VarResult<Value> {
        binary(Op::Div, self, other)
    }

    /// `self % other`; printf formatting when `self` is text
    pub fn rem(&self, other: &Value) -> VarResult<Value> {
        binary(Op::Rem, self, other)
    }

    /// Unary minus
    pub fn neg(&self) -> VarResult<Value> {
        Ok(match self {
            Value::Bool(b) => Value::Int(-i64::from(*b)),
            Value::Int(i) => Value::Int(i.wrapping_neg()),
            Value::Float(f) => Value::Float(-f),
            Value::Vec2f(v) => Value::from(v.neg()),
            Value::Vec2i(v) => Value::from(v.neg()),
            Value::Vec3f(v) => Value::from(v.neg()),
            Value::Vec3i(v) => Value::from(v.neg()),
            _ => {
                return Err(VarError::new(
                    ErrorKind::OperatorNotSupported,
                    format!("unary operator \"-\" not supported on operand \"{}\".", self.type_name()),
                ))
            }
        })
    }

    /// Logical not, by truthiness
    pub fn not(&self) -> Value {
        Value::Bool(!self.truthy())
    }

    /// `self < other`
    pub fn lt(&self, other: &Value) -> VarResult<bool> {
        match self {
            Value::Object(o) => o.less_than(other),
            _ => Ok(compare("<", self, other)? == Some(Ordering::Less)),
        }
    }

    /// `self > other`
    pub fn gt(&self, other: &Value) -> VarResult<bool> {
        match self {
            Value::Object(o) => o.greater_than(other),
            _ => Ok(compare(">", self, other)? == Some(Ordering::Greater)),
        }
    }

    /// `self <= other`
    pub fn le(&self, other: &Value) -> VarResult<bool> {
        match self {
            Value::Object(o) => Ok(o.less_than(other)? || o.equals(other)),
            _ => Ok(matches!(
                compare("<=", self, other)?,
                Some(Ordering::Less | Ordering::Equal)
            )),
        }
    }

    /// `self >= other`
    pub fn ge(&self, other: &Value) -> VarResult<bool> {
        match self {
            Value::Object(o) => Ok(o.greater_than(other)? || o.equals(other)),
            _ => Ok(matches!(
                compare(">=", self, other)?,
                Some(Ordering::Greater | Ordering::Equal)
            )),
        }
    }
}
