//! Mapped argument values handed to a handler invocation.
//!
//! The mappers produce one [`Arg`] per declared parameter, in declaration
//! order. The registration closure pulls them back out through the typed
//! accessors on [`Args`]; an accessor mismatch means the declaration and the
//! closure disagree, which is a programmer error surfaced as an unexpected
//! failure (500), never a request error.

use std::any::Any;
use std::fmt;

/// One mapped argument value.
///
/// Scalar variants come from query coercion or zero-value defaults. `Body`
/// carries the deserialized request body behind type erasure; the concrete
/// type is recovered by [`Args::take_body`]. `Absent` is the zero value of a
/// structured type; the binding layer never invents a composite default.
pub enum Arg {
    Text(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Deserialized request body, erased; recovered via downcast
    Body(Box<dyn Any + Send>),
    /// Absence marker for structured types with no default
    Absent,
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(v) => write!(f, "Text({:?})", v),
            Arg::Bool(v) => write!(f, "Bool({})", v),
            Arg::I8(v) => write!(f, "I8({})", v),
            Arg::I16(v) => write!(f, "I16({})", v),
            Arg::I32(v) => write!(f, "I32({})", v),
            Arg::I64(v) => write!(f, "I64({})", v),
            Arg::F32(v) => write!(f, "F32({})", v),
            Arg::F64(v) => write!(f, "F64({})", v),
            Arg::Body(_) => write!(f, "Body(..)"),
            Arg::Absent => write!(f, "Absent"),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Text(a), Arg::Text(b)) => a == b,
            (Arg::Bool(a), Arg::Bool(b)) => a == b,
            (Arg::I8(a), Arg::I8(b)) => a == b,
            (Arg::I16(a), Arg::I16(b)) => a == b,
            (Arg::I32(a), Arg::I32(b)) => a == b,
            (Arg::I64(a), Arg::I64(b)) => a == b,
            (Arg::F32(a), Arg::F32(b)) => a == b,
            (Arg::F64(a), Arg::F64(b)) => a == b,
            (Arg::Absent, Arg::Absent) => true,
            // Erased bodies have no structural equality
            _ => false,
        }
    }
}

/// The ordered argument list for one invocation.
pub struct Args {
    values: Vec<Arg>,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("values", &self.values).finish()
    }
}

macro_rules! scalar_accessor {
    ($name:ident, $variant:ident, $ty:ty) => {
        #[doc = concat!("Read the `", stringify!($ty), "` argument at `idx`.")]
        pub fn $name(&self, idx: usize) -> anyhow::Result<$ty> {
            match self.get(idx)? {
                Arg::$variant(v) => Ok(*v),
                other => anyhow::bail!(
                    "argument {} is {:?}, not {}",
                    idx,
                    other,
                    stringify!($ty)
                ),
            }
        }
    };
}

impl Args {
    pub(crate) fn new(values: Vec<Arg>) -> Self {
        Args { values }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn get(&self, idx: usize) -> anyhow::Result<&Arg> {
        self.values
            .get(idx)
            .ok_or_else(|| anyhow::anyhow!("argument index {} out of range", idx))
    }

    /// Read the text argument at `idx`.
    pub fn text(&self, idx: usize) -> anyhow::Result<&str> {
        match self.get(idx)? {
            Arg::Text(v) => Ok(v.as_str()),
            other => anyhow::bail!("argument {} is {:?}, not text", idx, other),
        }
    }

    scalar_accessor!(bool, Bool, bool);
    scalar_accessor!(i8, I8, i8);
    scalar_accessor!(i16, I16, i16);
    scalar_accessor!(i32, I32, i32);
    scalar_accessor!(i64, I64, i64);
    scalar_accessor!(f32, F32, f32);
    scalar_accessor!(f64, F64, f64);

    /// Take the deserialized body argument at `idx`, recovering its concrete
    /// type. Consumes the slot; a second take reports the slot as absent.
    pub fn take_body<T: Any>(&mut self, idx: usize) -> anyhow::Result<T> {
        let slot = self
            .values
            .get_mut(idx)
            .ok_or_else(|| anyhow::anyhow!("argument index {} out of range", idx))?;
        match std::mem::replace(slot, Arg::Absent) {
            Arg::Body(erased) => erased.downcast::<T>().map(|b| *b).map_err(|_| {
                anyhow::anyhow!(
                    "body argument {} does not hold a {}",
                    idx,
                    std::any::type_name::<T>()
                )
            }),
            other => anyhow::bail!("argument {} is {:?}, not a body", idx, other),
        }
    }
}
