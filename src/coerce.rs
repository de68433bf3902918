//! Scalar coercion for query-bound parameters.
//!
//! Query strings carry text; handlers declare typed parameters. This module
//! owns the conversion in both directions of "no value": parsing a textual
//! value into a declared target type, and producing the zero value a missing
//! optional parameter binds to.

use crate::args::Arg;
use std::fmt;

/// Target type a parameter binding declares.
///
/// Query-sourced bindings are restricted to the scalar kinds; `Json` marks a
/// structured type and is only legal for body bindings. The restriction is
/// enforced once at registry build, never on the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindType {
    /// Free text, passed through without parsing
    Text,
    /// `true` / `false`, case-insensitive
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// A structured type deserialized from the request body
    Json,
}

impl BindType {
    /// Whether this type may be bound from a query parameter.
    #[inline]
    #[must_use]
    pub fn is_scalar(self) -> bool {
        !matches!(self, BindType::Json)
    }
}

impl fmt::Display for BindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BindType::Text => "text",
            BindType::Bool => "bool",
            BindType::I8 => "i8",
            BindType::I16 => "i16",
            BindType::I32 => "i32",
            BindType::I64 => "i64",
            BindType::F32 => "f32",
            BindType::F64 => "f64",
            BindType::Json => "json",
        };
        write!(f, "{}", s)
    }
}

/// A textual value that could not be represented in its target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    /// The raw value that failed to parse
    pub value: String,
    /// The declared target type
    pub ty: BindType,
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value '{}' is not a valid {}", self.value, self.ty)
    }
}

impl std::error::Error for CoerceError {}

/// Parse a textual query value into the declared target type.
///
/// Booleans accept only case-insensitive `true`/`false` tokens; numeric kinds
/// reject anything not representable in the target width. `Json` is not a
/// coercion target and always fails.
pub fn coerce(ty: BindType, text: &str) -> Result<Arg, CoerceError> {
    let fail = || CoerceError {
        value: text.to_string(),
        ty,
    };
    match ty {
        BindType::Text => Ok(Arg::Text(text.to_string())),
        BindType::Bool => {
            if text.eq_ignore_ascii_case("true") {
                Ok(Arg::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Arg::Bool(false))
            } else {
                Err(fail())
            }
        }
        BindType::I8 => text.parse().map(Arg::I8).map_err(|_| fail()),
        BindType::I16 => text.parse().map(Arg::I16).map_err(|_| fail()),
        BindType::I32 => text.parse().map(Arg::I32).map_err(|_| fail()),
        BindType::I64 => text.parse().map(Arg::I64).map_err(|_| fail()),
        BindType::F32 => text.parse().map(Arg::F32).map_err(|_| fail()),
        BindType::F64 => text.parse().map(Arg::F64).map_err(|_| fail()),
        BindType::Json => Err(fail()),
    }
}

/// The value an unbound or omitted-optional parameter resolves to.
///
/// Text binds to the empty string, booleans to `false`, every numeric kind to
/// its additive identity. Structured types have no invented default and
/// resolve to the absence marker.
#[must_use]
pub fn zero_value(ty: BindType) -> Arg {
    match ty {
        BindType::Text => Arg::Text(String::new()),
        BindType::Bool => Arg::Bool(false),
        BindType::I8 => Arg::I8(0),
        BindType::I16 => Arg::I16(0),
        BindType::I32 => Arg::I32(0),
        BindType::I64 => Arg::I64(0),
        BindType::F32 => Arg::F32(0.0),
        BindType::F64 => Arg::F64(0.0),
        BindType::Json => Arg::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passthrough() {
        assert_eq!(
            coerce(BindType::Text, "hello").unwrap(),
            Arg::Text("hello".to_string())
        );
    }

    #[test]
    fn test_bool_case_insensitive() {
        assert_eq!(coerce(BindType::Bool, "true").unwrap(), Arg::Bool(true));
        assert_eq!(coerce(BindType::Bool, "TRUE").unwrap(), Arg::Bool(true));
        assert_eq!(coerce(BindType::Bool, "False").unwrap(), Arg::Bool(false));
    }

    #[test]
    fn test_bool_rejects_synonyms() {
        assert!(coerce(BindType::Bool, "1").is_err());
        assert!(coerce(BindType::Bool, "yes").is_err());
        assert!(coerce(BindType::Bool, "").is_err());
    }

    #[test]
    fn test_i32() {
        assert_eq!(coerce(BindType::I32, "42").unwrap(), Arg::I32(42));
        assert_eq!(coerce(BindType::I32, "-7").unwrap(), Arg::I32(-7));
    }

    #[test]
    fn test_i8_overflow() {
        assert!(coerce(BindType::I8, "300").is_err());
    }

    #[test]
    fn test_i32_garbage() {
        assert!(coerce(BindType::I32, "abc").is_err());
        assert!(coerce(BindType::I32, "").is_err());
    }

    #[test]
    fn test_f64() {
        assert_eq!(coerce(BindType::F64, "2.5").unwrap(), Arg::F64(2.5));
    }

    #[test]
    fn test_json_not_a_target() {
        assert!(coerce(BindType::Json, "{}").is_err());
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(zero_value(BindType::Text), Arg::Text(String::new()));
        assert_eq!(zero_value(BindType::Bool), Arg::Bool(false));
        assert_eq!(zero_value(BindType::I64), Arg::I64(0));
        assert_eq!(zero_value(BindType::F32), Arg::F32(0.0));
        assert_eq!(zero_value(BindType::Json), Arg::Absent);
    }
}
