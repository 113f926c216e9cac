//! Fixed-width primitive aliases used across the HXApi controller interface.
//!
//! The controller headers name every primitive explicitly so that struct
//! layouts and call signatures never depend on the native width of `int`,
//! `short` or `char`. The aliases below pin each name to a Rust fixed-width
//! type and the widths are checked at compile time.
//!
//! The C enumerators `False`/`True` are exposed as [`FALSE`] and [`TRUE`].

use core::mem::size_of;

use serde::Serialize;
use tracing::warn;

use crate::error::{HxError, HxResult};

/// Signed 32-bit integer.
pub type Int32 = i32;
/// Unsigned 32-bit integer.
pub type UInt32 = u32;
/// Integer boolean. Only [`FALSE`] and [`TRUE`] are meaningful, by convention.
pub type Bool = Int32;
/// IEEE 754 binary64.
pub type Double = f64;
/// IEEE 754 binary32.
pub type Float = f32;
/// Platform `char`; signedness follows the target ABI.
pub type Char = core::ffi::c_char;
/// Signed byte, -128..=127.
pub type SChar = i8;
/// Unsigned byte, 0..=255.
pub type UChar = u8;

/// Signed 16-bit integer.
pub type Int16 = i16;
/// Unsigned 16-bit integer.
pub type Uint16 = u16;
/// Signed byte, same as [`SChar`].
pub type Int8 = SChar;
/// Unsigned byte, same as [`UChar`].
pub type Uint8 = UChar;

/// Raw byte storage.
pub type Byte = u8;

/// Maximum text length in bytes, excluding the NUL terminator.
pub const TEXT_MAXSIZE: usize = 255;

/// Integer `false`.
pub const FALSE: Bool = 0;
/// Integer `true`.
pub const TRUE: Bool = 1;

const _: () = {
    assert!(size_of::<Int32>() == 4);
    assert!(size_of::<UInt32>() == 4);
    assert!(size_of::<Bool>() == 4);
    assert!(size_of::<Double>() == 8);
    assert!(size_of::<Float>() == 4);
    assert!(size_of::<Char>() == 1);
    assert!(size_of::<SChar>() == 1);
    assert!(size_of::<UChar>() == 1);
    assert!(size_of::<Int16>() == 2);
    assert!(size_of::<Uint16>() == 2);
    assert!(size_of::<Int8>() == 1);
    assert!(size_of::<Uint8>() == 1);
    assert!(size_of::<Byte>() == 1);
    assert!(FALSE != TRUE);
};

/// Convert a Rust `bool` into the integer boolean.
#[must_use]
pub const fn from_bool(value: bool) -> Bool {
    if value {
        TRUE
    } else {
        FALSE
    }
}

/// Interpret an integer boolean with C truthiness: any non-zero value is `true`.
///
/// Values other than [`FALSE`] and [`TRUE`] are accepted but logged, since
/// they usually point at an uninitialised field on the controller side.
#[must_use]
pub fn to_bool(value: Bool) -> bool {
    if value != FALSE && value != TRUE {
        warn!(value, "Bool outside {{0, 1}}, treating as true");
    }
    value != FALSE
}

/// Interpret an integer boolean, rejecting anything but [`FALSE`] and [`TRUE`].
///
/// # Errors
///
/// Returns [`HxError::InvalidBool`] for any other value.
pub fn strict_bool(value: Bool) -> HxResult<bool> {
    match value {
        FALSE => Ok(false),
        TRUE => Ok(true),
        other => Err(HxError::InvalidBool(other)),
    }
}

/// Numeric category of an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Two's-complement signed integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
    /// IEEE 754 floating point.
    Float,
}

/// Width and range of one alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    /// Alias name as spelled in the controller headers.
    pub name: &'static str,
    /// Underlying Rust type.
    pub rust_type: &'static str,
    /// Width in bits.
    pub bits: u32,
    /// Numeric category.
    pub kind: TypeKind,
    /// Smallest representable integer; `None` for floats.
    pub min: Option<i64>,
    /// Largest representable integer; `None` for floats.
    pub max: Option<i64>,
}

impl TypeInfo {
    /// Returns true if `value` is representable without overflow.
    ///
    /// Floats accept every integer in the `i64` range (possibly rounding).
    #[must_use]
    pub fn fits(&self, value: i64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (min..=max).contains(&value),
            _ => true,
        }
    }

    /// Width in bytes.
    #[must_use]
    pub fn bytes(&self) -> u32 {
        self.bits / 8
    }
}

macro_rules! int_info {
    ($name:ident, $rust:literal) => {
        TypeInfo {
            name: stringify!($name),
            rust_type: $rust,
            bits: $name::BITS,
            kind: if ($name::MIN as i64) < 0 {
                TypeKind::Signed
            } else {
                TypeKind::Unsigned
            },
            min: Some($name::MIN as i64),
            max: Some($name::MAX as i64),
        }
    };
}

macro_rules! float_info {
    ($name:ident, $rust:literal) => {
        TypeInfo {
            name: stringify!($name),
            rust_type: $rust,
            bits: (size_of::<$name>() * 8) as u32,
            kind: TypeKind::Float,
            min: None,
            max: None,
        }
    };
}

/// Every alias in declaration order.
pub const ALIASES: [TypeInfo; 13] = [
    int_info!(Int32, "i32"),
    int_info!(UInt32, "u32"),
    int_info!(Bool, "i32"),
    float_info!(Double, "f64"),
    float_info!(Float, "f32"),
    int_info!(Char, "c_char"),
    int_info!(SChar, "i8"),
    int_info!(UChar, "u8"),
    int_info!(Int16, "i16"),
    int_info!(Uint16, "u16"),
    int_info!(Int8, "i8"),
    int_info!(Uint8, "u8"),
    int_info!(Byte, "u8"),
];

/// Look up an alias by its header name (case-sensitive).
#[must_use]
pub fn lookup(name: &str) -> Option<&'static TypeInfo> {
    ALIASES.iter().find(|info| info.name == name)
}
