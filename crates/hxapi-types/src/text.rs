//! Inline text buffer bounded by [`TEXT_MAXSIZE`].
//!
//! Content is stored as raw bytes so that non-UTF-8 strings coming back
//! from the controller (it reports names in a legacy code page) survive a
//! round trip, including through serde where they are written as a byte
//! sequence. The limit counts content bytes only; the C-side buffer is one
//! byte longer to hold the NUL terminator.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{HxError, HxResult};
use crate::typedef::{Byte, Char, UChar, TEXT_MAXSIZE};

/// Size of a NUL-terminated C text buffer.
pub const TEXT_BUFFER_SIZE: usize = TEXT_MAXSIZE + 1;

/// Text of at most [`TEXT_MAXSIZE`] bytes without interior NULs.
#[derive(Clone)]
pub struct Text {
    buf: [Byte; TEXT_MAXSIZE],
    len: UChar,
}

// `len` is a `UChar`, so the limit must fit in one.
const _: () = assert!(TEXT_MAXSIZE <= UChar::MAX as usize);

impl Text {
    /// Create an empty text.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0; TEXT_MAXSIZE],
            len: 0,
        }
    }

    /// Build a text from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::TextTooLong`] if `bytes` exceeds [`TEXT_MAXSIZE`],
    /// or [`HxError::InteriorNul`] if it contains a NUL byte.
    pub fn from_bytes(bytes: &[Byte]) -> HxResult<Self> {
        let mut text = Self::new();
        text.push_bytes(bytes)?;
        Ok(text)
    }

    /// Read a NUL-terminated C buffer.
    ///
    /// Reading stops at the first NUL; a buffer with no NUL is read whole.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::TextTooLong`] if the content before the terminator
    /// exceeds [`TEXT_MAXSIZE`].
    pub fn from_c_buffer(buffer: &[Char]) -> HxResult<Self> {
        let end = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
        if end > TEXT_MAXSIZE {
            return Err(HxError::TextTooLong { len: end });
        }
        let mut text = Self::new();
        for (dst, &src) in text.buf.iter_mut().zip(&buffer[..end]) {
            *dst = src as Byte;
        }
        text.len = end as UChar;
        Ok(text)
    }

    /// Write the content into a NUL-terminated C buffer.
    #[must_use]
    pub fn to_c_buffer(&self) -> [Char; TEXT_BUFFER_SIZE] {
        let mut out: [Char; TEXT_BUFFER_SIZE] = [0; TEXT_BUFFER_SIZE];
        for (dst, &src) in out.iter_mut().zip(self.as_bytes()) {
            *dst = src as Char;
        }
        out
    }

    /// Append a string.
    ///
    /// Nothing is appended if the call fails.
    ///
    /// # Errors
    ///
    /// Same as [`Text::from_bytes`], applied to the combined length.
    pub fn push_str(&mut self, s: &str) -> HxResult<()> {
        self.push_bytes(s.as_bytes())
    }

    fn push_bytes(&mut self, bytes: &[Byte]) -> HxResult<()> {
        let start = self.len();
        let new_len = start + bytes.len();
        if new_len > TEXT_MAXSIZE {
            return Err(HxError::TextTooLong { len: new_len });
        }
        if let Some(offset) = bytes.iter().position(|&b| b == 0) {
            return Err(HxError::InteriorNul {
                position: start + offset,
            });
        }
        self.buf[start..new_len].copy_from_slice(bytes);
        self.len = new_len as UChar;
        Ok(())
    }

    /// Content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Returns true if the text has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remaining capacity in bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        TEXT_MAXSIZE - self.len()
    }

    /// Raw content bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[Byte] {
        &self.buf[..self.len()]
    }

    /// Content as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`HxError::InvalidUtf8`] if the content is not valid UTF-8.
    pub fn to_str(&self) -> HxResult<&str> {
        std::str::from_utf8(self.as_bytes()).map_err(|_| HxError::InvalidUtf8)
    }

    /// Content as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl TryFrom<&str> for Text {
    type Error = HxError;

    fn try_from(s: &str) -> HxResult<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl FromStr for Text {
    type Err = HxError;

    fn from_str(s: &str) -> HxResult<Self> {
        Self::try_from(s)
    }
}

/// UTF-8 content serializes as a string, anything else as raw bytes.
impl Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_str() {
            Ok(s) => serializer.serialize_str(s),
            Err(_) => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = Text;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a sequence of bytes")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Text::try_from(value).map_err(de::Error::custom)
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Text::from_bytes(value).map_err(de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let capacity = seq.size_hint().unwrap_or(0).min(TEXT_MAXSIZE);
                let mut bytes = Vec::with_capacity(capacity);
                while let Some(byte) = seq.next_element::<Byte>()? {
                    bytes.push(byte);
                }
                Text::from_bytes(&bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(TextVisitor)
    }
}
