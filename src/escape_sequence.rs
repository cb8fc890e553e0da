/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

//! Bounded construction of ANSI/VT escape byte sequences.
//!
//! Every sequence this crate emits is `ESC <family> <body> <terminator>`,
//! where the body is decimal parameters joined by `;` (plus literal text for
//! window commands). [SeqBuilder] appends those typed fields into an inline
//! buffer and hands out an immutable [EscapeSequence] once terminated.
//!
//! More info:
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code>
//! - <https://notes.burke.libbey.me/ansi-escape-codes/>

use std::fmt::{Display, Formatter, Result};

use smallstr::SmallString;

pub mod sizing {
    /// Inline storage for one escape sequence. This is owned in a stack
    /// allocated buffer (which can spill to the heap for long window titles).
    pub const SEQ_STORAGE_SIZE: usize = 24;

    /// Fixed upper bound for one CSI sequence. The longest SGR instance is
    /// `ESC[48;2;255;255;255m` (19 bytes).
    pub const MAX_CSI_LEN: usize = 24;

    /// Longest accepted window-title payload, in bytes.
    pub const MAX_TITLE_TEXT_LEN: usize = 120;

    /// Fixed upper bound for one OSC sequence: `ESC ] 2 ; <title> BEL`.
    pub const MAX_OSC_LEN: usize = MAX_TITLE_TEXT_LEN + 6;
}

// The documented longest SGR instance must fit the CSI bound.
const _: () = assert!(sizing::MAX_CSI_LEN >= "\x1b[48;2;255;255;255m".len());

pub(crate) type SeqStorage = SmallString<[u8; sizing::SEQ_STORAGE_SIZE]>;

/// A finished escape sequence.
///
/// Invariant: starts with `ESC` (0x1B) and ends with a terminator that is
/// valid for its family. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EscapeSequence {
    inner: SeqStorage,
}

mod escape_sequence_impl {
    use super::*;

    impl EscapeSequence {
        pub fn as_str(&self) -> &str { self.inner.as_str() }

        pub fn as_bytes(&self) -> &[u8] { self.inner.as_str().as_bytes() }

        pub fn len(&self) -> usize { self.inner.len() }

        pub fn is_empty(&self) -> bool { self.inner.is_empty() }
    }

    impl Display for EscapeSequence {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result { f.write_str(self.as_str()) }
    }

    impl AsRef<str> for EscapeSequence {
        fn as_ref(&self) -> &str { self.as_str() }
    }
}

/// Command family of a sequence, selecting introducer and valid terminators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqFamily {
    /// `ESC [` — cursor and SGR control. Terminated by one byte in `@..=~`.
    Csi,
    /// `ESC ]` — window commands. Terminated by `BEL` (0x07).
    Osc,
}

/// Builder appending typed fields into a fixed-capacity buffer.
///
/// Numeric parameters render as minimal decimal ASCII (no leading zeros) and
/// consecutive fields are joined by `;`. Exceeding the family's byte bound or
/// finishing with a terminator the family does not allow is a programmer
/// error and fails fast.
#[derive(Debug)]
pub struct SeqBuilder {
    buf: SeqStorage,
    family: SeqFamily,
    limit: usize,
    has_fields: bool,
}

impl SeqBuilder {
    /// Starts a `ESC [` sequence bounded by [sizing::MAX_CSI_LEN].
    pub fn csi() -> Self { Self::with_family(SeqFamily::Csi, "\x1b[", sizing::MAX_CSI_LEN) }

    /// Starts a `ESC ]` sequence bounded by [sizing::MAX_OSC_LEN].
    pub fn osc() -> Self { Self::with_family(SeqFamily::Osc, "\x1b]", sizing::MAX_OSC_LEN) }

    fn with_family(family: SeqFamily, introducer: &str, limit: usize) -> Self {
        let mut buf = SeqStorage::new();
        buf.push_str(introducer);
        Self {
            buf,
            family,
            limit,
            has_fields: false,
        }
    }

    /// Appends one numeric parameter in minimal decimal form.
    #[must_use]
    pub fn param(mut self, value: u16) -> Self {
        self.push_separator();
        self.push_decimal(value);
        self.assert_fits();
        self
    }

    /// Appends literal text into the body. Only valid for [SeqFamily::Osc],
    /// and the text must not contain control bytes (they would terminate or
    /// desynchronize the sequence on a real terminal).
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        assert!(
            self.family == SeqFamily::Osc,
            "literal text is only valid in an OSC body"
        );
        assert!(
            text.bytes().all(|byte| !byte.is_ascii_control()),
            "escape sequence body must not contain control bytes"
        );
        self.push_separator();
        self.buf.push_str(text);
        self.assert_fits();
        self
    }

    /// Appends the terminator and freezes the sequence.
    #[must_use]
    pub fn finish(mut self, terminator: char) -> EscapeSequence {
        let valid = match self.family {
            SeqFamily::Csi => matches!(terminator, '@'..='~'),
            SeqFamily::Osc => terminator == '\x07',
        };
        assert!(valid, "terminator is not valid for this sequence family");
        self.buf.push(terminator);
        self.assert_fits();
        EscapeSequence { inner: self.buf }
    }

    fn push_separator(&mut self) {
        if self.has_fields {
            self.buf.push(';');
        }
        self.has_fields = true;
    }

    fn push_decimal(&mut self, value: u16) {
        let mut digits = [0u8; 5];
        let mut remainder = value;
        let mut cursor = digits.len();
        loop {
            cursor -= 1;
            digits[cursor] = b'0' + (remainder % 10) as u8;
            remainder /= 10;
            if remainder == 0 {
                break;
            }
        }
        for &digit in &digits[cursor..] {
            self.buf.push(digit as char);
        }
    }

    fn assert_fits(&self) {
        assert!(
            self.buf.len() <= self.limit,
            "escape sequence exceeds the fixed buffer bound for its family"
        );
    }
}
