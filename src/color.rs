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

//! Typed colors across the three ANSI depths, and the operations that turn
//! them into escape sequences.
//!
//! More info:
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code#8-bit>
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code#24-bit>
//! - <https://www.ditig.com/256-colors-cheat-sheet>

use std::sync::LazyLock;

use strum_macros::EnumCount;

use crate::{EscapeSequence, SeqBuilder};

/// Which SGR axis a color applies to. Type-level tag only; it picks the
/// numeric base of the generated parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTarget {
    Foreground,
    Background,
}

impl ColorTarget {
    /// Base for the 16-color slots (`30`/`40`).
    pub(crate) const fn basic_base(self) -> u16 {
        match self {
            ColorTarget::Foreground => 30,
            ColorTarget::Background => 40,
        }
    }

    /// Base for the extended (`38;5;…` / `48;2;…`) forms.
    pub(crate) const fn extended_base(self) -> u16 {
        match self {
            ColorTarget::Foreground => 38,
            ColorTarget::Background => 48,
        }
    }
}

/// The 18 named slots of the 16-color model: nine colors (including the
/// terminal default) in normal and bright variants.
///
/// Codes follow the uniform SGR formula: target base + offset (0–7 for the
/// colors, 9 for default), plus 60 for the bright variant. `BrightDefault`
/// exists because the slot set is closed over both axes; mainstream
/// terminals may ignore its codes (99/109).
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumCount)]
pub enum BasicColor {
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightDefault,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl BasicColor {
    #[rustfmt::skip]
    const fn offset(self) -> u16 {
        match self {
            BasicColor::Default | BasicColor::BrightDefault => 9,
            BasicColor::Black   | BasicColor::BrightBlack   => 0,
            BasicColor::Red     | BasicColor::BrightRed     => 1,
            BasicColor::Green   | BasicColor::BrightGreen   => 2,
            BasicColor::Yellow  | BasicColor::BrightYellow  => 3,
            BasicColor::Blue    | BasicColor::BrightBlue    => 4,
            BasicColor::Magenta | BasicColor::BrightMagenta => 5,
            BasicColor::Cyan    | BasicColor::BrightCyan    => 6,
            BasicColor::White   | BasicColor::BrightWhite   => 7,
        }
    }

    const fn is_bright(self) -> bool {
        matches!(
            self,
            BasicColor::BrightDefault
                | BasicColor::BrightBlack
                | BasicColor::BrightRed
                | BasicColor::BrightGreen
                | BasicColor::BrightYellow
                | BasicColor::BrightBlue
                | BasicColor::BrightMagenta
                | BasicColor::BrightCyan
                | BasicColor::BrightWhite
        )
    }

    /// The SGR parameter for this slot on the given axis, eg `Red` on
    /// [ColorTarget::Foreground] is `31`.
    pub const fn code(self, target: ColorTarget) -> u16 {
        let bright = if self.is_bright() { 60 } else { 0 };
        target.basic_base() + self.offset() + bright
    }
}

/// One 24-bit color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    /// Parses `#RGB` or `#RRGGBB` (case-insensitive). One algorithm serves
    /// both const and runtime contexts: a malformed literal fails the build,
    /// a malformed runtime string fails fast.
    ///
    /// `#RGB` replicates each nibble (`#F00` is `(255, 0, 0)`).
    ///
    /// Documented quirk: bytes outside `[0-9a-fA-F]` parse as the value 0
    /// rather than being rejected. The `#` prefix and the overall length are
    /// still hard requirements.
    pub const fn from_hex(text: &str) -> RgbColor {
        let bytes = text.as_bytes();
        assert!(
            !bytes.is_empty() && bytes[0] == b'#',
            "hex color must start with '#'"
        );
        match bytes.len() {
            7 => RgbColor {
                red: hex_pair(bytes[1], bytes[2]),
                green: hex_pair(bytes[3], bytes[4]),
                blue: hex_pair(bytes[5], bytes[6]),
            },
            4 => RgbColor {
                red: hex_digit(bytes[1]) * 17,
                green: hex_digit(bytes[2]) * 17,
                blue: hex_digit(bytes[3]) * 17,
            },
            _ => panic!("hex color must be \"#RGB\" or \"#RRGGBB\""),
        }
    }
}

const fn hex_digit(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => 10 + (byte - b'a'),
        b'A'..=b'F' => 10 + (byte - b'A'),
        _ => 0,
    }
}

const fn hex_pair(high: u8, low: u8) -> u8 { hex_digit(high) * 16 + hex_digit(low) }

/// A color in any of the three depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Basic(BasicColor),
    Ansi256(u8),
    Rgb(u8, u8, u8),
}

mod convert_color {
    use super::*;

    impl From<BasicColor> for Color {
        fn from(slot: BasicColor) -> Self { Color::Basic(slot) }
    }

    impl From<RgbColor> for Color {
        fn from(color: RgbColor) -> Self { Color::Rgb(color.red, color.green, color.blue) }
    }

    impl From<(u8, u8, u8)> for RgbColor {
        fn from((red, green, blue): (u8, u8, u8)) -> Self { RgbColor { red, green, blue } }
    }

    impl From<(u8, u8, u8)> for Color {
        fn from((red, green, blue): (u8, u8, u8)) -> Self { Color::Rgb(red, green, blue) }
    }
}

/// `ESC[<code>m` for one of the 18 named slots.
pub fn indexed16(target: ColorTarget, slot: BasicColor) -> EscapeSequence {
    SeqBuilder::csi().param(slot.code(target)).finish('m')
}

/// `ESC[38;5;<idx>m` / `ESC[48;5;<idx>m`. All 256 sequences per target are
/// built once and cloned out of a table, trading a small amount of memory
/// for allocation-free O(1) lookups.
pub fn indexed256(target: ColorTarget, index: u8) -> EscapeSequence {
    let table = match target {
        ColorTarget::Foreground => &FOREGROUND_256_TABLE,
        ColorTarget::Background => &BACKGROUND_256_TABLE,
    };
    table[index as usize].clone()
}

/// `ESC[38;2;<r>;<g>;<b>m` / `ESC[48;2;<r>;<g>;<b>m`.
pub fn truecolor(target: ColorTarget, red: u8, green: u8, blue: u8) -> EscapeSequence {
    SeqBuilder::csi()
        .param(target.extended_base())
        .param(2)
        .param(u16::from(red))
        .param(u16::from(green))
        .param(u16::from(blue))
        .finish('m')
}

/// [truecolor] with channels parsed from `#RGB` / `#RRGGBB`.
pub fn truecolor_from_hex(target: ColorTarget, text: &str) -> EscapeSequence {
    let RgbColor { red, green, blue } = RgbColor::from_hex(text);
    truecolor(target, red, green, blue)
}

static FOREGROUND_256_TABLE: LazyLock<[EscapeSequence; 256]> =
    LazyLock::new(|| build_indexed256_table(ColorTarget::Foreground));

static BACKGROUND_256_TABLE: LazyLock<[EscapeSequence; 256]> =
    LazyLock::new(|| build_indexed256_table(ColorTarget::Background));

fn build_indexed256_table(target: ColorTarget) -> [EscapeSequence; 256] {
    std::array::from_fn(|index| {
        SeqBuilder::csi()
            .param(target.extended_base())
            .param(5)
            .param(index as u16)
            .finish('m')
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::EnumCount as _;
    use test_case::test_case;

    use super::*;

    #[test]
    fn slot_set_is_closed_at_eighteen() {
        assert_eq!(BasicColor::COUNT, 18);
    }

    #[test_case(BasicColor::Default,       39,  49)]
    #[test_case(BasicColor::Black,         30,  40)]
    #[test_case(BasicColor::Red,           31,  41)]
    #[test_case(BasicColor::Green,         32,  42)]
    #[test_case(BasicColor::Yellow,        33,  43)]
    #[test_case(BasicColor::Blue,          34,  44)]
    #[test_case(BasicColor::Magenta,       35,  45)]
    #[test_case(BasicColor::Cyan,          36,  46)]
    #[test_case(BasicColor::White,         37,  47)]
    #[test_case(BasicColor::BrightDefault, 99,  109)]
    #[test_case(BasicColor::BrightBlack,   90,  100)]
    #[test_case(BasicColor::BrightRed,     91,  101)]
    #[test_case(BasicColor::BrightGreen,   92,  102)]
    #[test_case(BasicColor::BrightYellow,  93,  103)]
    #[test_case(BasicColor::BrightBlue,    94,  104)]
    #[test_case(BasicColor::BrightMagenta, 95,  105)]
    #[test_case(BasicColor::BrightCyan,    96,  106)]
    #[test_case(BasicColor::BrightWhite,   97,  107)]
    fn basic_codes(slot: BasicColor, fg_code: u16, bg_code: u16) {
        assert_eq!(slot.code(ColorTarget::Foreground), fg_code);
        assert_eq!(slot.code(ColorTarget::Background), bg_code);
    }

    #[test]
    fn indexed16_shapes() {
        assert_eq!(indexed16(ColorTarget::Foreground, BasicColor::Red).as_str(), "\x1b[31m");
        assert_eq!(
            indexed16(ColorTarget::Background, BasicColor::BrightYellow).as_str(),
            "\x1b[103m"
        );
        assert_eq!(
            indexed16(ColorTarget::Foreground, BasicColor::Default).as_str(),
            "\x1b[39m"
        );
    }

    #[test]
    fn indexed256_covers_whole_palette() {
        for index in 0..=u8::MAX {
            assert_eq!(
                indexed256(ColorTarget::Foreground, index).as_str(),
                format!("\x1b[38;5;{index}m")
            );
            assert_eq!(
                indexed256(ColorTarget::Background, index).as_str(),
                format!("\x1b[48;5;{index}m")
            );
        }
    }

    #[test_case(0, 0, 0)]
    #[test_case(1, 1, 1)]
    #[test_case(175, 215, 135)]
    #[test_case(255, 255, 255)]
    fn truecolor_shapes(red: u8, green: u8, blue: u8) {
        assert_eq!(
            truecolor(ColorTarget::Foreground, red, green, blue).as_str(),
            format!("\x1b[38;2;{red};{green};{blue}m")
        );
        assert_eq!(
            truecolor(ColorTarget::Background, red, green, blue).as_str(),
            format!("\x1b[48;2;{red};{green};{blue}m")
        );
    }

    #[test_case("#F00",     (255, 0, 0))]
    #[test_case("#abc",     (170, 187, 204))]
    #[test_case("#DC143C",  (220, 20, 60) ; "dc143c uppercase")]
    #[test_case("#dc143c",  (220, 20, 60) ; "dc143c lowercase")]
    #[test_case("#000000",  (0, 0, 0))]
    #[test_case("#ffffff",  (255, 255, 255))]
    fn hex_parsing(text: &str, channels: (u8, u8, u8)) {
        assert_eq!(RgbColor::from_hex(text), RgbColor::from(channels));
    }

    #[test]
    fn hex_parses_in_const_context() {
        const CRIMSON: RgbColor = RgbColor::from_hex("#DC143C");
        assert_eq!(CRIMSON, RgbColor { red: 220, green: 20, blue: 60 });
    }

    #[test]
    fn hex_and_truecolor_agree() {
        assert_eq!(
            truecolor_from_hex(ColorTarget::Foreground, "#F00"),
            truecolor(ColorTarget::Foreground, 255, 0, 0)
        );
        assert_eq!(
            truecolor_from_hex(ColorTarget::Background, "#FFFF00").as_str(),
            "\x1b[48;2;255;255;0m"
        );
    }

    #[test]
    fn non_hex_digits_parse_as_zero() {
        // Kept lax on purpose; see the doc comment on `RgbColor::from_hex`.
        assert_eq!(
            RgbColor::from_hex("#GG12ZZ"),
            RgbColor { red: 0, green: 0x12, blue: 0 }
        );
    }

    #[test]
    #[should_panic(expected = "must start with '#'")]
    fn hex_without_prefix_fails_fast() {
        let _ = RgbColor::from_hex("FF0000");
    }

    #[test]
    #[should_panic(expected = "\"#RGB\" or \"#RRGGBB\"")]
    fn hex_with_wrong_length_fails_fast() {
        let _ = RgbColor::from_hex("#FF00");
    }

    #[test]
    fn color_conversions() {
        assert_eq!(Color::from(BasicColor::Red), Color::Basic(BasicColor::Red));
        assert_eq!(Color::from((1, 2, 3)), Color::Rgb(1, 2, 3));
        assert_eq!(
            Color::from(RgbColor { red: 9, green: 8, blue: 7 }),
            Color::Rgb(9, 8, 7)
        );
        assert_eq!(RgbColor::from((4, 5, 6)), RgbColor { red: 4, green: 5, blue: 6 });
    }
}
