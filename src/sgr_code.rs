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

//! SGR (set graphics rendition) commands: the documented text attributes,
//! the global reset, and the color forms across all three depths.

use std::fmt::{Display, Formatter, Result};

use crate::{Color, ColorTarget, EscapeSequence, SeqBuilder, indexed16, indexed256, truecolor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SgrCode {
    Reset,
    Bold,
    Faint,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
    Foreground(Color),
    Background(Color),
}

pub mod sgr_code_impl {
    use super::*;

    impl SgrCode {
        /// The escape sequence for this command.
        #[rustfmt::skip]
        pub fn to_seq(self) -> EscapeSequence {
            match self {
                SgrCode::Reset             => SeqBuilder::csi().param(0).finish('m'),
                SgrCode::Bold              => SeqBuilder::csi().param(1).finish('m'),
                SgrCode::Faint             => SeqBuilder::csi().param(2).finish('m'),
                SgrCode::Italic            => SeqBuilder::csi().param(3).finish('m'),
                SgrCode::Underline         => SeqBuilder::csi().param(4).finish('m'),
                SgrCode::Blink             => SeqBuilder::csi().param(5).finish('m'),
                SgrCode::Reverse           => SeqBuilder::csi().param(7).finish('m'),
                SgrCode::Hidden            => SeqBuilder::csi().param(8).finish('m'),
                SgrCode::Strikethrough     => SeqBuilder::csi().param(9).finish('m'),
                SgrCode::Foreground(color) => color_seq(ColorTarget::Foreground, color),
                SgrCode::Background(color) => color_seq(ColorTarget::Background, color),
            }
        }
    }

    fn color_seq(target: ColorTarget, color: Color) -> EscapeSequence {
        match color {
            Color::Basic(slot) => indexed16(target, slot),
            Color::Ansi256(index) => indexed256(target, index),
            Color::Rgb(red, green, blue) => truecolor(target, red, green, blue),
        }
    }

    impl Display for SgrCode {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result { f.write_str(self.to_seq().as_str()) }
    }
}
