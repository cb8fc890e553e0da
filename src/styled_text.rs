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

use std::fmt::{Display, Formatter, Result, Write};

use smallstr::SmallString;
use smallvec::{SmallVec, smallvec};
use strum_macros::EnumCount;

use crate::{BasicColor, Color, EmissionPolicy, SgrCode, Stream, thread_context};

/// The main struct to consider is [StyledText]. It pairs a piece of text with
/// a list of [Style] attributes, owned in a stack allocated buffer (which can
/// spill to the heap if it gets larger than
/// [sizing::MAX_STYLE_ATTRIB_SIZE]).
///
/// Rendering consults the calling thread's [crate::EmissionContext] for the
/// destination stream: the text itself is always produced, the decorations
/// (and the trailing reset) only when the context says so.
///
/// # Example usage:
///
/// ```rust
/// use termtint::*;
///
/// // Constructor functions, with chained colors.
/// let warning = yellow("disk almost full").bg((80, 0, 0));
/// warning.eprintln();
///
/// // Verbose struct construction.
/// StyledText {
///     text: "deploy finished",
///     style: smallvec::smallvec![
///         Style::Bold,
///         Style::Foreground(Color::Basic(BasicColor::Green)),
///     ],
/// }
/// .println();
///
/// // A string that stays decorated wherever it ends up (log files, ...).
/// let banner = bold("RELEASE").to_ansi_string();
/// assert!(banner.starts_with('\x1b'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText<'a> {
    pub text: &'a str,
    pub style: sizing::InlineVecStyles,
}

pub mod sizing {
    use super::*;

    /// Attributes are: color_fg, color_bg, bold, faint, italic, underline,
    /// blink, reverse, hidden, strikethrough.
    pub const MAX_STYLE_ATTRIB_SIZE: usize = 10;
    pub type InlineVecStyles = SmallVec<[Style; MAX_STYLE_ATTRIB_SIZE]>;

    /// Inline storage for one rendered styled text.
    pub const RENDERED_STORAGE_SIZE: usize = 64;
    pub type RenderedText = SmallString<[u8; RENDERED_STORAGE_SIZE]>;
}

/// One display attribute of a [StyledText].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCount)]
pub enum Style {
    Foreground(Color),
    Background(Color),
    Bold,
    Faint,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
}

mod style_impl {
    use super::*;

    impl From<Style> for SgrCode {
        #[rustfmt::skip]
        fn from(style: Style) -> Self {
            match style {
                Style::Foreground(color) => SgrCode::Foreground(color),
                Style::Background(color) => SgrCode::Background(color),
                Style::Bold              => SgrCode::Bold,
                Style::Faint             => SgrCode::Faint,
                Style::Italic            => SgrCode::Italic,
                Style::Underline         => SgrCode::Underline,
                Style::Blink             => SgrCode::Blink,
                Style::Reverse           => SgrCode::Reverse,
                Style::Hidden            => SgrCode::Hidden,
                Style::Strikethrough     => SgrCode::Strikethrough,
            }
        }
    }
}

mod styled_text_impl {
    use super::*;

    impl StyledText<'_> {
        /// Renders for the given stream per the calling thread's context:
        /// decorated when the context emits for that stream, plain text
        /// otherwise.
        pub fn render_for(&self, stream: Stream) -> sizing::RenderedText {
            let mut rendered = sizing::RenderedText::new();
            // Writing to an in-memory buffer cannot fail.
            let _ = self.write_decorated(&mut rendered, thread_context::should_emit(stream));
            rendered
        }

        /// Renders with decorations no matter where the output is headed,
        /// by scoping a `Force` policy around the one rendering path.
        pub fn to_ansi_string(&self) -> sizing::RenderedText {
            thread_context::with_policy(Stream::Stdout, EmissionPolicy::Force, || {
                self.render_for(Stream::Stdout)
            })
        }

        pub fn print(&self) {
            let rendered = self.render_for(Stream::Stdout);
            let text: &str = &rendered;
            print!("{text}");
        }

        pub fn println(&self) {
            let rendered = self.render_for(Stream::Stdout);
            let text: &str = &rendered;
            println!("{text}");
        }

        pub fn eprintln(&self) {
            let rendered = self.render_for(Stream::Stderr);
            let text: &str = &rendered;
            eprintln!("{text}");
        }

        /// Adds a foreground color attribute.
        pub fn fg(mut self, color: impl Into<Color>) -> Self {
            self.style.push(Style::Foreground(color.into()));
            self
        }

        /// Adds a background color attribute.
        pub fn bg(mut self, color: impl Into<Color>) -> Self {
            self.style.push(Style::Background(color.into()));
            self
        }

        fn write_decorated(&self, out: &mut impl Write, decorate: bool) -> Result {
            if decorate {
                for style_item in &self.style {
                    write!(out, "{}", SgrCode::from(*style_item))?;
                }
            }
            out.write_str(self.text)?;
            if decorate {
                write!(out, "{}", SgrCode::Reset)?;
            }
            Ok(())
        }
    }

    impl Display for StyledText<'_> {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            self.write_decorated(f, thread_context::should_emit(Stream::Stdout))
        }
    }
}

pub fn fg_color(arg_color: impl Into<Color>, text: &str) -> StyledText<'_> {
    StyledText {
        text,
        style: smallvec!(Style::Foreground(arg_color.into())),
    }
}

pub fn red(text: &str) -> StyledText<'_> { fg_color(BasicColor::Red, text) }

pub fn green(text: &str) -> StyledText<'_> { fg_color(BasicColor::Green, text) }

pub fn yellow(text: &str) -> StyledText<'_> { fg_color(BasicColor::Yellow, text) }

pub fn blue(text: &str) -> StyledText<'_> { fg_color(BasicColor::Blue, text) }

pub fn magenta(text: &str) -> StyledText<'_> { fg_color(BasicColor::Magenta, text) }

pub fn cyan(text: &str) -> StyledText<'_> { fg_color(BasicColor::Cyan, text) }

pub fn white(text: &str) -> StyledText<'_> { fg_color(BasicColor::White, text) }

pub fn bold(text: &str) -> StyledText<'_> {
    StyledText {
        text,
        style: smallvec!(Style::Bold),
    }
}

pub fn faint(text: &str) -> StyledText<'_> {
    StyledText {
        text,
        style: smallvec!(Style::Faint),
    }
}

pub fn italic(text: &str) -> StyledText<'_> {
    StyledText {
        text,
        style: smallvec!(Style::Italic),
    }
}

pub fn underline(text: &str) -> StyledText<'_> {
    StyledText {
        text,
        style: smallvec!(Style::Underline),
    }
}

pub fn strikethrough(text: &str) -> StyledText<'_> {
    StyledText {
        text,
        style: smallvec!(Style::Strikethrough),
    }
}
