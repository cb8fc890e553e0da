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

//! # termtint
//!
//! Generate ANSI/VT escape sequences for colored and styled terminal output,
//! and decide — per output stream — whether those sequences should actually
//! be written.
//!
//! 1. 🎨 Colors in all three depths: the 16-color named slots, the 256-color
//!    palette, and 24-bit truecolor (including `#RGB` / `#RRGGBB` hex
//!    parsing that also works in `const` contexts).
//! 2. ✏️ Text attributes (bold, italic, underline, …), global reset, clear
//!    screen, and window-title commands.
//! 3. 🚦 A per-stream emission policy (`force` / `never` / `auto`): under
//!    `auto`, sequences reach live terminals and are suppressed for files
//!    and pipes, so redirected output never collects raw escape bytes.
//! 4. 🪟 One-call, idempotent enablement of ANSI interpretation on legacy
//!    Windows consoles.
//!
//! # Example usage:
//!
//! ```rust
//! use termtint::*;
//!
//! // Opt in once; a no-op success everywhere but legacy Windows consoles.
//! enable_ansi_support();
//!
//! // Raw sequences for any depth.
//! assert_eq!(
//!     indexed16(ColorTarget::Foreground, BasicColor::Red).as_str(),
//!     "\x1b[31m"
//! );
//! assert_eq!(
//!     truecolor_from_hex(ColorTarget::Background, "#FFFF00").as_str(),
//!     "\x1b[48;2;255;255;0m"
//! );
//!
//! // Styled text; decorations reach the terminal, never your log files.
//! green("compiled successfully").println();
//! red("assertion failed").eprintln();
//!
//! // A string that stays decorated wherever it ends up.
//! let banner = bold("RELEASE").to_ansi_string();
//! assert!(banner.starts_with('\x1b'));
//! ```
//!
//! The emission decision is made against an [EmissionContext] — one implicit
//! instance per thread (see [thread_context]), or an explicit value passed
//! to [EmissionContext::write_seq] where injection matters (tests, custom
//! sinks).

pub mod color;
pub mod control;
pub mod emission_policy;
pub mod escape_sequence;
pub mod sgr_code;
pub mod styled_text;
pub mod terminal_support;

pub use color::*;
pub use control::*;
pub use emission_policy::*;
#[allow(ambiguous_glob_reexports)]
pub use escape_sequence::*;
pub use sgr_code::*;
#[allow(ambiguous_glob_reexports)]
pub use styled_text::*;
pub use terminal_support::*;
