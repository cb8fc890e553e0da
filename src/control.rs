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

//! Screen and window control commands (the non-SGR half of the catalog).

use crate::{EscapeSequence, SeqBuilder, escape_sequence::sizing};

/// `ESC[2J` — clear the whole screen.
pub fn clear_screen() -> EscapeSequence { SeqBuilder::csi().param(2).finish('J') }

/// `ESC]2;<title>BEL` — set the window title.
///
/// The title must fit [sizing::MAX_TITLE_TEXT_LEN] bytes and must not
/// contain control bytes; violating either is a programmer error and fails
/// fast. For literal titles, [crate::window_title!] rejects oversized input
/// at compile time instead.
pub fn window_title(title: &str) -> EscapeSequence {
    assert!(
        title.len() <= sizing::MAX_TITLE_TEXT_LEN,
        "window title exceeds the fixed buffer bound"
    );
    SeqBuilder::osc().param(2).text(title).finish('\x07')
}

/// [window_title] for literal titles: the length constraint is checked while
/// the program compiles, so an oversized literal never reaches run time.
#[macro_export]
macro_rules! window_title {
    ($title:literal) => {{
        const _: () = assert!(
            $title.len() <= $crate::escape_sequence::sizing::MAX_TITLE_TEXT_LEN,
            "window title exceeds the fixed buffer bound"
        );
        $crate::window_title($title)
    }};
}
