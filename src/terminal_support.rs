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

//! One-time opt-in to ANSI interpretation on terminals that need it.

use std::sync::LazyLock;

static ENABLE_OUTCOME: LazyLock<bool> = LazyLock::new(platform::enable);

/// Makes the hosting terminal interpret escape sequences where that needs an
/// explicit opt-in (legacy Windows consoles); a no-op success elsewhere.
///
/// Returns whether the terminal now interprets ANSI. Idempotent: the console
/// query runs once, every later call returns the memoized outcome. On
/// failure the caller can simply keep writing plain text.
pub fn enable_ansi_support() -> bool { *ENABLE_OUTCOME }

#[cfg(windows)]
mod platform {
    use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
    use windows_sys::Win32::System::Console::{
        ENABLE_VIRTUAL_TERMINAL_PROCESSING, GetConsoleMode, GetStdHandle, SetConsoleMode,
        STD_OUTPUT_HANDLE,
    };

    pub(super) fn enable() -> bool {
        unsafe {
            let handle = GetStdHandle(STD_OUTPUT_HANDLE);
            if handle.is_null() || handle == INVALID_HANDLE_VALUE {
                return false;
            }

            let mut mode: u32 = 0;
            if GetConsoleMode(handle, &mut mode) == 0 {
                return false;
            }

            SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING) != 0
        }
    }
}

#[cfg(not(windows))]
mod platform {
    // Everything else interprets ANSI without being asked.
    pub(super) fn enable() -> bool { true }
}
