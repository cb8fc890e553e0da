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

//! Per-stream decision of whether escape sequences are written or suppressed.
//!
//! Each stream role carries its own [EmissionPolicy]; under `Auto` the cached
//! TTY status decides. The cache is probed at construction and on explicit
//! [EmissionContext::refresh_tty] calls only, so [EmissionContext::should_emit]
//! is a pure read that cannot block or fail.

use std::env;

/// The stream a write is headed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
    /// Anything that is not one of the two standard streams: files, pipes,
    /// in-memory buffers. Never a TTY under `Auto`.
    Other,
}

/// Whether escape sequences should be written to a stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmissionPolicy {
    /// Always write them.
    Force,
    /// Never write them.
    Never,
    /// Write them iff the stream is a live interactive terminal.
    #[default]
    Auto,
}

/// One execution context's emission configuration: a policy per stream role
/// plus the cached TTY flags for the standard streams.
///
/// This is a plain value; pass it explicitly where testability matters, or
/// use the per-thread implicit instance in [thread_context].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmissionContext {
    pub stdout_policy: EmissionPolicy,
    pub stderr_policy: EmissionPolicy,
    pub other_policy: EmissionPolicy,
    pub stdout_is_tty: bool,
    pub stderr_is_tty: bool,
}

impl Default for EmissionContext {
    fn default() -> Self { Self::detect() }
}

impl EmissionContext {
    /// All policies `Auto`; TTY status probed once, right now.
    pub fn detect() -> Self {
        Self {
            stdout_policy: EmissionPolicy::Auto,
            stderr_policy: EmissionPolicy::Auto,
            other_policy: EmissionPolicy::Auto,
            stdout_is_tty: helpers::is_a_tty(Stream::Stdout),
            stderr_is_tty: helpers::is_a_tty(Stream::Stderr),
        }
    }

    /// [Self::detect], then policy defaults derived from the environment:
    /// `NO_COLOR` (set and not `"0"`) or `TERM=dumb` turn every stream to
    /// `Never`; otherwise `CLICOLOR_FORCE` (set and not `"0"`) or a CI
    /// environment force the standard streams (CI log collectors render
    /// ANSI even though the streams are pipes there).
    ///
    /// Explicit policy assignment after construction always wins.
    pub fn from_env() -> Self {
        let mut context = Self::detect();
        if helpers::env_no_color() || helpers::term_is_dumb() {
            context.stdout_policy = EmissionPolicy::Never;
            context.stderr_policy = EmissionPolicy::Never;
            context.other_policy = EmissionPolicy::Never;
        } else if helpers::env_clicolor_force() || is_ci::uncached() {
            context.stdout_policy = EmissionPolicy::Force;
            context.stderr_policy = EmissionPolicy::Force;
        }
        context
    }

    /// Re-probes the TTY status of both standard streams (eg after the
    /// program redirected one of them).
    pub fn refresh_tty(&mut self) {
        self.stdout_is_tty = helpers::is_a_tty(Stream::Stdout);
        self.stderr_is_tty = helpers::is_a_tty(Stream::Stderr);
    }

    pub const fn policy(&self, stream: Stream) -> EmissionPolicy {
        match stream {
            Stream::Stdout => self.stdout_policy,
            Stream::Stderr => self.stderr_policy,
            Stream::Other => self.other_policy,
        }
    }

    pub fn set_policy(&mut self, stream: Stream, policy: EmissionPolicy) {
        match stream {
            Stream::Stdout => self.stdout_policy = policy,
            Stream::Stderr => self.stderr_policy = policy,
            Stream::Other => self.other_policy = policy,
        }
    }

    /// Cached TTY status; [Stream::Other] is never a TTY.
    pub const fn is_tty(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => self.stdout_is_tty,
            Stream::Stderr => self.stderr_is_tty,
            Stream::Other => false,
        }
    }

    /// Pure read of policy plus cached TTY state. Performs no I/O.
    pub const fn should_emit(&self, stream: Stream) -> bool {
        match self.policy(stream) {
            EmissionPolicy::Force => true,
            EmissionPolicy::Never => false,
            EmissionPolicy::Auto => self.is_tty(stream),
        }
    }

    /// Writes the raw sequence bytes iff [Self::should_emit] allows it.
    /// The visible text around a sequence is the caller's to write either
    /// way; only the decoration is suppressed.
    pub fn write_seq(
        &self,
        out: &mut impl std::io::Write,
        stream: Stream,
        seq: &crate::EscapeSequence,
    ) -> std::io::Result<()> {
        if self.should_emit(stream) {
            out.write_all(seq.as_bytes())?;
        }
        Ok(())
    }
}

/// [EmissionContext::write_seq] against the calling thread's implicit
/// context.
pub fn write_seq(
    out: &mut impl std::io::Write,
    stream: Stream,
    seq: &crate::EscapeSequence,
) -> std::io::Result<()> {
    thread_context::get().write_seq(out, stream, seq)
}

/// The implicit [EmissionContext], one instance per thread.
///
/// Per-thread rather than process-global so that [with_policy]'s temporary
/// override cannot race another thread's emission decisions. Tests that use
/// these functions therefore need no serialization; tests that mutate the
/// process environment still do.
pub mod thread_context {
    use std::cell::Cell;

    use super::*;

    thread_local! {
        static CONTEXT: Cell<EmissionContext> = Cell::new(EmissionContext::detect());
    }

    pub fn get() -> EmissionContext { CONTEXT.with(|cell| cell.get()) }

    pub fn set(context: EmissionContext) {
        CONTEXT.with(|cell| cell.set(context));
    }

    pub fn set_policy(stream: Stream, policy: EmissionPolicy) {
        let mut context = get();
        context.set_policy(stream, policy);
        set(context);
    }

    pub fn refresh_tty() {
        let mut context = get();
        context.refresh_tty();
        set(context);
    }

    pub fn should_emit(stream: Stream) -> bool { get().should_emit(stream) }

    /// Runs `action` with `policy` applied to `stream`, restoring the prior
    /// policy on every exit path, including unwinding.
    pub fn with_policy<R>(
        stream: Stream,
        policy: EmissionPolicy,
        action: impl FnOnce() -> R,
    ) -> R {
        let _restore = PolicyGuard::swap_in(stream, policy);
        action()
    }

    struct PolicyGuard {
        stream: Stream,
        prior: EmissionPolicy,
    }

    impl PolicyGuard {
        fn swap_in(stream: Stream, policy: EmissionPolicy) -> Self {
            let prior = get().policy(stream);
            set_policy(stream, policy);
            Self { stream, prior }
        }
    }

    impl Drop for PolicyGuard {
        fn drop(&mut self) { set_policy(self.stream, self.prior); }
    }
}

mod helpers {
    use super::*;

    pub fn is_a_tty(stream: Stream) -> bool {
        use is_terminal::IsTerminal as _;
        match stream {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
            Stream::Other => false,
        }
    }

    pub fn env_no_color() -> bool {
        match as_str(&env::var("NO_COLOR")) {
            Ok("0") | Err(_) => false,
            Ok(_) => true,
        }
    }

    pub fn env_clicolor_force() -> bool {
        env::var("CLICOLOR_FORCE").is_ok_and(|value| value != "0")
    }

    pub fn term_is_dumb() -> bool { as_str(&env::var("TERM")) == Ok("dumb") }
}

fn as_str<E>(result: &Result<String, E>) -> Result<&str, &E> {
    match result {
        Ok(inner) => Ok(inner),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use test_case::test_case;

    use super::*;
    use crate::{BasicColor, ColorTarget, indexed16};

    fn context_with(policy: EmissionPolicy, tty: bool) -> EmissionContext {
        EmissionContext {
            stdout_policy: policy,
            stderr_policy: policy,
            other_policy: policy,
            stdout_is_tty: tty,
            stderr_is_tty: tty,
        }
    }

    #[test_case(EmissionPolicy::Force, false => true)]
    #[test_case(EmissionPolicy::Force, true => true)]
    #[test_case(EmissionPolicy::Never, false => false)]
    #[test_case(EmissionPolicy::Never, true => false)]
    #[test_case(EmissionPolicy::Auto, false => false)]
    #[test_case(EmissionPolicy::Auto, true => true)]
    fn decision_table(policy: EmissionPolicy, tty: bool) -> bool {
        let context = context_with(policy, tty);
        let stdout = context.should_emit(Stream::Stdout);
        let stderr = context.should_emit(Stream::Stderr);
        assert_eq!(stdout, stderr);
        stdout
    }

    #[test]
    fn other_streams_are_never_a_tty() {
        let context = context_with(EmissionPolicy::Auto, true);
        assert!(!context.should_emit(Stream::Other));
        assert!(!context.is_tty(Stream::Other));

        let forced = context_with(EmissionPolicy::Force, false);
        assert!(forced.should_emit(Stream::Other));
    }

    #[test]
    fn policies_default_to_auto() {
        let context = EmissionContext::detect();
        assert_eq!(context.policy(Stream::Stdout), EmissionPolicy::Auto);
        assert_eq!(context.policy(Stream::Stderr), EmissionPolicy::Auto);
        assert_eq!(context.policy(Stream::Other), EmissionPolicy::Auto);
    }

    #[test]
    fn set_policy_targets_one_stream() {
        let mut context = context_with(EmissionPolicy::Auto, false);
        context.set_policy(Stream::Stderr, EmissionPolicy::Force);
        assert_eq!(context.policy(Stream::Stderr), EmissionPolicy::Force);
        assert_eq!(context.policy(Stream::Stdout), EmissionPolicy::Auto);
        assert_eq!(context.policy(Stream::Other), EmissionPolicy::Auto);
    }

    #[test]
    fn write_seq_suppresses_but_never_rewrites() {
        let seq = indexed16(ColorTarget::Foreground, BasicColor::Red);

        let mut sink = Vec::new();
        context_with(EmissionPolicy::Never, true)
            .write_seq(&mut sink, Stream::Stdout, &seq)
            .unwrap();
        assert_eq!(sink, b"");

        let mut sink = Vec::new();
        context_with(EmissionPolicy::Force, false)
            .write_seq(&mut sink, Stream::Stdout, &seq)
            .unwrap();
        assert_eq!(sink, b"\x1b[31m");
    }

    #[test]
    fn thread_context_write_seq_follows_policy() {
        let seq = indexed16(ColorTarget::Background, BasicColor::Blue);
        thread_context::set(context_with(EmissionPolicy::Force, false));

        let mut sink = Vec::new();
        write_seq(&mut sink, Stream::Other, &seq).unwrap();
        assert_eq!(sink, b"\x1b[44m");

        thread_context::set_policy(Stream::Other, EmissionPolicy::Never);
        let mut sink = Vec::new();
        write_seq(&mut sink, Stream::Other, &seq).unwrap();
        assert_eq!(sink, b"");
    }

    #[test]
    fn with_policy_restores_prior_policy() {
        thread_context::set(context_with(EmissionPolicy::Auto, false));
        let emitted = thread_context::with_policy(
            Stream::Stdout,
            EmissionPolicy::Force,
            || thread_context::should_emit(Stream::Stdout),
        );
        assert!(emitted);
        assert_eq!(
            thread_context::get().policy(Stream::Stdout),
            EmissionPolicy::Auto
        );
    }

    #[test]
    fn with_policy_restores_across_unwinding() {
        thread_context::set(context_with(EmissionPolicy::Never, false));
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            thread_context::with_policy(Stream::Stderr, EmissionPolicy::Force, || {
                panic!("boom")
            })
        }));
        assert!(outcome.is_err());
        assert_eq!(
            thread_context::get().policy(Stream::Stderr),
            EmissionPolicy::Never
        );
    }

    mod env_tests {
        use super::*;

        /// Applies the overrides, runs the assertion, restores the prior
        /// environment even if the assertion panics.
        fn with_env(overrides: &[(&str, Option<&str>)], action: impl FnOnce()) {
            let saved: Vec<(String, Option<String>)> = overrides
                .iter()
                .map(|(key, _)| ((*key).to_string(), env::var(key).ok()))
                .collect();
            for (key, value) in overrides {
                match value {
                    Some(value) => unsafe { env::set_var(key, value) },
                    None => unsafe { env::remove_var(key) },
                }
            }
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(action));
            for (key, value) in saved {
                match value {
                    Some(value) => unsafe { env::set_var(&key, value) },
                    None => unsafe { env::remove_var(&key) },
                }
            }
            if let Err(panic) = outcome {
                std::panic::resume_unwind(panic);
            }
        }

        #[test]
        #[serial]
        fn no_color_turns_every_stream_off() {
            with_env(
                &[
                    ("NO_COLOR", Some("1")),
                    ("TERM", Some("xterm-256color")),
                    ("CLICOLOR_FORCE", None),
                ],
                || {
                    let context = EmissionContext::from_env();
                    assert_eq!(context.policy(Stream::Stdout), EmissionPolicy::Never);
                    assert_eq!(context.policy(Stream::Stderr), EmissionPolicy::Never);
                    assert_eq!(context.policy(Stream::Other), EmissionPolicy::Never);
                },
            );
        }

        #[test]
        #[serial]
        fn no_color_zero_counts_as_unset() {
            with_env(
                &[("NO_COLOR", Some("0")), ("TERM", Some("xterm-256color"))],
                || {
                    let context = EmissionContext::from_env();
                    assert!(context.policy(Stream::Stdout) != EmissionPolicy::Never);
                },
            );
        }

        #[test]
        #[serial]
        fn dumb_terminal_turns_every_stream_off() {
            with_env(
                &[("NO_COLOR", None), ("TERM", Some("dumb"))],
                || {
                    let context = EmissionContext::from_env();
                    assert_eq!(context.policy(Stream::Stdout), EmissionPolicy::Never);
                    assert_eq!(context.policy(Stream::Other), EmissionPolicy::Never);
                },
            );
        }

        #[test]
        #[serial]
        fn clicolor_force_wins_over_missing_tty() {
            with_env(
                &[
                    ("NO_COLOR", None),
                    ("TERM", Some("xterm-256color")),
                    ("CLICOLOR_FORCE", Some("1")),
                ],
                || {
                    let context = EmissionContext::from_env();
                    assert_eq!(context.policy(Stream::Stdout), EmissionPolicy::Force);
                    assert_eq!(context.policy(Stream::Stderr), EmissionPolicy::Force);
                    assert_eq!(context.policy(Stream::Other), EmissionPolicy::Auto);
                    assert!(context.should_emit(Stream::Stdout));
                },
            );
        }

        #[test]
        #[serial]
        fn no_color_beats_clicolor_force() {
            with_env(
                &[
                    ("NO_COLOR", Some("1")),
                    ("TERM", Some("xterm-256color")),
                    ("CLICOLOR_FORCE", Some("1")),
                ],
                || {
                    let context = EmissionContext::from_env();
                    assert_eq!(context.policy(Stream::Stdout), EmissionPolicy::Never);
                },
            );
        }
    }
}
