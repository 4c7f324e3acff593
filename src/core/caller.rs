//! Caller context resolution
//!
//! Two sources are supported:
//! - the logging macros capture the enclosing function at compile time and
//!   pass it through [`caller_from_type_name`];
//! - plain method calls inspect the calling thread's stack at log time with
//!   [`resolve_caller`]. This is noticeably slower and depends on symbols being
//!   available in the binary.

use std::backtrace::{Backtrace, BacktraceStatus};

/// Frames belonging to the runtime, the unwinder or the logger itself
const INTERNAL_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "test::",
    "<std::",
    "<core::",
    "<alloc::",
    "__rust",
    concat!(env!("CARGO_CRATE_NAME"), "::core::caller::resolve_caller"),
    concat!(env!("CARGO_CRATE_NAME"), "::core::logger::Logger::"),
    concat!("<", env!("CARGO_CRATE_NAME"), "::core::logger::Logger"),
];

/// Process entry shims that never name a user function
const ENTRY_SYMBOLS: &[&str] = &[
    "main",
    "_start",
    "__libc_start_main",
    "__libc_start_call_main",
    "start_thread",
    "clone",
    "clone3",
    "BaseThreadInitThunk",
    "RtlUserThreadStart",
    "<unknown>",
];

/// Name of the function that called into the logger.
///
/// Walks the current thread's stack, ignores runtime and logger frames, then
/// skips `frames_to_skip` further frames. Returns an empty string when the
/// stack is not deep enough or cannot be captured on this platform.
pub fn resolve_caller(frames_to_skip: usize) -> String {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() != BacktraceStatus::Captured {
        return String::new();
    }

    caller_from_backtrace(&backtrace.to_string(), frames_to_skip)
}

/// Pick the caller out of a rendered backtrace
pub(crate) fn caller_from_backtrace(rendered: &str, frames_to_skip: usize) -> String {
    rendered
        .lines()
        .filter_map(frame_symbol)
        .filter(|symbol| !is_internal(symbol))
        .nth(frames_to_skip)
        .map(short_name)
        .unwrap_or_default()
}

/// Function name from the `type_name` of an item nested in it.
///
/// `app::worker::run::{{closure}}::f` gives `run`.
#[doc(hidden)]
pub fn caller_from_type_name(type_name: &str) -> String {
    let enclosing = type_name.strip_suffix("::f").unwrap_or(type_name);
    short_name(enclosing)
}

/// Extract the symbol from a `  N: symbol` backtrace line
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, rest) = line.trim_start().split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Full-format lines read `0x7f.. - symbol`
    let symbol = match rest.split_once(" - ") {
        Some((addr, symbol)) if addr.starts_with("0x") => symbol,
        _ => rest,
    };
    Some(symbol.trim())
}

fn is_internal(symbol: &str) -> bool {
    ENTRY_SYMBOLS.contains(&symbol) || INTERNAL_PREFIXES.iter().any(|p| symbol.starts_with(p))
}

/// Last path segment of a symbol, without hash, generics or closure markers
fn short_name(symbol: &str) -> String {
    let symbol = strip_hash(symbol);
    let symbol = strip_generics(symbol);

    symbol
        .rsplit("::")
        .find(|segment| !segment.is_empty() && !is_closure_segment(segment))
        .unwrap_or_default()
        .to_string()
}

fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => {
            head
        }
        _ => symbol,
    }
}

fn strip_generics(symbol: &str) -> &str {
    if !symbol.ends_with('>') {
        return symbol;
    }

    let mut depth = 0usize;
    for (idx, c) in symbol.char_indices().rev() {
        match c {
            '>' => depth += 1,
            '<' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let head = &symbol[..idx];
                    return head.strip_suffix("::").unwrap_or(head);
                }
            }
            _ => {}
        }
    }
    symbol
}

fn is_closure_segment(segment: &str) -> bool {
    segment.starts_with("{{closure}}") || segment.starts_with("{closure")
}
