//! Callee names that are never rewritten, even when undefined.
//!
//! Downstream consumers understand these natively, so stubbing them out
//! would lose semantics rather than recover them.

pub const LEAVE_CALLS: &[&str] = &[
    "__assert_fail",
    "abort",
    "klee_make_symbolic",
    "klee_assume",
    "klee_abort",
    "klee_silent_exit",
    "klee_report_error",
    "klee_warning_once",
    "exit",
    "_exit",
    "malloc",
    "calloc",
    "realloc",
    "free",
    "memset",
    "memcmp",
    "memcpy",
    "memmove",
    "kzalloc",
    "__errno_location",
];

/// Calls to symbols with this prefix are verifier hooks and are kept as-is.
pub const RESERVED_PREFIX: &str = "__VERIFIER_";

pub fn contains(name: &str) -> bool {
    LEAVE_CALLS.contains(&name)
}

/// Returns `true` if calls to `name` must be left untouched.
pub fn is_exempt(name: &str) -> bool {
    name == "nondet_int"
        || name == "klee_int"
        || contains(name)
        || name.starts_with(RESERVED_PREFIX)
}
