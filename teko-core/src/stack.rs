// teko-core - Host stack growth for nested evaluation
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Stack safety for deep non-tail recursion.
//!
//! Every nested `eval` runs inside [`ensure_sufficient_stack`], so the host
//! stack grows on demand and the configurable eval depth limit is what
//! actually bounds recursion.

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
