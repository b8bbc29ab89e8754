//SPDX-License-Identifier: MIT OR Apache-2.0

//! # Nestlog Procedural Macros
//!
//! This crate provides the `#[logged]` attribute for the nestlog logging library. Use it
//! through the `nestlog` crate, which re-exports it as `nestlog::logged`.
//!
//! The expansion refers to `::nestlog`, so the `nestlog` crate must be a dependency of
//! the crate using the attribute.

use proc_macro::TokenStream;

mod logged_attr;

/// Logs a line every time the function is called.
///
/// # Syntax
///
/// ```ignore
/// #[logged("literal message")]
/// #[logged("message with {parameter} placeholders")]
/// #[logged(from_args = function_taking_call_args)]
/// #[logged("message", prefix = "OTHER", dont_advance)]
/// ```
///
/// - A string literal without `{` is logged as is.
/// - A string literal with placeholders is a [format!] string; placeholders name the
///   function's parameters (or anything else in scope).
/// - `from_args = f` calls `f(&nestlog::decorate::CallArgs) -> String` with every
///   `name: Type` parameter formatted with `Debug`.
/// - `prefix = "..."` overrides the scope prefix for this line; `dont_advance` logs it
///   without advancing the counter.
///
/// The message follows the colon protocol like any other log call.
///
/// # Sync and async functions
///
/// For a plain function the body runs nested under the message: its lines are one level
/// deeper, and the level closes when the function returns.
///
/// For an `async fn` the message is logged when the future is first polled and the body
/// is not nested. Wrap the call in `nestlog::Isolated` when such futures run
/// concurrently.
///
/// # Panics
///
/// The decorated function panics if the message breaks the nesting protocol, e.g. a
/// leading `:` at the root level.
///
/// # Examples
///
/// ```
/// #[nestlog::logged("x = {x}")]
/// fn square(x: u32) -> u32 {
///     nestlog::log("multiplying").unwrap();
///     x * x
/// }
/// assert_eq!(square(4), 16);
/// ```
///
/// ```
/// use nestlog::decorate::CallArgs;
///
/// fn describe(args: &CallArgs) -> String {
///     format!("copy {} -> {}", args.get("from").unwrap_or("?"), args.get("to").unwrap_or("?"))
/// }
///
/// #[nestlog::logged(from_args = describe, prefix = "FS")]
/// fn copy(from: &str, to: &str) -> bool {
///     from != to
/// }
/// assert!(copy("a", "b"));
/// ```
///
/// Only functions can be decorated:
/// ```compile_fail
/// #[nestlog::logged("not a function")]
/// struct S;
/// ```
#[proc_macro_attribute]
pub fn logged(attr: TokenStream, item: TokenStream) -> TokenStream {
    logged_attr::logged_attr_impl(attr, item)
}
