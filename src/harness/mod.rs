//! Bridge program generation.
//!
//! The harness is a tiny cgo `main` package that imports the target package
//! and exports a single C entry point for the fuzzing engine. Each call hands
//! the raw input buffer to the target's fuzz function as a `[]byte` of
//! exactly the given length, without copying it.

pub mod file;

use std::fmt::Write;

pub use file::{HarnessError, HarnessFile};

/// C symbol the fuzzing engine calls for every input.
pub const EXPORT_SYMBOL: &str = "LPBMutatorTestOneInput";

/// Local name the target package is imported under.
pub const TARGET_ALIAS: &str = "target";

/// Render the harness source for `import_path` and the entry function `func`.
///
/// `func` is assumed to be an exported identifier; it appears exactly once,
/// at the call site.
pub fn generate(import_path: &str, func: &str) -> String {
    format!(
        r#"// Code generated by fuzzbuild; DO NOT EDIT.

//go:build ignore
// +build ignore

package main

import (
	"unsafe"

	{alias} {path}
)

// #include <stdint.h>
import "C"

//export {symbol}
func {symbol}(data *C.char, size C.size_t) C.int {{
	s := unsafe.Slice((*byte)(unsafe.Pointer(data)), int(size))
	{alias}.{func}(s)
	return 0
}}

func main() {{
}}
"#,
        alias = TARGET_ALIAS,
        path = go_quote(import_path),
        symbol = EXPORT_SYMBOL,
        func = func,
    )
}

/// Quote `s` as a Go interpreted string literal.
fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
