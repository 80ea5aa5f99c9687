//! Render validated registries into the textual artifacts the kernel and
//! user-space library consume. Both emitters are pure: registry in, text
//! out, no shared state.

mod syscall;
mod vectors;

pub use syscall::{emit_header, emit_trampolines, EmitError};
pub use vectors::{emit_pointer_table, emit_stub_table, ALLTRAPS_SYMBOL, VECTORS_SYMBOL};
