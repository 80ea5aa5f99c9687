//! Interrupt pipeline: trap entry stubs and the pointer array the IDT
//! installer walks.
//!
//! The CPU pushes an error code for a handful of exceptions and nothing
//! for the rest. Every other vector pushes a zero placeholder, so the
//! shared trap entry always finds the same stack shape:
//! [vector number][error code][hardware-pushed frame].

use crate::registry::VectorTable;

/// Shared trap entry the kernel defines; every stub jumps here.
pub const ALLTRAPS_SYMBOL: &str = "alltraps_entry";

/// The pointer array symbol the IDT installer consumes.
pub const VECTORS_SYMBOL: &str = "vectors";

fn stub_label(number: u8) -> String {
    format!("intr_vec_{}", number)
}

/// Render one stub per vector. Stubs jump, never call: control does not
/// come back here, it leaves through the kernel's return-from-trap path.
pub fn emit_stub_table(table: &VectorTable) -> String {
    let mut out = String::new();
    out.push_str("[bits 32]\n");
    out.push_str(&format!("extern {}\n", ALLTRAPS_SYMBOL));
    for vector in table.vectors() {
        let label = stub_label(vector.number);
        out.push_str("section .text\n");
        out.push_str(&format!("global {}\n", label));
        out.push_str(&format!("{}:\n", label));
        if !vector.has_error_code {
            out.push_str("    push 0\n");
        }
        out.push_str(&format!("    push {}\n", vector.number));
        out.push_str(&format!("    jmp {}\n", ALLTRAPS_SYMBOL));
    }
    out
}

/// Render the pointer array: slot `n` holds the address of stub `n`.
///
/// The stubs live in a separate assembly unit, so each label is imported
/// before the table references it.
pub fn emit_pointer_table(table: &VectorTable) -> String {
    let mut out = String::new();
    out.push_str("[bits 32]\n");
    for vector in table.vectors() {
        out.push_str(&format!("extern {}\n", stub_label(vector.number)));
    }
    out.push_str("section .data\n");
    out.push_str(&format!("global {}\n", VECTORS_SYMBOL));
    out.push_str(&format!("{}:\n", VECTORS_SYMBOL));
    for vector in table.vectors() {
        out.push_str(&format!("dd {}\n", stub_label(vector.number)));
    }
    out
}
