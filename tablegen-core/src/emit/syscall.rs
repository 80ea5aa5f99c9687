//! Syscall pipeline: the kernel-side number header and the user-space
//! trampolines. The two artifacts must agree on every number; both read the
//! same validated table, and the header value for an entry is the literal
//! its trampoline loads into `eax`.

use crate::registry::{SyscallEntry, SyscallTable};

/// Argument registers of the `int 0x80` convention, in parameter order.
const ARG_REGISTERS: [&str; 3] = ["ebx", "ecx", "edx"];

const GUARD: &str = "_KERNEL_SYSCALL_H";

#[derive(thiserror::Error, Debug)]
pub enum EmitError {
    #[error("syscall {name} wants argument {position} in a register, only {max} argument registers exist", max = ARG_REGISTERS.len())]
    NoArgRegister { name: String, position: usize },
}

/// Render the kernel-side header of `SYS_*` constants.
///
/// Values are column-aligned on the longest syscall name, the way the
/// kernel tree formats this header. The guard makes the block safe to
/// include from both the kernel and the C library.
pub fn emit_header(table: &SyscallTable) -> String {
    let width = table
        .entries()
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("#ifndef {}\n#define {}\n\n", GUARD, GUARD));
    for entry in table.entries() {
        out.push_str(&format!(
            "#define SYS_{name:<width$} {id}\n",
            name = entry.name,
            id = entry.id,
            width = width
        ));
    }
    out.push_str(&format!("\n#endif /* {} */\n", GUARD));
    out
}

/// Render every user-space trampoline, one globally-visible stub per
/// syscall, in registry order.
pub fn emit_trampolines(table: &SyscallTable) -> Result<String, EmitError> {
    let mut out = String::new();
    for entry in table.entries() {
        out.push_str(&trampoline(entry)?);
        out.push('\n');
    }
    Ok(out)
}

/// Render one trampoline: load the syscall number, marshal the caller's
/// stack arguments into the argument registers, trap into the kernel, and
/// return with the result already in `eax`.
///
/// The `$` label prefix keeps syscall names out of NASM's instruction
/// namespace (a registry is free to declare e.g. `div`).
fn trampoline(entry: &SyscallEntry) -> Result<String, EmitError> {
    let mut out = String::new();
    out.push_str("section .text\n");
    out.push_str(&format!("global {}\n", entry.name));
    out.push_str(&format!("${}:\n", entry.name));
    out.push_str(&format!("\tmov eax, {}\n", entry.id));
    for position in 0..entry.args_count as usize {
        let register = ARG_REGISTERS
            .get(position)
            .ok_or_else(|| EmitError::NoArgRegister {
                name: entry.name.clone(),
                position,
            })?;
        out.push_str(&format!(
            "\tmov {}, [esp + {}]\n",
            register,
            4 * (position + 1)
        ));
    }
    out.push_str("\tint 0x80\n");
    out.push_str("\tret\n");
    Ok(out)
}
