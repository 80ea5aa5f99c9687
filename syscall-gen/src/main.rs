//! Syscall pipeline: registry file in, kernel number header and user-space
//! trampolines out. Invoked with no arguments from the OS tree root.

use std::path::Path;

use anyhow::{Context, Result};

use tablegen_core::emit::{emit_header, emit_trampolines};
use tablegen_core::registry::SyscallTable;
use tablegen_core::writer::{write_all, Artifact};

/// Hand-declared registry, versioned with the OS tree.
const REGISTRY_PATH: &str = "registry/syscalls.yaml";

/// Kernel-side numbers; the dispatch array is indexed by these.
const HEADER_PATH: &str = "include/kernel/syscall.h";

/// User-space trampolines, assembled into the C library.
const TRAMPOLINES_PATH: &str = "lib/src/syscall.asm";

fn generate(root: impl AsRef<Path>) -> Result<()> {
    let root = root.as_ref();
    let registry_path = root.join(REGISTRY_PATH);
    let registry = std::fs::read_to_string(&registry_path)
        .with_context(|| format!("read {:?}", registry_path))?;
    let table =
        SyscallTable::from_yaml(&registry).with_context(|| format!("parse {:?}", registry_path))?;
    log::info!("emitting {} syscalls", table.len());

    // both texts exist in full before the first write
    let header = emit_header(&table);
    let trampolines = emit_trampolines(&table)?;
    write_all(&[
        Artifact::new(root.join(HEADER_PATH), header),
        Artifact::new(root.join(TRAMPOLINES_PATH), trampolines),
    ])?;

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = generate(".") {
        log::error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
