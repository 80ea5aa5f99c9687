//! Interrupt pipeline: the canonical 256-entry vector table in, trap entry
//! stubs and the IDT pointer array out. Invoked with no arguments from the
//! OS tree root.

use std::path::Path;

use anyhow::Result;

use tablegen_core::emit::{emit_pointer_table, emit_stub_table};
use tablegen_core::registry::VectorTable;
use tablegen_core::writer::{write_all, Artifact};

/// Trap entry stubs, assembled into the kernel.
const STUBS_PATH: &str = "kernel/vectors.asm";

/// Pointer array the IDT installer walks.
const TABLE_PATH: &str = "kernel/vector_table.asm";

fn generate(root: impl AsRef<Path>) -> Result<()> {
    let root = root.as_ref();
    let table = VectorTable::x86();
    log::info!("emitting {} interrupt vectors", table.vectors().len());

    // both texts exist in full before the first write
    let stubs = emit_stub_table(&table);
    let pointers = emit_pointer_table(&table);
    write_all(&[
        Artifact::new(root.join(STUBS_PATH), stubs),
        Artifact::new(root.join(TABLE_PATH), pointers),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_root(name: &str) -> std::path::PathBuf {
        let root = std::env::temp_dir().join("vector-gen-tests").join(name);
        std::fs::create_dir_all(root.join("kernel")).unwrap();
        root
    }

    #[test]
    fn generates_both_artifacts() -> Result<()> {
        let root = scratch_root("generates");
        generate(&root)?;

        let stubs = std::fs::read_to_string(root.join(STUBS_PATH))?;
        assert_eq!(stubs.matches("jmp alltraps_entry").count(), 256);
        // double fault carries a hardware error code, divide error does not
        assert!(stubs.contains("intr_vec_8:\n    push 8\n"));
        assert!(stubs.contains("intr_vec_0:\n    push 0\n    push 0\n"));

        let pointers = std::fs::read_to_string(root.join(TABLE_PATH))?;
        assert_eq!(pointers.matches("\ndd intr_vec_").count(), 256);
        assert!(pointers.contains("global vectors\nvectors:\ndd intr_vec_0\n"));
        Ok(())
    }

    #[test]
    fn reruns_are_byte_identical() -> Result<()> {
        let root = scratch_root("idempotent");
        generate(&root)?;
        let stubs = std::fs::read(root.join(STUBS_PATH))?;
        let pointers = std::fs::read(root.join(TABLE_PATH))?;

        generate(&root)?;
        assert_eq!(std::fs::read(root.join(STUBS_PATH))?, stubs);
        assert_eq!(std::fs::read(root.join(TABLE_PATH))?, pointers);
        Ok(())
    }

    #[test]
    fn missing_kernel_directory_fails() {
        let root = std::env::temp_dir()
            .join("vector-gen-tests")
            .join("missing_dir_root");
        std::fs::create_dir_all(&root).unwrap();
        // no kernel/ subdirectory on purpose
        assert!(generate(&root).is_err());
    }
}
