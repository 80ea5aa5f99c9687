//! Declarative registries the generators consume.
//!
//! Syscall numbers and vector numbers are ABI: the kernel's dispatch array
//! and every linked user binary index by them. Both tables are therefore
//! validated up front and immutable afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Hard ceiling of the register-passing convention (`ebx`, `ecx`, `edx`).
pub const MAX_SYSCALL_ARGS: u8 = 3;

/// Number of slots in the hardware interrupt descriptor table.
pub const VECTOR_COUNT: usize = 256;

/// Exceptions for which the CPU pushes an error code itself: double fault,
/// the segment/paging fault range 10..=14, alignment check.
///
/// Architecture-defined data; checked by membership, never inferred.
pub const ERROR_CODE_VECTORS: [u8; 7] = [8, 10, 11, 12, 13, 14, 17];

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("duplicate syscall name: {name}")]
    DuplicateName { name: String },

    #[error("syscall name is not a valid identifier: {name:?}")]
    BadName { name: String },

    #[error("syscall {name} declares {args_count} arguments, at most {max} fit in registers", max = MAX_SYSCALL_ARGS)]
    TooManyArgs { name: String, args_count: u8 },

    #[error("syscall ids must count up from 0 without gaps: {name} has id {id}, expected {expected}")]
    NonContiguousId { name: String, id: u32, expected: u32 },

    #[error("interrupt table holds {count} vectors, the IDT has exactly {expected} slots", expected = VECTOR_COUNT)]
    BadVectorCount { count: usize },

    #[error("interrupt table slot {slot} holds vector {number}")]
    MisplacedVector { slot: usize, number: u8 },
}

/// One row of the syscall registry file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyscallEntry {
    pub id: u32,
    pub name: String,
    pub args_count: u8,
}

/// The published syscall registry, validated.
///
/// Ids are spelled out in the registry file and re-checked here to be
/// exactly `0..n` in declared order, so a reordered or renumbered registry
/// fails construction instead of silently renumbering every later syscall.
#[derive(Debug, Clone)]
pub struct SyscallTable {
    entries: Vec<SyscallEntry>,
}

impl SyscallTable {
    pub fn new(entries: Vec<SyscallEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for (slot, entry) in entries.iter().enumerate() {
            if !is_identifier(&entry.name) {
                return Err(RegistryError::BadName {
                    name: entry.name.clone(),
                });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(RegistryError::DuplicateName {
                    name: entry.name.clone(),
                });
            }
            if entry.args_count > MAX_SYSCALL_ARGS {
                return Err(RegistryError::TooManyArgs {
                    name: entry.name.clone(),
                    args_count: entry.args_count,
                });
            }
            if entry.id != slot as u32 {
                return Err(RegistryError::NonContiguousId {
                    name: entry.name.clone(),
                    id: entry.id,
                    expected: slot as u32,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Parse a registry file (a YAML list of entries) and validate it.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let entries: Vec<SyscallEntry> = serde_yaml::from_str(text)?;
        Ok(Self::new(entries)?)
    }

    pub fn entries(&self) -> &[SyscallEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One slot of the hardware trap/interrupt table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptVector {
    pub number: u8,
    pub has_error_code: bool,
}

/// Dense, total table of all 256 interrupt vectors, slot == number.
#[derive(Debug, Clone)]
pub struct VectorTable {
    vectors: Vec<InterruptVector>,
}

impl VectorTable {
    /// The canonical x86 table: every vector 0..=255, error-code flags
    /// taken from [`ERROR_CODE_VECTORS`].
    pub fn x86() -> Self {
        let vectors = (0..VECTOR_COUNT)
            .map(|n| InterruptVector {
                number: n as u8,
                has_error_code: ERROR_CODE_VECTORS.contains(&(n as u8)),
            })
            .collect();
        Self { vectors }
    }

    /// Validate an explicit vector list: exactly 256 slots, vector `n` in
    /// slot `n`. A gap or swap here would corrupt the stack frame the trap
    /// entry expects for every vector after the mismatch.
    pub fn new(vectors: Vec<InterruptVector>) -> Result<Self, RegistryError> {
        if vectors.len() != VECTOR_COUNT {
            return Err(RegistryError::BadVectorCount {
                count: vectors.len(),
            });
        }
        for (slot, vector) in vectors.iter().enumerate() {
            if vector.number as usize != slot {
                return Err(RegistryError::MisplacedVector {
                    slot,
                    number: vector.number,
                });
            }
        }
        Ok(Self { vectors })
    }

    pub fn vectors(&self) -> &[InterruptVector] {
        &self.vectors
    }
}
