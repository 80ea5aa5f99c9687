//! Core library for the kernel table generators.
//!
//! This crate holds the declarative registry model (syscalls and interrupt
//! vectors), the two emitters rendering them into C/NASM text, and the
//! whole-file artifact writer. Two workspace binaries drive it:
//! `syscall-gen` (syscall numbers + user-space trampolines) and
//! `vector-gen` (trap entry stubs + the IDT pointer array).

pub mod emit;
pub mod registry;
pub mod writer;
