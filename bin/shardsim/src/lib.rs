//! Library surface behind the `shardsim` binary, split out so the full
//! pack → observe → adjust → emit pipeline can be driven end to end from
//! `tests/` (mirrors the teacher's `crates/validation` split of a
//! `tests/verification.rs` integration test against an otherwise
//! bin/lib-free crate).

pub mod cli;
pub mod simulation;
