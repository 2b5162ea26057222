//! Service layer containing the validation engine and side-effect helpers.
//!
//! ## Service map
//! - `invoker.rs` — one bounded external call to the decision procedure.
//! - `normalize.rs` — raw invocation result to canonical decision.
//! - `consistency.rs` — pairwise decision comparison.
//! - `artifacts.rs` — read-only policy/schema artifact access.
//! - `engine.rs` — request construction + sequential pair orchestration.
//! - `storage.rs` — best-effort audit log.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod artifacts;
pub mod consistency;
pub mod engine;
pub mod invoker;
pub mod normalize;
pub mod output;
pub mod storage;
