// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the enrichment steps (revision, author, identity, summary, repository, message)
// role: enrichment/namespace
// outputs: Public submodules, one per step of the lookup chain
// invariants: Each step isolates one external integration or one pure transformation
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod author;
pub mod identity;
pub mod message;
pub mod repository;
pub mod revision;
pub mod summary;
