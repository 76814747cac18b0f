pub mod aggregate;
pub mod diagnostic; // Per-report artifact dump (ARHEALTH_DUMP_DIR)
pub mod extraction;
pub mod parsing;
pub mod processor;
