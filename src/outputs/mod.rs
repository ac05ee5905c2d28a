//! Output generation for query results.
//!
//! # Submodules
//!
//! - [`console`]: prints each query's ranking to stdout
//! - [`json`]: writes a JSON report per query when an output directory is given
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 101502_q1.json
//!     └── 101507_q2.json
//! ```

pub mod console;
pub mod json;
