#![warn(missing_docs)]
//! StageBench Core
//!
//! The leaves of the benchmark-comparison harness: backend launch
//! definitions, executable resolution, metric-line parsing, and the
//! blocking subprocess runner that ties them together.
//!
//! The compositor under test is an external collaborator. It accepts
//! `--benchmark <config>` and prints a single marker line to stdout:
//!
//! ```text
//! BENCHMARK: n:600 avg:12.3 max:20.1
//! ```
//!
//! Only the `avg` token is consumed here.

mod backend;
mod metric;
mod resolve;
mod runner;

pub use backend::{BENCHMARK_FLAG, Backend, BackendKind};
pub use metric::{BENCHMARK_MARKER, MetricLine, extract_avg};
pub use resolve::ExecutableResolver;
pub use runner::{BackendRunner, DEFAULT_RUNTIME_DIR, RUNTIME_DIR_VAR, RunnerError};
