//! # Regress Synth
//!
//! Turns a failing-submission report into a standalone regression harness for
//! a single-method source unit.
//!
//! ## Pipeline
//!
//! ```text
//! Source text
//!     │
//!     ├──> SourceNormalizer
//!     │    └─> default `return` inserted into non-void methods lacking one
//!     │
//!     ├──> SignatureExtractor → MethodSignature
//!     │
//! Report table (JSON)
//!     │
//!     ├──> ResultTableParser → failing ReportRow[]
//!     │
//!     ├──> ParameterCodec / ResultCodec (driven by TypeDescriptor)
//!     │    └─> TestCase { argument literals, expected literal, comparison }
//!     │
//!     └──> HarnessEmitter → GeneratedArtifact
//! ```
//!
//! Recoverable problems (a row without an actual value, an unhandled type)
//! never abort the run; they are collected as [`SynthWarning`]s, mirrored to
//! the `log` facade and handed back with the result.
//!
//! ## Example
//!
//! ```rust
//! use regress_synth::{ReportTable, SynthConfig, Synthesizer};
//!
//! let synthesizer = Synthesizer::new(SynthConfig::default()).unwrap();
//! let table = ReportTable::from_json(
//!     r#"{"rows":[{"cells":[{"text":"1"},{"text":"fail"},{"pre_blocks":["3","1 1"]}]}]}"#,
//! )
//! .unwrap();
//!
//! let synthesis = synthesizer
//!     .synthesize("public int sum(int a, int b) { int c = a + b; }", &table)
//!     .unwrap();
//! assert!(synthesis.normalized.contains("return 0;"));
//! assert!(synthesis.artifact.text.contains("pass = sum(1, 1) == 3;"));
//! ```

mod codec;
mod config;
mod diagnostics;
mod emitter;
mod error;
mod normalizer;
mod pipeline;
mod report;
mod signature;
mod structure;
mod types;

pub use codec::{split_parameters, ParameterCodec, ResultCodec};
pub use config::SynthConfig;
pub use diagnostics::Diagnostics;
pub use emitter::HarnessEmitter;
pub use error::{Result, SynthError, SynthWarning};
pub use normalizer::SourceNormalizer;
pub use pipeline::{Generation, Synthesis, Synthesizer};
pub use report::{ReportTable, ResultTableParser, TableCell, TableRow};
pub use signature::SignatureExtractor;
pub use structure::{BinaryTree, LinkedListLiteral, TreeNode};
pub use types::{
    ComparisonStrategy, GeneratedArtifact, MethodSignature, PrimitiveKind, ReportRow, TestCase,
    TypeDescriptor,
};
