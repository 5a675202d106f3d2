//! JSON Typedef Checker
//!
//! Validates JSON documents against lightweight JSON-encoded typedef schemas
//! with primitive types, nested objects, lists, optional fields and
//! locally scoped type aliases.
//!
//! ## Layout
//!
//! ```text
//! fixtures/
//! ├── user.typedef.json   <- typedef
//! ├── user.json           <- data checked against it
//! └── nested/
//!     ├── tree.typedef.json
//!     └── tree.json
//! ```
//!
//! ## Example
//!
//! ```
//! use typedef_check::{SchemaNode, Severity, validate};
//!
//! let schema: SchemaNode = r#"{
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } }
//! }"#.parse().unwrap();
//!
//! let report = validate(&schema, &serde_json::json!({ "name": 7 }));
//! assert!(!report.passed());
//! assert_eq!(report.findings[0].severity, Severity::Error);
//! assert_eq!(report.findings[0].message, "expected string at .name");
//! ```

pub mod check;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod schema;
pub mod scope;
pub mod validator;

pub use check::{
    check_bytes, check_directory, check_pair, PairOutcome, PairStatus, RunSummary, TextReport,
};
pub use config::{CheckConfig, OutputFormat};
pub use diagnostics::{DiagnosticSink, Severity, ValidationFinding, ValidationReport};
pub use discovery::{data_file_for, discover_pairs, find_typedef_files, FilePair};
pub use error::{Result, TypedefError};
pub use schema::{Property, SchemaKind, SchemaNode};
pub use scope::DefinitionScope;
pub use validator::{validate, Validator, ValidatorOptions};
