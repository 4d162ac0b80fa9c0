//! Template evaluation engine for recordsmith.
//!
//! A template is a JSON object whose string values may carry `_go:`
//! directives. This crate classifies those values into typed fields once and
//! then materializes fresh records from them on demand.

pub mod clock;
pub mod engine;
pub mod errors;
pub mod fields;
pub mod generators;
pub mod keywords;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{Processor, ProcessorBuilder, Records, evaluate_record};
pub use errors::{Result, TemplateError};
pub use fields::{EvalContext, Field, FieldSet, FieldValue};
pub use keywords::KeywordRegistry;
pub use model::{GeneratorOptions, MarkerPolicy, UuidMode};
pub use parser::TemplateParser;
