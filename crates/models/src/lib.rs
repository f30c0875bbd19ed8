//! Domain types for the person store: the `Person` record, request parameter
//! validation and the line codecs used by file-backed stores.

pub mod codec;
pub mod errors;
pub mod person;

pub use codec::{DottedCodec, JsonLinesCodec, RecordCodec};
pub use errors::ModelError;
pub use person::Person;
