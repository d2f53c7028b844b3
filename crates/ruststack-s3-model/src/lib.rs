//! Auto-generated from AWS S3 Smithy model. DO NOT EDIT.
#![allow(clippy::too_many_lines)]
#![allow(clippy::struct_excessive_bools)]
#![allow(missing_docs)]

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod request;
pub mod types;

pub use error::{S3Error, S3ErrorCode};
pub use operations::S3Operation;
pub use request::{Credentials, S3Request, StreamingBlob};

// Generated: 70 operations, 43 enums, 77 shared structs, 70 input structs, 47 output structs
