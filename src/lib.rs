#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! This crate is a small JSON document model with a strict, hand written recursive descent parser. Every parse error carries the line it was found on.
//!
//! ## What does it accept ?
//!
//! A deliberately restricted subset of JSON:
//!
//! - numbers are an optional `-`, an integer part without leading zeros and an optional fraction. There is no exponent
//! - strings run until the next `"`. Backslashes are kept as is, escapes are not decoded
//! - arrays and objects reject trailing commas, duplicate object keys keep the last value
//!
//! ## How to use it ?
//!
//! The crate exposes a `Value` with one variant per JSON type. Accessors come in two flavours: `as_*` returns a `TypeError` on mismatch and `try_*` returns an `Option`.
//!
//! ### Parsing
//!
//! ```rust
//! use strict_json::{parse, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let json = parse(r#"{"pairs": [[1, 2], [3, 4]]}"#)?;
//!
//!     let four = json.get("pairs")?.at(1)?.at(1)?.as_number()?;
//!     assert_eq!(four, 4.0);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Building and editing
//!
//! ```rust
//! use strict_json::{Type, Value};
//!
//! let mut config = Value::null();
//!
//! // A null value becomes an object on its first keyed write
//! *config.get_or_insert("name").unwrap() = Value::from("demo");
//! config.get_or_insert("tags").unwrap().replace(Value::array(["a", "b"]));
//!
//! assert_eq!(config.kind(), Type::Object);
//! assert_eq!(config.get("name").unwrap().as_string().unwrap(), "demo");
//!
//! let err = config.get("name").unwrap().as_number().unwrap_err();
//! assert_eq!(err.expected(), Type::Number);
//! assert_eq!(err.actual(), Type::String);
//! ```
//!
//! ### Errors
//!
//! ```rust
//! use strict_json::parse;
//!
//! let err = parse("[\n  1,\n  2,\n]").unwrap_err();
//!
//! assert_eq!(err.line, 4);
//! assert_eq!(err.to_string(), "[line:4] Unexpected character ']' in JSON input.");
//! ```

extern crate bytecount;
extern crate memchr;
extern crate nom;
extern crate serde;

mod input;
mod parser;
mod ser;

pub mod error;
pub mod profile;
pub mod value;

pub use error::{AccessError, Error, ParseError, TypeError};
pub use parser::{parse, parse_file, parse_file_profiled, parse_profiled, ParseResult};
pub use profile::Profiler;
pub use value::{Type, Value};
