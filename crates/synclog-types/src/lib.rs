pub mod document;
pub mod domain;
pub mod error;
pub mod extra;

pub use domain::*;
pub use error::{Error, Result};
pub use extra::{ExtraData, Value};
