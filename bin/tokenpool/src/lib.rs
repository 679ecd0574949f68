//! Command line surface of the token pool transaction builder.
//!
//! Parses arguments, reads JSON parameter documents, runs them through [`tokenpool_ops`] and
//! writes raw call data or a Safe batch document.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cmd;
pub use cmd::*;

mod error;
pub use error::*;

mod io;
pub use io::*;

mod logging;
pub use logging::*;

mod predict;
pub use predict::*;

mod deploy;
pub use deploy::*;

mod ops;
pub use ops::*;
