//! mapwright-core - Mapper code generation from annotated Rust traits
//!
//! A trait marked with `/// +mapwright:mapper` declares conversions between
//! data types. Each method's doc comments carry directives describing how
//! every field of its result is populated:
//!
//! ```text
//! /// +mapwright:mapper
//! pub trait Mapper {
//!     /// +mapwright:link:ef.title->title
//!     /// +mapwright:ignore:director
//!     /// +mapwright:linkfunc:eu->to_internal_user->user
//!     fn to_internal_user_film(&self, ef: &ExternalFilm, eu: &ExternalUser) -> InternalUserFilm;
//! }
//! ```
//!
//! This crate turns such a file into a `MapperImpl` struct whose methods
//! build the result types field by field:
//! - [`reduce`] extracts marked traits from parsed source
//! - [`directive`] parses the directive grammar
//! - [`assemble`] builds the [`MapperFile`] spec tree
//! - [`synth`] renders and formats the generated source
//! - [`pipeline`] runs the whole chain for one file

pub mod assemble;
pub mod directive;
mod error;
pub mod format;
pub mod grammar;
pub mod pipeline;
pub mod reduce;
pub mod spec;
pub mod synth;

pub use directive::parse_directive;
pub use error::{Location, MapwrightError, MapwrightResult};
pub use format::{BuiltinFormatter, FormatError, SourceFormatter};
pub use pipeline::{generate, read_spec};
pub use spec::{Directive, Function, Mapper, MapperFile, Parameter, Source, Target};
pub use synth::{Generated, RenderOptions, SynthesisError, synthesize};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BuiltinFormatter, Directive, Generated, MapperFile, MapwrightError, MapwrightResult,
        RenderOptions, SourceFormatter, generate, read_spec,
    };
}
