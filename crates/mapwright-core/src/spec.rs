//! The assembled mapper spec tree.
//!
//! Produced by [`crate::assemble`], consumed read-only by [`crate::synth`].
//! Order is significant everywhere: mappers, functions, parameters and
//! directives keep the order they had in the annotated source.

use serde::Serialize;

/// All mappers found in one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapperFile {
    /// Module name of the input file (its file stem).
    pub module: String,

    pub mappers: Vec<Mapper>,
}

impl MapperFile {
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}

/// One annotated trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapper {
    pub name: String,
    pub functions: Vec<Function>,
}

/// One method of a mapper trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,

    /// Verbatim generic parameter list such as `<T: Clone>`.
    pub generics: Option<String>,

    pub parameters: Vec<Parameter>,

    /// Verbatim text of the single result type.
    pub result: String,

    /// Verbatim `where` clause, including the keyword.
    pub where_clause: Option<String>,

    pub directives: Vec<Directive>,
}

/// A named method parameter with its verbatim type text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// How one target field of a function's result is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Copy a value straight across.
    Link { source: Source, target: Target },

    /// Call `function` on the generated type with `sources` as arguments.
    LinkFunc {
        sources: Vec<Source>,
        function: String,
        target: Target,
    },

    /// Leave the target out, but say so in the generated code.
    Ignore { target: Target },
}

impl Directive {
    pub fn target(&self) -> &Target {
        match self {
            Directive::Link { target, .. }
            | Directive::LinkFunc { target, .. }
            | Directive::Ignore { target } => target,
        }
    }
}

/// A function parameter, optionally narrowed to one of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub parameter: String,

    /// `None` means the whole parameter value.
    pub field: Option<String>,
}

impl Source {
    pub fn parameter(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            field: None,
        }
    }

    pub fn field(parameter: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            field: Some(field.into()),
        }
    }

    /// Expression text reading this source: `param` or `param.field`.
    pub fn expression(&self) -> String {
        match &self.field {
            Some(field) => format!("{}.{}", self.parameter, field),
            None => self.parameter.clone(),
        }
    }
}

/// A field on a function's result type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub field: String,
}

impl Target {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}
