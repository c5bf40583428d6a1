//! Code synthesis.
//!
//! Renders a [`MapperFile`] into Rust source: one `<Name>Impl` unit struct
//! per mapper, one method per function, one struct-expression entry per
//! directive.
//!
//! ```text
//! MapperFile
//!     ↓
//!  [render]  → text        (fails with <<<TEMPLATE ERROR: ..>>>)
//!     ↓
//!  [format]  → final text  (fails with <<<FORMAT ERROR: ..>>>)
//! ```
//!
//! Failures here are reported in-band: the caller always gets text back,
//! and a broken run yields a placeholder that is obviously not Rust.

use crate::format::SourceFormatter;
use crate::grammar;
use crate::spec::{Directive, Function, Mapper, MapperFile, Target};
use thiserror::Error;
use tracing::warn;

const INDENT: &str = "    ";

/// Options for rendering generated source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Paths emitted as `use <path>;` after the header.
    pub imports: Vec<String>,
}

/// Failure while producing generated text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// The spec tree cannot be expressed as Rust source
    #[error("TEMPLATE ERROR: {0}")]
    Template(String),

    /// The formatter rejected the rendered source
    #[error("FORMAT ERROR: {0}")]
    Format(String),
}

impl SynthesisError {
    /// Text emitted in place of the generated source.
    pub fn placeholder(&self) -> String {
        format!("<<<{self}>>>\n")
    }
}

/// Output of one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    text: String,
    error: Option<SynthesisError>,
}

impl Generated {
    fn ok(text: String) -> Self {
        Self { text, error: None }
    }

    fn failed(error: SynthesisError) -> Self {
        warn!(%error, "code synthesis failed");
        Self {
            text: error.placeholder(),
            error: Some(error),
        }
    }

    /// Generated source, or the error placeholder.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn error(&self) -> Option<&SynthesisError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Render and format a spec tree.
///
/// Returns `None` when the file has no mappers: there is nothing to write.
pub fn synthesize(
    file: &MapperFile,
    options: &RenderOptions,
    formatter: &dyn SourceFormatter,
) -> Option<Generated> {
    if file.is_empty() {
        return None;
    }

    let rendered = match render(file, options) {
        Ok(rendered) => rendered,
        Err(err) => return Some(Generated::failed(err)),
    };

    Some(match formatter.format(&rendered) {
        Ok(formatted) => Generated::ok(formatted),
        Err(err) => Generated::failed(SynthesisError::Format(err.0)),
    })
}

/// Render a spec tree without formatting it.
pub fn render(file: &MapperFile, options: &RenderOptions) -> Result<String, SynthesisError> {
    let mut code = String::new();

    code.push_str(&format!(
        "// Code generated by mapwright from {}. DO NOT EDIT.\n",
        file.module
    ));

    if !options.imports.is_empty() {
        code.push('\n');
        for import in &options.imports {
            code.push_str(&format!("use {import};\n"));
        }
    }

    for mapper in &file.mappers {
        code.push('\n');
        render_mapper(&mut code, mapper)?;
    }

    Ok(code)
}

fn render_mapper(code: &mut String, mapper: &Mapper) -> Result<(), SynthesisError> {
    let impl_name = format!("{}{}", mapper.name, grammar::IMPL_SUFFIX);

    code.push_str("#[derive(Debug, Clone, Copy, Default)]\n");
    code.push_str(&format!("pub struct {impl_name};\n\n"));

    if mapper.functions.is_empty() {
        code.push_str(&format!("impl {impl_name} {{}}\n"));
        return Ok(());
    }

    code.push_str("#[allow(unused_variables)]\n");
    code.push_str(&format!("impl {impl_name} {{\n"));
    for (i, function) in mapper.functions.iter().enumerate() {
        if i > 0 {
            code.push('\n');
        }
        render_function(code, function)
            .map_err(|err| in_function(err, &mapper.name, &function.name))?;
    }
    code.push_str("}\n");

    Ok(())
}

fn render_function(code: &mut String, function: &Function) -> Result<(), SynthesisError> {
    let result = value_type(&function.result);
    let literal = literal_path(result)?;

    let mut params = vec!["&self".to_string()];
    params.extend(
        function
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, value_type(&p.ty))),
    );

    let generics = function.generics.as_deref().unwrap_or_default();
    let where_clause = function
        .where_clause
        .as_deref()
        .map(|clause| format!(" {clause}"))
        .unwrap_or_default();

    code.push_str(&format!(
        "{INDENT}pub fn {}{generics}({}) -> {result}{where_clause} {{\n",
        function.name,
        params.join(", "),
    ));

    if function.directives.is_empty() {
        code.push_str(&format!("{INDENT}{INDENT}{literal} {{}}\n"));
    } else {
        code.push_str(&format!("{INDENT}{INDENT}{literal} {{\n"));
        for directive in &function.directives {
            code.push_str(&format!("{INDENT}{INDENT}{INDENT}{}\n", entry(directive)));
        }
        code.push_str(&format!("{INDENT}{INDENT}}}\n"));
    }

    code.push_str(&format!("{INDENT}}}\n"));
    Ok(())
}

/// One line of a struct expression.
fn entry(directive: &Directive) -> String {
    match directive {
        Directive::Link { source, target } => field_init(target, &source.expression()),
        Directive::LinkFunc {
            sources,
            function,
            target,
        } => {
            let args: Vec<String> = sources.iter().map(|s| s.expression()).collect();
            field_init(
                target,
                &format!("{}.{}({})", grammar::RECEIVER, function, args.join(", ")),
            )
        }
        Directive::Ignore { target } => {
            format!("// {}: {}", target.field, grammar::IGNORED_MARKER)
        }
    }
}

fn field_init(target: &Target, value: &str) -> String {
    format!("{}: {},", target.field, value)
}

/// Strip one leading reference or raw-pointer sigil from type text.
///
/// Mapper methods take and return owned values, so `&'a User` becomes
/// `User`. Anything else is returned unchanged.
pub fn value_type(ty: &str) -> &str {
    let ty = ty.trim();

    if let Some(rest) = ty.strip_prefix('&') {
        let mut rest = rest.trim_start();
        if let Some(after_quote) = rest.strip_prefix('\'') {
            let end = after_quote
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(after_quote.len());
            rest = after_quote[end..].trim_start();
        }
        return strip_keyword(rest, "mut").trim();
    }

    if let Some(rest) = ty.strip_prefix('*') {
        let rest = rest.trim_start();
        let stripped = strip_keyword(rest, "const");
        let stripped = if stripped.len() == rest.len() {
            strip_keyword(rest, "mut")
        } else {
            stripped
        };
        return stripped.trim();
    }

    ty
}

/// Remove a leading keyword followed by whitespace.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> &'a str {
    match text.strip_prefix(keyword) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => text,
    }
}

/// Path usable at the head of a struct expression for a result type.
///
/// Generic arguments need a turbofish in expression position:
/// `Page<User>` is built as `Page::<User> { .. }`.
fn literal_path(result: &str) -> Result<String, SynthesisError> {
    let ty: syn::Type = syn::parse_str(result).map_err(|err| {
        SynthesisError::Template(format!("result type `{result}` is not a type: {err}"))
    })?;

    match ty {
        syn::Type::Path(path) if path.qself.is_none() => {}
        _ => {
            return Err(SynthesisError::Template(format!(
                "result type `{result}` cannot be built with a struct expression"
            )));
        }
    }

    Ok(match result.find('<') {
        Some(pos) if !result[..pos].trim_end().ends_with("::") => {
            format!("{}::{}", result[..pos].trim_end(), &result[pos..])
        }
        _ => result.to_string(),
    })
}

fn in_function(err: SynthesisError, mapper: &str, function: &str) -> SynthesisError {
    match err {
        SynthesisError::Template(message) => {
            SynthesisError::Template(format!("{mapper}::{function}: {message}"))
        }
        other => other,
    }
}
