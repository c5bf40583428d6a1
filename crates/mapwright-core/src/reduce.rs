//! Declaration reduction.
//!
//! Walks a parsed Rust file and reduces every trait carrying the
//! `+mapwright:mapper` marker to a [`RawMapper`]: its name, its methods with
//! their parameters and result types, and the raw tagged doc comments.
//! Directives are not interpreted here; that is [`crate::assemble`]'s job.
//!
//! # Verbatim types
//!
//! Parameter and result types are copied as the exact source text they were
//! written with, sliced out of the input by span. They are never resolved or
//! checked, so `super::Film`, `Vec<Row>` or `&'a User` pass through as
//! written.
//!
//! # Shape rules
//!
//! - the marked item must be a `trait`
//! - the trait itself must not be generic; its methods may be, and their
//!   generics and `where` clauses are copied verbatim
//! - every trait item must be a method signature without a default body
//! - every typed parameter must bind exactly one name

use crate::error::{Location, MapwrightError, MapwrightResult};
use crate::grammar;
use crate::spec::Parameter;
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Attribute, FnArg, Item, Meta, Pat, ReturnType, TraitItem, Type};
use tracing::debug;

/// A mapper declaration before its directives are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMapper {
    pub name: String,

    /// Tagged doc comments on the trait itself, including the marker.
    pub top_comments: Vec<String>,

    pub location: Location,

    pub functions: Vec<RawFunction>,
}

/// A mapper method before its directives are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFunction {
    pub name: String,
    pub generics: Option<String>,
    pub parameters: Vec<Parameter>,

    /// Verbatim result types; a tuple return contributes one entry per element.
    pub results: Vec<String>,

    pub where_clause: Option<String>,

    /// Tagged doc comments, trimmed, in source order.
    pub comments: Vec<String>,

    pub location: Location,
}

/// Parse Rust source and reduce its mapper declarations.
pub fn reduce_source(source: &str) -> MapwrightResult<Vec<RawMapper>> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let file: syn::File = syn::parse_str(source)?;

    reduce_file(&file, source)
}

/// Reduce the mapper declarations of an already parsed file.
///
/// `source` must be the exact text `file` was parsed from; type text is
/// sliced out of it.
pub fn reduce_file(file: &syn::File, source: &str) -> MapwrightResult<Vec<RawMapper>> {
    let mut mappers = Vec::new();

    for item in &file.items {
        if !is_mapper_item(item_attrs(item)) {
            continue;
        }

        let mapper = RawMapper::from_item(item, source)?;
        debug!(
            mapper = %mapper.name,
            functions = mapper.functions.len(),
            "reduced mapper declaration"
        );
        mappers.push(mapper);
    }

    Ok(mappers)
}

impl RawMapper {
    fn from_item(item: &Item, source: &str) -> MapwrightResult<RawMapper> {
        let Item::Trait(item_trait) = item else {
            return Err(MapwrightError::structural(
                Location::of(item),
                format!(
                    "mapper marker is on {}, but mappers must be traits",
                    item_kind(item)
                ),
            ));
        };

        let name = item_trait.ident.to_string();
        if !item_trait.generics.params.is_empty() || item_trait.generics.where_clause.is_some() {
            return Err(MapwrightError::structural(
                Location::of(&item_trait.ident),
                format!("mapper trait {name} is generic; only its methods may declare generics"),
            ));
        }

        let functions = item_trait
            .items
            .iter()
            .map(|trait_item| RawFunction::from_trait_item(trait_item, source))
            .collect::<MapwrightResult<Vec<_>>>()
            .map_err(|err| err.in_mapper(&name))?;

        Ok(RawMapper {
            name,
            top_comments: tagged_comments(&item_trait.attrs),
            location: Location::of(&item_trait.trait_token),
            functions,
        })
    }
}

impl RawFunction {
    fn from_trait_item(item: &TraitItem, source: &str) -> MapwrightResult<RawFunction> {
        let TraitItem::Fn(method) = item else {
            return Err(MapwrightError::structural(
                Location::of(item),
                "mapper traits may only contain method signatures",
            ));
        };

        let sig = &method.sig;
        let name = sig.ident.to_string();
        let location = Location::of(sig);

        if method.default.is_some() {
            return Err(MapwrightError::structural(
                location,
                format!("method {name} has a default body"),
            ));
        }

        let parameters = sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Receiver(_) => None,
                FnArg::Typed(pat_type) => Some(pat_type),
            })
            .enumerate()
            .map(|(index, pat_type)| {
                let param_name = single_binding(&pat_type.pat).ok_or_else(|| {
                    MapwrightError::structural(
                        Location::of(&pat_type.pat),
                        format!("parameter {index} of {name} does not bind exactly one name"),
                    )
                })?;
                Ok(Parameter::new(param_name, source_text(source, &*pat_type.ty)))
            })
            .collect::<MapwrightResult<Vec<_>>>()?;

        let generics = &sig.generics;
        Ok(RawFunction {
            generics: (!generics.params.is_empty()).then(|| source_text(source, generics)),
            where_clause: generics
                .where_clause
                .as_ref()
                .filter(|clause| !clause.predicates.is_empty())
                .map(|clause| source_text(source, clause)),
            results: result_types(&sig.output, source),
            comments: tagged_comments(&method.attrs),
            name,
            parameters,
            location,
        })
    }
}

/// Check if an item's doc comments carry the mapper marker.
fn is_mapper_item(attrs: &[Attribute]) -> bool {
    doc_lines(attrs).iter().any(|line| grammar::is_mapper_marker(line))
}

/// Doc comment lines carrying the mapwright tag, trimmed.
fn tagged_comments(attrs: &[Attribute]) -> Vec<String> {
    doc_lines(attrs)
        .into_iter()
        .filter(|line| grammar::is_tagged(line))
        .collect()
}

/// Extract doc comment lines from attributes.
///
/// Each `///` line is its own attribute; a `/** */` block may hold several
/// lines and is split.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    let mut lines = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(meta) = &attr.meta {
            if let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit_str),
                ..
            }) = &meta.value
            {
                lines.extend(lit_str.value().lines().map(|line| line.trim().to_string()));
            }
        }
    }

    lines
}

/// The single name a parameter pattern binds, if it binds exactly one.
fn single_binding(pat: &Pat) -> Option<String> {
    match pat {
        Pat::Ident(pat_ident) if pat_ident.subpat.is_none() => Some(pat_ident.ident.to_string()),
        _ => None,
    }
}

/// Verbatim result types of a signature.
fn result_types(output: &ReturnType, source: &str) -> Vec<String> {
    match output {
        ReturnType::Default => Vec::new(),
        ReturnType::Type(_, ty) => match &**ty {
            Type::Tuple(tuple) => tuple
                .elems
                .iter()
                .map(|elem| source_text(source, elem))
                .collect(),
            other => vec![source_text(source, other)],
        },
    }
}

/// Read the input text a node was parsed from.
///
/// Falls back to the printed token stream when the span does not map back
/// into `source`.
fn source_text<T: ToTokens>(source: &str, node: &T) -> String {
    let range = node.span().byte_range();

    match source.get(range) {
        Some(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => node.to_token_stream().to_string(),
    }
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}

fn item_kind(item: &Item) -> &'static str {
    match item {
        Item::Const(_) => "a const",
        Item::Enum(_) => "an enum",
        Item::ExternCrate(_) => "an extern crate",
        Item::Fn(_) => "a function",
        Item::ForeignMod(_) => "an extern block",
        Item::Impl(_) => "an impl block",
        Item::Macro(_) => "a macro invocation",
        Item::Mod(_) => "a module",
        Item::Static(_) => "a static",
        Item::Struct(_) => "a struct",
        Item::TraitAlias(_) => "a trait alias",
        Item::Type(_) => "a type alias",
        Item::Union(_) => "a union",
        Item::Use(_) => "a use declaration",
        _ => "an unsupported item",
    }
}
