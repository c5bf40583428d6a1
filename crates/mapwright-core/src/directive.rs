//! Directive parsing.
//!
//! Turns one tagged doc-comment line into a [`Directive`]:
//!
//! ```text
//! +mapwright:link:ef.title->title
//! +mapwright:linkfunc:ef, eu.id->lookup->owner
//! +mapwright:ignore:director
//! ```
//!
//! A directive either parses completely or fails with
//! [`MapwrightError::Spec`] naming the offending comment.

use crate::error::{MapwrightError, MapwrightResult};
use crate::grammar;
use crate::spec::{Directive, Source, Target};
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

#[allow(clippy::expect_used)] // Safe: patterns are compile-time literals
static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}(\w+):(.*)$", regex::escape(grammar::TAG)))
        .expect("directive pattern is valid")
});

#[allow(clippy::expect_used)] // Safe: patterns are compile-time literals
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    let arrow = regex::escape(grammar::ARROW);
    Regex::new(&format!(r"^(.+){arrow}(\w+)$")).expect("link pattern is valid")
});

#[allow(clippy::expect_used)] // Safe: patterns are compile-time literals
static LINK_FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    let arrow = regex::escape(grammar::ARROW);
    Regex::new(&format!(r"^(.+){arrow}(\w+){arrow}(\w+)$")).expect("linkfunc pattern is valid")
});

#[allow(clippy::expect_used)] // Safe: patterns are compile-time literals
static FIELD_SOURCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\.(\w+)$").expect("source pattern is valid"));

/// Parse one tagged comment into a directive.
pub fn parse_directive(comment: &str) -> MapwrightResult<Directive> {
    let comment = comment.trim();
    let caps = DIRECTIVE_RE.captures(comment).ok_or_else(|| {
        MapwrightError::spec(format!("[{comment}] is not a valid mapwright directive"))
    })?;

    let verb = &caps[1];
    let details = &caps[2];

    match verb {
        grammar::VERB_LINK => parse_link(comment, details),
        grammar::VERB_LINK_FUNC => parse_link_func(comment, details),
        grammar::VERB_IGNORE => parse_ignore(comment, details),
        _ => Err(MapwrightError::spec(format!(
            "[{comment}] does not contain a recognized directive"
        ))),
    }
}

/// Parse a source reference.
///
/// `param.field` narrows to a field; anything else is taken whole as the
/// parameter name.
pub fn parse_source(text: &str) -> Source {
    let text = text.trim();
    match FIELD_SOURCE_RE.captures(text) {
        Some(caps) => Source::field(&caps[1], &caps[2]),
        None => Source::parameter(text),
    }
}

fn parse_link(comment: &str, details: &str) -> MapwrightResult<Directive> {
    let invalid = || {
        MapwrightError::spec(format!(
            "[{comment}] is not valid config for the {} directive",
            grammar::VERB_LINK
        ))
    };

    let caps = LINK_RE.captures(details).ok_or_else(invalid)?;
    if caps[1].trim().is_empty() {
        return Err(invalid());
    }

    Ok(Directive::Link {
        source: parse_source(&caps[1]),
        target: Target::new(&caps[2]),
    })
}

fn parse_link_func(comment: &str, details: &str) -> MapwrightResult<Directive> {
    let invalid = || {
        MapwrightError::spec(format!(
            "[{comment}] is not valid config for the {} directive",
            grammar::VERB_LINK_FUNC
        ))
    };

    let caps = LINK_FUNC_RE.captures(details).ok_or_else(invalid)?;

    let sources = caps[1]
        .split(grammar::SOURCE_SEPARATOR)
        .map(|entry| {
            if entry.trim().is_empty() {
                Err(invalid())
            } else {
                Ok(parse_source(entry))
            }
        })
        .collect::<MapwrightResult<Vec<_>>>()?;

    Ok(Directive::LinkFunc {
        sources,
        function: caps[2].to_string(),
        target: Target::new(&caps[3]),
    })
}

fn parse_ignore(comment: &str, details: &str) -> MapwrightResult<Directive> {
    let target = details.trim();
    if target.is_empty() {
        return Err(MapwrightError::spec(format!(
            "[{comment}] is not valid config for the {} directive",
            grammar::VERB_IGNORE
        )));
    }

    Ok(Directive::Ignore {
        target: Target::new(target),
    })
}

impl FromStr for Directive {
    type Err = MapwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_directive(s)
    }
}
