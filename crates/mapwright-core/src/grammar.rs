//! Annotation grammar constants.
//!
//! Every string that appears in an annotated source file or in generated
//! output lives here. Changing any of these breaks existing annotated files.

/// Prefix every mapwright doc-comment annotation starts with.
pub const TAG: &str = "+mapwright:";

/// Marker verb that flags a trait as a mapper declaration.
pub const MAPPER_MARKER: &str = "+mapwright:mapper";

/// Copy a source value straight into a target field.
pub const VERB_LINK: &str = "link";

/// Compute a target field by calling a method on the generated type.
pub const VERB_LINK_FUNC: &str = "linkfunc";

/// Explicitly skip a target field.
pub const VERB_IGNORE: &str = "ignore";

/// Separator between the parts of `link` and `linkfunc` details.
pub const ARROW: &str = "->";

/// Separator between `linkfunc` sources.
pub const SOURCE_SEPARATOR: char = ',';

/// Suffix appended to a mapper name to form the generated type name.
pub const IMPL_SUFFIX: &str = "Impl";

/// Receiver used for `linkfunc` calls in generated methods.
pub const RECEIVER: &str = "self";

/// Marker written in place of the value of an ignored field.
pub const IGNORED_MARKER: &str = "(ignored)";

/// Returns true if a trimmed comment line carries the mapwright tag.
pub fn is_tagged(line: &str) -> bool {
    line.trim().starts_with(TAG)
}

/// Returns true if a comment line is the mapper marker.
///
/// Accepts both the bare marker and the marker followed by `:<anything>`.
pub fn is_mapper_marker(line: &str) -> bool {
    match line.trim().strip_prefix(MAPPER_MARKER) {
        Some(rest) => rest.is_empty() || rest.starts_with(':'),
        None => false,
    }
}
