//! Spec assembly.
//!
//! Joins reduced declarations with their parsed directives into the
//! [`MapperFile`] spec tree. Fail-fast: the first error aborts the whole
//! file and no partial mapper is returned.

use crate::directive::parse_directive;
use crate::error::{MapwrightError, MapwrightResult};
use crate::reduce::{RawFunction, RawMapper};
use crate::spec::{Directive, Function, Mapper, MapperFile};
use tracing::debug;

/// Assemble every reduced mapper of one file.
pub fn assemble(module: impl Into<String>, raw: Vec<RawMapper>) -> MapwrightResult<MapperFile> {
    let mappers = raw
        .into_iter()
        .map(assemble_mapper)
        .collect::<MapwrightResult<Vec<_>>>()?;

    Ok(MapperFile {
        module: module.into(),
        mappers,
    })
}

/// Assemble one mapper, parsing the directives of each of its functions.
pub fn assemble_mapper(raw: RawMapper) -> MapwrightResult<Mapper> {
    let RawMapper {
        name,
        location,
        functions,
        ..
    } = raw;

    if name.is_empty() {
        return Err(MapwrightError::spec(format!(
            "mapper name cannot be empty {location}"
        )));
    }

    let functions = functions
        .into_iter()
        .map(assemble_function)
        .collect::<MapwrightResult<Vec<_>>>()
        .map_err(|err| err.in_mapper(&name))?;

    Ok(Mapper { name, functions })
}

/// Assemble one function.
///
/// Directive order is annotation order; it decides field order in the
/// generated struct expression.
pub fn assemble_function(raw: RawFunction) -> MapwrightResult<Function> {
    let RawFunction {
        name,
        generics,
        parameters,
        mut results,
        where_clause,
        comments,
        location,
    } = raw;

    if results.len() != 1 {
        return Err(MapwrightError::spec(format!(
            "mapper function must have exactly one result, but {name} has {} {location}",
            results.len()
        )));
    }
    let result = results.remove(0);

    let directives = comments
        .iter()
        .map(|comment| parse_directive(comment))
        .collect::<MapwrightResult<Vec<Directive>>>()?;

    debug!(
        function = %name,
        directives = directives.len(),
        "assembled mapper function"
    );

    Ok(Function {
        name,
        generics,
        parameters,
        result,
        where_clause,
        directives,
    })
}
