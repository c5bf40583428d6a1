//! End-to-end generation for one input file.
//!
//! ```text
//! source ──reduce──▶ RawMapper* ──assemble──▶ MapperFile ──synthesize──▶ Generated
//! ```
//!
//! Reduction and assembly fail fast with a [`MapwrightError`](crate::MapwrightError). Synthesis
//! failures are reported in-band through [`Generated`].

use crate::assemble::assemble;
use crate::error::MapwrightResult;
use crate::format::SourceFormatter;
use crate::reduce::reduce_source;
use crate::spec::MapperFile;
use crate::synth::{Generated, RenderOptions, synthesize};
use tracing::info;

/// Build the spec tree for one source file.
pub fn read_spec(source: &str, module: &str) -> MapwrightResult<MapperFile> {
    let raw = reduce_source(source)?;
    let file = assemble(module, raw)?;

    info!(
        module,
        mappers = file.mappers.len(),
        "assembled mapper spec"
    );
    Ok(file)
}

/// Generate the mapper source for one file.
///
/// Returns `Ok(None)` when the file declares no mappers.
pub fn generate(
    source: &str,
    module: &str,
    options: &RenderOptions,
    formatter: &dyn SourceFormatter,
) -> MapwrightResult<Option<Generated>> {
    let file = read_spec(source, module)?;
    Ok(synthesize(&file, options, formatter))
}
