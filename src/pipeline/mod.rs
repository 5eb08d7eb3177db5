//! Export orchestration: image preload, page assembly and the guarded
//! entry point callers use.

mod artifact;
mod assembler;
mod builder;
mod exporter;

pub use artifact::ExportArtifact;
pub use assembler::{DocumentAssembler, LayoutCursor};
pub use builder::ExporterBuilder;
pub use exporter::CatalogExporter;
