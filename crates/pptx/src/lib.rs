//! PPTX (Office Open XML) package builder.
//!
//! Turns the editor's slides into a `.pptx` file: XML parts, a stored ZIP
//! archive, and delivery through an injected sink.

pub mod archive;
pub mod inspect;
pub mod package;
pub mod sink;
pub mod xml;

pub use archive::{build_archive, crc32, ArchiveEntry, EntryData};
pub use inspect::PackageReport;
pub use package::{export, Exporter, Package, PackageBuilder};
pub use sink::{FileSink, MemorySink, PackageSink, VerifyingSink};
