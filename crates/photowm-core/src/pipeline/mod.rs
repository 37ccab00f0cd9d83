//! Photo processing pipeline components.
//!
//! - **discovery**: Find photos in directory trees
//! - **decode**: Read and decode JPEG files
//! - **metadata**: Extract EXIF capture time, GPS and orientation
//! - **resize**: Downscale to a maximum dimension
//! - **orientation**: Rotate upright from the EXIF code
//! - **font**: Glyph metrics and rendering
//! - **watermark**: Bottom-right text with a shadow pass
//! - **encode**: JPEG encode with atomic writes
//! - **processor**: Runs one file through every stage
//! - **dispatcher**: Worker pool over a shared job queue

pub mod decode;
pub mod discovery;
pub mod dispatcher;
pub mod encode;
pub mod font;
pub mod metadata;
pub mod orientation;
pub mod processor;
pub mod resize;
pub mod watermark;

// Re-exports for convenient access
pub use decode::ImageDecoder;
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use dispatcher::Dispatcher;
pub use encode::OutputWriter;
pub use font::{FontFace, TrueTypeFace};
pub use metadata::MetadataExtractor;
pub use orientation::fix_orientation;
pub use processor::{PhotoPipeline, ProcessOptions};
pub use watermark::Compositor;
