// pixfit/src/processors/mod.rs
mod batch;
mod codec;
mod encoder;
pub mod formats;
mod loader;
mod resizer;

pub use batch::BatchProcessor;
pub use codec::{ImageCodec, StandardCodec};
pub use encoder::Encoder;
pub use loader::Loader;
pub use resizer::Resizer;

pub mod prelude {
    pub use super::{BatchProcessor, Encoder, ImageCodec, Loader, Resizer, StandardCodec};
}
