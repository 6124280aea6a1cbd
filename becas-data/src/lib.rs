pub mod loader;

pub use loader::{TabuladorLoader, TabuladorLoaderError, TabuladorRecord, default_catalog};
