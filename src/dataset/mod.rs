//! Dataset layer: manifest, record types, and collection loading.

pub mod loader;
pub mod manifest;
pub mod model;

pub use loader::{load_dataset, CollectionRecords, LoadedCollection, LoadedDataset};
pub use manifest::{CollectionKind, CollectionSpec, DatasetManifest};
