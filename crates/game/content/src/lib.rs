//! Static content for the Hearthvale session: item and character-part
//! catalogs loaded from RON files into the oracle types `hearth-core`
//! consumes.
pub mod catalog;
pub mod loaders;

pub use catalog::ItemCatalog;
pub use loaders::{ItemCatalogLoader, PartsLoader};
