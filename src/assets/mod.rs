//! Asset access: byte readers, OBJ parsing, and the async frame loader.

pub mod loader;
pub mod obj_loader;
pub mod reader;

pub use loader::{MeshLoader, MeshResult, MetadataResult};
pub use obj_loader::parse_obj;
pub use reader::AssetReader;
