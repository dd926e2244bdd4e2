//! Declarative element trees and the loaders that supply linked trees

mod element;
mod loader;

pub use element::{ElementNode, Handling, MarkerDescriptor, TreeRoot};
pub use loader::{FileLoader, LoadError, MemoryLoader, NullLoader, TreeLoader};
