pub mod persistence;

pub use persistence::JsonDocumentStore;
