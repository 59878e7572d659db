mod error;
mod shelf;

pub use error::StoreError;
pub use shelf::Shelf;
