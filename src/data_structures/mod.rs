mod dense_store;

pub use dense_store::*;
