pub mod product;
pub mod attributes;

pub use product::*;
