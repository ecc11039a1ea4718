pub mod mistake;
pub mod shared;
