pub mod mistake;
