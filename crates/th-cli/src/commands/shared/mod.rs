pub mod delete;
pub mod parse;
