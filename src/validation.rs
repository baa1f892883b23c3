pub mod field;
pub mod validators;
