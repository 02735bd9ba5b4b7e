pub mod decode;
pub mod instruction;
