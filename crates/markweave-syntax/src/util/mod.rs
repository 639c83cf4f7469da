//! Small helpers shared by constructs, resolvers and the compiler.

pub mod character;
pub mod constant;
pub mod decode;
pub mod edit_map;
pub mod identifier;
pub mod skip;
