// Output generation module

pub mod json;
pub mod stub;

pub use json::*;
pub use stub::*;
