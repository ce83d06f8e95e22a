// Moe Common Package
// 请求上下文及其键名定义

pub mod context;
pub mod keys;

pub use context::*;
