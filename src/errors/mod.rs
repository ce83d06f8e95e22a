// 错误处理模块
// 定义日志门面的统一错误类型

pub mod types;


pub use types::*;
