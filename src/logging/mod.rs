// 日志系统模块
// 结构化日志门面: 级别、字段、预设、后端构建与告警通道

pub mod alert;
pub mod backend;
pub mod context;
pub mod facade;
pub mod field;
pub mod level;
pub mod logger;
pub mod output;
pub mod preset;
pub mod sampler;


pub use alert::*;
pub use backend::*;
pub use context::*;
pub use facade::*;
pub use field::*;
pub use level::*;
pub use logger::*;
pub use output::*;
pub use preset::*;
pub use sampler::*;
