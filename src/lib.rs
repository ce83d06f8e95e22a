// Moe Logger Library
// 结构化日志门面: 级别配置、请求上下文字段、错误告警

pub mod config;
pub mod errors;
pub mod logging;

pub use errors::{LoggerError, Result};
pub use logging::{
    make_error_field, make_field, ChannelTransport, Field, FieldValue, Level, LogFacade, Logger,
    SugaredLogger,
};
pub use moe_common::Context;
