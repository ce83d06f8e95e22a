// 日志句柄
// Logger 使用强类型字段，SugaredLogger 接受松散的键值参数

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;

use crate::logging::{render_fields, Field, FieldValue, Level, LoggerCore};

const TARGET: &str = "moe_logger";

macro_rules! dispatch_event {
    ($level:expr, $($rest:tt)+) => {
        match $level {
            Level::Debug => tracing::event!(target: TARGET, tracing::Level::DEBUG, $($rest)+),
            Level::Info => tracing::event!(target: TARGET, tracing::Level::INFO, $($rest)+),
            Level::Warn => tracing::event!(target: TARGET, tracing::Level::WARN, $($rest)+),
            _ => tracing::event!(target: TARGET, tracing::Level::ERROR, $($rest)+),
        }
    };
}

/// 结构化日志句柄
///
/// 句柄持有构建时的核心快照；门面重新配置后需要重新获取句柄。
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    fields: Arc<Vec<Field>>,
}

impl Logger {
    pub fn new(core: Arc<LoggerCore>) -> Self {
        Self {
            core,
            fields: Arc::new(Vec::new()),
        }
    }

    /// 派生一个附带额外字段的句柄
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut all = Vec::clone(&self.fields);
        all.extend(fields);
        Self {
            core: Arc::clone(&self.core),
            fields: Arc::new(all),
        }
    }

    /// 句柄上的持久字段
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// 当前阈值
    pub fn level(&self) -> Level {
        self.core.level()
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.core.enabled(level)
    }

    pub fn sugar(&self) -> SugaredLogger {
        SugaredLogger { base: self.clone() }
    }

    /// 按级别输出一条记录，并执行该级别的后续动作
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        self.write(level, message, fields, Location::caller());
        self.after_write(level, message);
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Level::Warn, message, fields);
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }

    /// 开发模式下记录后 panic
    #[track_caller]
    pub fn dpanic(&self, message: &str, fields: &[Field]) {
        self.log(Level::DPanic, message, fields);
    }

    /// 记录后 panic
    #[track_caller]
    pub fn panic(&self, message: &str, fields: &[Field]) {
        self.log(Level::Panic, message, fields);
    }

    /// 记录后调用致命处理（默认退出进程）
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: &[Field]) {
        self.log(Level::Fatal, message, fields);
    }

    fn write(&self, level: Level, message: &str, fields: &[Field], location: &Location<'_>) {
        let to_output = self.core.check(level, message);
        let alerting = self.core.alerting().filter(|_| self.core.alerts_accept(level));
        if !to_output && alerting.is_none() {
            return;
        }

        let rendered = render_fields(self.fields.iter().chain(fields));
        let rendered = (!rendered.is_empty()).then(|| Value::Object(rendered).to_string());
        let caller = self
            .core
            .config()
            .with_caller
            .then(|| format!("{}:{}", location.file(), location.line()));
        let stacktrace = self
            .core
            .captures_stacktrace(level)
            .then(|| Backtrace::force_capture().to_string());

        let emit = || {
            dispatch_event!(
                level,
                severity = level.as_str(),
                caller = caller.as_deref(),
                fields = rendered.as_deref(),
                stacktrace = stacktrace.as_deref(),
                "{}",
                message
            );
        };

        if to_output {
            tracing::dispatcher::with_default(self.core.dispatch(), &emit);
        }
        if let Some(alerting) = alerting {
            tracing::dispatcher::with_default(alerting, &emit);
        }
    }

    // panic 与 fatal 的后续动作不受阈值影响
    fn after_write(&self, level: Level, message: &str) {
        match level {
            Level::DPanic if self.core.config().development => panic!("{}", message),
            Level::Panic => panic!("{}", message),
            Level::Fatal => (self.core.on_fatal())(message),
            _ => {}
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("fields", &self.fields)
            .finish()
    }
}

/// 松散类型的日志句柄
#[derive(Clone, Debug)]
pub struct SugaredLogger {
    base: Logger,
}

fn to_fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<Field>
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    pairs
        .into_iter()
        .map(|(key, value)| Field::new(key, value))
        .collect()
}

macro_rules! sugared_levels {
    ($(($plain:ident, $with_pairs:ident, $level:expr)),* $(,)?) => {
        $(
            #[track_caller]
            pub fn $plain(&self, message: impl fmt::Display) {
                self.base.log($level, &message.to_string(), &[]);
            }

            #[track_caller]
            pub fn $with_pairs<K, V>(&self, message: impl fmt::Display, pairs: impl IntoIterator<Item = (K, V)>)
            where
                K: Into<String>,
                V: Into<FieldValue>,
            {
                self.base.log($level, &message.to_string(), &to_fields(pairs));
            }
        )*
    };
}

impl SugaredLogger {
    /// 派生一个附带键值的句柄
    pub fn with<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            base: self.base.with(to_fields(pairs)),
        }
    }

    pub fn level(&self) -> Level {
        self.base.level()
    }

    sugared_levels!(
        (debug, debugw, Level::Debug),
        (info, infow, Level::Info),
        (warn, warnw, Level::Warn),
        (error, errorw, Level::Error),
        (dpanic, dpanicw, Level::DPanic),
        (panic, panicw, Level::Panic),
        (fatal, fatalw, Level::Fatal),
    );
}
