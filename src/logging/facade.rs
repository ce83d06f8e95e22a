// 日志门面
// 持有当前日志核心，负责初始化、派生句柄与运行期重新配置

use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;

use moe_common::Context;

use crate::errors::{LoggerError, Result};
use crate::logging::{
    context_fields, exit_process, AlertConfig, AlertTransport, AlertingSink, FatalHook, Level,
    Logger, LoggerConfig, LoggerCore, OutputTarget, Outputs, SugaredLogger,
};

/// 未指定级别时的默认级别
pub const DEFAULT_LEVEL: &str = "error";

/// 门面构建器
pub struct LogFacadeBuilder {
    level: String,
    outputs: Vec<OutputTarget>,
    on_fatal: FatalHook,
}

impl LogFacadeBuilder {
    /// 设置级别文本
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// 设置输出目标，替换默认的 stderr
    pub fn outputs(mut self, outputs: Vec<OutputTarget>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn output(self, output: OutputTarget) -> Self {
        self.outputs(vec![output])
    }

    /// 设置致命处理；默认退出进程
    pub fn on_fatal(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_fatal = Arc::new(hook);
        self
    }

    /// 构建并初始化门面，失败路径同 [`LogFacade::initialize`]
    pub fn build(self) -> LogFacade {
        let fallback = LoggerCore::with_outputs(
            LoggerConfig::for_level(Level::Error).with_stacktrace_level(Level::Panic),
            Outputs::stderr(),
            Vec::new(),
            Arc::clone(&self.on_fatal),
        );

        let facade = LogFacade {
            state: ArcSwap::from_pointee(fallback),
            outputs: self.outputs,
            on_fatal: self.on_fatal,
        };
        facade.initialize(&self.level);
        facade
    }
}

impl Default for LogFacadeBuilder {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            outputs: vec![OutputTarget::Stderr],
            on_fatal: exit_process(),
        }
    }
}

/// 日志门面
///
/// 由组合根持有并注入使用。读取总能得到一个可用的核心；
/// 重新配置通过原子替换完成，之后获取的句柄立即可见，
/// 已发出的句柄继续使用旧核心。
pub struct LogFacade {
    state: ArcSwap<LoggerCore>,
    outputs: Vec<OutputTarget>,
    on_fatal: FatalHook,
}

impl LogFacade {
    /// 以默认级别 `error` 初始化
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LogFacadeBuilder {
        LogFacadeBuilder::default()
    }

    /// 按级别文本初始化
    ///
    /// 级别无效或构建失败时记录原因并调用致命处理（默认退出进程）；
    /// 若致命处理返回，保留原有核心。成功时替换核心并清空已挂载的告警通道。
    pub fn initialize(&self, level: &str) {
        match self.build_initial(level) {
            Ok(core) => {
                self.state.store(Arc::new(core));
            }
            Err(err) => {
                let err = err.during_initialize();
                report_fatal(&err);
                (self.on_fatal)(&err.to_string());
            }
        }
    }

    fn build_initial(&self, level: &str) -> Result<LoggerCore> {
        let level = Level::parse(level)?;
        let config = LoggerConfig::for_level(level)
            .with_stacktrace_level(Level::Panic)
            .with_outputs(self.outputs.clone());

        LoggerCore::build(config, Vec::new(), Arc::clone(&self.on_fatal))
    }

    /// 结构化句柄
    pub fn logger(&self) -> Logger {
        Logger::new(self.state.load_full())
    }

    /// 松散类型句柄
    pub fn get_logger(&self) -> SugaredLogger {
        self.logger().sugar()
    }

    /// 附带请求上下文字段的句柄
    pub fn get_context_logger(&self, ctx: &Context) -> Logger {
        self.logger().with(context_fields(ctx))
    }

    /// 调整级别
    ///
    /// 保留当前预设与已挂载的告警通道；失败时返回错误且不改变当前配置。
    /// 这里与按初始配置重建、丢弃告警通道的旧行为不同，告警在调级后继续生效。
    pub fn set_level(&self, level: &str) -> Result<()> {
        let level = Level::parse(level).map_err(LoggerError::during_set_level)?;

        let current = self.state.load_full();
        let config = current.config().clone().with_level(level);
        let core = LoggerCore::build(config, current.alerts().to_vec(), Arc::clone(&self.on_fatal))
            .map_err(LoggerError::during_set_level)?;

        self.state.store(Arc::new(core));
        Ok(())
    }

    /// 挂载告警通道: error 及以上的记录额外转发到 `dsn` 指向的服务
    pub fn attach_alerting_sink(
        &self,
        dsn: &str,
        transport: impl AlertTransport + 'static,
    ) -> Result<()> {
        let sink = AlertingSink::new(AlertConfig::system(), dsn, Arc::new(transport))?;

        let current = self.state.load_full();
        let mut alerts = current.alerts().to_vec();
        alerts.push(Arc::new(sink));

        let core = LoggerCore::build(current.config().clone(), alerts, Arc::clone(&self.on_fatal))
            .map_err(|e| LoggerError::alert_sink(e.to_string()))?;

        self.state.store(Arc::new(core));
        Ok(())
    }

    /// 当前阈值
    pub fn level(&self) -> Level {
        self.state.load().level()
    }

    /// 当前配置快照
    pub fn config(&self) -> LoggerConfig {
        self.state.load().config().clone()
    }

    /// 已挂载的告警通道数
    pub fn alert_sink_count(&self) -> usize {
        self.state.load().alerts().len()
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFacade")
            .field("state", &*self.state.load())
            .field("outputs", &self.outputs)
            .finish()
    }
}

// 门面自身无法输出时，直接写到 stderr
fn report_fatal(err: &LoggerError) {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(code = err.error_code(), error = %err, "日志系统初始化失败");
    });
}
