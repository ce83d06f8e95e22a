// 日志后端构建
// 由 LoggerConfig 组装 tracing 订阅器，得到一个不可变的日志核心

use std::fmt;
use std::sync::Arc;

use tracing::Dispatch;
use tracing_subscriber::{fmt as tracing_fmt, layer::SubscriberExt, Layer, Registry};

use crate::errors::Result;
use crate::logging::{AlertLayer, AlertingSink, Encoding, Level, LoggerConfig, Outputs, Sampler};

/// 致命路径的处理函数，参数为原因
pub type FatalHook = Arc<dyn Fn(&str) + Send + Sync>;

/// 默认的致命处理: 退出进程
pub fn exit_process() -> FatalHook {
    Arc::new(|_reason: &str| std::process::exit(1))
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// 日志核心: 配置、订阅器、采样器与已挂载的告警通道
///
/// 主输出与告警通道各用一个订阅器。阈值与采样只作用于主输出，
/// 告警通道按自身级别接收记录。
pub struct LoggerCore {
    config: LoggerConfig,
    dispatch: Dispatch,
    alerting: Option<Dispatch>,
    sampler: Option<Sampler>,
    alerts: Vec<Arc<AlertingSink>>,
    on_fatal: FatalHook,
}

impl LoggerCore {
    /// 构建日志核心；输出目标无法打开时返回错误
    pub fn build(
        config: LoggerConfig,
        alerts: Vec<Arc<AlertingSink>>,
        on_fatal: FatalHook,
    ) -> Result<Self> {
        let outputs = Outputs::open(&config.outputs)?;
        Ok(Self::with_outputs(config, outputs, alerts, on_fatal))
    }

    /// 使用已打开的输出构建
    pub fn with_outputs(
        config: LoggerConfig,
        outputs: Outputs,
        alerts: Vec<Arc<AlertingSink>>,
        on_fatal: FatalHook,
    ) -> Self {
        let output = tracing_subscriber::registry().with(format_layer(&config, outputs));

        let alerting = (!alerts.is_empty()).then(|| {
            let layers: Vec<BoxedLayer> = alerts
                .iter()
                .map(|sink| AlertLayer::new(Arc::clone(sink)).boxed())
                .collect();
            Dispatch::new(tracing_subscriber::registry().with(layers))
        });
        let sampler = config.sampling.map(Sampler::new);

        Self {
            config,
            dispatch: Dispatch::new(output),
            alerting,
            sampler,
            alerts,
            on_fatal,
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        self.config.level
    }

    /// 主输出的订阅器
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// 告警通道的订阅器，未挂载告警时为空
    pub fn alerting(&self) -> Option<&Dispatch> {
        self.alerting.as_ref()
    }

    pub fn alerts(&self) -> &[Arc<AlertingSink>] {
        &self.alerts
    }

    pub fn on_fatal(&self) -> &FatalHook {
        &self.on_fatal
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.config.level.enables(level)
    }

    /// 主输出的级别与采样判断
    pub fn check(&self, level: Level, message: &str) -> bool {
        if !self.enabled(level) {
            return false;
        }

        match &self.sampler {
            Some(sampler) => sampler.sample(level, message),
            None => true,
        }
    }

    /// 是否有告警通道接收该级别
    pub fn alerts_accept(&self, level: Level) -> bool {
        self.alerts.iter().any(|sink| sink.accepts(level))
    }

    pub fn captures_stacktrace(&self, level: Level) -> bool {
        level >= self.config.stacktrace_level
    }
}

impl fmt::Debug for LoggerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerCore")
            .field("config", &self.config)
            .field("sampler", &self.sampler)
            .field("alerts", &self.alerts)
            .finish()
    }
}

fn format_layer(config: &LoggerConfig, outputs: Outputs) -> BoxedLayer {
    match config.encoding {
        Encoding::Json => tracing_fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_target(false)
            .with_writer(outputs)
            .boxed(),
        Encoding::Console => tracing_fmt::layer()
            .pretty()
            .with_ansi(config.ansi)
            .with_file(false)
            .with_line_number(false)
            .with_target(false)
            .with_writer(outputs)
            .boxed(),
    }
}
