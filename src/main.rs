use anyhow::Context as _;
use moe_logger::config::ConfigLoader;
use moe_logger::logging::{ChannelTransport, LogFacade};
use moe_logger::{make_field, Context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化配置
    let config = ConfigLoader::init().context("加载配置失败")?;

    // 初始化日志门面，级别无效时进程退出
    let facade = LogFacade::builder()
        .level(config.logging.level.clone())
        .outputs(config.logging.output_targets())
        .build();

    let logger = facade.get_logger();
    logger.infow("日志系统初始化完成", [("summary", ConfigLoader::summary(&config))]);

    // 挂载告警通道，失败不影响启动
    if let Some(dsn) = config.logging.alert_dsn() {
        let (transport, mut receiver) = ChannelTransport::new();
        match facade.attach_alerting_sink(dsn, transport) {
            Ok(()) => {
                let forwarder = facade.get_logger();
                tokio::spawn(async move {
                    while let Some(event) = receiver.recv().await {
                        forwarder.infow(
                            "告警事件已生成",
                            [
                                ("event_id", event.event_id.to_string()),
                                ("project_id", event.project_id.clone()),
                            ],
                        );
                    }
                });
            }
            Err(e) => logger.warnw(
                "告警通道挂载失败",
                [("code", e.error_code().to_string()), ("error", e.to_string())],
            ),
        }
    }

    let ctx = Context::new().with_uid(1).with_issuer("moe").with_ip("127.0.0.1");
    facade
        .get_context_logger(&ctx)
        .info("请求上下文示例", &[make_field("path", "/health")]);

    tokio::signal::ctrl_c().await.context("等待退出信号失败")?;
    logger.info("收到退出信号");

    Ok(())
}
