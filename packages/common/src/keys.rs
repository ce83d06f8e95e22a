// 上下文键名
// 由鉴权、网关等中间件写入，日志门面按这些键读取

/// 用户 ID（整数）
pub const UID: &str = "uid";

/// 令牌签发方
pub const ISSUER: &str = "issuer";

/// 客户端 IP
pub const IP: &str = "ip";

/// 设备上报的 IP
pub const DEVICE_IP: &str = "device_ip";

pub const DEVICE_ID: &str = "device_id";

pub const APP_VERSION: &str = "app_version";

pub const PLATFORM: &str = "platform";
