// 日志上下文字段提取

use moe_common::{keys, Context};

use crate::logging::Field;

/// 字符串类上下文字段，按输出顺序排列
const STRING_KEYS: [&str; 6] = [
    keys::ISSUER,
    keys::IP,
    keys::DEVICE_IP,
    keys::DEVICE_ID,
    keys::APP_VERSION,
    keys::PLATFORM,
];

/// 从请求上下文提取日志字段
///
/// 顺序固定为 uid、issuer、ip、device_ip、device_id、app_version、platform；
/// 值为 0 或空串的字段视为缺失，不输出。
pub fn context_fields(ctx: &Context) -> Vec<Field> {
    let mut fields = Vec::with_capacity(STRING_KEYS.len() + 1);

    let uid = ctx.int64(keys::UID);
    if uid != 0 {
        fields.push(Field::new(keys::UID, uid));
    }

    for key in STRING_KEYS {
        let value = ctx.string(key);
        if !value.is_empty() {
            fields.push(Field::new(key, value));
        }
    }

    fields
}
