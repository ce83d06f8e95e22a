// 请求上下文
// 请求作用域内的只读键值表，缺失的键返回零值

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::keys;

/// 上下文中的值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Int(i64),
    Str(String),
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// 请求上下文
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    values: HashMap<String, ContextValue>,
}

impl Context {
    /// 创建空上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一个值，返回新的上下文
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// 设置用户 ID
    pub fn with_uid(self, uid: i64) -> Self {
        self.with_value(keys::UID, uid)
    }

    /// 设置签发方
    pub fn with_issuer(self, issuer: impl Into<String>) -> Self {
        self.with_value(keys::ISSUER, issuer.into())
    }

    /// 设置客户端 IP
    pub fn with_ip(self, ip: impl Into<String>) -> Self {
        self.with_value(keys::IP, ip.into())
    }

    /// 读取整数，缺失或类型不符时返回 0
    pub fn int64(&self, key: &str) -> i64 {
        match self.values.get(key) {
            Some(ContextValue::Int(value)) => *value,
            _ => 0,
        }
    }

    /// 读取字符串，缺失或类型不符时返回空串
    pub fn string(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(ContextValue::Str(value)) => value.as_str(),
            _ => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_yield_zero_values() {
        let context = Context::new();

        assert_eq!(context.int64(keys::UID), 0);
        assert_eq!(context.string(keys::ISSUER), "");
        assert!(context.is_empty());
    }

    #[test]
    fn test_typed_lookup() {
        let context = Context::new()
            .with_uid(42)
            .with_issuer("moe")
            .with_value(keys::PLATFORM, "ios");

        assert_eq!(context.int64(keys::UID), 42);
        assert_eq!(context.string(keys::ISSUER), "moe");
        assert_eq!(context.string(keys::PLATFORM), "ios");
        assert_eq!(context.len(), 3);
    }

    #[test]
    fn test_type_mismatch_yields_zero_value() {
        let context = Context::new()
            .with_value(keys::UID, "42")
            .with_value(keys::IP, 7);

        assert_eq!(context.int64(keys::UID), 0);
        assert_eq!(context.string(keys::IP), "");
    }

    #[test]
    fn test_from_iterator_and_json() {
        let context: Context = [(keys::UID, ContextValue::Int(7)), (keys::IP, "10.0.0.1".into())]
            .into_iter()
            .collect();

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["values"]["uid"], 7);
        assert_eq!(json["values"]["ip"], "10.0.0.1");

        let decoded: Context = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, context);
    }
}
