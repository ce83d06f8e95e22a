// 结构化字段

use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use std::fmt;

/// 错误字段使用的固定键名
pub const ERROR_KEY: &str = "error";

/// 字段值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// 错误消息（含 source 链）
    Error(String),
    /// 任意可序列化的嵌套结构
    Json(Value),
    Null,
}

impl FieldValue {
    /// 序列化任意值；失败时以错误文本代替
    pub fn any<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::Null) => Self::Null,
            Ok(Value::Bool(b)) => Self::Bool(b),
            Ok(Value::String(s)) => Self::Str(s),
            Ok(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or_default())
                }
            }
            Ok(other) => Self::Json(other),
            Err(err) => Self::Error(format!("json: {}", err)),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Str(s) | Self::Error(s) => Value::String(s.clone()),
            Self::Int(i) => Value::from(*i),
            Self::Uint(u) => Value::from(*u),
            Self::Float(f) => Value::from(*f),
            Self::Bool(b) => Value::Bool(*b),
            Self::Json(v) => v.clone(),
            Self::Null => Value::Null,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) | Self::Error(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Uint(u) => write!(f, "{}", u),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Json(v) => write!(f, "{}", v),
            Self::Null => f.write_str("null"),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(Uint, u64, u8, u16, u32, u64);

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// 单条记录上的键值对
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// 任意可序列化值，序列化交给 serde
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::any(value),
        }
    }

    /// 以 `error` 为键包装错误，source 链以 `: ` 拼接
    pub fn error(err: &(dyn StdError + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self {
            key: ERROR_KEY.to_string(),
            value: FieldValue::Error(message),
        }
    }
}

/// 构造字段
pub fn make_field(key: impl Into<String>, value: impl Into<FieldValue>) -> Field {
    Field::new(key, value)
}

/// 构造错误字段
pub fn make_error_field(err: &(dyn StdError + 'static)) -> Field {
    Field::error(err)
}

/// 将字段按顺序渲染为 JSON 对象；重复键以后者为准
pub fn render_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Map<String, Value> {
    let mut map = Map::new();
    for field in fields {
        map.insert(field.key.clone(), field.value.to_json());
    }
    map
}
