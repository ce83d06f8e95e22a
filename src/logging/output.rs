// 日志输出目标

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;

use crate::errors::{LoggerError, Result};

/// 内存缓冲区，多用于测试或嵌入场景
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的内容
    pub fn contents(&self) -> String {
        match self.buffer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).to_string(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).to_string(),
        }
    }

    /// 按行切分的内容
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }

    fn append(&self, buf: &[u8]) -> io::Result<()> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("memory buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(())
    }
}

/// 输出目标
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stderr,
    Stdout,
    File(PathBuf),
    Memory(MemoryBuffer),
}

impl OutputTarget {
    /// 解析输出路径: `stderr`、`stdout` 或文件路径
    pub fn from_path(path: &str) -> Self {
        match path {
            "stderr" => Self::Stderr,
            "stdout" => Self::Stdout,
            other => Self::File(PathBuf::from(other)),
        }
    }

    fn open(&self) -> Result<OpenedTarget> {
        match self {
            Self::Stderr => Ok(OpenedTarget::Stderr),
            Self::Stdout => Ok(OpenedTarget::Stdout),
            Self::Memory(buffer) => Ok(OpenedTarget::Memory(buffer.clone())),
            Self::File(path) => open_file(path).map(|appender| OpenedTarget::File(Arc::new(appender))),
        }
    }
}

fn open_file(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggerError::build(format!("无效的日志文件路径: {}", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&directory)
        .map_err(|e| LoggerError::build(format!("open {}: {}", path.display(), e)))
}

#[derive(Clone)]
enum OpenedTarget {
    Stderr,
    Stdout,
    File(Arc<RollingFileAppender>),
    Memory(MemoryBuffer),
}

impl OpenedTarget {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Stderr => io::stderr().write_all(buf),
            Self::Stdout => io::stdout().write_all(buf),
            Self::File(appender) => appender.make_writer().write_all(buf),
            Self::Memory(buffer) => buffer.append(buf),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            Self::Stderr => io::stderr().flush(),
            Self::Stdout => io::stdout().flush(),
            Self::File(appender) => appender.make_writer().flush(),
            Self::Memory(_) => Ok(()),
        }
    }
}

/// 已打开的输出集合，每条记录写入全部目标
#[derive(Clone)]
pub struct Outputs {
    targets: Arc<[OpenedTarget]>,
}

impl Outputs {
    /// 打开全部输出目标；任一文件无法打开即失败
    pub fn open(targets: &[OutputTarget]) -> Result<Self> {
        let opened = targets
            .iter()
            .map(OutputTarget::open)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            targets: opened.into(),
        })
    }

    /// 仅标准错误输出，打开不会失败
    pub fn stderr() -> Self {
        Self {
            targets: Arc::from(vec![OpenedTarget::Stderr]),
        }
    }
}

impl Write for Outputs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut first_error = None;
        for target in self.targets.iter() {
            if let Err(e) = target.write_all(buf) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        for target in self.targets.iter() {
            target.flush()?;
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Outputs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
