//! 错误类型
//!
//! 会话状态迁移是全函数，不产生错误；只有题库加载和终端 I/O 会失败。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 题库加载错误
#[derive(Debug, Error)]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse question bank {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 应用级错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not locate the user data directory")]
    NoDataDir,
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
