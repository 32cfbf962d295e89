use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AppError, BankError};
use crate::models::{QuestionBank, QuestionBankData};

/// 题库覆盖文件名
pub const BANK_FILE: &str = "questions.toml";

/// 获取数据目录路径 (~/.local/share/quizsession/)
pub fn get_data_dir() -> Result<PathBuf, AppError> {
    let data_dir = dirs::data_dir()
        .ok_or(AppError::NoDataDir)?
        .join("quizsession");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 从TOML文件加载题库；文件不存在时使用内置题库
///
/// 只读，不会写回文件。
pub fn load_bank(path: &Path) -> Result<QuestionBank, BankError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no bank file, using built-in questions");
            return Ok(QuestionBank::builtin());
        }
        Err(source) => {
            return Err(BankError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let data: QuestionBankData = toml::from_str(&content).map_err(|source| BankError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let bank = QuestionBank::from_data(data)?;

    for (index, problem) in bank.diagnostics() {
        tracing::warn!(question = index, "{problem}");
    }
    tracing::info!(path = %path.display(), questions = bank.len(), "question bank loaded");

    Ok(bank)
}
