//! Единый тип ошибок публичного API.

use thiserror::Error;

/// Одна проблема валидации конфигурации: поле + сообщение.
/// Проблемы копятся списком, а не обрываются на первой.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum CnabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Собранная запись не сошлась с объявленной шириной макета —
    /// дефект таблицы полей, а не ошибка входных данных.
    #[error("structural layout error in record {record}: assembled {actual} bytes, declared {expected}")]
    Structural {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("validation failed: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Строка короче требуемого байтового диапазона.
    #[error("line {line}: field {field} needs bytes {start}..={end}, line has {len}")]
    Range {
        line: usize,
        field: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    /// Нарушено строгое чередование T/U в файле ретура.
    #[error("T/U pairing error: {0}")]
    Pairing(String),

    #[error("parse error: {0}")]
    Parse(String),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CnabError>;
