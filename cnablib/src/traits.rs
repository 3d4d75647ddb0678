//! Швы между движком и банками: вариант макета (кодирование) и
//! формат ретура (декодирование) поверх std::io::BufRead.

use std::io::BufRead;

use crate::error::{Result, ValidationIssue};
use crate::model::{BeneficiaryConfig, PaymentInstruction, ReturnRecord};

/// Один банк = один вариант макета: константы банка, проверка конфигурации
/// и композиция детального сегмента в документированном банком порядке.
/// Вариант — чистое значение без состояния.
pub trait LayoutVariant {
    /// Трёхзначный код банка («033», «001», ...).
    fn bank_code(&self) -> &'static str;

    /// Имя банка, добитое пробелами до 30 символов.
    fn bank_name(&self) -> &'static str;

    fn file_layout_version(&self) -> &'static str;

    fn batch_layout_version(&self) -> &'static str;

    /// Проверка границ, объявленных банком. Все проблемы сразу,
    /// без обрыва на первой.
    fn validate(&self, config: &BeneficiaryConfig) -> Vec<ValidationIssue>;

    /// Детальный сегмент ровно в 240 символов. Чистая функция: номера
    /// лота/последовательности выделяет вызывающая сторона.
    fn build_detail_segment(
        &self,
        payment: &PaymentInstruction,
        config: &BeneficiaryConfig,
        lot: u32,
        sequence: u32,
    ) -> Result<String>;
}

/// Декодер файла ретура конкретного банка.
pub trait ReturnFormat {
    fn read<R: BufRead>(r: R) -> Result<Vec<ReturnRecord>>;
}

/// Реестр вариантов: код банка → вариант.
pub fn variant_for(bank_code: &str) -> Option<&'static dyn LayoutVariant> {
    match bank_code {
        crate::banks::santander::BANK_CODE => Some(&crate::banks::santander::Santander),
        _ => None,
    }
}
