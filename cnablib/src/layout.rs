//! Примитивы фиксированной ширины: рендер поля, извлечение по байтовым
//! позициям, кодеки сумм/дат и сборщик сегмента по декларативной таблице.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CnabError, Result};

/// Ширина детальной записи семейства CNAB 240.
pub const RECORD_WIDTH: usize = 240;

/// «Пустая» дата в файле.
pub const EMPTY_DATE: &str = "00000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Zero,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
}

impl Fill {
    fn ch(self) -> char {
        match self {
            Fill::Zero => '0',
            Fill::Space => ' ',
        }
    }
}

/// Всегда возвращает ровно `width` символов. Лишнее усекается справа,
/// ведущие значащие символы сохраняются.
pub fn render(value: &str, width: usize, fill: Fill, justify: Justify) -> String {
    let len = value.chars().count();
    if len > width {
        return value.chars().take(width).collect();
    }
    let pad: String = std::iter::repeat(fill.ch()).take(width - len).collect();
    match justify {
        Justify::Left => format!("{value}{pad}"),
        Justify::Right => format!("{pad}{value}"),
    }
}

/// Срез по 1-индексированному диапазону, включительно с обеих сторон.
/// `None`, если строка короче `end` — вызывающий оборачивает в Range-ошибку
/// с контекстом (номер строки, имя поля).
pub fn extract(line: &str, start: usize, end: usize) -> Option<String> {
    debug_assert!(start >= 1 && start <= end);
    if line.chars().count() < end {
        return None;
    }
    Some(line.chars().skip(start - 1).take(end - start + 1).collect())
}

/// Сумма как целое число центаво с нулями слева: 1234.5 @ 15 → «000000000123450».
/// Округление до центаво — half away from zero.
pub fn render_amount(value: Decimal, width: usize) -> Result<String> {
    let cents = (value * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| CnabError::Parse(format!("amount out of range: {value}")))?;
    Ok(render(&cents.to_string(), width, Fill::Zero, Justify::Right))
}

/// Обратная операция: строка центаво → Decimal со шкалой 2.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let cents: i64 = raw
        .trim()
        .parse()
        .map_err(|e| CnabError::Parse(format!("amount {raw:?}: {e}")))?;
    Ok(Decimal::new(cents, 2))
}

/// Дата как ddMMyyyy без разделителей.
pub fn render_date(d: NaiveDate) -> String {
    d.format("%d%m%Y").to_string()
}

pub fn render_opt_date(d: Option<NaiveDate>) -> String {
    match d {
        Some(d) => render_date(d),
        None => EMPTY_DATE.to_string(),
    }
}

/// «00000000» и пробелы считаются отсутствующей датой.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '0') {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%d%m%Y")
        .map(Some)
        .map_err(|e| CnabError::Parse(format!("date {raw:?}: {e}")))
}

/// Регион причин события: коды по два символа; пустые и сентинел «00»
/// отбрасываются.
pub fn reason_codes(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw.chars().collect();
    chars
        .chunks(2)
        .map(|c| c.iter().collect::<String>())
        .filter(|c| !c.trim().is_empty() && c != "00")
        .collect()
}

/// Декларативное описание одного поля сегмента.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub width: usize,
    pub fill: Fill,
    pub justify: Justify,
}

/// Числовое поле: нули слева, выравнивание вправо.
pub const fn num(name: &'static str, width: usize) -> FieldDef {
    FieldDef {
        name,
        width,
        fill: Fill::Zero,
        justify: Justify::Right,
    }
}

/// Текстовое поле: пробелы справа, выравнивание влево.
pub const fn text(name: &'static str, width: usize) -> FieldDef {
    FieldDef {
        name,
        width,
        fill: Fill::Space,
        justify: Justify::Left,
    }
}

/// Сумма ширин таблицы — инвариант (= RECORD_WIDTH), проверяемый тестами
/// для каждого объявленного типа записи.
pub fn table_width(table: &[FieldDef]) -> usize {
    table.iter().map(|f| f.width).sum()
}

/// Собирает сегмент по таблице: значения подаются строго в порядке таблицы,
/// имя поля защищает от рассинхронизации таблицы и кода композиции.
pub struct SegmentBuilder {
    record: &'static str,
    table: &'static [FieldDef],
    buf: String,
    next: usize,
}

impl SegmentBuilder {
    pub fn new(record: &'static str, table: &'static [FieldDef]) -> Self {
        Self {
            record,
            table,
            buf: String::with_capacity(RECORD_WIDTH),
            next: 0,
        }
    }

    pub fn push(&mut self, name: &'static str, value: &str) -> &mut Self {
        match self.table.get(self.next) {
            Some(def) => {
                debug_assert_eq!(def.name, name, "field order drift in {}", self.record);
                self.buf
                    .push_str(&render(value, def.width, def.fill, def.justify));
            }
            // лишний push: счётчик разойдётся с таблицей и finish() вернёт Structural
            None => self.buf.push_str(value),
        }
        self.next += 1;
        self
    }

    pub fn finish(self) -> Result<String> {
        let actual = self.buf.chars().count();
        if self.next != self.table.len() || actual != RECORD_WIDTH {
            return Err(CnabError::Structural {
                record: self.record,
                expected: RECORD_WIDTH,
                actual,
            });
        }
        Ok(self.buf)
    }
}
