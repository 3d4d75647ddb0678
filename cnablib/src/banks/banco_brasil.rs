//! Ретур Banco do Brasil (CNAB 240): фильтр детальных строк, пары T/U,
//! таблицы диапазонов и слияние в логическую запись.

use std::io::BufRead;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{CnabError, Result};
use crate::layout;
use crate::model::ReturnRecord;
use crate::traits::ReturnFormat;

/// Байтовый диапазон поля, 1-индексированный, включительно с обеих сторон.
#[derive(Debug, Clone, Copy)]
pub struct FieldRange {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

const fn range(name: &'static str, start: usize, end: usize) -> FieldRange {
    FieldRange { name, start, end }
}

// Общие для обеих физических строк.
const SEQUENCE: FieldRange = range("sequence", 9, 13);
const SEGMENT: FieldRange = range("segment", 14, 14);

// Сегмент T — общие данные транзакции.
const T_OCCURRENCE_CODE: FieldRange = range("occurrence_code", 16, 17);
const T_AGENCY: FieldRange = range("agency_with_digit", 18, 23);
const T_BENEFICIARY_ACCOUNT: FieldRange = range("beneficiary_account", 24, 36);
const T_NOSSO_NUMERO: FieldRange = range("nosso_numero", 38, 57);
const T_WALLET: FieldRange = range("wallet", 58, 58);
const T_DUE_DATE: FieldRange = range("due_date", 74, 81);
const T_DOCUMENT_VALUE: FieldRange = range("document_value", 82, 96);
const T_RECEIVING_BANK: FieldRange = range("receiving_bank", 97, 99);
const T_RECEIVING_AGENCY: FieldRange = range("receiving_agency", 100, 105);
const T_TARIFF_VALUE: FieldRange = range("tariff_value", 199, 213);
const T_REASONS: FieldRange = range("occurrence_reasons", 214, 223);

// Сегмент U — суммы транзакции.
const U_INTEREST: FieldRange = range("interest_value", 18, 32);
const U_DISCOUNT: FieldRange = range("discount_value", 33, 47);
const U_ABATEMENT: FieldRange = range("abatement_value", 48, 62);
const U_IOF: FieldRange = range("iof_value", 63, 77);
const U_RECEIVED: FieldRange = range("amount_received", 78, 92);
const U_OTHER_EXPENSES: FieldRange = range("other_expenses", 108, 122);
const U_OTHER_INCOME: FieldRange = range("other_income", 123, 137);
const U_CREDIT_DATE: FieldRange = range("credit_date", 146, 153);
const U_OCCURRENCE_DATE: FieldRange = range("occurrence_date", 158, 165);

fn field(line: &str, idx: usize, r: FieldRange) -> Result<String> {
    layout::extract(line, r.start, r.end).ok_or(CnabError::Range {
        line: idx,
        field: r.name,
        start: r.start,
        end: r.end,
        len: line.chars().count(),
    })
}

fn amount(line: &str, idx: usize, r: FieldRange) -> Result<Decimal> {
    layout::parse_amount(&field(line, idx, r)?)
}

fn date(line: &str, idx: usize, r: FieldRange) -> Result<Option<NaiveDate>> {
    layout::parse_date(&field(line, idx, r)?)
}

pub struct BancoBrasil;

impl ReturnFormat for BancoBrasil {
    fn read<R: BufRead>(r: R) -> Result<Vec<ReturnRecord>> {
        // детальная строка: «3» в позиции 8, T или U в позиции 14;
        // заголовки, трейлеры и прочие сегменты отсеиваются здесь
        let detail = Regex::new(r"^.{7}3.{5}[TU]").map_err(|e| CnabError::Parse(e.to_string()))?;

        let mut detail_lines: Vec<(usize, String)> = Vec::new();
        for (idx, line) in r.lines().enumerate() {
            let line = line?;
            if detail.is_match(&line) {
                detail_lines.push((idx + 1, line));
            }
        }

        if detail_lines.len() % 2 != 0 {
            return Err(CnabError::Pairing(format!(
                "{} detail lines, expected an even count of alternating T/U",
                detail_lines.len()
            )));
        }

        let mut records = Vec::with_capacity(detail_lines.len() / 2);
        for pair in detail_lines.chunks_exact(2) {
            records.push(merge_pair(&pair[0], &pair[1])?);
        }
        Ok(records)
    }
}

/// Слияние пары T + U в одну логическую запись. Пара валидна, только если
/// сегменты идут в порядке T, U и несут один номер последовательности.
fn merge_pair(t: &(usize, String), u: &(usize, String)) -> Result<ReturnRecord> {
    let (t_idx, t_line) = (t.0, t.1.as_str());
    let (u_idx, u_line) = (u.0, u.1.as_str());

    let t_segment = field(t_line, t_idx, SEGMENT)?;
    let u_segment = field(u_line, u_idx, SEGMENT)?;
    if t_segment != "T" || u_segment != "U" {
        return Err(CnabError::Pairing(format!(
            "lines {t_idx}/{u_idx}: got segments {t_segment}/{u_segment}, expected T/U"
        )));
    }

    let sequence = field(t_line, t_idx, SEQUENCE)?;
    let u_sequence = field(u_line, u_idx, SEQUENCE)?;
    if sequence != u_sequence {
        return Err(CnabError::Pairing(format!(
            "lines {t_idx}/{u_idx}: sequence {sequence} paired with {u_sequence}"
        )));
    }

    Ok(ReturnRecord {
        occurrence_code: field(t_line, t_idx, T_OCCURRENCE_CODE)?,
        agency_with_digit: field(t_line, t_idx, T_AGENCY)?,
        beneficiary_account: field(t_line, t_idx, T_BENEFICIARY_ACCOUNT)?,
        nosso_numero: field(t_line, t_idx, T_NOSSO_NUMERO)?,
        wallet: field(t_line, t_idx, T_WALLET)?,
        due_date: date(t_line, t_idx, T_DUE_DATE)?,
        document_value: amount(t_line, t_idx, T_DOCUMENT_VALUE)?,
        receiving_bank: field(t_line, t_idx, T_RECEIVING_BANK)?,
        receiving_agency: field(t_line, t_idx, T_RECEIVING_AGENCY)?,
        sequence,
        tariff_value: amount(t_line, t_idx, T_TARIFF_VALUE)?,
        occurrence_reasons: layout::reason_codes(&field(t_line, t_idx, T_REASONS)?),

        interest_value: amount(u_line, u_idx, U_INTEREST)?,
        discount_value: amount(u_line, u_idx, U_DISCOUNT)?,
        abatement_value: amount(u_line, u_idx, U_ABATEMENT)?,
        iof_value: amount(u_line, u_idx, U_IOF)?,
        amount_received: amount(u_line, u_idx, U_RECEIVED)?,
        other_expenses: amount(u_line, u_idx, U_OTHER_EXPENSES)?,
        other_income: amount(u_line, u_idx, U_OTHER_INCOME)?,
        credit_date: date(u_line, u_idx, U_CREDIT_DATE)?,
        occurrence_date: date(u_line, u_idx, U_OCCURRENCE_DATE)?,
    })
}
