use chrono::NaiveDate;
use cnablib::banks::banco_brasil::BancoBrasil;
use cnablib::error::CnabError;
use cnablib::traits::ReturnFormat;
use rust_decimal::Decimal;
use std::io::Cursor;

/// Пишет значение в строку начиная с 1-индексированной позиции.
fn splice(line: &mut String, start: usize, value: &str) {
    let mut chars: Vec<char> = line.chars().collect();
    for (i, c) in value.chars().enumerate() {
        chars[start - 1 + i] = c;
    }
    *line = chars.into_iter().collect();
}

fn blank_line() -> String {
    " ".repeat(240)
}

fn t_line(sequence: &str) -> String {
    let mut l = blank_line();
    splice(&mut l, 1, "001");
    splice(&mut l, 8, "3");
    splice(&mut l, 9, sequence);
    splice(&mut l, 14, "T");
    splice(&mut l, 16, "06"); // liquidação
    splice(&mut l, 18, "123456");
    splice(&mut l, 24, "0000567890123");
    splice(&mut l, 38, "00000000000000000042");
    splice(&mut l, 58, "1");
    splice(&mut l, 74, "15032024");
    splice(&mut l, 82, "000000000150000");
    splice(&mut l, 97, "001");
    splice(&mut l, 100, "654321");
    splice(&mut l, 199, "000000000000105");
    splice(&mut l, 214, "0102000000");
    l
}

fn u_line(sequence: &str) -> String {
    let mut l = blank_line();
    splice(&mut l, 1, "001");
    splice(&mut l, 8, "3");
    splice(&mut l, 9, sequence);
    splice(&mut l, 14, "U");
    splice(&mut l, 18, "000000000000050");
    splice(&mut l, 33, "000000000000000");
    splice(&mut l, 48, "000000000000000");
    splice(&mut l, 63, "000000000000000");
    splice(&mut l, 78, "000000000150000");
    splice(&mut l, 108, "000000000000000");
    splice(&mut l, 123, "000000000000000");
    splice(&mut l, 146, "20032024");
    splice(&mut l, 158, "18032024");
    l
}

fn header_line() -> String {
    let mut l = blank_line();
    splice(&mut l, 1, "001");
    splice(&mut l, 8, "0");
    l
}

fn trailer_line() -> String {
    let mut l = blank_line();
    splice(&mut l, 1, "001");
    splice(&mut l, 8, "5");
    l
}

/// Детальная строка чужого подтипа — тоже шум для этого декодера.
fn j_line() -> String {
    let mut l = blank_line();
    splice(&mut l, 1, "001");
    splice(&mut l, 8, "3");
    splice(&mut l, 9, "00009");
    splice(&mut l, 14, "J");
    l
}

#[test]
fn noise_lines_contribute_zero_records() {
    let file = [
        header_line(),
        j_line(),
        t_line("00001"),
        u_line("00001"),
        trailer_line(),
    ]
    .join("\n");

    let records = BancoBrasil::read(Cursor::new(file)).expect("read retorno");
    assert_eq!(records.len(), 1);
}

#[test]
fn merged_record_carries_t_and_u_fields() {
    let file = [t_line("00001"), u_line("00001")].join("\n");
    let records = BancoBrasil::read(Cursor::new(file)).expect("read retorno");
    let rec = &records[0];

    // сегмент T
    assert_eq!(rec.occurrence_code, "06");
    assert_eq!(rec.agency_with_digit, "123456");
    assert_eq!(rec.nosso_numero, "00000000000000000042");
    assert_eq!(rec.wallet, "1");
    assert_eq!(rec.sequence, "00001");
    assert_eq!(
        rec.due_date,
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
    assert_eq!(rec.document_value, Decimal::new(150000, 2));
    assert_eq!(rec.receiving_bank, "001");
    assert_eq!(rec.tariff_value, Decimal::new(105, 2));
    assert_eq!(rec.occurrence_reasons, vec!["01", "02"]);

    // сегмент U
    assert_eq!(rec.interest_value, Decimal::new(50, 2));
    assert_eq!(rec.amount_received, Decimal::new(150000, 2));
    assert_eq!(rec.discount_value, Decimal::ZERO);
    assert_eq!(
        rec.credit_date,
        NaiveDate::from_ymd_opt(2024, 3, 20)
    );
    assert_eq!(
        rec.occurrence_date,
        NaiveDate::from_ymd_opt(2024, 3, 18)
    );
}

#[test]
fn two_pairs_yield_two_records() {
    let file = [
        header_line(),
        t_line("00001"),
        u_line("00001"),
        t_line("00003"),
        u_line("00003"),
        trailer_line(),
    ]
    .join("\n");

    let records = BancoBrasil::read(Cursor::new(file)).expect("read retorno");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].sequence, "00003");
}

#[test]
fn odd_detail_count_is_a_pairing_error() {
    let file = [t_line("00001"), u_line("00001"), t_line("00002")].join("\n");
    let err = BancoBrasil::read(Cursor::new(file)).expect_err("odd count");
    assert!(matches!(err, CnabError::Pairing(_)), "{err}");
}

#[test]
fn mismatched_sequence_is_a_pairing_error() {
    let file = [t_line("00001"), u_line("00003")].join("\n");
    let err = BancoBrasil::read(Cursor::new(file)).expect_err("sequence mismatch");
    assert!(matches!(err, CnabError::Pairing(_)), "{err}");
}

#[test]
fn u_before_t_is_a_pairing_error() {
    let file = [u_line("00001"), t_line("00001")].join("\n");
    let err = BancoBrasil::read(Cursor::new(file)).expect_err("wrong order");
    assert!(matches!(err, CnabError::Pairing(_)), "{err}");
}

#[test]
fn short_line_reports_field_and_line() {
    let truncated: String = t_line("00001").chars().take(210).collect();
    let file = [truncated, u_line("00001")].join("\n");
    let err = BancoBrasil::read(Cursor::new(file)).expect_err("short line");
    match err {
        CnabError::Range { line, field, .. } => {
            assert_eq!(line, 1);
            assert_eq!(field, "tariff_value");
        }
        other => panic!("expected range error, got {other}"),
    }
}

#[test]
fn empty_file_decodes_to_no_records() {
    let records = BancoBrasil::read(Cursor::new("")).expect("empty");
    assert!(records.is_empty());
}
