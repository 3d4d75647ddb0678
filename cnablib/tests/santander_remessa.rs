use chrono::NaiveDate;
use cnablib::banks::santander::{Santander, SEGMENT_P};
use cnablib::error::CnabError;
use cnablib::layout;
use cnablib::model::{BeneficiaryConfig, PaymentInstruction};
use cnablib::traits::{variant_for, LayoutVariant};
use rust_decimal::Decimal;

fn config() -> BeneficiaryConfig {
    BeneficiaryConfig {
        agency: "1234".into(),
        agency_digit: "9".into(),
        account: "567890123".into(),
        account_digit: "0".into(),
        agreement: "1234567".into(),
        wallet: "1".into(),
        registration_form: "1".into(),
        document_type: "1".into(),
        acceptance: "N".into(),
    }
}

fn payment() -> PaymentInstruction {
    PaymentInstruction {
        nosso_numero: "42".into(),
        document_number: "DOC-1".into(),
        amount: Decimal::new(150000, 2), // 1500.00
        due_date: NaiveDate::from_ymd_opt(2024, 3, 15).expect("due"),
        issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("issue"),
        payer_document: "12345678901".into(),
        movement_code: "01".into(),
        species_code: "02".into(),
        interest_code: "3".into(),
        interest_value: Decimal::ZERO,
        discount_code: "0".into(),
        discount_date: None,
        discount_value: Decimal::ZERO,
        iof_value: Decimal::ZERO,
        abatement_value: Decimal::ZERO,
        protest_code: "3".into(),
        protest_days: 0,
    }
}

fn segment() -> String {
    Santander
        .build_detail_segment(&payment(), &config(), 1, 1)
        .expect("segment P")
}

#[test]
fn segment_p_table_sums_to_record_width() {
    assert_eq!(layout::table_width(SEGMENT_P), layout::RECORD_WIDTH);
}

#[test]
fn segment_p_is_exactly_240_chars() {
    assert_eq!(segment().chars().count(), 240);
}

#[test]
fn segment_p_field_positions() {
    let s = segment();
    // банк, лот, тип записи, последовательность, буква сегмента
    assert_eq!(&s[0..3], "033");
    assert_eq!(&s[3..7], "0001");
    assert_eq!(&s[7..8], "3");
    assert_eq!(&s[8..13], "00001");
    assert_eq!(&s[13..14], "P");
    // агентство и счёт
    assert_eq!(&s[17..21], "1234");
    assert_eq!(&s[22..31], "567890123");
    // nosso número в 13 позиций с нулями
    assert_eq!(&s[44..57], "0000000000042");
    // номер документа: влево, добит пробелами до 15
    assert_eq!(&s[62..77], "DOC-1          ");
    // дата векселя (позиции 78-85) и номинал в центаво
    assert_eq!(&s[77..85], "15032024");
    assert_eq!(&s[85..100], "000000000150000");
    // хвост: протест и зарезервированные поля
    assert_eq!(&s[220..221], "3");
    assert_eq!(&s[221..223], "00");
    assert_eq!(&s[229..240], "           ");
}

#[test]
fn amount_field_round_trips() {
    let s = segment();
    let raw = layout::extract(&s, 86, 100).expect("amount slice");
    assert_eq!(
        layout::parse_amount(&raw).expect("parse"),
        Decimal::new(150000, 2)
    );
}

#[test]
fn interest_date_is_zero_when_exempt() {
    let s = segment();
    assert_eq!(&s[118..126], "00000000");
}

#[test]
fn interest_date_follows_due_date() {
    let mut p = payment();
    p.interest_code = "1".into();
    p.interest_value = Decimal::new(150, 2);
    let s = Santander
        .build_detail_segment(&p, &config(), 1, 1)
        .expect("segment P");
    assert_eq!(&s[118..126], "15032024");
    assert_eq!(&s[126..141], "000000000000150");
}

#[test]
fn long_document_number_is_truncated_to_slot() {
    let mut p = payment();
    p.document_number = "X".repeat(30);
    let s = Santander
        .build_detail_segment(&p, &config(), 1, 1)
        .expect("segment P");
    assert_eq!(s.chars().count(), 240);
    assert_eq!(&s[62..77], &"X".repeat(15));
}

#[test]
fn validation_collects_all_issues() {
    let cfg = BeneficiaryConfig {
        agency: "12345".into(),      // длиннее 4
        account: "1234567890".into(), // длиннее 9
        wallet: "".into(),           // отсутствует
        agreement: "".into(),        // отсутствует
        ..config()
    };
    let issues = Santander.validate(&cfg);
    let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
    assert_eq!(fields, vec!["wallet", "agreement", "account", "agency"]);
}

#[test]
fn valid_config_has_no_issues() {
    assert!(Santander.validate(&config()).is_empty());
}

#[test]
fn validation_error_lists_every_field() {
    let mut cfg = config();
    cfg.wallet = "".into();
    cfg.agency = "12345".into();
    let err = CnabError::Validation(Santander.validate(&cfg));
    let text = err.to_string();
    assert!(text.contains("wallet"), "{text}");
    assert!(text.contains("agency"), "{text}");
}

#[test]
fn registry_resolves_bank_code() {
    let v = variant_for("033").expect("santander registered");
    assert_eq!(v.bank_code(), "033");
    assert_eq!(v.bank_name().chars().count(), 30);
    assert_eq!(v.file_layout_version(), "040");
    assert_eq!(v.batch_layout_version(), "030");
    assert!(variant_for("999").is_none());
}
