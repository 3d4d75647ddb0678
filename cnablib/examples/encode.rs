use chrono::NaiveDate;
use cnablib::banks::santander::Santander;
use cnablib::model::{BeneficiaryConfig, PaymentInstruction};
use cnablib::traits::LayoutVariant;
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: один título -> детальный сегмент P (stdout)
    let config = BeneficiaryConfig {
        agency: "1234".into(),
        agency_digit: "9".into(),
        account: "567890123".into(),
        account_digit: "0".into(),
        agreement: "1234567".into(),
        wallet: "1".into(),
        registration_form: "1".into(),
        document_type: "1".into(),
        acceptance: "N".into(),
    };
    let payment = PaymentInstruction {
        nosso_numero: "42".into(),
        document_number: "FAT-0042".into(),
        amount: Decimal::new(150000, 2),
        due_date: NaiveDate::from_ymd_opt(2024, 3, 15).ok_or("bad date")?,
        issue_date: NaiveDate::from_ymd_opt(2024, 2, 1).ok_or("bad date")?,
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
    };

    println!("{}", Santander.build_detail_segment(&payment, &config, 1, 1)?);
    Ok(())
}
