//! Вариант макета Santander: ремесса CNAB 240, детальный сегмент P.

use crate::error::{Result, ValidationIssue};
use crate::layout::{self, num, text, FieldDef, SegmentBuilder};
use crate::model::{BeneficiaryConfig, PaymentInstruction};
use crate::traits::LayoutVariant;

pub const BANK_CODE: &str = "033";
const BANK_NAME: &str = "Banco Santander               ";
const FILE_LAYOUT_VERSION: &str = "040";
const BATCH_LAYOUT_VERSION: &str = "030";

const RECORD_TYPE_DETAIL: &str = "3";
const SEGMENT_LETTER: &str = "P";

// Поля, которые банк резервирует, но не обрабатывает. Явные константы,
// чтобы их наличие было видно при аудите макета.
const COLLECTING_AGENCY: &str = "0000";
const WRITE_OFF_CODE: &str = "0";
const WRITE_OFF_BANK: &str = "0";
const WRITE_OFF_DAYS: &str = "00";
const CURRENCY_CODE: &str = "00";

// Границы конфигурации, объявленные банком.
const WALLET_LEN: usize = 1;
const MAX_AGREEMENT_LEN: usize = 15;
const MAX_ACCOUNT_LEN: usize = 9;
const MAX_AGENCY_LEN: usize = 4;

/// Сегмент P в документированном банком порядке полей.
/// Инвариант: сумма ширин равна 240 (закреплено тестом).
pub const SEGMENT_P: &[FieldDef] = &[
    num("bank_code", 3),
    num("lot", 4),
    num("record_type", 1),
    num("sequence", 5),
    text("segment", 1),
    text("reserved_a", 1),
    num("movement_code", 2),
    num("agency", 4),
    text("agency_digit", 1),
    num("account", 9),
    text("account_digit", 1),
    num("account_repeat", 9),
    text("account_repeat_digit", 1),
    text("reserved_b", 2),
    num("nosso_numero", 13),
    num("wallet", 1),
    num("registration_form", 1),
    text("document_type", 1),
    text("reserved_c", 2),
    text("document_number", 15),
    num("due_date", 8),
    num("amount", 15),
    num("collecting_agency", 4),
    text("collecting_agency_digit", 1),
    text("reserved_d", 1),
    num("species_code", 2),
    text("acceptance", 1),
    num("issue_date", 8),
    num("interest_code", 1),
    num("interest_date", 8),
    num("interest_value", 15),
    num("discount_code", 1),
    num("discount_date", 8),
    num("discount_value", 15),
    num("iof_value", 15),
    num("abatement_value", 15),
    text("company_reference", 25),
    num("protest_code", 1),
    num("protest_days", 2),
    num("write_off_code", 1),
    num("write_off_bank", 1),
    num("write_off_days", 2),
    num("currency_code", 2),
    text("reserved_e", 11),
];

pub struct Santander;

/// Дата юроса: для кодов 1/2 банк ждёт дату векселя, иначе нули.
fn interest_date(payment: &PaymentInstruction) -> String {
    match payment.interest_code.as_str() {
        "1" | "2" => layout::render_date(payment.due_date),
        _ => layout::EMPTY_DATE.to_string(),
    }
}

fn issue(field: &'static str, message: &str) -> ValidationIssue {
    ValidationIssue {
        field,
        message: message.to_string(),
    }
}

impl LayoutVariant for Santander {
    fn bank_code(&self) -> &'static str {
        BANK_CODE
    }

    fn bank_name(&self) -> &'static str {
        BANK_NAME
    }

    fn file_layout_version(&self) -> &'static str {
        FILE_LAYOUT_VERSION
    }

    fn batch_layout_version(&self) -> &'static str {
        BATCH_LAYOUT_VERSION
    }

    fn validate(&self, config: &BeneficiaryConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if config.wallet.trim().is_empty() {
            issues.push(issue("wallet", "must not be blank"));
        } else if config.wallet.chars().count() != WALLET_LEN {
            issues.push(issue("wallet", "must be exactly 1 digit"));
        }
        if config.agreement.trim().is_empty() {
            issues.push(issue("agreement", "must not be blank"));
        } else if config.agreement.chars().count() > MAX_AGREEMENT_LEN {
            issues.push(issue("agreement", "must have at most 15 digits"));
        }
        if config.account.chars().count() > MAX_ACCOUNT_LEN {
            issues.push(issue("account", "must have at most 9 digits"));
        }
        if config.agency.chars().count() > MAX_AGENCY_LEN {
            issues.push(issue("agency", "must have at most 4 digits"));
        }
        issues
    }

    fn build_detail_segment(
        &self,
        payment: &PaymentInstruction,
        config: &BeneficiaryConfig,
        lot: u32,
        sequence: u32,
    ) -> Result<String> {
        let mut b = SegmentBuilder::new("santander/P", SEGMENT_P);
        b.push("bank_code", BANK_CODE)
            .push("lot", &lot.to_string())
            .push("record_type", RECORD_TYPE_DETAIL)
            .push("sequence", &sequence.to_string())
            .push("segment", SEGMENT_LETTER)
            .push("reserved_a", "")
            .push("movement_code", &payment.movement_code)
            .push("agency", &config.agency)
            .push("agency_digit", &config.agency_digit)
            .push("account", &config.account)
            .push("account_digit", &config.account_digit)
            // банк дублирует счёт в блоке «информация о счёте»
            .push("account_repeat", &config.account)
            .push("account_repeat_digit", &config.account_digit)
            .push("reserved_b", "")
            .push("nosso_numero", &payment.nosso_numero)
            .push("wallet", &config.wallet)
            .push("registration_form", &config.registration_form)
            .push("document_type", &config.document_type)
            .push("reserved_c", "")
            .push("document_number", &payment.document_number)
            .push("due_date", &layout::render_date(payment.due_date))
            .push("amount", &layout::render_amount(payment.amount, 15)?)
            .push("collecting_agency", COLLECTING_AGENCY)
            .push("collecting_agency_digit", "")
            .push("reserved_d", "")
            .push("species_code", &payment.species_code)
            .push("acceptance", &config.acceptance)
            .push("issue_date", &layout::render_date(payment.issue_date))
            .push("interest_code", &payment.interest_code)
            .push("interest_date", &interest_date(payment))
            .push(
                "interest_value",
                &layout::render_amount(payment.interest_value, 15)?,
            )
            .push("discount_code", &payment.discount_code)
            .push(
                "discount_date",
                &layout::render_opt_date(payment.discount_date),
            )
            .push(
                "discount_value",
                &layout::render_amount(payment.discount_value, 15)?,
            )
            .push("iof_value", &layout::render_amount(payment.iof_value, 15)?)
            .push(
                "abatement_value",
                &layout::render_amount(payment.abatement_value, 15)?,
            )
            .push("company_reference", &payment.document_number)
            .push("protest_code", &payment.protest_code)
            .push("protest_days", &payment.protest_days.to_string())
            .push("write_off_code", WRITE_OFF_CODE)
            .push("write_off_bank", WRITE_OFF_BANK)
            .push("write_off_days", WRITE_OFF_DAYS)
            .push("currency_code", CURRENCY_CODE)
            .push("reserved_e", "");
        b.finish()
    }
}
