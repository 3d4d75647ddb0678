//! Доменные модели — нормализованный слой между вызывающим кодом и макетами банков.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Один платёжный документ (título). Кодек его только читает;
/// бизнес-валидация сроков/скидок — забота вызывающей стороны.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentInstruction {
    /// «Nosso número» — идентификатор документа у бенефициара.
    pub nosso_numero: String,
    /// Свободный номер документа (переменная длина, в макете усекается).
    pub document_number: String,
    /// Номинал. Подразумеваемая шкала — 2 знака (центаво).
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub issue_date: NaiveDate,
    /// Ссылка на плательщика (CPF/CNPJ), в сегменте P не используется.
    pub payer_document: String,
    /// Код движения ремессы: 01 — entrada, 02 — baixa, 09 — protestar, ...
    pub movement_code: String,
    /// Вид документа (espécie): 02 — duplicata mercantil и т.д.
    pub species_code: String,
    /// Код юроса (mora): 0/3 — нет, 1 — в день, 2 — процент в месяц.
    pub interest_code: String,
    pub interest_value: Decimal,
    /// Код скидки: 0 — нет.
    pub discount_code: String,
    pub discount_date: Option<NaiveDate>,
    pub discount_value: Decimal,
    pub iof_value: Decimal,
    pub abatement_value: Decimal,
    /// 1 — протест в календарных днях, 2 — в рабочих, 3 — не протестовать.
    pub protest_code: String,
    pub protest_days: u8,
}

/// Банковская идентификация бенефициара. Один конфиг обслуживает
/// весь лот: много PaymentInstruction на один BeneficiaryConfig.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeneficiaryConfig {
    pub agency: String,
    pub agency_digit: String,
    pub account: String,
    pub account_digit: String,
    /// Номер договора/конвенио с банком.
    pub agreement: String,
    /// Carteira — продукт расчётов банка.
    pub wallet: String,
    /// Форма регистрации títulos (forma de cadastramento).
    pub registration_form: String,
    /// Tipo de documento: 1 — tradicional, 2 — escritural.
    pub document_type: String,
    /// Aceite: A / N.
    pub acceptance: String,
}

/// Логическая запись ретура: слияние пары физических строк T + U.
/// Идентификаторы остаются сырыми (с паддингом), суммы/даты — типизированы.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReturnRecord {
    // --- сегмент T ---
    pub occurrence_code: String,
    pub agency_with_digit: String,
    pub beneficiary_account: String,
    pub nosso_numero: String,
    pub wallet: String,
    pub due_date: Option<NaiveDate>,
    pub document_value: Decimal,
    pub receiving_bank: String,
    pub receiving_agency: String,
    pub sequence: String,
    pub tariff_value: Decimal,
    /// Коды причин события, по два символа; сентинел «00» отброшен.
    pub occurrence_reasons: Vec<String>,

    // --- сегмент U ---
    pub interest_value: Decimal,
    pub discount_value: Decimal,
    pub abatement_value: Decimal,
    pub iof_value: Decimal,
    pub amount_received: Decimal,
    pub other_expenses: Decimal,
    pub other_income: Decimal,
    pub credit_date: Option<NaiveDate>,
    pub occurrence_date: Option<NaiveDate>,
}
