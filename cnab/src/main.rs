use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use cnablib::{
    banks::banco_brasil::BancoBrasil,
    error::{CnabError, Result},
    model::{BeneficiaryConfig, PaymentInstruction, ReturnRecord},
    traits::{variant_for, ReturnFormat},
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

// Значения по умолчанию для незаполненных колонок CSV.
const DEFAULT_MOVEMENT: &str = "01"; // entrada de títulos
const DEFAULT_SPECIES: &str = "02"; // duplicata mercantil
const DEFAULT_INTEREST_CODE: &str = "3"; // isento
const DEFAULT_DISCOUNT_CODE: &str = "0"; // без скидки
const DEFAULT_PROTEST_CODE: &str = "3"; // не протестовать

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// CSV платежей -> строки ремессы
    Encode,
    /// файл ретура -> CSV логических записей
    Decode,
}

#[derive(Parser, Debug)]
#[command(name = "cnab", version, about = "Кодек CNAB 240: ремесса и ретур")]
struct Cli {
    #[arg(long = "mode", value_enum)]
    mode: Mode,

    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// JSON с конфигурацией бенефициара (только для encode)
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Код банка варианта макета
    #[arg(long = "bank", default_value = "033")]
    bank: String,

    /// Номер лота для ремессы
    #[arg(long = "lot", default_value_t = 1)]
    lot: u32,
}

#[derive(serde::Deserialize)]
struct PaymentRow {
    nosso_numero: String,
    document_number: String,
    amount: String,
    due_date: String,
    issue_date: String,
    payer_document: Option<String>,
    movement_code: Option<String>,
    species_code: Option<String>,
    interest_code: Option<String>,
    interest_value: Option<String>,
    discount_code: Option<String>,
    discount_date: Option<String>,
    discount_value: Option<String>,
    iof_value: Option<String>,
    abatement_value: Option<String>,
    protest_code: Option<String>,
    protest_days: Option<u8>,
}

fn parse_iso_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| CnabError::Parse(format!("{field}: {e}")))
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    raw.parse()
        .map_err(|e| CnabError::Parse(format!("{field}: {e}")))
}

fn opt_decimal(field: &str, raw: &Option<String>) -> Result<Decimal> {
    match raw {
        Some(v) if !v.is_empty() => parse_decimal(field, v),
        _ => Ok(Decimal::ZERO),
    }
}

impl PaymentRow {
    fn into_payment(self) -> Result<PaymentInstruction> {
        let or = |v: Option<String>, d: &str| v.filter(|s| !s.is_empty()).unwrap_or_else(|| d.to_string());
        Ok(PaymentInstruction {
            due_date: parse_iso_date("due_date", &self.due_date)?,
            issue_date: parse_iso_date("issue_date", &self.issue_date)?,
            amount: parse_decimal("amount", &self.amount)?,
            interest_value: opt_decimal("interest_value", &self.interest_value)?,
            discount_value: opt_decimal("discount_value", &self.discount_value)?,
            iof_value: opt_decimal("iof_value", &self.iof_value)?,
            abatement_value: opt_decimal("abatement_value", &self.abatement_value)?,
            discount_date: match &self.discount_date {
                Some(d) if !d.is_empty() => Some(parse_iso_date("discount_date", d)?),
                _ => None,
            },
            nosso_numero: self.nosso_numero,
            document_number: self.document_number,
            payer_document: self.payer_document.unwrap_or_default(),
            movement_code: or(self.movement_code, DEFAULT_MOVEMENT),
            species_code: or(self.species_code, DEFAULT_SPECIES),
            interest_code: or(self.interest_code, DEFAULT_INTEREST_CODE),
            discount_code: or(self.discount_code, DEFAULT_DISCOUNT_CODE),
            protest_code: or(self.protest_code, DEFAULT_PROTEST_CODE),
            protest_days: self.protest_days.unwrap_or(0),
        })
    }
}

#[derive(serde::Serialize)]
struct ReturnRow<'a> {
    occurrence_code: &'a str,
    agency: &'a str,
    account: &'a str,
    nosso_numero: &'a str,
    wallet: &'a str,
    due_date: Option<String>,
    document_value: String,
    receiving_bank: &'a str,
    receiving_agency: &'a str,
    sequence: &'a str,
    tariff_value: String,
    /// коды причин через «;»
    occurrence_reasons: String,
    interest_value: String,
    discount_value: String,
    abatement_value: String,
    iof_value: String,
    amount_received: String,
    other_expenses: String,
    other_income: String,
    credit_date: Option<String>,
    occurrence_date: Option<String>,
}

impl<'a> ReturnRow<'a> {
    fn from_record(rec: &'a ReturnRecord) -> Self {
        Self {
            occurrence_code: &rec.occurrence_code,
            agency: &rec.agency_with_digit,
            account: &rec.beneficiary_account,
            nosso_numero: &rec.nosso_numero,
            wallet: &rec.wallet,
            due_date: rec.due_date.map(|d| d.to_string()),
            document_value: rec.document_value.to_string(),
            receiving_bank: &rec.receiving_bank,
            receiving_agency: &rec.receiving_agency,
            sequence: &rec.sequence,
            tariff_value: rec.tariff_value.to_string(),
            occurrence_reasons: rec.occurrence_reasons.join(";"),
            interest_value: rec.interest_value.to_string(),
            discount_value: rec.discount_value.to_string(),
            abatement_value: rec.abatement_value.to_string(),
            iof_value: rec.iof_value.to_string(),
            amount_received: rec.amount_received.to_string(),
            other_expenses: rec.other_expenses.to_string(),
            other_income: rec.other_income.to_string(),
            credit_date: rec.credit_date.map(|d| d.to_string()),
            occurrence_date: rec.occurrence_date.map(|d| d.to_string()),
        }
    }
}

fn encode(cli: &Cli, input: impl BufRead, out: &mut dyn Write) -> Result<()> {
    let variant = variant_for(&cli.bank)
        .ok_or_else(|| CnabError::Parse(format!("unknown bank code: {}", cli.bank)))?;

    let config_path = cli
        .config
        .as_ref()
        .ok_or_else(|| CnabError::Parse("encode requires --config".into()))?;
    let config: BeneficiaryConfig = serde_json::from_reader(File::open(config_path)?)
        .map_err(|e| CnabError::Parse(format!("config: {e}")))?;

    // все проблемы конфигурации — одним списком
    let issues = variant.validate(&config);
    if !issues.is_empty() {
        return Err(CnabError::Validation(issues));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let mut sequence = 0u32;
    for rec in rdr.deserialize::<PaymentRow>() {
        let row = rec.map_err(|e| CnabError::Parse(format!("csv: {e}")))?;
        let payment = row.into_payment()?;
        sequence += 1;
        let segment = variant.build_detail_segment(&payment, &config, cli.lot, sequence)?;
        writeln!(out, "{segment}")?;
    }
    Ok(())
}

fn decode(input: impl BufRead, out: &mut dyn Write) -> Result<()> {
    let records = BancoBrasil::read(input)?;
    let mut wrt = csv::WriterBuilder::new().from_writer(out);
    for rec in &records {
        wrt.serialize(ReturnRow::from_record(rec))
            .map_err(|e| CnabError::Parse(format!("csv: {e}")))?;
    }
    wrt.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // reader
    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    // writer
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match cli.mode {
        Mode::Encode => encode(&cli, br, &mut writer)?,
        Mode::Decode => decode(br, &mut writer)?,
    }

    writer.flush().map_err(CnabError::from)
}
