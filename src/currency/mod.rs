//! Locale-aware money and date rendering for the shell.

use chrono::NaiveDate;

use tally_config::Config;

/// Separators and layout for a supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Whether a space separates the currency symbol from the digits.
    pub symbol_spacing: bool,
    pub date_pattern: &'static str,
}

impl LocaleConfig {
    /// Known layout for `tag`, or `None` when the language is not supported.
    pub fn for_tag(tag: &str) -> Option<Self> {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Some(Self {
                language_tag: tag.to_string(),
                decimal_separator: '.',
                grouping_separator: ',',
                symbol_spacing: false,
                date_pattern: "%m/%d/%Y",
            }),
            "pt" => Some(Self {
                language_tag: tag.to_string(),
                decimal_separator: ',',
                grouping_separator: '.',
                symbol_spacing: true,
                date_pattern: "%d/%m/%Y",
            }),
            _ => None,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "BRL" => "R$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part, locale.grouping_separator);
    if let Some(fraction) = fraction {
        rendered.push(locale.decimal_separator);
        rendered.push_str(fraction);
    }
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        rendered.insert(0, '-');
    }
    rendered
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Formats amounts and dates according to the active configuration.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    locale: Option<LocaleConfig>,
    code: String,
    precision: u8,
}

impl CurrencyFormatter {
    pub fn new(locale_tag: &str, code: &str, precision: Option<u8>) -> Self {
        let code = code.trim().to_ascii_uppercase();
        Self {
            locale: LocaleConfig::for_tag(locale_tag),
            precision: precision.unwrap_or_else(|| minor_units_for(&code)),
            code,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.locale, &config.currency, config.currency_precision)
    }

    pub fn format(&self, amount: f64) -> String {
        let Some(locale) = &self.locale else {
            return format!(
                "{amount:.prec$} {code}",
                amount = amount,
                prec = self.precision as usize,
                code = self.code
            );
        };
        let body = format_number(locale, amount, self.precision);
        let symbol = symbol_for(&self.code);
        let (sign, digits) = match body.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", body.as_str()),
        };
        if locale.symbol_spacing || symbol == self.code {
            format!("{sign}{symbol} {digits}")
        } else {
            format!("{sign}{symbol}{digits}")
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match &self.locale {
            Some(locale) => date.format(locale.date_pattern).to_string(),
            None => date.format("%Y-%m-%d").to_string(),
        }
    }
}
