//! Localized calendar labels used for chart buckets.

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const PT_MONTHS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];
const PT_WEEKDAYS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Month and weekday abbreviations for one language. Weekdays start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarLabels {
    pub months: [&'static str; 12],
    pub weekdays: [&'static str; 7],
}

impl CalendarLabels {
    pub const ENGLISH: CalendarLabels = CalendarLabels {
        months: EN_MONTHS,
        weekdays: EN_WEEKDAYS,
    };

    pub const PORTUGUESE: CalendarLabels = CalendarLabels {
        months: PT_MONTHS,
        weekdays: PT_WEEKDAYS,
    };

    /// Picks labels from a BCP 47 style tag such as `pt-BR` or `en_US`.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "pt" => Self::PORTUGUESE,
            _ => Self::ENGLISH,
        }
    }
}

impl Default for CalendarLabels {
    fn default() -> Self {
        Self::ENGLISH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portuguese_locale_selects_portuguese_labels() {
        let labels = CalendarLabels::for_locale("pt-BR");
        assert_eq!(labels.months[1], "Fev");
        assert_eq!(labels.weekdays[6], "Sáb");
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        assert_eq!(CalendarLabels::for_locale("de_DE"), CalendarLabels::ENGLISH);
        assert_eq!(CalendarLabels::for_locale(""), CalendarLabels::ENGLISH);
    }
}
