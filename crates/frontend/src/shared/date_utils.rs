/// Утилиты форматирования и разбора дат
///
/// В интерфейсе даты показываются как dd/mm/yyyy, в `<input type="date">` и API: ISO yyyy-mm-dd
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Сегодняшняя дата по часам браузера
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 2024-03-15 -> "15/03/2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Метка времени из метаданных в локальном часовом поясе: "15/03/2024 14:02"
pub fn format_datetime(datetime: DateTime<Utc>) -> String {
    datetime
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

/// Значение `<input type="date">`: пустая строка = дата не выбрана
pub fn parse_date_input(value: &str) -> Result<Option<NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("Fecha inválida: {}", value))
}

pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(d), "05/03/2024");
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input(""), Ok(None));
        assert_eq!(parse_date_input("  "), Ok(None));
        assert_eq!(
            parse_date_input("2024-01-10"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 10))
        );
        assert!(parse_date_input("10/01/2024").is_err());
    }

    #[test]
    fn test_input_value_round_trip() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert_eq!(to_input_value(d), "2024-12-31");
        assert_eq!(to_input_value(None), "");
    }
}
