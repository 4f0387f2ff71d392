use once_cell::sync::Lazy;
use tokio::sync::Mutex;

/// Выдача номера и вставка документа идут под этой блокировкой,
/// чтобы два одновременных POST не получили один номер
pub static NUMBERING_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Следующий номер серии: `SOL-000001`, `TRF-000014`, `OC-000003`.
///
/// Берется максимум среди существующих номеров с тем же префиксом
/// (включая удаленные документы, номера не переиспользуются).
pub fn next_document_no<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let series = format!("{}-", prefix);
    let last = existing
        .into_iter()
        .filter_map(|no| no.strip_prefix(series.as_str()))
        .filter_map(|digits| digits.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:06}", series, last + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number() {
        assert_eq!(next_document_no("SOL", Vec::<&str>::new()), "SOL-000001");
    }

    #[test]
    fn test_takes_max_not_count() {
        let existing = ["SOL-000002", "SOL-000010", "SOL-000004"];
        assert_eq!(next_document_no("SOL", existing), "SOL-000011");
    }

    #[test]
    fn test_ignores_other_series_and_garbage() {
        let existing = ["OC-000050", "SOL-abc", "TRF-000007", "manual"];
        assert_eq!(next_document_no("TRF", existing), "TRF-000008");
        assert_eq!(next_document_no("SOL", existing), "SOL-000001");
    }
}
