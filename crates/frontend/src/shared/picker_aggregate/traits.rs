use contracts::domain::a001_resource::aggregate::Resource;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a003_warehouse::aggregate::Warehouse;
use contracts::domain::common::AggregateId;

/// Элемент, который можно выбрать в пикере
pub trait AggregatePickerResult {
    fn id(&self) -> String;
    fn display_name(&self) -> String;
}

/// Элемент, который пикер показывает строкой таблицы
pub trait TableDisplayable: AggregatePickerResult {
    fn code(&self) -> String;
    fn description(&self) -> String;

    /// Дополнительная колонка (единица, RUC, адрес)
    fn detail(&self) -> String {
        String::new()
    }
}

/// Поиск по коду и наименованию без учета регистра
pub fn matches_search<T: TableDisplayable>(item: &T, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || item.code().to_lowercase().contains(&needle)
        || item.description().to_lowercase().contains(&needle)
}

impl AggregatePickerResult for Resource {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn display_name(&self) -> String {
        format!("{} - {}", self.base.code, self.base.description)
    }
}

impl TableDisplayable for Resource {
    fn code(&self) -> String {
        self.base.code.clone()
    }

    fn description(&self) -> String {
        self.base.description.clone()
    }

    fn detail(&self) -> String {
        self.unit.clone()
    }
}

impl AggregatePickerResult for Supplier {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn display_name(&self) -> String {
        self.base.description.clone()
    }
}

impl TableDisplayable for Supplier {
    fn code(&self) -> String {
        self.base.code.clone()
    }

    fn description(&self) -> String {
        self.base.description.clone()
    }

    fn detail(&self) -> String {
        self.tax_id.clone()
    }
}

impl AggregatePickerResult for Warehouse {
    fn id(&self) -> String {
        self.base.id.as_string()
    }

    fn display_name(&self) -> String {
        self.base.description.clone()
    }
}

impl TableDisplayable for Warehouse {
    fn code(&self) -> String {
        self.base.code.clone()
    }

    fn description(&self) -> String {
        self.base.description.clone()
    }

    fn detail(&self) -> String {
        self.address.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_by_code_or_description() {
        let r = Resource::new_for_insert(
            "AGR-001".into(),
            "Arena gruesa".into(),
            "m3".into(),
            55.0,
            "Agregados".into(),
            None,
        );
        assert!(matches_search(&r, "agr"));
        assert!(matches_search(&r, "GRUESA"));
        assert!(matches_search(&r, "  "));
        assert!(!matches_search(&r, "cemento"));
        assert_eq!(r.display_name(), "AGR-001 - Arena gruesa");
    }
}
