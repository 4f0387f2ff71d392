//! PageFrame: корневая обертка каждой страницы внутри вкладки.
//!
//! На корневом элементе всегда есть:
//!   - `id` в формате `"{entity}--{category}"`, например `"a004_requisition--master_detail"`
//!   - `data-page-category`: одна из констант PAGE_CAT_*

use leptos::prelude::*;

/// Список справочника с формой редактирования
pub const PAGE_CAT_LIST: &str = "list";

/// Список документов со связанной деталью строк
pub const PAGE_CAT_MASTER_DETAIL: &str = "master_detail";

/// Печатная форма документа
pub const PAGE_CAT_PRINT: &str = "print";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_MASTER_DETAIL, PAGE_CAT_PRINT];

/// Проверка формата id страницы `{entity}--{category}`
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

fn class_for(category: &str) -> &'static str {
    match category {
        PAGE_CAT_MASTER_DETAIL => "page page--master-detail",
        PAGE_CAT_PRINT => "page page--print",
        _ => "page",
    }
}

#[component]
pub fn PageFrame(
    page_id: &'static str,
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id: {page_id}");

    let full_class = if class.is_empty() {
        class_for(category).to_string()
    } else {
        format!("{} {class}", class_for(category))
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a004_requisition--master_detail"));
        assert!(is_valid_page_id("a001_resource--list"));
        assert!(!is_valid_page_id("a001_resource"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_resource--dashboard"));
    }
}
