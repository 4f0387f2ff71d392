//! Заголовки вкладок: единственное место, где ключ вкладки превращается в текст.

/// Заголовок вкладки списка по ключу; пустая строка для неизвестного ключа
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_resource" => "Recursos",
        "a002_supplier" => "Proveedores",
        "a003_warehouse" => "Almacenes",
        "a004_requisition" => "Solicitudes de Materiales",
        "a005_transfer" => "Transferencias",
        "a006_purchase_order" => "Órdenes de Compra",
        k if k.starts_with("a004_requisition_print_") => "Solicitud",
        k if k.starts_with("a005_transfer_print_") => "Guía",
        k if k.starts_with("a006_purchase_order_print_") => "Orden de Compra",
        _ => "",
    }
}

/// Ключ вкладки печатной формы документа
pub fn print_tab_key(entity: &str, id: &str) -> String {
    format!("{}_print_{}", entity, id)
}

/// Заголовок вкладки документа: «<entity> · <номер>»
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_lists_and_print_tabs() {
        assert_eq!(tab_label_for_key("a004_requisition"), "Solicitudes de Materiales");
        let key = print_tab_key("a005_transfer", "abc");
        assert_eq!(key, "a005_transfer_print_abc");
        assert_eq!(tab_label_for_key(&key), "Guía");
        assert_eq!(tab_label_for_key("unknown"), "");
        assert_eq!(detail_tab_label("Guía", "TRF-0003"), "Guía · TRF-0003");
    }
}
