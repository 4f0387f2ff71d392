use contracts::domain::common::DocumentStatus;
use leptos::prelude::*;

/// Бейдж: "primary", "success", "warning", "error", иначе "neutral"
#[component]
pub fn Badge(
    #[prop(optional, into)] variant: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge badge--primary",
        "success" => "badge badge--success",
        "warning" => "badge badge--warning",
        "error" => "badge badge--error",
        _ => "badge badge--neutral",
    };

    view! { <span class=variant_class>{children()}</span> }
}

pub fn status_variant(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Pendiente => "warning",
        DocumentStatus::Aprobado => "primary",
        DocumentStatus::Completado => "success",
        DocumentStatus::Anulado => "error",
    }
}

/// Статус документа
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<DocumentStatus>) -> impl IntoView {
    view! {
        <Badge variant=Signal::derive(move || status_variant(status.get()).to_string())>
            {move || status.get().as_str()}
        </Badge>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_distinct_variant() {
        let variants: std::collections::HashSet<_> =
            DocumentStatus::ALL.iter().map(|s| status_variant(*s)).collect();
        assert_eq!(variants.len(), DocumentStatus::ALL.len());
    }
}
