use crate::shared::icons::icon;
use contracts::domain::common::DocumentStatus;
use leptos::prelude::*;
use thaw::*;

/// Доступные из статуса действия с подписью кнопки
pub fn available_actions(status: DocumentStatus) -> Vec<(DocumentStatus, &'static str)> {
    DocumentStatus::ALL
        .into_iter()
        .filter(|next| status.can_transition_to(*next))
        .map(|next| (next, action_label(next)))
        .collect()
}

fn action_label(next: DocumentStatus) -> &'static str {
    match next {
        DocumentStatus::Aprobado => "Aprobar",
        DocumentStatus::Completado => "Completar",
        DocumentStatus::Anulado => "Anular",
        DocumentStatus::Pendiente => "Reabrir",
    }
}

/// Кнопки смены статуса выбранного документа
#[component]
pub fn StatusActions(
    #[prop(into)] status: Signal<Option<DocumentStatus>>,
    on_change: Callback<DocumentStatus>,
) -> impl IntoView {
    view! {
        <Flex gap=FlexGap::Small class="status-actions">
            {move || {
                status
                    .get()
                    .map(available_actions)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(next, label)| {
                        let appearance = if next == DocumentStatus::Anulado {
                            ButtonAppearance::Subtle
                        } else {
                            ButtonAppearance::Secondary
                        };
                        view! {
                            <Button
                                appearance=appearance
                                size=ButtonSize::Small
                                on_click=move |_| on_change.run(next)
                            >
                                {(next != DocumentStatus::Anulado).then(|| icon("check"))}
                                {label}
                            </Button>
                        }
                    })
                    .collect_view()
            }}
        </Flex>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_actions() {
        let labels = |s| available_actions(s).into_iter().map(|(_, l)| l).collect::<Vec<_>>();
        assert_eq!(labels(DocumentStatus::Pendiente), vec!["Aprobar", "Anular"]);
        assert_eq!(labels(DocumentStatus::Aprobado), vec!["Completar", "Anular"]);
        assert!(available_actions(DocumentStatus::Completado).is_empty());
        assert!(available_actions(DocumentStatus::Anulado).is_empty());
    }
}
