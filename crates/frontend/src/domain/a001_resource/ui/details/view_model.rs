use super::model;
use crate::shared::master_detail::staged::{parse_decimal, validate_unit_cost};
use contracts::domain::a001_resource::aggregate::{Resource, ResourceDto};
use leptos::prelude::*;

/// Проверка формы до отправки на сервер
pub fn validate_form(form: &ResourceDto, unit_cost_text: &str) -> Result<f64, String> {
    if form.description.trim().is_empty() {
        return Err("La descripción es obligatoria".into());
    }
    if form.unit.trim().is_empty() {
        return Err("La unidad de medida es obligatoria".into());
    }
    let unit_cost = parse_decimal(unit_cost_text)
        .ok_or_else(|| "El costo unitario debe ser un número".to_string())?;
    validate_unit_cost(unit_cost).map_err(|e| e.to_string())?;
    Ok(unit_cost)
}

#[derive(Clone, Copy)]
pub struct ResourceDetailsViewModel {
    pub form: RwSignal<ResourceDto>,
    /// Поле стоимости хранится текстом, чтобы не терять ввод вида "12,"
    pub unit_cost_text: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ResourceDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ResourceDto::default()),
            unit_cost_text: RwSignal::new("0".to_string()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        let Some(id) = id else {
            return;
        };
        let vm = *self;
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_by_id(&id).await {
                Ok(resource) => {
                    vm.unit_cost_text.set(resource.unit_cost.to_string());
                    vm.form.set(model::to_dto(&resource));
                }
                Err(e) => vm.error.set(Some(format!("Error al cargar: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<Resource>) {
        let mut current = self.form.get_untracked();
        match validate_form(&current, &self.unit_cost_text.get_untracked()) {
            Ok(unit_cost) => current.unit_cost = unit_cost,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        }

        let vm = *self;
        vm.saving.set(true);
        vm.error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match model::save_form(&current).await {
                Ok(saved) => on_saved.run(saved),
                Err(e) => vm.error.set(Some(e.to_string())),
            }
            vm.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ResourceDto {
        ResourceDto {
            description: "Cemento Portland tipo I".into(),
            unit: "bolsa".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_form_parses_cost() {
        assert_eq!(validate_form(&form(), "24,50"), Ok(24.5));
    }

    #[test]
    fn test_validate_form_rejects_missing_fields() {
        let mut f = form();
        f.unit = " ".into();
        assert!(validate_form(&f, "1").is_err());
        assert!(validate_form(&form(), "abc").is_err());
        assert!(validate_form(&form(), "-3").is_err());
    }
}
