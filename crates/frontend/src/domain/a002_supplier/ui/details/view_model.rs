use super::model;
use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierDto};
use leptos::prelude::*;

/// RUC: пусто или ровно 11 цифр
pub fn validate_form(form: &SupplierDto) -> Result<(), String> {
    if form.description.trim().is_empty() {
        return Err("La razón social es obligatoria".into());
    }
    let ruc = form.tax_id.trim();
    if !ruc.is_empty() && (ruc.len() != 11 || !ruc.chars().all(|c| c.is_ascii_digit())) {
        return Err("El RUC debe contener 11 dígitos".into());
    }
    if !form.email.trim().is_empty() && !form.email.contains('@') {
        return Err("Correo electrónico inválido".into());
    }
    Ok(())
}

#[derive(Clone, Copy)]
pub struct SupplierDetailsViewModel {
    pub form: RwSignal<SupplierDto>,
    pub error: RwSignal<Option<String>>,
}

impl SupplierDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(SupplierDto::default()),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| validate_form(f).is_ok())
    }

    pub fn load_if_needed(&self, id: Option<String>) {
        if let Some(existing_id) = id {
            let vm = *self;
            wasm_bindgen_futures::spawn_local(async move {
                match model::fetch_by_id(&existing_id).await {
                    Ok(supplier) => vm.form.set(model::to_dto(supplier)),
                    Err(e) => vm.error.set(Some(format!("Error al cargar: {}", e))),
                }
            });
        }
    }

    pub fn save_command(&self, on_saved: Callback<Supplier>) {
        let current = self.form.get_untracked();
        if let Err(msg) = validate_form(&current) {
            self.error.set(Some(msg));
            return;
        }
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::save_form(&current).await {
                Ok(saved) => on_saved.run(saved),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruc_must_have_eleven_digits() {
        let mut form = SupplierDto {
            description: "Aceros Arequipa S.A.".into(),
            ..Default::default()
        };
        assert!(validate_form(&form).is_ok());

        form.tax_id = "2037024".into();
        assert!(validate_form(&form).is_err());

        form.tax_id = "20370146994".into();
        assert!(validate_form(&form).is_ok());

        form.email = "ventas.acerosaqp.com".into();
        assert_eq!(validate_form(&form), Err("Correo electrónico inválido".to_string()));
    }
}
