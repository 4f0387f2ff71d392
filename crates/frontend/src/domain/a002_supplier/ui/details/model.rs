use crate::shared::master_detail::{HttpCollection, LoadError, RemoteCollection};
use contracts::domain::a002_supplier::aggregate::{Supplier, SupplierDto};
use contracts::domain::common::AggregateId;

const SUPPLIERS: HttpCollection<Supplier, SupplierDto> = HttpCollection::new("supplier");

pub async fn fetch_by_id(id: &str) -> Result<Supplier, LoadError> {
    SUPPLIERS.fetch_by_id(id).await
}

pub async fn save_form(dto: &SupplierDto) -> Result<Supplier, LoadError> {
    if dto.id.is_some() {
        SUPPLIERS.update(dto).await
    } else {
        SUPPLIERS.add(dto).await
    }
}

pub fn to_dto(s: Supplier) -> SupplierDto {
    SupplierDto {
        id: Some(s.base.id.as_string()),
        code: Some(s.base.code),
        description: s.base.description,
        tax_id: s.tax_id,
        phone: s.phone,
        email: s.email,
        address: s.address,
        comment: s.base.comment,
    }
}
