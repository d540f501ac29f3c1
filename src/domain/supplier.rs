use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor_framework::Entity;
use crate::app_system::Resource;
use crate::forms::{FieldKind, FieldSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u64,
    pub company_name: String,
    pub contact_name: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    pub company_name: String,
    pub contact_name: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
}

static FIELDS: [FieldSpec; 6] = [
    FieldSpec::new("nombreCompania", "companyName", "Nombre de la compañía", FieldKind::Text)
        .required("El nombre de la compañía es requerido"),
    FieldSpec::new("nombreContacto", "contactName", "Nombre de contacto", FieldKind::Text)
        .required("El nombre de contacto es requerido"),
    FieldSpec::new("ciudad", "city", "Ciudad", FieldKind::Text)
        .required("La ciudad es requerida"),
    FieldSpec::new("pais", "country", "País", FieldKind::Text)
        .required("El país es requerido"),
    FieldSpec::new("telefono", "phone", "Teléfono", FieldKind::Text)
        .required("El teléfono es requerido"),
    FieldSpec::new("fax", "fax", "Fax", FieldKind::Text),
];

impl Entity for Supplier {
    type Draft = SupplierDraft;

    const RESOURCE: Resource = Resource::Suppliers;

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.company_name.clone()
    }

    fn fields() -> &'static [FieldSpec] {
        &FIELDS
    }

    fn from_draft(id: u64, draft: SupplierDraft) -> Self {
        Self {
            id,
            company_name: draft.company_name,
            contact_name: draft.contact_name,
            city: draft.city,
            country: draft.country,
            phone: draft.phone,
            fax: draft.fax,
        }
    }

    fn to_draft(&self) -> SupplierDraft {
        SupplierDraft {
            company_name: self.company_name.clone(),
            contact_name: self.contact_name.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            phone: self.phone.clone(),
            fax: self.fax.clone(),
        }
    }

    fn summarize(items: &[Self]) -> String {
        format!("{} proveedores registrados", items.len())
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.company_name, self.id)?;
        write!(
            f,
            "  Contacto: {} · {}, {} · Tel: {}",
            self.contact_name, self.city, self.country, self.phone
        )?;
        if let Some(fax) = &self.fax {
            write!(f, " · Fax: {fax}")?;
        }
        Ok(())
    }
}
