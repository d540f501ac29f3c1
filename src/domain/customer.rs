use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor_framework::Entity;
use crate::app_system::Resource;
use crate::forms::{FieldKind, FieldSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub country: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub country: String,
    pub phone: String,
}

static FIELDS: [FieldSpec; 5] = [
    FieldSpec::new("primerNombre", "firstName", "Primer nombre", FieldKind::Text)
        .required("El primer nombre es requerido"),
    FieldSpec::new("apellidos", "lastName", "Apellidos", FieldKind::Text)
        .required("Los apellidos son requeridos"),
    FieldSpec::new("ciudad", "city", "Ciudad", FieldKind::Text)
        .required("La ciudad es requerida"),
    FieldSpec::new("pais", "country", "País", FieldKind::Text)
        .required("El país es requerido"),
    FieldSpec::new("telefono", "phone", "Teléfono", FieldKind::Text)
        .required("El teléfono es requerido"),
];

impl Entity for Customer {
    type Draft = CustomerDraft;

    const RESOURCE: Resource = Resource::Customers;

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn fields() -> &'static [FieldSpec] {
        &FIELDS
    }

    fn from_draft(id: u64, draft: CustomerDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            city: draft.city,
            country: draft.country,
            phone: draft.phone,
        }
    }

    fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            phone: self.phone.clone(),
        }
    }

    fn summarize(items: &[Self]) -> String {
        format!("{} clientes registrados", items.len())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.label(), self.id)?;
        write!(f, "  {}, {} · Tel: {}", self.city, self.country, self.phone)
    }
}
