use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor_framework::Entity;
use crate::app_system::Resource;
use crate::forms::{FieldKind, FieldSpec};

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    #[serde(rename = "productName")]
    pub name: String,
    /// Not checked against the supplier list.
    pub supplier_id: u64,
    pub unit_price: f64,
    pub package: String,
    #[serde(default)]
    pub is_discontinued: bool,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(rename = "productName")]
    pub name: String,
    pub supplier_id: u64,
    pub unit_price: f64,
    pub package: String,
    #[serde(default)]
    pub is_discontinued: bool,
}

static FIELDS: [FieldSpec; 5] = [
    FieldSpec::new("nombreProducto", "productName", "Nombre del producto", FieldKind::Text)
        .required("El nombre del producto es requerido"),
    FieldSpec::new("idProveedor", "supplierId", "ID del proveedor", FieldKind::Integer)
        .required("El ID del proveedor es requerido")
        .invalid("Debe ser un número válido"),
    FieldSpec::new("precioUnitario", "unitPrice", "Precio unitario", FieldKind::Decimal)
        .positive("El precio es requerido")
        .invalid("Debe ser un precio válido mayor a 0"),
    FieldSpec::new("tipoPresentacion", "package", "Tipo de presentación", FieldKind::Text)
        .required("El tipo de presentación es requerido"),
    FieldSpec::new("estaDescontinuado", "isDiscontinued", "Descontinuado", FieldKind::Flag)
        .invalid("Debe ser true o false"),
];

impl Entity for Product {
    type Draft = ProductDraft;

    const RESOURCE: Resource = Resource::Products;

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn fields() -> &'static [FieldSpec] {
        &FIELDS
    }

    fn from_draft(id: u64, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            supplier_id: draft.supplier_id,
            unit_price: draft.unit_price,
            package: draft.package,
            is_discontinued: draft.is_discontinued,
        }
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            supplier_id: self.supplier_id,
            unit_price: self.unit_price,
            package: self.package.clone(),
            is_discontinued: self.is_discontinued,
        }
    }

    fn summarize(items: &[Self]) -> String {
        let stats = ProductStats::from_products(items);
        format!(
            "{} productos · {} activos · {} descontinuados",
            items.len(),
            stats.active,
            stats.discontinued
        )
    }
}

/// Active vs discontinued counts shown in the product view header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub active: usize,
    pub discontinued: usize,
}

impl ProductStats {
    pub fn from_products(products: &[Product]) -> Self {
        let discontinued = products.iter().filter(|p| p.is_discontinued).count();
        Self {
            active: products.len() - discontinued,
            discontinued,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_discontinued {
            "Descontinuado"
        } else {
            "Activo"
        };
        writeln!(f, "[{status}] {} (#{})", self.name, self.id)?;
        write!(
            f,
            "  Proveedor: #{} · Presentación: {} · Precio: ${:.2}",
            self.supplier_id, self.package, self.unit_price
        )
    }
}
