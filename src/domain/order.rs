use std::fmt;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actor_framework::Entity;
use crate::app_system::Resource;
use crate::forms::{FieldKind, FieldSpec, DATE_FORMAT};

/// Package labels an order may use.
pub const PRESENTATIONS: &[&str] = &["Individual", "Six pack", "Caja", "Botella", "Lata"];

/// Represents a purchase order.
///
/// The total is always derived from price and quantity; a `total` sent by the
/// server is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub product_id: u64,
    pub customer_id: u64,
    pub unit_price: f64,
    pub package: String,
    pub quantity: u32,
    pub order_date: NaiveDate,
    pub order_number: String,
}

/// Payload for creating or replacing an order. `total` is filled on submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub product_id: u64,
    pub customer_id: u64,
    pub unit_price: f64,
    pub package: String,
    pub quantity: u32,
    pub order_date: NaiveDate,
    pub order_number: String,
    #[serde(default)]
    pub total: f64,
}

/// `unit_price × quantity`, rounded to cents.
pub fn line_total(unit_price: f64, quantity: u32) -> f64 {
    round_cents(unit_price * f64::from(quantity))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Sum of all order totals, rounded to cents.
pub fn orders_total(orders: &[Order]) -> f64 {
    round_cents(orders.iter().map(Order::total).sum())
}

/// `ORD-` followed by a random three-digit number.
pub fn generate_order_number() -> String {
    format!("ORD-{}", rand::rng().random_range(100..1000))
}

fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}

impl Order {
    pub fn total(&self) -> f64 {
        line_total(self.unit_price, self.quantity)
    }
}

static FIELDS: [FieldSpec; 7] = [
    FieldSpec::new("idProducto", "productId", "ID del producto", FieldKind::Integer)
        .required("El ID del producto es requerido")
        .invalid("Debe ser un número válido"),
    FieldSpec::new("idCliente", "customerId", "ID del cliente", FieldKind::Integer)
        .required("El ID del cliente es requerido")
        .invalid("Debe ser un número válido"),
    FieldSpec::new("precioUnitario", "unitPrice", "Precio unitario", FieldKind::Decimal)
        .positive("El precio unitario es requerido")
        .invalid("Debe ser un precio válido"),
    FieldSpec::new("tipoPresentacion", "package", "Presentación", FieldKind::Choice(PRESENTATIONS))
        .required("La presentación es requerida")
        .invalid("Presentación no válida"),
    FieldSpec::new("cantidad", "quantity", "Cantidad", FieldKind::Integer)
        .positive("La cantidad es requerida")
        .invalid("Debe ser una cantidad válida")
        .at_most(u32::MAX as u64),
    FieldSpec::new("fechaOrden", "orderDate", "Fecha de orden", FieldKind::Date)
        .required("La fecha de orden es requerida")
        .invalid("La fecha debe tener el formato AAAA-MM-DD")
        .with_default(today),
    FieldSpec::new("numeroOrden", "orderNumber", "Número de orden", FieldKind::Text)
        .required("El número de orden es requerido")
        .with_default(generate_order_number),
];

impl Entity for Order {
    type Draft = OrderDraft;

    const RESOURCE: Resource = Resource::Orders;

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.order_number.clone()
    }

    fn fields() -> &'static [FieldSpec] {
        &FIELDS
    }

    fn from_draft(id: u64, draft: OrderDraft) -> Self {
        Self {
            id,
            product_id: draft.product_id,
            customer_id: draft.customer_id,
            unit_price: draft.unit_price,
            package: draft.package,
            quantity: draft.quantity,
            order_date: draft.order_date,
            order_number: draft.order_number,
        }
    }

    fn to_draft(&self) -> OrderDraft {
        OrderDraft {
            product_id: self.product_id,
            customer_id: self.customer_id,
            unit_price: self.unit_price,
            package: self.package.clone(),
            quantity: self.quantity,
            order_date: self.order_date,
            order_number: self.order_number.clone(),
            total: self.total(),
        }
    }

    fn on_submit(draft: &mut OrderDraft) {
        draft.total = line_total(draft.unit_price, draft.quantity);
    }

    fn summarize(items: &[Self]) -> String {
        format!(
            "{} órdenes registradas · Total: ${:.2}",
            items.len(),
            orders_total(items)
        )
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{}) · {}", self.order_number, self.id, self.order_date)?;
        writeln!(
            f,
            "  Producto: #{} · Cliente: #{} · {}",
            self.product_id, self.customer_id, self.package
        )?;
        write!(
            f,
            "  {} × ${:.2} = ${:.2}",
            self.quantity,
            self.unit_price,
            self.total()
        )
    }
}
