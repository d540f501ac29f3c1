//! Seed records for the in-memory backend.

use chrono::NaiveDate;

use crate::domain::{Customer, Order, Product, Supplier};

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Cerveza Lager".into(),
            supplier_id: 101,
            unit_price: 2.50,
            package: "Six pack".into(),
            is_discontinued: false,
        },
        Product {
            id: 2,
            name: "Vino Tinto".into(),
            supplier_id: 102,
            unit_price: 15.99,
            package: "Botella".into(),
            is_discontinued: false,
        },
        Product {
            id: 3,
            name: "Whisky".into(),
            supplier_id: 103,
            unit_price: 35.50,
            package: "Botella".into(),
            is_discontinued: true,
        },
    ]
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: 1,
            first_name: "María".into(),
            last_name: "García López".into(),
            city: "Madrid".into(),
            country: "España".into(),
            phone: "+34 912 345 678".into(),
        },
        Customer {
            id: 2,
            first_name: "Carlos".into(),
            last_name: "Rodríguez Martínez".into(),
            city: "Barcelona".into(),
            country: "España".into(),
            phone: "+34 933 456 789".into(),
        },
        Customer {
            id: 3,
            first_name: "Ana".into(),
            last_name: "Fernández Sánchez".into(),
            city: "Valencia".into(),
            country: "España".into(),
            phone: "+34 963 123 456".into(),
        },
    ]
}

pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: 1,
            company_name: "Cervezas Alhambra".into(),
            contact_name: "Juan Martínez".into(),
            city: "Granada".into(),
            country: "España".into(),
            phone: "+34 958 123 456".into(),
            fax: Some("+34 958 123 457".into()),
        },
        Supplier {
            id: 2,
            company_name: "Bodegas Rioja".into(),
            contact_name: "María López".into(),
            city: "Logroño".into(),
            country: "España".into(),
            phone: "+34 941 234 567".into(),
            fax: Some("+34 941 234 568".into()),
        },
    ]
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: 1,
            product_id: 1,
            customer_id: 1,
            unit_price: 2.50,
            package: "Six pack".into(),
            quantity: 10,
            order_date: date(2024, 1, 15),
            order_number: "ORD-001".into(),
        },
        Order {
            id: 2,
            product_id: 2,
            customer_id: 2,
            unit_price: 15.99,
            package: "Botella".into(),
            quantity: 5,
            order_date: date(2024, 1, 16),
            order_number: "ORD-002".into(),
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
