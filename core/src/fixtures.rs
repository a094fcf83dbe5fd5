//! Canonical sample payloads for the storefront scenarios.
//!
//! # Design
//! The catalog is built once per process and never handed out by reference:
//! every accessor returns an owned copy, so a test that tweaks a fixture
//! (a different quantity, a new email) cannot leak the change into another
//! test. Field names on the wire follow the storefront (`userId`,
//! `productId`).

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: u64,
    pub date: String,
    pub products: Vec<CartLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: u32,
    pub zipcode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

/// Payload for creating a user; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

/// A user the storefront is known to serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

struct Catalog {
    product: Product,
    cart: Cart,
    users: Vec<User>,
    existing_user: UserRef,
    login_user: Credentials,
    new_user: NewUser,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    product: Product {
        title: "Test Product".to_string(),
        price: 99.99,
        description: "This is a test product".to_string(),
        image: "https://i.pravatar.cc".to_string(),
        category: "electronics".to_string(),
    },
    cart: Cart {
        user_id: 1,
        date: "2026-01-13".to_string(),
        products: vec![
            CartLine { product_id: 1, quantity: 2 },
            CartLine { product_id: 2, quantity: 1 },
        ],
    },
    users: vec![
        User {
            id: 1,
            username: "johnd".to_string(),
            email: "john@gmail.com".to_string(),
            password: "m38rmF$".to_string(),
            name: name("John", "Doe"),
            address: address("kilcoole", "new road", 7682, "12926-3874"),
            phone: "1-570-236-7033".to_string(),
        },
        User {
            id: 2,
            username: "user2".to_string(),
            email: "user2@example.com".to_string(),
            password: "password2".to_string(),
            name: name("Jane", "Smith"),
            address: address("Los Angeles", "Sunset Blvd", 456, "90001"),
            phone: "987-654-3210".to_string(),
        },
    ],
    existing_user: UserRef {
        id: 1,
        username: "johnd".to_string(),
    },
    // Published demo account of the public storefront.
    login_user: Credentials {
        username: "mor_2314".to_string(),
        password: "83r5^_".to_string(),
    },
    new_user: NewUser {
        username: "newuser".to_string(),
        email: "newuser@example.com".to_string(),
        password: "newpassword".to_string(),
        name: name("New", "User"),
        address: address("Seoul", "Gangnam", 10, "06100"),
        phone: "010-1234-5678".to_string(),
    },
});

fn name(first: &str, last: &str) -> Name {
    Name {
        firstname: first.to_string(),
        lastname: last.to_string(),
    }
}

fn address(city: &str, street: &str, number: u32, zipcode: &str) -> Address {
    Address {
        city: city.to_string(),
        street: street.to_string(),
        number,
        zipcode: zipcode.to_string(),
    }
}

pub fn valid_product() -> Product {
    CATALOG.product.clone()
}

pub fn valid_cart() -> Cart {
    CATALOG.cart.clone()
}

/// Sample users in catalog order.
pub fn users() -> Vec<User> {
    CATALOG.users.clone()
}

pub fn existing_user() -> UserRef {
    CATALOG.existing_user.clone()
}

pub fn login_user() -> Credentials {
    CATALOG.login_user.clone()
}

pub fn new_user() -> NewUser {
    CATALOG.new_user.clone()
}

/// First sample user whose username matches exactly.
pub fn find_user_by_username(username: &str) -> Option<User> {
    CATALOG.users.iter().find(|u| u.username == username).cloned()
}
