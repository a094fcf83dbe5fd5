//! In-process stand-in for the public storefront API.
//!
//! Serves a fixed seed of products, carts and users with the same quirks as
//! the real service: lookups of missing resources answer 200 with an empty
//! body (products) or `null` (carts, users), writes are echoed back but never
//! stored, and `/auth/login` distinguishes missing fields (400) from wrong
//! credentials (401). Two diagnostic routes under `/__stub` let tests inspect
//! outgoing headers and provoke slow responses.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: u64,
    pub user_id: u64,
    pub date: String,
    pub products: Vec<CartLine>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: String,
    pub long: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub geolocation: Geolocation,
    pub city: String,
    pub street: String,
    pub number: u32,
    pub zipcode: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

/// Data the stub serves. Read-only once the router is built.
#[derive(Clone, Debug)]
pub struct Seed {
    pub products: Vec<Product>,
    pub carts: Vec<Cart>,
    pub users: Vec<User>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            products: vec![
                product(1, "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops", 109.95, "men's clothing", 3.9, 120),
                product(2, "John Hardy Women's Legends Naga Gold & Silver Dragon Station Chain Bracelet", 695.0, "jewelery", 4.6, 400),
                product(3, "WD 2TB Elements Portable External Hard Drive - USB 3.0", 64.0, "electronics", 3.3, 203),
                product(4, "BIYLACLESEN Women's 3-in-1 Snowboard Jacket Winter Coats", 56.99, "women's clothing", 2.6, 235),
            ],
            carts: vec![
                cart(1, 1, &[(1, 4), (2, 1), (3, 6)]),
                cart(2, 1, &[(2, 4), (1, 10), (4, 2)]),
                cart(3, 2, &[(1, 2), (4, 1)]),
            ],
            users: vec![
                user(1, "johnd", "m38rmF$", "john@gmail.com", ("john", "doe"), "kilcoole"),
                user(2, "mor_2314", "83r5^_", "morrison@gmail.com", ("david", "morrison"), "kilcoole"),
                user(3, "kevinryan", "kev02937@", "kevin@gmail.com", ("kevin", "ryan"), "Cullman"),
            ],
        }
    }
}

fn product(id: u64, title: &str, price: f64, category: &str, rate: f64, count: u32) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        rating: Rating { rate, count },
    }
}

fn cart(id: u64, user_id: u64, lines: &[(u64, u32)]) -> Cart {
    Cart {
        id,
        user_id,
        date: "2020-03-02T00:00:00.000Z".to_string(),
        products: lines
            .iter()
            .map(|&(product_id, quantity)| CartLine { product_id, quantity })
            .collect(),
    }
}

fn user(id: u64, username: &str, password: &str, email: &str, name: (&str, &str), city: &str) -> User {
    User {
        id,
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        name: Name {
            firstname: name.0.to_string(),
            lastname: name.1.to_string(),
        },
        address: Address {
            geolocation: Geolocation {
                lat: "-37.3159".to_string(),
                long: "81.1496".to_string(),
            },
            city: city.to_string(),
            street: "new road".to_string(),
            number: 7682 + id as u32,
            zipcode: "12926-3874".to_string(),
        },
        phone: format!("1-570-236-70{id:02}"),
    }
}

pub type Db = Arc<Seed>;

pub fn app() -> Router {
    app_with(Seed::default())
}

pub fn app_with(seed: Seed) -> Router {
    let db: Db = Arc::new(seed);
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/categories", get(list_categories))
        .route("/products/category/{name}", get(products_in_category))
        .route("/products/{id}", get(get_product).put(update_product).delete(delete_product))
        .route("/carts", get(list_carts).post(create_cart))
        .route("/carts/user/{user_id}", get(carts_for_user))
        .route("/carts/{id}", get(get_cart).put(update_cart).delete(delete_cart))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/auth/login", post(login))
        .route("/__stub/headers", any(echo_headers))
        .route("/__stub/delay/{millis}", get(delay))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

/// Echo a write back with an `id`, the way the storefront acknowledges
/// writes it does not persist.
fn echo_with_id(id: u64, body: Value) -> Value {
    match body {
        Value::Object(mut fields) => {
            fields.insert("id".to_string(), json!(id));
            Value::Object(fields)
        }
        other => json!({ "id": id, "body": other }),
    }
}

// --- products ---

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    Json(db.products.clone())
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<String>> {
    let mut categories: Vec<String> = Vec::new();
    for product in &db.products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    Json(categories)
}

async fn products_in_category(State(db): State<Db>, Path(name): Path<String>) -> Json<Vec<Product>> {
    Json(db.products.iter().filter(|p| p.category == name).cloned().collect())
}

async fn get_product(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    match db.products.iter().find(|p| p.id == id) {
        Some(product) => Json(product.clone()).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

async fn create_product(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let id = db.products.len() as u64 + 1;
    (StatusCode::CREATED, Json(echo_with_id(id, body)))
}

async fn update_product(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    Json(echo_with_id(id, body))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<u64>) -> Response {
    match db.products.iter().find(|p| p.id == id) {
        Some(product) => Json(product.clone()).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

// --- carts ---

async fn list_carts(State(db): State<Db>) -> Json<Vec<Cart>> {
    Json(db.carts.clone())
}

async fn carts_for_user(State(db): State<Db>, Path(user_id): Path<u64>) -> Json<Vec<Cart>> {
    Json(db.carts.iter().filter(|c| c.user_id == user_id).cloned().collect())
}

async fn get_cart(State(db): State<Db>, Path(id): Path<u64>) -> Json<Option<Cart>> {
    Json(db.carts.iter().find(|c| c.id == id).cloned())
}

async fn create_cart(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let id = db.carts.len() as u64 + 1;
    (StatusCode::CREATED, Json(echo_with_id(id, body)))
}

async fn update_cart(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    Json(echo_with_id(id, body))
}

async fn delete_cart(State(db): State<Db>, Path(id): Path<u64>) -> Json<Option<Cart>> {
    Json(db.carts.iter().find(|c| c.id == id).cloned())
}

// --- users ---

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.users.clone())
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Json<Option<User>> {
    Json(db.users.iter().find(|u| u.id == id).cloned())
}

async fn create_user(State(db): State<Db>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let id = db.users.len() as u64 + 1;
    (StatusCode::CREATED, Json(echo_with_id(id, body)))
}

async fn update_user(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    Json(echo_with_id(id, body))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> Json<Option<User>> {
    Json(db.users.iter().find(|u| u.id == id).cloned())
}

// --- auth ---

async fn login(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let (Some(username), Some(password)) = (body["username"].as_str(), body["password"].as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            "username and password are not provided in JSON format",
        )
            .into_response();
    };
    let known = db
        .users
        .iter()
        .any(|u| u.username == username && u.password == password);
    if !known {
        debug!("rejected login for {username}");
        return (StatusCode::UNAUTHORIZED, "username or password is incorrect").into_response();
    }
    Json(json!({ "token": Uuid::new_v4().simple().to_string() })).into_response()
}

// --- diagnostics ---

async fn echo_headers(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn delay(Path(millis): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    Json(json!({ "delayed_ms": millis }))
}
