//! Storefront scenarios, written once and run against both the mock store
//! and (opt-in) the live service.
//!
//! Each scenario only relies on what the public storefront guarantees: no
//! write is assumed to persist, missing resources come back as 200 with an
//! empty or `null` body, and login failures are 401 (wrong pair) or 400/401
//! (missing field).

use serde_json::{json, Value};
use shop_harness::checks::{email_plausible, missing_fields, price_within, rating_valid, within};
use shop_harness::{fixtures, ApiClient, Config};

fn json_list(client: &ApiClient, path: &str) -> Vec<Value> {
    let outcome = client.get(path).unwrap();
    assert_eq!(outcome.status, 200, "GET {path}");
    match outcome.json().unwrap() {
        Some(Value::Array(items)) => items,
        other => panic!("GET {path}: expected a list, got {other:?}"),
    }
}

fn json_object(client: &ApiClient, path: &str) -> Value {
    let outcome = client.get(path).unwrap();
    assert_eq!(outcome.status, 200, "GET {path}");
    outcome.json().unwrap().unwrap_or_else(|| panic!("GET {path}: empty body"))
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub fn products_have_required_fields(client: &ApiClient) {
    let products = json_list(client, "/products");
    assert!(!products.is_empty());
    let missing = missing_fields(
        &products[0],
        &["id", "title", "price", "category", "description", "image", "rating"],
    );
    assert!(missing.is_empty(), "first product is missing {missing:?}");
}

pub fn single_product_by_id(client: &ApiClient) {
    let product = json_object(client, "/products/1");
    assert_eq!(product["id"], 1);
}

pub fn missing_product_is_absent(client: &ApiClient) {
    let outcome = client.get("/products/99999").unwrap();
    assert_eq!(outcome.status, 200);
    assert!(outcome.json().unwrap().is_none());
}

pub fn products_by_category(client: &ApiClient) {
    let products = json_list(client, "/products/category/electronics");
    assert!(products.iter().all(|p| p["category"] == "electronics"));
}

pub fn all_categories_listed(client: &ApiClient) {
    let categories = json_list(client, "/products/categories");
    for expected in ["electronics", "jewelery", "men's clothing", "women's clothing"] {
        assert!(categories.contains(&json!(expected)), "missing category {expected}");
    }
}

pub fn product_prices_in_range(client: &ApiClient, config: &Config) {
    for product in json_list(client, "/products") {
        assert!(
            price_within(&product["price"], config.max_price),
            "product {}: price {} out of range",
            product["id"],
            product["price"]
        );
    }
}

pub fn product_ratings_in_range(client: &ApiClient) {
    for product in json_list(client, "/products") {
        assert!(rating_valid(&product["rating"]), "product {}: bad rating", product["id"]);
    }
}

pub fn product_list_is_fast_enough(client: &ApiClient, config: &Config) {
    let (outcome, elapsed) = client.measure("GET", "/products", None).unwrap();
    assert_eq!(outcome.status, 200);
    assert!(
        within(elapsed, config.max_response_time),
        "GET /products took {elapsed:?}"
    );
}

// ---------------------------------------------------------------------------
// Carts
// ---------------------------------------------------------------------------

pub fn carts_listed(client: &ApiClient) {
    assert!(!json_list(client, "/carts").is_empty());
}

pub fn single_cart_shape(client: &ApiClient) {
    let cart = json_object(client, "/carts/1");
    assert_eq!(cart["id"], 1);
    let missing = missing_fields(&cart, &["userId", "date", "products"]);
    assert!(missing.is_empty(), "cart is missing {missing:?}");
    assert!(cart["products"].is_array());
}

pub fn carts_for_user_belong_to_user(client: &ApiClient) {
    for cart in json_list(client, "/carts/user/1") {
        assert_eq!(cart["userId"], 1, "cart {} belongs to another user", cart["id"]);
    }
}

pub fn create_cart_from_fixture(client: &ApiClient) {
    let outcome = client.post("/carts", &fixtures::valid_cart()).unwrap();
    assert!(matches!(outcome.status, 200 | 201), "status {}", outcome.status);
    assert!(outcome.json().unwrap().is_some_and(|c| c.is_object()));
}

pub fn update_cart_quantity(client: &ApiClient) {
    let mut cart = fixtures::valid_cart();
    cart.products.truncate(1);
    cart.products[0].quantity = 5;

    let outcome = client.put("/carts/1", &cart).unwrap();
    assert_eq!(outcome.status, 200);
    let updated = outcome.json().unwrap().unwrap();
    assert_eq!(updated["userId"], json!(cart.user_id));
}

pub fn delete_cart(client: &ApiClient) {
    assert_eq!(client.delete("/carts/1").unwrap().status, 200);
}

pub fn cart_products_exist(client: &ApiClient) {
    let cart = json_object(client, "/carts/1");
    for line in cart["products"].as_array().unwrap() {
        let product_id = &line["productId"];
        let outcome = client.get(&format!("/products/{product_id}")).unwrap();
        assert_eq!(outcome.status, 200, "product {product_id} in cart does not exist");
        assert!(outcome.json().unwrap().is_some(), "product {product_id} returned null");
    }
}

pub fn cart_quantities_positive(client: &ApiClient) {
    for cart in json_list(client, "/carts") {
        for line in cart["products"].as_array().unwrap() {
            let quantity = line["quantity"].as_u64();
            assert!(
                quantity.is_some_and(|q| q > 0),
                "cart {}: quantity {} is not a positive integer",
                cart["id"],
                line["quantity"]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Users and auth
// ---------------------------------------------------------------------------

pub fn users_listed(client: &ApiClient) {
    assert!(!json_list(client, "/users").is_empty());
}

pub fn single_user_shape(client: &ApiClient) {
    let user = json_object(client, "/users/1");
    assert_eq!(user["id"], 1);
    let missing = missing_fields(&user, &["email", "username", "name", "address", "phone"]);
    assert!(missing.is_empty(), "user is missing {missing:?}");
    assert!(missing_fields(&user["name"], &["firstname", "lastname"]).is_empty());
    assert!(missing_fields(&user["address"], &["city", "street"]).is_empty());
}

pub fn user_emails_plausible(client: &ApiClient) {
    for user in json_list(client, "/users") {
        let email = user["email"].as_str().unwrap_or_default();
        assert!(email_plausible(email), "user {}: invalid email {email:?}", user["id"]);
    }
}

pub fn user_phones_present(client: &ApiClient) {
    for user in json_list(client, "/users") {
        let phone = user["phone"].as_str();
        assert!(phone.is_some_and(|p| !p.is_empty()), "user {}: missing phone", user["id"]);
    }
}

pub fn user_address_structure(client: &ApiClient) {
    for user in json_list(client, "/users") {
        let address = &user["address"];
        let missing = missing_fields(address, &["city", "street", "number", "zipcode", "geolocation"]);
        assert!(missing.is_empty(), "user {}: address is missing {missing:?}", user["id"]);
        let missing = missing_fields(&address["geolocation"], &["lat", "long"]);
        assert!(missing.is_empty(), "user {}: geolocation is missing {missing:?}", user["id"]);
    }
}

pub fn create_user_from_fixture(client: &ApiClient) {
    let new_user = fixtures::new_user();
    let outcome = client.post("/users", &new_user).unwrap();
    assert!(matches!(outcome.status, 200 | 201), "status {}", outcome.status);

    let created = outcome.json().unwrap().unwrap();
    assert!(created.get("id").is_some(), "created user has no id");
    if let Some(email) = created.get("email") {
        assert_eq!(email, &json!(new_user.email));
    }
    if let Some(username) = created.get("username") {
        assert_eq!(username, &json!(new_user.username));
    }
}

pub fn update_user(client: &ApiClient) {
    let changes = json!({
        "email": "newemail@example.com",
        "username": "updateduser",
        "password": "newpassword123",
    });
    let outcome = client.put("/users/1", &changes).unwrap();
    assert_eq!(outcome.status, 200);
    let updated = outcome.json().unwrap().unwrap();
    assert_eq!(updated["email"], changes["email"]);
    assert_eq!(updated["username"], changes["username"]);
}

pub fn delete_user(client: &ApiClient) {
    assert_eq!(client.delete("/users/1").unwrap().status, 200);
}

pub fn existing_user_found(client: &ApiClient) {
    let existing = fixtures::existing_user();
    let user = json_object(client, &format!("/users/{}", existing.id));
    assert_eq!(user["username"], json!(existing.username));
}

pub fn missing_user_is_null(client: &ApiClient) {
    let outcome = client.get("/users/99999").unwrap();
    assert_eq!(outcome.status, 200);
    assert!(outcome.json().unwrap().is_none());
}

pub fn login_succeeds(client: &ApiClient) {
    let outcome = client.post("/auth/login", &fixtures::login_user()).unwrap();
    assert!(matches!(outcome.status, 200 | 201), "status {}", outcome.status);
    let body = outcome.json().unwrap().unwrap();
    assert!(body.get("token").is_some());
}

pub fn login_with_wrong_password_is_401(client: &ApiClient) {
    let outcome = client
        .post("/auth/login", &json!({"username": "invaliduser", "password": "wrongpassword"}))
        .unwrap();
    assert_eq!(outcome.status, 401);
}

pub fn login_without_password_is_rejected(client: &ApiClient) {
    let outcome = client.post("/auth/login", &json!({"username": "johnd"})).unwrap();
    assert!(matches!(outcome.status, 400 | 401), "status {}", outcome.status);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

/// Pick a sample user, pick the first product, put it in a new cart, and
/// check the acknowledged cart. Fields the service omits from the echo are
/// not held against it.
pub fn purchase_flow(client: &ApiClient) {
    let user = fixtures::users().remove(0);

    let products = json_list(client, "/products");
    assert!(!products.is_empty());
    let product_id = products[0]["id"].as_u64().unwrap_or(1);

    let mut cart = fixtures::valid_cart();
    cart.user_id = user.id;
    cart.products = vec![fixtures::CartLine { product_id, quantity: 1 }];

    let outcome = client.post("/carts", &cart).unwrap();
    assert!(matches!(outcome.status, 200 | 201), "status {}", outcome.status);
    let created = outcome.json().unwrap().expect("cart creation returned an empty body");

    assert_eq!(created.get("userId").and_then(Value::as_u64).unwrap_or(user.id), user.id);
    let lines = created
        .get("products")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].get("productId").and_then(Value::as_u64).unwrap_or(product_id), product_id);
    assert_eq!(lines[0].get("quantity").and_then(Value::as_u64).unwrap_or(1), 1);
}
