//! Cart persistence through the file backend.

use chrono::NaiveDate;
use tienda_commerce::cart::Cart;
use tienda_commerce::catalog::StaticCatalog;
use tienda_commerce::checkout::ShippingInfo;
use tienda_commerce::{Currency, ProductCode, TaxRate};
use tienda_store::{CartStore, FileStore, KeyValueStore};

fn product(code: &str) -> tienda_commerce::catalog::Product {
    product_in(code, Currency::ARS)
}

fn product_in(code: &str, currency: Currency) -> tienda_commerce::catalog::Product {
    StaticCatalog::demo(currency, TaxRate::IVA)
        .products()
        .iter()
        .find(|p| p.code == ProductCode::new(code))
        .cloned()
        .unwrap()
}

#[test]
fn saved_cart_loads_back_equal() {
    let dir = tempfile::tempdir().unwrap();
    let carts = CartStore::new(FileStore::new(dir.path()));

    let today = NaiveDate::from_ymd_opt(2030, 3, 1).unwrap();
    let mut cart = Cart::new();
    cart.add(product("7790360966841"), 2).unwrap();
    cart.set_shipping(
        ShippingInfo::new(
            "Ana Perez",
            "Av. Siempre Viva 742",
            "ana@example.com",
            NaiveDate::from_ymd_opt(2030, 3, 6).unwrap(),
        ),
        today,
        5,
    )
    .unwrap();
    carts.save(&cart).unwrap();

    // A fresh handle on the same directory sees the same cart.
    let reopened = CartStore::new(FileStore::new(dir.path()));
    assert_eq!(reopened.load().unwrap(), cart);
}

#[test]
fn dollar_cart_reloads_in_dollars() {
    let dir = tempfile::tempdir().unwrap();
    let carts = CartStore::new(FileStore::new(dir.path())).with_currency(Currency::USD);

    let mut cart = carts.load().unwrap();
    cart.add(product_in("7790360966841", Currency::USD), 1).unwrap();
    carts.save(&cart).unwrap();

    let reopened = CartStore::new(FileStore::new(dir.path())).with_currency(Currency::USD);
    let mut cart = reopened.load().unwrap();
    assert_eq!(cart.currency(), Currency::USD);
    assert_eq!(cart.lines[0].total.currency, Currency::USD);

    // Adding more dollar-priced products to the reloaded cart still works.
    cart.add(product_in("7790070410139", Currency::USD), 2).unwrap();
    cart.add(product_in("7790360966841", Currency::USD), 1).unwrap();
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.totals().unwrap().total.currency, Currency::USD);
}

#[test]
fn persisted_blob_uses_productos_and_envio() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let carts = CartStore::new(store.clone());

    let mut cart = Cart::new();
    cart.add(product("7790360966841"), 1).unwrap();
    carts.save(&cart).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("carrito.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let line = &json["productos"][0];
    assert_eq!(line["id"], 1);
    assert_eq!(line["codigo"], "7790360966841");
    assert_eq!(line["cantidad"], 1);
    assert!(line.get("precioVenta").is_some());
    assert!(json.get("envio").is_none());

    assert!(store.exists("carrito").unwrap());
}

#[test]
fn legacy_blob_without_lines_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .set("carrito", br#"{"esEnvio": false, "productos": []}"#)
        .unwrap();

    let cart = CartStore::new(store).load().unwrap();
    assert!(cart.is_empty());
    assert!(cart.shipping.is_none());
}

#[test]
fn corrupt_blob_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.set("carrito", b"not json").unwrap();

    assert!(CartStore::new(store).load().is_err());
}
