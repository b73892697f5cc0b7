//! Test Helpers

use sqlx::query;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, data::NewCartItem, records::CartRecord},
        catalog::records::{ProductUuid, VariantUuid},
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, ShippingAddress, UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_user(username: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        username: username.to_string(),
        name: None,
        email: format!("{username}@example.com"),
        phone: "+97333000000".to_string(),
        role: Role::User,
    }
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users.create_user(new_user(username)).await
}

pub(crate) async fn create_admin(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            role: Role::Admin,
            ..new_user(username)
        })
        .await
}

pub(crate) fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: Some("Noor Ali".to_string()),
        phone: Some("+97333000000".to_string()),
        line1: "Building 12, Road 3404".to_string(),
        line2: None,
        city: Some("Manama".to_string()),
        country: Some("Bahrain".to_string()),
        postal_code: Some("334".to_string()),
    }
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    variant: Option<VariantUuid>,
    size: Option<&str>,
    quantity: u32,
) -> Result<CartRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                product_uuid: product,
                variant_uuid: variant,
                size: size.map(ToString::to_string),
                quantity,
            },
        )
        .await
}

pub(crate) async fn insert_product(
    ctx: &TestContext,
    name: &str,
    base_price: Option<u64>,
) -> Result<ProductUuid, sqlx::Error> {
    let uuid = ProductUuid::new();

    query("INSERT INTO products (uuid, name, sku, base_price) VALUES ($1, $2, $3, $4)")
        .bind(uuid.into_uuid())
        .bind(name)
        .bind(format!("SKU-{}", name.to_uppercase().replace(' ', "-")))
        .bind(base_price.map(amount))
        .execute(ctx.db.pool())
        .await?;

    Ok(uuid)
}

pub(crate) async fn insert_variant(
    ctx: &TestContext,
    product: ProductUuid,
    name: &str,
    price: Option<u64>,
    stock: Option<u32>,
) -> Result<VariantUuid, sqlx::Error> {
    let uuid = VariantUuid::new();

    query(
        "INSERT INTO product_variants (uuid, product_uuid, name, price, stock) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(uuid.into_uuid())
    .bind(product.into_uuid())
    .bind(name)
    .bind(price.map(amount))
    .bind(stock.map(|stock| i32::try_from(stock).unwrap_or(i32::MAX)))
    .execute(ctx.db.pool())
    .await?;

    Ok(uuid)
}

pub(crate) async fn insert_size(
    ctx: &TestContext,
    product: ProductUuid,
    variant: Option<VariantUuid>,
    label: &str,
    price: Option<u64>,
    out_of_stock: bool,
) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO product_sizes (uuid, product_uuid, variant_uuid, label, price, out_of_stock) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(uuid::Uuid::now_v7())
    .bind(product.into_uuid())
    .bind(variant.map(VariantUuid::into_uuid))
    .bind(label)
    .bind(price.map(amount))
    .bind(out_of_stock)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

pub(crate) async fn deactivate_product(
    ctx: &TestContext,
    product: ProductUuid,
) -> Result<(), sqlx::Error> {
    query("UPDATE products SET is_active = FALSE WHERE uuid = $1")
        .bind(product.into_uuid())
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) async fn set_product_price(
    ctx: &TestContext,
    product: ProductUuid,
    base_price: u64,
) -> Result<(), sqlx::Error> {
    query("UPDATE products SET base_price = $2, name = name || ' (new)' WHERE uuid = $1")
        .bind(product.into_uuid())
        .bind(amount(base_price))
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

fn amount(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
