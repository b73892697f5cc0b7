//! Orders Repository

use std::collections::HashMap;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar, types::Json};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    domain::{
        catalog::{
            ItemSnapshot,
            records::{ProductUuid, Spec, VariantUuid},
        },
        orders::{
            data::NewOrder,
            records::{
                CustomerSnapshot, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid,
                PaymentStatus, StatusEvent,
            },
            status::OrderStatus,
        },
        users::records::{ShippingAddress, UserUuid},
    },
    money::CURRENCY,
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_ITEM_SQL: &str = include_str!("sql/insert_order_item.sql");
const INSERT_ORDER_STATUS_EVENT_SQL: &str = include_str!("sql/insert_order_status_event.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("sql/list_orders_for_user.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const GET_ORDER_STATUS_EVENTS_SQL: &str = include_str!("sql/get_order_status_events.sql");
const LOCK_ORDER_STATUS_SQL: &str = include_str!("sql/lock_order_status.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("sql/set_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header and its line items. Status starts at `pending`.
    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.invoice_number.as_str())
            .bind(order.user_uuid.into_uuid())
            .bind(CURRENCY)
            .bind(amount_to_i64(order.totals.subtotal, "subtotal")?)
            .bind(amount_to_i64(order.totals.shipping_fee, "shipping_fee")?)
            .bind(amount_to_i64(order.totals.total, "total")?)
            .bind(order.payment_method.as_str())
            .bind(PaymentStatus::Pending.as_str())
            .bind(OrderStatus::Pending.as_str())
            .bind(order.customer.name.as_str())
            .bind(order.customer.email.as_str())
            .bind(order.customer.phone.as_str())
            .bind(Json(&order.shipping_address))
            .bind(order.notes.as_deref())
            .execute(&mut **tx)
            .await?;

        for (position, item) in order.items.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
                index: "position".to_string(),
                source: Box::new(e),
            })?;

            query(INSERT_ORDER_ITEM_SQL)
                .bind(item.uuid.into_uuid())
                .bind(order.uuid.into_uuid())
                .bind(position)
                .bind(item.product_uuid.into_uuid())
                .bind(item.variant_uuid.map(VariantUuid::into_uuid))
                .bind(item.snapshot.size.as_deref())
                .bind(item.snapshot.name.as_str())
                .bind(item.snapshot.sku.as_deref())
                .bind(item.snapshot.image.as_deref())
                .bind(Json(&item.snapshot.specs))
                .bind(amount_to_i64(item.price, "price")?)
                .bind(quantity_to_i32(item.quantity, "quantity")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn append_status_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        note: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_ORDER_STATUS_EVENT_SQL)
            .bind(Uuid::now_v7())
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(note)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Read the current status and lock the order row until the transaction ends.
    pub(crate) async fn lock_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderStatus, sqlx::Error> {
        let status: String = query_scalar(LOCK_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        parse_column(&status, "status")
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), sqlx::Error> {
        query(SET_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = self.with_lines(tx, vec![record]).await?;

        orders.pop().ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.with_lines(tx, orders).await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        self.with_lines(tx, orders).await
    }

    /// Attach line items and status history to order headers.
    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let mut items: HashMap<Uuid, Vec<OrderItemRecord>> = HashMap::new();

        for row in query_as::<Postgres, OrderItemRow>(GET_ORDER_ITEMS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?
        {
            items.entry(row.order_uuid).or_default().push(row.item);
        }

        let mut events: HashMap<Uuid, Vec<StatusEvent>> = HashMap::new();

        for row in query_as::<Postgres, StatusEventRow>(GET_ORDER_STATUS_EVENTS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?
        {
            events.entry(row.order_uuid).or_default().push(row.event);
        }

        for order in &mut orders {
            let uuid = order.uuid.into_uuid();

            order.items = items.remove(&uuid).unwrap_or_default();
            order.status_history = events.remove(&uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

struct OrderItemRow {
    order_uuid: Uuid,
    item: OrderItemRecord,
}

struct StatusEventRow {
    order_uuid: Uuid,
    event: StatusEvent,
}

fn parse_column<T>(value: &str, col: &str) -> Result<T, sqlx::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            invoice_number: row.try_get("invoice_number")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            currency: row.try_get("currency")?,
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_fee: try_get_amount(row, "shipping_fee")?,
            total: try_get_amount(row, "total")?,
            payment_method: parse_column(row.try_get("payment_method")?, "payment_method")?,
            payment_status: parse_column(row.try_get("payment_status")?, "payment_status")?,
            status: parse_column(row.try_get("status")?, "status")?,
            customer: CustomerSnapshot {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            shipping_address: row
                .try_get::<Json<ShippingAddress>, _>("shipping_address")?
                .0,
            notes: row.try_get("notes")?,
            items: Vec::new(),
            status_history: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: row.try_get("order_uuid")?,
            item: OrderItemRecord {
                uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                variant_uuid: row
                    .try_get::<Option<Uuid>, _>("variant_uuid")?
                    .map(VariantUuid::from_uuid),
                snapshot: ItemSnapshot {
                    name: row.try_get("name")?,
                    sku: row.try_get("sku")?,
                    size: row.try_get("size")?,
                    image: row.try_get("image")?,
                    specs: row.try_get::<Json<Vec<Spec>>, _>("specs")?.0,
                },
                price: try_get_amount(row, "price")?,
                quantity: try_get_quantity(row, "quantity")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StatusEventRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: row.try_get("order_uuid")?,
            event: StatusEvent {
                status: parse_column(row.try_get("status")?, "status")?,
                note: row.try_get("note")?,
                at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            },
        })
    }
}
