//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        carts::{
            records::CartItemRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            data::{NewCheckout, NewOrder, StatusUpdate},
            errors::OrdersServiceError,
            invoice_number::InvoiceNumberGenerator,
            records::{CustomerSnapshot, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
            status::OrderStatus,
        },
        pricing::Totals,
        users::{PgUsersService, UsersService, records::UserUuid, repository::PgUsersRepository},
    },
    notifications::OrderNotifier,
};

/// Checkout attempts before giving up on finding a free invoice number.
pub const MAX_INVOICE_ATTEMPTS: u32 = 5;

/// History note of the first status entry.
pub const ORDER_CREATED_NOTE: &str = "Order created";

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    users_repository: PgUsersRepository,
    users: PgUsersService,
    invoice_numbers: Arc<dyn InvoiceNumberGenerator>,
    notifier: Arc<dyn OrderNotifier>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(
        db: Db,
        invoice_numbers: Arc<dyn InvoiceNumberGenerator>,
        notifier: Arc<dyn OrderNotifier>,
    ) -> Self {
        let users = PgUsersService::new(db.clone());

        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            users_repository: PgUsersRepository::new(),
            users,
            invoice_numbers,
            notifier,
        }
    }

    /// One checkout attempt in a single transaction: lock the cart, copy it into an
    /// order, empty it.
    async fn place_order(
        &self,
        user: UserUuid,
        checkout: &NewCheckout,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::EmptyCart)?;

        let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let totals = Totals::for_lines(items.iter().map(|item| (item.price, item.quantity)))?;

        let customer = self
            .users_repository
            .get_user(&mut tx, user)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::CustomerNotFound,
                other => OrdersServiceError::from(other),
            })?;

        let order = NewOrder {
            uuid: OrderUuid::new(),
            invoice_number: self.invoice_numbers.generate(),
            user_uuid: user,
            totals,
            payment_method: checkout.payment_method,
            customer: CustomerSnapshot {
                name: customer.display_name().to_string(),
                email: customer.email.clone(),
                phone: customer.phone.clone(),
            },
            shipping_address: checkout.shipping_address.clone(),
            notes: checkout
                .notes
                .clone()
                .filter(|notes| !notes.trim().is_empty()),
            items: items.iter().map(freeze_item).collect(),
        };

        self.repository.insert_order(&mut tx, &order).await?;

        self.repository
            .append_status_event(
                &mut tx,
                order.uuid,
                OrderStatus::Pending,
                Some(ORDER_CREATED_NOTE),
            )
            .await?;

        self.items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let record = self.repository.get_order(&mut tx, order.uuid).await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Remember the address for the next checkout. Failure only costs convenience.
    async fn remember_address(&self, order: &OrderRecord) {
        let result = self
            .users
            .update_address(order.user_uuid, order.shipping_address.clone())
            .await;

        if let Err(error) = result {
            warn!(%error, user_uuid = %order.user_uuid, "failed to save shipping address");
        }
    }
}

fn freeze_item(item: &CartItemRecord) -> OrderItemRecord {
    OrderItemRecord {
        uuid: OrderItemUuid::new(),
        product_uuid: item.product_uuid,
        variant_uuid: item.variant_uuid,
        snapshot: item.snapshot.clone(),
        price: item.price,
        quantity: item.quantity,
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        user: UserUuid,
        checkout: NewCheckout,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !checkout.shipping_address.has_primary_line() {
            return Err(OrdersServiceError::MissingAddressLine);
        }

        let mut attempt = 1;

        let order = loop {
            match self.place_order(user, &checkout).await {
                Ok(order) => break order,
                Err(OrdersServiceError::InvoiceNumberTaken) if attempt < MAX_INVOICE_ATTEMPTS => {
                    warn!(attempt, "invoice number collision, retrying checkout");
                    attempt += 1;
                }
                Err(OrdersServiceError::InvoiceNumberTaken) => {
                    return Err(OrdersServiceError::InvoiceNumbersExhausted { attempts: attempt });
                }
                Err(error) => return Err(error),
            }
        };

        info!(
            order_uuid = %order.uuid,
            invoice_number = %order.invoice_number,
            total = order.total,
            "order created"
        );

        self.remember_address(&order).await;
        self.notifier.order_created(&order).await;

        Ok(order)
    }

    async fn list_for_user(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders_for_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all(&self, requester: Principal) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        if !requester.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        order: OrderUuid,
        requester: Principal,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if !requester.is_admin() && !record.is_owned_by(requester.user_uuid) {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(record)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        requester: Principal,
        update: StatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !requester.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order_status(&mut tx, order).await?;
        let next = update.status.unwrap_or(current);

        if !current.can_become(next) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        if next != current {
            self.repository.set_status(&mut tx, order, next).await?;
        }

        self.repository
            .append_status_event(&mut tx, order, next, update.note.as_deref())
            .await?;

        let record = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(order_uuid = %order, from = %current, to = %next, "order status updated");

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into an order and empty the cart.
    async fn checkout(
        &self,
        user: UserUuid,
        checkout: NewCheckout,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's own orders, newest first.
    async fn list_for_user(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first. Admin only.
    async fn list_all(&self, requester: Principal) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A single order, visible to its owner and to admins.
    async fn get_order(
        &self,
        order: OrderUuid,
        requester: Principal,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order along the status table and append a history entry. Admin only.
    async fn update_status(
        &self,
        order: OrderUuid,
        requester: Principal,
        update: StatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use testresult::TestResult;

    use crate::{
        auth::Principal,
        domain::{
            carts::CartsService,
            orders::{invoice_number::MockInvoiceNumberGenerator, records::PaymentMethod},
            users::UsersService,
        },
        notifications::MockOrderNotifier,
        test::{
            TestContext,
            helpers::{add_item, address, create_admin, create_user, insert_product, set_product_price},
        },
    };

    use super::*;

    fn checkout_request() -> NewCheckout {
        NewCheckout {
            payment_method: PaymentMethod::CashOnDelivery,
            shipping_address: address(),
            notes: Some("Leave at the door".to_string()),
        }
    }

    fn principal(user: &crate::domain::users::records::UserRecord) -> Principal {
        Principal::new(user.uuid, user.role)
    }

    #[tokio::test]
    async fn checkout_prices_freezes_and_empties_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 2).await?;

        let order = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        assert_eq!(order.subtotal, 10_000);
        assert_eq!(order.shipping_fee, 0);
        assert_eq!(order.total, 10_000);
        assert_eq!(order.currency, "BHD");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.customer.email, "noor@example.com");
        assert_eq!(order.notes.as_deref(), Some("Leave at the door"));
        assert!(order.invoice_number.starts_with("LTE-"));

        let [event] = order.status_history.as_slice() else {
            panic!("expected one history entry, got {:?}", order.status_history);
        };

        assert_eq!(event.status, OrderStatus::Pending);
        assert_eq!(event.note.as_deref(), Some(ORDER_CREATED_NOTE));

        assert!(ctx.carts.get_cart(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn small_orders_pay_shipping() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Bakhoor", Some(3_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;

        let order = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        assert_eq!(
            (order.subtotal, order.shipping_fee, order.total),
            (3_000, 1_000, 4_000)
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_checkout_fails_and_creates_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;

        let never_created = ctx.orders.checkout(user.uuid, checkout_request()).await;

        assert!(
            matches!(never_created, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {never_created:?}"
        );

        ctx.carts.get_cart(user.uuid).await?;

        let emptied = ctx.orders.checkout(user.uuid, checkout_request()).await;

        assert!(
            matches!(emptied, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {emptied:?}"
        );
        assert!(ctx.orders.list_for_user(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_requires_primary_address_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;

        let mut request = checkout_request();
        request.shipping_address.line1 = "   ".to_string();

        let result = ctx.orders.checkout(user.uuid, request).await;

        assert!(
            matches!(result, Err(OrdersServiceError::MissingAddressLine)),
            "expected MissingAddressLine, got {result:?}"
        );
        assert_eq!(ctx.carts.get_cart(user.uuid).await?.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn order_items_ignore_later_cart_and_catalog_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 2).await?;

        let order = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        set_product_price(&ctx, product, 9_000).await?;
        add_item(&ctx, user.uuid, product, None, None, 7).await?;

        let reloaded = ctx.orders.get_order(order.uuid, principal(&user)).await?;

        assert_eq!(reloaded.items, order.items);
        assert_eq!(reloaded.total, 10_000);
        assert_eq!(
            reloaded.items.first().map(|item| item.snapshot.name.as_str()),
            Some("Oud Oil")
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_remembers_shipping_address() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;
        ctx.orders.checkout(user.uuid, checkout_request()).await?;

        let profile = ctx.users.get_user(user.uuid).await?;

        assert_eq!(profile.address, Some(address()));

        Ok(())
    }

    #[tokio::test]
    async fn invoice_collision_is_retried_with_a_new_number() -> TestResult {
        let ctx = TestContext::new().await;
        let first = create_user(&ctx, "noor").await?;
        let second = create_user(&ctx, "hamad").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut numbers = MockInvoiceNumberGenerator::new();
        numbers.expect_generate().returning(move || {
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => "LTE-20260307-AAAAA".to_string(),
                _ => "LTE-20260307-BBBBB".to_string(),
            }
        });

        let mut notifier = MockOrderNotifier::new();
        notifier.expect_order_created().times(2).returning(|_| ());

        let orders = PgOrdersService::new(ctx.app_db(), Arc::new(numbers), Arc::new(notifier));

        add_item(&ctx, first.uuid, product, None, None, 1).await?;
        add_item(&ctx, second.uuid, product, None, None, 1).await?;

        let a = orders.checkout(first.uuid, checkout_request()).await?;
        let b = orders.checkout(second.uuid, checkout_request()).await?;

        assert_eq!(a.invoice_number, "LTE-20260307-AAAAA");
        assert_eq!(b.invoice_number, "LTE-20260307-BBBBB");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(ctx.carts.get_cart(second.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn persistent_collisions_give_up_and_keep_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let first = create_user(&ctx, "noor").await?;
        let second = create_user(&ctx, "hamad").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        let mut numbers = MockInvoiceNumberGenerator::new();
        numbers
            .expect_generate()
            .returning(|| "LTE-20260307-AAAAA".to_string());

        let mut notifier = MockOrderNotifier::new();
        notifier.expect_order_created().times(1).returning(|_| ());

        let orders = PgOrdersService::new(ctx.app_db(), Arc::new(numbers), Arc::new(notifier));

        add_item(&ctx, first.uuid, product, None, None, 1).await?;
        add_item(&ctx, second.uuid, product, None, None, 1).await?;

        orders.checkout(first.uuid, checkout_request()).await?;

        let result = orders.checkout(second.uuid, checkout_request()).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvoiceNumbersExhausted {
                    attempts: MAX_INVOICE_ATTEMPTS
                })
            ),
            "expected InvoiceNumbersExhausted, got {result:?}"
        );
        assert_eq!(ctx.carts.get_cart(second.uuid).await?.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn notifier_sees_the_created_order_once() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        let mut notifier = MockOrderNotifier::new();
        notifier
            .expect_order_created()
            .withf(|order| order.total == 10_000 && order.items.len() == 1)
            .once()
            .returning(|_| ());

        let orders = PgOrdersService::new(
            ctx.app_db(),
            Arc::new(crate::domain::orders::RandomInvoiceNumbers),
            Arc::new(notifier),
        );

        add_item(&ctx, user.uuid, product, None, None, 2).await?;
        orders.checkout(user.uuid, checkout_request()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_listed_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let other = create_user(&ctx, "hamad").await?;
        let admin = create_admin(&ctx, "amina").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;
        let older = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        add_item(&ctx, other.uuid, product, None, None, 1).await?;
        let theirs = ctx.orders.checkout(other.uuid, checkout_request()).await?;

        add_item(&ctx, user.uuid, product, None, None, 3).await?;
        let newer = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        let own: Vec<OrderUuid> = ctx
            .orders
            .list_for_user(user.uuid)
            .await?
            .iter()
            .map(|order| order.uuid)
            .collect();

        assert_eq!(own, vec![newer.uuid, older.uuid]);

        let all: Vec<OrderUuid> = ctx
            .orders
            .list_all(principal(&admin))
            .await?
            .iter()
            .map(|order| order.uuid)
            .collect();

        assert_eq!(all, vec![newer.uuid, theirs.uuid, older.uuid]);

        let result = ctx.orders.list_all(principal(&user)).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_visible_to_owner_and_admins_only() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "noor").await?;
        let stranger = create_user(&ctx, "hamad").await?;
        let admin = create_admin(&ctx, "amina").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, owner.uuid, product, None, None, 1).await?;
        let order = ctx.orders.checkout(owner.uuid, checkout_request()).await?;

        assert_eq!(
            ctx.orders.get_order(order.uuid, principal(&owner)).await?.uuid,
            order.uuid
        );
        assert_eq!(
            ctx.orders.get_order(order.uuid, principal(&admin)).await?.uuid,
            order.uuid
        );

        let result = ctx.orders.get_order(order.uuid, principal(&stranger)).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let missing = ctx.orders.get_order(OrderUuid::new(), principal(&admin)).await;

        assert!(
            matches!(missing, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn status_history_only_grows() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let admin = create_admin(&ctx, "amina").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;
        let order = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        let updates = [
            StatusUpdate {
                status: Some(OrderStatus::Confirmed),
                note: Some("Payment received".to_string()),
            },
            StatusUpdate {
                status: None,
                note: Some("Packed".to_string()),
            },
            StatusUpdate {
                status: Some(OrderStatus::Shipped),
                note: None,
            },
        ];

        let mut previous = order.status_history.clone();

        for update in updates {
            let updated = ctx
                .orders
                .update_status(order.uuid, principal(&admin), update)
                .await?;

            assert_eq!(updated.status_history.len(), previous.len() + 1);
            assert_eq!(
                updated.status_history.get(..previous.len()),
                Some(previous.as_slice()),
                "existing entries must be kept as they were"
            );

            previous = updated.status_history;
        }

        let statuses: Vec<OrderStatus> = previous.iter().map(|event| event.status).collect();

        assert_eq!(
            statuses,
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Confirmed,
                OrderStatus::Shipped,
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn disallowed_transition_is_rejected_without_history() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let admin = create_admin(&ctx, "amina").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;
        let order = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        let result = ctx
            .orders
            .update_status(
                order.uuid,
                principal(&admin),
                StatusUpdate {
                    status: Some(OrderStatus::Delivered),
                    note: None,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Delivered
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        let reloaded = ctx.orders.get_order(order.uuid, principal(&admin)).await?;

        assert_eq!(reloaded.status, OrderStatus::Pending);
        assert_eq!(reloaded.status_history.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn only_admins_update_status() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;
        let order = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        let result = ctx
            .orders
            .update_status(order.uuid, principal(&user), StatusUpdate::default())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn order_rows_reject_edits_to_frozen_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let product = insert_product(&ctx, "Oud Oil", Some(5_000)).await?;

        add_item(&ctx, user.uuid, product, None, None, 1).await?;
        let order = ctx.orders.checkout(user.uuid, checkout_request()).await?;

        let total = sqlx::query("UPDATE orders SET total = 1 WHERE uuid = $1")
            .bind(order.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await;

        let history = sqlx::query("DELETE FROM order_status_events WHERE order_uuid = $1")
            .bind(order.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await;

        assert!(total.is_err(), "totals are frozen");
        assert!(history.is_err(), "history is append-only");

        Ok(())
    }
}
