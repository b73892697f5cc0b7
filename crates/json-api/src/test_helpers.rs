//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use souq_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        catalog::{
            ItemSnapshot,
            records::{ProductUuid, Spec},
        },
        orders::{
            MockOrdersService, OrderStatus,
            records::{
                CustomerSnapshot, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid,
                PaymentMethod, PaymentStatus, StatusEvent,
            },
        },
        users::records::{Role, ShippingAddress, UserUuid},
    },
    invoices::MockInvoiceRenderer,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_USER: Principal = Principal::new(TEST_USER_UUID, Role::User);

pub(crate) const TEST_ADMIN: Principal = Principal::new(
    UserUuid::from_uuid(Uuid::from_u128(0x0192_f0c1_7a3e_7cc1_9a1b_5c3d_2e1f_0a9b)),
    Role::Admin,
);

#[salvo::handler]
async fn inject_user(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_principal(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_list_for_user().never();
    orders.expect_list_all().never();
    orders.expect_get_order().never();
    orders.expect_update_status().never();

    orders
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn strict_invoices_mock() -> MockInvoiceRenderer {
    let mut invoices = MockInvoiceRenderer::new();

    invoices.expect_render().never();

    invoices
}

fn state(
    carts: MockCartsService,
    orders: MockOrdersService,
    auth: MockAuthService,
    invoices: MockInvoiceRenderer,
) -> Arc<State> {
    State::from_app_context(AppContext {
        carts: Arc::new(carts),
        orders: Arc::new(orders),
        auth: Arc::new(auth),
        invoices: Arc::new(invoices),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(
        strict_carts_mock(),
        strict_orders_mock(),
        auth,
        strict_invoices_mock(),
    )
}

/// A service for `route` with the cart mock, called by [`TEST_USER`].
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let state = state(
        carts,
        strict_orders_mock(),
        strict_auth_mock(),
        strict_invoices_mock(),
    );

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service for `route` with the order and invoice mocks, called by `principal`.
pub(crate) fn orders_service(
    orders: MockOrdersService,
    invoices: MockInvoiceRenderer,
    principal: Principal,
    route: Router,
) -> Service {
    let state = state(strict_carts_mock(), orders, strict_auth_mock(), invoices);

    let router = Router::new().hoop(inject(state));

    let router = if principal.is_admin() {
        router.hoop(inject_admin)
    } else {
        router.hoop(inject_user)
    };

    Service::new(router.push(route))
}

pub(crate) fn snapshot(name: &str, size: Option<&str>) -> ItemSnapshot {
    ItemSnapshot {
        name: name.to_string(),
        sku: Some(format!("{}-SKU", name.to_uppercase())),
        size: size.map(ToString::to_string),
        image: None,
        specs: vec![Spec {
            label: "Material".to_string(),
            value: "Cotton".to_string(),
        }],
    }
}

/// A cart owned by [`TEST_USER`] holding `(price, quantity)` lines.
pub(crate) fn make_cart(lines: &[(u64, u32)]) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        user_uuid: TEST_USER_UUID,
        items: lines
            .iter()
            .map(|&(price, quantity)| CartItemRecord {
                uuid: CartItemUuid::new(),
                product_uuid: ProductUuid::new(),
                variant_uuid: None,
                snapshot: snapshot("Thobe", Some("M")),
                price,
                quantity,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            })
            .collect(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A pending cash-on-delivery order for `owner` with one 5.000 BHD line, quantity 2.
pub(crate) fn make_order(owner: UserUuid) -> OrderRecord {
    OrderRecord {
        uuid: OrderUuid::new(),
        invoice_number: "LTE-20260307-A1B2C".to_string(),
        user_uuid: owner,
        currency: "BHD".to_string(),
        subtotal: 10_000,
        shipping_fee: 0,
        total: 10_000,
        payment_method: PaymentMethod::CashOnDelivery,
        payment_status: PaymentStatus::Pending,
        status: OrderStatus::Pending,
        customer: CustomerSnapshot {
            name: "Noor Ali".to_string(),
            email: "noor@example.com".to_string(),
            phone: "+97333000000".to_string(),
        },
        shipping_address: ShippingAddress {
            line1: "Road 1, Block 2".to_string(),
            city: Some("Manama".to_string()),
            country: Some("Bahrain".to_string()),
            ..ShippingAddress::default()
        },
        notes: None,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            product_uuid: ProductUuid::new(),
            variant_uuid: None,
            snapshot: snapshot("Thobe", Some("M")),
            price: 5_000,
            quantity: 2,
        }],
        status_history: vec![StatusEvent {
            status: OrderStatus::Pending,
            note: Some("Order created".to_string()),
            at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
