//! App Router

use salvo::Router;

use crate::{
    auth::{self, admin::require_admin},
    carts, orders,
};

/// Every authenticated route. Static segments are pushed before `{order}` so
/// `/orders/admin` and `/orders/checkout` are never read as order ids.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .push(Router::with_path("clear").delete(carts::handlers::clear::handler))
                .push(
                    Router::with_path("items")
                        .post(carts::items::handlers::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .patch(carts::items::handlers::update::handler)
                                .delete(carts::items::handlers::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .push(Router::with_path("checkout").post(orders::handlers::checkout::handler))
                .push(
                    Router::with_path("admin")
                        .hoop(require_admin)
                        .get(orders::handlers::admin_index::handler),
                )
                .push(
                    Router::with_path("{order}")
                        .get(orders::handlers::get::handler)
                        .push(
                            Router::with_path("status")
                                .hoop(require_admin)
                                .patch(orders::handlers::update_status::handler),
                        )
                        .push(Router::with_path("invoice").get(orders::handlers::invoice::handler)),
                ),
        )
}
