//! App Router

use salvo::Router;

use crate::{auth, carts, coupons, orders, products, shipping};

/// Routes for every store resource. Product reads are public; everything
/// else needs a bearer token, and administration needs the admin role.
pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(customer_router())
                .push(
                    Router::new()
                        .hoop(auth::admin::require_admin)
                        .push(admin_router()),
                ),
        )
}

fn customer_router() -> Router {
    Router::new()
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .post(carts::create::handler)
                .delete(carts::delete::handler)
                .push(Router::with_path("coupon").put(carts::coupon::handler))
                .push(
                    Router::with_path("items/{item}")
                        .put(carts::items::update::handler)
                        .delete(carts::items::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(Router::with_path("mine").get(orders::mine::handler))
                .push(Router::with_path("direct").post(orders::direct::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .delete(orders::delete::handler),
                ),
        )
        .push(Router::with_path("shipping-price").get(shipping::get::handler))
}

fn admin_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("coupons")
                .get(coupons::index::handler)
                .post(coupons::create::handler)
                .push(
                    Router::with_path("{coupon}")
                        .get(coupons::get::handler)
                        .put(coupons::update::handler)
                        .delete(coupons::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}/shipping").put(orders::shipping::handler)),
        )
        .push(Router::with_path("shipping-price").put(shipping::update::handler))
}
