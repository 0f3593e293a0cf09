//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use storefront::users::{Requester, Role};
use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::MockCartsService, coupons::MockCouponsService, orders::MockOrdersService,
        products::MockProductsService, shipping::MockShippingService, users::MockUsersService,
    },
    uploads::MockImageUploader,
};
use uuid::Uuid;

use crate::state::State;

pub(crate) const TEST_USER: Requester = Requester {
    user: Uuid::from_u128(0x0192_f8a4_6d2e_7c1b_9a8f_3b4c_5d6e_7f80),
    role: Role::User,
};

pub(crate) const TEST_ADMIN: Requester = Requester {
    user: Uuid::from_u128(0x0192_f8a4_6d2e_7c1b_9a8f_3b4c_5d6e_7f81),
    role: Role::Admin,
};

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();

    users
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();
    carts.expect_apply_coupon().never();
    carts.expect_purge_abandoned_carts().never();

    carts
}

fn strict_coupons_mock() -> MockCouponsService {
    let mut coupons = MockCouponsService::new();

    coupons.expect_list_coupons().never();
    coupons.expect_get_coupon().never();
    coupons.expect_create_coupon().never();
    coupons.expect_update_coupon().never();
    coupons.expect_delete_coupon().never();

    coupons
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_list_orders().never();
    orders.expect_get_order().never();
    orders.expect_update_shipping_price().never();
    orders.expect_delete_order().never();

    orders
}

fn strict_shipping_mock() -> MockShippingService {
    let mut shipping = MockShippingService::new();

    shipping.expect_get_shipping_price().never();
    shipping.expect_set_shipping_price().never();

    shipping
}

fn strict_uploads_mock() -> MockImageUploader {
    let mut uploads = MockImageUploader::new();

    uploads.expect_upload().never();
    uploads.expect_remove().never();

    uploads
}

/// App state where every service fails the test if it is called, unless
/// replaced with a mock carrying expectations.
pub(crate) struct TestState {
    app: AppContext,
}

impl TestState {
    pub(crate) fn new() -> Self {
        Self {
            app: AppContext {
                products: Arc::new(strict_products_mock()),
                users: Arc::new(strict_users_mock()),
                carts: Arc::new(strict_carts_mock()),
                coupons: Arc::new(strict_coupons_mock()),
                orders: Arc::new(strict_orders_mock()),
                shipping: Arc::new(strict_shipping_mock()),
                auth: Arc::new(strict_auth_mock()),
                uploads: Arc::new(strict_uploads_mock()),
            },
        }
    }

    pub(crate) fn auth(mut self, auth: MockAuthService) -> Self {
        self.app.auth = Arc::new(auth);
        self
    }

    pub(crate) fn products(mut self, products: MockProductsService) -> Self {
        self.app.products = Arc::new(products);
        self
    }

    pub(crate) fn carts(mut self, carts: MockCartsService) -> Self {
        self.app.carts = Arc::new(carts);
        self
    }

    pub(crate) fn coupons(mut self, coupons: MockCouponsService) -> Self {
        self.app.coupons = Arc::new(coupons);
        self
    }

    pub(crate) fn orders(mut self, orders: MockOrdersService) -> Self {
        self.app.orders = Arc::new(orders);
        self
    }

    pub(crate) fn shipping(mut self, shipping: MockShippingService) -> Self {
        self.app.shipping = Arc::new(shipping);
        self
    }

    pub(crate) fn uploads(mut self, uploads: MockImageUploader) -> Self {
        self.app.uploads = Arc::new(uploads);
        self
    }

    pub(crate) fn build(self) -> Arc<State> {
        State::from_app_context(self.app)
    }

    /// Serve `route` as `requester`, bypassing bearer authentication.
    pub(crate) fn serve_as(self, requester: Requester, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.build()))
                .hoop(inject(requester))
                .push(route),
        )
    }

    /// Serve `route` without a current user.
    pub(crate) fn serve_anonymous(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.build())).push(route))
    }
}

/// A storage failure for exercising 500 responses.
pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}
