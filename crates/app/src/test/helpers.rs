//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use storefront::{
    coupons::DiscountPercent,
    users::{Requester, Role},
};

use crate::{
    auth::token::hash_api_token,
    domain::{
        coupons::{
            CouponsService, CouponsServiceError,
            data::NewCoupon,
            records::{CouponRecord, CouponUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

async fn create_user_with_role(
    ctx: &TestContext,
    email: &str,
    role: Role,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            role,
            token_hash: hash_api_token(&token_for(email)),
        })
        .await
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    create_user_with_role(ctx, email, Role::User).await
}

pub(crate) async fn create_admin(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    create_user_with_role(ctx, email, Role::Admin).await
}

/// The bearer token registered for a user created by these helpers.
pub(crate) fn token_for(email: &str) -> String {
    format!("sf_{}", hash_api_token(email))
}

pub(crate) fn requester(user: &UserRecord) -> Requester {
    Requester {
        user: user.uuid.into_uuid(),
        role: user.role,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    title: &str,
    price: u64,
    quantity: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            title: title.to_string(),
            description: format!("A {title}"),
            price,
            quantity,
        })
        .await
}

pub(crate) async fn get_product(
    ctx: &TestContext,
    product: ProductUuid,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products.get_product(product).await
}

pub(crate) async fn set_product_price(
    ctx: &TestContext,
    product: ProductUuid,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .update_product(
            product,
            ProductUpdate {
                price: Some(price),
                ..ProductUpdate::default()
            },
        )
        .await
}

pub(crate) async fn delete_product(
    ctx: &TestContext,
    product: ProductUuid,
) -> Result<(), ProductsServiceError> {
    ctx.products.delete_product(product).await
}

/// Create a coupon expiring `expires_in` from now. Negative durations create
/// an already expired coupon.
pub(crate) async fn create_coupon(
    ctx: &TestContext,
    name: &str,
    discount: i64,
    expires_in: SignedDuration,
) -> Result<CouponRecord, CouponsServiceError> {
    let discount =
        DiscountPercent::try_from(discount).map_err(|_invalid| CouponsServiceError::InvalidData)?;

    let expires_at = Timestamp::now()
        .checked_add(expires_in)
        .map_err(|_overflow| CouponsServiceError::InvalidData)?;

    ctx.coupons
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            name: name.to_string(),
            discount,
            expires_at,
        })
        .await
}
