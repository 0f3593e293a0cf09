//! Orders
//!
//! Payment and lifecycle rules for placed orders.

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::users::Requester;

/// How long after placing an order its owner may still delete it.
pub const OWNER_DELETION_WINDOW: SignedDuration = SignedDuration::from_hours(1);

/// How an order is paid for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid on delivery.
    #[default]
    Cash,

    /// Instant transfer, evidenced by an uploaded proof image.
    InstaPay,
}

impl PaymentMethod {
    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::InstaPay => "insta_pay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised payment method name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method \"{0}\"")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "insta_pay" => Ok(PaymentMethod::InstaPay),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Payment state recorded on a new order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentStatus {
    /// Whether payment has been received.
    pub is_paid: bool,

    /// When payment was received.
    pub paid_at: Option<Timestamp>,
}

impl PaymentStatus {
    /// Payment state of an order placed at `now`. Instant transfers with a
    /// proof image count as paid; everything else is settled later.
    pub fn at_checkout(method: PaymentMethod, has_proof: bool, now: Timestamp) -> Self {
        if method == PaymentMethod::InstaPay && has_proof {
            Self {
                is_paid: true,
                paid_at: Some(now),
            }
        } else {
            Self {
                is_paid: false,
                paid_at: None,
            }
        }
    }
}

/// Why an order deletion was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeletionDenied {
    /// The requester neither owns the order nor is an admin.
    #[error("only the order's owner may delete it")]
    NotOwner,

    /// The owner's deletion window has passed.
    #[error("orders can only be deleted within one hour of being placed")]
    WindowElapsed,
}

/// Decide whether `requester` may delete an order placed by `owner` at
/// `placed_at`.
///
/// Admins may always delete. Owners may delete up to and including one hour
/// after placing the order.
///
/// # Errors
///
/// Returns the [`DeletionDenied`] reason when the deletion is not allowed.
pub fn authorize_deletion(
    requester: &Requester,
    owner: Uuid,
    placed_at: Timestamp,
    now: Timestamp,
) -> Result<(), DeletionDenied> {
    if requester.role.is_admin() {
        return Ok(());
    }

    if requester.user != owner {
        return Err(DeletionDenied::NotOwner);
    }

    if now.duration_since(placed_at) > OWNER_DELETION_WINDOW {
        return Err(DeletionDenied::WindowElapsed);
    }

    Ok(())
}

/// Progress of a checkout, recorded on log lines and failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Resolving the order lines.
    Building,

    /// Locking and checking stock.
    Validating,

    /// Writing the order and decrementing stock.
    Committing,

    /// Cleaning up the source cart.
    Fulfilling,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckoutStage::Building => "building",
            CheckoutStage::Validating => "validating",
            CheckoutStage::Committing => "committing",
            CheckoutStage::Fulfilling => "fulfilling",
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::users::Role;

    fn placed() -> Result<Timestamp, jiff::Error> {
        "2026-03-01T12:00:00Z".parse()
    }

    #[test]
    fn owner_may_delete_at_exactly_one_hour() -> TestResult {
        let owner = Uuid::from_u128(1);
        let placed_at = placed()?;
        let requester = Requester {
            user: owner,
            role: Role::User,
        };

        authorize_deletion(
            &requester,
            owner,
            placed_at,
            placed_at.checked_add(OWNER_DELETION_WINDOW)?,
        )?;

        Ok(())
    }

    #[test]
    fn owner_may_not_delete_after_window() -> TestResult {
        let owner = Uuid::from_u128(1);
        let placed_at = placed()?;
        let requester = Requester {
            user: owner,
            role: Role::User,
        };

        let result = authorize_deletion(
            &requester,
            owner,
            placed_at,
            placed_at.checked_add(SignedDuration::from_mins(61))?,
        );

        assert_eq!(result, Err(DeletionDenied::WindowElapsed));

        Ok(())
    }

    #[test]
    fn other_users_may_not_delete() -> TestResult {
        let placed_at = placed()?;
        let requester = Requester {
            user: Uuid::from_u128(2),
            role: Role::User,
        };

        assert_eq!(
            authorize_deletion(&requester, Uuid::from_u128(1), placed_at, placed_at),
            Err(DeletionDenied::NotOwner)
        );

        Ok(())
    }

    #[test]
    fn admins_may_delete_any_time() -> TestResult {
        let placed_at = placed()?;
        let requester = Requester {
            user: Uuid::from_u128(2),
            role: Role::Admin,
        };

        authorize_deletion(
            &requester,
            Uuid::from_u128(1),
            placed_at,
            placed_at.checked_add(SignedDuration::from_hours(48))?,
        )?;

        Ok(())
    }

    #[test]
    fn insta_pay_with_proof_is_paid() -> TestResult {
        let now = placed()?;

        assert_eq!(
            PaymentStatus::at_checkout(PaymentMethod::InstaPay, true, now),
            PaymentStatus {
                is_paid: true,
                paid_at: Some(now),
            }
        );
        assert!(!PaymentStatus::at_checkout(PaymentMethod::InstaPay, false, now).is_paid);
        assert!(!PaymentStatus::at_checkout(PaymentMethod::Cash, true, now).is_paid);

        Ok(())
    }

    #[test]
    fn payment_methods_use_snake_case() -> TestResult {
        assert_eq!(serde_json::to_string(&PaymentMethod::InstaPay)?, "\"insta_pay\"");
        assert_eq!("cash".parse::<PaymentMethod>()?, PaymentMethod::Cash);

        Ok(())
    }
}
