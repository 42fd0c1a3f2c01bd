//! Auto-pay detection between accounts and policies

use super::*;
use crate::similarity::last_four_digits;
use govault_domain::RelationshipType;

const ACCOUNT_NUMBER: &[&str] = &["accountNumber", "account"];
const PAYMENT_ACCOUNT: &[&str] = &["paymentAccount", "autoPayAccount", "paymentMethod"];

/// Policies paid from an account (Finance subject)
///
/// Matches the last four digits of the account number against the payment
/// account stored on each policy. Edges point from the account to the policy.
pub fn auto_pay(
    account: &Record,
    all_records: &[Record],
    ctx: &DetectorContext<'_>,
) -> Vec<Relationship> {
    let Some(last_four) = last_four_digits(&account.text_any(ACCOUNT_NUMBER)) else {
        return Vec::new();
    };

    candidates(account, all_records, Category::Insurance)
        .filter(|policy| {
            last_four_digits(&policy.text_any(PAYMENT_ACCOUNT)).as_deref() == Some(last_four.as_str())
        })
        .map(|policy| {
            Relationship::detected(
                account,
                policy,
                RelationshipType::PaymentSource,
                Strength::new(AUTO_PAY_STRENGTH),
                format!("Account ending in {} pays {}", last_four, policy.title()),
                ctx.now,
            )
        })
        .collect()
}
