//! Enquiry records, the status state machine, and submission validation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Product;
use crate::error::{DomainError, DomainResult};
use crate::selection::{explain_block, Selection, SelectionBlock};

/// Lifecycle of an enquiry. `Pending` is the creation state; `Completed` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    Pending,
    Responded,
    Completed,
}

impl EnquiryStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EnquiryStatus::Pending => "pending",
            EnquiryStatus::Responded => "responded",
            EnquiryStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquiryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EnquiryStatus::Pending),
            "responded" => Ok(EnquiryStatus::Responded),
            "completed" => Ok(EnquiryStatus::Completed),
            other => Err(DomainError::validation(format!(
                "status must be 'pending', 'responded', or 'completed', got '{other}'"
            ))),
        }
    }
}

/// Allowed status transitions, all admin-triggered.
///
/// `responded` currently has no outgoing transitions; the admin surface only
/// offers controls on pending enquiries. A future `responded -> completed`
/// is an entry here, not new code.
pub const ALLOWED_TRANSITIONS: &[(EnquiryStatus, EnquiryStatus)] = &[
    (EnquiryStatus::Pending, EnquiryStatus::Responded),
    (EnquiryStatus::Pending, EnquiryStatus::Completed),
];

/// True iff `from -> to` appears in the transition table.
#[must_use]
pub fn can_transition(from: EnquiryStatus, to: EnquiryStatus) -> bool {
    ALLOWED_TRANSITIONS.contains(&(from, to))
}

/// Checks `from -> to` against the transition table.
///
/// # Errors
///
/// Returns [`DomainError::InvalidTransition`] when the pair is not allowed.
pub fn check_transition(from: EnquiryStatus, to: EnquiryStatus) -> DomainResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition { from, to })
    }
}

/// A stored enquiry, as listed on the admin dashboard.
///
/// The product is referenced by id and denormalized name for display; an
/// enquiry outlives any later catalog edits to that product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub message: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// The raw public enquiry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// A validated submission, ready to persist and relay. Produced only by
/// [`validate_submission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnquiryDraft {
    pub product_id: Uuid,
    pub product_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub message: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
}

/// Validates the enquiry form against the product's option requirements and
/// produces a draft carrying the selected option names (each nullable).
///
/// # Errors
///
/// Returns [`DomainError::Validation`] naming the first empty required field,
/// or describing the missing option selection when the variant requirements
/// are not met.
pub fn validate_submission(
    form: &EnquiryForm,
    product: &Product,
    selection: &Selection,
) -> DomainResult<EnquiryDraft> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    let email = form.email.trim();
    if email.is_empty() {
        return Err(DomainError::validation("email must not be empty"));
    }
    let message = form.message.trim();
    if message.is_empty() {
        return Err(DomainError::validation("message must not be empty"));
    }

    match explain_block(product, selection) {
        SelectionBlock::None => {}
        SelectionBlock::NeedsFabric => {
            return Err(DomainError::validation("a fabric must be selected"));
        }
        SelectionBlock::NeedsColor => {
            return Err(DomainError::validation("a color must be selected"));
        }
        SelectionBlock::NeedsBoth => {
            return Err(DomainError::validation(
                "a fabric and a color must be selected",
            ));
        }
    }

    let phone = form
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned);

    Ok(EnquiryDraft {
        product_id: product.id,
        product_name: product.name.clone(),
        customer_name: name.to_owned(),
        customer_email: email.to_owned(),
        customer_phone: phone,
        message: message.to_owned(),
        fabric: selection.fabric.clone(),
        color: selection.color.clone(),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::catalog::ProductFabric;

    use super::*;

    fn product(fabrics: Vec<ProductFabric>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Harbor Sofa".to_string(),
            description: None,
            price: dec!(100.00),
            category: "Sofas".to_string(),
            stock: 4,
            images: vec![],
            is_special: false,
            special_price: None,
            is_featured: false,
            fabrics,
            colors: vec![],
            sizes: vec![],
            reviews: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn form() -> EnquiryForm {
        EnquiryForm {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            phone: None,
            message: "hi".to_string(),
        }
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            EnquiryStatus::Pending,
            EnquiryStatus::Responded,
            EnquiryStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<EnquiryStatus>().unwrap(), status);
        }
        assert!("archived".parse::<EnquiryStatus>().is_err());
    }

    #[test]
    fn pending_may_become_responded_or_completed() {
        assert!(can_transition(EnquiryStatus::Pending, EnquiryStatus::Responded));
        assert!(can_transition(EnquiryStatus::Pending, EnquiryStatus::Completed));
    }

    #[test]
    fn completed_is_terminal() {
        for to in [
            EnquiryStatus::Pending,
            EnquiryStatus::Responded,
            EnquiryStatus::Completed,
        ] {
            let err = check_transition(EnquiryStatus::Completed, to).unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition { .. }));
        }
    }

    #[test]
    fn responded_is_a_dead_end() {
        for to in [
            EnquiryStatus::Pending,
            EnquiryStatus::Responded,
            EnquiryStatus::Completed,
        ] {
            assert!(!can_transition(EnquiryStatus::Responded, to));
        }
    }

    #[test]
    fn self_transitions_are_rejected() {
        assert!(!can_transition(EnquiryStatus::Pending, EnquiryStatus::Pending));
    }

    #[test]
    fn submission_without_required_options_succeeds_with_null_selection() {
        let p = product(vec![]);
        let draft = validate_submission(&form(), &p, &Selection::default()).unwrap();
        assert_eq!(draft.product_id, p.id);
        assert_eq!(draft.product_name, "Harbor Sofa");
        assert_eq!(draft.customer_name, "Jo");
        assert_eq!(draft.customer_email, "jo@x.com");
        assert_eq!(draft.message, "hi");
        assert!(draft.fabric.is_none());
        assert!(draft.color.is_none());
    }

    #[test]
    fn submission_rejects_empty_required_fields() {
        let p = product(vec![]);
        let cases = [
            (EnquiryForm { name: "  ".to_string(), ..form() }, "name"),
            (EnquiryForm { email: String::new(), ..form() }, "email"),
            (EnquiryForm { message: "\n".to_string(), ..form() }, "message"),
        ];
        for (bad_form, field) in cases {
            let err = validate_submission(&bad_form, &p, &Selection::default()).unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(ref m) if m.contains(field)),
                "expected error naming '{field}'"
            );
        }
    }

    #[test]
    fn submission_blocks_until_required_fabric_is_chosen() {
        let p = product(vec![ProductFabric {
            id: Uuid::new_v4(),
            name: "Linen".to_string(),
            image: None,
        }]);

        let err = validate_submission(&form(), &p, &Selection::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("fabric")));

        let selection = Selection {
            fabric: Some("Linen".to_string()),
            color: None,
        };
        let draft = validate_submission(&form(), &p, &selection).unwrap();
        assert_eq!(draft.fabric.as_deref(), Some("Linen"));
        assert!(draft.color.is_none());
    }

    #[test]
    fn submission_trims_fields_and_drops_blank_phone() {
        let p = product(vec![]);
        let padded = EnquiryForm {
            name: " Jo ".to_string(),
            email: " jo@x.com ".to_string(),
            phone: Some("   ".to_string()),
            message: " hi ".to_string(),
        };
        let draft = validate_submission(&padded, &p, &Selection::default()).unwrap();
        assert_eq!(draft.customer_name, "Jo");
        assert_eq!(draft.customer_email, "jo@x.com");
        assert!(draft.customer_phone.is_none());
        assert_eq!(draft.message, "hi");
    }
}
