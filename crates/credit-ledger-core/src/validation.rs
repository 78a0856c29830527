//! Record-time contract checks.
//!
//! Replay accepts any event: a zero grant adds an empty bucket and an
//! inverted window is expired before it can be used. These checks exist for
//! callers that would rather reject such input at the door.

use crate::error::ValidationError;
use crate::event::{GrantEvent, LedgerEvent};

/// Validate a grant's amount and window.
pub fn validate_grant(grant: &GrantEvent) -> Result<(), ValidationError> {
    if grant.amount.is_zero() {
        return Err(ValidationError::ZeroGrant);
    }

    if grant.is_inverted() {
        return Err(ValidationError::InvertedWindow {
            available_from: grant.available_from,
            expires_at: grant.expires_at,
        });
    }

    Ok(())
}

/// Validate any event. Spends of any amount, zero included, are legal.
pub fn validate_event(event: &LedgerEvent) -> Result<(), ValidationError> {
    match event {
        LedgerEvent::Grant(grant) => validate_grant(grant),
        LedgerEvent::Spend(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SpendEvent;
    use crate::types::{Amount, Timestamp};

    #[test]
    fn test_valid_grant() {
        let grant = GrantEvent::new(Amount(1), Timestamp(10), Timestamp(100));
        assert_eq!(validate_grant(&grant), Ok(()));
    }

    #[test]
    fn test_zero_grant_rejected() {
        let grant = GrantEvent::new(Amount(0), Timestamp(10), Timestamp(100));
        assert_eq!(validate_grant(&grant), Err(ValidationError::ZeroGrant));
    }

    #[test]
    fn test_empty_window_rejected() {
        let grant = GrantEvent::new(Amount(1), Timestamp(10), Timestamp(10));
        assert_eq!(
            validate_grant(&grant),
            Err(ValidationError::InvertedWindow {
                available_from: Timestamp(10),
                expires_at: Timestamp(10),
            })
        );
    }

    #[test]
    fn test_zero_spend_accepted() {
        let spend = LedgerEvent::Spend(SpendEvent::new(Amount(0), Timestamp(3)));
        assert_eq!(validate_event(&spend), Ok(()));
    }
}
