//! # Conversation State Management
//!
//! Dialogue states for the intake conversation. Each chat sits in exactly
//! one state; menu buttons move the chat into a waiting state and the next
//! message is interpreted against it. `/cancel` and `/start` reset to
//! [`IntakeState::Idle`].

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;

/// What the bot is currently waiting for in a chat
#[derive(Clone, Default, Debug, PartialEq)]
pub enum IntakeState {
    /// Free intake: any message is classified and recorded
    #[default]
    Idle,
    /// "Search Products" pressed; next text is a product description
    AwaitingSearchText,
    /// "Verify Supplier" pressed; next text is a company name
    AwaitingSupplierName,
    /// "Track Shipment" pressed; next text is a tracking number
    AwaitingTrackingNumber,
    /// "Search by Image" pressed; next photo is a product reference
    AwaitingProductImage,
    /// Admin dashboard is open
    AdminMenu,
}

/// Dialogue handle threading [`IntakeState`] through the handler tree
pub type IntakeDialogue = Dialogue<IntakeState, InMemStorage<IntakeState>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(IntakeState::default(), IntakeState::Idle);
    }

    #[test]
    fn states_compare_by_variant() {
        assert_ne!(IntakeState::AwaitingSearchText, IntakeState::Idle);
        assert_eq!(IntakeState::AdminMenu, IntakeState::AdminMenu);
    }
}
