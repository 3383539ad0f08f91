//! # Admin Access Control
//!
//! Flat admin roster loaded from configuration. Membership gates the
//! dashboard and order-management callbacks; there is no role hierarchy.

use std::collections::HashSet;

/// Static set of Telegram user ids with dashboard access
#[derive(Debug, Clone, Default)]
pub struct AdminRoster {
    ids: HashSet<i64>,
}

impl AdminRoster {
    pub fn new(ids: HashSet<i64>) -> Self {
        Self { ids }
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
