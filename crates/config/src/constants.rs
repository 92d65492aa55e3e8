//! Centralized constants for the copywriting assistant
//!
//! Single source of truth for business constants and defaults. Settings
//! structs use these as their serde defaults, so a deployment can still
//! override any of them from the settings file or environment.

/// Price engine constants (currency units)
pub mod pricing {
    /// Placeholder price when no catalog entry matches
    pub const CUSTOM_QUOTE_PRICE: f64 = 5000.0;

    /// Flat surcharge per free-text additional requirement
    pub const ADDITIONAL_REQUIREMENT_SURCHARGE: f64 = 500.0;

    /// Default currency code
    pub const DEFAULT_CURRENCY: &str = "RUB";
}

/// Discount rule defaults
pub mod discounts {
    /// First-time client discount (%)
    pub const NEW_CLIENT_PERCENT: f64 = 10.0;

    /// Returning client discount (%)
    pub const RETURNING_CLIENT_PERCENT: f64 = 15.0;

    /// Bulk order discount (%)
    pub const BULK_ORDER_PERCENT: f64 = 20.0;

    /// Minimum volume for the bulk discount (inclusive)
    pub const BULK_ORDER_MIN_VOLUME: u32 = 10;

    /// Enterprise discount (%)
    pub const ENTERPRISE_PERCENT: f64 = 25.0;

    /// Base price a business client must exceed for the enterprise discount
    pub const ENTERPRISE_MIN_BASE_PRICE: f64 = 10_000.0;
}

/// Session defaults
pub mod session {
    /// Number of recent user messages kept as classifier context
    pub const RECENT_MESSAGES_CAPACITY: usize = 10;
}

/// Console host defaults (milliseconds)
pub mod console {
    pub const THINKING_DELAY_MIN_MS: u64 = 400;
    pub const THINKING_DELAY_MAX_MS: u64 = 1200;
}

/// Brand and contact defaults
pub mod brand {
    pub const COMPANY_NAME: &str = "Текстовое бюро «Слово»";
    pub const PHONE: &str = "+7 (800) 555-35-35";
    pub const EMAIL: &str = "hello@slovo-copy.ru";
    pub const TELEGRAM: &str = "@slovo_copy";
    pub const WHATSAPP: &str = "+7 (900) 555-35-35";
    pub const ADDRESS: &str = "Москва, ул. Тверская, 7, офис 12";
    pub const WORKING_HOURS: &str = "пн–пт, 10:00–19:00 (МСК)";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounts_leave_room_above_zero() {
        // Largest combination a single segment can reach
        let business_max = discounts::BULK_ORDER_PERCENT + discounts::ENTERPRISE_PERCENT;
        let returning_max = discounts::BULK_ORDER_PERCENT + discounts::RETURNING_CLIENT_PERCENT;
        assert!(business_max < 100.0);
        assert!(returning_max < 100.0);
    }

    #[test]
    fn test_thinking_delay_range() {
        assert!(console::THINKING_DELAY_MIN_MS <= console::THINKING_DELAY_MAX_MS);
    }
}
