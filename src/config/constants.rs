use crate::utils::TimeUtils;

/// History ledger sizing
pub struct HistoryConfig {
    /// Maximum entries kept, most recent first
    pub capacity: usize,
}

pub const HISTORY: HistoryConfig = HistoryConfig { capacity: 20 };

/// Subscription plans and activation codes
pub struct SubscriptionConfig {
    /// Lifetime of a granted plan
    pub plan_duration_ms: i64,
    pub activation_prefix: &'static str,
    pub activation_min_len: usize,
    pub payment_url: &'static str,
}

pub const SUBSCRIPTION: SubscriptionConfig = SubscriptionConfig {
    plan_duration_ms: TimeUtils::MS_IN_D * 30,
    activation_prefix: "GOLD-",
    activation_min_len: 8,
    payment_url: "https://www.paypal.com/ncp/payment/WP36L5Q5FK9J4",
};

/// Chart screenshot normalization
pub struct ImageConfig {
    /// Longest side after downscaling. Keeps axis labels legible at a small payload.
    pub max_dimension: u32,
    pub jpeg_quality: u8,
    pub mime_type: &'static str,
}

pub const IMAGE: ImageConfig = ImageConfig {
    max_dimension: 1280,
    jpeg_quality: 80,
    mime_type: "image/jpeg",
};
