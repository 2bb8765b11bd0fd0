/// Lowest accepted review rating
pub const MIN_RATING: i32 = 1;

/// Highest accepted review rating
pub const MAX_RATING: i32 = 5;

/// Message used by every admin-only guard
pub const ADMIN_REQUIRED_MESSAGE: &str = "Access denied. Admin privileges required.";
