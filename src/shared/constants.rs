// =============================================================================
// COMPLAINT STATUS CONSTANTS
// =============================================================================

/// Status every complaint starts with
pub const STATUS_SUBMITTED: &str = "Submitted";

/// Status set by the assignment endpoint
pub const STATUS_ASSIGNED: &str = "Assigned";

// =============================================================================
// UPLOAD LIMITS
// =============================================================================

/// Maximum accepted image size in bytes (5MB, inclusive)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Extra room on the request body for the text fields and multipart framing
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Image extensions accepted on upload, matched case-insensitively
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif"];
