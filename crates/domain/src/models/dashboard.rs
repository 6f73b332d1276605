//! Dashboard statistics domain models.

use serde::{Deserialize, Serialize};

/// Request counts grouped by status, computed fresh on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: i64,
    pub new: i64,
    pub in_review: i64,
    pub approved: i64,
    pub rejected: i64,
    /// Derived bucket: approved + rejected.
    pub completed: i64,
}

impl DashboardStats {
    pub fn new(total: i64, new: i64, in_review: i64, approved: i64, rejected: i64) -> Self {
        Self {
            total,
            new,
            in_review,
            approved,
            rejected,
            completed: approved + rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_is_derived() {
        let stats = DashboardStats::new(10, 3, 2, 4, 1);
        assert_eq!(stats.completed, 5);
        assert_eq!(stats.total, 10);
    }

    #[test]
    fn test_serialization_includes_all_buckets() {
        let json = serde_json::to_string(&DashboardStats::new(1, 1, 0, 0, 0)).unwrap();
        for key in ["total", "new", "in_review", "approved", "rejected", "completed"] {
            assert!(json.contains(key), "missing key {}", key);
        }
    }
}
