//! Attendance Records

use serde::Serialize;

/// One student's attendance within a single class session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub display_name: String,
    pub present: bool,
}

impl AttendanceRecord {
    /// New record, absent until toggled
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            present: false,
        }
    }

    pub fn with_present(mut self, present: bool) -> Self {
        self.present = present;
        self
    }

    /// Flip the present flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.present = !self.present;
        self.present
    }
}
