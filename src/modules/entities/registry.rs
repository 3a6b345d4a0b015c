//! The catalog of entity types served by the generic CRUD endpoint.
//!
//! Exposing a new collection through the API is one line here: the display
//! name doubles as the route segment once lower-cased, and look-ups are
//! case-insensitive, so `/api/AcademicYear` and `/api/academicyear` reach
//! the same collection.

use anyhow::anyhow;

use scholaris_core::AppError;

use super::model::EntityDescriptor;

/// Display names of every entity type exposed under `/api/{entity}`.
///
/// The reserved `users` collection is deliberately absent: operator
/// accounts are only reachable through the auth endpoints and the CLI.
pub const ENTITY_TYPES: &[&str] = &[
    "AcademicYear",
    "Alumni",
    "Announcement",
    "Assignment",
    "AssignmentSubmission",
    "Attendance",
    "Building",
    "Certificate",
    "Classroom",
    "ClassSchedule",
    "Club",
    "ClubMembership",
    "Complaint",
    "Course",
    "CourseSection",
    "Department",
    "Designation",
    "DisciplinaryAction",
    "Employee",
    "EmployeeAttendance",
    "Enrollment",
    "Event",
    "Exam",
    "ExamResult",
    "ExamSchedule",
    "FeeCategory",
    "FeeInvoice",
    "FeePayment",
    "FeeSchedule",
    "FeeWaiver",
    "Grade",
    "GradeScale",
    "Guardian",
    "Holiday",
    "Hostel",
    "HostelAllocation",
    "HostelRoom",
    "InventoryItem",
    "LeaveBalance",
    "LeaveRequest",
    "LeaveType",
    "Lesson",
    "LessonPlan",
    "LibraryBook",
    "LibraryLoan",
    "MedicalRecord",
    "Payroll",
    "Period",
    "Scholarship",
    "Section",
    "Student",
    "Subject",
    "Syllabus",
    "Teacher",
    "Term",
    "Timetable",
    "TransportAllocation",
    "TransportRoute",
    "Vehicle",
    "Visitor",
    "Workspace",
];

/// Resolves a path segment to its canonical collection name.
pub fn resolve_segment(raw: &str) -> Result<String, AppError> {
    ENTITY_TYPES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(raw))
        .map(|name| name.to_ascii_lowercase())
        .ok_or_else(|| AppError::not_found(anyhow!("Unknown entity type: {}", raw)))
}

/// Descriptors for the discovery endpoint, in catalog order.
pub fn descriptors() -> Vec<EntityDescriptor> {
    ENTITY_TYPES
        .iter()
        .map(|name| EntityDescriptor {
            name: (*name).to_string(),
            segment: name.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve_segment("building").unwrap(), "building");
        assert_eq!(resolve_segment("Building").unwrap(), "building");
        assert_eq!(resolve_segment("BUILDING").unwrap(), "building");
        assert_eq!(resolve_segment("academicyear").unwrap(), "academicyear");
        assert_eq!(resolve_segment("AcademicYear").unwrap(), "academicyear");
    }

    #[test]
    fn test_resolve_unknown_segment_is_not_found() {
        let err = resolve_segment("bogus").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error.to_string(), "Unknown entity type: bogus");
    }

    #[test]
    fn test_users_collection_is_reserved() {
        assert!(resolve_segment("users").is_err());
        assert!(resolve_segment("Users").is_err());
    }

    #[test]
    fn test_catalog_covers_core_school_entities() {
        for name in [
            "AcademicYear",
            "Attendance",
            "Building",
            "Certificate",
            "FeeSchedule",
            "Workspace",
        ] {
            assert!(ENTITY_TYPES.contains(&name), "missing {}", name);
        }
        assert!(ENTITY_TYPES.len() >= 60);
    }

    #[test]
    fn test_segments_are_unique() {
        let segments: HashSet<String> = ENTITY_TYPES
            .iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        assert_eq!(segments.len(), ENTITY_TYPES.len());
    }

    #[test]
    fn test_descriptors_match_catalog() {
        let descriptors = descriptors();
        assert_eq!(descriptors.len(), ENTITY_TYPES.len());
        assert_eq!(descriptors[0].name, "AcademicYear");
        assert_eq!(descriptors[0].segment, "academicyear");
    }
}
