//! Course catalog models.
//!
//! The catalog is reference data: it is read from the `courses` document in
//! the store, or from the built-in sample set when that document is absent.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use yoklama_core::{PaginationMeta, PaginationParams};

use crate::ids::{CourseId, StudentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    #[schema(example = "MAT101")]
    pub code: String,
    pub name: String,
    pub section: String,
    pub classroom: String,
    /// Display color as `#RRGGBB`
    #[schema(example = "#3B82F6")]
    pub color: String,
    pub instructor: String,
    pub student_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A course together with its enrolled students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithRoster {
    #[serde(flatten)]
    pub course: Course,
    pub students: Vec<Student>,
}

/// The persisted `courses` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourseCatalogDocument {
    pub courses: Vec<CourseWithRoster>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    /// Case-insensitive match on code or name
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub data: Vec<Course>,
    pub meta: PaginationMeta,
}

const FIRST_NAMES: [&str; 16] = [
    "Ahmet", "Elif", "Mehmet", "Zeynep", "Mustafa", "Ayşe", "Emre", "Merve", "Burak", "Selin",
    "Can", "Ece", "Oğuz", "Deniz", "Kerem", "İrem",
];

const LAST_NAMES: [&str; 12] = [
    "Yılmaz", "Kaya", "Demir", "Şahin", "Çelik", "Yıldız", "Aydın", "Öztürk", "Arslan", "Doğan",
    "Kılıç", "Koç",
];

/// Builds a deterministic roster of `size` students for a course.
///
/// Student ids are `course_id * 1000 + n`, so they stay unique across the
/// catalog.
pub fn sample_roster(course_id: CourseId, size: u32) -> Vec<Student> {
    let course = course_id.value();
    (1..=i64::from(size))
        .map(|n| {
            let first = FIRST_NAMES[((n * 7 + course) as usize) % FIRST_NAMES.len()];
            let last = LAST_NAMES[((n * 5 + course * 3) as usize) % LAST_NAMES.len()];
            Student {
                id: StudentId(course * 1000 + n),
                student_number: format!("2024{:02}{:03}", course, n),
                first_name: first.to_string(),
                last_name: last.to_string(),
            }
        })
        .collect()
}

/// The built-in catalog used when no `courses` document is stored.
pub fn sample_catalog() -> CourseCatalogDocument {
    let courses = [
        (1, "MAT101", "Matematik I", "A", "D-101", "#3B82F6", 32),
        (2, "FIZ102", "Fizik II", "B", "D-203", "#10B981", 28),
        (3, "BIL201", "Veri Yapıları", "A", "Lab-2", "#8B5CF6", 24),
        (4, "BIL305", "Veritabanı Sistemleri", "A", "Lab-1", "#F59E0B", 30),
        (5, "MAT205", "Lineer Cebir", "C", "D-105", "#EF4444", 26),
    ];

    CourseCatalogDocument {
        courses: courses
            .into_iter()
            .map(|(id, code, name, section, classroom, color, size)| {
                let id = CourseId(id);
                CourseWithRoster {
                    course: Course {
                        id,
                        code: code.to_string(),
                        name: name.to_string(),
                        section: section.to_string(),
                        classroom: classroom.to_string(),
                        color: color.to_string(),
                        instructor: "Dr. Ayşe Yılmaz".to_string(),
                        student_count: size,
                    },
                    students: sample_roster(id, size),
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_catalog_counts_match_rosters() {
        let catalog = sample_catalog();
        assert_eq!(catalog.courses.len(), 5);
        for entry in &catalog.courses {
            assert_eq!(entry.course.student_count as usize, entry.students.len());
        }
    }

    #[test]
    fn test_student_ids_are_unique() {
        let catalog = sample_catalog();
        let ids: Vec<_> = catalog
            .courses
            .iter()
            .flat_map(|c| c.students.iter().map(|s| s.id))
            .collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn test_roster_is_deterministic() {
        assert_eq!(sample_roster(CourseId(1), 3), sample_roster(CourseId(1), 3));
        assert_eq!(sample_roster(CourseId(2), 1)[0].student_number, "202402001");
    }

    #[test]
    fn test_course_with_roster_is_flattened() {
        let entry = &sample_catalog().courses[0];
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["code"], "MAT101");
        assert_eq!(json["studentCount"], 32);
        assert!(json["students"].is_array());
    }
}
