//! Course catalog generation.
//!
//! Keeps the built-in course list and replaces each roster with generated
//! students. Rosters are generated in parallel.

use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;

use yoklama_models::courses::{CourseCatalogDocument, CourseWithRoster, Student, sample_catalog};
use yoklama_models::ids::{CourseId, StudentId};

/// Roster sizes drawn for each course.
#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub min_students: u32,
    pub max_students: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            min_students: 20,
            max_students: 35,
        }
    }
}

impl SeedConfig {
    pub fn fixed(students: u32) -> Self {
        Self {
            min_students: students,
            max_students: students,
        }
    }
}

pub fn generate_roster(course_id: CourseId, size: u32) -> Vec<Student> {
    let course = course_id.value();
    (1..=i64::from(size))
        .map(|n| Student {
            id: StudentId(course * 1000 + n),
            student_number: format!("2024{:02}{:03}", course, n),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
        })
        .collect()
}

pub fn generate_catalog(config: SeedConfig) -> CourseCatalogDocument {
    let start_time = Instant::now();
    let max = config.max_students.max(config.min_students);

    let courses: Vec<CourseWithRoster> = sample_catalog()
        .courses
        .into_par_iter()
        .map(|mut entry| {
            let size = (config.min_students..=max).fake::<u32>();
            entry.students = generate_roster(entry.course.id, size);
            entry.course.student_count = size;
            entry
        })
        .collect();

    let total: u32 = courses.iter().map(|c| c.course.student_count).sum();
    println!(
        "   ✓ Generated {} courses with {} students in {:?}",
        courses.len(),
        total,
        start_time.elapsed()
    );

    CourseCatalogDocument { courses }
}
