use std::sync::Arc;

use anyhow::anyhow;
use tracing::{info, instrument};

use yoklama_core::storage::JsonStoreExt;
use yoklama_core::{AppError, KeyValueStore, paginate};
use yoklama_models::ids::CourseId;

use super::model::{
    Course, CourseCatalogDocument, CourseFilterParams, CourseWithRoster, PaginatedCoursesResponse,
    Student, sample_catalog,
};

/// Read-only course catalog with rosters.
#[derive(Clone)]
pub struct CourseService {
    catalog: Arc<Vec<CourseWithRoster>>,
}

impl CourseService {
    pub fn new(catalog: CourseCatalogDocument) -> Self {
        Self {
            catalog: Arc::new(catalog.courses),
        }
    }

    /// Loads the catalog stored under `key`, or the built-in sample set when
    /// the key is absent.
    pub async fn init(store: Arc<dyn KeyValueStore>, key: &str) -> Result<Self, AppError> {
        let catalog = match store.get_json::<CourseCatalogDocument>(key).await? {
            Some(catalog) => {
                info!(courses = catalog.courses.len(), "Loaded course catalog");
                catalog
            }
            None => {
                info!("No stored course catalog, using sample courses");
                sample_catalog()
            }
        };
        Ok(Self::new(catalog))
    }

    #[instrument(skip(self))]
    pub fn list(&self, filters: &CourseFilterParams) -> PaginatedCoursesResponse {
        let needle = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let matching: Vec<Course> = self
            .catalog
            .iter()
            .map(|entry| &entry.course)
            .filter(|course| match &needle {
                Some(needle) => {
                    course.code.to_lowercase().contains(needle)
                        || course.name.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();

        let (data, meta) = paginate(matching, &filters.pagination);
        PaginatedCoursesResponse { data, meta }
    }

    pub fn all(&self) -> Vec<Course> {
        self.catalog.iter().map(|entry| entry.course.clone()).collect()
    }

    pub fn entries(&self) -> &[CourseWithRoster] {
        &self.catalog
    }

    pub fn find(&self, id: CourseId) -> Option<&CourseWithRoster> {
        self.catalog.iter().find(|entry| entry.course.id == id)
    }

    pub fn get(&self, id: CourseId) -> Result<Course, AppError> {
        self.find(id)
            .map(|entry| entry.course.clone())
            .ok_or_else(|| Self::not_found(id))
    }

    pub fn roster(&self, id: CourseId) -> Result<Vec<Student>, AppError> {
        self.find(id)
            .map(|entry| entry.students.clone())
            .ok_or_else(|| Self::not_found(id))
    }

    pub fn total_students(&self) -> u32 {
        self.catalog.iter().map(|entry| entry.course.student_count).sum()
    }

    fn not_found(id: CourseId) -> AppError {
        AppError::not_found(anyhow!("Ders bulunamadı: {}", id))
    }
}
