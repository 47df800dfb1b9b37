//! Report jobs.
//!
//! Each job runs as a spawned task that waits for the configured delay and
//! then aggregates the recorded attendance. The task's abort handle is kept
//! with the job so that cancelling a job stops its task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tracing::{info, instrument, warn};

use yoklama_core::AppError;
use yoklama_models::attendance::{AttendanceSession, AttendanceStatus};
use yoklama_models::courses::CourseWithRoster;
use yoklama_models::ids::{ReportId, UserId};

use crate::metrics::{track_report_duration, track_report_job};
use crate::modules::attendance::service::{AttendanceService, attendance_rate};
use crate::modules::courses::service::CourseService;

use super::model::{
    AbsenteeRow, CourseAttendanceRow, CreateReportDto, Report, ReportJob, ReportKind,
    ReportStatus,
};

/// Absence percentage used when an absentee list request omits a threshold.
pub const DEFAULT_ABSENCE_THRESHOLD: f64 = 20.0;

struct JobEntry {
    owner: UserId,
    job: ReportJob,
    abort: Option<AbortHandle>,
}

#[derive(Clone)]
pub struct ReportService {
    delay: Duration,
    jobs: Arc<RwLock<HashMap<ReportId, JobEntry>>>,
}

impl ReportService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Queues a report and starts its task.
    #[instrument(skip(self, attendance, courses))]
    pub async fn create(
        &self,
        owner: UserId,
        request: CreateReportDto,
        attendance: AttendanceService,
        courses: CourseService,
    ) -> Result<ReportJob, AppError> {
        if request.from > request.to {
            return Err(AppError::bad_request(anyhow!(
                "Başlangıç tarihi bitiş tarihinden sonra olamaz"
            )));
        }
        if let Some(course_id) = request.course_id {
            courses.get(course_id)?;
        }

        let job = ReportJob {
            id: ReportId::new(),
            status: ReportStatus::Pending,
            request,
            result: None,
            error: None,
            created_at: Utc::now(),
            finished_at: None,
        };
        let id = job.id;

        self.jobs.write().await.insert(
            id,
            JobEntry {
                owner,
                job: job.clone(),
                abort: None,
            },
        );

        let service = self.clone();
        let handle = tokio::spawn(async move {
            service.run(id, attendance, courses).await;
        });

        if let Some(entry) = self.jobs.write().await.get_mut(&id)
            && !entry.job.status.is_finished()
        {
            entry.abort = Some(handle.abort_handle());
        }

        info!(report_id = %id, "Report job queued");
        track_report_job("queued");
        Ok(job)
    }

    async fn run(&self, id: ReportId, attendance: AttendanceService, courses: CourseService) {
        let started = Instant::now();
        let request = {
            let mut jobs = self.jobs.write().await;
            let Some(entry) = jobs.get_mut(&id) else {
                return;
            };
            entry.job.status = ReportStatus::Running;
            entry.job.request.clone()
        };

        tokio::time::sleep(self.delay).await;

        let sessions = attendance
            .sessions_between(request.course_id, request.from, request.to)
            .await;
        let outcome = generate(&request, &sessions, courses.entries());

        let mut jobs = self.jobs.write().await;
        let Some(entry) = jobs.get_mut(&id) else {
            return;
        };
        if entry.job.status.is_finished() {
            return;
        }
        match outcome {
            Ok(report) => {
                entry.job.status = ReportStatus::Completed;
                entry.job.result = Some(report);
                track_report_job("completed");
            }
            Err(message) => {
                warn!(report_id = %id, error = %message, "Report generation failed");
                entry.job.status = ReportStatus::Failed;
                entry.job.error = Some(message);
                track_report_job("failed");
            }
        }
        entry.job.finished_at = Some(Utc::now());
        entry.abort = None;
        track_report_duration(started.elapsed());
    }

    /// The owner's jobs, newest first.
    pub async fn list(&self, owner: UserId) -> Vec<ReportJob> {
        let jobs = self.jobs.read().await;
        let mut owned: Vec<ReportJob> = jobs
            .values()
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.job.clone())
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned
    }

    pub async fn get(&self, owner: UserId, id: ReportId) -> Result<ReportJob, AppError> {
        let jobs = self.jobs.read().await;
        jobs.get(&id)
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.job.clone())
            .ok_or_else(report_not_found)
    }

    /// Cancels a pending or running job, which stays listed as `cancelled`.
    /// A finished job is removed from the registry instead.
    #[instrument(skip(self))]
    pub async fn delete(&self, owner: UserId, id: ReportId) -> Result<ReportJob, AppError> {
        let mut jobs = self.jobs.write().await;
        let entry = jobs
            .get_mut(&id)
            .filter(|entry| entry.owner == owner)
            .ok_or_else(report_not_found)?;

        if entry.job.status.is_finished() {
            let removed = jobs.remove(&id).ok_or_else(report_not_found)?;
            info!(report_id = %id, "Report job removed");
            return Ok(removed.job);
        }

        if let Some(abort) = entry.abort.take() {
            abort.abort();
        }
        entry.job.status = ReportStatus::Cancelled;
        entry.job.finished_at = Some(Utc::now());
        info!(report_id = %id, "Report job cancelled");
        track_report_job("cancelled");
        Ok(entry.job.clone())
    }
}

fn report_not_found() -> AppError {
    AppError::not_found(anyhow!("Rapor bulunamadı"))
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / whole as f64).round() / 10.0
}

/// Aggregates `sessions` (already limited to the requested range) into a
/// report.
pub fn generate(
    request: &CreateReportDto,
    sessions: &[AttendanceSession],
    catalog: &[CourseWithRoster],
) -> Result<Report, String> {
    let courses: Vec<&CourseWithRoster> = catalog
        .iter()
        .filter(|entry| request.course_id.is_none_or(|id| entry.course.id == id))
        .collect();
    if courses.is_empty() {
        return Err("Rapor için ders bulunamadı".to_string());
    }

    let report = match request.kind {
        ReportKind::AttendanceSummary => Report::AttendanceSummary {
            rows: courses
                .iter()
                .map(|entry| {
                    let course_sessions: Vec<&AttendanceSession> = sessions
                        .iter()
                        .filter(|s| s.course_id == entry.course.id)
                        .collect();
                    let count = |status| course_sessions.iter().map(|s| s.count(status)).sum();
                    CourseAttendanceRow {
                        course_id: entry.course.id,
                        course_code: entry.course.code.clone(),
                        sessions: course_sessions.len(),
                        present: count(AttendanceStatus::Present),
                        absent: count(AttendanceStatus::Absent),
                        late: count(AttendanceStatus::Late),
                        excused: count(AttendanceStatus::Excused),
                        attendance_rate: attendance_rate(course_sessions.iter().copied()),
                    }
                })
                .collect(),
        },
        ReportKind::AbsenteeList => {
            let threshold = request.threshold.unwrap_or(DEFAULT_ABSENCE_THRESHOLD);
            let mut rows: Vec<AbsenteeRow> = courses
                .iter()
                .flat_map(|entry| {
                    let course_sessions: Vec<&AttendanceSession> = sessions
                        .iter()
                        .filter(|s| s.course_id == entry.course.id)
                        .collect();
                    entry.students.iter().filter_map(move |student| {
                        let statuses: Vec<AttendanceStatus> = course_sessions
                            .iter()
                            .filter_map(|s| {
                                s.records
                                    .iter()
                                    .find(|r| r.student_id == student.id)
                                    .map(|r| r.status)
                            })
                            .collect();
                        let absences = statuses
                            .iter()
                            .filter(|s| **s == AttendanceStatus::Absent)
                            .count();
                        let rate = percentage(absences, statuses.len());
                        (!statuses.is_empty() && rate >= threshold).then(|| AbsenteeRow {
                            course_id: entry.course.id,
                            course_code: entry.course.code.clone(),
                            student_id: student.id,
                            student_name: student.full_name(),
                            absences,
                            sessions: statuses.len(),
                            absence_rate: rate,
                        })
                    })
                })
                .collect();
            rows.sort_by(|a, b| b.absence_rate.total_cmp(&a.absence_rate));
            Report::AbsenteeList { rows }
        }
    };
    Ok(report)
}
