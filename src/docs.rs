use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::attendance::model::{
    AttendanceHistory, AttendanceRecord, AttendanceSession, AttendanceStatus, RecordAttendanceDto,
    SessionSummary,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, VerifyResponse,
};
use crate::modules::calendar::model::{DayCell, DayInfo, DayKind, MonthGrid};
use crate::modules::courses::model::{Course, PaginatedCoursesResponse, Student};
use crate::modules::dashboard::model::{DashboardResponse, DashboardStats};
use crate::modules::reports::model::{
    AbsenteeRow, CourseAttendanceRow, CreateReportDto, Report, ReportJob, ReportKind, ReportStatus,
};
use crate::modules::schedule::model::{
    CreateSlotDto, GridCell, GridRow, ScheduleGrid, ScheduleGridResponse, ScheduleSlot, SchoolDay,
    TodayClass,
};
use crate::modules::settings::model::{
    AcademicSettings, CreateExamPeriodDto, CreateHolidayDto, ExamPeriod, Holiday, HolidayType,
    Semester, SemesterDates, SettingsResponse, UpdateSettingsDto,
};
use crate::modules::users::model::{ChangePasswordDto, UpdateProfileDto, UserProfile};
use yoklama_core::pagination::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::verify_session,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me,
        crate::modules::users::controller::change_password,
        crate::modules::settings::controller::get_settings,
        crate::modules::settings::controller::update_settings,
        crate::modules::settings::controller::save_settings,
        crate::modules::settings::controller::load_settings,
        crate::modules::settings::controller::reset_settings,
        crate::modules::settings::controller::add_holiday,
        crate::modules::settings::controller::remove_holiday,
        crate::modules::settings::controller::add_exam_period,
        crate::modules::settings::controller::remove_exam_period,
        crate::modules::calendar::controller::get_month,
        crate::modules::calendar::controller::get_day,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::get_course_students,
        crate::modules::attendance::controller::record_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::get_attendance_history,
        crate::modules::schedule::controller::get_slots,
        crate::modules::schedule::controller::get_grid,
        crate::modules::schedule::controller::add_slot,
        crate::modules::schedule::controller::remove_slot,
        crate::modules::schedule::controller::get_today,
        crate::modules::reports::controller::create_report,
        crate::modules::reports::controller::list_reports,
        crate::modules::reports::controller::get_report,
        crate::modules::reports::controller::delete_report,
        crate::modules::dashboard::controller::get_dashboard,
    ),
    components(
        schemas(
            ErrorResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            VerifyResponse,
            MessageResponse,
            UserProfile,
            UpdateProfileDto,
            ChangePasswordDto,
            AcademicSettings,
            SettingsResponse,
            UpdateSettingsDto,
            SemesterDates,
            Semester,
            Holiday,
            HolidayType,
            CreateHolidayDto,
            ExamPeriod,
            CreateExamPeriodDto,
            MonthGrid,
            DayCell,
            DayKind,
            DayInfo,
            Course,
            Student,
            PaginatedCoursesResponse,
            PaginationMeta,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceSession,
            RecordAttendanceDto,
            SessionSummary,
            AttendanceHistory,
            SchoolDay,
            ScheduleSlot,
            CreateSlotDto,
            GridCell,
            GridRow,
            ScheduleGrid,
            ScheduleGridResponse,
            TodayClass,
            ReportKind,
            ReportStatus,
            CreateReportDto,
            CourseAttendanceRow,
            AbsenteeRow,
            Report,
            ReportJob,
            DashboardStats,
            DashboardResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Demo login, registration and session checks"),
        (name = "Users", description = "Profile of the signed-in teacher"),
        (name = "Settings", description = "Academic year, semesters, holidays and exam periods"),
        (name = "Calendar", description = "Month grid and day classification"),
        (name = "Courses", description = "Course catalog and rosters"),
        (name = "Attendance", description = "Attendance sessions per course and date"),
        (name = "Schedule", description = "Weekly teaching schedule"),
        (name = "Reports", description = "Background attendance reports"),
        (name = "Dashboard", description = "Landing page summary")
    ),
    info(
        title = "Yoklama API",
        version = "0.1.0",
        description = "Attendance tracking for university teachers: academic calendar, weekly schedule, attendance sessions and reports.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
