mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::setup_test_app;

#[tokio::test]
async fn test_school_day_dashboard() {
    let app = setup_test_app().await;
    let token = app.login().await;

    // 2024-11-04 is a Monday
    app.request(
        "POST",
        "/api/schedule/slots",
        Some(&token),
        Some(json!({ "day": "monday", "startTime": "10:00", "courseId": 3, "durationHours": 2 })),
    )
    .await;
    app.request(
        "POST",
        "/api/schedule/slots",
        Some(&token),
        Some(json!({ "day": "monday", "startTime": "08:00", "courseId": 1, "durationHours": 1 })),
    )
    .await;

    let (status, dashboard) = app.get("/api/dashboard?date=2024-11-04", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["todayKind"], "school");
    assert!(dashboard["todayHoliday"].is_null());
    assert_eq!(dashboard["currentSemester"], "fall");

    let classes = dashboard["todayClasses"].as_array().unwrap();
    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0]["startTime"], "08:00");
    assert_eq!(classes[1]["course"]["code"], "BIL201");
    assert_eq!(classes[1]["endTime"], "12:00");

    assert_eq!(dashboard["stats"]["courseCount"], 5);
    assert_eq!(dashboard["stats"]["sessionsRecorded"], 0);
    assert!(dashboard["stats"]["attendanceRate"].is_null());

    let holidays = dashboard["upcomingHolidays"].as_array().unwrap();
    assert_eq!(holidays.len(), 3);
    assert_eq!(holidays[0]["date"], "2024-11-10");
    let exams = dashboard["upcomingExamPeriods"].as_array().unwrap();
    assert_eq!(exams.len(), 2);
    assert_eq!(exams[0]["name"], "Güz Ara Sınavları");
}

#[tokio::test]
async fn test_holiday_dashboard() {
    let app = setup_test_app().await;
    let token = app.login().await;

    let (status, dashboard) = app.get("/api/dashboard?date=2024-10-29", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["todayKind"], "holiday");
    assert_eq!(dashboard["todayHoliday"], "Cumhuriyet Bayramı");
}

#[tokio::test]
async fn test_stats_follow_attendance() {
    let app = setup_test_app().await;
    let token = app.login().await;

    app.request(
        "PUT",
        "/api/courses/1/attendance/2024-11-04",
        Some(&token),
        Some(json!({ "records": [
            { "studentId": 1001, "status": "present" },
            { "studentId": 1002, "status": "absent" }
        ] })),
    )
    .await;

    let (_, dashboard) = app.get("/api/dashboard?date=2024-11-09", &token).await;
    assert_eq!(dashboard["todayKind"], "weekend");
    assert!(dashboard["todayClasses"].as_array().unwrap().is_empty());
    assert_eq!(dashboard["stats"]["sessionsRecorded"], 1);
    assert_eq!(dashboard["stats"]["attendanceRate"], 50.0);
}

#[tokio::test]
async fn test_requires_auth() {
    let app = setup_test_app().await;
    let (status, _) = app.request("GET", "/api/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
