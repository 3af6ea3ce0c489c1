mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use income_core::{app::AppState, errors::AppError};
use tally_core::{FixedClock, GoalStatus, MemoryStore};
use tally_domain::ViewMode;

use common::reference_now;

fn memory_state() -> AppState<FixedClock<Utc>> {
    AppState::load(Box::new(MemoryStore::new()), FixedClock::new(reference_now()))
        .with_bcrypt_cost(4)
}

fn deadline(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn week_dashboard_buckets_by_weekday() {
    let mut app = memory_state().with_view_mode(ViewMode::Week);
    app.register("Ana Souza", "ana@example.com", "secret").unwrap();

    app.clock_mut()
        .set(Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap());
    app.add_transaction("Design work", 120.0).unwrap();
    app.clock_mut()
        .set(Utc.with_ymd_and_hms(2025, 6, 19, 10, 0, 0).unwrap());
    app.add_transaction("Tips", 30.0).unwrap();

    let dashboard = app.dashboard();
    let totals: Vec<f64> = dashboard
        .aggregate
        .buckets
        .iter()
        .map(|bucket| bucket.total)
        .collect();

    assert_eq!(totals, vec![0.0, 120.0, 0.0, 0.0, 30.0, 0.0, 0.0]);
    assert_eq!(dashboard.aggregate.total, 150.0);
    assert_eq!(dashboard.aggregate.buckets[1].label, "Mon");
}

#[test]
fn switching_view_mode_changes_window_total() {
    let mut app = memory_state();
    let entries = [
        (Utc.with_ymd_and_hms(2025, 6, 17, 8, 0, 0).unwrap(), 10.0),
        (Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap(), 40.0),
        (Utc.with_ymd_and_hms(2025, 2, 11, 8, 0, 0).unwrap(), 100.0),
    ];
    for (at, amount) in entries {
        app.clock_mut().set(at);
        app.add_transaction("Income", amount).unwrap();
    }
    app.clock_mut().set(reference_now());

    let mut totals = Vec::new();
    for mode in ViewMode::ALL {
        app.set_view_mode(mode);
        totals.push(app.dashboard().aggregate.total);
    }

    assert_eq!(totals, vec![10.0, 50.0, 150.0]);
    assert_eq!(app.total_income(), 150.0);
}

#[test]
fn goal_progress_reports_percent_and_overdue() {
    let mut app = memory_state();
    app.add_transaction("Contract", 750.0).unwrap();
    app.set_goal(5000.0, deadline(2025, 12, 31)).unwrap();

    let summary = app.dashboard().goal.unwrap();
    assert!((summary.progress.percent - 15.0).abs() < 1e-9);
    assert_eq!(summary.progress.remaining, 4250.0);
    assert_eq!(summary.status(), GoalStatus::InProgress);

    app.clock_mut()
        .set(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 1).unwrap());
    let summary = app.dashboard().goal.unwrap();
    assert!(summary.progress.expired);
    assert_eq!(summary.status(), GoalStatus::Overdue);
}

#[test]
fn reached_goal_is_not_overdue() {
    let mut app = memory_state();
    app.add_transaction("Bonus", 1200.0).unwrap();
    app.set_goal(1000.0, deadline(2025, 6, 30)).unwrap();
    app.clock_mut()
        .set(Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap());

    let summary = app.dashboard().goal.unwrap();

    assert_eq!(summary.progress.percent, 100.0);
    assert_eq!(summary.progress.remaining, 0.0);
    assert_eq!(summary.status(), GoalStatus::Reached);
}

#[test]
fn invalid_input_leaves_state_untouched() {
    let mut app = memory_state();
    app.set_goal(800.0, deadline(2025, 12, 31)).unwrap();

    let err = app.add_transaction("   ", 10.0).unwrap_err();
    assert!(err.is_validation());
    assert!(app.add_transaction("Refund", -5.0).is_err());
    assert!(app.set_goal(0.0, deadline(2025, 12, 31)).is_err());
    assert!(app.set_goal_from_input(100.0, "31/12/2025").is_err());
    assert!(app
        .set_goal(100.0, deadline(2025, 6, 18))
        .unwrap_err()
        .is_validation());
    assert!(app.set_goal_from_input(100.0, "2025-06-19").is_ok());
    app.set_goal(800.0, deadline(2025, 12, 31)).unwrap();

    assert!(app.transactions().is_empty());
    assert_eq!(app.goal().map(|goal| goal.amount), Some(800.0));
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let mut app = memory_state();
    let kept = app.add_transaction("Salary", 3000.0).unwrap();

    assert!(!app.delete_transaction(uuid::Uuid::new_v4()));
    assert_eq!(app.transactions().len(), 1);

    assert!(app.delete_transaction(kept.id));
    assert!(app.transactions().is_empty());
}

#[test]
fn login_checks_password_and_profile_edit_requires_session() {
    let mut app = memory_state();
    app.register("Ana Souza", "ana@example.com", "secret").unwrap();
    app.logout();

    assert!(app.login("ana@example.com", "wrong").is_err());
    assert!(matches!(
        app.update_profile(&Default::default()),
        Err(AppError::NotLoggedIn)
    ));

    let profile = app.login("ana@example.com", "secret").unwrap();
    assert_eq!(profile.first_name(), "Ana");
    assert!(app.register("Other", "ana@example.com", "pw").is_err());
}
