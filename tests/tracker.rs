//! High-level tracker tests against a mock backend.

use budgetkit::analytics::ReportOptions;
use budgetkit::error::BudgetError;
use budgetkit::filter::TransactionFilter;
use budgetkit::models::{Category, GoalId, NaiveDate, TransactionId, UserId};
use budgetkit::tracker::{BudgetTracker, ExpenseEntry, IncomeEntry};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMAIL: &str = "oliver@example.com";

fn tracker_for(server: &MockServer) -> BudgetTracker {
    BudgetTracker::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn march_user() -> serde_json::Value {
    json!({
        "user_id": 0,
        "email": EMAIL,
        "currentBalance": 1000,
        "totalMonthlyBudget": 3000,
        "savingsGoal": 10000,
        "purchases": [
            {"purchaseId": 0, "name": "Grocery Shopping", "purchaseCategory": "Food",
             "purchaseCost": -85.5, "purchaseDate": "2024-03-05T10:00:00"},
            {"purchaseId": 1, "name": "Salary", "purchaseCategory": "",
             "purchaseCost": 3000, "purchaseDate": "2024-03-01T09:00:00"},
            {"purchaseId": 2, "name": "Movie Tickets", "purchaseCategory": "Entertainment",
             "purchaseCost": -15.99, "purchaseDate": "2024-03-10T20:00:00"},
            {"purchaseId": 3, "name": "Rent", "purchaseCategory": "Bills",
             "purchaseCost": -1200, "purchaseDate": "2024-02-01T09:00:00"}
        ],
        "financialGoals": []
    })
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

async fn mount_user_lookup(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/users/email/{EMAIL}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(march_user()))
        .mount(server)
        .await;
}

async fn mount_purchase_write(server: &MockServer, expected_calls: u64) {
    Mock::given(method("PATCH"))
        .and(path("/api/data/purchase/0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Purchase recorded successfully"})),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn report_for_user_matches_march_figures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(march_user()))
        .mount(&server)
        .await;

    let report = tracker_for(&server)
        .report_for_user(UserId::new(0), march(31), &ReportOptions::default())
        .await
        .unwrap();

    assert!((report.total_spent_this_month - 101.49).abs() < 1e-9);
    assert!((report.remaining_budget - 2898.51).abs() < 1e-9);
    assert!((report.category_totals.get(Category::Food) - 85.5).abs() < 1e-9);
    assert!((report.income_this_month - 3000.0).abs() < 1e-9);
    assert!((report.savings_progress_pct - 10.0).abs() < 1e-9);
    assert_eq!(report.monthly_series.len(), 4);
    assert!((report.monthly_series[2].amount - 1200.0).abs() < 1e-9);
}

#[tokio::test]
async fn report_for_email_rejects_empty_window() {
    let server = MockServer::start().await;
    mount_user_lookup(&server).await;

    let options = ReportOptions {
        monthly_series_window: 0,
    };
    let err = tracker_for(&server)
        .report_for_email(EMAIL, march(31), &options)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::InvalidArgument(_)));
}

#[tokio::test]
async fn history_filters_and_orders_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data/purchase/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(march_user()["purchases"].clone()))
        .mount(&server)
        .await;

    let history = tracker_for(&server)
        .history(UserId::new(0), &TransactionFilter::new().expenses_only())
        .await
        .unwrap();
    let ids: Vec<_> = history.iter().filter_map(|tx| tx.id).collect();
    assert_eq!(
        ids,
        vec![TransactionId::new(2), TransactionId::new(0), TransactionId::new(3)]
    );
}

#[tokio::test]
async fn goal_progress_counts_linked_income() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/0/goals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "goals": [{"goalId": 1, "title": "Trip", "targetAmount": 1000, "currentAmount": 400}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/data/purchase/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"purchaseId": 0, "name": "Bonus", "purchaseCategory": "",
             "purchaseCost": 150, "purchaseDate": "2024-03-01T09:00:00", "goalId": 1},
            {"purchaseId": 1, "name": "Gift", "purchaseCategory": "",
             "purchaseCost": 50, "purchaseDate": "2024-03-02T09:00:00", "goalId": 1}
        ])))
        .mount(&server)
        .await;

    let progress = tracker_for(&server)
        .goal_progress(UserId::new(0))
        .await
        .unwrap();
    assert_eq!(progress.len(), 1);
    assert!((progress[0].linked_income - 200.0).abs() < 1e-9);
    assert!((progress[0].percentage - 40.0).abs() < 1e-9);
}

#[tokio::test]
async fn record_expense_posts_negative_purchase() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/data/purchase/0"))
        .and(body_partial_json(json!({
            "name": "Transaction",
            "purchaseCategory": "Transport",
            "purchaseCost": -40.0
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Purchase recorded successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let entry = ExpenseEntry::new(
        40.0,
        Category::Transport,
        march(12).and_hms_opt(8, 0, 0).unwrap(),
    );
    let response = tracker_for(&server)
        .record_expense(UserId::new(0), &entry)
        .await
        .unwrap();
    assert_eq!(
        response.message.as_deref(),
        Some("Purchase recorded successfully")
    );
}

#[tokio::test]
async fn delete_purchase_forwards_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/data/purchase/0"))
        .and(body_json(json!({"purchaseId": 2})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Purchase deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = tracker_for(&server)
        .delete_purchase(UserId::new(0), TransactionId::new(2))
        .await
        .unwrap();
    assert_eq!(
        response.message.as_deref(),
        Some("Purchase deleted successfully")
    );
}

#[tokio::test]
async fn record_income_updates_goal_and_balance() {
    let server = MockServer::start().await;
    mount_user_lookup(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/api/data/purchase/0"))
        .and(body_partial_json(json!({
            "name": "Freelance",
            "purchaseCategory": "",
            "purchaseCost": 100.0,
            "goalId": 1
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Purchase recorded successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/0/goals/1"))
        .and(body_json(json!({"amountToAdd": 100.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Goal updated",
            "goal": {"goalId": 1, "title": "Trip", "targetAmount": 1000, "currentAmount": 500}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/users/email/{EMAIL}")))
        .and(body_json(json!({"currentBalance": 1100.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let entry = IncomeEntry::new(100.0, march(15).and_hms_opt(9, 0, 0).unwrap())
        .with_note("Freelance")
        .with_goal(GoalId::new(1));
    let receipt = tracker_for(&server)
        .record_income(EMAIL, &entry)
        .await
        .unwrap();

    assert_eq!(receipt.user_id, UserId::new(0));
    assert!((receipt.new_balance - 1100.0).abs() < 1e-9);
    assert_eq!(receipt.goal.map(|goal| goal.title), Some("Trip".to_owned()));
}

#[tokio::test]
async fn record_income_reports_failed_goal_update() {
    let server = MockServer::start().await;
    mount_user_lookup(&server).await;
    mount_purchase_write(&server, 1).await;
    Mock::given(method("PATCH"))
        .and(path("/users/0/goals/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Goal not found"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("/users/email/{EMAIL}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(0)
        .mount(&server)
        .await;

    let entry =
        IncomeEntry::new(100.0, march(15).and_hms_opt(9, 0, 0).unwrap()).with_goal(GoalId::new(9));
    let err = tracker_for(&server)
        .record_income(EMAIL, &entry)
        .await
        .unwrap_err();

    match err {
        BudgetError::PartialWrite {
            completed,
            failed,
            source,
        } => {
            assert_eq!(completed, "record purchase");
            assert_eq!(failed, "update goal");
            assert!(matches!(*source, BudgetError::Api { status: 404, .. }));
        }
        other => panic!("expected PartialWrite, got {other:?}"),
    }
}

#[tokio::test]
async fn record_income_reports_failed_balance_update() {
    let server = MockServer::start().await;
    mount_user_lookup(&server).await;
    mount_purchase_write(&server, 1).await;
    Mock::given(method("PATCH"))
        .and(path(format!("/users/email/{EMAIL}")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let entry = IncomeEntry::new(50.0, march(15).and_hms_opt(9, 0, 0).unwrap());
    let err = tracker_for(&server)
        .record_income(EMAIL, &entry)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BudgetError::PartialWrite {
            completed: "record purchase",
            failed: "update balance",
            ..
        }
    ));
}

#[tokio::test]
async fn record_income_unknown_user_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/email/nobody@example.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "User not found"})))
        .mount(&server)
        .await;
    mount_purchase_write(&server, 0).await;

    let entry = IncomeEntry::new(50.0, march(15).and_hms_opt(9, 0, 0).unwrap());
    let err = tracker_for(&server)
        .record_income("nobody@example.com", &entry)
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::Api { status: 404, .. }));
}
