mod helpers;

use coop_reminders_api::CRON_SECRET_HEADER;
use coop_reminders_api_structs::{dispatch_reminders, get_service_health};
use coop_reminders_domain::{
    AdminMeeting, Participant, Task, TaskCollection, User, MINUTE_MILLIS,
};
use helpers::setup::{spawn_app, TestApp, CRON_SECRET};

const DEADLINE: i64 = 1_748_768_400_000; // 2025-06-01T09:00:00Z

async fn dispatch(app: &TestApp, secret: Option<&str>) -> reqwest::Response {
    let client = reqwest::Client::new();
    let mut req = client.post(format!("{}/reminders/dispatch", app.address));
    if let Some(secret) = secret {
        req = req.header(CRON_SECRET_HEADER, secret);
    }
    req.send().await.expect("Expected the server to respond")
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let app = spawn_app(DEADLINE).await;
    let res = reqwest::get(format!("{}/", app.address))
        .await
        .expect("Expected the server to respond");
    assert!(res.status().is_success());
    let body = res.json::<get_service_health::APIResponse>().await.unwrap();
    assert!(!body.message.is_empty());
}

#[actix_web::main]
#[test]
async fn test_dispatch_requires_cron_secret() {
    let app = spawn_app(DEADLINE).await;
    assert_eq!(dispatch(&app, None).await.status().as_u16(), 401);
    assert_eq!(dispatch(&app, Some("wrong")).await.status().as_u16(), 401);
    assert!(app.mailer.sent().is_empty());
}

#[actix_web::main]
#[test]
async fn test_dispatch_sends_due_reminders_once() {
    let app = spawn_app(DEADLINE - 20 * MINUTE_MILLIS).await;

    let member = User::new(Some("member@coop.test".into()), Some("device-1".into()));
    app.ctx.repos.users.insert(&member).await.unwrap();

    let mut task = Task::new(TaskCollection::Employee, "Restock shelves", DEADLINE);
    task.assigned_to = Some(Participant {
        email: None,
        id: Some(member.id.clone()),
    });
    app.ctx.repos.tasks.insert(&task).await.unwrap();

    let mut meeting = AdminMeeting::new("Board", "2025-06-01", "09:00");
    meeting.user_id = Some(member.id.clone());
    app.ctx.repos.admin_meetings.insert(&meeting).await.unwrap();

    let res = dispatch(&app, Some(CRON_SECRET)).await;
    assert!(res.status().is_success());
    let body = res.json::<dispatch_reminders::APIResponse>().await.unwrap();
    assert_eq!(body.dispatched_at, DEADLINE - 20 * MINUTE_MILLIS);
    assert_eq!(body.summary.records_scanned, 2);
    // The meeting trigger was 10 minutes ago, outside its catch-up window
    assert_eq!(body.summary.emails_sent, 1);
    assert_eq!(body.summary.pushes_sent, 1);

    let sent = app.mailer.sent();
    assert_eq!(sent[0].to, "member@coop.test");
    assert_eq!(app.push.sent()[0].token, "device-1");

    let res = dispatch(&app, Some(CRON_SECRET)).await;
    let body = res.json::<dispatch_reminders::APIResponse>().await.unwrap();
    assert_eq!(body.summary.emails_sent, 0);
    assert_eq!(app.mailer.sent().len(), 1);
}

#[actix_web::main]
#[test]
async fn test_dispatch_response_is_camel_case() {
    let app = spawn_app(DEADLINE).await;
    let res = dispatch(&app, Some(CRON_SECRET)).await;
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["summary"]["recordsScanned"], 0);
    assert_eq!(body["summary"]["emailsSent"], 0);
    assert_eq!(body["dispatchedAt"], DEADLINE);
}
