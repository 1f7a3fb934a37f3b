use chrono_tz::Tz;
use coop_reminders_domain::{format_timestamp, ReminderKind, ReminderRecord};
use coop_reminders_infra::{EmailMessage, PushMessage};
use std::collections::HashMap;
use url::Url;

/// How long before the deadline a reminder of `kind` goes out, e.g.
/// `30 minutes` or `2 days`
fn lead_time(kind: ReminderKind, reminder_days: Option<f64>) -> String {
    match (kind, reminder_days) {
        (ReminderKind::Custom, Some(days)) => {
            let days_str = if days.fract() == 0.0 {
                format!("{}", days as i64)
            } else {
                format!("{}", days)
            };
            if (days - 1.0).abs() < f64::EPSILON {
                format!("{} day", days_str)
            } else {
                format!("{} days", days_str)
            }
        }
        _ => "30 minutes".to_string(),
    }
}

/// Only http(s) links are put into emails
fn meeting_link(link: Option<&str>) -> Option<Url> {
    let url = Url::parse(link?.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

fn subject(record: &ReminderRecord, lead_time: &str) -> String {
    match *record {
        ReminderRecord::Task(task) => {
            format!("Reminder: \"{}\" is due in {}", task.title, lead_time)
        }
        ReminderRecord::AdminMeeting(m) => format!("Meeting reminder: {}", m.title),
        ReminderRecord::EmployeeMeeting(m) => format!("Meeting reminder: {}", m.title),
    }
}

pub fn reminder_email(
    record: &ReminderRecord,
    kind: ReminderKind,
    deadline: i64,
    recipient: &str,
    tz: &Tz,
) -> EmailMessage {
    let lead_time = lead_time(kind, record.reminder_days());
    let when = format_timestamp(deadline, tz);

    let body = match *record {
        ReminderRecord::Task(task) => {
            let mut body = format!("Hi,\n\nyour task \"{}\" is due in {}.\n", task.title, lead_time);
            if !task.description.trim().is_empty() {
                body.push_str(&format!("\n{}\n", task.description.trim()));
            }
            body.push_str(&format!("\nDeadline: {}\n", when));
            body
        }
        ReminderRecord::AdminMeeting(m) => format!(
            "Hi,\n\nthe meeting \"{}\" starts in {}.\n\nDate: {}\nTime: {}\n",
            m.title, lead_time, m.date, m.reminder_time
        ),
        ReminderRecord::EmployeeMeeting(m) => {
            let mut body = format!(
                "Hi,\n\nthe meeting \"{}\" starts in {}.\n\nStart: {}\n",
                m.title, lead_time, when
            );
            if let Some(link) = meeting_link(m.link.as_deref()) {
                body.push_str(&format!("Join: {}\n", link));
            }
            body
        }
    };

    EmailMessage {
        to: recipient.to_string(),
        subject: subject(record, &lead_time),
        body,
    }
}

pub fn reminder_push(
    record: &ReminderRecord,
    kind: ReminderKind,
    deadline: i64,
    token: &str,
    tz: &Tz,
) -> PushMessage {
    let lead_time = lead_time(kind, record.reminder_days());
    let body = match *record {
        ReminderRecord::Task(_) => format!("Due {} (in {})", format_timestamp(deadline, tz), lead_time),
        _ => format!("Starts {} (in {})", format_timestamp(deadline, tz), lead_time),
    };

    let mut data = HashMap::new();
    data.insert("recordId".to_string(), record.id().as_string());
    data.insert("recordType".to_string(), record.kind_name().to_string());
    data.insert("reminder".to_string(), kind.flag_field().to_string());

    PushMessage {
        token: token.to_string(),
        title: subject(record, &lead_time),
        body,
        data,
    }
}
