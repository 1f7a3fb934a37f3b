use crate::{
    record::ReminderRecord,
    shared::entity::ID,
    user::{Participant, UserDirectory},
};

/// Ids to look up in the `UserDirectory`, in priority order:
/// assignee, creator, then the generic owner `userId`.
fn candidate_user_ids<'a>(record: &ReminderRecord<'a>) -> Vec<&'a ID> {
    match *record {
        ReminderRecord::Task(t) => {
            let mut ids = participant_ids(&t.assigned_to, &t.created_by);
            ids.extend(t.user_id.as_ref());
            ids
        }
        ReminderRecord::AdminMeeting(m) => m.user_id.iter().collect(),
        ReminderRecord::EmployeeMeeting(m) => participant_ids(&m.assigned_to, &m.created_by),
    }
}

fn participant_ids<'a>(
    assigned: &'a Option<Participant>,
    created: &'a Option<Participant>,
) -> Vec<&'a ID> {
    vec![assigned, created]
        .into_iter()
        .filter_map(|p| p.as_ref().and_then(|p| p.id.as_ref()))
        .collect()
}

fn explicit_emails<'a>(record: &ReminderRecord<'a>) -> Vec<&'a str> {
    let (assigned, created) = match *record {
        ReminderRecord::Task(t) => (&t.assigned_to, &t.created_by),
        ReminderRecord::EmployeeMeeting(m) => (&m.assigned_to, &m.created_by),
        ReminderRecord::AdminMeeting(_) => return Vec::new(),
    };
    vec![assigned, created]
        .into_iter()
        .filter_map(|p| p.as_ref().and_then(|p| p.email()))
        .collect()
}

/// Email address a reminder for `record` should go to.
///
/// An email stored on the record wins, then the email of the first user
/// found by id in the `directory`.
pub fn resolve_recipient(record: &ReminderRecord, directory: &UserDirectory) -> Option<String> {
    if let Some(email) = explicit_emails(record).into_iter().next() {
        return Some(email.to_string());
    }

    candidate_user_ids(record)
        .into_iter()
        .filter_map(|id| directory.get(id))
        .find_map(|user| user.email())
        .map(String::from)
}

/// Device token to push a reminder for `record` to, looked up with the same
/// id priority as the recipient email
pub fn resolve_push_token(record: &ReminderRecord, directory: &UserDirectory) -> Option<String> {
    candidate_user_ids(record)
        .into_iter()
        .filter_map(|id| directory.get(id))
        .find_map(|user| user.push_token())
        .map(String::from)
}
