pub const MINUTE_MILLIS: i64 = 60 * 1000;
pub const DAY_MILLIS: i64 = 24 * 60 * MINUTE_MILLIS;

/// How long before the deadline the fixed reminder fires
pub const FIXED_REMINDER_OFFSET_MILLIS: i64 = 30 * MINUTE_MILLIS;
/// How far back a meeting reminder may be caught up when the job did not
/// run exactly at the trigger instant
pub const MEETING_CATCH_UP_MILLIS: i64 = 5 * MINUTE_MILLIS;

/// The two reminders a record can get before its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    /// Fires 30 minutes before the deadline
    ThirtyMinutes,
    /// Fires a user configured number of days before the deadline
    Custom,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 2] = [ReminderKind::ThirtyMinutes, ReminderKind::Custom];

    /// Name of the persisted idempotency flag for this reminder
    pub fn flag_field(&self) -> &'static str {
        match self {
            Self::ThirtyMinutes => "reminderSent_30min",
            Self::Custom => "reminderSent_custom",
        }
    }

    /// The instant at which this reminder becomes eligible. The custom
    /// reminder only exists for a finite `reminder_days`. `None` when the
    /// instant is not representable in millis.
    pub fn trigger_instant(&self, deadline: i64, reminder_days: Option<f64>) -> Option<i64> {
        let offset = match self {
            Self::ThirtyMinutes => FIXED_REMINDER_OFFSET_MILLIS,
            Self::Custom => days_to_millis(reminder_days?)?,
        };
        deadline.checked_sub(offset)
    }
}

fn days_to_millis(days: f64) -> Option<i64> {
    let millis = (days * DAY_MILLIS as f64).round();
    // `as` saturates, so anything outside the i64 range is rejected here
    if millis.is_finite() && millis >= i64::MIN as f64 && millis < i64::MAX as f64 {
        Some(millis as i64)
    } else {
        None
    }
}

/// Idempotency flags as stored on a record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReminderFlags {
    pub sent_30min: bool,
    pub sent_custom: bool,
}

impl ReminderFlags {
    pub fn is_sent(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::ThirtyMinutes => self.sent_30min,
            ReminderKind::Custom => self.sent_custom,
        }
    }

    pub fn set(&mut self, kind: ReminderKind, sent: bool) {
        match kind {
            ReminderKind::ThirtyMinutes => self.sent_30min = sent,
            ReminderKind::Custom => self.sent_custom = sent,
        }
    }
}

/// When a passed trigger instant still counts as due
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DueWindow {
    /// Due any time after the trigger as long as the deadline has not passed.
    /// Used for tasks.
    UntilDeadline,
    /// Due only if the trigger passed at most `lookback_millis` ago.
    /// Used for meetings.
    CatchUp { lookback_millis: i64 },
}

impl DueWindow {
    pub fn meeting() -> Self {
        Self::CatchUp {
            lookback_millis: MEETING_CATCH_UP_MILLIS,
        }
    }

    pub fn is_due(&self, trigger: i64, deadline: i64, now: i64) -> bool {
        if now < trigger || now >= deadline {
            return false;
        }
        match self {
            Self::UntilDeadline => true,
            Self::CatchUp { lookback_millis } => now.saturating_sub(*lookback_millis) <= trigger,
        }
    }
}

/// The reminders that are due at `now` and have not been sent yet,
/// the fixed 30 minute reminder first.
pub fn due_reminders(
    deadline: i64,
    reminder_days: Option<f64>,
    flags: ReminderFlags,
    window: DueWindow,
    now: i64,
) -> Vec<ReminderKind> {
    ReminderKind::ALL
        .iter()
        .copied()
        .filter(|kind| !flags.is_sent(*kind))
        .filter(|kind| match kind.trigger_instant(deadline, reminder_days) {
            Some(trigger) => window.is_due(trigger, deadline, now),
            None => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEADLINE: i64 = 1_748_768_400_000; // 2025-06-01T09:00:00Z

    #[test]
    fn computes_trigger_instants() {
        assert_eq!(
            ReminderKind::ThirtyMinutes.trigger_instant(DEADLINE, None),
            Some(DEADLINE - 30 * MINUTE_MILLIS)
        );
        assert_eq!(
            ReminderKind::Custom.trigger_instant(DEADLINE, Some(2.0)),
            Some(DEADLINE - 2 * DAY_MILLIS)
        );
        assert_eq!(
            ReminderKind::Custom.trigger_instant(DEADLINE, Some(0.5)),
            Some(DEADLINE - 12 * 60 * MINUTE_MILLIS)
        );
        assert_eq!(ReminderKind::Custom.trigger_instant(DEADLINE, None), None);
        assert_eq!(
            ReminderKind::Custom.trigger_instant(DEADLINE, Some(f64::NAN)),
            None
        );
        assert_eq!(
            ReminderKind::Custom.trigger_instant(DEADLINE, Some(f64::INFINITY)),
            None
        );
    }

    #[test]
    fn unrepresentable_trigger_instants_are_skipped() {
        assert_eq!(ReminderKind::Custom.trigger_instant(DEADLINE, Some(-1e300)), None);
        assert_eq!(ReminderKind::Custom.trigger_instant(DEADLINE, Some(1e300)), None);
        assert_eq!(ReminderKind::Custom.trigger_instant(i64::MIN, Some(1.0)), None);
        assert_eq!(
            ReminderKind::ThirtyMinutes.trigger_instant(i64::MIN + 1, None),
            None
        );
        // A negative offset puts the trigger after the deadline
        assert_eq!(
            ReminderKind::Custom.trigger_instant(DEADLINE, Some(-1.0)),
            Some(DEADLINE + DAY_MILLIS)
        );

        let flags = ReminderFlags {
            sent_30min: true,
            sent_custom: false,
        };
        let now = DEADLINE - 20 * MINUTE_MILLIS;
        assert!(due_reminders(DEADLINE, Some(-1e300), flags, DueWindow::UntilDeadline, now)
            .is_empty());
        assert!(due_reminders(DEADLINE, Some(-1.0), flags, DueWindow::UntilDeadline, now)
            .is_empty());
        assert!(due_reminders(
            i64::MIN + 1,
            Some(1e300),
            ReminderFlags::default(),
            DueWindow::meeting(),
            i64::MIN + 1
        )
        .is_empty());
    }

    #[test]
    fn task_window_is_open_until_deadline() {
        let window = DueWindow::UntilDeadline;
        let trigger = DEADLINE - 30 * MINUTE_MILLIS;

        assert!(!window.is_due(trigger, DEADLINE, trigger - 1));
        assert!(window.is_due(trigger, DEADLINE, trigger));
        assert!(window.is_due(trigger, DEADLINE, DEADLINE - 1));
        assert!(!window.is_due(trigger, DEADLINE, DEADLINE));
    }

    #[test]
    fn meeting_window_only_catches_up_five_minutes() {
        let window = DueWindow::meeting();
        let trigger = DEADLINE - 2 * DAY_MILLIS;

        assert!(!window.is_due(trigger, DEADLINE, trigger - 1));
        assert!(window.is_due(trigger, DEADLINE, trigger));
        assert!(window.is_due(trigger, DEADLINE, trigger + 5 * MINUTE_MILLIS));
        assert!(!window.is_due(trigger, DEADLINE, trigger + 5 * MINUTE_MILLIS + 1));
        assert!(!window.is_due(trigger, DEADLINE, trigger + 10 * MINUTE_MILLIS));
    }

    #[test]
    fn skips_reminders_already_sent() {
        let now = DEADLINE - 20 * MINUTE_MILLIS;
        let due = due_reminders(
            DEADLINE,
            Some(1.0),
            ReminderFlags::default(),
            DueWindow::UntilDeadline,
            now,
        );
        assert_eq!(due, vec![ReminderKind::ThirtyMinutes, ReminderKind::Custom]);

        let flags = ReminderFlags {
            sent_30min: true,
            sent_custom: false,
        };
        let due = due_reminders(DEADLINE, Some(1.0), flags, DueWindow::UntilDeadline, now);
        assert_eq!(due, vec![ReminderKind::Custom]);

        let flags = ReminderFlags {
            sent_30min: true,
            sent_custom: true,
        };
        assert!(due_reminders(DEADLINE, Some(1.0), flags, DueWindow::UntilDeadline, now).is_empty());
    }

    #[test]
    fn nothing_is_due_after_the_deadline() {
        let due = due_reminders(
            DEADLINE,
            Some(1.0),
            ReminderFlags::default(),
            DueWindow::UntilDeadline,
            DEADLINE + MINUTE_MILLIS,
        );
        assert!(due.is_empty());
    }

    #[test]
    fn flag_fields_match_store_names() {
        assert_eq!(ReminderKind::ThirtyMinutes.flag_field(), "reminderSent_30min");
        assert_eq!(ReminderKind::Custom.flag_field(), "reminderSent_custom");
    }
}
