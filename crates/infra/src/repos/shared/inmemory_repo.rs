use coop_reminders_domain::{Entity, ReminderFlags, ReminderKind, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

pub fn find_all<T: Clone>(collection: &Mutex<Vec<T>>) -> Vec<T> {
    find_by(collection, |_| true)
}

/// Runs `update` on the first entity with the given id matching `compare`.
/// Returns what `update` returned, or false if nothing matched.
pub fn update_one<T: Entity, F: Fn(&T) -> bool, U: FnOnce(&mut T) -> bool>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> bool {
    let mut collection = collection.lock().unwrap();
    match collection
        .iter_mut()
        .find(|item| item.id() == val_id && compare(item))
    {
        Some(item) => update(item),
        None => false,
    }
}

/// Compare-and-set of a reminder flag, done under the collection lock
pub fn claim_flag(flags: &mut ReminderFlags, kind: ReminderKind) -> bool {
    if flags.is_sent(kind) {
        return false;
    }
    flags.set(kind, true);
    true
}

pub fn release_flag(flags: &mut ReminderFlags, kind: ReminderKind) -> bool {
    flags.set(kind, false);
    true
}
