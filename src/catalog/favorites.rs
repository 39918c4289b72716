//! Favorites: a local, in-memory list with a simulated asynchronous add.
//!
//! There is no backend contract for writes, so adding a favorite stands in for
//! a mutation: [`commit`] waits [`SIMULATED_LATENCY`] and performs no network
//! I/O. Nothing is persisted; the list resets when the process exits.
//!
//! States: `Idle -> Adding -> Idle`. The add cannot fail. Removal is
//! immediate, with no confirmation and no undo.

use chrono::{DateTime, Local};
use std::time::Duration;

use super::card::EntityKind;

pub const SIMULATED_LATENCY: Duration = Duration::from_millis(500);

pub const EMPTY_TEXT: &str = "No favorites yet. Add some items to get started!";

#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub added_at: DateTime<Local>,
}

/// An accepted submission travelling through the simulated write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFavorite {
    pub name: String,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddState {
    Idle,
    Adding,
}

#[derive(Debug)]
pub struct Favorites {
    items: Vec<Favorite>,
    state: AddState,
    dialog_open: bool,
    draft_name: String,
    draft_kind: EntityKind,
    selected: usize,
    last_id: i64,
}

impl Default for Favorites {
    fn default() -> Self {
        Self::new()
    }
}

impl Favorites {
    /// Seeded with the two starter entries.
    pub fn new() -> Self {
        let now = Local::now();
        let seed = |id: &str, name: &str, kind| Favorite {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            added_at: now,
        };
        Self {
            items: vec![
                seed("1", "Luke Skywalker", EntityKind::Character),
                seed("2", "Millennium Falcon", EntityKind::Starship),
            ],
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            state: AddState::Idle,
            dialog_open: false,
            draft_name: String::new(),
            draft_kind: EntityKind::Character,
            selected: 0,
            last_id: 0,
        }
    }

    pub fn items(&self) -> &[Favorite] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> AddState {
        self.state
    }

    pub fn is_adding(&self) -> bool {
        self.state == AddState::Adding
    }

    // ----- dialog -----
    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    pub fn draft_kind(&self) -> EntityKind {
        self.draft_kind
    }

    pub fn push_char(&mut self, c: char) {
        self.draft_name.push(c);
    }

    pub fn backspace(&mut self) {
        self.draft_name.pop();
    }

    pub fn next_kind(&mut self) {
        self.draft_kind = self.draft_kind.next();
    }

    pub fn prev_kind(&mut self) {
        self.draft_kind = self.draft_kind.prev();
    }

    /// Submit is disabled while an add is in flight or the name is blank.
    pub fn can_submit(&self) -> bool {
        self.state == AddState::Idle && !self.draft_name.trim().is_empty()
    }

    /// Accept the draft and enter `Adding`. `None` means the submission was ignored.
    pub fn submit(&mut self) -> Option<PendingFavorite> {
        if !self.can_submit() {
            return None;
        }
        self.state = AddState::Adding;
        Some(PendingFavorite {
            name: self.draft_name.trim().to_string(),
            kind: self.draft_kind,
        })
    }

    /// Finish a simulated add: append, clear the input, close the dialog.
    pub fn complete(&mut self, pending: PendingFavorite) -> &Favorite {
        let id = self.next_id();
        self.items.push(Favorite {
            id,
            name: pending.name,
            kind: pending.kind,
            added_at: Local::now(),
        });
        self.draft_name.clear();
        self.dialog_open = false;
        self.state = AddState::Idle;
        &self.items[self.items.len() - 1]
    }

    /// Remove by id; unknown ids are a no-op. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|f| f.id != id);
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.items.len() != before
    }

    pub fn remove_selected(&mut self) -> Option<String> {
        let id = self.items.get(self.selected)?.id.clone();
        self.remove(&id);
        Some(id)
    }

    // ----- selection -----
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Current time in millis, bumped so ids stay unique within the session.
    fn next_id(&mut self) -> String {
        let now = Local::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id.to_string()
    }
}

/// The simulated write: wait, then hand the submission back unchanged.
pub async fn commit(pending: PendingFavorite) -> PendingFavorite {
    tokio::time::sleep(SIMULATED_LATENCY).await;
    pending
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_name(favs: &mut Favorites, name: &str) {
        name.chars().for_each(|c| favs.push_char(c));
    }

    #[test]
    fn starts_with_seed_entries() {
        let favs = Favorites::new();
        let names: Vec<&str> = favs.items().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Luke Skywalker", "Millennium Falcon"]);
        assert_eq!(favs.draft_kind(), EntityKind::Character);
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let mut favs = Favorites::new();
        type_name(&mut favs, "  ");
        assert!(favs.submit().is_none());
        assert_eq!(favs.len(), 2);
        assert_eq!(favs.state(), AddState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn add_goes_through_adding_and_trims() {
        let mut favs = Favorites::new();
        favs.open_dialog();
        type_name(&mut favs, "  Yoda ");
        let pending = favs.submit().unwrap();
        assert!(favs.is_adding());
        assert!(favs.submit().is_none(), "second submit while adding is ignored");

        let started = tokio::time::Instant::now();
        let done = commit(pending).await;
        assert!(started.elapsed() >= SIMULATED_LATENCY);

        let added = favs.complete(done).clone();
        assert_eq!(added.name, "Yoda");
        assert_eq!(added.kind, EntityKind::Character);
        assert_eq!(favs.len(), 3);
        assert_eq!(favs.state(), AddState::Idle);
        assert!(!favs.dialog_open());
        assert_eq!(favs.draft_name(), "");
    }

    #[test]
    fn ids_are_unique_for_fast_adds() {
        let mut favs = Favorites::empty();
        for name in ["a", "b", "c"] {
            type_name(&mut favs, name);
            let p = favs.submit().unwrap();
            favs.complete(p);
        }
        let mut ids: Vec<&str> = favs.items().iter().map(|f| f.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn remove_by_id() {
        let mut favs = Favorites::new();
        assert!(!favs.remove("does-not-exist"));
        assert_eq!(favs.len(), 2);
        assert!(favs.remove("1"));
        assert_eq!(favs.items()[0].name, "Millennium Falcon");
    }

    #[test]
    fn kind_selector_cycles() {
        let mut favs = Favorites::new();
        favs.next_kind();
        assert_eq!(favs.draft_kind(), EntityKind::Planet);
        favs.prev_kind();
        favs.prev_kind();
        assert_eq!(favs.draft_kind(), EntityKind::Film);
    }
}
