//! Observable stores shared between the race core and the UI
//!
//! Writers replace or update the value; every subscriber is called
//! synchronously, in subscription order, after each write. Stores are plain
//! values passed by reference, so each race session owns its own.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CharacterProfile};
use crate::error::ConfigError;
use crate::platform::Platform;
use crate::sim::state::RaceSessionState;
use crate::sim::{TrackProfile, VehicleProfile};

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A value plus the callbacks watching it
pub struct Store<T> {
    value: T,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Modify the value in place and notify
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify();
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.value);
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

/// Race progress (current lap, total laps, finished)
pub type RaceSessionStore = Store<RaceSessionState>;

/// Menu choices; `None` means "not chosen yet"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub character: Option<String>,
    pub vehicle: Option<String>,
    pub track: Option<String>,
    pub laps: Option<u32>,
    pub platform: Option<Platform>,
}

/// Everything a race session needs, fully resolved
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSetup {
    pub character: CharacterProfile,
    pub vehicle: VehicleProfile,
    pub track: TrackProfile,
    pub total_laps: u32,
    pub platform: Platform,
}

/// Menu-driven configuration backed by a catalog
///
/// Reads never come back empty: an unset field resolves to the first catalog
/// entry for that field.
pub struct SelectionStore {
    catalog: Catalog,
    store: Store<Selection>,
}

impl SelectionStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            store: Store::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Raw choices as written by the UI
    pub fn selection(&self) -> &Selection {
        self.store.get()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Selection) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn select_character(&mut self, id: &str) -> Result<(), ConfigError> {
        self.catalog.find_character(id).ok_or_else(|| unknown("character", id))?;
        self.store.update(|s| s.character = Some(id.to_string()));
        Ok(())
    }

    pub fn select_vehicle(&mut self, id: &str) -> Result<(), ConfigError> {
        self.catalog.find_vehicle(id).ok_or_else(|| unknown("vehicle", id))?;
        self.store.update(|s| s.vehicle = Some(id.to_string()));
        Ok(())
    }

    pub fn select_track(&mut self, id: &str) -> Result<(), ConfigError> {
        self.catalog.find_track(id).ok_or_else(|| unknown("track", id))?;
        self.store.update(|s| s.track = Some(id.to_string()));
        Ok(())
    }

    pub fn select_laps(&mut self, laps: u32) -> Result<(), ConfigError> {
        if laps == 0 {
            return Err(ConfigError::InvalidLapCount(laps));
        }
        self.store.update(|s| s.laps = Some(laps));
        Ok(())
    }

    pub fn select_platform(&mut self, platform: Platform) {
        self.store.update(|s| s.platform = Some(platform));
    }

    /// Forget all choices
    pub fn reset(&mut self) {
        self.store.set(Selection::default());
    }

    pub fn character(&self) -> &CharacterProfile {
        self.selection()
            .character
            .as_deref()
            .and_then(|id| self.catalog.find_character(id))
            .unwrap_or_else(|| self.catalog.default_character())
    }

    pub fn vehicle(&self) -> &VehicleProfile {
        self.selection()
            .vehicle
            .as_deref()
            .and_then(|id| self.catalog.find_vehicle(id))
            .unwrap_or_else(|| self.catalog.default_vehicle())
    }

    pub fn track(&self) -> &TrackProfile {
        self.selection()
            .track
            .as_deref()
            .and_then(|id| self.catalog.find_track(id))
            .unwrap_or_else(|| self.catalog.default_track())
    }

    pub fn total_laps(&self) -> u32 {
        self.selection()
            .laps
            .filter(|&laps| laps >= 1)
            .unwrap_or_else(|| self.catalog.default_laps())
    }

    pub fn platform(&self) -> Platform {
        self.selection().platform.unwrap_or_default()
    }

    /// Snapshot the resolved choices for a new race
    pub fn resolve(&self) -> RaceSetup {
        RaceSetup {
            character: self.character().clone(),
            vehicle: self.vehicle().clone(),
            track: self.track().clone(),
            total_laps: self.total_laps(),
            platform: self.platform(),
        }
    }
}

fn unknown(kind: &'static str, id: &str) -> ConfigError {
    log::warn!("Rejected unknown {kind} selection '{id}'");
    ConfigError::UnknownEntry {
        kind,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_notified_in_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new(0u32);

        let a = calls.clone();
        store.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = calls.clone();
        store.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        store.set(5);
        store.update(|v| *v += 1);

        assert_eq!(
            *calls.borrow(),
            vec![("a", 5), ("b", 5), ("a", 6), ("b", 6)]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let hits = Rc::new(RefCell::new(0));
        let mut store = Store::new(());
        let h = hits.clone();
        let id = store.subscribe(move |_| *h.borrow_mut() += 1);

        store.set(());
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set(());

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_unset_selection_resolves_to_first_entries() {
        let catalog = Catalog::builtin();
        let store = SelectionStore::new(catalog.clone());
        let setup = store.resolve();

        assert_eq!(setup.character, catalog.characters()[0]);
        assert_eq!(setup.vehicle, catalog.vehicles()[0]);
        assert_eq!(setup.track, catalog.tracks()[0]);
        assert_eq!(setup.total_laps, catalog.lap_options()[0]);
        assert_eq!(setup.platform, Platform::Desktop);
    }

    #[test]
    fn test_explicit_selection_wins() {
        let catalog = Catalog::builtin();
        let mut store = SelectionStore::new(catalog.clone());
        let vehicle_id = catalog.vehicles()[1].id.clone();
        let track_id = catalog.tracks()[2].id.clone();

        store.select_vehicle(&vehicle_id).unwrap();
        store.select_track(&track_id).unwrap();
        store.select_laps(5).unwrap();
        store.select_platform(Platform::Mobile);

        assert_eq!(store.vehicle().id, vehicle_id);
        assert_eq!(store.track().id, track_id);
        assert_eq!(store.total_laps(), 5);
        assert_eq!(store.platform(), Platform::Mobile);
        // Character untouched: still the default
        assert_eq!(store.character(), &catalog.characters()[0]);

        store.reset();
        assert_eq!(store.vehicle(), &catalog.vehicles()[0]);
    }

    #[test]
    fn test_unknown_selection_rejected() {
        let mut store = SelectionStore::new(Catalog::builtin());
        assert!(matches!(
            store.select_track("moon-base"),
            Err(ConfigError::UnknownEntry { kind: "track", .. })
        ));
        assert!(matches!(
            store.select_laps(0),
            Err(ConfigError::InvalidLapCount(0))
        ));
        assert_eq!(store.selection(), &Selection::default());
    }

    #[test]
    fn test_selection_store_notifies() {
        let seen = Rc::new(RefCell::new(None));
        let mut store = SelectionStore::new(Catalog::builtin());
        let s = seen.clone();
        store.subscribe(move |sel| *s.borrow_mut() = sel.laps);
        store.select_laps(7).unwrap();
        assert_eq!(*seen.borrow(), Some(7));
    }
}
