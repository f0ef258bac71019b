//! Browse session
//!
//! Ties the collection controller, the navigation state machine and the
//! brightness sampler together behind a single `handle_key` entry point,
//! so exactly one input owner exists for the machine's lifetime.

use crate::brightness::{BrightnessSampler, CoverSource, SampleResult};
use crate::config::AppConfig;
use crate::controller::CollectionController;
use crate::error::VaultError;
use crate::input::{route_drag_end, route_key, Key, NavAction};
use crate::navigation::{Direction, NavigationState, Overlay};
use crate::stats::CollectionStats;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use vault_store::{MediaKind, VinylDraft, VinylRecord};

/// Long-lived interactive browse session
pub struct Session {
    controller: CollectionController,
    nav: NavigationState,
    sampler: BrightnessSampler,
    sample_rx: UnboundedReceiver<SampleResult>,
    config: AppConfig,
}

impl Session {
    pub fn new(
        controller: CollectionController,
        config: AppConfig,
        cover_source: Arc<dyn CoverSource>,
    ) -> Self {
        let (sampler, sample_rx) = BrightnessSampler::new(cover_source);
        let nav = NavigationState::new(controller.len())
            .with_notify_duration(Duration::from_millis(config.navigation.notify_duration_ms));

        let mut session = Self {
            controller,
            nav,
            sampler,
            sample_rx,
            config,
        };
        session.refresh_contrast();
        session
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn records(&self) -> &[VinylRecord] {
        self.controller.records()
    }

    pub fn active_record(&self) -> Option<&VinylRecord> {
        self.controller.get(self.nav.active_index())
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats::compute(self.controller.records())
    }

    // ===== Input =====

    /// Single keyboard entry point for the whole browse surface
    pub fn handle_key(&mut self, key: Key, now: Instant) {
        let Some(action) = route_key(&self.nav, key) else {
            return;
        };
        self.apply(action, now);
    }

    /// A released horizontal drag in browse mode
    pub fn handle_drag_end(&mut self, offset_x: f32, now: Instant) {
        let threshold = self.config.navigation.drag_threshold;
        if let Some(action) = route_drag_end(&self.nav, offset_x, threshold) {
            self.apply(action, now);
        }
    }

    fn apply(&mut self, action: NavAction, now: Instant) {
        match action {
            NavAction::Advance => {
                if self.nav.advance() {
                    self.refresh_contrast();
                }
            }
            NavAction::Retreat => {
                if self.nav.retreat() {
                    self.refresh_contrast();
                }
            }
            NavAction::PromoteToStack => self.nav.toggle_view_mode(now),
            NavAction::CollapseToStand => self.nav.collapse_to_stand(),
            NavAction::EnterInspecting => self.nav.enter_inspecting(),
            NavAction::ExitInspecting => self.nav.exit_inspecting(),
            NavAction::FlipJacket => self.nav.flip_jacket(),
            NavAction::MediaNext => {
                let count = self.active_image_count();
                self.nav.navigate_media(Direction::Next, count);
            }
            NavAction::MediaPrev => {
                let count = self.active_image_count();
                self.nav.navigate_media(Direction::Prev, count);
            }
            NavAction::CloseMedia => self.nav.close_media(),
            NavAction::CloseOverlay => self.nav.close_overlay(),
        }
    }

    fn active_image_count(&self) -> usize {
        self.active_record().map_or(0, VinylRecord::image_count)
    }

    /// Click on the record at `index`
    pub fn select(&mut self, index: usize) {
        if self.nav.select(index) {
            self.refresh_contrast();
        }
    }

    /// Jump straight into inspecting the record with the given id,
    /// e.g. when arriving from the shelf view
    pub fn inspect_record(&mut self, id: &str) -> bool {
        let Some(index) = self.controller.index_of(id) else {
            return false;
        };
        let changed = self.nav.start_inspecting_at(index);
        if changed {
            self.refresh_contrast();
        }
        true
    }

    pub fn toggle_view_mode(&mut self, now: Instant) {
        self.nav.toggle_view_mode(now);
    }

    pub fn toggle_overlay(&mut self, which: Overlay) {
        self.nav.toggle_overlay(which);
    }

    pub fn open_media(&mut self, kind: MediaKind, start_index: usize) {
        self.nav.open_media(kind, start_index);
    }

    // ===== Collection mutations =====

    pub fn add_record(&mut self, draft: VinylDraft) -> String {
        let id = self.controller.add(draft);
        self.resync();
        id
    }

    pub fn update_record(&mut self, id: &str, draft: VinylDraft) -> bool {
        let updated = self.controller.update(id, draft);
        if updated {
            self.refresh_contrast();
        }
        updated
    }

    pub fn delete_record(&mut self, id: &str) -> bool {
        let was_active = self.active_record().is_some_and(|r| r.id == id);
        let removed = self.controller.delete(id);
        if removed {
            // Inspection and the media viewer are bound to the record
            // that just disappeared; the cursor clamp alone does not
            // cover deleting at the front of the list.
            if was_active {
                self.nav.active_record_removed();
            }
            self.resync();
        }
        removed
    }

    /// Apply a parsed backup file, replacing the working collection
    pub fn import(&mut self, raw: &[u8]) -> Result<usize, VaultError> {
        let records = self.controller.parse_import(raw)?;
        let count = records.len();
        self.controller.replace_all(records);
        self.nav.close_overlay();
        self.resync();
        Ok(count)
    }

    pub fn export(&self) -> Result<String, VaultError> {
        Ok(self.controller.export()?)
    }

    /// Shelf drag-reorder: same records, new order
    pub fn reorder(&mut self, records: Vec<VinylRecord>) {
        self.controller.replace_all(records);
        self.resync();
    }

    fn resync(&mut self) {
        self.nav.sync_len(self.controller.len());
        self.refresh_contrast();
    }

    // ===== Contrast =====

    /// Re-issue a brightness sample for the active cover. Without a
    /// cover the ambient theme decides synchronously; with one, the
    /// previous contrast holds until the sample lands.
    fn refresh_contrast(&mut self) {
        match self.active_record().and_then(|r| r.cover_url.clone()) {
            Some(cover) => {
                let token = self.nav.issue_contrast_token();
                self.sampler.request(token, &cover);
            }
            None => self.nav.set_contrast_from_theme(self.config.general.theme),
        }
    }

    /// Drain resolved brightness samples, applying any that are still
    /// current. Call once per event-loop iteration.
    pub fn poll_contrast(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.sample_rx.try_recv() {
            if self.nav.apply_contrast(result.token, result.brightness) {
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brightness::FsCoverSource;
    use crate::navigation::Modal;
    use tempfile::tempdir;
    use vault_store::CollectionStore;

    fn session() -> (tempfile::TempDir, Session) {
        let dir = tempdir().unwrap();
        let store = CollectionStore::open(dir.path()).unwrap();
        let controller = CollectionController::load(store).unwrap();
        let session = Session::new(controller, AppConfig::default(), Arc::new(FsCoverSource));
        (dir, session)
    }

    #[test]
    fn test_delete_inspected_last_record_clamps_and_closes_inspection() {
        let (_dir, mut session) = session();
        assert_eq!(session.records().len(), 3);

        // Inspect the last record
        let last_id = session.records()[2].id.clone();
        assert!(session.inspect_record(&last_id));
        assert_eq!(session.nav().active_index(), 2);

        // Deleting it clamps the cursor to the new last valid index and
        // forces inspection closed
        assert!(session.delete_record(&last_id));
        assert_eq!(session.nav().active_index(), 1);
        assert_eq!(session.nav().modal(), Modal::None);
    }

    #[test]
    fn test_delete_inspected_front_record_closes_inspection() {
        // Deleting at the front never clamps the cursor, but the record
        // under it changed, so inspection still closes
        let (_dir, mut session) = session();
        let first_id = session.records()[0].id.clone();
        assert!(session.inspect_record(&first_id));
        assert_eq!(session.nav().active_index(), 0);

        assert!(session.delete_record(&first_id));
        assert_eq!(session.nav().active_index(), 0);
        assert_eq!(session.nav().modal(), Modal::None);
    }

    #[test]
    fn test_delete_other_record_keeps_inspection_open() {
        let (_dir, mut session) = session();
        let first_id = session.records()[0].id.clone();
        let last_id = session.records()[2].id.clone();
        assert!(session.inspect_record(&first_id));

        assert!(session.delete_record(&last_id));
        assert_eq!(session.nav().modal(), Modal::Inspecting);
        assert_eq!(session.nav().active_index(), 0);
    }

    #[test]
    fn test_key_flow_stand_to_inspection() {
        let (_dir, mut session) = session();
        let now = Instant::now();

        session.handle_key(Key::Enter, now); // stand -> stack
        session.handle_key(Key::Enter, now); // stack -> inspecting
        assert_eq!(session.nav().modal(), Modal::Inspecting);

        session.handle_key(Key::Right, now); // browse within inspection
        assert_eq!(session.nav().active_index(), 1);
        assert!(!session.nav().jacket_flipped());

        session.handle_key(Key::Space, now);
        assert!(session.nav().jacket_flipped());

        session.handle_key(Key::Escape, now);
        assert_eq!(session.nav().modal(), Modal::None);
    }

    #[test]
    fn test_drag_steps_once_past_threshold() {
        let (_dir, mut session) = session();
        let now = Instant::now();

        session.handle_drag_end(-120.0, now);
        assert_eq!(session.nav().active_index(), 1);
        session.handle_drag_end(10.0, now);
        assert_eq!(session.nav().active_index(), 1);
        session.handle_drag_end(55.0, now);
        assert_eq!(session.nav().active_index(), 0);
    }

    #[test]
    fn test_import_replaces_and_closes_backup_overlay() {
        let (_dir, mut session) = session();
        let exported = session.export().unwrap();

        session.toggle_overlay(Overlay::Backup);
        assert_eq!(session.nav().modal(), Modal::Backup);

        let count = session.import(exported.as_bytes()).unwrap();
        assert_eq!(count, 3);
        assert_eq!(session.nav().modal(), Modal::None);
    }

    #[test]
    fn test_import_invalid_leaves_collection_untouched() {
        let (_dir, mut session) = session();
        let before = session.records().to_vec();

        let err = session.import(br#"{"oops": true}"#).unwrap_err();
        assert_eq!(err.user_message(), "Invalid backup file.");
        assert_eq!(session.records(), before.as_slice());
    }

    #[test]
    fn test_add_record_goes_to_front() {
        let (_dir, mut session) = session();
        let id = session.add_record(VinylDraft {
            title: "Discovery".into(),
            artist: "Daft Punk".into(),
            year: 2001,
            genre: "Electronic".into(),
            rating: 5,
            ..Default::default()
        });
        assert_eq!(session.records()[0].id, id);
        assert_eq!(session.records().len(), 4);
    }
}
