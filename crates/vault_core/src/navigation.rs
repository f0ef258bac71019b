//! Navigation state machine
//!
//! Governs which of the mutually-exclusive presentation modes is active
//! and keeps the active-item cursor consistent as the collection mutates.
//! The modal axis is a single sum type so that illegal combinations
//! (stats and backup overlays open together, inspection under the media
//! viewer) cannot be represented at all.

use crate::brightness::Brightness;
use crate::config::ThemeMode;
use std::time::{Duration, Instant};
use vault_store::MediaKind;

/// How the collection is arranged on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Linear, one-at-a-time browsing
    Stand,
    /// Pile-like overview of more of the collection
    Stack,
}

/// The modal layer above the browse view, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    None,
    /// Full-detail view of the active record
    Inspecting,
    /// Immersive viewer for one media asset of the active record.
    /// `index` points into the additional-images list and is only
    /// meaningful for `MediaKind::Image`.
    Media { kind: MediaKind, index: usize },
    /// Collection statistics overlay
    Stats,
    /// Backup/import-export overlay
    Backup,
}

/// Full-screen overlays toggled from the browse view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Stats,
    Backup,
}

/// Stepping direction for media paging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Text tone drawn over the active cover. `Dark` text means the cover
/// behind it is light, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextContrast {
    Light,
    Dark,
}

/// Session-scoped navigation state machine
#[derive(Debug)]
pub struct NavigationState {
    len: usize,
    active_index: usize,
    view_mode: ViewMode,
    modal: Modal,
    jacket_flipped: bool,
    notify_until: Option<Instant>,
    notify_duration: Duration,
    contrast: TextContrast,
    contrast_token: u64,
}

impl NavigationState {
    /// Create a machine over a collection of the given length
    pub fn new(len: usize) -> Self {
        Self {
            len,
            active_index: 0,
            view_mode: ViewMode::Stand,
            modal: Modal::None,
            jacket_flipped: false,
            notify_until: None,
            notify_duration: Duration::from_millis(2500),
            contrast: TextContrast::Light,
            contrast_token: 0,
        }
    }

    pub fn with_notify_duration(mut self, duration: Duration) -> Self {
        self.notify_duration = duration;
        self
    }

    // ===== Accessors =====

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn jacket_flipped(&self) -> bool {
        self.jacket_flipped
    }

    pub fn contrast(&self) -> TextContrast {
        self.contrast
    }

    /// Is the view-mode switch notification still showing?
    pub fn view_mode_notify(&self, now: Instant) -> bool {
        self.notify_until.is_some_and(|until| now < until)
    }

    /// There is an active record iff the collection is non-empty
    pub fn has_active(&self) -> bool {
        self.len > 0
    }

    // ===== Cursor movement =====

    /// Move the cursor forward one record. Clamps at the end, never
    /// wraps. Ignored under overlays and the media viewer; inspection
    /// still browses. Returns true if the index changed.
    pub fn advance(&mut self) -> bool {
        if !self.allows_cursor_move() {
            return false;
        }
        let target = (self.active_index + 1).min(self.len.saturating_sub(1));
        self.move_cursor(target)
    }

    /// Move the cursor back one record; clamps at zero.
    pub fn retreat(&mut self) -> bool {
        if !self.allows_cursor_move() {
            return false;
        }
        let target = self.active_index.saturating_sub(1);
        self.move_cursor(target)
    }

    fn allows_cursor_move(&self) -> bool {
        self.len > 0 && matches!(self.modal, Modal::None | Modal::Inspecting)
    }

    fn move_cursor(&mut self, index: usize) -> bool {
        if index == self.active_index {
            return false;
        }
        self.active_index = index;
        // Front face always shown first for a newly active record
        self.jacket_flipped = false;
        true
    }

    /// Click on the record at `index`. Out-of-range targets are ignored.
    /// Returns true if the active index changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len || !matches!(self.modal, Modal::None) {
            return false;
        }

        if index != self.active_index {
            return self.move_cursor(index);
        }

        // Re-clicking the active record escalates: stand -> stack,
        // stack -> inspection
        match self.view_mode {
            ViewMode::Stand => self.set_view_mode(ViewMode::Stack),
            ViewMode::Stack => self.modal = Modal::Inspecting,
        }
        false
    }

    // ===== View mode =====

    pub fn toggle_view_mode(&mut self, now: Instant) {
        let next = match self.view_mode {
            ViewMode::Stand => ViewMode::Stack,
            ViewMode::Stack => ViewMode::Stand,
        };
        self.set_view_mode(next);
        self.notify_until = Some(now + self.notify_duration);
    }

    /// Escape from stack browse collapses back to the stand
    pub fn collapse_to_stand(&mut self) {
        if self.view_mode == ViewMode::Stack && matches!(self.modal, Modal::None) {
            self.view_mode = ViewMode::Stand;
        }
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    // ===== Inspection =====

    pub fn enter_inspecting(&mut self) {
        if self.len > 0 {
            self.modal = Modal::Inspecting;
        }
    }

    pub fn exit_inspecting(&mut self) {
        if matches!(self.modal, Modal::Inspecting) {
            self.modal = Modal::None;
        }
    }

    /// Arrive from a list-selection flow: jump straight to inspecting
    /// `index` with the stack behind it, so closing inspection feels
    /// natural.
    pub fn start_inspecting_at(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.move_cursor(index);
        self.view_mode = ViewMode::Stack;
        self.modal = Modal::Inspecting;
        true
    }

    /// Flip between the jacket's front and back faces. Only meaningful
    /// while inspecting.
    pub fn flip_jacket(&mut self) {
        if matches!(self.modal, Modal::Inspecting) {
            self.jacket_flipped = !self.jacket_flipped;
        }
    }

    // ===== Media viewer =====

    pub fn open_media(&mut self, kind: MediaKind, start_index: usize) {
        if self.len == 0 {
            return;
        }
        let index = match kind {
            MediaKind::Image => start_index,
            MediaKind::Video => 0,
        };
        self.modal = Modal::Media { kind, index };
    }

    pub fn close_media(&mut self) {
        if matches!(self.modal, Modal::Media { .. }) {
            self.modal = Modal::None;
        }
    }

    /// Page through the active record's image set. Wraps around, unlike
    /// the main cursor. `image_count` of zero is a no-op: wraparound
    /// modulo zero is undefined and must be guarded.
    pub fn navigate_media(&mut self, direction: Direction, image_count: usize) {
        let Modal::Media {
            kind: MediaKind::Image,
            index,
        } = self.modal
        else {
            return;
        };
        if image_count == 0 {
            return;
        }

        let next = match direction {
            Direction::Next => (index + 1) % image_count,
            Direction::Prev => (index + image_count - 1) % image_count,
        };
        self.modal = Modal::Media {
            kind: MediaKind::Image,
            index: next,
        };
    }

    // ===== Overlays =====

    /// Toggle the stats or backup overlay. Opening one closes the other.
    pub fn toggle_overlay(&mut self, which: Overlay) {
        self.modal = match (which, self.modal) {
            (Overlay::Stats, Modal::Stats) => Modal::None,
            (Overlay::Backup, Modal::Backup) => Modal::None,
            (Overlay::Stats, _) => Modal::Stats,
            (Overlay::Backup, _) => Modal::Backup,
        };
    }

    pub fn close_overlay(&mut self) {
        if matches!(self.modal, Modal::Stats | Modal::Backup) {
            self.modal = Modal::None;
        }
    }

    // ===== Bounds correction =====

    /// Resynchronize with the collection length after a mutation.
    /// Clamps the cursor on shrink; losing the record under the cursor
    /// (clamp or empty collection) force-closes any modal that requires
    /// a current record. Returns true if the active index changed.
    pub fn sync_len(&mut self, len: usize) -> bool {
        self.len = len;

        if len == 0 {
            self.active_record_removed();
            let changed = self.active_index != 0;
            self.active_index = 0;
            self.jacket_flipped = false;
            return changed;
        }

        if self.active_index >= len {
            self.active_index = len - 1;
            self.jacket_flipped = false;
            self.active_record_removed();
            return true;
        }
        false
    }

    /// The record under the cursor was removed: close any modal bound
    /// to it (inspection, media viewer). Overlays are collection-wide
    /// and stay up.
    pub fn active_record_removed(&mut self) {
        if matches!(self.modal, Modal::Inspecting | Modal::Media { .. }) {
            self.modal = Modal::None;
        }
    }

    // ===== Contrast =====

    /// Issue a new sample token for the active record's cover. Results
    /// carrying any older token are stale and will be dropped.
    pub fn issue_contrast_token(&mut self) -> u64 {
        self.contrast_token += 1;
        self.contrast_token
    }

    /// Apply a resolved brightness sample. The sampled cover brightness
    /// is inverted to pick the text tone: a light cover needs dark text.
    /// Stale tokens are discarded; until a fresh sample lands the
    /// previous contrast is retained.
    pub fn apply_contrast(&mut self, token: u64, brightness: Brightness) -> bool {
        if token != self.contrast_token {
            tracing::trace!(token, current = self.contrast_token, "Discarding stale sample");
            return false;
        }
        self.contrast = match brightness {
            Brightness::Light => TextContrast::Dark,
            Brightness::Dark => TextContrast::Light,
        };
        true
    }

    /// No cover to sample: take the ambient theme default immediately.
    /// Also invalidates any in-flight sample.
    pub fn set_contrast_from_theme(&mut self, theme: ThemeMode) {
        self.contrast_token += 1;
        self.contrast = match theme {
            ThemeMode::Dark => TextContrast::Light,
            ThemeMode::Light => TextContrast::Dark,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(len: usize) -> NavigationState {
        NavigationState::new(len)
    }

    #[test]
    fn test_advance_clamps_never_wraps() {
        let mut nav = machine(3);
        for _ in 0..10 {
            nav.advance();
        }
        assert_eq!(nav.active_index(), 2);
        for _ in 0..10 {
            nav.retreat();
        }
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_advance_noop_when_empty() {
        let mut nav = machine(0);
        assert!(!nav.advance());
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_cursor_locked_under_overlays_and_media() {
        let mut nav = machine(5);
        nav.toggle_overlay(Overlay::Stats);
        assert!(!nav.advance());

        nav.toggle_overlay(Overlay::Stats);
        nav.open_media(MediaKind::Image, 0);
        assert!(!nav.advance());
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_cursor_still_moves_while_inspecting() {
        let mut nav = machine(5);
        nav.enter_inspecting();
        assert!(nav.advance());
        assert_eq!(nav.active_index(), 1);
        assert_eq!(nav.modal(), Modal::Inspecting);
    }

    #[test]
    fn test_select_promotes_stand_to_stack() {
        let mut nav = machine(3);
        // Different record: just activates
        nav.select(1);
        assert_eq!(nav.active_index(), 1);
        assert_eq!(nav.view_mode(), ViewMode::Stand);
        // Re-click: promote
        nav.select(1);
        assert_eq!(nav.view_mode(), ViewMode::Stack);
        // Re-click in stack: inspect
        nav.select(1);
        assert_eq!(nav.modal(), Modal::Inspecting);
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut nav = machine(3);
        assert!(!nav.select(7));
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_jacket_flip_resets_on_index_change() {
        let mut nav = machine(3);
        nav.enter_inspecting();
        nav.flip_jacket();
        assert!(nav.jacket_flipped());
        nav.advance();
        assert!(!nav.jacket_flipped());
    }

    #[test]
    fn test_jacket_flip_only_while_inspecting() {
        let mut nav = machine(3);
        nav.flip_jacket();
        assert!(!nav.jacket_flipped());
    }

    #[test]
    fn test_media_navigation_is_cyclic() {
        let mut nav = machine(1);
        nav.open_media(MediaKind::Image, 0);

        // M consecutive next calls return to the start
        let m = 4;
        for _ in 0..m {
            nav.navigate_media(Direction::Next, m);
        }
        assert_eq!(nav.modal(), Modal::Media { kind: MediaKind::Image, index: 0 });

        // Prev wraps backwards
        nav.navigate_media(Direction::Prev, m);
        assert_eq!(nav.modal(), Modal::Media { kind: MediaKind::Image, index: m - 1 });
    }

    #[test]
    fn test_media_navigation_empty_list_noop() {
        let mut nav = machine(1);
        nav.open_media(MediaKind::Image, 0);
        nav.navigate_media(Direction::Next, 0);
        assert_eq!(nav.modal(), Modal::Media { kind: MediaKind::Image, index: 0 });
    }

    #[test]
    fn test_media_navigation_ignored_for_video() {
        let mut nav = machine(1);
        nav.open_media(MediaKind::Video, 0);
        nav.navigate_media(Direction::Next, 5);
        assert_eq!(nav.modal(), Modal::Media { kind: MediaKind::Video, index: 0 });
    }

    #[test]
    fn test_overlays_mutually_exclusive() {
        let mut nav = machine(3);
        nav.toggle_overlay(Overlay::Stats);
        assert_eq!(nav.modal(), Modal::Stats);
        nav.toggle_overlay(Overlay::Backup);
        assert_eq!(nav.modal(), Modal::Backup);
        nav.toggle_overlay(Overlay::Backup);
        assert_eq!(nav.modal(), Modal::None);
    }

    #[test]
    fn test_shrink_clamps_and_closes_inspection() {
        let mut nav = machine(3);
        nav.select(2);
        nav.select(2); // stack
        nav.select(2); // inspecting
        assert_eq!(nav.modal(), Modal::Inspecting);

        // Delete the record at index 2: the cursor clamps to the new
        // last index and inspection of the removed record closes
        let changed = nav.sync_len(2);
        assert!(changed);
        assert_eq!(nav.active_index(), 1);
        assert_eq!(nav.modal(), Modal::None);
    }

    #[test]
    fn test_empty_collection_closes_record_modals() {
        let mut nav = machine(1);
        nav.open_media(MediaKind::Image, 0);
        nav.sync_len(0);
        assert_eq!(nav.modal(), Modal::None);
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_shrink_without_clamp_keeps_modal() {
        // Deleting a later record does not disturb inspection of an
        // earlier one
        let mut nav = machine(3);
        nav.enter_inspecting();
        assert!(!nav.sync_len(2));
        assert_eq!(nav.active_index(), 0);
        assert_eq!(nav.modal(), Modal::Inspecting);
    }

    #[test]
    fn test_start_inspecting_at_sets_stack_behind() {
        let mut nav = machine(5);
        assert!(nav.start_inspecting_at(3));
        assert_eq!(nav.active_index(), 3);
        assert_eq!(nav.view_mode(), ViewMode::Stack);
        assert_eq!(nav.modal(), Modal::Inspecting);

        nav.exit_inspecting();
        assert_eq!(nav.view_mode(), ViewMode::Stack);
    }

    #[test]
    fn test_stale_contrast_sample_discarded() {
        let mut nav = machine(2);
        let stale = nav.issue_contrast_token();
        let fresh = nav.issue_contrast_token();

        assert!(!nav.apply_contrast(stale, Brightness::Light));
        assert_eq!(nav.contrast(), TextContrast::Light);

        assert!(nav.apply_contrast(fresh, Brightness::Light));
        // Light cover -> dark text
        assert_eq!(nav.contrast(), TextContrast::Dark);
    }

    #[test]
    fn test_theme_fallback_inverts_too() {
        let mut nav = machine(1);
        nav.set_contrast_from_theme(ThemeMode::Light);
        assert_eq!(nav.contrast(), TextContrast::Dark);
        nav.set_contrast_from_theme(ThemeMode::Dark);
        assert_eq!(nav.contrast(), TextContrast::Light);
    }

    #[test]
    fn test_view_mode_notification_expires() {
        let mut nav = machine(1).with_notify_duration(Duration::from_millis(50));
        let now = Instant::now();
        nav.toggle_view_mode(now);
        assert!(nav.view_mode_notify(now + Duration::from_millis(10)));
        assert!(!nav.view_mode_notify(now + Duration::from_millis(100)));
    }
}
