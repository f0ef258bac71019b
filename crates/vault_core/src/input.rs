//! Input routing
//!
//! Translates raw keyboard and drag events into navigation transitions.
//! Routing is a single ordered dispatch per event, first matching context
//! wins: media viewer, then overlays, then inspection, then plain browse.
//! The routing itself is pure; [`crate::Session`] applies the resulting
//! action to the state machine.

use crate::navigation::{Modal, NavigationState, ViewMode};
use vault_store::MediaKind;

/// The keys the machine responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Left,
    Right,
    Space,
    Enter,
}

/// A routed navigation transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Advance,
    Retreat,
    CollapseToStand,
    PromoteToStack,
    EnterInspecting,
    ExitInspecting,
    FlipJacket,
    MediaNext,
    MediaPrev,
    CloseMedia,
    CloseOverlay,
}

/// Route a key press against the current navigation state.
pub fn route_key(state: &NavigationState, key: Key) -> Option<NavAction> {
    match state.modal() {
        Modal::Media { kind, .. } => match key {
            Key::Escape => Some(NavAction::CloseMedia),
            Key::Right if kind == MediaKind::Image => Some(NavAction::MediaNext),
            Key::Left if kind == MediaKind::Image => Some(NavAction::MediaPrev),
            _ => None,
        },
        Modal::Stats | Modal::Backup => match key {
            Key::Escape => Some(NavAction::CloseOverlay),
            _ => None,
        },
        Modal::Inspecting => match key {
            Key::Escape => Some(NavAction::ExitInspecting),
            Key::Right => Some(NavAction::Advance),
            Key::Left => Some(NavAction::Retreat),
            Key::Space | Key::Enter => Some(NavAction::FlipJacket),
        },
        Modal::None => match key {
            Key::Escape if state.view_mode() == ViewMode::Stack => {
                Some(NavAction::CollapseToStand)
            }
            Key::Escape => None,
            Key::Right => Some(NavAction::Advance),
            Key::Left => Some(NavAction::Retreat),
            Key::Space | Key::Enter => match state.view_mode() {
                ViewMode::Stand => Some(NavAction::PromoteToStack),
                ViewMode::Stack => Some(NavAction::EnterInspecting),
            },
        },
    }
}

/// Route a completed horizontal drag. The release offset past the
/// threshold triggers exactly one step, regardless of velocity; dragging
/// is disabled entirely while any modal is open.
pub fn route_drag_end(state: &NavigationState, offset_x: f32, threshold: f32) -> Option<NavAction> {
    if !matches!(state.modal(), Modal::None) {
        return None;
    }
    if offset_x < -threshold {
        Some(NavAction::Advance)
    } else if offset_x > threshold {
        Some(NavAction::Retreat)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Overlay;

    #[test]
    fn test_browse_stand_routing() {
        let nav = NavigationState::new(3);
        assert_eq!(route_key(&nav, Key::Right), Some(NavAction::Advance));
        assert_eq!(route_key(&nav, Key::Left), Some(NavAction::Retreat));
        assert_eq!(route_key(&nav, Key::Enter), Some(NavAction::PromoteToStack));
        assert_eq!(route_key(&nav, Key::Space), Some(NavAction::PromoteToStack));
        // Escape does nothing in stand
        assert_eq!(route_key(&nav, Key::Escape), None);
    }

    #[test]
    fn test_browse_stack_routing() {
        let mut nav = NavigationState::new(3);
        nav.toggle_view_mode(std::time::Instant::now());
        assert_eq!(route_key(&nav, Key::Escape), Some(NavAction::CollapseToStand));
        assert_eq!(route_key(&nav, Key::Enter), Some(NavAction::EnterInspecting));
    }

    #[test]
    fn test_inspecting_routing() {
        let mut nav = NavigationState::new(3);
        nav.enter_inspecting();
        assert_eq!(route_key(&nav, Key::Escape), Some(NavAction::ExitInspecting));
        assert_eq!(route_key(&nav, Key::Right), Some(NavAction::Advance));
        assert_eq!(route_key(&nav, Key::Space), Some(NavAction::FlipJacket));
    }

    #[test]
    fn test_media_viewer_routing_wins_first() {
        let mut nav = NavigationState::new(3);
        nav.open_media(MediaKind::Image, 1);
        assert_eq!(route_key(&nav, Key::Escape), Some(NavAction::CloseMedia));
        assert_eq!(route_key(&nav, Key::Right), Some(NavAction::MediaNext));
        assert_eq!(route_key(&nav, Key::Left), Some(NavAction::MediaPrev));
        assert_eq!(route_key(&nav, Key::Enter), None);
    }

    #[test]
    fn test_video_viewer_has_no_paging() {
        let mut nav = NavigationState::new(3);
        nav.open_media(MediaKind::Video, 0);
        assert_eq!(route_key(&nav, Key::Right), None);
        assert_eq!(route_key(&nav, Key::Escape), Some(NavAction::CloseMedia));
    }

    #[test]
    fn test_overlay_routing_swallows_arrows() {
        let mut nav = NavigationState::new(3);
        nav.toggle_overlay(Overlay::Backup);
        assert_eq!(route_key(&nav, Key::Right), None);
        assert_eq!(route_key(&nav, Key::Escape), Some(NavAction::CloseOverlay));
    }

    #[test]
    fn test_drag_threshold() {
        let nav = NavigationState::new(3);
        assert_eq!(route_drag_end(&nav, -60.0, 40.0), Some(NavAction::Advance));
        assert_eq!(route_drag_end(&nav, 60.0, 40.0), Some(NavAction::Retreat));
        assert_eq!(route_drag_end(&nav, 25.0, 40.0), None);
    }

    #[test]
    fn test_drag_disabled_under_modal() {
        let mut nav = NavigationState::new(3);
        nav.enter_inspecting();
        assert_eq!(route_drag_end(&nav, -200.0, 40.0), None);
    }
}
