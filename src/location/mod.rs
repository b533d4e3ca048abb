//! Location state
//!
//! Single source of truth for "where". Three notions of location coexist:
//! - the device location reported by the positioning collaborator
//! - the active search point that searches and distances are centered on
//! - the manual draft, free text typed in manual-coordinate mode
//!
//! Only validated coordinates ever become the active search point. Once
//! initialization completes the active point is always set, and later
//! writes (map click, manual submit) win over any earlier value.

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Uncommitted free-text coordinates from manual entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualDraft {
    pub lat_text: String,
    pub lon_text: String,
}

impl ManualDraft {
    /// Create a draft from raw text
    pub fn new(lat_text: impl Into<String>, lon_text: impl Into<String>) -> Self {
        Self {
            lat_text: lat_text.into(),
            lon_text: lon_text.into(),
        }
    }

    /// Pre-fill a draft from a coordinate, 6 decimal places
    pub fn from_coords(coords: Coordinates) -> Self {
        Self::new(format!("{:.6}", coords.lat), format!("{:.6}", coords.lon))
    }
}

/// Serializable view of the location state at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub device_location: Option<Coordinates>,
    pub active_search_point: Option<Coordinates>,
    pub manual_mode: bool,
    pub manual_draft: ManualDraft,
    pub draft_dirty: bool,
}

/// Owner of the device location, active search point and manual draft
#[derive(Debug, Clone)]
pub struct LocationState {
    device: Option<Coordinates>,
    active: Option<Coordinates>,
    draft: ManualDraft,
    draft_dirty: bool,
    manual_mode: bool,
    fallback: Coordinates,
}

impl LocationState {
    /// Create an uninitialized state using the built-in fallback point
    pub fn new() -> Self {
        Self::with_fallback(Coordinates::fallback())
    }

    /// Create an uninitialized state with a specific fallback point
    pub fn with_fallback(fallback: Coordinates) -> Self {
        Self {
            device: None,
            active: None,
            draft: ManualDraft::default(),
            draft_dirty: false,
            manual_mode: false,
            fallback,
        }
    }

    /// Record a device location
    ///
    /// Seeds the active search point only if it is still unset, so a late
    /// device callback never overrides a map click or manual entry.
    pub fn resolve_device(&mut self, coords: Coordinates) {
        debug!("Device location resolved to {}", coords);
        self.device = Some(coords);
        if self.active.is_none() {
            self.active = Some(coords);
        }
    }

    /// Record that device resolution failed
    ///
    /// Falls back to the fixed default point if nothing is active yet.
    pub fn resolve_device_failed(&mut self) {
        if self.active.is_none() {
            debug!("Device location unavailable, using fallback {}", self.fallback);
            self.active = Some(self.fallback);
        }
    }

    /// Move the search point to a map click
    ///
    /// Map coordinates come from the map surface and are trusted in range.
    pub fn set_search_point_from_map_click(&mut self, coords: Coordinates) {
        debug!("Search point set from map click: {}", coords);
        self.active = Some(coords);
    }

    /// Replace the manual draft text
    pub fn set_draft(&mut self, lat_text: impl Into<String>, lon_text: impl Into<String>) {
        self.draft = ManualDraft::new(lat_text, lon_text);
        self.draft_dirty = true;
    }

    /// Validate the manual draft and promote it to the active search point
    ///
    /// On failure the active point and the draft are left untouched.
    pub fn submit_manual_draft(&mut self) -> Result<Coordinates> {
        let coords = Coordinates::parse(&self.draft.lat_text, &self.draft.lon_text)?;
        debug!("Search point set from manual entry: {}", coords);
        self.active = Some(coords);
        self.draft_dirty = false;
        Ok(coords)
    }

    /// Return to the device location and leave manual mode
    ///
    /// No-op when the device location is unknown.
    pub fn reset_to_device(&mut self) {
        let Some(device) = self.device else {
            return;
        };
        self.active = Some(device);
        self.draft = ManualDraft::default();
        self.draft_dirty = false;
        self.manual_mode = false;
    }

    /// Flip between map selection and manual entry
    pub fn toggle_manual_mode(&mut self) {
        self.set_manual_mode(!self.manual_mode);
    }

    /// Select map selection (`false`) or manual entry (`true`)
    ///
    /// Entering manual mode pre-fills the draft from the active point.
    pub fn set_manual_mode(&mut self, manual: bool) {
        if manual && !self.manual_mode {
            self.draft = self
                .active
                .map(ManualDraft::from_coords)
                .unwrap_or_default();
            self.draft_dirty = false;
        }
        self.manual_mode = manual;
    }

    /// The coordinate searches are centered on, once initialized
    pub fn active_search_point(&self) -> Option<Coordinates> {
        self.active
    }

    /// The last known device location
    pub fn device_location(&self) -> Option<Coordinates> {
        self.device
    }

    /// The fallback point used when device resolution fails
    pub fn fallback(&self) -> Coordinates {
        self.fallback
    }

    /// Current manual draft
    pub fn draft(&self) -> &ManualDraft {
        &self.draft
    }

    /// Whether the draft has edits not yet submitted
    pub fn is_draft_dirty(&self) -> bool {
        self.draft_dirty
    }

    /// Whether manual-coordinate mode is on
    pub fn is_manual_mode(&self) -> bool {
        self.manual_mode
    }

    /// Whether an active search point has been established
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// Point to display when something must be shown
    pub fn display_point(&self) -> Coordinates {
        self.active.or(self.device).unwrap_or(self.fallback)
    }

    /// Take a serializable snapshot
    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            device_location: self.device,
            active_search_point: self.active,
            manual_mode: self.manual_mode,
            manual_draft: self.draft.clone(),
            draft_dirty: self.draft_dirty,
        }
    }
}

impl Default for LocationState {
    fn default() -> Self {
        Self::new()
    }
}
