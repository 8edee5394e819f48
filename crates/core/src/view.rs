//! Map view state and the command stream toward the widget host.
//!
//! The view owns the one piece of mutable state the system has: which layer
//! groups are currently on the map. It never draws anything itself; every
//! state transition is mirrored into a FIFO of [`MapCommand`]s that the
//! embedding widget drains and applies to the real map. Handlers run to
//! completion synchronously, so a host that drains after each call observes
//! every intermediate ordering (in particular: remove-old-before-add-new
//! when the fire overlay is replaced).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info};

use crate::core_types::LatLng;
use crate::error::MapError;
use crate::overlay::{LayerGroup, Overlay};

/// Opaque handle to a layer group registered with a [`MapView`].
///
/// Ids are unique for the lifetime of the view and never reused, so a stale
/// handle held by a host is detected instead of silently addressing a newer
/// group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(u64);

impl LayerId {
    /// Numeric form, for logs and FFI transport.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer #{}", self.0)
    }
}

/// One operation for the widget host to apply to the real map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCommand {
    /// Draw the group addressed by the id (fetch it via [`MapView::group`])
    AddLayer(LayerId),
    /// Erase the group addressed by the id
    RemoveLayer(LayerId),
}

struct GroupEntry {
    group: LayerGroup,
    visible: bool,
}

/// Overlay state for one map widget.
///
/// Holds the registered layer groups, their visibility, the slot for the
/// current fire overlay, and the pending command queue.
pub struct MapView {
    center: LatLng,
    zoom: u8,
    groups: FxHashMap<LayerId, GroupEntry>,
    order: Vec<LayerId>,
    next_id: u64,
    commands: VecDeque<MapCommand>,
    fire_overlay: Option<LayerId>,
}

impl MapView {
    /// Empty view centered on `center` at `zoom`.
    #[must_use]
    pub fn new(center: LatLng, zoom: u8) -> Self {
        info!(%center, zoom, "map view created");
        MapView {
            center,
            zoom,
            groups: FxHashMap::default(),
            order: Vec::new(),
            next_id: 1,
            commands: VecDeque::new(),
            fire_overlay: None,
        }
    }

    /// Initial map center.
    #[must_use]
    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Initial zoom level.
    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    fn allocate_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a group and, if `visible`, queue its draw command.
    pub fn add_group(&mut self, group: LayerGroup, visible: bool) -> LayerId {
        let id = self.allocate_id();
        debug!(%id, name = %group.name, visible, overlays = group.len(), "group registered");
        self.groups.insert(id, GroupEntry { group, visible });
        self.order.push(id);
        if visible {
            self.commands.push_back(MapCommand::AddLayer(id));
        }
        id
    }

    /// Unregister a group, queueing its erase command if it was visible.
    ///
    /// # Errors
    /// Returns [`MapError::UnknownLayer`] for ids this view never issued or
    /// already removed.
    pub fn remove_group(&mut self, id: LayerId) -> Result<LayerGroup, MapError> {
        let entry = self.groups.remove(&id).ok_or(MapError::UnknownLayer(id))?;
        self.order.retain(|&kept| kept != id);
        if self.fire_overlay == Some(id) {
            self.fire_overlay = None;
        }
        if entry.visible {
            self.commands.push_back(MapCommand::RemoveLayer(id));
        }
        debug!(%id, name = %entry.group.name, "group removed");
        Ok(entry.group)
    }

    /// Checkbox semantics: show or hide a group.
    ///
    /// Idempotent; commands are queued only when visibility actually flips.
    /// Returns whether a transition happened.
    ///
    /// # Errors
    /// Returns [`MapError::UnknownLayer`] for ids this view never issued or
    /// already removed.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> Result<bool, MapError> {
        let entry = self.groups.get_mut(&id).ok_or(MapError::UnknownLayer(id))?;
        if entry.visible == visible {
            return Ok(false);
        }
        entry.visible = visible;
        self.commands.push_back(if visible {
            MapCommand::AddLayer(id)
        } else {
            MapCommand::RemoveLayer(id)
        });
        debug!(%id, name = %entry.group.name, visible, "visibility changed");
        Ok(true)
    }

    /// Whether a group is currently on the map.
    ///
    /// # Errors
    /// Returns [`MapError::UnknownLayer`] for ids this view never issued or
    /// already removed.
    pub fn is_visible(&self, id: LayerId) -> Result<bool, MapError> {
        self.groups
            .get(&id)
            .map(|entry| entry.visible)
            .ok_or(MapError::UnknownLayer(id))
    }

    /// The group behind an id, if it is still registered.
    #[must_use]
    pub fn group(&self, id: LayerId) -> Option<&LayerGroup> {
        self.groups.get(&id).map(|entry| &entry.group)
    }

    /// Registered ids in registration order.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.order.iter().copied()
    }

    /// Replace the fire overlay.
    ///
    /// The previous fire overlay (if any) is removed first; the replacement
    /// (if any) is then registered visible. Passing `None` just clears.
    /// Both steps complete within this call, and their commands are queued
    /// in that order, so the host never draws two fire overlays at once.
    pub fn replace_fire_overlay(&mut self, overlay: Option<Overlay>) -> Option<LayerId> {
        if let Some(old) = self.fire_overlay.take() {
            // Registered by this method, so the id is always live here.
            let _ = self.remove_group(old);
        }
        let id = overlay.map(|overlay| {
            let group = LayerGroup::with_overlays("fire-spread", vec![overlay]);
            let id = self.add_group(group, true);
            self.fire_overlay = Some(id);
            id
        });
        debug!(current = ?self.fire_overlay, "fire overlay replaced");
        id
    }

    /// Handle of the current fire overlay, if one is on the map.
    #[must_use]
    pub fn fire_overlay(&self) -> Option<LayerId> {
        self.fire_overlay
    }

    /// Pop the oldest pending command.
    pub fn poll_command(&mut self) -> Option<MapCommand> {
        self.commands.pop_front()
    }

    /// Drain every pending command, oldest first.
    pub fn drain_commands(&mut self) -> Vec<MapCommand> {
        self.commands.drain(..).collect()
    }

    /// Number of queued commands.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }
}
