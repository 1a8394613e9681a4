use std::collections::BTreeMap;

use crate::rotation::RotationLoop;

/// The logical map layers the product defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LayerId {
    Rivers,
    HighGround,
    Heatmap,
    Rainfall,
    SafeZones,
    PopulationCenters,
    MonitoringStations,
}

impl LayerId {
    pub const ALL: [LayerId; 7] = [
        LayerId::Rivers,
        LayerId::HighGround,
        LayerId::Heatmap,
        LayerId::Rainfall,
        LayerId::SafeZones,
        LayerId::PopulationCenters,
        LayerId::MonitoringStations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerId::Rivers => "rivers",
            LayerId::HighGround => "high-ground",
            LayerId::Heatmap => "heatmap",
            LayerId::Rainfall => "rainfall",
            LayerId::SafeZones => "safe-zones",
            LayerId::PopulationCenters => "population-centers",
            LayerId::MonitoringStations => "monitoring-stations",
        }
    }

    /// Initial toggle state. Overlays that obscure the base map start
    /// hidden; reference layers start visible.
    fn default_visible(&self) -> bool {
        !matches!(self, LayerId::Heatmap | LayerId::Rainfall)
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of one logical layer inside the map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    Absent,
    Loading,
    Present { visible: bool },
}

/// A mutation to apply to the underlying map instance. Visibility changes
/// are property mutations on the existing layer, never re-creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapCommand {
    AddSource { layer: LayerId },
    AddLayer { layer: LayerId },
    SetVisibility { layer: LayerId, visible: bool },
}

/// Owns the lifecycle of a single map instance's layers.
///
/// Constructed either available (map style loaded) or unavailable (missing
/// access token, network failure); in the unavailable state every
/// operation is a no-op, so callers never have to branch.
pub struct MapView {
    available: bool,
    states: BTreeMap<LayerId, LayerState>,
    toggles: BTreeMap<LayerId, bool>,
    rotation: RotationLoop,
}

impl MapView {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// A view whose map instance failed to initialize. The container stays
    /// empty; layer and rotation operations do nothing.
    pub fn unavailable() -> Self {
        tracing::warn!("Map failed to initialize; layer operations disabled");
        Self::build(false)
    }

    fn build(available: bool) -> Self {
        let states = LayerId::ALL
            .iter()
            .map(|id| (*id, LayerState::Absent))
            .collect();
        let toggles = LayerId::ALL
            .iter()
            .map(|id| (*id, id.default_visible()))
            .collect();
        Self {
            available,
            states,
            toggles,
            rotation: RotationLoop::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn state(&self, layer: LayerId) -> LayerState {
        self.states.get(&layer).copied().unwrap_or(LayerState::Absent)
    }

    pub fn is_visible(&self, layer: LayerId) -> bool {
        matches!(self.state(layer), LayerState::Present { visible: true })
    }

    /// `Absent -> Loading`. Fired once per layer when the map emits its
    /// "load" event; repeated calls are no-ops so a re-entrant load event
    /// can never create a duplicate source.
    pub fn begin_load(&mut self, layer: LayerId) -> Option<MapCommand> {
        if !self.available {
            return None;
        }
        match self.state(layer) {
            LayerState::Absent => {
                self.states.insert(layer, LayerState::Loading);
                Some(MapCommand::AddSource { layer })
            }
            _ => None,
        }
    }

    /// `Loading -> Present`. Initial visibility comes from the current
    /// toggle state.
    pub fn finish_load(&mut self, layer: LayerId) -> Vec<MapCommand> {
        if !self.available {
            return Vec::new();
        }
        match self.state(layer) {
            LayerState::Loading => {
                let visible = self.toggles.get(&layer).copied().unwrap_or(true);
                self.states.insert(layer, LayerState::Present { visible });
                vec![
                    MapCommand::AddLayer { layer },
                    MapCommand::SetVisibility { layer, visible },
                ]
            }
            _ => Vec::new(),
        }
    }

    /// Run the full load sequence for every layer. Idempotent: a second
    /// call returns no commands.
    pub fn handle_map_load(&mut self) -> Vec<MapCommand> {
        let mut commands = Vec::new();
        for layer in LayerId::ALL {
            commands.extend(self.begin_load(layer));
            commands.extend(self.finish_load(layer));
        }
        commands
    }

    /// Flip a layer's visibility. Only meaningful once the layer is
    /// present; toggling a layer that was never successfully created is a
    /// no-op.
    pub fn toggle(&mut self, layer: LayerId) -> Option<MapCommand> {
        if !self.available {
            return None;
        }
        match self.state(layer) {
            LayerState::Present { visible } => {
                let visible = !visible;
                self.states.insert(layer, LayerState::Present { visible });
                self.toggles.insert(layer, visible);
                Some(MapCommand::SetVisibility { layer, visible })
            }
            _ => None,
        }
    }

    pub fn start_rotation(&mut self) {
        if self.available {
            self.rotation.start();
        }
    }

    pub fn stop_rotation(&mut self) {
        self.rotation.stop();
    }

    /// Advance the rotation by one frame; `None` once cancelled.
    pub fn rotation_tick(&self, bearing: f64) -> Option<f64> {
        self.rotation.tick(bearing)
    }

    /// Dispose of the map instance: cancel the rotation loop and drop all
    /// layers back to `Absent` so nothing leaks into a future instance.
    pub fn teardown(&mut self) {
        self.rotation.stop();
        for layer in LayerId::ALL {
            self.states.insert(layer, LayerState::Absent);
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}
