//! In-memory stage.
//!
//! Reference `Stage` implementation: keeps the scene as plain data
//! behind a mutex. Serves as the headless host for the binary and as
//! the inspection surface for tests — every mount, update, and removal
//! is observable.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use super::{CardId, CardUpdate, LayerId, Stage};
use crate::render::CardView;
use crate::types::VisualState;

/// Everything the stage knows about one mounted card.
#[derive(Debug, Clone)]
pub struct CardState {
    pub view: CardView,
    pub visual: VisualState,
    pub path_progress: f64,
    pub rotation_deg: f64,
    pub breathe_scale: f64,
}

#[derive(Debug, Default)]
struct Scene {
    /// Live layers and the cards mounted in them, in mount order.
    layers: HashMap<LayerId, Vec<CardId>>,
    cards: HashMap<CardId, CardState>,
    /// Every `remove_layer` call, in order. Lets tests assert
    /// exactly-once disposal.
    removal_log: Vec<LayerId>,
    /// Total layers ever created.
    layers_created: usize,
}

/// In-memory scene graph keyed by the display root's name.
pub struct MemoryStage {
    root: String,
    scene: Mutex<Scene>,
}

impl MemoryStage {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            scene: Mutex::new(Scene::default()),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    // -- Inspection (tests and diagnostics) ------------------------------

    /// Number of currently live layers.
    pub fn live_layers(&self) -> usize {
        self.scene.lock().unwrap().layers.len()
    }

    /// Total layers ever created.
    pub fn layers_created(&self) -> usize {
        self.scene.lock().unwrap().layers_created
    }

    /// Ids of all currently live layers, unordered.
    pub fn layer_ids(&self) -> Vec<LayerId> {
        self.scene.lock().unwrap().layers.keys().copied().collect()
    }

    /// Cards mounted in a live layer, in mount order.
    pub fn cards_in(&self, layer: LayerId) -> Vec<CardId> {
        self.scene
            .lock()
            .unwrap()
            .layers
            .get(&layer)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of a live card's state.
    pub fn card_state(&self, card: CardId) -> Option<CardState> {
        self.scene.lock().unwrap().cards.get(&card).cloned()
    }

    /// How many times `remove_layer` was called for this layer.
    pub fn removal_count(&self, layer: LayerId) -> usize {
        self.scene
            .lock()
            .unwrap()
            .removal_log
            .iter()
            .filter(|l| **l == layer)
            .count()
    }

    /// Display names of all currently mounted cards, layer by layer in
    /// creation-independent order.
    pub fn mounted_names(&self) -> Vec<String> {
        let scene = self.scene.lock().unwrap();
        let mut names: Vec<String> = scene
            .cards
            .values()
            .map(|c| c.view.name.clone())
            .collect();
        names.sort();
        names
    }
}

impl Stage for MemoryStage {
    fn create_layer(&self) -> LayerId {
        let id = LayerId::new();
        let mut scene = self.scene.lock().unwrap();
        scene.layers.insert(id, Vec::new());
        scene.layers_created += 1;
        debug!(root = %self.root, layer = ?id, "Layer created");
        id
    }

    fn mount_card(&self, layer: LayerId, view: CardView, initial: VisualState) -> CardId {
        let id = CardId::new();
        let mut scene = self.scene.lock().unwrap();
        match scene.layers.get_mut(&layer) {
            Some(cards) => cards.push(id),
            None => {
                warn!(layer = ?layer, "Mount into unknown layer ignored");
                return id;
            }
        }
        scene.cards.insert(
            id,
            CardState {
                view,
                visual: initial,
                path_progress: 0.0,
                rotation_deg: 0.0,
                breathe_scale: 1.0,
            },
        );
        id
    }

    fn update_card(&self, card: CardId, update: CardUpdate) {
        let mut scene = self.scene.lock().unwrap();
        // Cards of a disposed layer are gone; late oscillator or tween
        // writes are dropped, not errors.
        let Some(state) = scene.cards.get_mut(&card) else {
            return;
        };
        match update {
            CardUpdate::Visual(v) => state.visual = v,
            CardUpdate::PathProgress(p) => state.path_progress = p,
            CardUpdate::RotationDeg(r) => state.rotation_deg = r,
            CardUpdate::BreatheScale(s) => state.breathe_scale = s,
        }
    }

    fn remove_layer(&self, layer: LayerId) {
        let mut scene = self.scene.lock().unwrap();
        scene.removal_log.push(layer);
        if let Some(cards) = scene.layers.remove(&layer) {
            for card in &cards {
                scene.cards.remove(card);
            }
            debug!(layer = ?layer, cards = cards.len(), "Layer removed");
        } else {
            warn!(layer = ?layer, "Removal of unknown layer");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
