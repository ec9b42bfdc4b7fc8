// Scene Registry
// Scene list plus the active (PGM) and preview (PVW) cursors.
// Cursor setters do not validate ids; unknown ids render as no signal.

use crate::models::{default_scenes, BroadcastScene, BroadcastSceneItem, VideoSource};
use crate::services::SourceRegistry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneEditError {
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Item '{0}' is locked")]
    Locked(String),
}

/// What a scene item shows when rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feed<'a> {
    Live(&'a VideoSource),
    NoSignal,
}

/// A visible scene item with its source looked up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedItem<'a> {
    pub item: &'a BroadcastSceneItem,
    pub feed: Feed<'a>,
}

#[derive(Debug, Clone)]
pub struct SceneRegistry {
    scenes: Vec<BroadcastScene>,
    active_scene_id: String,
    preview_scene_id: String,
}

impl SceneRegistry {
    /// Default scenes, starting on "scene_start" with "scene_talk" in preview
    pub fn new() -> Self {
        Self::with_scenes(default_scenes(), "scene_start", "scene_talk")
    }

    pub fn with_scenes(scenes: Vec<BroadcastScene>, active_scene_id: &str, preview_scene_id: &str) -> Self {
        Self {
            scenes,
            active_scene_id: active_scene_id.to_string(),
            preview_scene_id: preview_scene_id.to_string(),
        }
    }

    pub fn scenes(&self) -> &[BroadcastScene] {
        &self.scenes
    }

    pub fn get(&self, id: &str) -> Option<&BroadcastScene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn active_scene_id(&self) -> &str {
        &self.active_scene_id
    }

    pub fn preview_scene_id(&self) -> &str {
        &self.preview_scene_id
    }

    pub fn set_active_scene_id(&mut self, id: &str) {
        self.active_scene_id = id.to_string();
    }

    pub fn set_preview_scene_id(&mut self, id: &str) {
        self.preview_scene_id = id.to_string();
    }

    /// Add a scene; an existing scene with the same id is replaced
    pub fn add_scene(&mut self, scene: BroadcastScene) {
        match self.scenes.iter_mut().find(|s| s.id == scene.id) {
            Some(existing) => *existing = scene,
            None => self.scenes.push(scene),
        }
    }

    /// Remove a scene. Cursors pointing at it are left alone.
    pub fn remove_scene(&mut self, id: &str) -> Option<BroadcastScene> {
        let pos = self.scenes.iter().position(|s| s.id == id)?;
        Some(self.scenes.remove(pos))
    }

    fn scene_mut(&mut self, scene_id: &str) -> Result<&mut BroadcastScene, SceneEditError> {
        self.scenes
            .iter_mut()
            .find(|s| s.id == scene_id)
            .ok_or_else(|| SceneEditError::UnknownScene(scene_id.to_string()))
    }

    /// Place a source on top of a scene
    pub fn add_item(
        &mut self,
        scene_id: &str,
        source_id: &str,
        x: f32,
        y: f32,
        scale: f32,
    ) -> Result<String, SceneEditError> {
        let scene = self.scene_mut(scene_id)?;
        Ok(scene.add_item(source_id, x, y, scale))
    }

    /// Reposition an item. Locked items are rejected.
    pub fn move_item(
        &mut self,
        scene_id: &str,
        item_id: &str,
        x: f32,
        y: f32,
        scale: f32,
    ) -> Result<(), SceneEditError> {
        let item = self
            .scene_mut(scene_id)?
            .item_mut(item_id)
            .ok_or_else(|| SceneEditError::UnknownItem(item_id.to_string()))?;
        if item.locked {
            return Err(SceneEditError::Locked(item_id.to_string()));
        }
        item.transform.x = x;
        item.transform.y = y;
        item.transform.scale = scale;
        Ok(())
    }

    pub fn set_item_visible(&mut self, scene_id: &str, item_id: &str, visible: bool) -> Result<(), SceneEditError> {
        let item = self
            .scene_mut(scene_id)?
            .item_mut(item_id)
            .ok_or_else(|| SceneEditError::UnknownItem(item_id.to_string()))?;
        item.visible = visible;
        Ok(())
    }

    pub fn set_item_locked(&mut self, scene_id: &str, item_id: &str, locked: bool) -> Result<(), SceneEditError> {
        let item = self
            .scene_mut(scene_id)?
            .item_mut(item_id)
            .ok_or_else(|| SceneEditError::UnknownItem(item_id.to_string()))?;
        item.locked = locked;
        Ok(())
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible items of a scene in paint order, each paired with its live source
/// or NO SIGNAL when the source is unknown or has lost its signal.
pub fn resolve_items<'a>(scene: &'a BroadcastScene, sources: &'a SourceRegistry) -> Vec<ResolvedItem<'a>> {
    scene
        .sorted_items()
        .into_iter()
        .filter(|item| item.visible)
        .map(|item| {
            let feed = match sources.get(&item.source_id) {
                Some(source) if source.status.has_signal() => Feed::Live(source),
                _ => Feed::NoSignal,
            };
            ResolvedItem { item, feed }
        })
        .collect()
}
