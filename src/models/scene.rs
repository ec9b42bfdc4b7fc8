// Scene Model
// Named compositions of sources with normalized placement and paint order

use serde::{Deserialize, Serialize};

/// How a scene is composed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneComposition {
    Media,
    Composite,
    Pip,
}

/// BroadcastScene - a named composition of one or more sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastScene {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub composition: SceneComposition,
    /// Items in this scene (paint order is by z_index, not position)
    #[serde(default)]
    pub items: Vec<BroadcastSceneItem>,
}

impl BroadcastScene {
    /// Create an empty scene with a generated id
    pub fn new(name: &str, composition: SceneComposition) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            composition,
            items: Vec::new(),
        }
    }

    /// Items sorted by z_index (lowest first = painted first).
    /// Equal z_index keeps insertion order.
    pub fn sorted_items(&self) -> Vec<&BroadcastSceneItem> {
        let mut sorted: Vec<_> = self.items.iter().collect();
        sorted.sort_by_key(|item| item.transform.z_index);
        sorted
    }

    /// Add an item on top of the current stack, returning its id
    pub fn add_item(&mut self, source_id: &str, x: f32, y: f32, scale: f32) -> String {
        let item_id = uuid::Uuid::new_v4().to_string();
        let z_index = self
            .items
            .iter()
            .map(|i| i.transform.z_index)
            .max()
            .map_or(0, |z| z + 1);

        self.items.push(BroadcastSceneItem {
            id: item_id.clone(),
            source_id: source_id.to_string(),
            transform: ItemTransform { x, y, scale, z_index },
            visible: true,
            locked: false,
        });

        item_id
    }

    pub fn remove_item(&mut self, item_id: &str) -> Option<BroadcastSceneItem> {
        let pos = self.items.iter().position(|i| i.id == item_id)?;
        Some(self.items.remove(pos))
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut BroadcastSceneItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Whether any item references the given source
    pub fn uses_source(&self, source_id: &str) -> bool {
        self.items.iter().any(|i| i.source_id == source_id)
    }
}

/// BroadcastSceneItem - one source placed inside a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSceneItem {
    pub id: String,
    pub source_id: String,
    pub transform: ItemTransform,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Locked items cannot be repositioned interactively
    #[serde(default)]
    pub locked: bool,
}

fn default_true() -> bool {
    true
}

/// Normalized placement: x/y in 0.0-1.0 of the canvas, scale 1.0 = fullscreen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTransform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    #[serde(default)]
    pub z_index: i32,
}

impl ItemTransform {
    pub fn fullscreen() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0, z_index: 0 }
    }
}

fn item(id: &str, source_id: &str, transform: ItemTransform, locked: bool) -> BroadcastSceneItem {
    BroadcastSceneItem {
        id: id.to_string(),
        source_id: source_id.to_string(),
        transform,
        visible: true,
        locked,
    }
}

/// Scenes available on first start
pub fn default_scenes() -> Vec<BroadcastScene> {
    vec![
        BroadcastScene {
            id: "scene_start".to_string(),
            name: "Starting Soon".to_string(),
            composition: SceneComposition::Media,
            items: vec![item("i1", "media1", ItemTransform::fullscreen(), true)],
        },
        BroadcastScene {
            id: "scene_talk".to_string(),
            name: "Just Chatting".to_string(),
            composition: SceneComposition::Composite,
            items: vec![
                item("i2", "cam1", ItemTransform::fullscreen(), true),
                item("i3", "cam3", ItemTransform { x: 0.7, y: 0.7, scale: 0.25, z_index: 1 }, false),
            ],
        },
        BroadcastScene {
            id: "scene_game".to_string(),
            name: "Gameplay".to_string(),
            composition: SceneComposition::Pip,
            items: vec![
                item("i4", "media1", ItemTransform::fullscreen(), true),
                item("i5", "cam1", ItemTransform { x: 0.02, y: 0.75, scale: 0.2, z_index: 1 }, false),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_items_paint_lowest_first() {
        let mut scene = BroadcastScene::new("Test", SceneComposition::Composite);
        scene.items.push(item("top", "cam2", ItemTransform { x: 0.0, y: 0.0, scale: 0.5, z_index: 5 }, false));
        scene.items.push(item("bottom", "cam1", ItemTransform::fullscreen(), false));
        scene.items.push(item("mid", "cam3", ItemTransform { x: 0.5, y: 0.5, scale: 0.3, z_index: 2 }, false));

        let order: Vec<_> = scene.sorted_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["bottom", "mid", "top"]);
    }

    #[test]
    fn test_equal_z_keeps_insertion_order() {
        let mut scene = BroadcastScene::new("Ties", SceneComposition::Composite);
        scene.items.push(item("a", "cam1", ItemTransform::fullscreen(), false));
        scene.items.push(item("b", "cam2", ItemTransform::fullscreen(), false));

        let order: Vec<_> = scene.sorted_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_add_item_goes_on_top() {
        let mut scene = default_scenes().remove(1);
        let id = scene.add_item("cam2", 0.1, 0.1, 0.3);
        let added = scene.items.iter().find(|i| i.id == id).unwrap();
        assert_eq!(added.transform.z_index, 2);
        assert!(added.visible);
        assert!(!added.locked);

        let mut empty = BroadcastScene::new("Empty", SceneComposition::Media);
        let first = empty.add_item("cam1", 0.0, 0.0, 1.0);
        assert_eq!(empty.items[0].id, first);
        assert_eq!(empty.items[0].transform.z_index, 0);
    }

    #[test]
    fn test_scene_wire_format() {
        let value = serde_json::to_value(&default_scenes()[1]).unwrap();
        assert_eq!(value["type"], "COMPOSITE");
        assert_eq!(value["items"][1]["sourceId"], "cam3");
        assert_eq!(value["items"][1]["transform"]["zIndex"], 1);
    }
}
