//! Scene manifests.
//!
//! A manifest is a JSON document describing one scene: the collection
//! hierarchy with its objects, which collections are selected for rendering,
//! view-layer exclusion, and the render context options.
//!
//! ```json
//! {
//!   "main_collection": "Shots",
//!   "filename_prefix": "shot_",
//!   "render": { "output_path": "//renders/", "resolution_percentage": 50 },
//!   "collections": [
//!     { "name": "Shots", "children": [
//!         { "name": "Kitchen", "selected": true, "exclude": true,
//!           "objects": [{ "name": "CamKitchen", "kind": "camera" }] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Collections under `collections` are linked below the scene's master
//! collection; those under `orphans` exist in the scene but are not part of
//! the view layer. Names must be unique across both. An object name used in
//! several collections links the same object into each of them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use subrender_core::{CollectionKey, Result, SubrenderError};
use subrender_render::{
    FileNaming, MAX_RESOLUTION, MAX_RESOLUTION_PERCENTAGE, RenderContext, RenderSettings,
};
use subrender_scene::{ObjectKind, Scene};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    /// Base directory for `//` output paths. Defaults to the manifest's directory
    /// when loaded from a file.
    pub project_dir: Option<PathBuf>,
    pub filename_prefix: Option<String>,
    pub filename_suffix: Option<String>,
    pub main_collection: Option<String>,
    pub active_camera: Option<String>,
    pub render: RenderSettings,
    pub collections: Vec<CollectionManifest>,
    pub orphans: Vec<CollectionManifest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionManifest {
    pub name: String,
    pub selected: bool,
    pub exclude: bool,
    pub objects: Vec<ObjectManifest>,
    pub children: Vec<CollectionManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectManifest {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
}

impl SceneManifest {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| SubrenderError::Manifest(err.to_string()))
    }

    /// Reads a manifest file. A relative or missing `project_dir` is taken
    /// relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_json_str(&json)?;

        let manifest_dir = path.parent().unwrap_or_else(|| Path::new(""));
        manifest.project_dir = Some(match manifest.project_dir.take() {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => manifest_dir.join(dir),
            None => manifest_dir.to_path_buf(),
        });

        log::debug!("Loaded manifest {}", path.display());
        Ok(manifest)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| SubrenderError::Manifest(err.to_string()))
    }

    /// Builds the scene and the render context this manifest describes.
    pub fn build(&self) -> Result<(Scene, RenderContext)> {
        if !self.render.resolution_in_range() {
            return Err(SubrenderError::Manifest(format!(
                "resolution {}x{} at {}% is out of range (1..={MAX_RESOLUTION} per axis, 1..={MAX_RESOLUTION_PERCENTAGE}%)",
                self.render.resolution_x, self.render.resolution_y, self.render.resolution_percentage
            )));
        }

        let mut scene = Scene::new();
        let master = scene.master_collection();

        for collection in &self.collections {
            Self::add_tree(&mut scene, collection, Some(master))?;
        }
        for collection in &self.orphans {
            Self::add_tree(&mut scene, collection, None)?;
        }

        scene.main_collection = self
            .main_collection
            .as_deref()
            .map(|name| {
                scene.find_collection_by_name(name).ok_or_else(|| {
                    SubrenderError::Manifest(format!("main collection '{name}' does not exist"))
                })
            })
            .transpose()?;

        let active_camera = self
            .active_camera
            .as_deref()
            .map(|name| {
                scene.find_object_by_name(name).ok_or_else(|| {
                    SubrenderError::Manifest(format!("active camera '{name}' does not exist"))
                })
            })
            .transpose()?;

        let ctx = RenderContext {
            settings: self.render.clone(),
            active_camera,
            naming: FileNaming {
                prefix: self.filename_prefix.clone(),
                suffix: self.filename_suffix.clone(),
            },
            project_dir: self.project_dir.clone(),
        };

        Ok((scene, ctx))
    }

    fn add_tree(
        scene: &mut Scene,
        manifest: &CollectionManifest,
        parent: Option<CollectionKey>,
    ) -> Result<CollectionKey> {
        if manifest.name.is_empty() {
            return Err(SubrenderError::Manifest("collection without a name".to_string()));
        }
        if scene.find_collection_by_name(&manifest.name).is_some() {
            return Err(SubrenderError::Manifest(format!(
                "duplicate collection name '{}'",
                manifest.name
            )));
        }

        let key = match parent {
            Some(parent) => scene.add_collection(manifest.name.clone(), parent)?,
            None => scene.create_collection(manifest.name.clone()),
        };
        scene.set_render_selected(key, manifest.selected)?;

        for object in &manifest.objects {
            match scene.find_object_by_name(&object.name) {
                Some(existing) => {
                    let kind = scene.get_object(existing).map(|o| o.kind);
                    if kind != Some(object.kind) {
                        return Err(SubrenderError::Manifest(format!(
                            "object '{}' is listed with different kinds",
                            object.name
                        )));
                    }
                    scene.link_object(key, existing)?;
                }
                None => {
                    scene.add_object(key, object.name.clone(), object.kind)?;
                }
            }
        }

        for child in &manifest.children {
            Self::add_tree(scene, child, Some(key))?;
        }

        if manifest.exclude {
            if scene.view_node_for(key).is_some() {
                scene.view_layer_mut().set_exclude(key, true)?;
            } else {
                log::warn!(
                    "Collection '{}' is not in the view layer; ignoring exclude",
                    manifest.name
                );
            }
        }

        Ok(key)
    }
}
