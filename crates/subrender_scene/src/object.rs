use serde::{Deserialize, Serialize};

/// What an object is. Only [`ObjectKind::Camera`] objects are ever rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Camera,
    Mesh,
    Light,
    #[default]
    Empty,
}

/// An object in the scene's object pool.
///
/// Collections only hold [`ObjectKey`](crate::ObjectKey)s into the pool, so the
/// same object may be linked into several collections.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Unique object name, also used as the base of output file names.
    pub name: String,
    pub kind: ObjectKind,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Camera)
    }

    #[inline]
    #[must_use]
    pub fn is_camera(&self) -> bool {
        self.kind == ObjectKind::Camera
    }
}
