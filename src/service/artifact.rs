use parking_lot::Mutex;
use thiserror::Error;

use crate::optimize::OptimizedDesign;
use crate::support::mesh::Mesh;

/// Error reported by an [`ArtifactSink`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("artifact sink failed: {0}")]
pub struct ArtifactError(pub String);

/// Receives the outputs of a run.
///
/// Exporters to mesh or CAD formats implement this; the returned reference is
/// forwarded to listeners in the completion event.
pub trait ArtifactSink: Send + Sync {
    /// Stores the final design and its mesh, returning a reference to them.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] if the artifact could not be stored.
    fn store(&self, design: &OptimizedDesign, mesh: &Mesh) -> Result<String, ArtifactError>;

    /// Whether [`ArtifactSink::live`] should be called each iteration.
    ///
    /// Building a mesh per iteration is not free, so this defaults to `false`.
    fn wants_live_mesh(&self) -> bool {
        false
    }

    /// Receives the mesh of the best design so far.
    fn live(&self, _iteration: usize, _mesh: &Mesh) {}
}

/// Keeps artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    stored: Mutex<Vec<(OptimizedDesign, Mesh)>>,
    live: Option<Mutex<Option<(usize, Mesh)>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also records the latest live mesh.
    #[must_use]
    pub fn with_live_mesh() -> Self {
        Self {
            stored: Mutex::default(),
            live: Some(Mutex::default()),
        }
    }

    /// Designs stored so far, oldest first.
    #[must_use]
    pub fn designs(&self) -> Vec<OptimizedDesign> {
        self.stored.lock().iter().map(|(design, _)| *design).collect()
    }

    /// The mesh stored under `artifact_ref`.
    #[must_use]
    pub fn mesh(&self, artifact_ref: &str) -> Option<Mesh> {
        let index: usize = artifact_ref.strip_prefix("memory://")?.parse().ok()?;
        self.stored.lock().get(index).map(|(_, mesh)| mesh.clone())
    }

    /// Iteration and triangle count of the latest live mesh.
    #[must_use]
    pub fn latest_live(&self) -> Option<(usize, usize)> {
        let live = self.live.as_ref()?.lock();
        live.as_ref()
            .map(|(iteration, mesh)| (*iteration, mesh.triangle_count()))
    }
}

impl ArtifactSink for MemorySink {
    fn store(&self, design: &OptimizedDesign, mesh: &Mesh) -> Result<String, ArtifactError> {
        let mut stored = self.stored.lock();
        stored.push((*design, mesh.clone()));
        Ok(format!("memory://{}", stored.len() - 1))
    }

    fn wants_live_mesh(&self) -> bool {
        self.live.is_some()
    }

    fn live(&self, iteration: usize, mesh: &Mesh) {
        if let Some(live) = &self.live {
            *live.lock() = Some((iteration, mesh.clone()));
        }
    }
}
