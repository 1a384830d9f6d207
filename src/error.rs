use std::fmt;

/// Which half of the projector could not be found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectorKind {
    Camera,
    UiRoot,
}

impl fmt::Display for ProjectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectorKind::Camera => write!(f, "camera"),
            ProjectorKind::UiRoot => write!(f, "UI root"),
        }
    }
}

/// Reasons an overlay activation attempt is abandoned.
///
/// Both end only the attempt in progress; the controller is back in
/// `Inactive` and can be activated again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("native overlay backend failed to initialize on monitor {monitor}")]
    BackendUnavailable { monitor: usize },
    #[error("no {0} available to project the overlay")]
    ProjectorMissing(ProjectorKind),
}
