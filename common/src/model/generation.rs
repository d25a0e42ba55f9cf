use serde::{Deserialize, Serialize};

/// Progress of the template-generation call as shown by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Generating,
    Success,
    Error,
}
