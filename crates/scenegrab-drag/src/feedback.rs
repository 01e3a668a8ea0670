use serde::{Deserialize, Serialize};

use crate::controller::InteractionMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorFeedback {
    #[default]
    Default,
    Grab,
    Grabbing,
}

impl CursorFeedback {
    pub fn from_mode(mode: InteractionMode) -> Self {
        match mode {
            InteractionMode::Idle => Self::Default,
            InteractionMode::Hovering => Self::Grab,
            InteractionMode::Dragging => Self::Grabbing,
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            Self::Default => "auto",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_mode_has_its_cursor() {
        assert_eq!(CursorFeedback::from_mode(InteractionMode::Idle).css_name(), "auto");
        assert_eq!(CursorFeedback::from_mode(InteractionMode::Hovering).css_name(), "grab");
        assert_eq!(CursorFeedback::from_mode(InteractionMode::Dragging).css_name(), "grabbing");
    }
}
