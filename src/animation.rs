//! Animation view notified when an ability starts.

/// Animation played by an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationClip {
    /// Ground locomotion.
    Walk,
    /// Rising after take-off.
    Jump,
    /// Falling without ground contact.
    Fall,
}

/// Fire-and-forget animation notifications.
#[cfg_attr(test, mockall::automock)]
pub trait AnimationView {
    /// Starts `clip`; the view decides how to blend into it.
    fn start_animation(&mut self, clip: AnimationClip);
}

/// View that records which clips were started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationLog {
    started: Vec<AnimationClip>,
}

impl AnimationLog {
    /// Clips started so far, oldest first.
    #[must_use]
    pub fn started(&self) -> &[AnimationClip] {
        &self.started
    }

    /// Most recently started clip.
    #[must_use]
    pub fn current(&self) -> Option<AnimationClip> {
        self.started.last().copied()
    }
}

impl AnimationView for AnimationLog {
    fn start_animation(&mut self, clip: AnimationClip) {
        self.started.push(clip);
    }
}
