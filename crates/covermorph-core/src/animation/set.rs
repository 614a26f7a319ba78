//! Animators played together.

use super::{Animator, AnimatorStatus};
use std::time::Duration;

/// A group of animators that start together and finish when the last one does.
#[derive(Debug, Default)]
pub struct AnimatorSet {
    children: Vec<Box<dyn Animator>>,
    running: bool,
}

impl AnimatorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an animator to play alongside the others.
    pub fn push(&mut self, animator: Box<dyn Animator>) {
        self.children.push(animator);
    }

    /// Add several animators.
    pub fn play_together(&mut self, animators: impl IntoIterator<Item = Box<dyn Animator>>) {
        self.children.extend(animators);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Animator for AnimatorSet {
    fn start(&mut self) {
        for child in &mut self.children {
            child.start();
        }
        self.running = true;
    }

    fn advance(&mut self, dt: Duration) -> AnimatorStatus {
        if !self.running {
            return AnimatorStatus::Idle;
        }
        for child in &mut self.children {
            child.advance(dt);
        }
        if self.children.iter().any(|c| c.is_running()) {
            AnimatorStatus::Running
        } else {
            self.running = false;
            AnimatorStatus::Finished
        }
    }

    fn cancel(&mut self) {
        for child in &mut self.children {
            child.cancel();
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn duration(&self) -> Option<Duration> {
        self.children
            .iter()
            .map(|c| c.duration())
            .try_fold(Duration::ZERO, |longest, d| d.map(|d| longest.max(d)))
    }
}
