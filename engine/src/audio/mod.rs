//! Audio Module
//!
//! The sound collaborator surface. Gameplay code requests sounds by id; the
//! host drains the queue after each frame and plays them however it likes.
//! Nothing here ever waits for playback.

/// Sounds the simulation can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Jump,
    WallJump,
    Dash,
    Death,
}

impl SoundId {
    /// Asset path relative to the sound directory.
    pub fn file_name(self) -> &'static str {
        match self {
            SoundId::Jump => "jump.wav",
            SoundId::WallJump => "wall_jump.wav",
            SoundId::Dash => "dash.wav",
            SoundId::Death => "death.wav",
        }
    }
}

/// FIFO of pending sound requests.
#[derive(Debug, Clone, Default)]
pub struct SoundQueue {
    pending: Vec<SoundId>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play_sound(&mut self, sound: SoundId) {
        self.pending.push(sound);
    }

    /// Requests made since the last drain, oldest first.
    #[inline]
    pub fn pending(&self) -> &[SoundId] {
        &self.pending
    }

    /// Take every pending request.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SoundId> {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = SoundQueue::new();
        queue.play_sound(SoundId::Jump);
        queue.play_sound(SoundId::Death);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![SoundId::Jump, SoundId::Death]);
        assert!(queue.is_empty());
    }
}
