//! Feed-related domain events

/// Outcome of toggling a like on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeChange {
    Liked { likes: usize },
    Unliked { likes: usize },
}

impl LikeChange {
    pub fn is_liked(self) -> bool {
        matches!(self, Self::Liked { .. })
    }
}
