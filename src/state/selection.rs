use serde::{Deserialize, Serialize};

/// Highlighted row of each list screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub backups_index: usize,
    pub profiles_index: usize,
    pub history_index: usize,
}

/// Move a list cursor by one, wrapping at both ends.
pub fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// Keep a cursor inside a list that may have shrunk.
pub fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps() {
        assert_eq!(step(0, 3, false), 2);
        assert_eq!(step(2, 3, true), 0);
        assert_eq!(step(5, 0, true), 0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(4, 2), 1);
        assert_eq!(clamp(4, 0), 0);
        assert_eq!(clamp(1, 5), 1);
    }
}
