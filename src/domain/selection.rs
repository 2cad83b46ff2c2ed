// Active series selection shared by both season panels
use super::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    active: usize,
    count: usize,
}

impl SelectionState {
    pub fn new(active: usize, count: usize) -> Result<Self> {
        if active >= count {
            return Err(DashboardError::SelectionOutOfRange {
                index: active,
                count,
            });
        }
        Ok(Self { active, count })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_base_index(&self, index: usize) -> bool {
        index < self.count
    }

    /// Moves the selection; indices past the base series are refused.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.is_base_index(index) {
            return false;
        }
        self.active = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_index_must_fit() {
        assert!(SelectionState::new(5, 7).is_ok());
        assert_eq!(
            SelectionState::new(5, 4),
            Err(DashboardError::SelectionOutOfRange { index: 5, count: 4 })
        );
        assert!(SelectionState::new(0, 0).is_err());
    }

    #[test]
    fn test_select_refuses_overlay_indices() {
        let mut state = SelectionState::new(1, 3).unwrap();
        assert!(state.select(2));
        assert_eq!(state.active(), 2);
        assert!(!state.select(3));
        assert_eq!(state.active(), 2);
    }
}
