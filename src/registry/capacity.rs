//! Capacity governor - hard ceiling on live props
//!
//! Only props are governed. Reaching the ceiling is a refusal the user sees;
//! nothing is evicted and the placement is never retried.

use crate::constants;
use crate::error::{EditorError, EditorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityGovernor {
    pub max_props: usize,
}

impl Default for CapacityGovernor {
    fn default() -> Self {
        Self {
            max_props: constants::registry::MAX_OBJECTS,
        }
    }
}

impl CapacityGovernor {
    pub fn new(max_props: usize) -> Self {
        Self { max_props }
    }

    /// Refuse once `prop_count` has reached the ceiling
    pub fn check_prop_capacity(&self, prop_count: usize) -> EditorResult<()> {
        if prop_count >= self.max_props {
            return Err(EditorError::CapacityExceeded {
                limit: self.max_props,
            });
        }
        Ok(())
    }
}
