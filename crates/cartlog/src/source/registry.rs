use std::collections::BTreeSet;

use serde::Serialize;

/// Distinct pids seen in a log file, in ascending order.
///
/// Filled once by the initial scan and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PidRegistry {
    pids: Vec<u32>,
}

impl PidRegistry {
    pub fn as_slice(&self) -> &[u32] {
        &self.pids
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.pids.binary_search(&pid).is_ok()
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }
}

impl From<BTreeSet<u32>> for PidRegistry {
    fn from(set: BTreeSet<u32>) -> Self {
        Self {
            pids: set.into_iter().collect(),
        }
    }
}

impl FromIterator<u32> for PidRegistry {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeSet<u32>>().into()
    }
}
