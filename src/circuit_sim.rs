pub type Passes = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResult {
    Converged { passes: Passes },
    ReachedMaxPasses { max_passes: Passes },
}

impl RunResult {
    pub fn converged(self) -> bool {
        matches!(self, RunResult::Converged { .. })
    }
}

/// How many passes [`crate::Circuit::simulate`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PassLimit {
    /// One pass per registered element.
    #[default]
    ElementCount,
    Fixed(Passes),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimConfig {
    pub passes: PassLimit,
}

impl SimConfig {
    pub fn passes_for(&self, num_elements: usize) -> Passes {
        match self.passes {
            PassLimit::ElementCount => num_elements as Passes,
            PassLimit::Fixed(passes) => passes,
        }
    }
}
