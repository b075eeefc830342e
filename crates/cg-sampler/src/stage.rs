/// A transform over one lane's logit row.
///
/// Stages take ownership of the row and hand it back, so no stage can observe
/// a buffer another stage is still working on.
pub trait LogitStage: Send + Sync {
    /// Returns the name of this stage.
    fn name(&self) -> &str;

    /// Transform the row and return it.
    fn apply(&self, logits: Vec<f32>) -> Vec<f32>;
}

/// Composes multiple stages into a pipeline applied in insertion order.
pub struct StageChain {
    stages: Vec<Box<dyn LogitStage>>,
}

impl StageChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Add a stage to the end of the chain. Returns self for builder-style usage.
    pub fn with(mut self, stage: Box<dyn LogitStage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Names of the stages in application order.
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order on the row.
    pub fn apply(&self, logits: Vec<f32>) -> Vec<f32> {
        self.stages
            .iter()
            .fold(logits, |row, stage| stage.apply(row))
    }
}

impl Default for StageChain {
    fn default() -> Self {
        Self::new()
    }
}
