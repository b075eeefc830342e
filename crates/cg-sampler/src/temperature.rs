use crate::stage::LogitStage;

/// Scales all logits by dividing by a temperature value.
///
/// A temperature of zero selects greedy decoding later on, so the row is left
/// unscaled (divided by 1) to keep the argmax well-defined.
pub struct Temperature {
    temperature: f32,
}

impl Temperature {
    pub fn new(temperature: f32) -> Self {
        Self { temperature }
    }

    fn divisor(&self) -> f32 {
        if self.temperature > 0.0 {
            self.temperature
        } else {
            1.0
        }
    }
}

impl LogitStage for Temperature {
    fn name(&self) -> &str {
        "temperature"
    }

    fn apply(&self, mut logits: Vec<f32>) -> Vec<f32> {
        let t = self.divisor();
        if t != 1.0 {
            for v in logits.iter_mut() {
                *v /= t;
            }
        }
        logits
    }
}
