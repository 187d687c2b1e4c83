use cbie_core::models::{Observation, Prompt};

/// Unit vector on `axis` with `wobble` on the next axis.
///
/// Vectors on the same axis cluster; vectors on different axes are
/// orthogonal and never do.
pub fn axis_vector(dims: usize, axis: usize, wobble: f32) -> Vec<f32> {
    let mut v = vec![0.0; dims];
    v[axis % dims] = 1.0;
    v[(axis + 1) % dims] = wobble;
    v
}

/// Fluent observation builder with high-quality defaults.
pub struct ObservationBuilder {
    obs: Observation,
}

impl ObservationBuilder {
    pub fn new(id: &str, text: &str, timestamp: i64) -> Self {
        Self {
            obs: Observation::new(id, text, timestamp, format!("prompt-{id}"))
                .with_scores(0.9, 0.9, 0.9),
        }
    }

    pub fn scores(mut self, credibility: f64, clarity: f64, confidence: f64) -> Self {
        self.obs = self.obs.with_scores(credibility, clarity, confidence);
        self
    }

    pub fn clarity(mut self, clarity: f64) -> Self {
        self.obs.clarity = clarity;
        self
    }

    pub fn embedding(mut self, embedding: Vec<f32>) -> Self {
        self.obs = self.obs.with_embedding(embedding);
        self
    }

    pub fn prompt(mut self, prompt_id: &str) -> Self {
        self.obs.prompt_id = prompt_id.to_string();
        self
    }

    pub fn user(mut self, user_id: &str) -> Self {
        self.obs = self.obs.with_user(user_id);
        self
    }

    pub fn build(self) -> Observation {
        self.obs
    }
}

/// One prompt per observation, stamped like the observation.
pub fn prompts_for(observations: &[Observation]) -> Vec<Prompt> {
    observations
        .iter()
        .map(|o| {
            let mut p = Prompt::new(o.prompt_id.clone(), format!("prompt for {}", o.text), o.timestamp);
            p.user_id = o.user_id.clone();
            p
        })
        .collect()
}
