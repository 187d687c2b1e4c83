use cbie_core::errors::CbieResult;
use cbie_core::models::{BehaviorProfile, LegacyBehaviorRecord, Prompt};
use cbie_core::traits::IDocumentStore;
use dashmap::DashMap;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    prompts: DashMap<String, Prompt>,
    profiles: DashMap<String, BehaviorProfile>,
    legacy: DashMap<String, LegacyBehaviorRecord>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

impl IDocumentStore for InMemoryDocumentStore {
    fn put_prompt(&self, prompt: &Prompt) -> CbieResult<()> {
        self.prompts.insert(prompt.prompt_id.clone(), prompt.clone());
        Ok(())
    }

    fn get_prompt(&self, prompt_id: &str) -> CbieResult<Option<Prompt>> {
        Ok(self.prompts.get(prompt_id).map(|p| p.clone()))
    }

    fn prompts_for_user(&self, user_id: &str) -> CbieResult<Vec<Prompt>> {
        let mut prompts: Vec<Prompt> = self
            .prompts
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user_id))
            .map(|p| p.clone())
            .collect();
        prompts.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.prompt_id.cmp(&b.prompt_id)));
        Ok(prompts)
    }

    fn put_profile(&self, profile: &BehaviorProfile) -> CbieResult<()> {
        self.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    fn get_profile(&self, user_id: &str) -> CbieResult<Option<BehaviorProfile>> {
        Ok(self.profiles.get(user_id).map(|p| p.clone()))
    }

    fn put_legacy_behavior(&self, record: &LegacyBehaviorRecord) -> CbieResult<()> {
        self.legacy.insert(record.behavior_id.clone(), record.clone());
        Ok(())
    }

    fn get_legacy_behavior(&self, behavior_id: &str) -> CbieResult<Option<LegacyBehaviorRecord>> {
        Ok(self.legacy.get(behavior_id).map(|r| r.clone()))
    }

    fn legacy_behaviors_for_user(&self, user_id: &str) -> CbieResult<Vec<LegacyBehaviorRecord>> {
        let mut records: Vec<LegacyBehaviorRecord> = self
            .legacy
            .iter()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .map(|r| r.clone())
            .collect();
        records.sort_by(|a, b| a.behavior_id.cmp(&b.behavior_id));
        Ok(records)
    }
}
