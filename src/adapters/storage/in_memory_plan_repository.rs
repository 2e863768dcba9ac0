//! In-Memory Plan Repository
//!
//! Keeps the most recent response plans for the lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::emergency::EmergencyResponsePlan;
use crate::ports::{PlanRepository, PlanStoreError};

/// Plans kept before the oldest activation is evicted.
pub const DEFAULT_PLAN_CAPACITY: usize = 500;

/// In-memory storage for response plans
#[derive(Debug, Clone)]
pub struct InMemoryPlanRepository {
    plans: Arc<RwLock<HashMap<String, EmergencyResponsePlan>>>,
    capacity: usize,
}

impl Default for InMemoryPlanRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PLAN_CAPACITY)
    }
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding at most `capacity` plans (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            plans: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Get the number of stored plans
    pub async fn plan_count(&self) -> usize {
        self.plans.read().await.len()
    }
}

/// Id of the plan `list` would return last.
fn oldest_plan_id(plans: &HashMap<String, EmergencyResponsePlan>) -> Option<String> {
    plans
        .values()
        .min_by(|a, b| {
            a.activation_time
                .cmp(&b.activation_time)
                .then_with(|| b.plan_id.cmp(&a.plan_id))
        })
        .map(|plan| plan.plan_id.clone())
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn save(&self, plan: &EmergencyResponsePlan) -> Result<(), PlanStoreError> {
        let mut plans = self.plans.write().await;
        plans.insert(plan.plan_id.clone(), plan.clone());
        while plans.len() > self.capacity {
            let Some(oldest) = oldest_plan_id(&plans) else {
                break;
            };
            tracing::debug!(plan_id = %oldest, "evicting oldest stored plan");
            plans.remove(&oldest);
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        plan_id: &str,
    ) -> Result<Option<EmergencyResponsePlan>, PlanStoreError> {
        let plans = self.plans.read().await;
        Ok(plans.get(plan_id).cloned())
    }

    async fn list(&self) -> Result<Vec<EmergencyResponsePlan>, PlanStoreError> {
        let plans = self.plans.read().await;
        let mut all: Vec<_> = plans.values().cloned().collect();
        all.sort_by(|a, b| {
            b.activation_time
                .cmp(&a.activation_time)
                .then_with(|| a.plan_id.cmp(&b.plan_id))
        });
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emergency::{
        EmergencyScenario, EmergencyType, ResponsePlanner, ScenarioAnalyzer, SeverityLevel,
    };
    use crate::domain::foundation::Timestamp;

    fn plan(id: &str, activation: Timestamp) -> EmergencyResponsePlan {
        let scenario = EmergencyScenario::new(
            id,
            EmergencyType::Fire,
            SeverityLevel::High,
            "Oakland Hills, CA",
            2.0,
            5_000,
        )
        .unwrap();
        let assessment = ScenarioAnalyzer::assess(&scenario, None);
        ResponsePlanner::generate_plan(&scenario, &assessment, activation)
    }

    #[tokio::test]
    async fn save_and_find() {
        let repo = InMemoryPlanRepository::new();
        let p = plan("scn_a", Timestamp::now());
        repo.save(&p).await.unwrap();

        let found = repo.find_by_id(&p.plan_id).await.unwrap();
        assert_eq!(found, Some(p));
        assert!(repo.find_by_id("plan_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_same_id() {
        let repo = InMemoryPlanRepository::new();
        let p = plan("scn_a", Timestamp::now());
        repo.save(&p).await.unwrap();
        repo.save(&p).await.unwrap();
        assert_eq!(repo.plan_count().await, 1);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryPlanRepository::new();
        let now = Timestamp::now();
        let older = plan("scn_old", now.plus_hours(-2).unwrap());
        let newer = plan("scn_new", now);
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed[0].plan_id, newer.plan_id);
        assert_eq!(listed[1].plan_id, older.plan_id);
    }

    #[tokio::test]
    async fn oldest_plans_are_evicted_at_capacity() {
        let repo = InMemoryPlanRepository::with_capacity(2);
        let now = Timestamp::now();
        let oldest = plan("scn_1", now.plus_hours(-3).unwrap());
        let middle = plan("scn_2", now.plus_hours(-2).unwrap());
        let newest = plan("scn_3", now);
        repo.save(&middle).await.unwrap();
        repo.save(&oldest).await.unwrap();
        repo.save(&newest).await.unwrap();

        assert_eq!(repo.plan_count().await, 2);
        assert!(repo.find_by_id(&oldest.plan_id).await.unwrap().is_none());
        let ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.plan_id).collect();
        assert_eq!(ids, vec![newest.plan_id, middle.plan_id]);
    }

    #[tokio::test]
    async fn replacing_a_plan_at_capacity_keeps_the_rest() {
        let repo = InMemoryPlanRepository::with_capacity(2);
        let now = Timestamp::now();
        let older = plan("scn_old", now.plus_hours(-1).unwrap());
        let newer = plan("scn_new", now);
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();
        repo.save(&older).await.unwrap();
        assert_eq!(repo.plan_count().await, 2);
    }
}
