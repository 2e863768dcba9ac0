//! Emergency response plans and the planner that builds them.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::assessment::ScenarioAssessment;
use super::scenario::{EmergencyScenario, EmergencyType};
use super::weather::ImpactLevel;
use crate::domain::foundation::{format_timedelta, Timestamp};

/// Resources committed to a plan, keyed by display name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceAllocation {
    #[serde(default)]
    pub personnel_deployment: BTreeMap<String, i64>,
    #[serde(default)]
    pub equipment_requirements: BTreeMap<String, i64>,
    #[serde(default)]
    pub facility_assignments: BTreeMap<String, String>,
    #[serde(default)]
    pub budget_allocation: BTreeMap<String, f64>,
}

impl ResourceAllocation {
    pub fn total_personnel(&self) -> i64 {
        self.personnel_deployment.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMilestone {
    pub milestone_name: String,
    pub estimated_time: Timestamp,
    pub responsible_agency: String,
    pub description: String,
}

/// A complete, coordinated response to one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyResponsePlan {
    pub plan_id: String,
    pub scenario: EmergencyScenario,
    pub immediate_actions: Vec<String>,
    pub short_term_actions: Vec<String>,
    pub long_term_recovery: Vec<String>,
    pub resource_allocation: ResourceAllocation,
    pub lead_agency: String,
    pub supporting_agencies: Vec<String>,
    pub communication_plan: BTreeMap<String, String>,
    pub activation_time: Timestamp,
    pub estimated_duration_hours: u32,
    pub success_criteria: Vec<String>,
    pub risk_factors: Vec<String>,
    pub mitigation_strategies: Vec<String>,
    pub timeline_milestones: Vec<TimelineMilestone>,
}

impl EmergencyResponsePlan {
    pub fn scenario_id(&self) -> &str {
        &self.scenario.scenario_id
    }

    pub fn estimated_duration(&self) -> Duration {
        Duration::hours(i64::from(self.estimated_duration_hours))
    }

    /// Duration rendered as `H:MM:SS`, prefixed with days when over a day.
    pub fn estimated_duration_display(&self) -> String {
        format_timedelta(self.estimated_duration())
    }
}

/// Builds plans from an assessment, one phase at a time.
pub struct ResponsePlanner;

impl ResponsePlanner {
    /// Phase two: actions, agencies and communications.
    pub fn generate_plan(
        scenario: &EmergencyScenario,
        assessment: &ScenarioAssessment,
        activation_time: Timestamp,
    ) -> EmergencyResponsePlan {
        let (risk_factors, mitigation_strategies) = match assessment
            .weather_impact
            .as_ref()
            .and_then(|w| w.impact())
        {
            Some(impact) => (impact.risk_factors.clone(), impact.recommendations.clone()),
            None => (Vec::new(), Vec::new()),
        };

        EmergencyResponsePlan {
            plan_id: format!("plan_{}_{}", scenario.scenario_id, activation_time.compact()),
            scenario: scenario.clone(),
            immediate_actions: Self::immediate_actions(scenario.incident_type),
            short_term_actions: Self::short_term_actions(assessment),
            long_term_recovery: Self::recovery_actions(),
            resource_allocation: ResourceAllocation::default(),
            lead_agency: Self::lead_agency(scenario.incident_type).to_string(),
            supporting_agencies: Self::supporting_agencies(scenario.incident_type),
            communication_plan: Self::communication_plan(),
            activation_time,
            estimated_duration_hours: assessment.timeline_estimates.total_response_hours,
            success_criteria: Self::success_criteria(),
            risk_factors,
            mitigation_strategies,
            timeline_milestones: Vec::new(),
        }
    }

    /// Phase three: split the estimated personnel and assign equipment.
    pub fn allocate_resources(plan: &mut EmergencyResponsePlan, assessment: &ScenarioAssessment) {
        let req = assessment.resource_requirements;
        let total = req.personnel;
        let first_responders = (total as f64 * 0.6).floor() as i64;
        let support_staff = (total as f64 * 0.3).floor() as i64;
        let command_staff = (total - first_responders - support_staff).max(5);

        let mut allocation = ResourceAllocation::default();
        allocation
            .personnel_deployment
            .insert("First Responders".into(), first_responders);
        allocation
            .personnel_deployment
            .insert("Support Staff".into(), support_staff);
        allocation
            .personnel_deployment
            .insert("Command Staff".into(), command_staff);

        allocation
            .equipment_requirements
            .insert("Emergency Vehicles".into(), req.vehicles);
        allocation
            .equipment_requirements
            .insert("Medical Units".into(), req.medical_units);
        allocation
            .equipment_requirements
            .insert("Communication Equipment".into(), req.communication_units);

        allocation.facility_assignments.insert(
            "Emergency Shelters".into(),
            format!("{} facilities", req.shelters),
        );
        allocation.facility_assignments.insert(
            "Command Posts".into(),
            "Primary and backup locations".into(),
        );
        allocation.facility_assignments.insert(
            "Medical Facilities".into(),
            "Hospital and field medical units".into(),
        );

        plan.resource_allocation = allocation;
    }

    /// Phase four: milestones relative to activation. Milestones whose time
    /// cannot be represented are left out.
    pub fn create_timeline(plan: &mut EmergencyResponsePlan) {
        let start = plan.activation_time;
        let steps = [
            (
                "Initial Response Deployed",
                Duration::zero(),
                "First responders on scene and initial perimeter set",
            ),
            (
                "Command Post Established",
                Duration::minutes(30),
                "Incident command operating with inter-agency liaison",
            ),
            (
                "Full Resource Deployment",
                Duration::hours(3),
                "All allocated personnel and equipment in position",
            ),
            (
                "Situation Assessment Complete",
                Duration::hours(5),
                "Damage, casualties and needs documented for the operational period",
            ),
            (
                "Response Transition to Recovery",
                plan.estimated_duration(),
                "Response operations hand over to recovery management",
            ),
        ];

        plan.timeline_milestones = steps
            .into_iter()
            .filter_map(|(name, offset, description)| {
                Some(TimelineMilestone {
                    milestone_name: name.to_string(),
                    estimated_time: start.plus(offset)?,
                    responsible_agency: plan.lead_agency.clone(),
                    description: description.to_string(),
                })
            })
            .collect();
    }

    pub fn lead_agency(kind: EmergencyType) -> &'static str {
        match kind {
            EmergencyType::Fire => "Fire Department",
            EmergencyType::PublicHealth => "Department of Health",
            EmergencyType::Hurricane => "Office of Emergency Management",
            EmergencyType::InfrastructureFailure => "Department of Transportation",
            EmergencyType::SecurityIncident => "Police Department",
            _ => "Office of Emergency Management",
        }
    }

    pub fn immediate_actions(kind: EmergencyType) -> Vec<String> {
        let mut actions = vec![
            "Activate Emergency Operations Center",
            "Deploy first responders to affected area",
            "Establish incident command post",
            "Assess immediate life safety threats",
        ];
        match kind {
            EmergencyType::Hurricane => actions.extend([
                "Issue evacuation orders for flood-prone areas",
                "Open emergency shelters",
                "Pre-position utility crews",
            ]),
            EmergencyType::Fire => actions.extend([
                "Establish fire perimeter",
                "Begin evacuation of immediate area",
                "Deploy fire suppression resources",
            ]),
            EmergencyType::PublicHealth => actions.extend([
                "Activate disease surveillance",
                "Implement contact tracing",
                "Coordinate with healthcare facilities",
            ]),
            _ => {}
        }
        actions.into_iter().map(String::from).collect()
    }

    pub fn short_term_actions(assessment: &ScenarioAssessment) -> Vec<String> {
        let mut actions: Vec<String> = [
            "Establish regular situation briefings",
            "Coordinate resource distribution",
            "Monitor and adjust response strategies",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let high_weather_impact = assessment
            .weather_impact
            .as_ref()
            .and_then(|w| w.impact())
            .is_some_and(|impact| impact.impact_level == ImpactLevel::High);
        if high_weather_impact {
            actions.push("Monitor weather conditions and adjust operations".to_string());
        }
        actions
    }

    pub fn recovery_actions() -> Vec<String> {
        [
            "Conduct damage assessment",
            "Coordinate infrastructure repairs",
            "Provide ongoing support to affected populations",
            "Document lessons learned",
            "Update emergency plans based on experience",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Core responders plus type-specific partners, first occurrence wins.
    pub fn supporting_agencies(kind: EmergencyType) -> Vec<String> {
        let extra: &[&str] = match kind {
            EmergencyType::PublicHealth => &["Department of Health", "Hospitals", "CDC"],
            EmergencyType::InfrastructureFailure => {
                &["Utility Companies", "Department of Transportation"]
            }
            EmergencyType::Hurricane => {
                &["National Weather Service", "Coast Guard", "Red Cross"]
            }
            _ => &[],
        };

        let mut agencies: Vec<String> = Vec::new();
        for agency in [
            "Police Department",
            "Fire Department",
            "Emergency Medical Services",
        ]
        .iter()
        .chain(extra)
        {
            if !agencies.iter().any(|a| a == agency) {
                agencies.push(agency.to_string());
            }
        }
        agencies
    }

    pub fn communication_plan() -> BTreeMap<String, String> {
        [
            (
                "public_information",
                "Regular press briefings and social media updates",
            ),
            (
                "inter_agency",
                "Secure radio network and incident command system",
            ),
            (
                "emergency_alerts",
                "Emergency Alert System and Wireless Emergency Alerts",
            ),
            ("media_relations", "Dedicated media liaison and press center"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    pub fn success_criteria() -> Vec<String> {
        [
            "All affected residents accounted for",
            "Critical services restored",
            "Shelter demand met for displaced residents",
            "No secondary incidents during response",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emergency::assessment::{ScenarioAnalyzer, WeatherAssessment};
    use crate::domain::emergency::scenario::SeverityLevel;
    use crate::domain::emergency::weather::{EvacuationDifficulty, WeatherImpact};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn scenario(kind: EmergencyType, pop: i64) -> EmergencyScenario {
        EmergencyScenario::new("scn", kind, SeverityLevel::High, "Queens", 4.0, pop).unwrap()
    }

    fn fixed_time() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
    }

    fn full_plan(s: &EmergencyScenario) -> EmergencyResponsePlan {
        let assessment = ScenarioAnalyzer::assess(s, None);
        let mut plan = ResponsePlanner::generate_plan(s, &assessment, fixed_time());
        ResponsePlanner::allocate_resources(&mut plan, &assessment);
        ResponsePlanner::create_timeline(&mut plan);
        plan
    }

    #[test]
    fn plan_id_embeds_scenario_and_activation_time() {
        let plan = full_plan(&scenario(EmergencyType::Flood, 1000));
        assert_eq!(plan.plan_id, "plan_scn_20250102_030405");
        assert_eq!(plan.scenario_id(), "scn");
    }

    #[test]
    fn hurricane_plan_has_typed_actions_and_agencies() {
        let plan = full_plan(&scenario(EmergencyType::Hurricane, 1000));
        assert_eq!(plan.lead_agency, "Office of Emergency Management");
        assert_eq!(plan.immediate_actions.len(), 7);
        assert!(plan.immediate_actions.contains(&"Open emergency shelters".to_string()));
        assert_eq!(plan.supporting_agencies.len(), 6);
        assert_eq!(plan.long_term_recovery.len(), 5);
    }

    #[test]
    fn supporting_agencies_do_not_repeat() {
        let agencies = ResponsePlanner::supporting_agencies(EmergencyType::InfrastructureFailure);
        assert_eq!(
            agencies,
            vec![
                "Police Department",
                "Fire Department",
                "Emergency Medical Services",
                "Utility Companies",
                "Department of Transportation"
            ]
        );
    }

    #[test]
    fn security_incident_led_by_police() {
        assert_eq!(
            ResponsePlanner::lead_agency(EmergencyType::SecurityIncident),
            "Police Department"
        );
        assert_eq!(
            ResponsePlanner::lead_agency(EmergencyType::Earthquake),
            "Office of Emergency Management"
        );
    }

    #[test]
    fn high_weather_impact_adds_monitoring_action() {
        let s = scenario(EmergencyType::Flood, 1000);
        let impact = WeatherImpact {
            impact_level: ImpactLevel::High,
            risk_factors: vec!["Low visibility conditions".into()],
            recommendations: vec!["Restrict non-essential travel".into()],
            evacuation_difficulty: EvacuationDifficulty::VeryDifficult,
        };
        let assessment = ScenarioAnalyzer::assess(&s, Some(WeatherAssessment::Impact(impact)));
        let plan = ResponsePlanner::generate_plan(&s, &assessment, fixed_time());
        assert_eq!(plan.short_term_actions.len(), 4);
        assert_eq!(plan.risk_factors, vec!["Low visibility conditions"]);
        assert_eq!(plan.mitigation_strategies, vec!["Restrict non-essential travel"]);
    }

    #[test]
    fn allocation_splits_personnel() {
        let plan = full_plan(&scenario(EmergencyType::Fire, 100_000));
        let p = &plan.resource_allocation.personnel_deployment;
        assert_eq!(p["First Responders"], 108);
        assert_eq!(p["Support Staff"], 54);
        assert_eq!(p["Command Staff"], 18);
        assert_eq!(
            plan.resource_allocation.facility_assignments["Emergency Shelters"],
            "100 facilities"
        );
    }

    #[test]
    fn timeline_has_five_ordered_milestones() {
        let plan = full_plan(&scenario(EmergencyType::Flood, 1000).with_duration_hours(48));
        let times: Vec<_> = plan
            .timeline_milestones
            .iter()
            .map(|m| m.estimated_time)
            .collect();
        assert_eq!(times.len(), 5);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(times[4].duration_since(&times[0]), Duration::hours(48));
        assert!(plan
            .timeline_milestones
            .iter()
            .all(|m| m.responsible_agency == plan.lead_agency));
    }

    #[test]
    fn timeline_skips_milestone_past_representable_time() {
        let plan = full_plan(&scenario(EmergencyType::Flood, 1000).with_duration_hours(u32::MAX));
        assert_eq!(plan.timeline_milestones.len(), 4);
        assert!(plan
            .timeline_milestones
            .iter()
            .all(|m| m.milestone_name != "Response Transition to Recovery"));
    }

    #[test]
    fn duration_display_matches_operator_format() {
        let plan = full_plan(&scenario(EmergencyType::Flood, 1000));
        assert_eq!(plan.estimated_duration_display(), "1 day, 0:00:00");
        let plan = full_plan(&scenario(EmergencyType::Flood, 1000).with_duration_hours(6));
        assert_eq!(plan.estimated_duration_display(), "6:00:00");
    }

    proptest! {
        #[test]
        fn allocated_personnel_covers_estimate(pop in 0i64..3_000_000) {
            let s = scenario(EmergencyType::Earthquake, pop);
            let plan = full_plan(&s);
            let estimated = ScenarioAnalyzer::resource_requirements(&s).personnel;
            prop_assert!(plan.resource_allocation.total_personnel() >= estimated);
            prop_assert!(plan.resource_allocation.personnel_deployment["Command Staff"] >= 5);
        }
    }
}
