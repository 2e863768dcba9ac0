//! HTML fragments for the browser pages.

use crate::application::AgentStatusReport;
use crate::domain::emergency::{EmergencyResponsePlan, EmergencyType, SeverityLevel};

const NAV: [(&str, &str); 8] = [
    ("/", "Home"),
    ("/dashboard", "Dashboard"),
    ("/create_scenario", "New Scenario"),
    ("/scenarios", "Scenarios"),
    ("/map", "Map"),
    ("/reports", "Reports"),
    ("/agents", "Agents"),
    ("/citizen-assistant", "Citizen Assistant"),
];

/// Escapes text for use inside element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout(title: &str, body: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(href, label)| format!(r#"<a href="{}">{}</a>"#, href, label))
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Civic Agents</title>
</head>
<body>
<nav>{nav}</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        nav = nav,
        body = body,
    )
}

fn list(items: &[String]) -> String {
    let rows: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ul>{}</ul>", rows)
}

pub fn index() -> String {
    layout(
        "Civic Agents",
        r#"<p>Emergency response planning, policy compliance, citizen services and document eligibility.</p>
<ul>
<li><a href="/dashboard">Emergency dashboard</a></li>
<li><a href="/agents">Agent hub</a></li>
<li><a href="/policy-compliance">Policy compliance</a></li>
<li><a href="/citizen-assistant">Citizen assistant</a></li>
<li><a href="/document-eligibility">Document eligibility</a></li>
</ul>"#,
    )
}

pub fn dashboard(plans: &[EmergencyResponsePlan]) -> String {
    let active = plans.len();
    let personnel: i64 = plans
        .iter()
        .map(|p| p.resource_allocation.total_personnel())
        .sum();
    layout(
        "Emergency Dashboard",
        &format!(
            "<p>Active response plans: {}</p><p>Personnel deployed: {}</p>{}",
            active,
            personnel,
            plan_table(plans)
        ),
    )
}

pub fn create_scenario() -> String {
    let types: String = EmergencyType::ALL
        .iter()
        .map(|t| format!(r#"<option value="{0}">{0}</option>"#, t.as_str()))
        .collect();
    let levels: String = SeverityLevel::ALL
        .iter()
        .map(|s| format!(r#"<option value="{}">{}</option>"#, s.value(), s.label()))
        .collect();
    layout(
        "Create Scenario",
        &format!(
            r#"<form id="scenario-form" data-endpoint="/api/scenarios">
<label>Incident type <select name="incident_type">{}</select></label>
<label>Severity <select name="severity_level">{}</select></label>
<label>Location <input name="location"></label>
<label>Radius (miles) <input name="affected_area_radius" type="number" step="0.1"></label>
<label>Population affected <input name="estimated_population_affected" type="number"></label>
<label>Duration (hours) <input name="duration_hours" type="number" value="24"></label>
<label>Description <textarea name="description"></textarea></label>
<button type="submit">Generate response plan</button>
</form>"#,
            types, levels
        ),
    )
}

fn plan_table(plans: &[EmergencyResponsePlan]) -> String {
    if plans.is_empty() {
        return "<p>No response plans yet.</p>".to_string();
    }
    let rows: String = plans
        .iter()
        .map(|p| {
            format!(
                r#"<tr><td><a href="/plan/{id}">{id}</a></td><td>{kind}</td><td>{severity}</td><td>{location}</td><td>{lead}</td></tr>"#,
                id = escape(&p.plan_id),
                kind = p.scenario.incident_type.as_str(),
                severity = p.scenario.severity_level.label(),
                location = escape(&p.scenario.location),
                lead = escape(&p.lead_agency),
            )
        })
        .collect();
    format!(
        "<table><tr><th>Plan</th><th>Type</th><th>Severity</th><th>Location</th><th>Lead agency</th></tr>{}</table>",
        rows
    )
}

pub fn scenarios(plans: &[EmergencyResponsePlan]) -> String {
    layout("Scenarios", &plan_table(plans))
}

pub fn plan(plan: &EmergencyResponsePlan) -> String {
    let milestones: Vec<String> = plan
        .timeline_milestones
        .iter()
        .map(|m| {
            format!(
                "{} ({}) - {}",
                m.milestone_name,
                m.estimated_time.to_rfc3339(),
                m.responsible_agency
            )
        })
        .collect();
    let personnel: Vec<String> = plan
        .resource_allocation
        .personnel_deployment
        .iter()
        .map(|(role, count)| format!("{}: {}", role, count))
        .collect();
    layout(
        &format!("Response Plan {}", plan.plan_id),
        &format!(
            "<p>Scenario: {} ({}, {})</p>\
<p>Lead agency: {}</p><p>Estimated duration: {}</p>\
<h2>Immediate actions</h2>{}\
<h2>Supporting agencies</h2>{}\
<h2>Personnel</h2>{}\
<h2>Timeline</h2>{}",
            escape(plan.scenario_id()),
            plan.scenario.incident_type.as_str(),
            escape(&plan.scenario.location),
            escape(&plan.lead_agency),
            plan.estimated_duration_display(),
            list(&plan.immediate_actions),
            list(&plan.supporting_agencies),
            list(&personnel),
            list(&milestones),
        ),
    )
}

pub fn plan_not_found(plan_id: &str) -> String {
    layout(
        "Plan Not Found",
        &format!(
            r#"<p>No response plan with id {}.</p><p><a href="/scenarios">Back to scenarios</a></p>"#,
            escape(plan_id)
        ),
    )
}

pub fn map() -> String {
    layout(
        "Incident Map",
        r#"<div id="map" data-plans="/api/plans"><p>Map view loads incident locations from the plan list.</p></div>"#,
    )
}

pub fn reports(plans: &[EmergencyResponsePlan]) -> String {
    let rows: Vec<String> = plans
        .iter()
        .map(|p| {
            format!(
                "{}: {} personnel, {}",
                p.plan_id,
                p.resource_allocation.total_personnel(),
                p.estimated_duration_display()
            )
        })
        .collect();
    layout("Reports", &format!("<p>{} plans on record.</p>{}", plans.len(), list(&rows)))
}

pub fn agents(report: &AgentStatusReport) -> String {
    let rows = [
        ("Emergency Response Coordinator", report.emergency_response),
        ("Policy Compliance Checker", report.policy_compliance),
        ("Virtual Citizen Assistant", report.citizen_assistant),
        ("Document Eligibility Agent", report.document_eligibility),
    ]
    .iter()
    .map(|(name, availability)| {
        format!(
            r#"<tr><td>{}</td><td class="{}">{}</td></tr>"#,
            name,
            availability.status,
            if availability.available { "available" } else { "unavailable" }
        )
    })
    .collect::<String>();
    layout(
        "Agent Hub",
        &format!(
            "<p>System status: {}</p><table><tr><th>Agent</th><th>Status</th></tr>{}</table>",
            report.system_status, rows
        ),
    )
}

pub fn console(title: &str, endpoint: &str, available: bool, field: &str) -> String {
    let notice = if available {
        String::new()
    } else {
        "<p class=\"unavailable\">This agent is currently unavailable.</p>".to_string()
    };
    layout(
        title,
        &format!(
            r#"{}<form data-endpoint="{}"><textarea name="{}"></textarea><button type="submit">Send</button></form><pre id="result"></pre>"#,
            notice, endpoint, field
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn create_scenario_lists_every_choice() {
        let page = create_scenario();
        for kind in EmergencyType::ALL {
            assert!(page.contains(&format!(r#"value="{}""#, kind.as_str())));
        }
        for level in SeverityLevel::ALL {
            assert!(page.contains(&format!(r#"value="{}""#, level.value())));
        }
    }

    #[test]
    fn empty_plan_list_has_placeholder() {
        assert!(scenarios(&[]).contains("No response plans yet."));
    }

    #[test]
    fn unavailable_console_shows_notice() {
        assert!(console("Citizen Assistant", "/api/citizen/chat", false, "message")
            .contains("currently unavailable"));
        assert!(!console("Citizen Assistant", "/api/citizen/chat", true, "message")
            .contains("currently unavailable"));
    }
}
