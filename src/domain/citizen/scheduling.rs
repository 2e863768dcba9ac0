//! Appointment scheduling desk backed by a fixed slot list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlot {
    pub id: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub available: bool,
}

impl AppointmentSlot {
    fn open(id: &str, service: &str, date: &str, time: &str) -> Self {
        Self {
            id: id.to_string(),
            service: service.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            available: true,
        }
    }
}

pub const SCHEDULABLE_SERVICES: [&str; 10] = [
    "Building Permits",
    "Business License Applications",
    "Zoning Consultations",
    "Building Inspections",
    "Planning Department Meetings",
    "Tax Assessment Appeals",
    "Parking Permit Applications",
    "Special Event Permits",
    "Public Records Requests",
    "Code Enforcement Consultations",
];

const INFO_RESPONSES: [(&str, &str); 5] = [
    (
        "hours",
        "City services are available Monday-Friday, 8:00 AM - 5:00 PM. Some services may have extended hours.",
    ),
    (
        "online",
        "Many services can be scheduled online at our city portal. Visit [city website] or call 311 for assistance.",
    ),
    (
        "requirements",
        "Please bring valid ID and any required documentation. Specific requirements vary by service type.",
    ),
    (
        "cancellation",
        "Appointments can be cancelled up to 24 hours in advance without penalty. Call 311 to cancel or reschedule.",
    ),
    (
        "contact",
        "For scheduling assistance, call 311 or visit our main office at City Hall during business hours.",
    ),
];

const GENERAL_INFO: &str = "Here's general information about scheduling city services:

📞 **Contact**: Call 311 for all scheduling needs
🕐 **Hours**: Monday-Friday, 8:00 AM - 5:00 PM
💻 **Online**: Many services available online at city portal
📋 **Requirements**: Bring valid ID and required documentation
⏰ **Cancellations**: Cancel up to 24 hours in advance

For specific service requirements or to schedule an appointment, please call 311.";

#[derive(Debug, Clone)]
pub struct SchedulingDesk {
    slots: Vec<AppointmentSlot>,
}

impl Default for SchedulingDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingDesk {
    pub fn new() -> Self {
        Self::with_slots(vec![
            AppointmentSlot::open("1", "Building Permit Application", "2024-01-15", "10:00 AM"),
            AppointmentSlot::open("2", "Business License Renewal", "2024-01-16", "2:00 PM"),
        ])
    }

    pub fn with_slots(slots: Vec<AppointmentSlot>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[AppointmentSlot] {
        &self.slots
    }

    /// Open slots whose service name contains `service`, case-insensitively.
    pub fn check_availability(&self, service: &str) -> String {
        let needle = service.to_lowercase();
        let matching: Vec<&AppointmentSlot> = self
            .slots
            .iter()
            .filter(|s| s.available && s.service.to_lowercase().contains(&needle))
            .collect();

        if matching.is_empty() {
            return format!(
                "I'm sorry, there are currently no available appointments for {}. Please call 311 or check back later.",
                service
            );
        }

        let mut out = format!("Available appointments for {}:\n\n", service);
        for slot in matching {
            out.push_str(&format!("📅 {} at {}\n", slot.date, slot.time));
            out.push_str(&format!("   Service: {}\n", slot.service));
            out.push_str(&format!("   ID: {}\n\n", slot.id));
        }
        out.push_str("To book an appointment, please call 311 or visit our online portal.");
        out
    }

    pub fn scheduling_info(&self, query: &str) -> String {
        let lower = query.to_lowercase();
        INFO_RESPONSES
            .iter()
            .find(|(key, _)| lower.contains(key))
            .map(|(_, text)| text.to_string())
            .unwrap_or_else(|| GENERAL_INFO.to_string())
    }

    pub fn list_schedulable_services(&self) -> String {
        let mut out = String::from("📋 **City Services Available for Scheduling:**\n\n");
        for (i, service) in SCHEDULABLE_SERVICES.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, service));
        }
        out.push_str("\n📞 To schedule any of these services, call 311 or visit our online portal.");
        out.push_str("\n💡 Some services may require advance scheduling or have specific requirements.");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_matches_substring_case_insensitively() {
        let desk = SchedulingDesk::new();
        let text = desk.check_availability("building PERMIT");
        assert!(text.starts_with("Available appointments for building PERMIT:"));
        assert!(text.contains("📅 2024-01-15 at 10:00 AM"));
        assert!(text.contains("   ID: 1"));
        assert!(!text.contains("Business License Renewal"));
    }

    #[test]
    fn no_availability_message() {
        let text = SchedulingDesk::new().check_availability("dog license");
        assert_eq!(
            text,
            "I'm sorry, there are currently no available appointments for dog license. Please call 311 or check back later."
        );
    }

    #[test]
    fn booked_slots_are_hidden() {
        let mut slot = AppointmentSlot::open("9", "Zoning Consultation", "2024-02-01", "9:00 AM");
        slot.available = false;
        let desk = SchedulingDesk::with_slots(vec![slot]);
        assert!(desk.check_availability("zoning").starts_with("I'm sorry"));
    }

    #[test]
    fn info_uses_first_matching_keyword() {
        let desk = SchedulingDesk::new();
        assert!(desk
            .scheduling_info("What are your HOURS?")
            .starts_with("City services are available Monday-Friday"));
        assert!(desk
            .scheduling_info("cancellation policy")
            .contains("24 hours in advance"));
        assert!(desk
            .scheduling_info("how do I book")
            .starts_with("Here's general information"));
    }

    #[test]
    fn lists_all_ten_services() {
        let text = SchedulingDesk::new().list_schedulable_services();
        assert!(text.contains("1. Building Permits\n"));
        assert!(text.contains("10. Code Enforcement Consultations\n"));
        assert!(text.ends_with("have specific requirements."));
    }
}
