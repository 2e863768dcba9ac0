//! In-memory city service catalog with term-overlap search.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_RESULTS: usize = 3;
pub const CATEGORY_RESULTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub title: String,
    pub content: String,
    pub service_type: String,
    pub category: String,
}

impl ServiceEntry {
    pub fn new(title: &str, content: &str, service_type: &str, category: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            service_type: service_type.to_string(),
            category: category.to_string(),
        }
    }

    fn haystack(&self) -> String {
        format!("{} {} {}", self.title, self.content, self.service_type).to_lowercase()
    }
}

#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
    max_results: usize,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_RESULTS)
    }
}

impl ServiceCatalog {
    pub fn new(max_results: usize) -> Self {
        Self::with_entries(builtin_entries(), max_results)
    }

    pub fn with_entries(entries: Vec<ServiceEntry>, max_results: usize) -> Self {
        Self {
            entries,
            max_results: max_results.max(1),
        }
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    /// Entries ranked by how many query terms they contain. Ties keep
    /// catalog order; entries sharing no term are dropped.
    pub fn search(&self, query: &str) -> Vec<&ServiceEntry> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize, &ServiceEntry)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let hay = entry.haystack();
                let hits = terms.iter().filter(|t| hay.contains(t.as_str())).count();
                (hits > 0).then_some((hits, i, entry))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(self.max_results)
            .map(|(_, _, e)| e)
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&ServiceEntry> {
        let wanted = category.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.category == wanted)
            .take(CATEGORY_RESULTS)
            .collect()
    }

    pub fn search_city_services(&self, query: &str) -> String {
        let hits = self.search(query);
        if hits.is_empty() {
            return "I couldn't find specific information about that service. Please try a different query or contact 311 for assistance.".to_string();
        }
        render_list("Here's what I found about city services:\n\n", &hits)
    }

    pub fn get_service_by_category(&self, category: &str) -> String {
        let hits = self.by_category(category);
        if hits.is_empty() {
            return format!("No services found in the {} category.", category);
        }
        render_list(&format!("Services in {} category:\n\n", category), &hits)
    }
}

fn render_list(header: &str, entries: &[&ServiceEntry]) -> String {
    let mut out = header.to_string();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{}. **{}**\n", i + 1, entry.title));
        out.push_str(&format!("   {}\n\n", entry.content));
    }
    out
}

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "how", "what", "when", "where", "can", "does", "are", "you", "your",
    "with", "about", "need", "get", "this", "that", "there", "who",
];

fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 3 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect();
    terms.dedup();
    terms
}

fn builtin_entries() -> Vec<ServiceEntry> {
    vec![
        ServiceEntry::new(
            "Residential Trash Pickup",
            "Household trash is collected weekly. Place bins at the curb by 6:00 AM on your collection day.",
            "trash_pickup",
            "sanitation",
        ),
        ServiceEntry::new(
            "Recycling Collection",
            "Blue bin recycling is collected every other week. Rinse containers and flatten cardboard.",
            "recycling",
            "sanitation",
        ),
        ServiceEntry::new(
            "Bulk Item Pickup",
            "Furniture and large appliances are picked up by appointment. Call 311 to schedule a bulk collection.",
            "trash_pickup",
            "sanitation",
        ),
        ServiceEntry::new(
            "Composting Program",
            "Food scraps and yard waste can go in the green compost bin, collected weekly April through November.",
            "recycling",
            "sanitation",
        ),
        ServiceEntry::new(
            "Business License",
            "New businesses must register with the city and obtain a business license before opening. Licenses renew annually.",
            "permits",
            "licensing",
        ),
        ServiceEntry::new(
            "Building Permits",
            "Construction, renovation and demolition work requires a building permit. Applications are reviewed within 10 business days.",
            "permits",
            "licensing",
        ),
        ServiceEntry::new(
            "Special Event Permits",
            "Street fairs, parades and block parties need a special event permit filed at least 30 days in advance.",
            "permits",
            "licensing",
        ),
        ServiceEntry::new(
            "Emergency Alerts",
            "Sign up for text and email emergency alerts covering severe weather, evacuations and boil-water notices.",
            "emergency_alerts",
            "safety",
        ),
        ServiceEntry::new(
            "Evacuation Routes",
            "Posted evacuation routes lead to designated shelters. Follow official instructions during a disaster.",
            "emergency_alerts",
            "safety",
        ),
        ServiceEntry::new(
            "Non-Emergency Police Reports",
            "Report noise complaints, minor theft or abandoned vehicles online or by calling 311.",
            "general_info",
            "safety",
        ),
        ServiceEntry::new(
            "City Parks and Hours",
            "City parks are open daily from 6:00 AM to 10:00 PM. Playgrounds close at dusk.",
            "park_info",
            "recreation",
        ),
        ServiceEntry::new(
            "Recreation Center Programs",
            "Recreation centers offer youth sports, fitness classes and summer camps. Registration opens each season.",
            "park_info",
            "recreation",
        ),
        ServiceEntry::new(
            "Picnic Shelter Reservations",
            "Park picnic shelters can be reserved for groups of up to 50 people.",
            "park_info",
            "recreation",
        ),
    ]
}
