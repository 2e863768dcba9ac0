//! Prompts for AI-assisted policy review and parsing of the replies.

use serde_json::{json, Value};

use crate::domain::foundation::truncate_chars;

pub const ANALYSIS_CONTENT_LIMIT: usize = 4000;
pub const COMPARISON_CONTENT_LIMIT: usize = 2000;
pub const REVIEW_CONTENT_LIMIT: usize = 3000;

pub const SYSTEM_PROMPT: &str = "You are an expert policy compliance analyst. \
Always answer with a single JSON object matching the requested format and nothing else.";

pub fn analysis_prompt(content: &str, requirements: &str) -> String {
    format!(
        r#"Analyze the following policy document for compliance issues and provide detailed recommendations.

Policy Document:
{content}

Compliance Requirements: {requirements}

Respond in this JSON format:
{{
  "compliance_score": <score from 0-100>,
  "key_findings": [
    {{"category": "<category>", "issue": "<description>", "severity": "<critical|high|medium|low>", "recommendation": "<specific recommendation>", "location": "<section or area>"}}
  ],
  "missing_sections": ["<important sections that should be added>"],
  "strengths": ["<policy strengths>"],
  "overall_assessment": "<summary of overall compliance status>"
}}

Focus on legal compliance, security and data protection, accessibility, clarity and consistency of language, and completeness of coverage."#,
        content = truncate_chars(content, ANALYSIS_CONTENT_LIMIT),
        requirements = requirements,
    )
}

pub fn analysis_fallback(error: &str) -> Value {
    json!({
        "error": format!("Analysis failed: {}", error),
        "compliance_score": 0,
        "key_findings": [],
        "missing_sections": [],
        "strengths": [],
        "overall_assessment": "Unable to complete analysis due to error"
    })
}

pub fn comparison_prompt(title1: &str, content1: &str, title2: &str, content2: &str) -> String {
    format!(
        r#"Compare two policy documents to identify differences, inconsistencies, and gaps.

{title1}:
{content1}

{title2}:
{content2}

Respond in this JSON format:
{{
  "similarity_score": <0-100>,
  "key_differences": [
    {{"category": "<category>", "difference": "<description>", "document1_approach": "<approach>", "document2_approach": "<approach>", "recommendation": "<suggested approach>"}}
  ],
  "missing_in_document1": ["<items present in document 2 only>"],
  "missing_in_document2": ["<items present in document 1 only>"],
  "consistency_issues": [{{"issue": "<description>", "impact": "<impact>", "solution": "<solution>"}}],
  "summary": "<overall comparison summary>"
}}"#,
        title1 = title1,
        content1 = truncate_chars(content1, COMPARISON_CONTENT_LIMIT),
        title2 = title2,
        content2 = truncate_chars(content2, COMPARISON_CONTENT_LIMIT),
    )
}

pub fn comparison_fallback(error: &str) -> Value {
    json!({
        "error": format!("Comparison failed: {}", error),
        "similarity_score": 0,
        "key_differences": [],
        "missing_in_document1": [],
        "missing_in_document2": [],
        "consistency_issues": [],
        "summary": "Unable to complete comparison due to error"
    })
}

pub fn improvements_prompt(content: &str, focus_areas: &str) -> String {
    format!(
        r#"Review the following policy document and suggest specific improvements.

Document Content:
{content}

Focus Areas: {focus_areas}

Respond in this JSON format:
{{
  "clarity_improvements": [{{"section": "<section>", "current_text": "<text>", "suggested_text": "<improved>", "reason": "<why>"}}],
  "structure_improvements": [{{"improvement": "<change>", "rationale": "<why>", "implementation": "<how>"}}],
  "accessibility_improvements": ["<suggestion>"],
  "legal_considerations": [{{"area": "<area>", "current_gap": "<gap>", "recommendation": "<what to add>"}}],
  "language_improvements": [{{"issue": "<issue>", "examples": ["<example>"], "solution": "<fix>"}}]
}}"#,
        content = truncate_chars(content, REVIEW_CONTENT_LIMIT),
        focus_areas = focus_areas,
    )
}

pub fn improvements_fallback(error: &str) -> Value {
    json!({
        "error": format!("Improvement suggestion failed: {}", error),
        "clarity_improvements": [],
        "structure_improvements": [],
        "accessibility_improvements": [],
        "legal_considerations": [],
        "language_improvements": []
    })
}

pub fn recommendations_prompt(
    policy_type: &str,
    organization_size: &str,
    industry: &str,
    specific_requirements: &str,
) -> String {
    format!(
        r#"Generate comprehensive policy recommendations for the following context:

Policy Type: {policy_type}
Organization Size: {organization_size}
Industry: {industry}
Specific Requirements: {specific_requirements}

Respond in this JSON format:
{{
  "policy_outline": {{"title": "<title>", "sections": [{{"section_name": "<name>", "description": "<coverage>", "key_points": ["<point>"]}}]}},
  "compliance_considerations": [{{"area": "<area>", "requirement": "<requirement>", "implementation": "<how>"}}],
  "best_practices": ["<practice>"],
  "common_pitfalls": ["<pitfall>"],
  "review_schedule": "<frequency>",
  "stakeholders": ["<who>"]
}}"#
    )
}

pub fn recommendations_fallback(error: &str) -> Value {
    json!({
        "error": format!("Recommendation generation failed: {}", error),
        "policy_outline": {"title": "", "sections": []},
        "compliance_considerations": [],
        "best_practices": [],
        "common_pitfalls": [],
        "review_schedule": "",
        "stakeholders": []
    })
}

pub fn key_terms_prompt(content: &str) -> String {
    format!(
        r#"Analyze the following policy document and extract key terms, definitions, and important concepts.

Document Content:
{content}

Respond in this JSON format:
{{
  "key_terms": [{{"term": "<term>", "definition": "<definition>", "context": "<where used>", "importance": "<high|medium|low>"}}],
  "undefined_terms": ["<term used but not defined>"],
  "acronyms": [{{"acronym": "<acronym>", "expansion": "<full form>", "first_occurrence": "<context>"}}],
  "concepts": [{{"concept": "<name>", "description": "<description>", "related_terms": ["<term>"]}}]
}}"#,
        content = truncate_chars(content, REVIEW_CONTENT_LIMIT),
    )
}

pub fn key_terms_fallback(error: &str) -> Value {
    json!({
        "error": format!("Term extraction failed: {}", error),
        "key_terms": [],
        "undefined_terms": [],
        "acronyms": [],
        "concepts": []
    })
}

pub fn checklist_prompt(title: &str, content: &str, organization_context: &str) -> String {
    format!(
        r#"Create a comprehensive implementation checklist for the following policy:

Policy: {title}
Context: {organization_context}

Policy Content (abbreviated):
{content}

Respond in this JSON format:
{{
  "pre_implementation": [{{"task": "<task>", "responsible_party": "<who>", "timeline": "<when>", "dependencies": ["<dependency>"]}}],
  "implementation_steps": [{{"step": "<step>", "details": "<details>", "success_criteria": "<done when>", "resources_needed": ["<resource>"]}}],
  "communication_plan": [{{"audience": "<audience>", "message": "<message>", "method": "<method>", "timing": "<timing>"}}],
  "training_requirements": [{{"topic": "<topic>", "audience": "<audience>", "format": "<format>", "frequency": "<frequency>"}}],
  "monitoring_and_review": [{{"metric": "<metric>", "frequency": "<frequency>", "responsible_party": "<who>", "escalation": "<when>"}}]
}}"#,
        title = title,
        organization_context = organization_context,
        content = truncate_chars(content, COMPARISON_CONTENT_LIMIT),
    )
}

pub fn checklist_fallback(error: &str) -> Value {
    json!({
        "error": format!("Checklist generation failed: {}", error),
        "pre_implementation": [],
        "implementation_steps": [],
        "communication_plan": [],
        "training_requirements": [],
        "monitoring_and_review": []
    })
}

/// Reads a model reply as JSON, tolerating markdown code fences. Replies
/// that still are not JSON come back as `{"raw_response": reply}`.
pub fn parse_ai_json(reply: &str) -> Value {
    let trimmed = strip_code_fence(reply.trim());
    serde_json::from_str(trimmed).unwrap_or_else(|_| json!({ "raw_response": reply }))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
