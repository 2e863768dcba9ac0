//! Civic Agents - Integrated AI agents for city government.
//!
//! Four agents sit behind one web service:
//!
//! - Emergency Response Coordinator: scenario assessment and response plans
//! - Policy Compliance Checker: rule-based and AI review of policy documents
//! - Virtual Citizen Assistant: classified chat over city service plugins
//! - Document Eligibility Agent: mailbox documents and benefit eligibility
//!
//! The crate follows a ports-and-adapters layout: `domain` is pure logic,
//! `ports` declares the external seams, `adapters` implements them and
//! `application` composes the agents.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
