use crate::error::PortfolioError;
use serde::Deserialize;
use std::path::Path;

/// Sample catalog compiled into the binary, used when no file is given.
const BUNDLED_CATALOG: &str = include_str!("../data/portfolio.json");

/// A peer-reviewed publication.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: u32,
    pub doi: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub bodysite: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub diseasearea: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

/// One episode of the weekly post series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    pub number: u32,
    pub title: String,
    pub theme: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Award {
    pub year: u32,
    pub title: String,
    pub organization: String,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub affiliation: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Education {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub location: String,
    pub year: String,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub thesis: Option<String>,
    #[serde(default)]
    pub supervisors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Skills {
    /// Positional: AI/ML, Data Science, Computational Biology, Programming,
    /// Platforms, Tools.
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub leadership: Vec<String>,
    #[serde(default)]
    pub creative: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Bio {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub skills: Skills,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreativePursuit {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub platform: String,
    pub description: String,
    #[serde(default)]
    pub stats: Option<String>,
    #[serde(default)]
    pub award: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolProject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub description: String,
    pub year: u32,
    #[serde(default)]
    pub publication: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    pub impact: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// The read-only dataset, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub bio: Bio,
    #[serde(default)]
    pub creative_pursuits: Vec<CreativePursuit>,
    #[serde(default)]
    pub tools_projects: Vec<ToolProject>,
}

impl Catalog {
    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, PortfolioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, PortfolioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The sample catalog shipped with the binary.
    pub fn bundled() -> Result<Self, PortfolioError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Record counts per category, in navigation order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("publications", self.publications.len()),
            ("episodes", self.episodes.len()),
            ("awards", self.awards.len()),
            ("testimonials", self.testimonials.len()),
            ("education", self.bio.education.len()),
            ("experience", self.bio.experience.len()),
            ("creative", self.creative_pursuits.len()),
            ("tools", self.tools_projects.len()),
        ]
    }
}
