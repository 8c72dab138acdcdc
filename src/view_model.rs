//! Typed intermediate representation of page cards and detail panels.
//!
//! Builders here are pure functions of catalog records; `ui::blocks` is the
//! only place that turns a [`Block`] into terminal widgets.

use crate::catalog::{
    Award, Bio, CreativePursuit, Episode, Publication, Testimonial, ToolProject,
};
use crate::filter::{FilteredView, RecordId};
use crate::modal::ModalOptions;
use crate::router::Page;

/// Positional labels for `Skills::technical`.
pub const TECHNICAL_SKILL_LABELS: [&str; 6] = [
    "AI/ML",
    "Data Science",
    "Computational Biology",
    "Programming",
    "Platforms",
    "Tools",
];

/// One unit of rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Subheading(String),
    Text(String),
    Emphasis(String),
    Quote(String),
    Field { label: String, value: String },
    Tags { label: String, items: Vec<String> },
    Bullets(Vec<String>),
    Link { label: String, url: String },
    Rule,
}

impl Block {
    fn field(label: &str, value: impl Into<String>) -> Self {
        Block::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }

    fn joined(label: &str, items: &[String]) -> Option<Self> {
        (!items.is_empty()).then(|| Block::field(label, items.join(", ")))
    }

    fn link(label: &str, url: &str) -> Self {
        Block::Link {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Identifies the record behind a card independently of any filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailKey {
    pub page: Page,
    pub id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Present when the card offers a "show detail" action.
    pub key: Option<DetailKey>,
    pub kicker: Option<String>,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Card {
    /// First link on the card, if any.
    pub fn link(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Link { url, .. } => Some(url.as_str()),
            _ => None,
        })
    }
}

/// Content for the modal presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub title: String,
    pub blocks: Vec<Block>,
    pub options: ModalOptions,
}

fn keyed(page: Page, id: RecordId) -> Option<DetailKey> {
    Some(DetailKey { page, id })
}

pub fn publication_card(id: RecordId, publication: &Publication) -> Card {
    Card {
        key: keyed(Page::Publications, id),
        kicker: None,
        title: publication.title.clone(),
        blocks: vec![
            Block::Text(publication.authors.clone()),
            Block::Emphasis(format!("{} ({})", publication.journal, publication.year)),
        ],
    }
}

pub fn publication_detail(publication: &Publication) -> DetailPanel {
    let mut blocks = vec![
        Block::Heading(publication.title.clone()),
        Block::field("Authors", publication.authors.clone()),
        Block::field(
            "Journal",
            format!("{} ({})", publication.journal, publication.year),
        ),
        Block::link("DOI", &publication.doi),
        Block::Subheading("Abstract".to_string()),
        Block::Text(
            publication
                .abstract_text
                .clone()
                .unwrap_or_else(|| "Abstract not available".to_string()),
        ),
    ];
    if !publication.keywords.is_empty() {
        blocks.push(Block::Tags {
            label: "Keywords".to_string(),
            items: publication.keywords.clone(),
        });
    }
    if let Some(site) = &publication.bodysite {
        blocks.push(Block::field("Body Site", site.clone()));
    }
    blocks.extend(Block::joined("Technologies", &publication.technologies));
    if let Some(area) = &publication.diseasearea {
        blocks.push(Block::field("Disease Area", area.clone()));
    }
    if let Some(theme) = &publication.theme {
        blocks.push(Block::field("Theme", theme.clone()));
    }
    DetailPanel {
        title: "Publication Details".to_string(),
        blocks,
        options: ModalOptions::tall(),
    }
}

pub fn episode_card(id: RecordId, episode: &Episode) -> Card {
    Card {
        key: keyed(Page::Episodes, id),
        kicker: Some(format!("Episode {}", episode.number)),
        title: episode.title.clone(),
        blocks: vec![
            Block::field("Theme", episode.theme.clone()),
            Block::link("View on LinkedIn", &episode.link),
        ],
    }
}

pub fn episode_detail(episode: &Episode) -> DetailPanel {
    DetailPanel {
        title: format!("Episode {}: {}", episode.number, episode.title),
        blocks: vec![
            Block::field("Theme", episode.theme.clone()),
            Block::Rule,
            Block::Text(episode.description.clone()),
            Block::Rule,
            Block::link("View on LinkedIn", &episode.link),
        ],
        options: ModalOptions::tall(),
    }
}

pub fn award_card(id: RecordId, award: &Award) -> Card {
    Card {
        key: keyed(Page::Awards, id),
        kicker: Some(award.year.to_string()),
        title: award.title.clone(),
        blocks: vec![Block::Text(award.organization.clone())],
    }
}

pub fn award_detail(award: &Award) -> DetailPanel {
    DetailPanel {
        title: award.title.clone(),
        blocks: vec![
            Block::field("Year", award.year.to_string()),
            Block::field("Organization", award.organization.clone()),
            Block::field("Category", award.category.clone()),
            Block::Rule,
            Block::Text(award.description.clone()),
        ],
        options: ModalOptions::default(),
    }
}

pub fn testimonial_card(testimonial: &Testimonial) -> Card {
    Card {
        key: None,
        kicker: None,
        title: testimonial.author.clone(),
        blocks: vec![
            Block::Quote(testimonial.quote.clone()),
            Block::Text(testimonial.role.clone()),
            Block::Emphasis(testimonial.affiliation.clone()),
        ],
    }
}

pub fn creative_card(pursuit: &CreativePursuit) -> Card {
    let mut blocks = vec![
        Block::Emphasis(format!("{} • {}", pursuit.kind, pursuit.platform)),
        Block::Text(pursuit.description.clone()),
    ];
    if let Some(stats) = &pursuit.stats {
        blocks.push(Block::Text(stats.clone()));
    }
    if let Some(award) = &pursuit.award {
        blocks.push(Block::field("Award", award.clone()));
    }
    blocks.extend(Block::joined("Topics", &pursuit.topics));
    blocks.extend(Block::joined("Tools", &pursuit.tools));
    blocks.extend(Block::joined("Technologies", &pursuit.technologies));
    if let Some(link) = &pursuit.link {
        blocks.push(Block::link("Visit", link));
    }
    Card {
        key: None,
        kicker: None,
        title: pursuit.title.clone(),
        blocks,
    }
}

pub fn tool_card(tool: &ToolProject) -> Card {
    let mut blocks = vec![
        Block::Emphasis(format!("{} • {}", tool.kind, tool.status)),
        Block::Text(tool.description.clone()),
        Block::field("Year", tool.year.to_string()),
    ];
    if let Some(publication) = &tool.publication {
        blocks.push(Block::field("Published in", publication.clone()));
    }
    if let Some(organization) = &tool.organization {
        blocks.push(Block::field("Organization", organization.clone()));
    }
    blocks.push(Block::field("Impact", tool.impact.clone()));
    blocks.extend(Block::joined("Technologies", &tool.technologies));
    blocks.extend(Block::joined("Applications", &tool.applications));
    if let Some(link) = &tool.link {
        blocks.push(Block::link("View Publication", link));
    }
    Card {
        key: None,
        kicker: None,
        title: tool.name.clone(),
        blocks,
    }
}

/// The biography page as one document-style card.
pub fn bio_card(bio: &Bio) -> Card {
    let mut blocks = vec![
        Block::Heading("Professional Summary".to_string()),
        Block::Text(bio.summary.clone()),
        Block::Heading("Education".to_string()),
    ];

    for edu in &bio.education {
        blocks.push(Block::Subheading(format!("{} in {}", edu.degree, edu.field)));
        blocks.push(Block::Text(format!("{}, {}", edu.institution, edu.location)));
        blocks.push(Block::Text(match &edu.gpa {
            Some(gpa) => format!("{} | GPA: {}", edu.year, gpa),
            None => edu.year.clone(),
        }));
        if let Some(thesis) = &edu.thesis {
            blocks.push(Block::Emphasis(format!("Thesis: {}", thesis)));
        }
        blocks.extend(Block::joined("Supervisors", &edu.supervisors));
    }

    blocks.push(Block::Heading("Experience".to_string()));
    for exp in &bio.experience {
        blocks.push(Block::Subheading(exp.title.clone()));
        blocks.push(Block::Text(format!("{}, {}", exp.company, exp.location)));
        blocks.push(Block::Text(exp.period.clone()));
        if let Some(spec) = &exp.specialization {
            blocks.push(Block::Emphasis(spec.clone()));
        }
        if !exp.highlights.is_empty() {
            blocks.push(Block::Bullets(exp.highlights.clone()));
        }
    }

    blocks.push(Block::Heading("Specializations".to_string()));
    blocks.push(Block::Bullets(bio.specializations.clone()));

    blocks.push(Block::Heading("Technical Skills".to_string()));
    for (label, value) in TECHNICAL_SKILL_LABELS.iter().zip(&bio.skills.technical) {
        blocks.push(Block::field(label, value.clone()));
    }

    blocks.push(Block::Heading("Leadership & Creative Skills".to_string()));
    blocks.push(Block::field("Leadership", bio.skills.leadership.join(", ")));
    blocks.push(Block::field("Creative", bio.skills.creative.join(", ")));

    Card {
        key: None,
        kicker: None,
        title: "Biography".to_string(),
        blocks,
    }
}

/// Cards for every entry of a filtered view, keyed by stable record id.
pub fn cards_for<R: Clone>(
    view: &FilteredView<R>,
    build: impl Fn(RecordId, &R) -> Card,
) -> Vec<Card> {
    view.entries()
        .iter()
        .map(|entry| build(entry.id, &entry.record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    #[test]
    fn test_publication_detail_omits_absent_fields() {
        let catalog = fixtures::sample();
        let panel = publication_detail(&catalog.publications[1]);

        assert_eq!(panel.title, "Publication Details");
        assert!(panel.blocks.contains(&Block::Text("Abstract not available".to_string())));
        assert!(!panel.blocks.iter().any(|b| matches!(b, Block::Tags { .. })));
        assert!(!panel.blocks.iter().any(
            |b| matches!(b, Block::Field { label, .. } if label == "Theme" || label == "Body Site")
        ));
    }

    #[test]
    fn test_publication_detail_includes_present_fields() {
        let catalog = fixtures::sample();
        let panel = publication_detail(&catalog.publications[0]);
        assert!(panel.blocks.contains(&Block::Tags {
            label: "Keywords".to_string(),
            items: vec!["skin".to_string(), "16S".to_string()],
        }));
        assert!(panel.blocks.contains(&Block::Field {
            label: "Theme".to_string(),
            value: "Dermatology".to_string(),
        }));
    }

    #[test]
    fn test_episode_card_and_detail() {
        let catalog = fixtures::sample();
        let card = episode_card(RecordId(1), &catalog.episodes[1]);
        assert_eq!(card.kicker.as_deref(), Some("Episode 2"));
        assert_eq!(card.key, Some(DetailKey { page: Page::Episodes, id: RecordId(1) }));
        assert_eq!(card.link(), Some("https://example.org/ep2"));

        let panel = episode_detail(&catalog.episodes[1]);
        assert_eq!(panel.title, "Episode 2: Skin Flora");
        assert_eq!(panel.options, ModalOptions::tall());
    }

    #[test]
    fn test_award_detail_uses_default_height() {
        let catalog = fixtures::sample();
        let panel = award_detail(&catalog.awards[0]);
        assert_eq!(panel.title, "Best Poster");
        assert_eq!(panel.options.max_height_percent, None);
    }

    #[test]
    fn test_cards_without_detail() {
        let catalog = fixtures::sample();
        assert_eq!(testimonial_card(&catalog.testimonials[0]).key, None);

        let creative = creative_card(&catalog.creative_pursuits[0]);
        assert_eq!(creative.key, None);
        assert_eq!(creative.link(), None);
        assert_eq!(creative.blocks.len(), 2);

        let tool = tool_card(&catalog.tools_projects[0]);
        assert!(tool.blocks.contains(&Block::Field {
            label: "Technologies".to_string(),
            value: "Rust, Nextflow".to_string(),
        }));
        assert!(!tool.blocks.iter().any(
            |b| matches!(b, Block::Field { label, .. } if label == "Applications")
        ));
    }

    #[test]
    fn test_bio_labels_only_present_skills() {
        let catalog = fixtures::sample();
        let card = bio_card(&catalog.bio);
        let labels: Vec<_> = card
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Field { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec!["Supervisors", "AI/ML", "Data Science", "Leadership", "Creative"]
        );
        assert!(card.blocks.contains(&Block::Text("2020 | GPA: 4.0".to_string())));
    }

    #[test]
    fn test_cards_for_keeps_view_ids() {
        let catalog = fixtures::sample();
        let view = FilteredView::by_dimension(&catalog.awards, "Research");
        let cards = cards_for(&view, award_card);
        let ids: Vec<_> = cards.iter().filter_map(|c| c.key).map(|k| k.id).collect();
        assert_eq!(ids, vec![RecordId(0), RecordId(2)]);
    }
}
