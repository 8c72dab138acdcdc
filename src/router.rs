use std::fmt;
use std::str::FromStr;

/// Which page is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Page {
    Home,
    Publications,
    Episodes,
    Awards,
    Testimonials,
    Bio,
    Creative,
    Tools,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Self::Home,
        Self::Publications,
        Self::Episodes,
        Self::Awards,
        Self::Testimonials,
        Self::Bio,
        Self::Creative,
        Self::Tools,
    ];

    /// Identifier used by `navigate_to` and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Publications => "publications",
            Self::Episodes => "episodes",
            Self::Awards => "awards",
            Self::Testimonials => "testimonials",
            Self::Bio => "bio",
            Self::Creative => "creative",
            Self::Tools => "tools",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Publications => "Publications",
            Self::Episodes => "Microbiome Mondays",
            Self::Awards => "Awards",
            Self::Testimonials => "Testimonials",
            Self::Bio => "Bio",
            Self::Creative => "Creative",
            Self::Tools => "Tools & Projects",
        }
    }

    /// Whether navigating here invokes a page renderer.
    pub fn has_renderer(self) -> bool {
        !matches!(self, Self::Home)
    }

    /// Pages whose view can be narrowed by free-text search.
    pub fn is_searchable(self) -> bool {
        matches!(self, Self::Episodes | Self::Publications)
    }

    /// Pages whose view can be narrowed by an exact-match dimension.
    pub fn is_filterable(self) -> bool {
        matches!(self, Self::Episodes | Self::Awards)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter().copied().find(|p| p.id() == s).ok_or(())
    }
}

/// The recorded current page. Unknown identifiers are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(Page),
    Unknown(String),
}

impl Route {
    pub fn page(&self) -> Option<Page> {
        match self {
            Route::Page(p) => Some(*p),
            Route::Unknown(_) => None,
        }
    }
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavControl {
    pub target: Page,
    pub active: bool,
}

/// A page section and whether it is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub page: Page,
    pub visible: bool,
}

/// Tracks the current route and derives section visibility and the active
/// nav control from it.
#[derive(Debug, Clone)]
pub struct Router {
    route: Route,
    sections: Vec<Section>,
    controls: Vec<NavControl>,
}

impl Router {
    /// A router with every section hidden. Call `navigate_to` to show one.
    pub fn new() -> Self {
        Self {
            route: Route::Unknown(String::new()),
            sections: Page::ALL
                .iter()
                .map(|&page| Section { page, visible: false })
                .collect(),
            controls: Page::ALL
                .iter()
                .map(|&target| NavControl { target, active: false })
                .collect(),
        }
    }

    /// Record `id` as the current route and update visibility.
    ///
    /// Returns the page that is now shown, or `None` when `id` names no
    /// known page; in that case every section stays hidden and no control is
    /// active.
    pub fn navigate_to(&mut self, id: &str) -> Option<Page> {
        self.route = match id.parse::<Page>() {
            Ok(page) => Route::Page(page),
            Err(()) => Route::Unknown(id.to_string()),
        };
        let shown = self.route.page();

        for section in &mut self.sections {
            section.visible = Some(section.page) == shown;
        }
        for control in &mut self.controls {
            control.active = Some(control.target) == shown;
        }
        shown
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn current(&self) -> Option<Page> {
        self.route.page()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn controls(&self) -> &[NavControl] {
        &self.controls
    }

    pub fn visible_section(&self) -> Option<Page> {
        self.sections().iter().find(|s| s.visible).map(|s| s.page)
    }

    pub fn active_control(&self) -> Option<Page> {
        self.controls.iter().find(|c| c.active).map(|c| c.target)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
