use crate::animator::Animator;
use crate::catalog::{Award, Catalog, Episode, Publication};
use crate::error::{DetailError, RouteError};
use crate::filter::{self, FilteredView, Narrowing, normalize_query};
use crate::modal::{ModalOverlay, ModalPresenter};
use crate::router::{Page, Route, Router};
use crate::view_model::{self, Card, DetailKey, DetailPanel};
use log::{debug, info};
use std::collections::BTreeMap;

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application state.
pub struct App<P = ModalOverlay> {
    pub catalog: Catalog,
    pub router: Router,
    pub should_quit: bool,
    pub show_help: bool,

    // Filtered views, replaced wholesale on every change
    pub publications: FilteredView<Publication>,
    pub episodes: FilteredView<Episode>,
    pub awards: FilteredView<Award>,
    narrowing: BTreeMap<Page, Narrowing>,

    // Cards as last rendered, per page
    rendered: BTreeMap<Page, Vec<Card>>,
    selected: BTreeMap<Page, usize>,
    pub doc_scroll: u16,

    pub search_input: String,
    pub input_mode: InputMode,

    pub presenter: P,
    pub background: Option<Animator>,

    // Status message
    pub status_msg: String,
}

impl<P: ModalPresenter> App<P> {
    /// State with every view showing its full category and no page shown.
    pub fn new(catalog: Catalog, presenter: P) -> Self {
        Self {
            publications: FilteredView::full(&catalog.publications),
            episodes: FilteredView::full(&catalog.episodes),
            awards: FilteredView::full(&catalog.awards),
            catalog,
            router: Router::new(),
            should_quit: false,
            show_help: false,
            narrowing: BTreeMap::new(),
            rendered: BTreeMap::new(),
            selected: BTreeMap::new(),
            doc_scroll: 0,
            search_input: String::new(),
            input_mode: InputMode::Normal,
            presenter,
            background: None,
            status_msg: String::new(),
        }
    }

    pub fn current_page(&self) -> Option<Page> {
        self.router.current()
    }

    /// Show the page named `id`, render it from its current view, and
    /// scroll it back to the top. Unknown ids hide every page.
    pub fn navigate_to(&mut self, id: &str) {
        let shown = self.router.navigate_to(id);
        self.input_mode = InputMode::Normal;

        match shown {
            Some(page) => {
                debug!("event=navigate page={}", page);
                if page.has_renderer() {
                    self.render(page);
                }
                self.selected.insert(page, 0);
                self.doc_scroll = 0;
                self.status_msg = self.summary_for(page);
            }
            None => {
                info!("event=navigate_unknown id={}", id);
                self.status_msg = format!("No page named \"{}\"", id);
            }
        }
    }

    pub fn navigate(&mut self, page: Page) {
        self.navigate_to(page.id());
    }

    /// Narrow a page's view by its dimension (theme for episodes, category
    /// for awards). `"all"` restores the full category.
    pub fn filter_by_dimension(&mut self, page: Page, value: &str) -> Result<(), RouteError> {
        let shown = match page {
            Page::Episodes => {
                self.episodes = FilteredView::by_dimension(&self.catalog.episodes, value);
                self.episodes.len()
            }
            Page::Awards => {
                self.awards = FilteredView::by_dimension(&self.catalog.awards, value);
                self.awards.len()
            }
            other => return Err(RouteError::NotFilterable(other)),
        };
        let narrowing = if value == filter::ALL {
            Narrowing::All
        } else {
            Narrowing::Dimension(value.to_string())
        };
        debug!("event=filter page={} value={:?} shown={}", page, value, shown);
        self.narrowing.insert(page, narrowing);
        self.render(page);
        self.status_msg = self.summary_for(page);
        Ok(())
    }

    /// Replace a page's view with the records matching `query`. Discards
    /// any dimension filter previously applied to the same page.
    pub fn search(&mut self, page: Page, query: &str) -> Result<(), RouteError> {
        let shown = match page {
            Page::Episodes => {
                self.episodes = FilteredView::search(&self.catalog.episodes, query);
                self.episodes.len()
            }
            Page::Publications => {
                self.publications = FilteredView::search(&self.catalog.publications, query);
                self.publications.len()
            }
            other => return Err(RouteError::NotSearchable(other)),
        };
        let needle = normalize_query(query);
        let narrowing = if needle.is_empty() {
            Narrowing::All
        } else {
            Narrowing::Search(needle)
        };
        debug!("event=search page={} query={:?} shown={}", page, query, shown);
        self.narrowing.insert(page, narrowing);
        self.render(page);
        self.status_msg = self.summary_for(page);
        Ok(())
    }

    /// Open the detail panel for the `index`-th card rendered on `page`.
    pub fn show_detail(&mut self, page: Page, index: usize) -> Result<(), DetailError> {
        let cards = self.cards(page);
        let card = cards.get(index).ok_or(DetailError::IndexOutOfRange {
            page,
            index,
            len: cards.len(),
        })?;
        let key = card.key.ok_or(DetailError::NoDetail(page))?;
        self.show_detail_by_key(key)
    }

    pub fn show_detail_by_key(&mut self, key: DetailKey) -> Result<(), DetailError> {
        let panel = self.detail_panel(key)?;
        debug!("event=detail page={} id={}", key.page, key.id.0);
        self.presenter.present(&panel.title, panel.blocks, panel.options);
        Ok(())
    }

    /// Resolve a key against the catalog, never against a filtered view.
    pub fn detail_panel(&self, key: DetailKey) -> Result<DetailPanel, DetailError> {
        let DetailKey { page, id } = key;
        let panel = match page {
            Page::Publications => self
                .catalog
                .publications
                .get(id.0)
                .map(view_model::publication_detail),
            Page::Episodes => self.catalog.episodes.get(id.0).map(view_model::episode_detail),
            Page::Awards => self.catalog.awards.get(id.0).map(view_model::award_detail),
            other => return Err(DetailError::NoDetail(other)),
        };
        panel.ok_or(DetailError::UnknownRecord { page, id: id.0 })
    }

    /// Rebuild a page's cards from its current view.
    fn render(&mut self, page: Page) {
        let cards = match page {
            Page::Home => Vec::new(),
            Page::Publications => {
                view_model::cards_for(&self.publications, view_model::publication_card)
            }
            Page::Episodes => view_model::cards_for(&self.episodes, view_model::episode_card),
            Page::Awards => view_model::cards_for(&self.awards, view_model::award_card),
            Page::Testimonials => self
                .catalog
                .testimonials
                .iter()
                .map(view_model::testimonial_card)
                .collect(),
            Page::Bio => vec![view_model::bio_card(&self.catalog.bio)],
            Page::Creative => self
                .catalog
                .creative_pursuits
                .iter()
                .map(view_model::creative_card)
                .collect(),
            Page::Tools => self
                .catalog
                .tools_projects
                .iter()
                .map(view_model::tool_card)
                .collect(),
        };
        let len = cards.len();
        self.rendered.insert(page, cards);
        let selected = self.selected.entry(page).or_insert(0);
        *selected = (*selected).min(len.saturating_sub(1));
    }

    /// Cards as last rendered for `page`; empty if never rendered.
    pub fn cards(&self, page: Page) -> &[Card] {
        self.rendered.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn narrowing(&self, page: Page) -> Narrowing {
        self.narrowing.get(&page).cloned().unwrap_or_default()
    }

    pub fn selected(&self, page: Page) -> usize {
        self.selected.get(&page).copied().unwrap_or(0)
    }

    pub fn selected_card(&self) -> Option<&Card> {
        let page = self.current_page()?;
        self.cards(page).get(self.selected(page))
    }

    /// Move selection down on the current page.
    pub fn select_next(&mut self) {
        let Some(page) = self.current_page() else {
            return;
        };
        let len = self.cards(page).len();
        let selected = self.selected.entry(page).or_insert(0);
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    /// Move selection up on the current page.
    pub fn select_prev(&mut self) {
        if let Some(page) = self.current_page() {
            let selected = self.selected.entry(page).or_insert(0);
            *selected = selected.saturating_sub(1);
        }
    }

    pub fn select_first(&mut self) {
        if let Some(page) = self.current_page() {
            self.selected.insert(page, 0);
        }
    }

    pub fn select_last(&mut self) {
        if let Some(page) = self.current_page() {
            let last = self.cards(page).len().saturating_sub(1);
            self.selected.insert(page, last);
        }
    }

    pub fn scroll_down(&mut self) {
        self.doc_scroll = self.doc_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.doc_scroll = self.doc_scroll.saturating_sub(1);
    }

    pub fn show_selected_detail(&mut self) {
        let Some(page) = self.current_page() else {
            return;
        };
        let index = self.selected(page);
        match self.show_detail(page, index) {
            Ok(()) => {}
            Err(DetailError::NoDetail(_)) => {
                self.status_msg = "No details for this card".to_string();
            }
            Err(e) => {
                debug!("event=detail_miss reason={}", e);
                self.status_msg = e.to_string();
            }
        }
    }

    /// Distinct values of a page's filter dimension in catalog order.
    pub fn dimension_values(&self, page: Page) -> Vec<String> {
        match page {
            Page::Episodes => filter::dimension_values(&self.catalog.episodes),
            Page::Awards => filter::dimension_values(&self.catalog.awards),
            _ => Vec::new(),
        }
    }

    /// Step the dimension filter: all -> first value -> ... -> last -> all.
    pub fn cycle_dimension(&mut self, page: Page) -> Result<(), RouteError> {
        let values = self.dimension_values(page);
        let next = match self.narrowing(page) {
            Narrowing::Dimension(current) => values
                .iter()
                .position(|v| *v == current)
                .and_then(|i| values.get(i + 1))
                .cloned(),
            _ => values.first().cloned(),
        };
        let value = next.unwrap_or_else(|| filter::ALL.to_string());
        self.filter_by_dimension(page, &value)
    }

    /// Reset whatever narrowing the current page has.
    pub fn clear_narrowing(&mut self) {
        let Some(page) = self.current_page() else {
            return;
        };
        self.search_input.clear();
        let result = match self.narrowing(page) {
            Narrowing::All => return,
            Narrowing::Dimension(_) => self.filter_by_dimension(page, filter::ALL),
            Narrowing::Search(_) => self.search(page, ""),
        };
        if let Err(e) = result {
            debug!("event=clear_narrowing_failed reason={}", e);
        }
    }

    /// Enter search editing on the current page, if it supports search.
    /// The input starts from this page's own active query, if any.
    pub fn begin_search(&mut self) {
        match self.current_page() {
            Some(page) if page.is_searchable() => {
                self.search_input = match self.narrowing(page) {
                    Narrowing::Search(query) => query,
                    _ => String::new(),
                };
                self.input_mode = InputMode::Editing;
            }
            _ => {
                self.status_msg = "Search is not available on this page".to_string();
            }
        }
    }

    /// Re-run the search after an edit to the input buffer.
    pub fn apply_search_input(&mut self) {
        if let Some(page) = self.current_page() {
            let query = self.search_input.clone();
            if let Err(e) = self.search(page, &query) {
                self.status_msg = e.to_string();
            }
        }
    }

    fn summary_for(&self, page: Page) -> String {
        let count = self.cards(page).len();
        match self.narrowing(page) {
            Narrowing::All => format!("{}: {} shown", page.label(), count),
            Narrowing::Dimension(value) => {
                format!("{}: {} shown for \"{}\"", page.label(), count, value)
            }
            Narrowing::Search(query) => {
                format!("{}: {} matching \"{}\"", page.label(), count, query)
            }
        }
    }

    pub fn route(&self) -> &Route {
        self.router.route()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::filter::RecordId;
    use crate::modal::ModalOptions;
    use crate::view_model::Block;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<(String, Vec<Block>, ModalOptions)>,
    }

    impl ModalPresenter for Recorder {
        fn present(&mut self, title: &str, body: Vec<Block>, options: ModalOptions) {
            self.shown.push((title.to_string(), body, options));
        }
    }

    fn app() -> App<Recorder> {
        let mut app = App::new(fixtures::sample(), Recorder::default());
        app.navigate_to("home");
        app
    }

    fn titles(app: &App<Recorder>, page: Page) -> Vec<String> {
        app.cards(page).iter().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn test_initial_views_are_full() {
        let app = app();
        let catalog = fixtures::sample();
        assert_eq!(app.episodes.len(), catalog.episodes.len());
        assert_eq!(app.awards.len(), catalog.awards.len());
        assert_eq!(app.publications.len(), catalog.publications.len());
        assert_eq!(app.current_page(), Some(Page::Home));
    }

    #[test]
    fn test_navigate_renders_page() {
        let mut app = app();
        assert!(app.cards(Page::Episodes).is_empty());
        app.navigate(Page::Episodes);
        assert_eq!(titles(&app, Page::Episodes), vec!["Gut Health", "Skin Flora"]);
        assert_eq!(app.router.visible_section(), Some(Page::Episodes));
        assert_eq!(app.router.active_control(), Some(Page::Episodes));
    }

    #[test]
    fn test_navigate_is_idempotent() {
        let mut app = app();
        app.navigate_to("awards");
        let sections = app.router.sections().to_vec();
        let controls = app.router.controls().to_vec();
        let cards = app.cards(Page::Awards).to_vec();

        app.navigate_to("awards");
        assert_eq!(app.router.sections(), sections.as_slice());
        assert_eq!(app.router.controls(), controls.as_slice());
        assert_eq!(app.cards(Page::Awards), cards.as_slice());
    }

    #[test]
    fn test_navigate_resets_selection() {
        let mut app = app();
        app.navigate(Page::Awards);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected(Page::Awards), 2);
        app.select_next();
        assert_eq!(app.selected(Page::Awards), 2);

        app.navigate(Page::Bio);
        app.navigate(Page::Awards);
        assert_eq!(app.selected(Page::Awards), 0);
    }

    #[test]
    fn test_select_first_last_and_doc_scroll() {
        let mut app = app();
        app.navigate(Page::Awards);
        app.select_last();
        assert_eq!(app.selected(Page::Awards), 2);
        app.select_first();
        assert_eq!(app.selected(Page::Awards), 0);

        app.navigate(Page::Bio);
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.doc_scroll, 2);
        app.navigate(Page::Bio);
        assert_eq!(app.doc_scroll, 0);
    }

    #[test]
    fn test_unknown_page_shows_nothing() {
        let mut app = app();
        app.navigate_to("contact");
        assert_eq!(app.route(), &Route::Unknown("contact".to_string()));
        assert_eq!(app.router.visible_section(), None);
        assert!(app.selected_card().is_none());
    }

    #[test]
    fn test_filter_all_restores_catalog_order() {
        let mut app = app();
        app.filter_by_dimension(Page::Awards, "Outreach").unwrap();
        assert_eq!(app.awards.ids(), vec![RecordId(1)]);

        app.filter_by_dimension(Page::Awards, "all").unwrap();
        assert_eq!(app.awards, FilteredView::full(&app.catalog.awards));
        assert_eq!(app.narrowing(Page::Awards), Narrowing::All);
    }

    #[test]
    fn test_filter_renders_immediately_and_leaves_other_pages() {
        let mut app = app();
        app.navigate(Page::Awards);
        app.filter_by_dimension(Page::Episodes, "Nutrition").unwrap();

        assert_eq!(titles(&app, Page::Episodes), vec!["Gut Health"]);
        assert_eq!(app.cards(Page::Awards).len(), 3);
        assert_eq!(app.awards.len(), 3);
        assert_eq!(app.current_page(), Some(Page::Awards));
    }

    #[test]
    fn test_filter_unknown_value_is_empty() {
        let mut app = app();
        app.filter_by_dimension(Page::Episodes, "Unknown").unwrap();
        assert!(app.episodes.is_empty());
        assert!(app.cards(Page::Episodes).is_empty());
    }

    #[test]
    fn test_search_examples() {
        let mut app = app();
        app.search(Page::Episodes, "gut").unwrap();
        assert_eq!(titles(&app, Page::Episodes), vec!["Gut Health"]);
        assert_eq!(app.narrowing(Page::Episodes), Narrowing::Search("gut".to_string()));

        app.search(Page::Episodes, "").unwrap();
        let after_empty_search = app.episodes.clone();
        app.filter_by_dimension(Page::Episodes, "all").unwrap();
        assert_eq!(after_empty_search, app.episodes);
    }

    #[test]
    fn test_filter_and_search_last_write_wins() {
        let mut app = app();
        app.filter_by_dimension(Page::Episodes, "Dermatology").unwrap();
        app.search(Page::Episodes, "gut").unwrap();
        // Not intersected: the theme filter is discarded.
        assert_eq!(app.episodes.ids(), vec![RecordId(0)]);

        app.filter_by_dimension(Page::Episodes, "Dermatology").unwrap();
        assert_eq!(app.episodes.ids(), vec![RecordId(1)]);
    }

    #[test]
    fn test_unsupported_narrowing() {
        let mut app = app();
        assert_eq!(
            app.filter_by_dimension(Page::Bio, "x"),
            Err(RouteError::NotFilterable(Page::Bio))
        );
        assert_eq!(
            app.search(Page::Awards, "x"),
            Err(RouteError::NotSearchable(Page::Awards))
        );
    }

    #[test]
    fn test_show_detail_presents_record() {
        let mut app = app();
        app.navigate(Page::Episodes);
        app.show_detail(Page::Episodes, 1).unwrap();

        let (title, body, options) = &app.presenter.shown[0];
        assert_eq!(title, "Episode 2: Skin Flora");
        assert!(body.contains(&Block::Text("Commensals living on the skin barrier.".to_string())));
        assert_eq!(*options, ModalOptions::tall());
    }

    #[test]
    fn test_show_detail_out_of_range() {
        let mut app = app();
        app.navigate(Page::Episodes);
        assert_eq!(
            app.show_detail(Page::Episodes, 2),
            Err(DetailError::IndexOutOfRange {
                page: Page::Episodes,
                index: 2,
                len: 2
            })
        );
        assert!(app.presenter.shown.is_empty());
    }

    #[test]
    fn test_show_detail_follows_latest_render() {
        let mut app = app();
        app.navigate(Page::Episodes);
        app.filter_by_dimension(Page::Episodes, "Dermatology").unwrap();

        // Index 0 now names "Skin Flora", not the catalog's first episode.
        app.show_detail(Page::Episodes, 0).unwrap();
        assert_eq!(app.presenter.shown[0].0, "Episode 2: Skin Flora");
        assert!(app.show_detail(Page::Episodes, 1).is_err());
    }

    #[test]
    fn test_detail_key_survives_filter_change() {
        let mut app = app();
        app.navigate(Page::Awards);
        let key = app.cards(Page::Awards)[2].key.unwrap();

        app.filter_by_dimension(Page::Awards, "Outreach").unwrap();
        app.show_detail_by_key(key).unwrap();
        assert_eq!(app.presenter.shown[0].0, "Early Career Grant");
    }

    #[test]
    fn test_cards_without_detail_action() {
        let mut app = app();
        app.navigate(Page::Testimonials);
        assert_eq!(
            app.show_detail(Page::Testimonials, 0),
            Err(DetailError::NoDetail(Page::Testimonials))
        );
        app.show_selected_detail();
        assert_eq!(app.status_msg, "No details for this card");
    }

    #[test]
    fn test_unrendered_page_has_no_cards() {
        let mut app = app();
        assert!(matches!(
            app.show_detail(Page::Publications, 0),
            Err(DetailError::IndexOutOfRange { len: 0, .. })
        ));
    }

    #[test]
    fn test_cycle_dimension_wraps_to_all() {
        let mut app = app();
        app.cycle_dimension(Page::Awards).unwrap();
        assert_eq!(app.narrowing(Page::Awards), Narrowing::Dimension("Research".to_string()));
        app.cycle_dimension(Page::Awards).unwrap();
        assert_eq!(app.narrowing(Page::Awards), Narrowing::Dimension("Outreach".to_string()));
        app.cycle_dimension(Page::Awards).unwrap();
        assert_eq!(app.narrowing(Page::Awards), Narrowing::All);
        assert_eq!(app.awards.len(), 3);
    }

    #[test]
    fn test_clear_narrowing_on_current_page() {
        let mut app = app();
        app.navigate(Page::Episodes);
        app.search_input = "skin".to_string();
        app.apply_search_input();
        assert_eq!(app.episodes.len(), 1);

        app.clear_narrowing();
        assert_eq!(app.episodes.len(), 2);
        assert!(app.search_input.is_empty());
    }

    #[test]
    fn test_begin_search_only_where_supported() {
        let mut app = app();
        app.navigate(Page::Awards);
        app.begin_search();
        assert_eq!(app.input_mode, InputMode::Normal);

        app.navigate(Page::Publications);
        app.begin_search();
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_search_input_belongs_to_current_page() {
        let mut app = app();
        app.navigate(Page::Episodes);
        app.begin_search();
        app.search_input = "gut".to_string();
        app.apply_search_input();

        app.navigate(Page::Publications);
        app.begin_search();
        assert!(app.search_input.is_empty());
        app.search_input = "fibre".to_string();
        app.apply_search_input();

        app.navigate(Page::Episodes);
        app.begin_search();
        assert_eq!(app.search_input, "gut");
        app.search_input.push('h');
        app.apply_search_input();
        assert_eq!(app.narrowing(Page::Episodes), Narrowing::Search("guth".to_string()));
        assert_eq!(
            app.narrowing(Page::Publications),
            Narrowing::Search("fibre".to_string())
        );
    }

    #[test]
    fn test_selection_clamped_after_filter() {
        let mut app = app();
        app.navigate(Page::Awards);
        app.select_next();
        app.select_next();
        app.filter_by_dimension(Page::Awards, "Outreach").unwrap();
        assert_eq!(app.selected(Page::Awards), 0);
        assert_eq!(app.selected_card().map(|c| c.title.as_str()), Some("Science Communicator of the Year"));
    }
}
