use crate::controller::{Controller, ModalState, Surface, Thumbnail};
use crate::detail::{DetailView, ModalContent};
use crate::item::Category;
use crate::loader::{CatalogSource, LoadCoordinator, LoadMessage};
use crate::sort::SortPolicy;
use crate::ui;
use ratatui::layout::Rect;
use tracing::{error, info};

/// A mounted tile and its pre-built hover panel.
#[derive(Debug, Clone)]
pub struct Tile {
    pub thumbnail: Thumbnail,
    pub panel: DetailView,
    pub panel_visible: bool,
}

/// Terminal implementation of the presentation surface.
#[derive(Debug, Default)]
pub struct TuiSurface {
    pub tiles: Vec<Tile>,
    pub modal: Option<ModalContent>,
}

impl TuiSurface {
    /// The hover panel currently shown, if any.
    pub fn visible_panel(&self) -> Option<&DetailView> {
        self.tiles.iter().find(|t| t.panel_visible).map(|t| &t.panel)
    }
}

impl Surface for TuiSurface {
    fn clear(&mut self) {
        self.tiles.clear();
    }

    fn mount(&mut self, index: usize, thumbnail: Thumbnail, panel: DetailView) {
        debug_assert_eq!(index, self.tiles.len());
        self.tiles.push(Tile {
            thumbnail,
            panel,
            panel_visible: false,
        });
    }

    fn set_panel_visible(&mut self, index: usize, visible: bool) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.panel_visible = visible;
        }
    }

    fn show_modal(&mut self, content: ModalContent) {
        self.modal = Some(content);
    }

    fn hide_modal(&mut self) {
        self.modal = None;
    }
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,

    pub category: Category,
    pub policy: SortPolicy,
    pub controller: Controller<TuiSurface>,
    loads: LoadCoordinator,
    pub loading: bool,

    // Grid state
    pub cursor: usize,
    pub scroll_row: usize,
    pub area: Rect,

    pub modal_scroll: u16,

    pub status_msg: String,
}

impl App {
    pub fn new(source: CatalogSource, policy: SortPolicy) -> Self {
        Self {
            should_quit: false,
            show_help: false,

            category: Category::Projectiles,
            policy,
            controller: Controller::new(TuiSurface::default()),
            loads: LoadCoordinator::new(source),
            loading: false,

            cursor: 0,
            scroll_row: 0,
            area: Rect::new(0, 0, 80, 24),

            modal_scroll: 0,

            status_msg: "Pick a category (1-3)".to_string(),
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.controller.surface().tiles
    }

    pub fn modal(&self) -> Option<&ModalContent> {
        match self.controller.modal() {
            ModalState::Hidden => None,
            ModalState::Visible(_) => self.controller.surface().modal.as_ref(),
        }
    }

    /// Clear the current content and fetch `category` in the background.
    pub fn start_load(&mut self, category: Category) {
        self.controller.reset();
        self.category = category;
        self.cursor = 0;
        self.scroll_row = 0;
        self.loading = true;
        let generation = self.loads.start(category);
        info!(category = category.key(), generation, "category selected");
        self.status_msg = format!("Loading {}...", category.label());
    }

    pub fn reload(&mut self) {
        self.start_load(self.category);
    }

    pub fn next_category(&mut self) {
        self.start_load(self.category.next());
    }

    pub fn prev_category(&mut self) {
        self.start_load(self.category.prev());
    }

    /// Apply any finished loads. Called once per event loop tick.
    pub fn poll_loads(&mut self) {
        while let Some(message) = self.loads.try_next() {
            self.apply_load(message);
        }
    }

    /// Wait for the current load to finish and apply it.
    pub async fn wait_for_load(&mut self) {
        if let Some(message) = self.loads.next().await {
            self.apply_load(message);
        }
    }

    fn apply_load(&mut self, message: LoadMessage) {
        self.loading = false;
        match message {
            LoadMessage::Loaded {
                category, items, ..
            } => {
                let count = items.len();
                self.controller.mount(items, self.policy);
                self.cursor = 0;
                self.scroll_row = 0;
                self.controller.on_hover_enter(0);
                self.status_msg = format!(
                    "{} {} (sorted by {})",
                    count,
                    category.label().to_lowercase(),
                    self.policy.label()
                );
            }
            LoadMessage::Failed {
                category, error, ..
            } => {
                error!(category = category.key(), error = %error, "load failed");
                self.status_msg = if error.is_retryable() {
                    format!("{} (r to retry)", error.user_message())
                } else {
                    error.user_message()
                };
            }
        }
    }

    /// Switch the sort policy and remount the current items.
    pub fn cycle_sort_policy(&mut self) {
        self.policy = match self.policy {
            SortPolicy::TypeThenName => SortPolicy::Id,
            SortPolicy::Id => SortPolicy::TypeThenName,
        };
        let items = self.controller.items().to_vec();
        if !items.is_empty() {
            self.controller.mount(items, self.policy);
            self.cursor = 0;
            self.scroll_row = 0;
            self.controller.on_hover_enter(0);
        }
        self.status_msg = format!("Sorted by {}", self.policy.label());
    }

    /// Track terminal size; grid geometry is derived from it.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        self.ensure_cursor_visible();
    }

    fn columns(&self) -> usize {
        ui::grid::columns(ui::screen_layout(self.area).grid)
    }

    /// Move the hover cursor to `index`, hiding the previous panel.
    pub fn hover(&mut self, index: usize) {
        if index >= self.tiles().len() || index == self.cursor {
            return;
        }
        self.controller.on_hover_exit(self.cursor);
        self.cursor = index;
        self.controller.on_hover_enter(index);
        self.ensure_cursor_visible();
    }

    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.tiles().len();
        if len == 0 {
            return;
        }
        let columns = self.columns() as isize;
        let target = self.cursor as isize + dx + dy * columns;
        self.hover(target.clamp(0, len as isize - 1) as usize);
    }

    pub fn cursor_first(&mut self) {
        self.hover(0);
    }

    pub fn cursor_last(&mut self) {
        self.hover(self.tiles().len().saturating_sub(1));
    }

    fn ensure_cursor_visible(&mut self) {
        let layout = ui::screen_layout(self.area);
        let columns = ui::grid::columns(layout.grid);
        let rows = ui::grid::visible_rows(layout.grid).max(1);
        let row = self.cursor / columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + rows {
            self.scroll_row = row + 1 - rows;
        }
    }

    pub fn select(&mut self, index: usize) {
        self.controller.on_select(index);
        self.modal_scroll = 0;
    }

    pub fn select_cursor(&mut self) {
        self.select(self.cursor);
    }

    pub fn close_modal(&mut self) {
        self.controller.on_close();
    }

    pub fn backdrop(&mut self) {
        self.controller.handle(crate::controller::PresentationEvent::Backdrop);
    }

    pub fn scroll_down(&mut self) {
        self.modal_scroll = self.modal_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.modal_scroll = self.modal_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(files: &[(Category, &str)]) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        for (category, body) in files {
            std::fs::write(dir.path().join(category.file_name()), body).unwrap();
        }
        let app = App::new(
            CatalogSource::Directory(dir.path().to_path_buf()),
            SortPolicy::TypeThenName,
        );
        (app, dir)
    }

    fn tile_names(app: &App) -> Vec<String> {
        app.tiles().iter().map(|t| t.thumbnail.name.clone()).collect()
    }

    const PROJECTILES: &str =
        r#"[{"id":"b","name":"Zed","type":"Gun"},{"id":"a","name":"Arc","type":"Gun"}]"#;

    #[tokio::test]
    async fn test_load_projectiles_sorted_by_type_then_name() {
        let (mut app, _dir) = app_with(&[(Category::Projectiles, PROJECTILES)]);
        app.start_load(Category::Projectiles);
        assert!(app.loading);
        app.wait_for_load().await;

        assert!(!app.loading);
        assert_eq!(tile_names(&app), vec!["Arc", "Zed"]);
        assert!(app.tiles()[0].panel_visible);
        assert!(app.status_msg.starts_with("2 projectiles"));
    }

    #[tokio::test]
    async fn test_failed_load_leaves_nothing_mounted() {
        let (mut app, _dir) = app_with(&[(Category::Projectiles, PROJECTILES)]);
        app.start_load(Category::Projectiles);
        app.wait_for_load().await;
        app.select(0);

        app.start_load(Category::Artifacts);
        app.wait_for_load().await;

        assert!(app.tiles().is_empty());
        assert!(app.modal().is_none());
        assert!(app.status_msg.starts_with("Cannot read"));
    }

    #[tokio::test]
    async fn test_malformed_body_reports_format_error() {
        let (mut app, _dir) = app_with(&[(Category::Trinkets, "[{")]);
        app.start_load(Category::Trinkets);
        app.wait_for_load().await;
        assert!(app.tiles().is_empty());
        assert_eq!(app.status_msg, "Data format error");
    }

    #[tokio::test]
    async fn test_http_not_found_reports_retry() {
        let base = crate::loader::tests::serve_once("404 Not Found", "").await;
        let source = CatalogSource::from_location(&base, None).unwrap();
        let mut app = App::new(source, SortPolicy::TypeThenName);
        app.start_load(Category::Projectiles);
        app.wait_for_load().await;

        assert!(!app.loading);
        assert!(app.tiles().is_empty());
        assert!(app.modal().is_none());
        assert_eq!(app.status_msg, "Server answered 404 (r to retry)");
    }

    #[tokio::test]
    async fn test_cursor_moves_hover_panel() {
        let (mut app, _dir) = app_with(&[(Category::Projectiles, PROJECTILES)]);
        app.start_load(Category::Projectiles);
        app.wait_for_load().await;

        app.move_cursor(1, 0);
        assert_eq!(app.cursor, 1);
        assert!(!app.tiles()[0].panel_visible);
        assert!(app.tiles()[1].panel_visible);
        assert_eq!(
            app.controller.surface().visible_panel().and_then(|p| p.title.as_deref()),
            Some("Zed")
        );

        app.move_cursor(5, 0);
        assert_eq!(app.cursor, 1);
    }

    #[tokio::test]
    async fn test_modal_select_replace_close() {
        let (mut app, _dir) = app_with(&[(Category::Projectiles, PROJECTILES)]);
        app.start_load(Category::Projectiles);
        app.wait_for_load().await;

        app.select(0);
        assert_eq!(app.modal().map(|m| m.name.as_str()), Some("Arc"));
        app.select(1);
        assert_eq!(app.modal().map(|m| m.name.as_str()), Some("Zed"));
        app.backdrop();
        assert!(app.modal().is_none());
        app.select_cursor();
        app.close_modal();
        assert!(app.modal().is_none());
    }

    #[tokio::test]
    async fn test_cycle_sort_policy_remounts() {
        let (mut app, _dir) = app_with(&[(
            Category::Artifacts,
            r#"[{"id":"a","name":"Zulu","type":"B"},{"id":"b","name":"Alpha","type":"A"},{"name":"NoId","type":"A"}]"#,
        )]);
        app.start_load(Category::Artifacts);
        app.wait_for_load().await;
        assert_eq!(tile_names(&app), vec!["Alpha", "NoId", "Zulu"]);

        app.cycle_sort_policy();
        assert_eq!(app.policy, SortPolicy::Id);
        assert_eq!(tile_names(&app), vec!["Zulu", "Alpha", "NoId"]);
    }
}
