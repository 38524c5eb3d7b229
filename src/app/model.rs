use crate::catalog::{Release, Track};

/// Which page the main area is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    /// Index into the discography.
    Release(usize),
}

/// Focusable panes on the home page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum HomePane {
    #[default]
    Popular,
    Discography,
}

/// The navigation model: screen, cursors and overlay state.
pub struct App {
    pub releases: Vec<Release>,
    pub all_tracks: Vec<Track>,

    pub screen: Screen,
    pub home_pane: HomePane,
    /// Cursor within the home "Popular" pane.
    pub popular_selected: usize,
    /// Cursor within the home discography pane.
    pub release_selected: usize,
    /// Cursor within a release page's track list.
    pub track_selected: usize,

    pub queue_open: bool,
    /// Cursor within the queue sidebar's "Up Next" list.
    pub queue_selected: usize,

    pub music_dir: Option<String>,
}

impl App {
    /// Create a new `App` over the built catalog.
    pub fn new(releases: Vec<Release>, all_tracks: Vec<Track>) -> Self {
        Self {
            releases,
            all_tracks,
            screen: Screen::Home,
            home_pane: HomePane::default(),
            popular_selected: 0,
            release_selected: 0,
            track_selected: 0,
            queue_open: false,
            queue_selected: 0,
            music_dir: None,
        }
    }

    /// Record the music directory in the app state.
    pub fn set_music_dir(&mut self, dir: String) {
        self.music_dir = Some(dir);
    }

    /// The release whose page is currently open, if any.
    pub fn current_release(&self) -> Option<&Release> {
        match self.screen {
            Screen::Home => None,
            Screen::Release(idx) => self.releases.get(idx),
        }
    }

    /// Cursor of the focused list on the current screen.
    fn cursor_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Home => match self.home_pane {
                HomePane::Popular => &mut self.popular_selected,
                HomePane::Discography => &mut self.release_selected,
            },
            Screen::Release(_) => &mut self.track_selected,
        }
    }

    /// Move the focused cursor down, wrapping at the end of a `len`-item list.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let cursor = self.cursor_mut();
        *cursor = (*cursor + 1) % len;
    }

    /// Move the focused cursor up, wrapping to the last of `len` items.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let cursor = self.cursor_mut();
        *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 };
    }

    pub fn select_first(&mut self) {
        *self.cursor_mut() = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        *self.cursor_mut() = len - 1;
    }

    /// Flip focus between the two home panes. No effect on a release page.
    pub fn cycle_home_pane(&mut self) {
        if self.screen != Screen::Home {
            return;
        }
        self.home_pane = match self.home_pane {
            HomePane::Popular => HomePane::Discography,
            HomePane::Discography => HomePane::Popular,
        };
    }

    /// Open the release under the discography cursor.
    pub fn open_selected_release(&mut self) {
        if self.release_selected < self.releases.len() {
            self.screen = Screen::Release(self.release_selected);
            self.track_selected = 0;
        }
    }

    /// Return to the home page from a release page.
    pub fn back(&mut self) {
        self.screen = Screen::Home;
        self.track_selected = 0;
    }

    pub fn open_queue(&mut self) {
        self.queue_open = true;
        self.queue_selected = 0;
    }

    pub fn close_queue(&mut self) {
        self.queue_open = false;
    }

    /// Move the queue cursor down, wrapping within `len` queued tracks.
    pub fn queue_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.queue_selected = (self.queue_selected + 1) % len;
    }

    /// Move the queue cursor up, wrapping within `len` queued tracks.
    pub fn queue_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.queue_selected = if self.queue_selected == 0 {
            len - 1
        } else {
            self.queue_selected - 1
        };
    }

    /// Keep the queue cursor inside the queue as it shrinks.
    pub fn clamp_queue_cursor(&mut self, len: usize) {
        if len == 0 {
            self.queue_selected = 0;
        } else if self.queue_selected >= len {
            self.queue_selected = len - 1;
        }
    }

    /// Return true if the catalog contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.all_tracks.is_empty()
    }
}
