//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready strings and flags only.

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Filter box, shown while editing or while a filter is applied.
    pub search_bar: Option<SearchBarInfo>,

    /// Main area of the current screen.
    pub body: Body,

    pub footer: FooterInfo,

    /// Modal alert drawn over everything else.
    pub alert: Option<AlertInfo>,
}

/// What fills the area between header and footer.
#[derive(Debug, Clone)]
pub enum Body {
    /// Records of a directory screen.
    List(ListView),
    /// Loading, failure or no-records message in place of the list.
    Empty(EmptyState),
    /// The registration form.
    Form(FormView),
}

/// Tab bar, title and data freshness.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub tabs: Vec<TabInfo>,
    /// "updated 5m ago", "loading…" and the like.
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TabInfo {
    /// Digit key that activates the tab.
    pub key: usize,
    pub label: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct ListView {
    /// Windowed slice of the visible records.
    pub items: Vec<DisplayItem>,

    /// Index of the selected record within `items`.
    pub selected_index: usize,

    /// The filter matched nothing.
    pub no_matches: bool,

    /// Labelled fields of the selected record.
    pub details: Vec<DetailLine>,
}

/// One table row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub title: String,
    pub district: String,
    pub summary: String,
    pub is_selected: bool,

    /// Character range of the filter match within `district`.
    pub highlight_range: Option<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
}

/// Centered message shown instead of a list.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Drawn in the error color.
    pub is_error: bool,
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub fields: Vec<FormFieldView>,
    /// A submission is waiting for the server.
    pub is_pending: bool,
}

#[derive(Debug, Clone)]
pub struct FormFieldView {
    pub label: String,
    pub value: String,
    pub is_focused: bool,
    /// Picked with ←/→ rather than typed.
    pub is_choice: bool,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Keys currently go to the query.
    pub is_editing: bool,
}

#[derive(Debug, Clone)]
pub struct AlertInfo {
    pub title: String,
    pub message: String,
}
