use crate::embed::Embed;

/// Buttons offered by a result menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    First,
    Previous,
    Next,
    Last,
    /// Jump to a zero-based page index
    JumpTo(usize),
    Stop,
}

impl MenuAction {
    /// Parse a typed menu command. Page numbers are one-based.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_ascii_lowercase();
        match input.as_str() {
            "f" | "first" | "<<" => Some(MenuAction::First),
            "p" | "prev" | "previous" | "<" => Some(MenuAction::Previous),
            "n" | "next" | ">" | "" => Some(MenuAction::Next),
            "l" | "last" | ">>" => Some(MenuAction::Last),
            "q" | "quit" | "stop" | "x" => Some(MenuAction::Stop),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(|n| MenuAction::JumpTo(n - 1)),
        }
    }
}

/// Ordered entries served one page at a time.
///
/// The current page index always stays within `0..page_count()` (or is 0 for
/// an empty source); every navigation call clamps instead of failing.
#[derive(Debug, Clone)]
pub struct PageSource<T> {
    entries: Vec<T>,
    per_page: usize,
    current: usize,
}

impl<T> PageSource<T> {
    /// Create a source; a page size of 0 is treated as 1
    pub fn new(entries: Vec<T>, per_page: usize) -> Self {
        Self {
            entries,
            per_page: per_page.max(1),
            current: 0,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(self.per_page)
    }

    /// Zero-based index of the page on display
    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Entries on the given page, empty when out of range
    pub fn entries_for(&self, page: usize) -> &[T] {
        let start = page.saturating_mul(self.per_page).min(self.entries.len());
        let end = start.saturating_add(self.per_page).min(self.entries.len());
        &self.entries[start..end]
    }

    pub fn current_entries(&self) -> &[T] {
        self.entries_for(self.current)
    }

    fn last_index(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Move to `page`, clamped to the valid range. Returns whether the page changed.
    pub fn jump_to(&mut self, page: usize) -> bool {
        let target = page.min(self.last_index());
        let changed = target != self.current;
        self.current = target;
        changed
    }

    pub fn next(&mut self) -> bool {
        self.jump_to(self.current.saturating_add(1))
    }

    pub fn previous(&mut self) -> bool {
        self.jump_to(self.current.saturating_sub(1))
    }

    pub fn first(&mut self) -> bool {
        self.jump_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.jump_to(self.last_index())
    }

    /// Apply a menu button. `Stop` never changes the page.
    pub fn apply(&mut self, action: MenuAction) -> bool {
        match action {
            MenuAction::First => self.first(),
            MenuAction::Previous => self.previous(),
            MenuAction::Next => self.next(),
            MenuAction::Last => self.last(),
            MenuAction::JumpTo(page) => self.jump_to(page),
            MenuAction::Stop => false,
        }
    }
}

/// Turns the entries of one page into an embed
pub trait PageFormatter<T>: Send {
    fn format_page(&self, page: usize, page_count: usize, entries: &[T]) -> Embed;
}

/// Formatter for sources whose entries are already rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct Prerendered;

impl PageFormatter<Embed> for Prerendered {
    fn format_page(&self, _page: usize, _page_count: usize, entries: &[Embed]) -> Embed {
        entries.first().cloned().unwrap_or_default()
    }
}

impl<T, F> PageFormatter<T> for F
where
    F: Fn(usize, usize, &[T]) -> Embed + Send,
{
    fn format_page(&self, page: usize, page_count: usize, entries: &[T]) -> Embed {
        self(page, page_count, entries)
    }
}

/// What an interactive menu needs from its data, independent of entry type
pub trait MenuSession: Send {
    fn page_count(&self) -> usize;
    fn current_page(&self) -> usize;
    /// Apply a button press, returning whether the page changed
    fn navigate(&mut self, action: MenuAction) -> bool;
    /// Render the page on display
    fn render(&self) -> Embed;
}

/// A page source paired with the formatter that renders it
pub struct Menu<T, F> {
    source: PageSource<T>,
    formatter: F,
}

impl<T, F> Menu<T, F>
where
    T: Send,
    F: PageFormatter<T>,
{
    pub fn new(source: PageSource<T>, formatter: F) -> Self {
        Self { source, formatter }
    }
}

impl Menu<Embed, Prerendered> {
    /// One embed per page
    pub fn from_embeds(embeds: Vec<Embed>) -> Self {
        Self::new(PageSource::new(embeds, 1), Prerendered)
    }
}

impl<T, F> MenuSession for Menu<T, F>
where
    T: Send,
    F: PageFormatter<T>,
{
    fn page_count(&self) -> usize {
        self.source.page_count()
    }

    fn current_page(&self) -> usize {
        self.source.current_page()
    }

    fn navigate(&mut self, action: MenuAction) -> bool {
        self.source.apply(action)
    }

    fn render(&self) -> Embed {
        self.formatter.format_page(
            self.source.current_page(),
            self.source.page_count(),
            self.source.current_entries(),
        )
    }
}
