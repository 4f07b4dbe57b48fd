/// A read-only drop-down: a list of options, a highlight cursor and the committed choice.
#[derive(Debug)]
pub struct Selector {
    label: &'static str,
    options: Vec<String>,
    highlighted: usize,
    chosen: Option<String>,
}

impl Selector {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            options: Vec::new(),
            highlighted: 0,
            chosen: None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Replaces the options and drops the current choice.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.highlighted = 0;
        self.chosen = None;
    }

    pub fn clear(&mut self) {
        self.set_options(Vec::new());
    }

    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    /// Commits `name` if it is one of the options.
    pub fn choose(&mut self, name: &str) -> bool {
        match self.options.iter().position(|o| o == name) {
            Some(pos) => {
                self.highlighted = pos;
                self.chosen = Some(name.to_string());
                true
            }
            None => false,
        }
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        if self.options.is_empty() {
            None
        } else {
            Some(self.highlighted)
        }
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.options.get(self.highlighted).map(String::as_str)
    }

    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.highlighted = (self.highlighted + 1) % self.options.len();
    }

    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        self.highlighted = if self.highlighted == 0 { len - 1 } else { self.highlighted - 1 };
    }

    pub fn page_down(&mut self, amount: usize) {
        if let Some(last) = self.options.len().checked_sub(1) {
            self.highlighted = self.highlighted.saturating_add(amount).min(last);
        }
    }

    pub fn page_up(&mut self, amount: usize) {
        self.highlighted = self.highlighted.saturating_sub(amount);
    }

    pub fn first(&mut self) {
        self.highlighted = 0;
    }

    pub fn last(&mut self) {
        self.highlighted = self.options.len().saturating_sub(1);
    }
}
