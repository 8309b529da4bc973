/// A cyclable choice over a list of values, where position 0 means "all".
#[derive(Debug, Clone)]
pub struct Selector {
    pub label: &'static str,
    all_label: &'static str,
    options: Vec<String>,
    /// 0 = all, otherwise `options[index - 1]`.
    index: usize,
}

impl Selector {
    pub fn new(label: &'static str, all_label: &'static str) -> Self {
        Self {
            label,
            all_label,
            options: Vec::new(),
            index: 0,
        }
    }

    /// Replace the available values, keeping the current choice if it survives.
    pub fn set_options(&mut self, options: Vec<String>) {
        let current = self.selected().map(str::to_string);
        self.options = options;
        self.index = current
            .and_then(|c| self.options.iter().position(|o| *o == c))
            .map_or(0, |pos| pos + 1);
    }

    pub fn selected(&self) -> Option<&str> {
        match self.index {
            0 => None,
            i => self.options.get(i - 1).map(String::as_str),
        }
    }

    pub fn display(&self) -> &str {
        self.selected().unwrap_or(self.all_label)
    }

    pub fn is_filtering(&self) -> bool {
        self.index != 0
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % (self.options.len() + 1);
    }

    pub fn previous(&mut self) {
        let len = self.options.len() + 1;
        self.index = (self.index + len - 1) % len;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> Selector {
        let mut s = Selector::new("Browser", "All");
        s.set_options(vec!["chromium".into(), "firefox".into()]);
        s
    }

    #[test]
    fn cycles_through_all_and_options() {
        let mut s = selector();
        assert_eq!(s.display(), "All");
        s.next();
        assert_eq!(s.selected(), Some("chromium"));
        s.next();
        s.next();
        assert_eq!(s.selected(), None);
        s.previous();
        assert_eq!(s.selected(), Some("firefox"));
    }

    #[test]
    fn choice_survives_option_refresh() {
        let mut s = selector();
        s.next();
        s.next();
        s.set_options(vec!["firefox".into(), "webkit".into()]);
        assert_eq!(s.selected(), Some("firefox"));
        s.set_options(vec!["webkit".into()]);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn empty_selector_stays_on_all() {
        let mut s = Selector::new("Env", "Latest run");
        s.next();
        assert_eq!(s.display(), "Latest run");
        assert!(!s.is_filtering());
    }
}
