/// One panel of a dashboard: its items plus loading and feedback state.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> Default for SectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            message: None,
        }
    }
}

impl<T> SectionState<T> {
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
    }

    pub fn failed(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_string());
    }

    /// Clears feedback before a mutation.
    pub fn reset_feedback(&mut self) {
        self.error = None;
        self.message = None;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_cycle() {
        let mut section: SectionState<u32> = SectionState::default();
        section.failed("boom");
        section.start_loading();
        assert!(section.loading);
        assert!(section.error.is_none());

        section.loaded(vec![1, 2]);
        assert!(!section.loading);
        assert_eq!(section.items, vec![1, 2]);

        section.message = Some("ok".into());
        section.reset_feedback();
        assert!(section.message.is_none());
    }
}
