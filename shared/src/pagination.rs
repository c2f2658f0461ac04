/// Page math behind the pagination control. Only exists when there is more
/// than one page to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: u32,
    total_pages: u32,
}

impl PageWindow {
    /// `page` is zero-based. Returns `None` when the control should not render:
    /// zero size, zero total, or a single page of results.
    pub fn new(page: u32, total: u32, size: u32) -> Option<Self> {
        if size == 0 || total == 0 {
            return None;
        }
        let total_pages = total.div_ceil(size);
        if total_pages <= 1 {
            return None;
        }
        Some(Self {
            page: page.min(total_pages - 1),
            total_pages,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages - 1
    }

    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn label(&self) -> String {
        format!("PAGE {} OF {}", self.page + 1, self.total_pages)
    }

    /// Resolve a 1-based page number typed by the user into a clamped
    /// zero-based page.
    pub fn jump_target(&self, input: &str) -> Option<u32> {
        let requested: i64 = input.trim().parse().ok()?;
        let clamped = requested.clamp(1, i64::from(self.total_pages));
        Some((clamped - 1) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::PageWindow;

    #[test]
    fn single_page_renders_nothing() {
        assert_eq!(PageWindow::new(0, 3, 20), None);
        assert_eq!(PageWindow::new(0, 20, 20), None);
        assert_eq!(PageWindow::new(0, 0, 20), None);
        assert_eq!(PageWindow::new(0, 45, 0), None);
    }

    #[test]
    fn last_page_disables_next_only() {
        let window = PageWindow::new(2, 45, 20).expect("three pages");
        assert_eq!(window.total_pages(), 3);
        assert!(window.has_prev());
        assert!(!window.has_next());
        assert_eq!(window.prev(), Some(1));
        assert_eq!(window.next(), None);
        assert_eq!(window.label(), "PAGE 3 OF 3");
    }

    #[test]
    fn first_page_disables_prev_only() {
        let window = PageWindow::new(0, 21, 20).expect("two pages");
        assert!(!window.has_prev());
        assert!(window.has_next());
        assert_eq!(window.next(), Some(1));
    }

    #[test]
    fn jump_target_clamps_user_input() {
        let window = PageWindow::new(0, 100, 15).expect("seven pages");
        assert_eq!(window.jump_target("3"), Some(2));
        assert_eq!(window.jump_target(" 99 "), Some(6));
        assert_eq!(window.jump_target("0"), Some(0));
        assert_eq!(window.jump_target("-4"), Some(0));
        assert_eq!(window.jump_target("abc"), None);
    }
}
