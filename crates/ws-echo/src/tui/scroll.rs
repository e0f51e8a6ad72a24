//! Scrolling the message list.

use echo_transport::Transport;

use super::App;

impl<T: Transport> App<T> {
    fn max_scroll(&self) -> usize {
        self.panel.log().len().saturating_sub(1)
    }

    /// Scroll to the bottom of the list.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll up by a page.
    pub fn scroll_page_up(&mut self, page_size: usize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(page_size)
            .min(self.max_scroll());
    }

    /// Scroll down by a page.
    pub fn scroll_page_down(&mut self, page_size: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }
}
