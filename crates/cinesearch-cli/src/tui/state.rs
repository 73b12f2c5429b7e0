//! Browser TUI state management.
//!
//! Holds only presentation state (input buffers, cursor, status line).
//! Search results, pagination and the detail panel live in
//! [`crate::browser::ViewState`].

use ratatui::widgets::TableState;

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys.
    Normal,
    /// Typing into the search box.
    Search,
    /// Typing a comment for the displayed item.
    Comment,
    /// Waiting for a star count (1-5).
    Rate,
}

/// State for the browser TUI.
#[derive(Debug)]
pub struct TuiState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search box text.
    pub search_input: String,
    /// Comment box text.
    pub comment_input: String,
    /// Table state for the result cards (handles selection and scroll).
    pub results_table_state: TableState,
    /// One-line feedback shown in the footer.
    pub status: Option<String>,
}

impl TuiState {
    /// Creates a state with `initial_query` in the search box.
    ///
    /// Starts in search mode when the box is empty.
    #[must_use]
    pub fn new(initial_query: &str) -> Self {
        let input_mode = if initial_query.trim().is_empty() {
            InputMode::Search
        } else {
            InputMode::Normal
        };
        Self {
            input_mode,
            search_input: String::from(initial_query),
            comment_input: String::new(),
            results_table_state: TableState::default(),
            status: None,
        }
    }

    /// Returns the result cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.results_table_state.selected().unwrap_or(0)
    }

    /// Puts the cursor on the first of `len` result cards.
    pub fn reset_cursor(&mut self, len: usize) {
        self.results_table_state
            .select(if len == 0 { None } else { Some(0) });
    }

    /// Moves the cursor up by one.
    pub fn move_up(&mut self) {
        let cursor = self.cursor();
        if cursor > 0 {
            self.results_table_state
                .select(Some(cursor.saturating_sub(1)));
        }
    }

    /// Moves the cursor down by one, staying within `len` cards.
    pub fn move_down(&mut self, len: usize) {
        let next = self.cursor().saturating_add(1);
        if next < len {
            self.results_table_state.select(Some(next));
        }
    }

    /// Appends a character to the active input buffer.
    pub fn input_push(&mut self, c: char) {
        match self.input_mode {
            InputMode::Search => self.search_input.push(c),
            InputMode::Comment => self.comment_input.push(c),
            InputMode::Normal | InputMode::Rate => {}
        }
    }

    /// Removes the last character from the active input buffer.
    pub fn input_pop(&mut self) {
        match self.input_mode {
            InputMode::Search => {
                self.search_input.pop();
            }
            InputMode::Comment => {
                self.comment_input.pop();
            }
            InputMode::Normal | InputMode::Rate => {}
        }
    }

    /// Takes the comment text, clearing the box.
    pub fn take_comment(&mut self) -> String {
        std::mem::take(&mut self.comment_input)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_new_with_empty_query_starts_in_search_mode() {
        // Arrange & Act
        let state = TuiState::new("");

        // Assert
        assert_eq!(state.input_mode, InputMode::Search);
        assert!(state.search_input.is_empty());
    }

    #[test]
    fn test_new_with_query_starts_in_normal_mode() {
        // Arrange & Act
        let state = TuiState::new("batman");

        // Assert
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.search_input, "batman");
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        // Arrange
        let mut state = TuiState::new("batman");
        state.reset_cursor(3);

        // Act & Assert
        state.move_up();
        assert_eq!(state.cursor(), 0);
        state.move_down(3);
        state.move_down(3);
        assert_eq!(state.cursor(), 2);
        state.move_down(3);
        assert_eq!(state.cursor(), 2);
        state.move_up();
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_reset_cursor_on_empty_list() {
        // Arrange
        let mut state = TuiState::new("batman");
        state.reset_cursor(5);

        // Act
        state.reset_cursor(0);

        // Assert
        assert!(state.results_table_state.selected().is_none());
    }

    #[test]
    fn test_input_goes_to_active_buffer() {
        // Arrange
        let mut state = TuiState::new("");

        // Act
        state.input_push('b');
        state.input_push('x');
        state.input_pop();
        state.input_mode = InputMode::Comment;
        state.input_push('o');
        state.input_push('k');
        state.input_mode = InputMode::Normal;
        state.input_push('z');

        // Assert
        assert_eq!(state.search_input, "b");
        assert_eq!(state.take_comment(), "ok");
        assert!(state.comment_input.is_empty());
    }
}
