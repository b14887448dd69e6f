//! The selectable-field contract the date selector drives, plus an in-memory
//! implementation used by the terminal UI and the CLI.

/// Handle returned when a listener is registered, used to remove it again.
pub type ListenerId = usize;

/// Callback invoked with the new selection index.
pub type SelectionListener = Box<dyn FnMut(usize)>;

/// An ordered list of labels with a single current selection.
///
/// Index 0 is reserved by the date selector for its placeholder label, so a
/// selection of 0 means "nothing chosen".
pub trait SelectableField {
    /// Removes every label and resets the selection to 0.
    fn clear(&mut self);

    fn append(&mut self, label: String);

    fn item_count(&self) -> usize;

    fn label(&self, index: usize) -> Option<&str>;

    fn selected_index(&self) -> usize;

    /// Selects `index`, clamped to the last entry.
    fn set_selected_index(&mut self, index: usize);

    fn selected_label(&self) -> Option<&str> {
        self.label(self.selected_index())
    }

    fn on_selection_changed(&mut self, listener: SelectionListener) -> ListenerId;

    fn remove_selection_changed_listener(&mut self, id: ListenerId) -> bool;

    /// While silent, mutations never invoke listeners.
    fn set_silent(&mut self, silent: bool);
}

/// A `SelectableField` backed by a `Vec<String>`.
#[derive(Default)]
pub struct ListField {
    labels: Vec<String>,
    selected: usize,
    listeners: Vec<(ListenerId, SelectionListener)>,
    next_listener_id: ListenerId,
    silent: bool,
}

impl ListField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    fn change_selection(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        self.selected = index;
        if self.silent {
            return;
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(index);
        }
    }
}

impl std::fmt::Debug for ListField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListField")
            .field("labels", &self.labels)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .field("silent", &self.silent)
            .finish()
    }
}

impl SelectableField for ListField {
    fn clear(&mut self) {
        self.labels.clear();
        self.change_selection(0);
    }

    fn append(&mut self, label: String) {
        self.labels.push(label);
    }

    fn item_count(&self) -> usize {
        self.labels.len()
    }

    fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        let last = self.labels.len().saturating_sub(1);
        self.change_selection(index.min(last));
    }

    fn on_selection_changed(&mut self, listener: SelectionListener) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_selection_changed_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn field_with(labels: &[&str]) -> ListField {
        let mut field = ListField::new();
        for label in labels {
            field.append(label.to_string());
        }
        field
    }

    fn recording_listener(field: &mut ListField) -> (ListenerId, Rc<RefCell<Vec<usize>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = field.on_selection_changed(Box::new(move |i| sink.borrow_mut().push(i)));
        (id, seen)
    }

    #[test]
    fn test_append_and_labels() {
        let field = field_with(&["Month", "1", "2"]);
        assert_eq!(field.item_count(), 3);
        assert_eq!(field.label(0), Some("Month"));
        assert_eq!(field.label(3), None);
        assert_eq!(field.selected_index(), 0);
        assert_eq!(field.selected_label(), Some("Month"));
        assert_eq!(field.position("2"), Some(2));
    }

    #[test]
    fn test_selection_clamps_to_last_entry() {
        let mut field = field_with(&["Day", "1", "2", "3"]);
        field.set_selected_index(10);
        assert_eq!(field.selected_index(), 3);
        assert_eq!(field.selected_label(), Some("3"));
    }

    #[test]
    fn test_empty_field_has_no_selected_label() {
        let mut field = ListField::new();
        field.set_selected_index(4);
        assert_eq!(field.selected_index(), 0);
        assert_eq!(field.selected_label(), None);
    }

    #[test]
    fn test_listener_fires_only_on_change() {
        let mut field = field_with(&["Year", "2024", "2023"]);
        let (_, seen) = recording_listener(&mut field);

        field.set_selected_index(1);
        field.set_selected_index(1);
        field.set_selected_index(2);

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_clear_resets_selection_and_notifies() {
        let mut field = field_with(&["Year", "2024"]);
        field.set_selected_index(1);
        let (_, seen) = recording_listener(&mut field);

        field.clear();

        assert_eq!(field.item_count(), 0);
        assert_eq!(field.selected_index(), 0);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_silent_field_does_not_notify() {
        let mut field = field_with(&["Month", "1", "2"]);
        let (_, seen) = recording_listener(&mut field);

        field.set_silent(true);
        field.set_selected_index(2);
        field.clear();
        field.set_silent(false);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_remove_listener() {
        let mut field = field_with(&["Month", "1", "2"]);
        let (id, seen) = recording_listener(&mut field);

        assert!(field.remove_selection_changed_listener(id));
        assert!(!field.remove_selection_changed_listener(id));

        field.set_selected_index(2);
        assert!(seen.borrow().is_empty());
    }
}
