use heapless::Vec;

use super::error::StatusError;

/// Fixed-capacity list of live widgets of one kind.
///
/// Widgets are appended once at screen creation and never removed. Every
/// state update is fanned out to all of them in append order.
///
/// # Examples
///
/// ```
/// use split_status::status::WidgetList;
///
/// let mut list: WidgetList<u32, 2> = WidgetList::new();
/// list.append(1).unwrap();
/// list.append(2).unwrap();
/// assert!(list.append(3).is_err());
///
/// list.for_each_mut(|w| *w *= 10);
/// assert_eq!(list.get(1), Some(&20));
/// ```
pub struct WidgetList<W, const N: usize> {
    widgets: Vec<W, N>,
}

impl<W, const N: usize> Default for WidgetList<W, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, const N: usize> WidgetList<W, N> {
    pub const fn new() -> Self {
        Self { widgets: Vec::new() }
    }

    /// Append a widget, returning its index.
    ///
    /// Returns [`StatusError::WidgetListFull`] once `N` widgets are held.
    pub fn append(&mut self, widget: W) -> Result<usize, StatusError> {
        self.widgets
            .push(widget)
            .map_err(|_| StatusError::WidgetListFull)?;
        Ok(self.widgets.len() - 1)
    }

    /// Run `f` on every widget in append order.
    pub fn for_each_mut<F: FnMut(&mut W)>(&mut self, mut f: F) {
        for widget in self.widgets.iter_mut() {
            f(widget);
        }
    }

    pub fn get(&self, index: usize) -> Option<&W> {
        self.widgets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut W> {
        self.widgets.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_indices_in_order() {
        let mut list: WidgetList<&str, 3> = WidgetList::new();
        assert_eq!(list.append("a"), Ok(0));
        assert_eq!(list.append("b"), Ok(1));
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
    }

    #[test]
    fn full_list_rejects_append() {
        let mut list: WidgetList<u8, 1> = WidgetList::new();
        list.append(0).unwrap();
        assert_eq!(list.append(1), Err(StatusError::WidgetListFull));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn for_each_visits_in_append_order() {
        let mut list: WidgetList<u8, 4> = WidgetList::new();
        for i in 0..4 {
            list.append(i).unwrap();
        }
        let mut seen = [0u8; 4];
        let mut n = 0;
        list.for_each_mut(|w| {
            seen[n] = *w;
            n += 1;
        });
        assert_eq!(seen, [0, 1, 2, 3]);
    }

    #[test]
    fn empty_list_dispatch_is_noop() {
        let mut list: WidgetList<u8, 2> = WidgetList::default();
        let mut calls = 0;
        list.for_each_mut(|_| calls += 1);
        assert_eq!(calls, 0);
        assert!(list.is_empty());
    }
}
