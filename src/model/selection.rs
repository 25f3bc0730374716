/// Which task is currently highlighted, if any.
///
/// Driven by UI click/cursor events, so `select` does not bounds-check.
/// The model clears it on every removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    /// Raw value used for "nothing selected" in JSON output
    pub const NONE_RAW: i64 = -1;

    pub fn none() -> Self {
        Selection(None)
    }

    pub fn select(&mut self, index: usize) {
        self.0 = Some(index);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn get(&self) -> Option<usize> {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// The selection as a signed index, `-1` when nothing is selected
    pub fn raw(&self) -> i64 {
        self.0.map_or(Self::NONE_RAW, |i| i as i64)
    }
}
