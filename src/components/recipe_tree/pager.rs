use crate::search::Generation;

/// Which alternative recipe is shown, and how many have been revealed so far.
///
/// Recipes of a result are revealed one per timer tick rather than all at once. Ticks carry
/// the generation of the search that published the result and are ignored once a newer result
/// (or a reset) has replaced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecipePager {
	total: usize,
	revealed: usize,
	active: usize,
	generation: Generation,
}

impl RecipePager {
	/// Start showing a new result of `total` recipes; only the first is revealed.
	pub fn publish(&mut self, total: usize, generation: Generation) {
		*self = Self {
			total,
			revealed: total.min(1),
			active: 0,
			generation,
		};
	}

	/// Reveal one more recipe. Returns whether any remain hidden afterwards.
	pub fn reveal_next(&mut self, generation: Generation) -> bool {
		if generation != self.generation || self.revealed >= self.total {
			return false;
		}
		self.revealed += 1;
		self.revealed < self.total
	}

	pub fn clear(&mut self) {
		*self = Self {
			generation: self.generation,
			..Self::default()
		};
	}

	pub fn active(&self) -> usize {
		self.active
	}

	pub fn revealed(&self) -> usize {
		self.revealed
	}

	pub fn total(&self) -> usize {
		self.total
	}

	pub fn is_fully_revealed(&self) -> bool {
		self.revealed == self.total
	}

	pub fn has_prev(&self) -> bool {
		self.active > 0
	}

	pub fn has_next(&self) -> bool {
		self.active + 1 < self.revealed
	}

	pub fn next(&mut self) {
		if self.has_next() {
			self.active += 1;
		}
	}

	pub fn prev(&mut self) {
		if self.has_prev() {
			self.active -= 1;
		}
	}
}
