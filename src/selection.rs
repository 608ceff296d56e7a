//! Which elements the user has picked, with arity depending on the search strategy.

use crate::catalog::Element;
use crate::search::Strategy;

/// Role of a selected element; bidirectional searches run from source to target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotMarker {
	Source,
	Target,
}

impl SlotMarker {
	pub fn css_class(self) -> &'static str {
		match self {
			SlotMarker::Source => "selected-source",
			SlotMarker::Target => "selected-target",
		}
	}
}

/// Up to two chosen elements, in pick order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	slots: Vec<Element>,
}

impl Selection {
	pub fn elements(&self) -> &[Element] {
		&self.slots
	}

	pub fn source(&self) -> Option<&Element> {
		self.slots.first()
	}

	pub fn target(&self) -> Option<&Element> {
		self.slots.get(1)
	}

	/// Pick an element. BFS/DFS replace the selection; bidirectional fills source then
	/// target, and starts over once both are set.
	pub fn select(&mut self, element: Element, strategy: Strategy) -> &Selection {
		if self.slots.len() >= strategy.arity() {
			self.slots.clear();
		}
		self.slots.push(element);
		self
	}

	/// Drop slots the strategy cannot use, keeping the source.
	pub fn enforce_arity(&mut self, strategy: Strategy) {
		self.slots.truncate(strategy.arity());
	}

	/// Whether a search with `strategy` has every element it needs.
	pub fn is_ready(&self, strategy: Strategy) -> bool {
		self.slots.len() == strategy.arity()
	}

	pub fn marker_for(&self, name: &str) -> Option<SlotMarker> {
		match self.slots.iter().position(|e| e.name == name)? {
			0 => Some(SlotMarker::Source),
			_ => Some(SlotMarker::Target),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn element(name: &str) -> Element {
		Element::new(name, format!("{name}.svg"))
	}

	fn names(selection: &Selection) -> Vec<&str> {
		selection.elements().iter().map(|e| e.name.as_str()).collect()
	}

	#[test]
	fn single_strategies_replace_the_selection() {
		for strategy in [Strategy::Bfs, Strategy::Dfs] {
			let mut selection = Selection::default();
			selection.select(element("Water"), strategy);
			selection.select(element("Fire"), strategy);
			assert_eq!(names(&selection), ["Fire"]);
			assert!(selection.is_ready(strategy));
		}
	}

	#[test]
	fn bidirectional_fills_two_slots_then_restarts() {
		let mut selection = Selection::default();
		selection.select(element("Water"), Strategy::Bidirectional);
		assert!(!selection.is_ready(Strategy::Bidirectional));
		selection.select(element("Fire"), Strategy::Bidirectional);
		assert_eq!(names(&selection), ["Water", "Fire"]);
		assert!(selection.is_ready(Strategy::Bidirectional));
		selection.select(element("Earth"), Strategy::Bidirectional);
		assert_eq!(names(&selection), ["Earth"]);
	}

	#[test]
	fn markers_distinguish_source_and_target() {
		let mut selection = Selection::default();
		selection.select(element("Water"), Strategy::Bidirectional);
		selection.select(element("Fire"), Strategy::Bidirectional);
		assert_eq!(selection.marker_for("Water"), Some(SlotMarker::Source));
		assert_eq!(selection.marker_for("Fire"), Some(SlotMarker::Target));
		assert_eq!(selection.marker_for("Earth"), None);
	}

	#[test]
	fn switching_to_single_strategy_keeps_the_source() {
		let mut selection = Selection::default();
		selection.select(element("Water"), Strategy::Bidirectional);
		selection.select(element("Fire"), Strategy::Bidirectional);
		selection.enforce_arity(Strategy::Dfs);
		assert_eq!(names(&selection), ["Water"]);
		assert_eq!(selection.target(), None);
	}
}
