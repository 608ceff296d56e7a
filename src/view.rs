//! Which top-level view is on screen, and the moves allowed between them.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
	#[default]
	Landing,
	Search,
	Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewAction {
	StartExploring,
	ShowResults,
	BackToSearch,
}

impl ViewState {
	/// The view reached by `action`, or `None` if the move is not allowed from here.
	pub fn transition(self, action: ViewAction) -> Option<ViewState> {
		match (self, action) {
			(ViewState::Landing, ViewAction::StartExploring) => Some(ViewState::Search),
			(ViewState::Search, ViewAction::ShowResults) => Some(ViewState::Results),
			// a retry from the results view re-enters it
			(ViewState::Results, ViewAction::ShowResults) => Some(ViewState::Results),
			(ViewState::Results, ViewAction::BackToSearch) => Some(ViewState::Search),
			_ => None,
		}
	}

	/// Apply `action` in place, returning whether the view changed state.
	pub fn apply(&mut self, action: ViewAction) -> bool {
		match self.transition(action) {
			Some(next) => {
				*self = next;
				true
			}
			None => false,
		}
	}
}
