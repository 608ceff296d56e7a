use std::fmt;

use serde::Serialize;

pub const MAX_RECIPES_LIMIT: u32 = 30;

/// Graph traversal the resolution service should run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
	#[default]
	#[serde(rename = "BFS")]
	Bfs,
	#[serde(rename = "DFS")]
	Dfs,
	Bidirectional,
}

impl Strategy {
	pub const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dfs, Strategy::Bidirectional];

	/// How many elements a search with this strategy needs.
	pub fn arity(self) -> usize {
		match self {
			Strategy::Bfs | Strategy::Dfs => 1,
			Strategy::Bidirectional => 2,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Strategy::Bfs => "BFS",
			Strategy::Dfs => "DFS",
			Strategy::Bidirectional => "Bidirectional",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Strategy::Bfs => "Breadth First Search",
			Strategy::Dfs => "Depth First Search",
			Strategy::Bidirectional => "Search from both ends",
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Which recipes to ask for. Serialized as the service's `recipeType`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SelectionMode {
	One,
	All,
	Limit,
	#[default]
	Best,
}

impl SelectionMode {
	pub const ALL: [SelectionMode; 3] = [SelectionMode::One, SelectionMode::All, SelectionMode::Limit];

	pub fn label(self) -> &'static str {
		match self {
			SelectionMode::One => "One Recipe",
			SelectionMode::All => "All Recipes",
			SelectionMode::Limit => "Limit Recipes",
			SelectionMode::Best => "Shortest Path",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			SelectionMode::One => "Find a recipe path for the element",
			SelectionMode::All => "Find all possible recipes for the element",
			SelectionMode::Limit => "Limit to a specified number of different recipes",
			SelectionMode::Best => "Find the shortest recipe path",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
	pub strategy: Strategy,
	pub selection_mode: SelectionMode,
	/// Only read by the service when `selection_mode` is `Limit`.
	pub max_recipes: u32,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			strategy: Strategy::default(),
			selection_mode: SelectionMode::default(),
			max_recipes: 5,
		}
	}
}

impl SearchConfig {
	pub fn apply(&mut self, patch: ConfigPatch) {
		if let Some(strategy) = patch.strategy {
			self.strategy = strategy;
		}
		if let Some(mode) = patch.selection_mode {
			self.selection_mode = mode;
		}
		if let Some(max) = patch.max_recipes {
			self.max_recipes = max.clamp(1, MAX_RECIPES_LIMIT);
		}
	}
}

/// Partial update to a [`SearchConfig`]; `None` fields are left alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigPatch {
	pub strategy: Option<Strategy>,
	pub selection_mode: Option<SelectionMode>,
	pub max_recipes: Option<u32>,
}

impl ConfigPatch {
	pub fn strategy(strategy: Strategy) -> Self {
		Self {
			strategy: Some(strategy),
			..Self::default()
		}
	}

	pub fn selection_mode(mode: SelectionMode) -> Self {
		Self {
			selection_mode: Some(mode),
			..Self::default()
		}
	}

	pub fn max_recipes(max: u32) -> Self {
		Self {
			max_recipes: Some(max),
			..Self::default()
		}
	}
}

/// Body posted to the resolution service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	pub element_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub target_name: Option<String>,
	pub algorithm: Strategy,
	pub recipe_type: SelectionMode,
	pub max_recipes: u32,
}

/// Metrics of the latest search; zeroed whenever a new one starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionMetrics {
	pub execution_time_ms: u64,
	pub nodes_visited: u64,
	pub total_recipes: u64,
	pub progress_percent: u8,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn max_recipes_is_clamped() {
		let mut config = SearchConfig::default();
		config.apply(ConfigPatch::max_recipes(0));
		assert_eq!(config.max_recipes, 1);
		config.apply(ConfigPatch::max_recipes(99));
		assert_eq!(config.max_recipes, 30);
	}

	#[test]
	fn patch_leaves_unset_fields() {
		let mut config = SearchConfig::default();
		config.apply(ConfigPatch::max_recipes(12));
		config.apply(ConfigPatch::strategy(Strategy::Dfs));
		assert_eq!(
			config,
			SearchConfig {
				strategy: Strategy::Dfs,
				selection_mode: SelectionMode::Best,
				max_recipes: 12,
			}
		);
	}

	#[test]
	fn request_uses_service_field_names() {
		let request = SearchRequest {
			element_name: "Mud".into(),
			target_name: None,
			algorithm: Strategy::Bfs,
			recipe_type: SelectionMode::Limit,
			max_recipes: 3,
		};
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({ "elementName": "Mud", "algorithm": "BFS", "recipeType": "Limit", "maxRecipes": 3 })
		);

		let bidirectional = SearchRequest {
			target_name: Some("Stone".into()),
			algorithm: Strategy::Bidirectional,
			..request
		};
		let value = serde_json::to_value(&bidirectional).unwrap();
		assert_eq!(value["targetName"], "Stone");
		assert_eq!(value["algorithm"], "Bidirectional");
	}
}
