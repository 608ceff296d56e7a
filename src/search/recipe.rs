//! Recipe trees as returned by the resolution service.
//!
//! The service is loose about shapes: icons arrive as `image`, `icon` or `iconRef`, steps as
//! `recipe` or `recipeSteps` (a string or a list), and leaves may omit `children` entirely.
//! Decoding never fails on shape; it defaults instead, so the renderer only ever sees
//! well-formed [`RecipeNode`]s.

use serde_json::Value;

use crate::catalog::{ElementCatalog, PLACEHOLDER_ICON};
use crate::error::ExplorerError;

const UNKNOWN_NAME: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeNode {
	pub name: String,
	pub icon_ref: String,
	/// Ingredients combined to produce this element. Empty for leaves.
	pub children: Vec<RecipeNode>,
	/// Human readable steps such as `"Mud = Water + Earth"`. Empty when the service sent none.
	pub recipe_steps: Vec<String>,
}

impl RecipeNode {
	#[cfg(test)]
	pub fn leaf(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	#[cfg(test)]
	pub fn with_children(mut self, children: Vec<RecipeNode>) -> Self {
		self.children = children;
		self
	}

	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	pub fn first_step(&self) -> Option<&str> {
		self.recipe_steps.first().map(String::as_str)
	}

	/// Depth of the deepest descendant; a lone leaf has depth 0.
	#[cfg(test)]
	pub fn depth(&self) -> usize {
		self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
	}

	#[cfg(test)]
	pub fn node_count(&self) -> usize {
		1 + self.children.iter().map(RecipeNode::node_count).sum::<usize>()
	}

	/// Decode a node, returning `None` only when `value` is not an object.
	pub fn from_value(value: &Value) -> Option<Self> {
		let object = value.as_object()?;
		let name = object
			.get("name")
			.and_then(Value::as_str)
			.filter(|n| !n.is_empty())
			.unwrap_or(UNKNOWN_NAME)
			.to_string();
		let icon_ref = ["iconRef", "image", "icon"]
			.iter()
			.find_map(|key| object.get(*key).and_then(Value::as_str))
			.unwrap_or_default()
			.to_string();
		let children = object
			.get("children")
			.and_then(Value::as_array)
			.map(|items| items.iter().filter_map(RecipeNode::from_value).collect())
			.unwrap_or_default();
		let recipe_steps = ["recipeSteps", "recipe"]
			.iter()
			.find_map(|key| object.get(*key))
			.map(steps_from_value)
			.unwrap_or_default();

		Some(Self {
			name,
			icon_ref,
			children,
			recipe_steps,
		})
	}

	/// Attach catalog icons throughout the tree. Payload icons are kept only for names the
	/// catalog does not know.
	pub fn attach_icons(&mut self, catalog: &ElementCatalog) {
		if let Some(icon) = catalog.icon_for(&self.name) {
			self.icon_ref = icon.to_string();
		} else if self.icon_ref.is_empty() {
			self.icon_ref = PLACEHOLDER_ICON.to_string();
		}
		for child in &mut self.children {
			child.attach_icons(catalog);
		}
	}
}

fn steps_from_value(value: &Value) -> Vec<String> {
	match value {
		Value::String(step) if !step.is_empty() => vec![step.clone()],
		Value::Array(steps) => steps
			.iter()
			.filter_map(Value::as_str)
			.map(str::to_string)
			.collect(),
		_ => Vec::new(),
	}
}

/// Decoded response body of the resolution service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResponse {
	pub results: Vec<RecipeNode>,
	pub nodes_visited: Option<u64>,
	/// Server-side search time, reported for logging only.
	pub execution_time_ms: Option<u64>,
}

impl SearchResponse {
	/// Parse a response body. Only non-JSON text is an error; any JSON shape is accepted.
	pub fn from_json(body: &str) -> Result<Self, ExplorerError> {
		let value: Value = serde_json::from_str(body)?;
		Ok(Self::from_value(&value))
	}

	pub fn from_value(value: &Value) -> Self {
		let results = value
			.get("results")
			.and_then(Value::as_array)
			.map(|items| items.iter().filter_map(RecipeNode::from_value).collect())
			.unwrap_or_default();

		Self {
			results,
			nodes_visited: value.get("nodesVisited").and_then(as_count),
			execution_time_ms: value.get("executionTime").and_then(as_count),
		}
	}
}

fn as_count(value: &Value) -> Option<u64> {
	value.as_u64().or_else(|| {
		value
			.as_f64()
			.filter(|v| v.is_finite() && *v >= 0.0)
			.map(|v| v.round() as u64)
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;
	use crate::catalog::Element;

	#[test]
	fn missing_children_become_a_leaf() {
		let node = RecipeNode::from_value(&json!({ "name": "Stone" })).unwrap();
		assert_eq!(node.children, Vec::new());
		assert!(node.is_leaf());
		assert_eq!(node.depth(), 0);
	}

	#[test]
	fn aliases_and_nested_children_are_decoded() {
		let node = RecipeNode::from_value(&json!({
			"name": "Mud",
			"image": "mud.svg",
			"recipe": ["Mud = Water + Earth"],
			"children": [
				{ "name": "Water", "image": "water.svg" },
				{ "name": "Earth", "children": "not a list" },
				42
			]
		}))
		.unwrap();
		assert_eq!(node.icon_ref, "mud.svg");
		assert_eq!(node.first_step(), Some("Mud = Water + Earth"));
		assert_eq!(node.children.len(), 2);
		assert!(node.children[1].is_leaf());
		assert_eq!(node.node_count(), 3);
		assert_eq!(node.depth(), 1);
	}

	#[test]
	fn single_string_recipe_is_one_step() {
		let node = RecipeNode::from_value(&json!({
			"name": "Air",
			"recipe": "This is a basic element or no recipe found"
		}))
		.unwrap();
		assert_eq!(node.recipe_steps.len(), 1);
	}

	#[test]
	fn nameless_nodes_get_a_placeholder_name() {
		let node = RecipeNode::from_value(&json!({ "name": 7 })).unwrap();
		assert_eq!(node.name, "Unknown");
		assert!(RecipeNode::from_value(&json!("Mud")).is_none());
	}

	#[test]
	fn response_shape_deviations_degrade_to_empty() {
		assert_eq!(SearchResponse::from_value(&json!({})), SearchResponse::default());
		assert!(SearchResponse::from_value(&json!({ "results": "nope" })).results.is_empty());
		assert!(SearchResponse::from_value(&json!([1, 2])).results.is_empty());
		assert!(SearchResponse::from_json("<html>").is_err());
	}

	#[test]
	fn float_counts_are_rounded() {
		let response = SearchResponse::from_value(&json!({
			"results": [],
			"nodesVisited": 12,
			"executionTime": 3.6
		}));
		assert_eq!(response.nodes_visited, Some(12));
		assert_eq!(response.execution_time_ms, Some(4));
	}

	#[test]
	fn icons_prefer_the_catalog() {
		let catalog = ElementCatalog::from_elements([Element::new("Water", "catalog-water.svg")]);
		let mut node = RecipeNode::leaf("Mud").with_children(vec![
			RecipeNode::leaf("Water"),
			RecipeNode {
				icon_ref: "payload-earth.svg".into(),
				..RecipeNode::leaf("Earth")
			},
		]);
		node.attach_icons(&catalog);
		assert_eq!(node.icon_ref, PLACEHOLDER_ICON);
		assert_eq!(node.children[0].icon_ref, "catalog-water.svg");
		assert_eq!(node.children[1].icon_ref, "payload-earth.svg");
	}
}
